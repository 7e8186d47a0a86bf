//! Pipeline endpoints

use crate::error::Result;
use crate::{DATA_FACTORY_API_VERSION, DataFactoryClient};
use weir_core::domain::pipeline::PipelineResource;
use weir_core::dto::pipeline::{CreateRunResponse, RunParameters};

impl DataFactoryClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// Create or update a pipeline inside a factory
    ///
    /// # Arguments
    /// * `group` - Resource group holding the factory
    /// * `factory` - Factory name
    /// * `name` - Pipeline name
    /// * `resource` - Activities and parameter declarations
    pub async fn create_or_update_pipeline(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &PipelineResource,
    ) -> Result<PipelineResource> {
        let path = format!("{}/pipelines/{}", Self::factory_path(group, factory), name);
        self.inner
            .put(&path, DATA_FACTORY_API_VERSION, resource)
            .await
    }

    /// Trigger a run of a pipeline
    ///
    /// # Arguments
    /// * `parameters` - Parameter values; pass an empty map for parameterless pipelines
    ///
    /// # Returns
    /// The id of the new run
    pub async fn create_run(
        &self,
        group: &str,
        factory: &str,
        pipeline: &str,
        parameters: &RunParameters,
    ) -> Result<CreateRunResponse> {
        let path = format!(
            "{}/pipelines/{}/createRun",
            Self::factory_path(group, factory),
            pipeline
        );
        self.inner
            .post(&path, DATA_FACTORY_API_VERSION, parameters)
            .await
    }
}
