//! Management API seam
//!
//! The orchestrator depends on [`ManagementApi`] rather than on the HTTP
//! clients directly, so provisioning and monitoring can be exercised against
//! an in-memory implementation.

use async_trait::async_trait;
use uuid::Uuid;
use weir_core::domain::dataset::DatasetResource;
use weir_core::domain::factory::Factory;
use weir_core::domain::linked_service::LinkedServiceResource;
use weir_core::domain::pipeline::PipelineResource;
use weir_core::domain::resource::ResourceGroup;
use weir_core::domain::run::{ActivityRun, PipelineRun};
use weir_core::dto::pipeline::{CreateRunResponse, RunParameters};
use weir_core::dto::resource::{CreateFactory, CreateResourceGroup};
use weir_core::dto::run::RunFilter;

use crate::ManagementClients;
use crate::error::Result;

/// Every management-plane operation the orchestrator issues
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Acquire credentials eagerly
    async fn authenticate(&self) -> Result<()>;

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        req: &CreateResourceGroup,
    ) -> Result<ResourceGroup>;

    async fn create_or_update_factory(
        &self,
        group: &str,
        name: &str,
        req: &CreateFactory,
    ) -> Result<Factory>;

    async fn get_factory(&self, group: &str, name: &str) -> Result<Factory>;

    async fn create_or_update_linked_service(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &LinkedServiceResource,
    ) -> Result<LinkedServiceResource>;

    async fn create_or_update_dataset(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &DatasetResource,
    ) -> Result<DatasetResource>;

    async fn create_or_update_pipeline(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &PipelineResource,
    ) -> Result<PipelineResource>;

    async fn create_run(
        &self,
        group: &str,
        factory: &str,
        pipeline: &str,
        parameters: &RunParameters,
    ) -> Result<CreateRunResponse>;

    async fn get_pipeline_run(&self, group: &str, factory: &str, run_id: Uuid)
    -> Result<PipelineRun>;

    async fn query_activity_runs(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
        filter: &RunFilter,
    ) -> Result<Vec<ActivityRun>>;
}

#[async_trait]
impl ManagementApi for ManagementClients {
    async fn authenticate(&self) -> Result<()> {
        self.resources.inner.authenticate().await
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        req: &CreateResourceGroup,
    ) -> Result<ResourceGroup> {
        self.resources
            .create_or_update_resource_group(name, req)
            .await
    }

    async fn create_or_update_factory(
        &self,
        group: &str,
        name: &str,
        req: &CreateFactory,
    ) -> Result<Factory> {
        self.data_factory
            .create_or_update_factory(group, name, req)
            .await
    }

    async fn get_factory(&self, group: &str, name: &str) -> Result<Factory> {
        self.data_factory.get_factory(group, name).await
    }

    async fn create_or_update_linked_service(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &LinkedServiceResource,
    ) -> Result<LinkedServiceResource> {
        self.data_factory
            .create_or_update_linked_service(group, factory, name, resource)
            .await
    }

    async fn create_or_update_dataset(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &DatasetResource,
    ) -> Result<DatasetResource> {
        self.data_factory
            .create_or_update_dataset(group, factory, name, resource)
            .await
    }

    async fn create_or_update_pipeline(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &PipelineResource,
    ) -> Result<PipelineResource> {
        self.data_factory
            .create_or_update_pipeline(group, factory, name, resource)
            .await
    }

    async fn create_run(
        &self,
        group: &str,
        factory: &str,
        pipeline: &str,
        parameters: &RunParameters,
    ) -> Result<CreateRunResponse> {
        self.data_factory
            .create_run(group, factory, pipeline, parameters)
            .await
    }

    async fn get_pipeline_run(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
    ) -> Result<PipelineRun> {
        self.data_factory
            .get_pipeline_run(group, factory, run_id)
            .await
    }

    async fn query_activity_runs(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
        filter: &RunFilter,
    ) -> Result<Vec<ActivityRun>> {
        self.data_factory
            .query_activity_runs(group, factory, run_id, filter)
            .await
    }
}
