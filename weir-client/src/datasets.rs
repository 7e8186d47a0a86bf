//! Dataset endpoints

use crate::error::Result;
use crate::{DATA_FACTORY_API_VERSION, DataFactoryClient};
use weir_core::domain::dataset::DatasetResource;

impl DataFactoryClient {
    /// Create or update a dataset inside a factory
    pub async fn create_or_update_dataset(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &DatasetResource,
    ) -> Result<DatasetResource> {
        let path = format!("{}/datasets/{}", Self::factory_path(group, factory), name);
        self.inner
            .put(&path, DATA_FACTORY_API_VERSION, resource)
            .await
    }
}
