//! Linked service endpoints

use crate::error::Result;
use crate::{DATA_FACTORY_API_VERSION, DataFactoryClient};
use weir_core::domain::linked_service::LinkedServiceResource;

impl DataFactoryClient {
    /// Create or update a linked service inside a factory
    ///
    /// # Arguments
    /// * `group` - Resource group holding the factory
    /// * `factory` - Factory name
    /// * `name` - Linked service name
    /// * `resource` - Connection descriptor; secrets are sent as secure strings
    pub async fn create_or_update_linked_service(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &LinkedServiceResource,
    ) -> Result<LinkedServiceResource> {
        let path = format!(
            "{}/linkedservices/{}",
            Self::factory_path(group, factory),
            name
        );
        self.inner
            .put(&path, DATA_FACTORY_API_VERSION, resource)
            .await
    }
}
