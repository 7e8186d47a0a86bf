//! Factory endpoints

use crate::error::Result;
use crate::{DATA_FACTORY_API_VERSION, DataFactoryClient};
use weir_core::domain::factory::Factory;
use weir_core::dto::resource::CreateFactory;

impl DataFactoryClient {
    // =============================================================================
    // Factory Management
    // =============================================================================

    /// Create a factory, or update it in place if it already exists
    ///
    /// The returned provisioning state may still be in progress; callers that
    /// need the factory to be usable poll [`DataFactoryClient::get_factory`].
    ///
    /// # Arguments
    /// * `group` - Resource group holding the factory
    /// * `name` - Factory name (globally unique)
    /// * `req` - Location and tags
    pub async fn create_or_update_factory(
        &self,
        group: &str,
        name: &str,
        req: &CreateFactory,
    ) -> Result<Factory> {
        let path = Self::factory_path(group, name);
        self.inner.put(&path, DATA_FACTORY_API_VERSION, req).await
    }

    /// Get a factory by name
    pub async fn get_factory(&self, group: &str, name: &str) -> Result<Factory> {
        let path = Self::factory_path(group, name);
        self.inner.get(&path, DATA_FACTORY_API_VERSION).await
    }
}
