//! Resource group endpoints

use crate::error::Result;
use crate::{RESOURCES_API_VERSION, ResourceManagementClient};
use weir_core::domain::resource::ResourceGroup;
use weir_core::dto::resource::CreateResourceGroup;

impl ResourceManagementClient {
    /// Create a resource group, or update it in place if it already exists
    ///
    /// # Arguments
    /// * `name` - Resource group name
    /// * `req` - Location and tags
    ///
    /// # Returns
    /// The resource group as stored by the management plane
    pub async fn create_or_update_resource_group(
        &self,
        name: &str,
        req: &CreateResourceGroup,
    ) -> Result<ResourceGroup> {
        let path = format!("/resourcegroups/{}", name);
        self.inner.put(&path, RESOURCES_API_VERSION, req).await
    }
}
