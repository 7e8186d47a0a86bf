//! Linked service domain types

use serde::{Deserialize, Serialize};

use super::resource::SubResource;
use super::secret::SecureString;

/// Connection descriptor to an external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedService {
    #[serde(rename = "type")]
    pub kind: LinkedServiceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub type_properties: StorageProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkedServiceKind {
    AzureStorage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProperties {
    pub connection_string: SecureString,
}

impl LinkedService {
    /// Storage account linked service authenticated by connection string
    pub fn azure_storage(connection_string: SecureString) -> Self {
        Self {
            kind: LinkedServiceKind::AzureStorage,
            description: None,
            type_properties: StorageProperties { connection_string },
        }
    }
}

pub type LinkedServiceResource = SubResource<LinkedService>;
