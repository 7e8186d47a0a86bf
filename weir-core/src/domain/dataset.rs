//! Dataset domain types

use serde::{Deserialize, Serialize};

use super::pipeline::Reference;
use super::resource::SubResource;

/// Named location inside a linked store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub linked_service_name: Reference,
    pub type_properties: BlobLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetKind {
    AzureBlob,
}

/// Folder and optional file inside a blob container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobLocation {
    pub folder_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Dataset {
    /// Blob dataset bound to `linked_service`
    pub fn azure_blob(
        linked_service: &str,
        folder_path: impl Into<String>,
        file_name: Option<String>,
    ) -> Self {
        Self {
            kind: DatasetKind::AzureBlob,
            linked_service_name: Reference::linked_service(linked_service),
            type_properties: BlobLocation {
                folder_path: folder_path.into(),
                file_name,
            },
        }
    }
}

pub type DatasetResource = SubResource<Dataset>;
