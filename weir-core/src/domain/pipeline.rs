//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::resource::SubResource;

/// Reference by name to another resource in the same factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub reference_name: String,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    LinkedServiceReference,
    DatasetReference,
}

impl Reference {
    pub fn linked_service(name: impl Into<String>) -> Self {
        Self {
            reference_name: name.into(),
            kind: ReferenceKind::LinkedServiceReference,
        }
    }

    pub fn dataset(name: impl Into<String>) -> Self {
        Self {
            reference_name: name.into(),
            kind: ReferenceKind::DatasetReference,
        }
    }
}

/// Ordered collection of activities executed as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSpec>,
}

/// Declared pipeline parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

/// One unit of work inside a pipeline
///
/// Only copy activities are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default)]
    pub inputs: Vec<Reference>,
    #[serde(default)]
    pub outputs: Vec<Reference>,
    pub type_properties: CopyProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyProperties {
    pub source: CopySource,
    pub sink: CopySink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CopySource {
    BlobSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CopySink {
    BlobSink,
}

impl Activity {
    /// Blob-to-blob copy from `input` dataset to `output` dataset
    pub fn blob_copy(name: impl Into<String>, input: &str, output: &str) -> Self {
        Self {
            name: name.into(),
            kind: ActivityKind::Copy,
            inputs: vec![Reference::dataset(input)],
            outputs: vec![Reference::dataset(output)],
            type_properties: CopyProperties {
                source: CopySource::BlobSource,
                sink: CopySink::BlobSink,
            },
        }
    }
}

impl Pipeline {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            description: None,
            activities,
            parameters: BTreeMap::new(),
        }
    }
}

pub type PipelineResource = SubResource<Pipeline>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_activity_wire_shape() {
        let activity = Activity::blob_copy("copyBlobtoBlob", "ds_in", "ds_out");
        let json = serde_json::to_value(&activity).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "copyBlobtoBlob",
                "type": "Copy",
                "inputs": [{ "referenceName": "ds_in", "type": "DatasetReference" }],
                "outputs": [{ "referenceName": "ds_out", "type": "DatasetReference" }],
                "typeProperties": {
                    "source": { "type": "BlobSource" },
                    "sink": { "type": "BlobSink" }
                }
            })
        );
    }

    #[test]
    fn test_pipeline_serializes_empty_parameters() {
        let pipeline = Pipeline::new(vec![Activity::blob_copy("copy", "in", "out")]);
        let json = serde_json::to_value(&pipeline).unwrap();

        assert_eq!(json["parameters"], serde_json::json!({}));
        assert_eq!(json["activities"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_copy_source_ignores_extra_settings() {
        let source: CopySource =
            serde_json::from_str(r#"{"type":"BlobSource","recursive":true}"#).unwrap();
        assert_eq!(source, CopySource::BlobSource);
    }
}
