//! Tracked-resource request bodies

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of a resource group create-or-update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResourceGroup {
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Body of a factory create-or-update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFactory {
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl CreateResourceGroup {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            tags: BTreeMap::new(),
        }
    }
}

impl CreateFactory {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            tags: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_only_body() {
        let json = serde_json::to_value(CreateFactory::new("eastus")).unwrap();
        assert_eq!(json, serde_json::json!({ "location": "eastus" }));
    }
}
