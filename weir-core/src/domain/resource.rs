//! Resource envelopes and printable summaries

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provisioning state the management plane reports once a resource is ready
pub const PROVISIONING_SUCCEEDED: &str = "Succeeded";

/// Top-level resource with a region and tags (resource groups, factories)
///
/// Every server-assigned field is optional; the management API omits fields
/// freely depending on resource type and API version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedResource<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
}

/// Resource nested under a factory (linked services, datasets, pipelines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubResource<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    pub properties: P,
}

impl<P> SubResource<P> {
    /// Wrap properties for a create-or-update request
    pub fn new(properties: P) -> Self {
        Self {
            id: None,
            name: None,
            resource_type: None,
            etag: None,
            properties,
        }
    }
}

/// Properties that report a provisioning state
pub trait Provisioned {
    fn provisioning_state(&self) -> Option<&str>;
}

/// Resource group properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    pub provisioning_state: Option<String>,
}

impl Provisioned for ResourceGroupProperties {
    fn provisioning_state(&self) -> Option<&str> {
        self.provisioning_state.as_deref()
    }
}

pub type ResourceGroup = TrackedResource<ResourceGroupProperties>;

impl<P: Provisioned> TrackedResource<P> {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(Provisioned::provisioning_state)
    }

    /// True once the management plane reports `Succeeded`
    pub fn is_provisioned(&self) -> bool {
        self.provisioning_state() == Some(PROVISIONING_SUCCEEDED)
    }
}

/// What was created, reduced to the fields worth printing
///
/// Absent metadata stays `None` and renders as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
    pub kind: &'static str,
    pub name: String,
    pub id: Option<String>,
    pub location: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub provisioning_state: Option<String>,
}

impl ResourceSummary {
    /// Summarize a tracked resource; `fallback_name` is used when the response omits one
    pub fn from_tracked<P: Provisioned>(
        kind: &'static str,
        fallback_name: &str,
        resource: &TrackedResource<P>,
    ) -> Self {
        Self {
            kind,
            name: resource
                .name
                .clone()
                .unwrap_or_else(|| fallback_name.to_string()),
            id: resource.id.clone(),
            location: resource.location.clone(),
            tags: resource.tags.clone(),
            provisioning_state: resource.provisioning_state().map(str::to_string),
        }
    }

    /// Summarize a factory sub-resource
    pub fn from_sub<P>(kind: &'static str, fallback_name: &str, resource: &SubResource<P>) -> Self {
        Self {
            kind,
            name: resource
                .name
                .clone()
                .unwrap_or_else(|| fallback_name.to_string()),
            id: resource.id.clone(),
            location: None,
            tags: None,
            provisioning_state: None,
        }
    }
}
