//! Factory domain types

use serde::{Deserialize, Serialize};

use super::resource::{Provisioned, TrackedResource};

/// Server-assigned factory properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Provisioned for FactoryProperties {
    fn provisioning_state(&self) -> Option<&str> {
        self.provisioning_state.as_deref()
    }
}

/// The service instance hosting linked services, datasets and pipelines
pub type Factory = TrackedResource<FactoryProperties>;
