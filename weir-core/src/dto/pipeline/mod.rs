//! Pipeline run trigger DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Parameter values passed when triggering a run; empty for parameterless pipelines
pub type RunParameters = BTreeMap<String, serde_json::Value>;

/// Response of `createRun`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRunResponse {
    pub run_id: Uuid,
}
