//! Pipeline and activity run domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Execution status of a pipeline run or activity run
///
/// Status strings the service may add later are kept verbatim in `Unknown`
/// and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    Canceling,
    Succeeded,
    Failed,
    Cancelled,
    Unknown(String),
}

impl RunStatus {
    /// True when the run will not change status again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "Queued",
            RunStatus::InProgress => "InProgress",
            RunStatus::Canceling => "Canceling",
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed => "Failed",
            RunStatus::Cancelled => "Cancelled",
            RunStatus::Unknown(other) => other,
        }
    }
}

impl From<String> for RunStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Queued" => RunStatus::Queued,
            "InProgress" => RunStatus::InProgress,
            "Canceling" => RunStatus::Canceling,
            "Succeeded" => RunStatus::Succeeded,
            "Failed" => RunStatus::Failed,
            "Cancelled" => RunStatus::Cancelled,
            _ => RunStatus::Unknown(value),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub run_id: Uuid,
    #[serde(default)]
    pub pipeline_name: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub run_start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub run_end: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub duration_in_ms: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// Execution record of one activity inside a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRun {
    pub activity_name: String,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub activity_run_id: Option<String>,
    #[serde(default)]
    pub pipeline_run_id: Option<Uuid>,
    pub status: RunStatus,
    #[serde(default)]
    pub activity_run_start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub activity_run_end: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub duration_in_ms: Option<u64>,
    /// Activity-specific output; copy activities report `dataRead`, `dataWritten`, `copyDuration`
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ActivityError>,
}

/// Failure detail reported for an activity run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityError {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub failure_type: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}
