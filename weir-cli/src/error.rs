//! Orchestration errors
//!
//! Every failure aborts the remaining sequence and reaches `main` with the
//! step that failed and the remote detail attached.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use weir_client::ClientError;

/// Result type alias for orchestration operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// The orchestration step a remote call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Authenticate,
    ResourceGroup,
    Factory,
    FactoryReadiness,
    LinkedService,
    InputDataset,
    OutputDataset,
    Pipeline,
    TriggerRun,
    MonitorRun,
    ActivityRuns,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Authenticate => "authenticate",
            Step::ResourceGroup => "create resource group",
            Step::Factory => "create factory",
            Step::FactoryReadiness => "wait for factory",
            Step::LinkedService => "create linked service",
            Step::InputDataset => "create input dataset",
            Step::OutputDataset => "create output dataset",
            Step::Pipeline => "create pipeline",
            Step::TriggerRun => "trigger pipeline run",
            Step::MonitorRun => "monitor pipeline run",
            Step::ActivityRuns => "query activity runs",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Missing or invalid configuration input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The identity provider rejected the service principal
    #[error("Authentication failed during {step}: {message}")]
    Authentication { step: Step, message: String },

    /// The management API rejected a request or could not be reached
    #[error("{step} failed{}: {message}", status_suffix(.status))]
    RemoteService {
        step: Step,
        status: Option<u16>,
        message: String,
    },

    /// Remote state did not allow the next step to proceed
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A bounded wait ran out
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (status {s})"))
        .unwrap_or_default()
}

impl ProvisionError {
    /// Attach the failing step to a client error
    pub fn from_client(step: Step, err: ClientError) -> Self {
        match err {
            ClientError::Authentication { message, .. } => Self::Authentication { step, message },
            ClientError::ApiError {
                status,
                code,
                message,
            } => Self::RemoteService {
                step,
                status: Some(status),
                message: match code {
                    Some(code) => format!("{code}: {message}"),
                    None => message,
                },
            },
            other => Self::RemoteService {
                step,
                status: other.status(),
                message: other.to_string(),
            },
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
