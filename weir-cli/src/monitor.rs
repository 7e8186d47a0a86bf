//! Pipeline run monitoring
//!
//! Triggers a run, polls it until it reaches a terminal status, then reads
//! the first activity run to report either copy metrics or the failure.

use chrono::Utc;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;
use weir_client::ManagementApi;
use weir_core::domain::run::{ActivityRun, PipelineRun, RunStatus};
use weir_core::dto::pipeline::RunParameters;
use weir_core::dto::run::RunFilter;

use crate::error::{ProvisionError, Result, Step};

/// Timing of the run monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Wait before the first status fetch
    pub initial_delay: Duration,
    /// Wait between status fetches
    pub poll_interval: Duration,
    /// Bound on the whole wait, initial delay included
    pub timeout: Duration,
}

/// Figures reported by a successful copy activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyMetrics {
    pub data_read: u64,
    pub data_written: u64,
    pub copy_duration: u64,
}

impl CopyMetrics {
    /// Read `dataRead`, `dataWritten` and `copyDuration` from an activity output
    pub fn from_output(output: Option<&Value>) -> Result<Self> {
        let field = |name: &str| {
            output
                .and_then(|o| o.get(name))
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    ProvisionError::Precondition(format!(
                        "copy activity output has no numeric '{}'",
                        name
                    ))
                })
        };

        Ok(Self {
            data_read: field("dataRead")?,
            data_written: field("dataWritten")?,
            copy_duration: field("copyDuration")?,
        })
    }
}

/// What the first activity of a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityOutcome {
    Succeeded(CopyMetrics),
    /// Any other status; metrics are not read
    Unsuccessful { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    pub name: String,
    pub status: RunStatus,
    pub outcome: ActivityOutcome,
}

impl ActivityReport {
    pub fn from_activity_run(run: ActivityRun) -> Result<Self> {
        let outcome = if run.status == RunStatus::Succeeded {
            ActivityOutcome::Succeeded(CopyMetrics::from_output(run.output.as_ref())?)
        } else {
            ActivityOutcome::Unsuccessful {
                message: run.error.and_then(|e| e.message),
            }
        };

        Ok(Self {
            name: run.activity_name,
            status: run.status,
            outcome,
        })
    }
}

/// Final state of a pipeline run and its first activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub message: Option<String>,
    pub activity: ActivityReport,
}

/// Triggers and watches pipeline runs in one factory
pub struct RunMonitor<'a> {
    api: &'a dyn ManagementApi,
    group: &'a str,
    factory: &'a str,
    settings: &'a MonitorSettings,
}

impl<'a> RunMonitor<'a> {
    pub fn new(
        api: &'a dyn ManagementApi,
        group: &'a str,
        factory: &'a str,
        settings: &'a MonitorSettings,
    ) -> Self {
        Self {
            api,
            group,
            factory,
            settings,
        }
    }

    /// Start one run of `pipeline` with no parameters
    ///
    /// Not retried: a repeated call would start a second run.
    pub async fn trigger(&self, pipeline: &str) -> Result<Uuid> {
        let response = self
            .api
            .create_run(self.group, self.factory, pipeline, &RunParameters::new())
            .await
            .map_err(|e| ProvisionError::from_client(Step::TriggerRun, e))?;

        info!(pipeline, run_id = %response.run_id, "Triggered pipeline run");
        Ok(response.run_id)
    }

    /// Fetch the current state of a run
    pub async fn fetch_run(&self, run_id: Uuid) -> Result<PipelineRun> {
        self.api
            .get_pipeline_run(self.group, self.factory, run_id)
            .await
            .map_err(|e| ProvisionError::from_client(Step::MonitorRun, e))
    }

    /// Poll a run until it reaches a terminal status or the timeout elapses
    pub async fn wait_for_completion(&self, run_id: Uuid) -> Result<PipelineRun> {
        let started = Instant::now();

        match tokio::time::timeout(self.settings.timeout, self.poll_until_terminal(run_id)).await {
            Ok(result) => result,
            Err(_) => Err(ProvisionError::Timeout {
                what: format!("pipeline run {} to finish", run_id),
                waited: started.elapsed(),
            }),
        }
    }

    async fn poll_until_terminal(&self, run_id: Uuid) -> Result<PipelineRun> {
        if !self.settings.initial_delay.is_zero() {
            debug!(delay = ?self.settings.initial_delay, "Waiting before first status check");
            tokio::time::sleep(self.settings.initial_delay).await;
        }

        loop {
            match self
                .api
                .get_pipeline_run(self.group, self.factory, run_id)
                .await
            {
                Ok(run) if run.status.is_terminal() => {
                    info!(%run_id, status = %run.status, "Pipeline run finished");
                    return Ok(run);
                }
                Ok(run) => debug!(%run_id, status = %run.status, "Pipeline run in progress"),
                Err(e) if e.is_transient() => {
                    warn!(%run_id, "Failed to fetch pipeline run: {}", e);
                }
                Err(e) => return Err(ProvisionError::from_client(Step::MonitorRun, e)),
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Build the report for a finished run from its first activity run
    pub async fn report(&self, run: PipelineRun) -> Result<RunReport> {
        let filter = RunFilter::around(Utc::now());
        let activities = self
            .api
            .query_activity_runs(self.group, self.factory, run.run_id, &filter)
            .await
            .map_err(|e| ProvisionError::from_client(Step::ActivityRuns, e))?;

        debug!(run_id = %run.run_id, count = activities.len(), "Fetched activity runs");

        let first = activities.into_iter().next().ok_or_else(|| {
            ProvisionError::Precondition(format!(
                "pipeline run {} reported no activity runs",
                run.run_id
            ))
        })?;

        Ok(RunReport {
            run_id: run.run_id,
            status: run.status,
            message: run.message.filter(|m| !m.is_empty()),
            activity: ActivityReport::from_activity_run(first)?,
        })
    }

    /// Trigger `pipeline`, wait for it to finish and report on it
    pub async fn run_to_completion(&self, pipeline: &str) -> Result<RunReport> {
        let run_id = self.trigger(pipeline).await?;
        let run = self.wait_for_completion(run_id).await?;
        self.report(run).await
    }
}
