//! `status`: show an existing run without waiting

use anyhow::Result;
use uuid::Uuid;
use weir_client::ManagementApi;

use crate::config::Config;
use crate::monitor::RunMonitor;
use crate::output::{render_run_report, render_run_status};

pub async fn handle_status(api: &dyn ManagementApi, config: &Config, run_id: Uuid) -> Result<()> {
    println!("{}", describe_run(api, config, run_id).await?);
    Ok(())
}

/// Full report for a finished run, status only for one still in flight
async fn describe_run(
    api: &dyn ManagementApi,
    config: &Config,
    run_id: Uuid,
) -> crate::error::Result<String> {
    super::authenticate(api).await?;

    let topology = &config.topology;
    let monitor = RunMonitor::new(
        api,
        &topology.resource_group,
        &topology.factory,
        &config.monitor,
    );

    let run = monitor.fetch_run(run_id).await?;
    if !run.status.is_terminal() {
        return Ok(render_run_status(&run));
    }

    let report = monitor.report(run).await?;
    Ok(render_run_report(&report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProvisionError, Step};
    use crate::testing::{MockApi, RUN_ID, config};
    use weir_core::domain::run::RunStatus;

    #[tokio::test]
    async fn test_in_progress_run_shows_status_only() {
        colored::control::set_override(false);
        let api = MockApi::new().with_run_statuses(&[RunStatus::InProgress]);

        let out = describe_run(&api, &config(), RUN_ID).await.unwrap();

        assert!(out.contains("Pipeline run status: InProgress"));
        assert_eq!(api.count("get_pipeline_run"), 1);
        assert_eq!(api.count("query_activity_runs"), 0);
        assert_eq!(api.count("create_run"), 0);
    }

    #[tokio::test]
    async fn test_finished_run_shows_activity() {
        colored::control::set_override(false);
        let api = MockApi::new();

        let out = describe_run(&api, &config(), RUN_ID).await.unwrap();

        assert!(out.contains("Number of bytes read: 100"));
    }

    #[tokio::test]
    async fn test_unknown_run_is_remote_error() {
        let api = MockApi::new().fail_next(
            "get_pipeline_run",
            404,
            r#"{"error":{"code":"EntityNotFound","message":"run not found"}}"#,
        );

        let result = describe_run(&api, &config(), RUN_ID).await;

        assert!(matches!(
            result,
            Err(ProvisionError::RemoteService {
                step: Step::MonitorRun,
                status: Some(404),
                ..
            })
        ));
    }
}
