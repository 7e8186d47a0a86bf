//! `provision`: create every resource, run the pipeline once, report

use anyhow::Result;
use tracing::info;
use weir_client::ManagementApi;
use weir_core::domain::resource::ResourceSummary;

use crate::config::Config;
use crate::monitor::{RunMonitor, RunReport};
use crate::output::{render_run_report, render_summary};
use crate::provision::Provisioner;

pub async fn handle_provision(api: &dyn ManagementApi, config: &Config) -> Result<()> {
    let report = provision_and_run(api, config, |summary| {
        println!("{}\n", render_summary(summary));
    })
    .await?;

    println!("{}", render_run_report(&report));
    Ok(())
}

/// The whole workflow: authenticate, provision, trigger, monitor, report
///
/// Configuration problems surface before any remote call.
pub async fn provision_and_run<F>(
    api: &dyn ManagementApi,
    config: &Config,
    on_created: F,
) -> crate::error::Result<RunReport>
where
    F: FnMut(&ResourceSummary),
{
    let provisioner = Provisioner::new(api, config)?;
    super::authenticate(api).await?;

    let created = provisioner.provision(on_created).await?;
    info!(resources = created.len(), "Provisioning complete");

    let topology = &config.topology;
    RunMonitor::new(
        api,
        &topology.resource_group,
        &topology.factory,
        &config.monitor,
    )
    .run_to_completion(&topology.pipeline)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::monitor::{ActivityOutcome, CopyMetrics};
    use crate::testing::{MockApi, config, failed_activity};
    use weir_core::domain::run::RunStatus;

    #[tokio::test]
    async fn test_end_to_end_success() {
        colored::control::set_override(false);
        let api = MockApi::new();
        let config = config();

        let mut printed = Vec::new();
        let report = provision_and_run(&api, &config, |s| printed.push(render_summary(s)))
            .await
            .unwrap();

        assert_eq!(printed.len(), 6);
        assert!(printed[0].contains("Name:     G"));
        assert!(printed[5].contains("Name:     P"));
        assert_eq!(
            report.activity.outcome,
            ActivityOutcome::Succeeded(CopyMetrics {
                data_read: 100,
                data_written: 100,
                copy_duration: 5,
            })
        );

        let out = render_run_report(&report);
        assert!(out.contains("Number of bytes read: 100"));
        assert!(out.contains("Number of bytes written: 100"));
        assert!(out.contains("Copy duration: 5"));
        assert_eq!(api.calls().first(), Some(&"authenticate"));
        assert_eq!(api.count("create_run"), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_failure_reports_error() {
        colored::control::set_override(false);
        let api = MockApi::new()
            .with_run_statuses(&[RunStatus::InProgress, RunStatus::Failed])
            .with_activity_runs(vec![failed_activity("boom")]);
        let config = config();

        let report = provision_and_run(&api, &config, |_| {}).await.unwrap();

        assert_eq!(report.status, RunStatus::Failed);
        let out = render_run_report(&report);
        assert!(out.contains("Errors: boom"));
        assert!(!out.contains("bytes read"));
    }

    #[tokio::test]
    async fn test_rejected_credentials_stop_before_provisioning() {
        let api = MockApi::new().fail_next("authenticate", 401, "invalid_client");
        let config = config();

        let result = provision_and_run(&api, &config, |_| {}).await;

        assert!(result.is_err());
        assert_eq!(api.calls(), vec!["authenticate"]);
    }

    #[tokio::test]
    async fn test_missing_connection_string_makes_no_calls() {
        let api = MockApi::new();
        let mut config = config();
        config.storage_connection_string = None;

        let result = provision_and_run(&api, &config, |_| {}).await;

        assert!(matches!(result, Err(ProvisionError::Configuration(_))));
        assert!(api.calls().is_empty());
    }
}
