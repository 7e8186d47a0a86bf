//! `run`: trigger and monitor an already provisioned pipeline

use anyhow::Result;
use weir_client::ManagementApi;

use crate::config::Config;
use crate::monitor::{RunMonitor, RunReport};
use crate::output::render_run_report;

pub async fn handle_run(
    api: &dyn ManagementApi,
    config: &Config,
    pipeline: Option<&str>,
) -> Result<()> {
    let report = run_pipeline(api, config, pipeline).await?;
    println!("{}", render_run_report(&report));
    Ok(())
}

async fn run_pipeline(
    api: &dyn ManagementApi,
    config: &Config,
    pipeline: Option<&str>,
) -> crate::error::Result<RunReport> {
    super::authenticate(api).await?;

    let topology = &config.topology;
    RunMonitor::new(
        api,
        &topology.resource_group,
        &topology.factory,
        &config.monitor,
    )
    .run_to_completion(pipeline.unwrap_or(&topology.pipeline))
    .await
}
