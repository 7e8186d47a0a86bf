//! Weir CLI
//!
//! Provisions a data factory copy pipeline (resource group, factory, linked
//! storage service, datasets, pipeline), runs it once and reports the result.
//!
//! Configuration comes from the environment; see [`config::Config::from_env`].

mod commands;
mod config;
mod error;
mod monitor;
mod output;
mod provision;
mod retry;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "weir")]
#[command(about = "Data factory pipeline provisioning CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weir=info,weir_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = run(cli.command).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(command: Commands) -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    info!(
        "Loaded configuration: subscription={}, resource_group={}, factory={}",
        config.subscription_id, config.topology.resource_group, config.topology.factory
    );

    handle_command(command, &config).await
}
