//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod provision;
mod run;
mod status;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::sync::Arc;
use uuid::Uuid;
use weir_client::{ManagementApi, ManagementClient, ManagementClients, ServicePrincipalCredential};

use crate::config::Config;
use crate::error::{ProvisionError, Step};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Provision the factory and its resources, then run the pipeline once
    Provision,
    /// Trigger and monitor a run of an already provisioned pipeline
    Run {
        /// Pipeline to run instead of the configured one
        #[arg(long)]
        pipeline: Option<String>,
    },
    /// Show the status of an existing pipeline run
    Status {
        /// Run id returned when the run was triggered
        run_id: Uuid,
    },
}

/// Handle a CLI command
///
/// Builds the management clients once and routes the command to its handler.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let api = connect(config)?;

    match command {
        Commands::Provision => provision::handle_provision(&api, config).await,
        Commands::Run { pipeline } => run::handle_run(&api, config, pipeline.as_deref()).await,
        Commands::Status { run_id } => status::handle_status(&api, config, run_id).await,
    }
}

/// Build the resource and data factory clients over one HTTP client and credential
pub fn connect(config: &Config) -> Result<ManagementClients> {
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let credential = ServicePrincipalCredential::new(
        &config.client_id,
        config.client_secret.clone(),
        &config.tenant_id,
    )
    .with_authority_host(&config.authority_host)
    .with_client(client.clone());

    let transport = ManagementClient::with_client(
        &config.management_endpoint,
        &config.subscription_id,
        Arc::new(credential),
        client,
    );

    Ok(ManagementClients::from_transport(transport))
}

/// Acquire a token before any resource call
async fn authenticate(api: &dyn ManagementApi) -> crate::error::Result<()> {
    api.authenticate()
        .await
        .map_err(|e| ProvisionError::from_client(Step::Authenticate, e))
}
