//! Configuration
//!
//! Credentials, resource names and wait timings are read from the
//! environment. Durations are given in whole seconds.

use std::time::Duration;
use weir_client::DEFAULT_MANAGEMENT_ENDPOINT;
use weir_client::auth::DEFAULT_AUTHORITY_HOST;
use weir_core::domain::secret::SecureString;

use crate::error::{ProvisionError, Result};
use crate::monitor::MonitorSettings;
use crate::provision::Topology;
use crate::retry::RetryPolicy;

const STORAGE_CONNECTION_STRING: &str = "WEIR_STORAGE_CONNECTION_STRING";

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub subscription_id: String,
    pub client_id: String,
    pub client_secret: SecureString,
    pub tenant_id: String,

    /// Only needed by `provision`, so its absence is reported when provisioning starts
    pub storage_connection_string: Option<SecureString>,

    pub management_endpoint: String,
    pub authority_host: String,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,

    pub topology: Topology,

    /// Factory readiness poll
    pub readiness: RetryPolicy,

    /// Transient-error retry around each create-or-update call
    pub create_retry: RetryPolicy,

    pub monitor: MonitorSettings,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Required:
    /// - AZURE_SUBSCRIPTION_ID, AZURE_CLIENT_ID, AZURE_CLIENT_SECRET, AZURE_TENANT_ID
    /// - WEIR_RESOURCE_GROUP, WEIR_FACTORY_NAME
    ///
    /// Optional (defaults):
    /// - WEIR_STORAGE_CONNECTION_STRING (required by `provision`)
    /// - WEIR_LOCATION (eastus)
    /// - WEIR_LINKED_SERVICE_NAME (AzureStorageLinkedService)
    /// - WEIR_INPUT_DATASET, WEIR_OUTPUT_DATASET (ds_in, ds_out)
    /// - WEIR_INPUT_FOLDER, WEIR_INPUT_FILE, WEIR_OUTPUT_FOLDER
    /// - WEIR_ACTIVITY_NAME, WEIR_PIPELINE_NAME (copyBlobtoBlob, copyPipeline)
    /// - WEIR_READINESS_INTERVAL (1), WEIR_READINESS_MAX_ATTEMPTS (300, 0 = unbounded)
    /// - WEIR_CREATE_MAX_ATTEMPTS (4)
    /// - WEIR_RUN_INITIAL_DELAY (30), WEIR_RUN_POLL_INTERVAL (5), WEIR_RUN_TIMEOUT (600)
    /// - WEIR_HTTP_TIMEOUT (60)
    /// - WEIR_MANAGEMENT_ENDPOINT, WEIR_AUTHORITY_HOST (public cloud)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = |key: &str| {
            get(key).ok_or_else(|| {
                ProvisionError::config(format!("{} environment variable not set", key))
            })
        };

        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let number = |key: &str, default: u64| -> Result<u64> {
            match get(key) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    ProvisionError::config(format!("{} must be a whole number, got '{}'", key, raw))
                }),
                None => Ok(default),
            }
        };

        let seconds = |key: &str, default: u64| number(key, default).map(Duration::from_secs);

        let attempts = |key: &str, default: u32| -> Result<u32> {
            u32::try_from(number(key, u64::from(default))?).map_err(|_| {
                ProvisionError::config(format!("{} is out of range", key))
            })
        };

        let subscription_id = required("AZURE_SUBSCRIPTION_ID")?;
        let client_id = required("AZURE_CLIENT_ID")?;
        let client_secret = SecureString::new(required("AZURE_CLIENT_SECRET")?);
        let tenant_id = required("AZURE_TENANT_ID")?;

        let topology = Topology {
            resource_group: required("WEIR_RESOURCE_GROUP")?,
            factory: required("WEIR_FACTORY_NAME")?,
            location: or_default("WEIR_LOCATION", "eastus"),
            linked_service: or_default("WEIR_LINKED_SERVICE_NAME", "AzureStorageLinkedService"),
            input_dataset: or_default("WEIR_INPUT_DATASET", "ds_in"),
            output_dataset: or_default("WEIR_OUTPUT_DATASET", "ds_out"),
            input_folder: or_default("WEIR_INPUT_FOLDER", "adfv2tutorial/input"),
            input_file: Some(or_default("WEIR_INPUT_FILE", "input.txt")),
            output_folder: or_default("WEIR_OUTPUT_FOLDER", "adfv2tutorial/output"),
            activity: or_default("WEIR_ACTIVITY_NAME", "copyBlobtoBlob"),
            pipeline: or_default("WEIR_PIPELINE_NAME", "copyPipeline"),
        };

        let readiness_interval = seconds("WEIR_READINESS_INTERVAL", 1)?;
        let readiness = match attempts("WEIR_READINESS_MAX_ATTEMPTS", 300)? {
            0 => RetryPolicy::unbounded(readiness_interval),
            max => RetryPolicy::fixed(readiness_interval, max),
        };

        let create_retry = RetryPolicy::exponential(
            Duration::from_secs(1),
            attempts("WEIR_CREATE_MAX_ATTEMPTS", 4)?,
            Duration::from_secs(30),
        );

        let monitor = MonitorSettings {
            initial_delay: seconds("WEIR_RUN_INITIAL_DELAY", 30)?,
            poll_interval: seconds("WEIR_RUN_POLL_INTERVAL", 5)?,
            timeout: seconds("WEIR_RUN_TIMEOUT", 600)?,
        };

        Ok(Self {
            subscription_id,
            client_id,
            client_secret,
            tenant_id,
            storage_connection_string: get(STORAGE_CONNECTION_STRING).map(SecureString::new),
            management_endpoint: or_default(
                "WEIR_MANAGEMENT_ENDPOINT",
                DEFAULT_MANAGEMENT_ENDPOINT,
            ),
            authority_host: or_default("WEIR_AUTHORITY_HOST", DEFAULT_AUTHORITY_HOST),
            http_timeout: seconds("WEIR_HTTP_TIMEOUT", 60)?,
            topology,
            readiness,
            create_retry,
            monitor,
        })
    }

    /// The storage connection string, required before provisioning starts
    pub fn storage_connection_string(&self) -> Result<&SecureString> {
        self.storage_connection_string.as_ref().ok_or_else(|| {
            ProvisionError::config(format!(
                "{} environment variable not set",
                STORAGE_CONNECTION_STRING
            ))
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("management_endpoint", &self.management_endpoint),
            ("authority_host", &self.authority_host),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ProvisionError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.monitor.poll_interval.is_zero() {
            return Err(ProvisionError::config("run poll interval must be greater than 0"));
        }

        if self.monitor.timeout.is_zero() {
            return Err(ProvisionError::config("run timeout must be greater than 0"));
        }

        if self.monitor.initial_delay >= self.monitor.timeout {
            return Err(ProvisionError::config(
                "run initial delay must be shorter than the run timeout",
            ));
        }

        if self.http_timeout.is_zero() {
            return Err(ProvisionError::config("http timeout must be greater than 0"));
        }

        if self.create_retry.max_attempts == Some(0) {
            return Err(ProvisionError::config(
                "create attempts must be greater than 0",
            ));
        }

        Ok(())
    }
}
