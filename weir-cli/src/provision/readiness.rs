//! Factory readiness wait
//!
//! A freshly created factory may report an in-progress provisioning state.
//! The factory is re-fetched after every policy delay until it reports
//! `Succeeded`; no other state ends the wait successfully.

use std::time::Instant;
use tracing::{debug, info, warn};
use weir_client::ManagementApi;
use weir_core::domain::factory::Factory;

use crate::error::{ProvisionError, Result, Step};
use crate::retry::RetryPolicy;

/// Wait until factory `name` reports `Succeeded`
///
/// `created` is the response of the create call; if it already reports
/// success no fetch is issued. Transient fetch failures count as attempts.
pub async fn wait_for_factory(
    api: &dyn ManagementApi,
    group: &str,
    name: &str,
    created: Factory,
    policy: &RetryPolicy,
) -> Result<Factory> {
    if created.is_provisioned() {
        return Ok(created);
    }

    let started = Instant::now();
    let mut attempt = 1;

    loop {
        if !policy.allows(attempt) {
            return Err(ProvisionError::Timeout {
                what: format!("factory '{}' to finish provisioning", name),
                waited: started.elapsed(),
            });
        }

        tokio::time::sleep(policy.delay_after(attempt)).await;

        match api.get_factory(group, name).await {
            Ok(factory) if factory.is_provisioned() => {
                info!(factory = name, attempts = attempt, "Factory is ready");
                return Ok(factory);
            }
            Ok(factory) => {
                debug!(
                    factory = name,
                    state = factory.provisioning_state().unwrap_or("unknown"),
                    "Factory not ready yet"
                );
            }
            Err(e) if e.is_transient() => {
                warn!(factory = name, "Failed to fetch factory status: {}", e);
            }
            Err(e) => return Err(ProvisionError::from_client(Step::FactoryReadiness, e)),
        }

        attempt += 1;
    }
}
