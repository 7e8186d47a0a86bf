//! Retry policy
//!
//! One policy type drives both the factory readiness poll and the bounded
//! retry around idempotent create-or-update calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::{ProvisionError, Result, Step};

/// How often, and how many times, to repeat a remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first repeat
    pub interval: Duration,
    /// Upper bound on attempts; `None` repeats forever
    pub max_attempts: Option<u32>,
    /// Multiplier applied to the delay after every attempt (1 = fixed interval)
    pub backoff_factor: u32,
    /// Cap on any single delay
    pub max_interval: Duration,
}

impl RetryPolicy {
    /// Fixed interval, no attempt limit
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            backoff_factor: 1,
            max_interval: interval,
        }
    }

    /// Fixed interval, at most `max_attempts` attempts
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::unbounded(interval)
        }
    }

    /// Doubling delay starting at `initial`, capped at `max_interval`
    pub fn exponential(initial: Duration, max_attempts: u32, max_interval: Duration) -> Self {
        Self {
            interval: initial,
            max_attempts: Some(max_attempts),
            backoff_factor: 2,
            max_interval,
        }
    }

    /// Whether attempt number `attempt` (1-based) may be made
    pub fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }

    /// Delay to wait after attempt number `attempt` (1-based) before the next one
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let growth = self
            .backoff_factor
            .max(1)
            .saturating_pow(attempt.saturating_sub(1));
        self.interval
            .saturating_mul(growth)
            .min(self.max_interval.max(self.interval))
    }
}

/// Run an idempotent call, repeating it on transient failures while the policy allows
///
/// Non-transient failures, and the last transient one, are returned with `step` attached.
pub async fn retry_transient<T, F, Fut>(policy: &RetryPolicy, step: Step, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = weir_client::Result<T>>,
{
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && policy.allows(attempt + 1) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    %step,
                    attempt,
                    "Transient failure: {}; retrying in {:?}",
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(ProvisionError::from_client(step, e)),
        }
    }
}
