//! Bounded retries for transient request failures

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;

/// How many times, and how patiently, a failed request is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one; zero disables retrying
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for the doubling delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    const INITIAL_DELAY_MS: u64 = 500;
    const MAX_DELAY_MS: u64 = 30_000;

    /// Never retry
    pub fn none() -> Self {
        Self::with_retries(0)
    }

    /// Exponential backoff starting at 500 ms, capped at 30 s
    pub fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(Self::INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(Self::MAX_DELAY_MS),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Run `op`, repeating it while it fails transiently and attempts remain
///
/// Non-transient errors are returned immediately.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    let mut delay = policy.initial_delay;

    loop {
        attempt += 1;

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt <= policy.max_retries => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    operation,
                    attempt,
                    policy.max_retries.saturating_add(1),
                    e
                );
                warn!("Retrying in {} ms...", delay.as_millis());

                tokio::time::sleep(delay).await;

                delay = (delay * 2).min(policy.max_delay);
            }
            Err(e) => return Err(e),
        }
    }
}
