//! Retry policy with exponential backoff
//!
//! A failed request is retried only when its status code is in the retryable set and
//! the attempt budget is not spent. Retry `n` (1-indexed) waits `base_delay * 2^(n-1)`.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::error::RequestError;

/// Default number of retries per logical request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Status codes retried by default
pub const DEFAULT_RETRYABLE_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Backoff configuration shared by every HTTP verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub retryable_status_codes: BTreeSet<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.into_iter().collect(),
        }
    }
}

/// Partial update merged into the live [`RetryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RetryConfigUpdate {
    pub max_retries: Option<u32>,
    pub base_delay: Option<Duration>,
    pub retryable_status_codes: Option<BTreeSet<u16>>,
}

impl RetryPolicy {
    /// Merge provided fields; unspecified fields keep their current values.
    pub fn apply(&mut self, update: RetryConfigUpdate) {
        if let Some(max_retries) = update.max_retries {
            self.max_retries = max_retries;
        }
        if let Some(base_delay) = update.base_delay {
            self.base_delay = base_delay;
        }
        if let Some(codes) = update.retryable_status_codes {
            self.retryable_status_codes = codes;
        }
    }

    pub fn is_retryable(&self, code: u16) -> bool {
        self.retryable_status_codes.contains(&code)
    }

    /// Delay before retry `attempt` (1-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable code, or the
    /// retry budget is spent. Attempts are strictly sequential.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, RequestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RequestError>>,
    {
        let mut retries = 0u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !self.is_retryable(err.code) {
                        return Err(err);
                    }
                    if retries >= self.max_retries {
                        warn!(
                            "{} failed after {} retries: {}",
                            label, retries, err.message
                        );
                        return Err(err);
                    }

                    retries += 1;
                    let delay = self.delay_for(retries);
                    debug!(
                        "{} failed with {}, retry {}/{} in {:?}",
                        label, err.code, retries, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
