//! Backoff schedule for the publish retry loop.

use tokio::time::Duration;

/// Exponential backoff policy for tag publish retries.
///
/// The default schedule waits 8s, 16s and a capped 30s before retries one
/// through three. There is no wait after the final attempt.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Base unit the exponential schedule multiplies.
    pub base_delay: Duration,
    /// Growth factor between consecutive retries.
    pub multiplier: u32,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Retries after the initial attempt.
    pub max_retries: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(2),
            multiplier: 2,
            max_delay: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl BackoffPolicy {
    /// Total attempts a publish run may make.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay before retry `retry` (1-based), capped at `max_delay`.
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry.saturating_add(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
