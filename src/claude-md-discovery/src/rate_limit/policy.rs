//! Retry and rate-limit policies.

use serde::Deserialize;
use std::time::Duration;

/// Bounded retry with exponentially growing delay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after every retry.
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            backoff_factor: 2,
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps between attempts.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay_ms: 0,
            backoff_factor: 2,
        }
    }

    /// Delay to wait after the failed attempt with index `attempt` (0-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = u64::from(self.backoff_factor).saturating_pow(attempt);
        Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
    }
}

/// Thresholds for proactive rate-limit waiting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RateLimitPolicy {
    /// Wait for the reset once fewer requests than this remain.
    pub min_remaining: u32,

    /// Upper bound for a single wait, in seconds.
    pub max_wait_secs: u64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            min_remaining: 10,
            max_wait_secs: 60,
        }
    }
}
