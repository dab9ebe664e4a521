//! Rate limiting utilities for GitHub API.
//!
//! This module provides functions to wait for GitHub API rate limit resets
//! (capped so a single run cannot stall) and to retry transient failures with
//! exponential backoff.

mod info;
mod policy;

pub use info::RateLimitInfo;
pub use policy::{RateLimitPolicy, RetryPolicy};

use crate::github::GitHubError;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Computes how long to wait before the next call, if at all.
///
/// Returns `None` while at least `policy.min_remaining` requests remain or when
/// the reset time has already passed. Otherwise returns the time until reset
/// (plus one second of slack), capped at `policy.max_wait_secs`.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, policy: &RateLimitPolicy, now: u64) -> Option<Duration> {
    if !info.is_below(policy.min_remaining) {
        return None;
    }

    let wait_secs = info.secs_until_reset(now)? + 1;
    if wait_secs > policy.max_wait_secs {
        warn!(
            wait_secs,
            max_wait = policy.max_wait_secs,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(policy.max_wait_secs)))
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// # Arguments
///
/// * `info` - Current rate limit information
/// * `policy` - Threshold and wait cap
pub async fn wait_if_needed(info: &RateLimitInfo, policy: &RateLimitPolicy) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, policy, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Runs `call` until it succeeds, a non-transient error occurs, or the retry
/// budget of `policy` is exhausted.
///
/// The delay starts at [`RetryPolicy::initial_delay_ms`] and is multiplied by
/// [`RetryPolicy::backoff_factor`] after every failed attempt. Not-found errors
/// are returned immediately.
///
/// # Errors
///
/// Returns the last [`GitHubError`] produced by `call`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, GitHubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GitHubError>>,
{
    let mut attempt = 0;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < policy.max_retries => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    operation,
                    attempt = attempt + 1,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "Call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
