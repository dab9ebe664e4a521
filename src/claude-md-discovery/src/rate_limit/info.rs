//! Snapshot of the code search rate limit.

/// Remaining search budget as reported by `/rate_limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: u32,

    /// Unix timestamp (seconds) at which the window resets.
    pub reset: u64,

    pub limit: u32,
}

impl RateLimitInfo {
    /// Whether fewer than `threshold` requests are left.
    #[must_use]
    pub fn is_below(&self, threshold: u32) -> bool {
        self.remaining < threshold
    }

    /// Seconds until the window resets, `None` once it already has.
    #[must_use]
    pub fn secs_until_reset(&self, now: u64) -> Option<u64> {
        self.reset.checked_sub(now).filter(|secs| *secs > 0)
    }
}
