//! Remaining-call budget for the GitHub API.

use super::RateLimitInfo;
use tracing::debug;

/// Budget assumed before the first response reports the real one.
pub const INITIAL_BUDGET: i64 = 1;

/// Remaining API calls in the current rate limit window.
///
/// The value is always overwritten from the latest response, never
/// decremented locally: the header is authoritative and call costs vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudget {
    remaining: i64,
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new(INITIAL_BUDGET)
    }
}

impl RateBudget {
    /// Creates a budget with a starting value.
    #[must_use]
    pub fn new(remaining: i64) -> Self {
        Self { remaining }
    }

    /// Calls left before the sampler must stop.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Returns true once no further calls may be issued.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }

    /// Overwrites the budget with a reported value.
    pub fn set(&mut self, remaining: i64) {
        self.remaining = remaining;
        debug!(remaining, "Rate budget updated");
    }

    /// Applies the signal of a response, if it carried one.
    pub fn update(&mut self, info: Option<&RateLimitInfo>) {
        if let Some(info) = info {
            self.set(info.remaining);
        }
    }
}
