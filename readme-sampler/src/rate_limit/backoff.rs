//! Capped exponential backoff for failed listing pages.

use std::time::Duration;
use tracing::info;

/// Delay schedule for retrying the repository listing after a failure.
///
/// Doubles from `base` on each consecutive failure and never exceeds `max`.
/// A success resets the schedule.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    failures: u32,
}

impl Backoff {
    /// Creates a schedule starting at `base` and capped at `max`.
    #[must_use]
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            failures: 0,
        }
    }

    /// Consecutive failures recorded since the last reset.
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Records a failure and returns how long to wait before retrying.
    pub fn next_delay(&mut self) -> Duration {
        let exponent = self.failures.min(16);
        self.failures = self.failures.saturating_add(1);
        self.base
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max)
            .min(self.max)
    }

    /// Clears the failure streak.
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// Records a failure and sleeps for the resulting delay.
    pub async fn wait(&mut self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        info!(
            failures = self.failures,
            delay_ms = delay.as_millis() as u64,
            "Listing failed, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
