//! Mutable run state shared by the loop's steps.

use crate::rate_limit::RateBudget;
use crate::summary::RunSummary;

/// Counters that drive loop termination, owned by the runner and passed to
/// every step.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Remaining API calls, as last reported.
    pub budget: RateBudget,

    /// README files still to acquire this run.
    pub quota: u32,

    /// Outcome counters.
    pub summary: RunSummary,
}

impl RunContext {
    /// Creates a context with the default starting budget.
    #[must_use]
    pub fn new(quota: u32) -> Self {
        Self::with_budget(quota, RateBudget::default())
    }

    /// Creates a context with an explicit starting budget.
    #[must_use]
    pub fn with_budget(quota: u32, budget: RateBudget) -> Self {
        Self {
            budget,
            quota,
            summary: RunSummary::new(),
        }
    }

    /// Returns true once the quota is met.
    #[must_use]
    pub fn quota_met(&self) -> bool {
        self.quota == 0
    }

    /// Records a saved README.
    pub fn consume_quota(&mut self) {
        self.quota = self.quota.saturating_sub(1);
    }
}
