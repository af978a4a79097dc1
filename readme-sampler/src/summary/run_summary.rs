//! Run summary types.

use super::result::{ProcessingResult, SkipReason};
use crate::ledger::LedgerEntry;
use crate::runner::RunState;
use std::collections::BTreeMap;

/// Summary of a complete sampling run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Listing pages fetched successfully.
    pub pages_fetched: usize,

    /// Listing requests that failed.
    pub page_failures: usize,

    /// Listed repositories examined.
    pub repositories_scanned: usize,

    /// READMEs saved this run, in order.
    pub saved: Vec<LedgerEntry>,

    /// Skipped repositories per reason.
    pub skipped: BTreeMap<SkipReason, usize>,

    /// Remaining API budget when the run ended.
    pub remaining_budget: i64,

    /// Terminal state of the run.
    pub final_state: RunState,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            pages_fetched: 0,
            page_failures: 0,
            repositories_scanned: 0,
            saved: Vec::new(),
            skipped: BTreeMap::new(),
            remaining_budget: 0,
            final_state: RunState::FetchPage,
        }
    }
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        self.repositories_scanned += 1;
        match result {
            ProcessingResult::Saved(entry) => self.saved.push(entry.clone()),
            ProcessingResult::Skipped { reason, .. } => {
                *self.skipped.entry(*reason).or_default() += 1;
            }
        }
    }

    /// Number of repositories skipped for `reason`.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Total repositories skipped.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new();

        summary.record_result(&ProcessingResult::Saved(LedgerEntry::new(
            "https://github.com/a/b",
            "README.md",
            "a.b.md",
        )));
        summary.record_result(&ProcessingResult::Skipped {
            repository: "c/d".to_string(),
            reason: SkipReason::NotSoftware,
        });
        summary.record_result(&ProcessingResult::Skipped {
            repository: "e/f".to_string(),
            reason: SkipReason::NotSoftware,
        });

        assert_eq!(summary.repositories_scanned, 3);
        assert_eq!(summary.saved.len(), 1);
        assert_eq!(summary.skipped_for(SkipReason::NotSoftware), 2);
        assert_eq!(summary.skipped_for(SkipReason::ReadmeTooSmall), 0);
        assert_eq!(summary.total_skipped(), 2);
    }
}
