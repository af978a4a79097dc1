//! Per-repository outcome types.

use crate::ledger::LedgerEntry;
use std::fmt;

/// Why a listed repository did not yield a saved README.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// The repository URL is already in the ledger.
    AlreadyAcquired,
    /// The detail request did not succeed.
    DetailUnavailable,
    /// No primary language; not a software development project.
    NotSoftware,
    /// No candidate README path answered.
    ReadmeNotFound,
    /// The README content request did not succeed.
    ReadmeUnavailable,
    /// The README is below the minimum size.
    ReadmeTooSmall,
    /// Writing the README file failed.
    SaveFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AlreadyAcquired => "already acquired",
            Self::DetailUnavailable => "detail unavailable",
            Self::NotSoftware => "not a software project",
            Self::ReadmeNotFound => "no README found",
            Self::ReadmeUnavailable => "README unavailable",
            Self::ReadmeTooSmall => "README too small",
            Self::SaveFailed => "save failed",
        };
        f.write_str(text)
    }
}

/// Result of processing a single listed repository.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The README was saved and recorded.
    Saved(LedgerEntry),

    /// The repository was passed over.
    Skipped {
        /// Repository full name.
        repository: String,
        /// Reason for skipping.
        reason: SkipReason,
    },
}
