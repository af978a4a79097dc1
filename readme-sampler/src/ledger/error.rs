//! Ledger error types.

use thiserror::Error;

/// Errors that can occur while loading or flushing the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Filesystem failure.
    #[error("Ledger I/O error at '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The ledger file exists but is not a well-formed table.
    #[error("Malformed ledger '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize the table.
    #[error("Failed to write ledger '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The URL is already recorded.
    #[error("Ledger already contains {url}")]
    Duplicate { url: String },
}
