//! Runner error types.

/// Fatal errors that stop a sampling run.
///
/// Remote failures and filtered repositories are never errors; they are
/// skipped and counted in the [`RunSummary`](crate::RunSummary).
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration and credential loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Ledger could not be loaded or flushed.
    #[error(transparent)]
    Ledger(#[from] crate::ledger::LedgerError),

    /// GitHub client initialization errors.
    #[error(transparent)]
    Api(#[from] crate::github::ApiError),

    /// Output directory could not be prepared.
    #[error("Failed to prepare output directory '{path}': {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
