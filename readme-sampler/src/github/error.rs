//! GitHub client error types.

use thiserror::Error;

/// Errors that can occur while constructing the live GitHub client.
///
/// Per-call failures are never errors; they surface as
/// [`ApiResponse::Transient`](super::ApiResponse::Transient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// GitHub API client initialization error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Raw content client initialization error.
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A configured base URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
