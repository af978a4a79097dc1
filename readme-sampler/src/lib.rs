#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod github;
pub mod ledger;
pub mod locator;
pub mod rate_limit;
pub mod runner;
pub mod sampling;
pub mod summary;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{load_token, ConfigError, SamplerConfig, CONFIG_FILE_NAME};
pub use github::{
    ApiError, ApiResponse, ContentEntry, GitHubApi, OctocrabApi, RepositoryCandidate,
    RepositorySummary,
};
pub use ledger::{Ledger, LedgerEntry, LedgerError};
pub use locator::{Located, LocatorConfig, ReadmeDescriptor, ReadmeLocator};
pub use rate_limit::{Backoff, RateBudget, RateLimitInfo};
pub use runner::{RunContext, RunState, Runner, RunnerError};
pub use sampling::CursorSampler;
pub use summary::{ProcessingResult, RunSummary, SkipReason};
