//! Rate limiting utilities for the GitHub API.
//!
//! The sampler tracks the remaining-call budget reported by every API
//! response and backs off when the repository listing fails.

mod backoff;
mod budget;
mod info;

pub use backoff::Backoff;
pub use budget::{RateBudget, INITIAL_BUDGET};
pub use info::{RateLimitInfo, LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER};
