//! Rate limit information parsed from response headers.

use http::HeaderMap;

/// Header carrying the calls left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the window size.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header carrying the window reset as a Unix timestamp.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information reported by a single API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: i64,

    /// Unix timestamp when the rate limit resets, if reported.
    pub reset: Option<u64>,

    /// Total requests allowed per window, if reported.
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Creates info carrying only a remaining count.
    #[must_use]
    pub fn remaining(remaining: i64) -> Self {
        Self {
            remaining,
            reset: None,
            limit: None,
        }
    }

    /// Parses the rate limit headers of a response.
    ///
    /// Returns `None` when the remaining-calls header is missing or not a
    /// number, which leaves the caller's budget untouched.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_value(headers, REMAINING_HEADER)?;
        Some(Self {
            remaining,
            reset: header_value(headers, RESET_HEADER),
            limit: header_value(headers, LIMIT_HEADER),
        })
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
