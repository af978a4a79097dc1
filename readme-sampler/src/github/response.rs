//! Outcome of a single remote call.

use crate::rate_limit::RateLimitInfo;

/// Result of a remote call, distinguishing a usable payload from the two
/// kinds of skip.
///
/// None of these variants is an error: the sampler skips the current item on
/// anything but [`ApiResponse::Success`] and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// The call succeeded.
    Success {
        /// Decoded response body.
        payload: T,
        /// Rate limit signal, absent for unauthenticated CDN fetches.
        rate_limit: Option<RateLimitInfo>,
    },

    /// Non-success status, transport failure, timeout or undecodable body.
    Transient {
        /// HTTP status when one was received.
        status: Option<u16>,
    },

    /// The resource does not exist (404).
    NotFound,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload that came without a rate limit signal.
    pub fn ok(payload: T) -> Self {
        Self::Success {
            payload,
            rate_limit: None,
        }
    }

    /// Wraps a payload along with the remaining-call count reported with it.
    pub fn ok_with_remaining(payload: T, remaining: i64) -> Self {
        Self::Success {
            payload,
            rate_limit: Some(RateLimitInfo::remaining(remaining)),
        }
    }

    /// Returns true for [`ApiResponse::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
