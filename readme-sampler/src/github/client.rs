//! Live [`GitHubApi`] implementation.

use super::{ApiError, ApiResponse, ContentEntry, GitHubApi, RepositoryCandidate, RepositorySummary};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use http::header::ACCEPT;
use http::StatusCode;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Media type requested from the REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Base of the raw content CDN.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com/";

const USER_AGENT: &str = concat!("readme-sampler/", env!("CARGO_PKG_VERSION"));

/// GitHub client backed by octocrab for the REST API and reqwest for the
/// unauthenticated raw content CDN.
pub struct OctocrabApi {
    octocrab: Octocrab,
    raw: reqwest::Client,
    timeout: Duration,
}

impl OctocrabApi {
    /// Builds a client. A token, when given, is attached to REST API calls
    /// only; raw content fetches stay anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if either HTTP client cannot be constructed.
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut builder = Octocrab::builder().add_header(ACCEPT, GITHUB_ACCEPT.to_string());
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let octocrab = builder.build()?;

        let raw = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            octocrab,
            raw,
            timeout,
        })
    }

    /// Issues a REST API GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> ApiResponse<T> {
        debug!(route, "Fetching request");

        let response = match tokio::time::timeout(self.timeout, self.octocrab._get(route)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(route, error = %e, "Request failed");
                return ApiResponse::Transient { status: None };
            }
            Err(_) => {
                warn!(route, timeout_secs = self.timeout.as_secs(), "Request timed out");
                return ApiResponse::Transient { status: None };
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return ApiResponse::NotFound;
        }
        if !status.is_success() {
            debug!(route, status = status.as_u16(), "Non-success status");
            return ApiResponse::Transient {
                status: Some(status.as_u16()),
            };
        }

        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let body = match tokio::time::timeout(self.timeout, self.octocrab.body_to_string(response))
            .await
        {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                warn!(route, error = %e, "Failed to read response body");
                return ApiResponse::Transient {
                    status: Some(status.as_u16()),
                };
            }
            Err(_) => {
                warn!(route, "Timed out reading response body");
                return ApiResponse::Transient {
                    status: Some(status.as_u16()),
                };
            }
        };

        match serde_json::from_str(&body) {
            Ok(payload) => ApiResponse::Success {
                payload,
                rate_limit,
            },
            Err(e) => {
                warn!(route, error = %e, "Failed to decode response body");
                ApiResponse::Transient {
                    status: Some(status.as_u16()),
                }
            }
        }
    }
}

#[async_trait]
impl GitHubApi for OctocrabApi {
    async fn list_repositories(&self, since: u64) -> ApiResponse<Vec<RepositorySummary>> {
        self.get_json(&format!("/repositories?since={since}")).await
    }

    async fn get_repository(&self, full_name: &str) -> ApiResponse<RepositoryCandidate> {
        self.get_json(&format!("/repos/{full_name}")).await
    }

    async fn list_contents(
        &self,
        full_name: &str,
        path: Option<&str>,
    ) -> ApiResponse<Vec<ContentEntry>> {
        let route = match path {
            Some(path) => format!("/repos/{full_name}/contents/{path}"),
            None => format!("/repos/{full_name}/contents"),
        };
        self.get_json(&route).await
    }

    async fn fetch_raw(&self, url: &Url) -> ApiResponse<Vec<u8>> {
        debug!(url = %url, "Fetching raw content");

        let response = match self.raw.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Raw request failed");
                return ApiResponse::Transient { status: None };
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return ApiResponse::NotFound;
        }
        if !status.is_success() {
            return ApiResponse::Transient {
                status: Some(status.as_u16()),
            };
        }

        match response.bytes().await {
            Ok(bytes) => ApiResponse::ok(bytes.to_vec()),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read raw content");
                ApiResponse::Transient {
                    status: Some(status.as_u16()),
                }
            }
        }
    }
}

/// Parses a base URL, keeping the original text in the error.
pub(crate) fn parse_base_url(url: &str) -> Result<Url, ApiError> {
    Url::parse(url).map_err(|source| ApiError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
