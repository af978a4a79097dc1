//! Scripted [`GitHubApi`] for exercising the sampler without a network.
//!
//! Responses are registered up front; unregistered detail, contents and raw
//! requests answer [`ApiResponse::NotFound`]. Listing pages are consumed in
//! order, and once the script runs dry the listing reports an empty page with
//! a zero budget so any run terminates.

use crate::github::{ApiResponse, ContentEntry, GitHubApi, RepositoryCandidate, RepositorySummary};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

/// A call received by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `list_repositories(since)`.
    ListRepositories { since: u64 },
    /// `get_repository(full_name)`.
    GetRepository { full_name: String },
    /// `list_contents(full_name, path)`.
    ListContents {
        full_name: String,
        path: Option<String>,
    },
    /// `fetch_raw(url)`.
    FetchRaw { url: String },
}

type ContentsKey = (String, Option<String>);

/// In-memory GitHub API with canned responses and a call log.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    pages: Mutex<VecDeque<ApiResponse<Vec<RepositorySummary>>>>,
    repositories: HashMap<String, ApiResponse<RepositoryCandidate>>,
    contents: HashMap<ContentsKey, ApiResponse<Vec<ContentEntry>>>,
    raw: HashMap<String, ApiResponse<Vec<u8>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a listing page response.
    #[must_use]
    pub fn with_page(self, page: ApiResponse<Vec<RepositorySummary>>) -> Self {
        lock(&self.pages).push_back(page);
        self
    }

    /// Registers the detail response of a repository.
    #[must_use]
    pub fn with_repository(
        mut self,
        full_name: &str,
        response: ApiResponse<RepositoryCandidate>,
    ) -> Self {
        self.repositories.insert(full_name.to_string(), response);
        self
    }

    /// Registers a directory listing response.
    #[must_use]
    pub fn with_contents(
        mut self,
        full_name: &str,
        path: Option<&str>,
        response: ApiResponse<Vec<ContentEntry>>,
    ) -> Self {
        self.contents.insert(
            (full_name.to_string(), path.map(str::to_string)),
            response,
        );
        self
    }

    /// Registers a raw content response.
    #[must_use]
    pub fn with_raw(mut self, url: &str, response: ApiResponse<Vec<u8>>) -> Self {
        self.raw.insert(url.to_string(), response);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    /// URLs of raw fetches received so far, in order.
    pub fn raw_fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::FetchRaw { url } => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Number of listing requests received so far.
    pub fn listing_requests(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::ListRepositories { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl GitHubApi for ScriptedApi {
    async fn list_repositories(&self, since: u64) -> ApiResponse<Vec<RepositorySummary>> {
        self.record(ApiCall::ListRepositories { since });
        lock(&self.pages)
            .pop_front()
            .unwrap_or_else(|| ApiResponse::ok_with_remaining(Vec::new(), 0))
    }

    async fn get_repository(&self, full_name: &str) -> ApiResponse<RepositoryCandidate> {
        self.record(ApiCall::GetRepository {
            full_name: full_name.to_string(),
        });
        self.repositories
            .get(full_name)
            .cloned()
            .unwrap_or(ApiResponse::NotFound)
    }

    async fn list_contents(
        &self,
        full_name: &str,
        path: Option<&str>,
    ) -> ApiResponse<Vec<ContentEntry>> {
        self.record(ApiCall::ListContents {
            full_name: full_name.to_string(),
            path: path.map(str::to_string),
        });
        self.contents
            .get(&(full_name.to_string(), path.map(str::to_string)))
            .cloned()
            .unwrap_or(ApiResponse::NotFound)
    }

    async fn fetch_raw(&self, url: &Url) -> ApiResponse<Vec<u8>> {
        self.record(ApiCall::FetchRaw {
            url: url.to_string(),
        });
        self.raw
            .get(url.as_str())
            .cloned()
            .unwrap_or(ApiResponse::NotFound)
    }
}

/// Listing item for `owner/repo`.
#[must_use]
pub fn summary(full_name: &str) -> RepositorySummary {
    RepositorySummary {
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{full_name}"),
    }
}

/// Detail record for `owner/repo` on `main`.
#[must_use]
pub fn candidate(full_name: &str, language: Option<&str>) -> RepositoryCandidate {
    RepositoryCandidate {
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{full_name}"),
        default_branch: "main".to_string(),
        primary_language: language.map(str::to_string),
    }
}

/// Raw URL of a root `README.md` on `main`.
#[must_use]
pub fn root_readme_url(full_name: &str) -> String {
    format!("https://raw.githubusercontent.com/{full_name}/main/README.md")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
