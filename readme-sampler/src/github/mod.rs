//! Access to the GitHub REST API and raw content CDN.
//!
//! [`GitHubApi`] is the seam between the sampler and the network. The live
//! implementation is [`OctocrabApi`]; tests drive the sampler through a
//! scripted implementation instead.

mod client;
mod error;
mod response;
mod types;

pub(crate) use client::parse_base_url;
pub use client::{OctocrabApi, GITHUB_ACCEPT, RAW_CONTENT_BASE};
pub use error::ApiError;
pub use response::ApiResponse;
pub use types::{ContentEntry, RepositoryCandidate, RepositorySummary};

use async_trait::async_trait;
use url::Url;

/// The four remote endpoints the sampler depends on.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Lists public repositories with ids greater than `since`.
    async fn list_repositories(&self, since: u64) -> ApiResponse<Vec<RepositorySummary>>;

    /// Fetches the detail record of a repository.
    async fn get_repository(&self, full_name: &str) -> ApiResponse<RepositoryCandidate>;

    /// Lists a directory of a repository's default branch. `None` lists the root.
    async fn list_contents(
        &self,
        full_name: &str,
        path: Option<&str>,
    ) -> ApiResponse<Vec<ContentEntry>>;

    /// Fetches raw file bytes without authentication.
    async fn fetch_raw(&self, url: &Url) -> ApiResponse<Vec<u8>>;
}

/// Builds the raw content URL of `relative_path` in a repository branch.
///
/// Segments are percent-encoded individually so unusual branch or file
/// names cannot escape the path.
pub fn raw_content_url(
    base: &Url,
    full_name: &str,
    branch: &str,
    relative_path: &str,
) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments
            .pop_if_empty()
            .extend(full_name.split('/'))
            .extend(branch.split('/'))
            .extend(relative_path.split('/'));
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_readme_url() {
        let base = Url::parse(RAW_CONTENT_BASE).unwrap();
        let url = raw_content_url(&base, "owner/repo", "main", "README.md").unwrap();

        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/owner/repo/main/README.md"
        );
    }

    #[test]
    fn builds_nested_readme_url() {
        let base = Url::parse(RAW_CONTENT_BASE).unwrap();
        let url = raw_content_url(&base, "owner/repo", "dev", "docs/README.MD").unwrap();

        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/owner/repo/dev/docs/README.MD"
        );
    }

    #[test]
    fn encodes_unusual_branch_names() {
        let base = Url::parse(RAW_CONTENT_BASE).unwrap();
        let url = raw_content_url(&base, "owner/repo", "fix#1", "README.md").unwrap();

        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/owner/repo/fix%231/README.md"
        );
    }
}
