//! Repository records returned by the GitHub REST API.

use serde::Deserialize;

/// One item of the `GET /repositories` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Canonical browser URL; the ledger key.
    pub html_url: String,
}

/// Repository detail record from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryCandidate {
    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Canonical browser URL; the ledger key.
    pub html_url: String,

    /// Default branch name (e.g., "main").
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Primary language detected by GitHub.
    #[serde(rename = "language", default)]
    pub primary_language: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepositoryCandidate {
    /// A repository with a detected primary language counts as a software
    /// development project.
    #[must_use]
    pub fn is_software_project(&self) -> bool {
        self.primary_language
            .as_deref()
            .is_some_and(|language| !language.trim().is_empty())
    }
}

/// One entry of a `GET /repos/{owner}/{repo}/contents` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// File or directory name.
    pub name: String,

    /// Entry type: "file", "dir", "symlink" or "submodule".
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ContentEntry {
    /// Returns true for directory entries.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}
