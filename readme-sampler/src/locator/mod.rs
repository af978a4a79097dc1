//! README discovery inside a repository.
//!
//! The locator probes a small ordered space of candidate paths on the raw
//! content CDN: folders first, then base names, then extensions. The first
//! path that answers with a success status wins.

mod descriptor;

pub use descriptor::ReadmeDescriptor;

use crate::config::SamplerConfig;
use crate::github::{
    parse_base_url, raw_content_url, ApiError, ApiResponse, GitHubApi, RAW_CONTENT_BASE,
};
use crate::rate_limit::RateBudget;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

/// Candidate path space searched by [`ReadmeLocator`].
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Folders in search order; `None` is the repository root.
    pub folders: Vec<Option<String>>,

    /// Base names in search order.
    pub names: Vec<String>,

    /// Extensions in search order, case variants included.
    pub extensions: Vec<String>,

    /// Base URL of the raw content CDN.
    pub raw_base: Url,
}

impl LocatorConfig {
    /// Derives the search space from sampler settings.
    ///
    /// Empty folder names become the repository root. Each extension is
    /// followed by its upper-case variant, duplicates removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the raw content base is invalid.
    pub fn from_config(config: &SamplerConfig) -> Result<Self, ApiError> {
        let folders = config
            .folders
            .iter()
            .map(|folder| folder.trim().trim_matches('/'))
            .map(|folder| (!folder.is_empty()).then(|| folder.to_string()))
            .collect();

        let names = config
            .names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            folders,
            names,
            extensions: case_variants(&config.extensions),
            raw_base: parse_base_url(RAW_CONTENT_BASE)?,
        })
    }
}

/// Expands each extension into itself followed by its upper-case form.
fn case_variants(extensions: &[String]) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    for extension in extensions {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() {
            continue;
        }
        for variant in [extension.to_string(), extension.to_uppercase()] {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }
    variants
}

/// Outcome of a README search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// A README answered at `url`.
    Found {
        /// Raw content URL that answered.
        url: Url,
        /// Structured location of the README.
        descriptor: ReadmeDescriptor,
    },

    /// No candidate path answered.
    NotFound,
}

/// Searches repositories for a README.
#[derive(Debug, Clone)]
pub struct ReadmeLocator {
    config: LocatorConfig,
}

impl ReadmeLocator {
    /// Creates a locator over the given search space.
    #[must_use]
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Search space of this locator.
    #[must_use]
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Finds the first README of `full_name` on `branch`.
    ///
    /// Non-root folders are only searched if a directory listing confirms
    /// they exist; a failed listing skips the folder. Listings update
    /// `budget`. Raw probes go to the CDN and do not.
    pub async fn locate<A: GitHubApi + ?Sized>(
        &self,
        api: &A,
        budget: &mut RateBudget,
        full_name: &str,
        branch: &str,
    ) -> Located {
        let span = info_span!("locate_readme", repo = %full_name, branch = %branch);

        async {
            for folder in &self.config.folders {
                if let Some(folder) = folder {
                    if !folder_exists(api, budget, full_name, folder).await {
                        debug!(folder = %folder, "Skipping folder");
                        continue;
                    }
                }

                let found = self
                    .probe_folder(api, full_name, branch, folder.as_deref())
                    .await;
                if let Some(found) = found {
                    return found;
                }
            }

            debug!("No README found");
            Located::NotFound
        }
        .instrument(span)
        .await
    }

    /// Tries every name and extension inside one folder.
    async fn probe_folder<A: GitHubApi + ?Sized>(
        &self,
        api: &A,
        full_name: &str,
        branch: &str,
        folder: Option<&str>,
    ) -> Option<Located> {
        for name in &self.config.names {
            for extension in &self.config.extensions {
                let descriptor = ReadmeDescriptor {
                    repo_full_name: full_name.to_string(),
                    branch: branch.to_string(),
                    folder: folder.map(str::to_string),
                    base_name: name.clone(),
                    extension: extension.clone(),
                };

                let Some(url) = raw_content_url(
                    &self.config.raw_base,
                    full_name,
                    branch,
                    &descriptor.relative_location(),
                ) else {
                    continue;
                };

                debug!(url = %url, "Finding README");
                if api.fetch_raw(&url).await.is_success() {
                    info!(url = %url, "Found README");
                    return Some(Located::Found { url, descriptor });
                }
            }
        }
        None
    }
}

/// Checks the parent listing for a directory named like the folder's last
/// segment.
async fn folder_exists<A: GitHubApi + ?Sized>(
    api: &A,
    budget: &mut RateBudget,
    full_name: &str,
    folder: &str,
) -> bool {
    if budget.is_exhausted() {
        return false;
    }

    let (parent, leaf) = match folder.rsplit_once('/') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, folder),
    };

    match api.list_contents(full_name, parent).await {
        ApiResponse::Success {
            payload,
            rate_limit,
        } => {
            budget.update(rate_limit.as_ref());
            let found = payload.iter().any(|entry| entry.is_dir() && entry.name == leaf);
            if found {
                info!(folder, "Found the README folder");
            }
            found
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ContentEntry;
    use crate::testing::{ApiCall, ScriptedApi};

    fn locator(folders: &[&str], names: &[&str], extensions: &[&str]) -> ReadmeLocator {
        let config = SamplerConfig {
            folders: folders.iter().map(|s| s.to_string()).collect(),
            names: names.iter().map(|s| s.to_string()).collect(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
            ..SamplerConfig::default()
        };
        ReadmeLocator::new(LocatorConfig::from_config(&config).unwrap())
    }

    fn raw(path: &str) -> String {
        format!("https://raw.githubusercontent.com/o/r/main/{path}")
    }

    fn dir(name: &str) -> ContentEntry {
        ContentEntry {
            name: name.to_string(),
            kind: "dir".to_string(),
        }
    }

    #[test]
    fn expands_extension_case_variants() {
        let variants = case_variants(&["md".to_string(), ".rst".to_string(), "MD".to_string()]);
        assert_eq!(variants, vec!["md", "MD", "rst", "RST"]);
    }

    #[test]
    fn empty_folder_is_root() {
        let locator = locator(&["", "/docs/", ".github"], &["README"], &["md"]);
        assert_eq!(
            locator.config().folders,
            vec![None, Some("docs".to_string()), Some(".github".to_string())]
        );
    }

    #[tokio::test]
    async fn earlier_combination_wins() {
        let locator = locator(&[""], &["README", "readme"], &["md"]);
        let api = ScriptedApi::new()
            .with_raw(&raw("readme.md"), ApiResponse::ok(b"lower".to_vec()))
            .with_raw(&raw("README.MD"), ApiResponse::ok(b"upper".to_vec()));
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        let Located::Found { url, descriptor } = located else {
            panic!("expected a README");
        };
        assert_eq!(url.as_str(), raw("README.MD"));
        assert_eq!(descriptor.base_name, "README");
        assert_eq!(descriptor.extension, "MD");
        assert_eq!(
            api.raw_fetches(),
            vec![raw("README.md"), raw("README.MD")]
        );
    }

    #[tokio::test]
    async fn folder_major_order() {
        let locator = locator(&["", "docs"], &["README"], &["md"]);
        let api = ScriptedApi::new()
            .with_contents("o/r", None, ApiResponse::ok_with_remaining(vec![dir("docs")], 7))
            .with_raw(&raw("docs/README.md"), ApiResponse::ok(b"docs".to_vec()));
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        let Located::Found { descriptor, .. } = located else {
            panic!("expected a README");
        };
        assert_eq!(descriptor.folder.as_deref(), Some("docs"));
        assert_eq!(descriptor.relative_location(), "docs/README.md");
        assert_eq!(budget.remaining(), 7);
    }

    #[tokio::test]
    async fn failed_listing_skips_folder() {
        let locator = locator(&["docs"], &["README"], &["md"]);
        let api = ScriptedApi::new()
            .with_contents("o/r", None, ApiResponse::Transient { status: Some(500) })
            .with_raw(&raw("docs/README.md"), ApiResponse::ok(b"docs".to_vec()));
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        assert_eq!(located, Located::NotFound);
        assert!(api.raw_fetches().is_empty());
        assert_eq!(budget.remaining(), 10);
    }

    #[tokio::test]
    async fn missing_folder_skips_probes() {
        let locator = locator(&[".github"], &["README"], &["md"]);
        let api = ScriptedApi::new().with_contents(
            "o/r",
            None,
            ApiResponse::ok_with_remaining(vec![dir("src"), dir("docs")], 9),
        );
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        assert_eq!(located, Located::NotFound);
        assert!(api.raw_fetches().is_empty());
        assert_eq!(budget.remaining(), 9);
    }

    #[tokio::test]
    async fn nested_folder_lists_parent() {
        let locator = locator(&["docs/en"], &["README"], &["md"]);
        let api = ScriptedApi::new()
            .with_contents("o/r", Some("docs"), ApiResponse::ok(vec![dir("en")]))
            .with_raw(&raw("docs/en/README.md"), ApiResponse::ok(b"en".to_vec()));
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        assert!(matches!(located, Located::Found { .. }));
        assert!(api.calls().contains(&ApiCall::ListContents {
            full_name: "o/r".to_string(),
            path: Some("docs".to_string()),
        }));
    }

    #[tokio::test]
    async fn nothing_found_is_not_found() {
        let locator = locator(&[""], &["README"], &["md", "rst"]);
        let api = ScriptedApi::new();
        let mut budget = RateBudget::new(10);

        let located = locator.locate(&api, &mut budget, "o/r", "main").await;

        assert_eq!(located, Located::NotFound);
        assert_eq!(api.raw_fetches().len(), 4);
    }
}
