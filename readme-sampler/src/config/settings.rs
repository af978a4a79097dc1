//! Sampler settings deserialization and validation.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Number of README files to acquire per run.
pub const DEFAULT_QUOTA: u32 = 10;

/// READMEs smaller than this many bytes are treated as placeholders.
pub const DEFAULT_MIN_README_BYTES: usize = 2048;

/// Seed for the `since` cursor sequence. Fixed so runs are reproducible.
pub const DEFAULT_SEED: u64 = 10;

/// Exclusive upper bound of the `since` cursor range.
pub const DEFAULT_SINCE_UPPER_BOUND: u64 = 100_000_000;

/// Settings for a sampling run, parsed from `readme-sampler.toml`.
///
/// Every field has a default, so an absent file or an empty file yields the
/// stock configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SamplerConfig {
    /// README files to acquire this run.
    pub quota: u32,

    /// Minimum README size in bytes (inclusive).
    pub min_readme_bytes: usize,

    /// Seed of the cursor sampler.
    pub seed: u64,

    /// Exclusive upper bound of the `since` cursor.
    pub since_upper_bound: u64,

    /// Directory that receives README files and the ledger.
    pub output_dir: PathBuf,

    /// Ledger file name inside `output_dir`.
    pub ledger_file: String,

    /// File holding a GitHub personal access token on its first line.
    pub token_path: PathBuf,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Initial listing retry delay in milliseconds.
    pub backoff_base_ms: u64,

    /// Cap on the listing retry delay in milliseconds.
    pub backoff_max_ms: u64,

    /// Candidate README folders, searched in order. An empty string is the
    /// repository root.
    pub folders: Vec<String>,

    /// Candidate README base names, searched in order.
    pub names: Vec<String>,

    /// Candidate README extensions. Upper-case variants are added automatically.
    pub extensions: Vec<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            min_readme_bytes: DEFAULT_MIN_README_BYTES,
            seed: DEFAULT_SEED,
            since_upper_bound: DEFAULT_SINCE_UPPER_BOUND,
            output_dir: PathBuf::from("readme_files"),
            ledger_file: "index.csv".to_string(),
            token_path: PathBuf::from("GitHub_PAT.txt"),
            request_timeout_secs: 30,
            backoff_base_ms: 500,
            backoff_max_ms: 30_000,
            folders: vec![String::new()],
            names: vec!["README".to_string()],
            extensions: vec!["md".to_string()],
        }
    }
}

impl SamplerConfig {
    /// Loads settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        info!(path = %path.display(), quota = config.quota, "Loaded config");
        Ok(config)
    }

    /// Validates values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: message.to_string(),
            })
        };

        if self.since_upper_bound == 0 {
            return fail("since-upper-bound must be greater than zero");
        }
        if self.folders.is_empty() {
            return fail("folders must contain at least one entry");
        }
        if self.names.iter().all(|n| n.trim().is_empty()) {
            return fail("names must contain at least one non-empty entry");
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return fail("extensions must contain at least one non-empty entry");
        }
        if self.ledger_file.trim().is_empty() {
            return fail("ledger-file cannot be empty");
        }
        if self.request_timeout_secs == 0 {
            return fail("request-timeout-secs must be greater than zero");
        }
        if self.backoff_base_ms > self.backoff_max_ms {
            return fail("backoff-base-ms cannot exceed backoff-max-ms");
        }

        Ok(())
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.output_dir.join(&self.ledger_file)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
