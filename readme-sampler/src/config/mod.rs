//! Configuration and credential loading.
//!
//! Settings come from compiled-in defaults, optionally overridden by a
//! `readme-sampler.toml` file. The GitHub token is read from a plain text file
//! when one is present.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    SamplerConfig, DEFAULT_MIN_README_BYTES, DEFAULT_QUOTA, DEFAULT_SEED,
    DEFAULT_SINCE_UPPER_BOUND,
};

use std::path::Path;
use tracing::{debug, info};

/// Default name of the optional settings file.
pub const CONFIG_FILE_NAME: &str = "readme-sampler.toml";

/// Reads a personal access token from the first line of `path`.
///
/// # Returns
///
/// `None` when the file does not exist or its first line is blank; the
/// sampler then runs unauthenticated with the lower rate ceiling.
///
/// # Errors
///
/// Returns [`ConfigError::IoError`] if the file exists but cannot be read.
pub fn load_token(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "No token file, running unauthenticated");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let token = content.lines().next().map(str::trim).unwrap_or_default();
    if token.is_empty() {
        return Ok(None);
    }

    info!(path = %path.display(), "GitHub token loaded");
    Ok(Some(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_first_line_trimmed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("GitHub_PAT.txt");
        fs::write(&path, "  ghp_secret  \nsecond line\n").unwrap();

        assert_eq!(load_token(&path).unwrap(), Some("ghp_secret".to_string()));
    }

    #[test]
    fn missing_token_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_token(&temp.path().join("nope.txt")).unwrap(), None);
    }

    #[test]
    fn blank_token_file_is_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("GitHub_PAT.txt");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_token(&path).unwrap(), None);
    }
}
