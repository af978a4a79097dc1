//! Ledger row type.

use serde::{Deserialize, Serialize};

/// Column names of the ledger file, in order.
pub const LEDGER_COLUMNS: [&str; 3] = ["url", "readme_location", "saved_as"];

/// One acquired README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Canonical repository URL. Unique across the ledger.
    #[serde(rename = "url")]
    pub source_url: String,

    /// README path inside the repository (e.g., "docs/README.md").
    #[serde(rename = "readme_location")]
    pub readme_relative_location: String,

    /// File name the README was saved under.
    #[serde(rename = "saved_as")]
    pub saved_filename: String,
}

impl LedgerEntry {
    /// Creates an entry.
    pub fn new(
        source_url: impl Into<String>,
        readme_relative_location: impl Into<String>,
        saved_filename: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            readme_relative_location: readme_relative_location.into(),
            saved_filename: saved_filename.into(),
        }
    }
}
