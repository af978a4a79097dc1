//! Durable record of acquired READMEs.
//!
//! The ledger is a CSV table with columns `url,readme_location,saved_as`.
//! It is loaded once at startup and rewritten in full after every append.
//! Rewrites go through a temporary file in the same directory that is
//! renamed over the ledger, so a crash leaves either the old or the new
//! table on disk, never a partial one.

mod entry;
mod error;

pub use entry::{LedgerEntry, LEDGER_COLUMNS};
pub use error::LedgerError;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Append-only set of acquired README sources.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: Vec<LedgerEntry>,
    urls: HashSet<String>,
}

impl Ledger {
    /// Loads the ledger at `path`, creating an empty one (and its directory)
    /// when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Malformed`] if the existing file cannot be parsed,
    /// or [`LedgerError::IoError`] if the store cannot be created.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let mut ledger = Self {
            path: path.to_path_buf(),
            entries: Vec::new(),
            urls: HashSet::new(),
        };

        if !path.exists() {
            info!(path = %path.display(), "Creating ledger");
            if let Some(dir) = parent_dir(path) {
                std::fs::create_dir_all(dir).map_err(|e| ledger.io_error(e))?;
            }
            ledger.flush()?;
            return Ok(ledger);
        }

        info!(path = %path.display(), "Ledger already exists, loading");
        let mut reader = csv::Reader::from_path(path).map_err(|e| ledger.malformed(e))?;
        for row in reader.deserialize::<LedgerEntry>() {
            let entry = row.map_err(|e| ledger.malformed(e))?;
            if ledger.urls.insert(entry.source_url.clone()) {
                ledger.entries.push(entry);
            } else {
                warn!(url = %entry.source_url, "Dropping duplicate ledger row");
            }
        }

        info!(count = ledger.entries.len(), "Loaded ledger");
        Ok(ledger)
    }

    /// Returns true if `url` was already acquired.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Records an entry and flushes the whole table to disk.
    ///
    /// If the flush fails the entry is removed again, so memory and disk
    /// stay in step.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Duplicate`] if the URL is already recorded, or
    /// the flush error.
    pub fn append(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        if self.contains(&entry.source_url) {
            return Err(LedgerError::Duplicate {
                url: entry.source_url,
            });
        }

        self.urls.insert(entry.source_url.clone());
        self.entries.push(entry);

        if let Err(e) = self.flush() {
            if let Some(entry) = self.entries.pop() {
                self.urls.remove(&entry.source_url);
            }
            return Err(e);
        }

        Ok(())
    }

    /// Recorded entries, in acquisition order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrites the full table through a temporary file.
    fn flush(&self) -> Result<(), LedgerError> {
        let dir = parent_dir(&self.path).unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer
                .write_record(LEDGER_COLUMNS)
                .map_err(|e| self.write_error(e))?;
            for entry in &self.entries {
                writer.serialize(entry).map_err(|e| self.write_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }

        temp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), rows = self.entries.len(), "Ledger flushed");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::IoError {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn malformed(&self, source: csv::Error) -> LedgerError {
        LedgerError::Malformed {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> LedgerError {
        LedgerError::WriteError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}
