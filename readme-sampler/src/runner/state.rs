//! Acquisition loop states.

use std::fmt;

/// States of the acquisition loop.
///
/// [`RunState::Done`] and [`RunState::Aborted`] are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Requesting a random listing page.
    FetchPage,
    /// Taking the next repository off the page.
    ScanPageItem,
    /// Requesting a repository's detail record.
    FetchRepoDetail,
    /// Searching for a README.
    LocateReadme,
    /// Downloading the README.
    FetchReadme,
    /// Writing the README and its ledger row.
    Save,
    /// The quota was met.
    Done,
    /// The run stopped early, normally because the rate budget ran out.
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FetchPage => "fetch page",
            Self::ScanPageItem => "scan page item",
            Self::FetchRepoDetail => "fetch repository detail",
            Self::LocateReadme => "locate README",
            Self::FetchReadme => "fetch README",
            Self::Save => "save",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(text)
    }
}
