//! Orchestrates README sampling runs.
//!
//! The runner walks a small state machine: fetch a random listing page, then
//! pop repositories off it one at a time, filter them, locate and download
//! their README and record it. Pages are refetched until the quota is met
//! ([`RunState::Done`]) or the API budget runs out ([`RunState::Aborted`]).

mod context;
mod error;
mod state;

pub use context::RunContext;
pub use error::RunnerError;
pub use state::RunState;

use crate::config::{load_token, SamplerConfig};
use crate::github::{ApiResponse, GitHubApi, OctocrabApi, RepositoryCandidate, RepositorySummary};
use crate::ledger::{Ledger, LedgerEntry, LedgerError};
use crate::locator::{Located, LocatorConfig, ReadmeDescriptor, ReadmeLocator};
use crate::rate_limit::{Backoff, RateBudget};
use crate::sampling::CursorSampler;
use crate::summary::{ProcessingResult, RunSummary, SkipReason};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

/// Loop position, carrying whatever the next state needs.
enum Step {
    FetchPage,
    ScanPageItem,
    FetchRepoDetail(RepositorySummary),
    LocateReadme(RepositoryCandidate),
    FetchReadme {
        repository: RepositoryCandidate,
        url: Url,
        descriptor: ReadmeDescriptor,
    },
    Save {
        repository: RepositoryCandidate,
        descriptor: ReadmeDescriptor,
        content: Vec<u8>,
    },
    Finished(RunState),
}

impl Step {
    fn state(&self) -> RunState {
        match self {
            Self::FetchPage => RunState::FetchPage,
            Self::ScanPageItem => RunState::ScanPageItem,
            Self::FetchRepoDetail(_) => RunState::FetchRepoDetail,
            Self::LocateReadme(_) => RunState::LocateReadme,
            Self::FetchReadme { .. } => RunState::FetchReadme,
            Self::Save { .. } => RunState::Save,
            Self::Finished(state) => *state,
        }
    }
}

/// Drives a sampling run against a [`GitHubApi`].
pub struct Runner<A> {
    config: SamplerConfig,
    api: A,
    ledger: Ledger,
    locator: ReadmeLocator,
    sampler: CursorSampler,
    backoff: Backoff,
    context: RunContext,
    page: Vec<RepositorySummary>,
}

impl Runner<OctocrabApi> {
    /// Builds a runner against the live GitHub API.
    ///
    /// Reads the token file named in `config`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the token, client, output directory or
    /// ledger cannot be set up.
    pub fn connect(config: SamplerConfig) -> Result<Self, RunnerError> {
        let token = load_token(&config.token_path)?;
        let api = OctocrabApi::new(token, config.request_timeout())?;
        Self::new(config, api)
    }
}

impl<A: GitHubApi> Runner<A> {
    /// Builds a runner, preparing the output directory and loading the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the output directory cannot be created or
    /// the ledger is malformed.
    pub fn new(config: SamplerConfig, api: A) -> Result<Self, RunnerError> {
        std::fs::create_dir_all(&config.output_dir).map_err(|e| RunnerError::OutputDir {
            path: config.output_dir.display().to_string(),
            source: e,
        })?;
        let ledger = Ledger::load(&config.ledger_path())?;
        Self::with_ledger(config, api, ledger)
    }

    /// Builds a runner around an already loaded ledger.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Api`] if the locator's base URL is invalid.
    pub fn with_ledger(config: SamplerConfig, api: A, ledger: Ledger) -> Result<Self, RunnerError> {
        let locator = ReadmeLocator::new(LocatorConfig::from_config(&config)?);
        let sampler = CursorSampler::new(config.seed, config.since_upper_bound);
        let backoff = Backoff::new(
            Duration::from_millis(config.backoff_base_ms),
            Duration::from_millis(config.backoff_max_ms),
        );
        let context = RunContext::new(config.quota);

        Ok(Self {
            config,
            api,
            ledger,
            locator,
            sampler,
            backoff,
            context,
            page: Vec::new(),
        })
    }

    /// Overrides the starting rate budget.
    #[must_use]
    pub fn with_budget(mut self, budget: RateBudget) -> Self {
        self.context.budget = budget;
        self
    }

    /// Current run counters.
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// The acquisition ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The API the runner talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs until the quota is met or the budget is exhausted.
    ///
    /// Budget exhaustion is a normal outcome reported as
    /// [`RunState::Aborted`] in the summary.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Ledger`] if a saved README cannot be recorded.
    pub async fn run(&mut self) -> Result<RunSummary, RunnerError> {
        let span = info_span!("sample", quota = self.context.quota, seed = self.config.seed);

        async move {
            info!(
                ledger_entries = self.ledger.len(),
                "Starting README sampling"
            );

            let mut step = Step::FetchPage;
            let final_state = loop {
                debug!(state = %step.state(), "Entering state");
                step = match step {
                    Step::Finished(state) => break state,
                    Step::FetchPage => self.fetch_page().await,
                    Step::ScanPageItem => self.scan_page_item(),
                    Step::FetchRepoDetail(summary) => self.fetch_repo_detail(summary).await,
                    Step::LocateReadme(repository) => self.locate_readme(repository).await,
                    Step::FetchReadme {
                        repository,
                        url,
                        descriptor,
                    } => self.fetch_readme(repository, url, descriptor).await,
                    Step::Save {
                        repository,
                        descriptor,
                        content,
                    } => self.save(repository, descriptor, content).await?,
                };
            };

            let summary = &mut self.context.summary;
            summary.final_state = final_state;
            summary.remaining_budget = self.context.budget.remaining();

            info!(
                state = %final_state,
                saved = summary.saved.len(),
                skipped = summary.total_skipped(),
                remaining_calls = summary.remaining_budget,
                remaining_files = self.context.quota,
                "Sampling finished"
            );
            Ok(summary.clone())
        }
        .instrument(span)
        .await
    }

    /// Terminal state reached by the counters, if any. Quota wins over budget.
    fn terminal_state(&self) -> Option<RunState> {
        if self.context.quota_met() {
            Some(RunState::Done)
        } else if self.context.budget.is_exhausted() {
            info!(remaining = self.context.budget.remaining(), "Rate budget exhausted");
            Some(RunState::Aborted)
        } else {
            None
        }
    }

    async fn fetch_page(&mut self) -> Step {
        if let Some(state) = self.terminal_state() {
            return Step::Finished(state);
        }

        let since = self.sampler.next_since();
        match self.api.list_repositories(since).await {
            ApiResponse::Success {
                payload,
                rate_limit,
            } => {
                self.backoff.reset();
                self.context.budget.update(rate_limit.as_ref());
                self.context.summary.pages_fetched += 1;
                info!(
                    since,
                    repositories = payload.len(),
                    remaining = self.context.budget.remaining(),
                    "Fetched listing page"
                );
                self.page = payload;
                Step::ScanPageItem
            }
            failure => {
                self.context.summary.page_failures += 1;
                let status = match failure {
                    ApiResponse::Transient { status } => status,
                    _ => Some(404),
                };

                warn!(
                    since,
                    ?status,
                    streak = self.backoff.failures() + 1,
                    "Listing failed, discarding page"
                );
                self.backoff.wait().await;
                Step::FetchPage
            }
        }
    }

    fn scan_page_item(&mut self) -> Step {
        if let Some(state) = self.terminal_state() {
            return Step::Finished(state);
        }

        let Some(item) = self.page.pop() else {
            return Step::FetchPage;
        };

        if self.ledger.contains(&item.html_url) {
            info!(url = %item.html_url, "Already accessed repo");
            return self.skip(&item.full_name, SkipReason::AlreadyAcquired);
        }

        Step::FetchRepoDetail(item)
    }

    async fn fetch_repo_detail(&mut self, item: RepositorySummary) -> Step {
        let repository = match self.api.get_repository(&item.full_name).await {
            ApiResponse::Success {
                payload,
                rate_limit,
            } => {
                self.context.budget.update(rate_limit.as_ref());
                payload
            }
            _ => return self.skip(&item.full_name, SkipReason::DetailUnavailable),
        };

        if !repository.is_software_project() {
            info!(url = %repository.html_url, "Ignoring repository without a primary language");
            return self.skip(&repository.full_name, SkipReason::NotSoftware);
        }

        Step::LocateReadme(repository)
    }

    async fn locate_readme(&mut self, repository: RepositoryCandidate) -> Step {
        let located = self
            .locator
            .locate(
                &self.api,
                &mut self.context.budget,
                &repository.full_name,
                &repository.default_branch,
            )
            .await;

        match located {
            Located::Found { url, descriptor } => Step::FetchReadme {
                repository,
                url,
                descriptor,
            },
            Located::NotFound => self.skip(&repository.full_name, SkipReason::ReadmeNotFound),
        }
    }

    async fn fetch_readme(
        &mut self,
        repository: RepositoryCandidate,
        url: Url,
        descriptor: ReadmeDescriptor,
    ) -> Step {
        let content = match self.api.fetch_raw(&url).await {
            ApiResponse::Success { payload, .. } => payload,
            _ => return self.skip(&repository.full_name, SkipReason::ReadmeUnavailable),
        };

        if content.len() < self.config.min_readme_bytes {
            info!(url = %url, bytes = content.len(), "Ignoring small README");
            return self.skip(&repository.full_name, SkipReason::ReadmeTooSmall);
        }

        Step::Save {
            repository,
            descriptor,
            content,
        }
    }

    async fn save(
        &mut self,
        repository: RepositoryCandidate,
        descriptor: ReadmeDescriptor,
        content: Vec<u8>,
    ) -> Result<Step, RunnerError> {
        if self.ledger.contains(&repository.html_url) {
            info!(url = %repository.html_url, "Already accessed repo");
            return Ok(self.skip(&repository.full_name, SkipReason::AlreadyAcquired));
        }

        let filename = descriptor.saved_filename();
        let path = self.config.output_dir.join(&filename);

        if let Err(e) = tokio::fs::write(&path, &content).await {
            warn!(path = %path.display(), error = %e, "Failed to save README");
            return Ok(self.skip(&repository.full_name, SkipReason::SaveFailed));
        }

        let entry = LedgerEntry::new(
            &repository.html_url,
            descriptor.relative_location(),
            &filename,
        );
        match self.ledger.append(entry.clone()) {
            Ok(()) => {}
            Err(LedgerError::Duplicate { url }) => {
                warn!(url = %url, "README already recorded");
                return Ok(self.skip(&repository.full_name, SkipReason::AlreadyAcquired));
            }
            Err(e) => return Err(e.into()),
        }

        self.context.consume_quota();
        self.context
            .summary
            .record_result(&ProcessingResult::Saved(entry));
        info!(
            file = %filename,
            bytes = content.len(),
            remaining_files = self.context.quota,
            "Saved README"
        );

        Ok(Step::ScanPageItem)
    }

    fn skip(&mut self, repository: &str, reason: SkipReason) -> Step {
        debug!(repo = %repository, %reason, "Skipping repository");
        self.context.summary.record_result(&ProcessingResult::Skipped {
            repository: repository.to_string(),
            reason,
        });
        Step::ScanPageItem
    }
}
