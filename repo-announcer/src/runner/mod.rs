//! Orchestrates a discovery and announcement run.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_LANGUAGE, DEFAULT_WINDOW};
pub use error::RunnerError;

use crate::config::{ConfigError, ENV_TWITTER_CONSUMER_KEY};
use crate::discovery::{
    discover_candidates, CommitInfo, DiscoveryError, GitHubHost, RepositoryCandidate,
    RepositoryHost,
};
use crate::filter::CandidateFilter;
use crate::history::AnnouncementHistory;
use crate::publish::{DryRunPublisher, Publisher, TwitterPublisher};
use crate::summary::{FailureStage, ProcessingResult, RunSummary};
use crate::templates::MessageRenderer;
use crate::window::SearchWindow;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::pin::pin;
use tracing::{debug, error, info, warn};

/// Runs the search, filter, format and publish pipeline.
pub struct Runner {
    config: RunnerConfig,
    host: Box<dyn RepositoryHost>,
    publisher: Box<dyn Publisher>,
    renderer: MessageRenderer,
    filter: CandidateFilter,
}

impl Runner {
    /// Builds a runner with GitHub and Twitter clients from the configuration.
    ///
    /// In dry-run mode posts are printed to stdout and Twitter credentials
    /// are not required.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if Twitter credentials are missing outside of
    /// dry-run mode, or a client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let publisher: Box<dyn Publisher> = if config.dry_run() {
            Box::new(DryRunPublisher::stdout())
        } else {
            let credentials =
                config
                    .twitter_credentials()
                    .cloned()
                    .ok_or(ConfigError::MissingCredential {
                        name: ENV_TWITTER_CONSUMER_KEY,
                    })?;
            Box::new(TwitterPublisher::new(
                credentials,
                config.twitter_api_url(),
            )?)
        };

        if config.github_token().is_none() {
            warn!("No GitHub token configured, using unauthenticated access");
        }
        let host = GitHubHost::new(config.github_token(), config.github_api_url())?;

        Self::with_clients(config, Box::new(host), publisher)
    }

    /// Builds a runner around existing clients.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configured message template is invalid.
    pub fn with_clients(
        config: RunnerConfig,
        host: Box<dyn RepositoryHost>,
        publisher: Box<dyn Publisher>,
    ) -> Result<Self, RunnerError> {
        let renderer = match config.message_template() {
            Some(template) => MessageRenderer::with_template(template)?,
            None => MessageRenderer::new(),
        }
        .with_max_length(config.max_length());
        let filter = CandidateFilter::new(config.min_stars());

        Ok(Self {
            config,
            host,
            publisher,
            renderer,
            filter,
        })
    }

    /// Executes a run for a window ending now.
    ///
    /// # Errors
    ///
    /// See [`Runner::run_at`].
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        self.run_at(Utc::now()).await
    }

    /// Executes a run for a window ending at `now`.
    ///
    /// Failures of individual candidates are recorded in the summary and do
    /// not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the window is invalid, the history cannot
    /// be loaded, or the search fails.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary, RunnerError> {
        let window = SearchWindow::parse(self.config.window(), now)?;
        let dry_run = self.publisher.is_dry_run();
        let mut summary = RunSummary::new(dry_run);

        let mut history = match self.config.history_path() {
            Some(path) => Some(AnnouncementHistory::load(path)?),
            None => None,
        };

        info!(
            language = %self.config.language(),
            start = %window.start_timestamp(),
            end = %window.end_timestamp(),
            publisher = self.publisher.name(),
            "Starting run"
        );

        let candidates =
            discover_candidates(self.host.as_ref(), &window, self.config.language()).await?;
        summary.candidates_discovered = candidates.len();

        if candidates.is_empty() {
            info!("No repositories found");
            return Ok(summary);
        }

        let mut pending = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let already_announced = history
                .as_ref()
                .is_some_and(|h| h.announced_since(&candidate.full_name, window.start()));
            if already_announced {
                info!(repo = %candidate.full_name, "Already announced, skipping");
                summary.record_result(&ProcessingResult::Skipped {
                    repository: candidate.full_name,
                    reason: "already announced in this window".to_string(),
                });
            } else {
                pending.push(candidate);
            }
        }

        let host = self.host.as_ref();
        let mut lookups = pin!(stream::iter(pending)
            .map(|candidate| async move {
                let commit = host
                    .latest_commit(&candidate.owner, &candidate.name, &candidate.default_branch)
                    .await;
                (candidate, commit)
            })
            .buffered(self.config.concurrency().max(1)));

        while let Some((candidate, commit)) = lookups.next().await {
            let result = self.process_candidate(&candidate, commit).await;
            if let (ProcessingResult::Published { .. }, Some(history)) = (&result, history.as_mut())
            {
                history.record(&candidate.full_name, now);
            }
            summary.record_result(&result);
        }

        if let (Some(history), Some(path)) = (history.as_mut(), self.config.history_path()) {
            if !dry_run {
                let pruned = history.prune_before(window.start());
                debug!(pruned, "Pruned announcement history");
                if let Err(e) = history.save(path) {
                    error!(error = %e, "Failed to save announcement history");
                    summary.history_failures += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Filters, formats and publishes one candidate.
    async fn process_candidate(
        &self,
        candidate: &RepositoryCandidate,
        commit: Result<CommitInfo, DiscoveryError>,
    ) -> ProcessingResult {
        let repository = candidate.full_name.clone();

        let (commit, lookup_error) = match commit {
            Ok(commit) => (Some(commit), None),
            Err(e) => {
                warn!(
                    repo = %repository,
                    branch = %candidate.default_branch,
                    error = %e,
                    "Failed to resolve latest commit"
                );
                (None, Some(e.to_string()))
            }
        };

        let commit = match (self.filter.evaluate(candidate, commit.as_ref()), lookup_error) {
            (Ok(commit), _) => commit,
            (Err(_), Some(error)) => {
                return ProcessingResult::Failed {
                    repository,
                    stage: FailureStage::CommitLookup,
                    error,
                };
            }
            (Err(rejection), None) => {
                debug!(repo = %repository, reason = %rejection, "Candidate rejected");
                return ProcessingResult::Rejected {
                    repository,
                    reason: rejection.to_string(),
                };
            }
        };

        let message = match self.renderer.render(candidate, commit) {
            Ok(message) => message,
            Err(e) => {
                warn!(repo = %repository, error = %e, "Failed to render announcement");
                return ProcessingResult::Failed {
                    repository,
                    stage: FailureStage::Format,
                    error: e.to_string(),
                };
            }
        };

        match self.publisher.publish(&message).await {
            Ok(_) if self.publisher.is_dry_run() => ProcessingResult::Previewed { repository },
            Ok(post) => {
                info!(
                    repo = %repository,
                    post_id = post.id.as_deref().unwrap_or("unknown"),
                    "Announcement published"
                );
                ProcessingResult::Published {
                    repository,
                    post_id: post.id,
                }
            }
            Err(e) => {
                warn!(repo = %repository, error = %e, "Failed to publish announcement");
                ProcessingResult::Failed {
                    repository,
                    stage: FailureStage::Publish,
                    error: e.to_string(),
                }
            }
        }
    }
}
