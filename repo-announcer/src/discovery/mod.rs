//! Repository discovery using the GitHub repository search API.
//!
//! This module finds repositories pushed within a [`SearchWindow`] in a given
//! language, and resolves the latest commit of a repository's branch.

mod error;
mod github;
mod repository;

pub use error::DiscoveryError;
pub use github::{GitHubHost, RESULTS_PER_PAGE};
pub use repository::{first_line, CommitInfo, RepositoryCandidate};

use crate::window::SearchWindow;
use async_trait::async_trait;
use tracing::{debug, info, info_span, Instrument};

/// Source of repositories and their commits.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Runs a repository search, returning the first page of results
    /// ordered by most recently updated.
    async fn search_repositories(
        &self,
        query: &str,
    ) -> Result<Vec<RepositoryCandidate>, DiscoveryError>;

    /// Fetches the latest commit of `branch` in `owner/name`.
    async fn latest_commit(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<CommitInfo, DiscoveryError>;
}

/// Builds a GitHub repository search query.
///
/// Format: `pushed:{start}..{end} language:{language}`
#[must_use]
pub fn build_search_query(window: &SearchWindow, language: &str) -> String {
    format!(
        "pushed:{}..{} language:{}",
        window.start_timestamp(),
        window.end_timestamp(),
        language
    )
}

/// Discovers repositories in `language` pushed within `window`.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the search fails. A failed search is never
/// reported as an empty result.
pub async fn discover_candidates(
    host: &dyn RepositoryHost,
    window: &SearchWindow,
    language: &str,
) -> Result<Vec<RepositoryCandidate>, DiscoveryError> {
    let span = info_span!(
        "discover",
        language = %language,
        start = %window.start_timestamp(),
        end = %window.end_timestamp()
    );

    async {
        info!("Starting repository discovery");

        let query = build_search_query(window, language);
        debug!(query = %query, "Executing repository search");

        let candidates = host.search_repositories(&query).await?;

        info!(count = candidates.len(), "Discovery complete");
        Ok(candidates)
    }
    .instrument(span)
    .await
}
