//! GitHub implementation of [`RepositoryHost`].

use super::{CommitInfo, DiscoveryError, RepositoryCandidate, RepositoryHost};
use async_trait::async_trait;
use octocrab::models::Repository;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

/// Results per page for repository search.
pub const RESULTS_PER_PAGE: u8 = 100;

/// Repository host backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubHost {
    octocrab: Octocrab,
}

impl GitHubHost {
    /// Builds a client for the GitHub API.
    ///
    /// Without a token the client is unauthenticated and subject to the
    /// lower anonymous rate limits. `base_url` overrides the API root, e.g.
    /// for GitHub Enterprise.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] if the base URL is invalid or the client
    /// cannot be built.
    pub fn new(token: Option<&str>, base_url: Option<&str>) -> Result<Self, DiscoveryError> {
        crate::tls::install_crypto_provider();

        let mut builder = Octocrab::builder();
        if let Some(url) = base_url {
            builder = builder
                .base_uri(url.to_string())
                .map_err(|e| DiscoveryError::InvalidBaseUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn search_repositories(
        &self,
        query: &str,
    ) -> Result<Vec<RepositoryCandidate>, DiscoveryError> {
        let page = self
            .octocrab
            .search()
            .repositories(query)
            .sort("updated")
            .order("desc")
            .per_page(RESULTS_PER_PAGE)
            .page(1u32)
            .send()
            .await?;

        let total = page.total_count.unwrap_or_default();
        if total > page.items.len() as u64 {
            debug!(
                total,
                returned = page.items.len(),
                "Search has more results than one page, using first page only"
            );
        }
        if page.incomplete_results == Some(true) {
            debug!("Search reported incomplete results");
        }

        Ok(page.items.into_iter().filter_map(into_candidate).collect())
    }

    async fn latest_commit(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<CommitInfo, DiscoveryError> {
        let route = format!("/repos/{owner}/{name}/branches/{}", encode_branch(branch));
        let response: BranchResponse = self.octocrab.get(route, None::<&()>).await?;

        let commit = response.commit.ok_or_else(|| DiscoveryError::MissingCommit {
            repository: format!("{owner}/{name}"),
            branch: response.name.clone(),
        })?;

        Ok(CommitInfo::new(
            commit.sha,
            &commit.commit.message,
            commit.author.map(|author| author.login),
        ))
    }
}

/// Converts a search result, dropping repositories without an owner or page URL.
fn into_candidate(repository: Repository) -> Option<RepositoryCandidate> {
    let owner = repository.owner?.login;
    let html_url = repository.html_url?.to_string();
    let full_name = repository
        .full_name
        .unwrap_or_else(|| format!("{}/{}", owner, repository.name));

    Some(RepositoryCandidate {
        owner,
        name: repository.name,
        full_name,
        stars: repository.stargazers_count.unwrap_or_default(),
        forks: repository.forks_count.unwrap_or_default(),
        html_url,
        description: repository.description,
        default_branch: repository
            .default_branch
            .unwrap_or_else(|| "main".to_string()),
        private: repository.private.unwrap_or_default(),
        pushed_at: repository.pushed_at,
    })
}

/// Percent-encodes each path segment of a branch name.
///
/// Slashes are kept as separators; `#`, `?` and `%` would otherwise change
/// which branch the URL points at.
fn encode_branch(branch: &str) -> String {
    branch
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Deserialize)]
struct Account {
    login: String,
}

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: Option<BranchCommit>,
}

#[derive(Deserialize)]
struct BranchCommit {
    sha: String,
    commit: GitCommit,
    /// GitHub account linked to the commit author, `null` when unlinked.
    author: Option<Account>,
}

#[derive(Deserialize)]
struct GitCommit {
    #[serde(default)]
    message: String,
}
