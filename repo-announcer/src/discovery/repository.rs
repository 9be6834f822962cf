//! Repository and commit information returned by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository returned by the search, prior to filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCandidate {
    /// Repository owner login (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Stargazer count.
    pub stars: u32,

    /// Fork count.
    pub forks: u32,

    /// Browser URL of the repository.
    pub html_url: String,

    /// Repository description, if one is set.
    pub description: Option<String>,

    /// Default branch name (e.g., "main").
    pub default_branch: String,

    /// Whether the repository is private.
    pub private: bool,

    /// Time of the last push, when reported.
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Latest commit of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit SHA.
    pub sha: String,

    /// First line of the commit message.
    pub message: String,

    /// Login of the GitHub account linked to the commit author.
    ///
    /// Empty when the commit email is not linked to any account.
    pub author_login: String,
}

impl CommitInfo {
    /// Builds commit info, keeping only the first line of `message`.
    #[must_use]
    pub fn new(sha: impl Into<String>, message: &str, author_login: Option<String>) -> Self {
        Self {
            sha: sha.into(),
            message: first_line(message).to_string(),
            author_login: author_login.unwrap_or_default(),
        }
    }
}

/// Returns the first line of `message` without its line terminator.
#[must_use]
pub fn first_line(message: &str) -> &str {
    message
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
}
