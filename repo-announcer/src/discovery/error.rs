//! Repository discovery error types.

use thiserror::Error;

/// Errors that can occur while talking to the repository host.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The configured API base URL could not be used.
    #[error("Invalid GitHub API URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Branch lookup returned no usable commit.
    #[error("Branch '{branch}' of {repository} has no commit")]
    MissingCommit { repository: String, branch: String },
}
