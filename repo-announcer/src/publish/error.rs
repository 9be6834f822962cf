//! Publishing error types.

use thiserror::Error;

/// Errors that can occur when submitting a post.
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform refused the post.
    #[error("Post rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Rate limited by the platform.
    #[error("Rate limited by the platform, reset at {reset_at:?}")]
    RateLimited { reset_at: Option<u64> },

    /// Request signing failed.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// Writing a preview failed.
    #[error("Failed to write preview: {0}")]
    Io(#[from] std::io::Error),
}
