//! Publishing announcements to the social platform.
//!
//! - [`Publisher`] is the interface the runner posts through
//! - [`TwitterPublisher`] posts to Twitter/X with OAuth 1.0a user credentials
//! - [`DryRunPublisher`] prints posts to stdout instead

mod error;
mod oauth;
mod twitter;

pub use error::PublishError;
pub use oauth::OAuthCredentials;
pub use twitter::{TwitterPublisher, DEFAULT_TWITTER_API_URL};

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// Separator printed after each previewed post.
pub const PREVIEW_SEPARATOR: &str = "====================================";

/// A post accepted by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    /// Platform id of the post, if the platform reports one.
    pub id: Option<String>,
}

/// Destination for announcements.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether posts are only previewed.
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Submits `message` as a new post.
    async fn publish(&self, message: &str) -> Result<PublishedPost, PublishError>;
}

/// Writes posts to a sink instead of publishing them.
pub struct DryRunPublisher {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Default for DryRunPublisher {
    fn default() -> Self {
        Self::stdout()
    }
}

impl DryRunPublisher {
    /// Previews posts on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::to_writer(Box::new(std::io::stdout()))
    }

    /// Previews posts on an arbitrary writer.
    #[must_use]
    pub fn to_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn is_dry_run(&self) -> bool {
        true
    }

    async fn publish(&self, message: &str) -> Result<PublishedPost, PublishError> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(out, "{message}")?;
        writeln!(out, "{PREVIEW_SEPARATOR}\n")?;
        out.flush()?;
        Ok(PublishedPost { id: None })
    }
}
