//! Processing result types.

use std::fmt;

/// Pipeline step at which a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Resolving the latest commit of the default branch.
    CommitLookup,
    /// Rendering the announcement.
    Format,
    /// Submitting the post.
    Publish,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommitLookup => "commit_lookup",
            Self::Format => "format",
            Self::Publish => "publish",
        })
    }
}

/// Result of processing a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// Announcement posted.
    Published {
        /// Repository full name.
        repository: String,
        /// Platform id of the post.
        post_id: Option<String>,
    },

    /// Announcement previewed in dry-run mode.
    Previewed {
        /// Repository full name.
        repository: String,
    },

    /// Candidate did not pass the filter.
    Rejected {
        /// Repository full name.
        repository: String,
        /// Failing check.
        reason: String,
    },

    /// Processing was skipped.
    Skipped {
        /// Repository full name.
        repository: String,
        /// Reason for skipping.
        reason: String,
    },

    /// Processing failed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Step that failed.
        stage: FailureStage,
        /// Error message.
        error: String,
    },
}

impl ProcessingResult {
    /// Repository this result belongs to.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Published { repository, .. }
            | Self::Previewed { repository }
            | Self::Rejected { repository, .. }
            | Self::Skipped { repository, .. }
            | Self::Failed { repository, .. } => repository,
        }
    }
}
