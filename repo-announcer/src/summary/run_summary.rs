//! Run summary types.

use super::result::{FailureStage, ProcessingResult};

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of candidates returned by the search.
    pub candidates_discovered: usize,

    /// Number of announcements posted.
    pub published: usize,

    /// Number of announcements previewed (dry run).
    pub previewed: usize,

    /// Number of candidates rejected by the filter.
    pub rejected: usize,

    /// Number of candidates skipped as already announced.
    pub skipped: usize,

    /// Number of candidates whose latest commit could not be resolved.
    pub lookup_failures: usize,

    /// Number of candidates whose announcement could not be rendered.
    pub format_failures: usize,

    /// Number of announcements the platform did not accept.
    pub publish_failures: usize,

    /// Number of times the announcement history could not be written.
    pub history_failures: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Published { .. } => self.published += 1,
            ProcessingResult::Previewed { .. } => self.previewed += 1,
            ProcessingResult::Rejected { .. } => self.rejected += 1,
            ProcessingResult::Skipped { .. } => self.skipped += 1,
            ProcessingResult::Failed { stage, .. } => match stage {
                FailureStage::CommitLookup => self.lookup_failures += 1,
                FailureStage::Format => self.format_failures += 1,
                FailureStage::Publish => self.publish_failures += 1,
            },
        }
    }

    /// Total number of failures, including an unsaved history.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.lookup_failures + self.format_failures + self.publish_failures + self.history_failures
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
