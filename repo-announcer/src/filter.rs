//! Candidate filtering.
//!
//! A candidate is announced only when it is popular enough, its latest
//! commit is linked to a GitHub account, and it is public.

use crate::discovery::{CommitInfo, RepositoryCandidate};
use std::fmt;

/// Default minimum star count (exclusive).
pub const DEFAULT_MIN_STARS: u32 = 10;

/// Reason a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Star count is not above the threshold.
    NotEnoughStars { stars: u32, min_stars: u32 },

    /// Latest commit is missing or has no linked author account.
    NoCommitAuthor,

    /// Repository is private.
    Private,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughStars { stars, min_stars } => {
                write!(f, "{stars} stars, needs more than {min_stars}")
            }
            Self::NoCommitAuthor => f.write_str("latest commit has no author login"),
            Self::Private => f.write_str("repository is private"),
        }
    }
}

/// Popularity and authenticity heuristic applied to each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    min_stars: u32,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_STARS)
    }
}

impl CandidateFilter {
    /// Creates a filter requiring more than `min_stars` stars.
    #[must_use]
    pub fn new(min_stars: u32) -> Self {
        Self { min_stars }
    }

    /// Returns the star threshold.
    #[must_use]
    pub fn min_stars(&self) -> u32 {
        self.min_stars
    }

    /// Checks a candidate, returning its commit when every check passes.
    ///
    /// A missing commit is treated as an empty author login.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] for the first check that fails.
    pub fn evaluate<'a>(
        &self,
        candidate: &RepositoryCandidate,
        commit: Option<&'a CommitInfo>,
    ) -> Result<&'a CommitInfo, Rejection> {
        if candidate.stars <= self.min_stars {
            return Err(Rejection::NotEnoughStars {
                stars: candidate.stars,
                min_stars: self.min_stars,
            });
        }

        let commit = commit
            .filter(|c| !c.author_login.is_empty())
            .ok_or(Rejection::NoCommitAuthor)?;

        if candidate.private {
            return Err(Rejection::Private);
        }

        Ok(commit)
    }

    /// Returns true if the candidate passes every check.
    #[must_use]
    pub fn accepts(&self, candidate: &RepositoryCandidate, commit: Option<&CommitInfo>) -> bool {
        self.evaluate(candidate, commit).is_ok()
    }
}
