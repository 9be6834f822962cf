//! Record of already announced repositories.
//!
//! Reruns inside the same search window would otherwise announce the same
//! repositories again. The history maps each repository's full name to the
//! time it was last announced and is stored as JSON.

mod error;

pub use error::HistoryError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Repositories announced in earlier runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementHistory {
    announced: BTreeMap<String, DateTime<Utc>>,
}

impl AnnouncementHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the history from `path`. A missing file yields an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No history file yet");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(HistoryError::IoError {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let history: Self =
            serde_json::from_str(&content).map_err(|e| HistoryError::JsonError {
                path: path.display().to_string(),
                source: e,
            })?;
        info!(
            path = %path.display(),
            entries = history.len(),
            "Loaded announcement history"
        );
        Ok(history)
    }

    /// Writes the history to `path`, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let io_error = |source: std::io::Error| HistoryError::IoError {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(io_error)?;

        let json = serde_json::to_string_pretty(self).map_err(|e| HistoryError::JsonError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.persist(path).map_err(|e| io_error(e.error))?;

        debug!(path = %path.display(), entries = self.len(), "Saved announcement history");
        Ok(())
    }

    /// Returns true if `full_name` was announced at or after `since`.
    #[must_use]
    pub fn announced_since(&self, full_name: &str, since: DateTime<Utc>) -> bool {
        self.announced
            .get(full_name)
            .is_some_and(|announced_at| *announced_at >= since)
    }

    /// Records an announcement of `full_name` at `at`.
    pub fn record(&mut self, full_name: &str, at: DateTime<Utc>) {
        self.announced.insert(full_name.to_string(), at);
    }

    /// Drops entries announced before `cutoff`, returning how many were removed.
    pub fn prune_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.announced.len();
        self.announced.retain(|_, announced_at| *announced_at >= cutoff);
        before - self.announced.len()
    }

    /// Number of recorded repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.announced.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.announced.is_empty()
    }
}
