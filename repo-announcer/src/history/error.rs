//! Announcement history error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Failed to read or write a file.
    #[error("Failed to access history file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The history file is not valid JSON.
    #[error("Failed to parse history file '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
