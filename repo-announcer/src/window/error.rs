//! Time window error types.

use thiserror::Error;

/// Errors that can occur while parsing a search window duration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// The duration string is malformed.
    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: &'static str },

    /// The duration uses a unit that is not recognised.
    #[error("Unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { input: String, unit: String },

    /// Negative durations would produce a window that ends before it starts.
    #[error("Duration '{input}' must not be negative")]
    Negative { input: String },

    /// The duration does not fit in a signed 64-bit nanosecond count.
    #[error("Duration '{input}' is out of range")]
    OutOfRange { input: String },
}
