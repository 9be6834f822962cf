//! Search window calculation.
//!
//! Converts a duration such as `"8h"` into an absolute UTC range that ends
//! at a reference time, for use in the `pushed:` search qualifier.

mod duration;
mod error;

pub use duration::parse_duration;
pub use error::WindowError;

use chrono::{DateTime, Duration, Utc};

/// Timestamp layout used in search qualifiers, e.g. `2024-05-01T08:00:00Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Absolute UTC range used to bound the search by push date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SearchWindow {
    /// Creates a window of `duration` that ends at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start: end - duration,
            end,
        }
    }

    /// Creates a window of `duration` that ends now.
    #[must_use]
    pub fn ending_now(duration: Duration) -> Self {
        Self::ending_at(Utc::now(), duration)
    }

    /// Parses `duration` and creates a window ending at `end`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] if the duration cannot be parsed.
    pub fn parse(duration: &str, end: DateTime<Utc>) -> Result<Self, WindowError> {
        Ok(Self::ending_at(end, parse_duration(duration)?))
    }

    /// Start of the window.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the window.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Start rendered as [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn start_timestamp(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }

    /// End rendered as [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn end_timestamp(&self) -> String {
        self.end.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap()
    }

    #[test]
    fn window_ends_at_reference_time() {
        let now = reference_time();
        let window = SearchWindow::parse("8h", now).unwrap();

        assert_eq!(window.end(), now);
        assert_eq!(window.start(), now - Duration::hours(8));
        assert_eq!(window.start_timestamp(), "2024-05-01T04:30:15Z");
        assert_eq!(window.end_timestamp(), "2024-05-01T12:30:15Z");
    }

    #[test]
    fn window_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        let window = SearchWindow::parse("3h", now).unwrap();

        assert_eq!(window.start_timestamp(), "2023-12-31T22:00:00Z");
        assert_eq!(window.end_timestamp(), "2024-01-01T01:00:00Z");
    }

    #[test]
    fn window_holds_for_several_durations() {
        let now = reference_time();
        for input in ["1s", "90m", "3h", "24h", "1h30m45s"] {
            let duration = parse_duration(input).unwrap();
            let window = SearchWindow::ending_at(now, duration);

            assert_eq!(window.end() - window.start(), duration, "{input}");
            assert_eq!(
                window.start_timestamp(),
                (now - duration).format(TIMESTAMP_FORMAT).to_string()
            );
        }
    }

    #[test]
    fn subsecond_precision_is_not_rendered() {
        let now = reference_time() + Duration::milliseconds(750);
        let window = SearchWindow::ending_at(now, Duration::hours(1));

        assert_eq!(window.end_timestamp(), "2024-05-01T12:30:15Z");
    }

    #[test]
    fn zero_duration_gives_empty_window() {
        let now = reference_time();
        let window = SearchWindow::parse("0", now).unwrap();
        assert_eq!(window.start(), window.end());
    }

    #[test]
    fn invalid_duration_fails_loudly() {
        let result = SearchWindow::parse("soon", reference_time());
        assert!(result.is_err());
    }
}
