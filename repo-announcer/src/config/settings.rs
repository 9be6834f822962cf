//! Settings file deserialization.

use super::ConfigError;
use crate::window::parse_duration;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Parsed contents of a settings file.
///
/// Every field is optional; unset fields fall back to command-line values
/// or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Language qualifier for the search (e.g., "solidity").
    pub language: Option<String>,

    /// Look-back duration of the search window (e.g., "3h").
    pub window: Option<String>,

    /// Candidates need strictly more stars than this.
    pub min_stars: Option<u32>,

    /// Maximum weighted post length.
    pub max_length: Option<usize>,

    /// Maximum concurrent commit lookups.
    pub concurrency: Option<usize>,

    /// Handlebars template replacing the default announcement layout.
    pub message_template: Option<String>,

    /// File recording already announced repositories.
    pub history_file: Option<PathBuf>,

    /// GitHub API root (e.g., for GitHub Enterprise).
    pub github_api_url: Option<String>,

    /// Twitter API root.
    pub twitter_api_url: Option<String>,
}

impl Settings {
    /// Loads and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid field.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(invalid("language must not be empty".to_string()));
            }
        }

        if let Some(window) = &self.window {
            parse_duration(window).map_err(|e| invalid(format!("window: {e}")))?;
        }

        if self.max_length == Some(0) {
            return Err(invalid("max-length must be greater than 0".to_string()));
        }

        if self.concurrency == Some(0) {
            return Err(invalid("concurrency must be greater than 0".to_string()));
        }

        for (key, value) in [
            ("github-api-url", &self.github_api_url),
            ("twitter-api-url", &self.twitter_api_url),
        ] {
            if let Some(url) = value {
                if Url::parse(url).is_err() {
                    return Err(invalid(format!("{key} is not a valid URL: {url}")));
                }
            }
        }

        Ok(())
    }
}
