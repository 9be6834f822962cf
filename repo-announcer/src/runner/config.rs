//! Runner configuration.

use crate::config::Settings;
use crate::filter::DEFAULT_MIN_STARS;
use crate::publish::{OAuthCredentials, DEFAULT_TWITTER_API_URL};
use crate::templates::DEFAULT_MAX_LENGTH;
use std::path::{Path, PathBuf};

/// Language searched when none is configured.
pub const DEFAULT_LANGUAGE: &str = "solidity";

/// Search window used when none is configured.
pub const DEFAULT_WINDOW: &str = "3h";

/// Configuration for a single announcement run.
#[derive(Clone)]
pub struct RunnerConfig {
    /// Language qualifier for the search.
    language: String,
    /// Look-back duration of the search window.
    window: String,
    /// Candidates need strictly more stars than this.
    min_stars: u32,
    /// Maximum weighted post length.
    max_length: usize,
    /// Maximum concurrent commit lookups.
    concurrency: usize,
    /// Custom announcement template.
    message_template: Option<String>,
    /// File recording already announced repositories.
    history_path: Option<PathBuf>,
    /// Whether to preview posts instead of publishing.
    dry_run: bool,
    /// GitHub token; unauthenticated access when absent.
    github_token: Option<String>,
    /// GitHub API root override.
    github_api_url: Option<String>,
    /// Twitter user credentials.
    twitter_credentials: Option<OAuthCredentials>,
    /// Twitter API root.
    twitter_api_url: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_WINDOW)
    }
}

impl RunnerConfig {
    /// Creates a configuration searching `language` over `window`.
    pub fn new(language: impl Into<String>, window: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            window: window.into(),
            min_stars: DEFAULT_MIN_STARS,
            max_length: DEFAULT_MAX_LENGTH,
            concurrency: 1,
            message_template: None,
            history_path: None,
            dry_run: false,
            github_token: None,
            github_api_url: None,
            twitter_credentials: None,
            twitter_api_url: DEFAULT_TWITTER_API_URL.to_string(),
        }
    }

    /// Creates a configuration from a settings file, using defaults for
    /// unset values.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut config = Self::new(
            settings.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
            settings.window.as_deref().unwrap_or(DEFAULT_WINDOW),
        );
        if let Some(min_stars) = settings.min_stars {
            config.min_stars = min_stars;
        }
        if let Some(max_length) = settings.max_length {
            config.max_length = max_length;
        }
        if let Some(concurrency) = settings.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(url) = &settings.twitter_api_url {
            config.twitter_api_url = url.clone();
        }
        config.message_template = settings.message_template.clone();
        config.history_path = settings.history_file.clone();
        config.github_api_url = settings.github_api_url.clone();
        config
    }

    /// Sets the search language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the search window duration.
    #[must_use]
    pub fn with_window(mut self, window: impl Into<String>) -> Self {
        self.window = window.into();
        self
    }

    /// Sets the star threshold.
    #[must_use]
    pub fn with_min_stars(mut self, min_stars: u32) -> Self {
        self.min_stars = min_stars;
        self
    }

    /// Sets the maximum post length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the maximum concurrent commit lookups.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets a custom announcement template.
    #[must_use]
    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = Some(template.into());
        self
    }

    /// Enables the announcement history stored at `path`.
    #[must_use]
    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history_path = Some(path);
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the GitHub token.
    #[must_use]
    pub fn with_github_token(mut self, token: Option<String>) -> Self {
        self.github_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Overrides the GitHub API root.
    #[must_use]
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = Some(url.into());
        self
    }

    /// Sets the Twitter credentials.
    #[must_use]
    pub fn with_twitter_credentials(mut self, credentials: Option<OAuthCredentials>) -> Self {
        self.twitter_credentials = credentials;
        self
    }

    /// Overrides the Twitter API root.
    #[must_use]
    pub fn with_twitter_api_url(mut self, url: impl Into<String>) -> Self {
        self.twitter_api_url = url.into();
        self
    }

    /// Returns the search language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the search window duration.
    pub fn window(&self) -> &str {
        &self.window
    }

    /// Returns the star threshold.
    pub fn min_stars(&self) -> u32 {
        self.min_stars
    }

    /// Returns the maximum post length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the maximum concurrent commit lookups.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the custom announcement template.
    pub fn message_template(&self) -> Option<&str> {
        self.message_template.as_deref()
    }

    /// Returns the history file path.
    pub fn history_path(&self) -> Option<&Path> {
        self.history_path.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the GitHub token.
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    /// Returns the GitHub API root override.
    pub fn github_api_url(&self) -> Option<&str> {
        self.github_api_url.as_deref()
    }

    /// Returns the Twitter credentials.
    pub fn twitter_credentials(&self) -> Option<&OAuthCredentials> {
        self.twitter_credentials.as_ref()
    }

    /// Returns the Twitter API root.
    pub fn twitter_api_url(&self) -> &str {
        &self.twitter_api_url
    }
}
