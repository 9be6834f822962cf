//! Configuration loading.
//!
//! Settings come from an optional TOML file; credentials come from the
//! process environment (optionally seeded from a `.env` file by the CLI).

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;

use crate::publish::OAuthCredentials;

/// Environment variable holding the Twitter consumer key.
pub const ENV_TWITTER_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
/// Environment variable holding the Twitter consumer secret.
pub const ENV_TWITTER_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
/// Environment variable holding the Twitter access token.
pub const ENV_TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// Environment variable holding the Twitter access secret.
pub const ENV_TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";

/// Assembles Twitter credentials, treating unset and empty values alike.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] naming the first missing value.
pub fn twitter_credentials(
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    access_token: Option<String>,
    access_secret: Option<String>,
) -> Result<OAuthCredentials, ConfigError> {
    fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingCredential { name })
    }

    Ok(OAuthCredentials {
        consumer_key: required(consumer_key, ENV_TWITTER_CONSUMER_KEY)?,
        consumer_secret: required(consumer_secret, ENV_TWITTER_CONSUMER_SECRET)?,
        access_token: required(access_token, ENV_TWITTER_ACCESS_TOKEN)?,
        access_secret: required(access_secret, ENV_TWITTER_ACCESS_SECRET)?,
    })
}

/// Reads Twitter credentials from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] naming the first missing variable.
pub fn twitter_credentials_from_env() -> Result<OAuthCredentials, ConfigError> {
    twitter_credentials(
        std::env::var(ENV_TWITTER_CONSUMER_KEY).ok(),
        std::env::var(ENV_TWITTER_CONSUMER_SECRET).ok(),
        std::env::var(ENV_TWITTER_ACCESS_TOKEN).ok(),
        std::env::var(ENV_TWITTER_ACCESS_SECRET).ok(),
    )
}
