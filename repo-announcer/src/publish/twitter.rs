//! Twitter/X publisher.

use super::oauth::{authorization_header, OAuthCredentials};
use super::{PublishError, PublishedPost, Publisher};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default Twitter API root.
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Publishes posts through the Twitter v2 `POST /2/tweets` endpoint.
pub struct TwitterPublisher {
    client: reqwest::Client,
    credentials: OAuthCredentials,
    endpoint: String,
}

impl TwitterPublisher {
    /// Creates a publisher for the given API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: OAuthCredentials, api_url: &str) -> Result<Self, PublishError> {
        crate::tls::install_crypto_provider();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            credentials,
            endpoint: format!("{}/2/tweets", api_url.trim_end_matches('/')),
        })
    }

    /// URL posts are submitted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Deserialize)]
struct CreatedPost {
    id: String,
}

#[async_trait]
impl Publisher for TwitterPublisher {
    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn publish(&self, message: &str) -> Result<PublishedPost, PublishError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = authorization_header(
            &self.credentials,
            "POST",
            &self.endpoint,
            &[],
            &nonce,
            timestamp,
        )?;

        debug!(endpoint = %self.endpoint, "Submitting post");
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, concat!("repo-announcer/", env!("CARGO_PKG_VERSION")))
            .json(&CreatePost { text: message })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let reset_at = response
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(PublishError::RateLimited { reset_at });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatePostResponse = response.json().await?;
        info!(post_id = %created.data.id, "Post created");
        Ok(PublishedPost {
            id: Some(created.data.id),
        })
    }
}
