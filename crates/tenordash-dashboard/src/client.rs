//! HTTP client for the rankings endpoint.
//!
//! The endpoint reports failures inside the JSON body, so the body is parsed
//! whatever the HTTP status and `success: false` is surfaced as
//! [`ClientError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tenordash_core::RankingsResponse;

use crate::error::ClientError;

const DEFAULT_FAILURE_MESSAGE: &str = "Failed to fetch data";

/// Anything that can answer a rankings request for the dashboard.
#[async_trait]
pub trait RankingsFetcher: Send + Sync {
    /// Returns the successful envelope for `username`.
    ///
    /// # Errors
    ///
    /// Any transport failure or `success: false` answer.
    async fn fetch_rankings(&self, username: &str) -> Result<RankingsResponse, ClientError>;
}

/// Client for a `tenordash-server` instance.
///
/// Use [`RankingsClient::new`] with the server's base URL; tests point it at
/// a wiremock server.
#[derive(Debug, Clone)]
pub struct RankingsClient {
    client: Client,
    base_url: Url,
}

impl RankingsClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tenordash/0.1 (gif-rankings)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn rankings_url(&self, username: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("rankings")?;
        url.query_pairs_mut().append_pair("username", username);
        Ok(url)
    }

    /// Returns `true` when the server reports its document store healthy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the server cannot be reached.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = self.endpoint("health")?;
        let response = self.client.get(url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl RankingsFetcher for RankingsClient {
    async fn fetch_rankings(&self, username: &str) -> Result<RankingsResponse, ClientError> {
        let url = self.rankings_url(username)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: RankingsResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                })
            }
            Err(source) => {
                return Err(ClientError::Deserialize {
                    context: url.to_string(),
                    source,
                })
            }
        };

        if !envelope.success {
            let message = envelope
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(ClientError::Api(message));
        }

        tracing::debug!(
            username,
            count = envelope.rankings.len(),
            "fetched rankings"
        );
        Ok(envelope)
    }
}
