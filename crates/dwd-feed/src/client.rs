//! HTTP client for the warnings feed.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::error::FetchError;
use crate::types::WarningFeed;

/// Source of a parsed warnings feed.
///
/// Implemented by [`FeedClient`]; callers that only need "give me the feed
/// behind this URL" depend on this trait so the transport can be swapped.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    /// Fetch and parse the feed at `url`.
    async fn fetch_feed(&self, url: &str) -> Result<WarningFeed, FetchError>;
}

/// Client for downloading the DWD warnings feed.
///
/// Performs exactly one GET per call; retries are left to the caller.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new client.
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch the raw feed body at `url` and parse it into a [`WarningFeed`].
    pub async fn fetch(&self, url: &str) -> Result<WarningFeed, FetchError> {
        let body = self.fetch_body(url).await?;
        let feed = WarningFeed::from_callback_body(&body)?;

        info!(
            url = %url,
            regions = feed.active_regions(),
            "Fetched warnings feed"
        );
        Ok(feed)
    }

    /// Download the body at `url` as UTF-8 text.
    pub async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching warnings feed from: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(FetchError::from_transport)?;
        debug!(bytes = bytes.len(), "Received feed body");

        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[async_trait]
impl FetchFeed for FeedClient {
    async fn fetch_feed(&self, url: &str) -> Result<WarningFeed, FetchError> {
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_keeps_config() {
        let client = FeedClient::new(FeedConfig::with_timeout(Duration::from_secs(3))).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_user_agent_is_client_error() {
        let config = FeedConfig {
            user_agent: "dwd\nfeed".to_string(),
            ..FeedConfig::default()
        };
        let err = FeedClient::new(config).err().unwrap();
        assert_eq!(err.kind(), "client");
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let client = FeedClient::new(FeedConfig::default()).unwrap();
        let err = client.fetch("not a url").await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    // Requires network access to dwd.de
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_fetch_live_feed() {
        let client = FeedClient::new(FeedConfig::default()).unwrap();
        let feed = client.fetch(crate::DEFAULT_FEED_URL).await.unwrap();
        assert!(feed.time.is_some());
    }
}
