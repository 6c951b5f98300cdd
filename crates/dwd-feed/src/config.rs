//! Configuration types for dwd-feed.

use std::time::Duration;

/// Public DWD warnings endpoint.
pub const DEFAULT_FEED_URL: &str = "https://www.dwd.de/DWD/warnungen/warnapp/json/warnings.json";

/// Configuration for the HTTP side of the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Upper bound for the whole request, including reading the body.
    pub timeout: Duration,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl FeedConfig {
    /// Create a configuration with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("dwd-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
