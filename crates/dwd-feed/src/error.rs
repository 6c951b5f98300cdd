//! Error types for dwd-feed.

use thiserror::Error;

/// Errors that can occur while fetching or parsing the warnings feed.
///
/// A fetch either yields a complete [`WarningFeed`](crate::WarningFeed) or one
/// of these; there is no partially populated result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Connecting, sending or reading the body failed.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The body is not valid UTF-8.
    #[error("Body is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The body is not wrapped as `callback(...)`.
    #[error("Malformed callback wrapper: {0}")]
    Unwrap(&'static str),

    /// The unwrapped text is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),

    /// The JSON document lacks a well-formed `warnings` mapping.
    #[error("Unexpected feed structure: {0}")]
    Schema(#[source] serde_json::Error),
}

impl FetchError {
    /// Short, stable label for the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Network(_) => "network",
            FetchError::Timeout => "timeout",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
            FetchError::Unwrap(_) => "unwrap",
            FetchError::Json(_) => "json",
            FetchError::Schema(_) => "schema",
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}
