//! Error types for mqtt-publisher.

use thiserror::Error;

/// Errors that can occur while publishing to the broker.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker host refused the TCP connection.
    #[error("Connection refused by broker {addr}")]
    ConnectionRefused { addr: String },

    /// Connecting or publishing took longer than the configured timeout.
    #[error("Timed out talking to broker {addr}")]
    Timeout { addr: String },

    /// Socket or protocol failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The broker answered the connect with a non-success code.
    #[error("Broker rejected connection: {0}")]
    Rejected(String),

    /// The publish request could not be queued on the client.
    #[error("Publish request failed: {0}")]
    Client(#[from] rumqttc::ClientError),
}

impl PublishError {
    /// Short, stable label for the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::ConnectionRefused { .. } => "connection_refused",
            PublishError::Timeout { .. } => "timeout",
            PublishError::Transport(_) => "transport",
            PublishError::Rejected(_) => "rejected",
            PublishError::Client(_) => "client",
        }
    }
}
