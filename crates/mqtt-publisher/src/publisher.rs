//! The Publisher trait definition.

use async_trait::async_trait;

use crate::error::PublishError;

/// Confirmation of a single publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub topic: String,
    pub payload: String,
    /// Packet identifier assigned to the message (always 0 at QoS 0).
    pub message_id: u16,
    /// True if nothing was actually sent.
    pub dry_run: bool,
}

/// Something that can deliver a payload to a topic.
///
/// Each call is one publish attempt; connection handling is the
/// implementation's business. The result is returned directly rather than
/// through a callback.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `payload` to `topic`.
    async fn publish(&self, topic: &str, payload: &str) -> Result<PublishReceipt, PublishError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}
