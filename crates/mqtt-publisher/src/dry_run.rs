//! Dry-run publisher - records messages instead of sending them.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::error::PublishError;
use crate::publisher::{PublishReceipt, Publisher};

/// A publisher that never touches the network.
///
/// Every publish succeeds and is kept in memory so callers can see what would
/// have been sent.
#[derive(Debug, Default)]
pub struct DryRunPublisher {
    sent: Mutex<Vec<PublishReceipt>>,
}

impl DryRunPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, oldest first.
    pub fn sent(&self) -> Vec<PublishReceipt> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently recorded message.
    pub fn last(&self) -> Option<PublishReceipt> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> Result<PublishReceipt, PublishError> {
        info!(topic = %topic, payload = %payload, "Dry run: MQTT message not sent");

        let receipt = PublishReceipt {
            topic: topic.to_string(),
            payload: payload.to_string(),
            message_id: 0,
            dry_run: true,
        };
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(receipt.clone());

        Ok(receipt)
    }

    fn name(&self) -> &str {
        "DryRunPublisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_records_message() {
        let publisher = DryRunPublisher::new();

        let receipt = publisher.publish("W/abc/x", "{\"value\": 25}").await.unwrap();
        assert!(receipt.dry_run);
        assert_eq!(receipt.message_id, 0);

        assert_eq!(publisher.sent(), vec![receipt.clone()]);
        assert_eq!(publisher.last(), Some(receipt));
    }

    #[tokio::test]
    async fn test_dry_run_keeps_order() {
        let publisher = DryRunPublisher::new();
        publisher.publish("a", "1").await.unwrap();
        publisher.publish("b", "2").await.unwrap();

        let topics: Vec<_> = publisher.sent().into_iter().map(|r| r.topic).collect();
        assert_eq!(topics, vec!["a", "b"]);
    }

    #[test]
    fn test_name() {
        assert_eq!(DryRunPublisher::new().name(), "DryRunPublisher");
    }
}
