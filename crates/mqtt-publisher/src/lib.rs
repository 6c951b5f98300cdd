//! MQTT publishing for Victron Venus OS settings.
//!
//! This crate provides the one side effect of a run: writing a value to a
//! Venus OS setting through the local MQTT broker. It supports:
//!
//! - A real publisher backed by `rumqttc` ([`MqttPublisher`])
//! - A dry-run publisher that records instead of sending ([`DryRunPublisher`])
//! - Topic construction for the MinimumSocLimit setting ([`minsoc_topic`])
//!
//! # Example
//!
//! ```no_run
//! use mqtt_publisher::{minsoc_topic, BrokerConfig, MqttPublisher, Publisher};
//!
//! # async fn example() -> Result<(), mqtt_publisher::PublishError> {
//! let publisher = MqttPublisher::new(BrokerConfig::default());
//! let receipt = publisher
//!     .publish(&minsoc_topic("c0619ab12345"), r#"{"value": 50}"#)
//!     .await?;
//! println!("Published to {} (mid {})", receipt.topic, receipt.message_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dry_run;
pub mod error;
pub mod mqtt;
pub mod publisher;
pub mod topic;

pub use config::BrokerConfig;
pub use dry_run::DryRunPublisher;
pub use error::PublishError;
pub use mqtt::MqttPublisher;
pub use publisher::{PublishReceipt, Publisher};
pub use topic::minsoc_topic;
