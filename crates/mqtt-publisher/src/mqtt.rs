//! rumqttc-backed publisher.

use std::io;

use async_trait::async_trait;
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use tracing::{debug, info, warn};

use crate::config::BrokerConfig;
use crate::error::PublishError;
use crate::publisher::{PublishReceipt, Publisher};

/// Publishes over a fresh MQTT connection per call.
///
/// Each publish connects, hands one QoS 0 message to the broker and
/// disconnects. Nothing is retained between calls.
#[derive(Debug, Clone)]
pub struct MqttPublisher {
    config: BrokerConfig,
}

impl MqttPublisher {
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(
            self.config.client_id.clone(),
            self.config.host.clone(),
            self.config.port,
        );
        options.set_keep_alive(self.config.keep_alive);
        options
    }

    /// Drive the event loop until the queued publish has been written out.
    async fn drive_until_published(&self, eventloop: &mut EventLoop) -> Result<u16, PublishError> {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    debug!(code = ?ack.code, "Broker acknowledged connection");
                }
                Ok(Event::Outgoing(Outgoing::Publish(pkid))) => return Ok(pkid),
                Ok(event) => debug!(?event, "MQTT event"),
                Err(e) => return Err(self.map_connection_error(e)),
            }
        }
    }

    /// Send DISCONNECT and wait briefly for it to go out.
    async fn disconnect(&self, client: &AsyncClient, eventloop: &mut EventLoop) {
        if let Err(e) = client.disconnect().await {
            debug!("Disconnect request failed: {}", e);
            return;
        }

        let drained = tokio::time::timeout(self.config.timeout, async {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        debug!("Connection closed during disconnect: {}", e);
                        break;
                    }
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!(broker = %self.config.addr(), "Disconnect did not complete in time");
        }
    }

    fn map_connection_error(&self, err: ConnectionError) -> PublishError {
        let addr = self.config.addr();
        match err {
            ConnectionError::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                PublishError::ConnectionRefused { addr }
            }
            ConnectionError::Io(e) if e.kind() == io::ErrorKind::TimedOut => {
                PublishError::Timeout { addr }
            }
            ConnectionError::NetworkTimeout => PublishError::Timeout { addr },
            ConnectionError::ConnectionRefused(code) => {
                PublishError::Rejected(format!("{:?}", code))
            }
            other => PublishError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> Result<PublishReceipt, PublishError> {
        let addr = self.config.addr();
        debug!(broker = %addr, topic = %topic, payload = %payload, "Preparing MQTT publish");

        let (client, mut eventloop) = AsyncClient::new(self.options(), 10);
        client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await?;

        let message_id = tokio::time::timeout(
            self.config.timeout,
            self.drive_until_published(&mut eventloop),
        )
        .await
        .map_err(|_| PublishError::Timeout { addr: addr.clone() })??;

        info!(broker = %addr, topic = %topic, mid = message_id, "Published MQTT message");

        self.disconnect(&client, &mut eventloop).await;

        Ok(PublishReceipt {
            topic: topic.to_string(),
            payload: payload.to_string(),
            message_id,
            dry_run: false,
        })
    }

    fn name(&self) -> &str {
        "MqttPublisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_options_from_config() {
        let publisher = MqttPublisher::new(BrokerConfig::new("venus.local", 1884));
        let options = publisher.options();
        assert_eq!(options.broker_address(), ("venus.local".to_string(), 1884));
        assert_eq!(options.client_id(), "dwd_victron_minsoc_setter");
        assert_eq!(options.keep_alive(), Duration::from_secs(60));
    }

    #[test]
    fn test_map_refused_connect_code() {
        let publisher = MqttPublisher::new(BrokerConfig::default());
        let err = publisher.map_connection_error(ConnectionError::ConnectionRefused(
            rumqttc::ConnectReturnCode::NotAuthorized,
        ));
        assert!(matches!(err, PublishError::Rejected(ref code) if code == "NotAuthorized"));
    }

    #[test]
    fn test_map_io_errors() {
        let publisher = MqttPublisher::new(BrokerConfig::default());

        let refused = publisher.map_connection_error(ConnectionError::Io(io::Error::from(
            io::ErrorKind::ConnectionRefused,
        )));
        assert!(matches!(refused, PublishError::ConnectionRefused { .. }));

        let reset = publisher.map_connection_error(ConnectionError::Io(io::Error::from(
            io::ErrorKind::ConnectionReset,
        )));
        assert_eq!(reset.kind(), "transport");
    }
}
