//! Configuration types for mqtt-publisher.

use std::time::Duration;

/// Default MQTT client identifier.
pub const DEFAULT_CLIENT_ID: &str = "dwd_victron_minsoc_setter";

/// Connection settings for the MQTT broker.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker host name or IP address.
    pub host: String,
    /// Broker TCP port.
    pub port: u16,
    pub client_id: String,
    pub keep_alive: Duration,
    /// Upper bound for connecting and handing off one publish.
    pub timeout: Duration,
}

impl BrokerConfig {
    /// Create a configuration for the given broker address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// `host:port`, for log and error messages.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1883,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            keep_alive: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
        }
    }
}
