//! Run configuration built once from the command line.

use std::time::Duration;

use dwd_feed::FeedConfig;
use minsoc_policy::EvaluationContext;
use mqtt_publisher::{minsoc_topic, BrokerConfig};

use crate::annotation::GrafanaConfig;
use crate::args::Args;

/// Everything one run needs. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Victron GX serial number used in the topic.
    pub serial: String,
    pub feed_url: String,
    /// Region (WARNCELLID) to evaluate.
    pub region: String,
    pub feed: FeedConfig,
    pub broker: BrokerConfig,
    pub policy: EvaluationContext,
    pub grafana: Option<GrafanaConfig>,
    pub dry_run: bool,
}

impl RunConfig {
    /// Validate parsed arguments into a run configuration.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let serial = args.serial.trim().to_string();
        if serial.is_empty() {
            return Err(ConfigError::EmptySerial);
        }
        if serial.contains(&['/', '+', '#'][..]) {
            return Err(ConfigError::InvalidSerial(serial));
        }

        let region = args.region.trim().to_string();
        if region.is_empty() {
            return Err(ConfigError::EmptyRegion);
        }

        if args.alert_types.is_empty() {
            return Err(ConfigError::EmptyAlertSet("alert types"));
        }
        if args.alert_levels.is_empty() {
            return Err(ConfigError::EmptyAlertSet("alert levels"));
        }
        if args.buffer_mins < 0 {
            return Err(ConfigError::NegativeBuffer(args.buffer_mins));
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let timeout = Duration::from_secs(args.timeout_secs);

        let mut broker = BrokerConfig::new(args.broker, args.port);
        broker.client_id = args.client_id;
        broker.timeout = timeout;

        let policy = EvaluationContext::new(
            args.alert_types,
            args.alert_levels,
            args.buffer_mins.saturating_mul(60 * 1000),
        )
        .with_time_rule(args.time_rule);

        let grafana = args.grafana_url.map(|url| GrafanaConfig {
            url,
            dashboard: args.grafana_dashboard,
            panel: args.grafana_panel,
        });

        Ok(Self {
            serial,
            feed_url: args.url,
            region,
            feed: FeedConfig::with_timeout(timeout),
            broker,
            policy,
            grafana,
            dry_run: args.dry_run,
        })
    }

    /// MinimumSocLimit write topic for the configured device.
    pub fn topic(&self) -> String {
        minsoc_topic(&self.serial)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Victron serial number (-s) must not be empty")]
    EmptySerial,

    #[error("Victron serial number '{0}' contains MQTT wildcard or separator characters")]
    InvalidSerial(String),

    #[error("DWD region (-r) must not be empty")]
    EmptyRegion,

    #[error("At least one value is required for {0}")]
    EmptyAlertSet(&'static str),

    #[error("Buffer must not be negative, got {0} minutes")]
    NegativeBuffer(i64),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use minsoc_policy::{TimeRule, DEFAULT_BUFFER_MS};

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["minsoc-setter"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_from_default_args() {
        let config = RunConfig::from_args(parse(&["-s", "c0619ab12345"])).unwrap();

        assert_eq!(config.serial, "c0619ab12345");
        assert_eq!(config.region, "112069000");
        assert_eq!(config.broker.addr(), "127.0.0.1:1883");
        assert_eq!(config.broker.timeout, Duration::from_secs(30));
        assert_eq!(config.feed.timeout, Duration::from_secs(30));
        assert_eq!(config.policy, EvaluationContext::default());
        assert_eq!(config.policy.buffer_ms, DEFAULT_BUFFER_MS);
        assert!(config.grafana.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_topic() {
        let config = RunConfig::from_args(parse(&["-s", "c0619ab12345"])).unwrap();
        assert_eq!(
            config.topic(),
            "W/c0619ab12345/settings/0/Settings/CGwacs/BatteryLife/MinimumSocLimit"
        );
    }

    #[test]
    fn test_custom_policy() {
        let config = RunConfig::from_args(parse(&[
            "-s",
            "abc",
            "--buffer-mins",
            "30",
            "--alert-levels",
            "3,4,5",
            "--time-rule",
            "end-or-start",
            "--timeout-secs",
            "5",
        ]))
        .unwrap();

        assert_eq!(config.policy.buffer_ms, 30 * 60 * 1000);
        assert!(config.policy.alert_levels.contains(&3));
        assert_eq!(config.policy.time_rule, TimeRule::EndOrStart);
        assert_eq!(config.broker.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_grafana_enabled_by_url() {
        let config = RunConfig::from_args(parse(&[
            "-s",
            "abc",
            "--grafana-url",
            "http://grafana.local:3000/api/annotations",
            "--grafana-panel",
            "58",
        ]))
        .unwrap();

        let grafana = config.grafana.unwrap();
        assert_eq!(grafana.url, "http://grafana.local:3000/api/annotations");
        assert_eq!(grafana.panel.as_deref(), Some("58"));
        assert!(grafana.dashboard.is_none());
    }

    #[test]
    fn test_blank_serial_rejected() {
        let err = RunConfig::from_args(parse(&["-s", "  "])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySerial));
    }

    #[test]
    fn test_wildcard_serial_rejected() {
        let err = RunConfig::from_args(parse(&["-s", "abc/#"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSerial(_)));
    }

    #[test]
    fn test_negative_buffer_rejected() {
        let err = RunConfig::from_args(parse(&["-s", "abc", "--buffer-mins=-5"])).unwrap_err();
        assert!(matches!(err, ConfigError::NegativeBuffer(-5)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = RunConfig::from_args(parse(&["-s", "abc", "--timeout-secs", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }
}
