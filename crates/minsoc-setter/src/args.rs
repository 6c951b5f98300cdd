//! Command-line arguments.

use clap::Parser;
use dwd_feed::DEFAULT_FEED_URL;
use minsoc_policy::TimeRule;
use mqtt_publisher::config::DEFAULT_CLIENT_ID;

/// Potsdam-Mittelmark.
pub const DEFAULT_REGION: &str = "112069000";

#[derive(Debug, Clone, Parser)]
#[command(name = "minsoc-setter", version)]
#[command(about = "Raise the Victron ESS minimum SoC while a severe DWD warning is active")]
pub struct Args {
    /// Victron GX serial number (portal ID)
    #[arg(short = 's', long, env = "MINSOC_SERIAL")]
    pub serial: String,

    /// MQTT broker host
    #[arg(short = 'b', long, env = "MINSOC_BROKER", default_value = "127.0.0.1")]
    pub broker: String,

    /// MQTT broker port
    #[arg(short = 'p', long, env = "MINSOC_PORT", default_value_t = 1883)]
    pub port: u16,

    /// DWD warnings.json URL
    #[arg(short = 'u', long, env = "MINSOC_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub url: String,

    /// DWD region (WARNCELLID)
    #[arg(short = 'r', long, env = "MINSOC_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Verbose logging
    #[arg(short = 'v', long, env = "MINSOC_VERBOSE")]
    pub verbose: bool,

    /// Decide and log, but do not send the MQTT message
    #[arg(short = 'n', long, env = "MINSOC_DRY_RUN")]
    pub dry_run: bool,

    /// Warning types that raise the reserve
    #[arg(
        long,
        env = "MINSOC_ALERT_TYPES",
        value_delimiter = ',',
        default_values_t = [0i64, 2]
    )]
    pub alert_types: Vec<i64>,

    /// Warning levels that raise the reserve
    #[arg(
        long,
        env = "MINSOC_ALERT_LEVELS",
        value_delimiter = ',',
        default_values_t = [4i64, 5]
    )]
    pub alert_levels: Vec<i64>,

    /// Minutes added after (and subtracted before) a warning window
    #[arg(long, env = "MINSOC_BUFFER_MINS", default_value_t = 120)]
    pub buffer_mins: i64,

    /// Time rule: end-only or end-or-start
    #[arg(long, env = "MINSOC_TIME_RULE", default_value = "end-only")]
    pub time_rule: TimeRule,

    /// Timeout in seconds for the feed request and for the MQTT publish
    #[arg(long, env = "MINSOC_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// MQTT client identifier
    #[arg(long, env = "MINSOC_CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
    pub client_id: String,

    /// Grafana annotations endpoint; annotation is disabled when unset
    #[arg(long, env = "MINSOC_GRAFANA_URL")]
    pub grafana_url: Option<String>,

    /// Grafana dashboard to annotate
    #[arg(long, env = "MINSOC_GRAFANA_DASHBOARD")]
    pub grafana_dashboard: Option<String>,

    /// Grafana panel to annotate
    #[arg(long, env = "MINSOC_GRAFANA_PANEL")]
    pub grafana_panel: Option<String>,
}
