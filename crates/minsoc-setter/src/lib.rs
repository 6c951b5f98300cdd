//! Raise a Victron ESS minimum state of charge during severe weather.
//!
//! Each run fetches the DWD warnings feed, evaluates the first warning for
//! the configured region and publishes the resulting MinimumSocLimit value
//! over MQTT. Runs are independent; schedule them externally (cron, systemd
//! timer).

pub mod annotation;
pub mod args;
pub mod config;
pub mod pipeline;

pub use annotation::{Annotate, AnnotationError, GrafanaAnnotator, GrafanaConfig};
pub use args::Args;
pub use config::{ConfigError, RunConfig};
pub use pipeline::{run, run_with_config, RunOutcome};
