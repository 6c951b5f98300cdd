use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use minsoc_setter::{run_with_config, Args, RunConfig};

const VERBOSE_FILTER: &str =
    "info,minsoc_setter=debug,dwd_feed=debug,minsoc_policy=debug,mqtt_publisher=debug";

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!(?config, "Configuration loaded");

    match run_with_config(&config).await {
        Ok(outcome) => {
            info!(
                decision = %outcome.decision,
                topic = %outcome.receipt.topic,
                dry_run = outcome.receipt.dry_run,
                "Run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                broker = %config.broker.addr(),
                kind = e.kind(),
                "Failed to publish MinSoc: {}",
                e
            );
            ExitCode::FAILURE
        }
    }
}
