//! One fetch, evaluate, publish pass.

use chrono::{DateTime, Utc};
use dwd_feed::{FeedClient, FetchError, FetchFeed, WarningFeed};
use minsoc_policy::{evaluate_with_reason, Decision, Reason};
use mqtt_publisher::{DryRunPublisher, MqttPublisher, PublishError, PublishReceipt, Publisher};
use tracing::{debug, info, warn};

use crate::annotation::{Annotate, GrafanaAnnotator};
use crate::config::RunConfig;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub decision: Decision,
    pub reason: Reason,
    pub receipt: PublishReceipt,
    /// Whether the feed was fetched and parsed.
    pub feed_available: bool,
}

/// Current time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Run the pipeline with the given collaborators.
///
/// A failed fetch is logged and treated as "no warning", so the normal
/// reserve is still published. Exactly one publish is attempted; its failure
/// is returned. Annotation is best-effort and never fails the run.
pub async fn run(
    config: &RunConfig,
    now_ms: i64,
    fetcher: &dyn FetchFeed,
    publisher: &dyn Publisher,
    annotator: Option<&dyn Annotate>,
) -> Result<RunOutcome, PublishError> {
    let feed = match fetcher.fetch_feed(&config.feed_url).await {
        Ok(feed) => Some(feed),
        Err(e) => {
            log_missing_feed(config, &e);
            None
        }
    };

    decide_and_publish(config, now_ms, feed, publisher, annotator).await
}

fn log_missing_feed(config: &RunConfig, e: &FetchError) {
    warn!(
        url = %config.feed_url,
        kind = e.kind(),
        error = %e,
        "Failed to fetch DWD warnings, assuming no warning"
    );
}

async fn decide_and_publish(
    config: &RunConfig,
    now_ms: i64,
    feed: Option<WarningFeed>,
    publisher: &dyn Publisher,
    annotator: Option<&dyn Annotate>,
) -> Result<RunOutcome, PublishError> {
    let evaluation = evaluate_with_reason(feed.as_ref(), &config.region, now_ms, &config.policy);

    if let Some(entry) = evaluation.entry {
        debug!(
            event = ?entry.event,
            headline = ?entry.headline,
            start = ?entry.start.map(format_ms),
            end = ?entry.end.map(format_ms),
            "First warning for region"
        );
    }

    info!(
        region = %config.region,
        decision = %evaluation.decision,
        reason = evaluation.reason.as_str(),
        "Determined MinSoc"
    );

    let topic = config.topic();
    debug!(
        publisher = publisher.name(),
        broker = %config.broker.addr(),
        topic = %topic,
        payload = evaluation.decision.payload(),
        dry_run = config.dry_run,
        "Publishing MinSoc"
    );
    let receipt = publisher
        .publish(&topic, evaluation.decision.payload())
        .await?;

    if evaluation.decision.is_elevated() && !config.dry_run {
        if let (Some(annotator), Some(entry)) = (annotator, evaluation.entry) {
            match annotator.annotate(entry).await {
                Ok(()) => debug!("Grafana annotation posted"),
                Err(e) => warn!(error = %e, "Grafana annotation failed"),
            }
        }
    }

    Ok(RunOutcome {
        decision: evaluation.decision,
        reason: evaluation.reason,
        receipt,
        feed_available: feed.is_some(),
    })
}

/// Build the real collaborators from `config` and run once.
///
/// A feed client that cannot be built counts as a failed fetch: the normal
/// reserve is still published.
pub async fn run_with_config(config: &RunConfig) -> Result<RunOutcome, PublishError> {
    let fetcher = FeedClient::new(config.feed.clone());

    let publisher: Box<dyn Publisher> = if config.dry_run {
        Box::new(DryRunPublisher::new())
    } else {
        Box::new(MqttPublisher::new(config.broker.clone()))
    };

    let annotator = match &config.grafana {
        Some(grafana) if !config.dry_run => {
            match GrafanaAnnotator::new(grafana.clone(), config.feed.timeout) {
                Ok(annotator) => Some(annotator),
                Err(e) => {
                    warn!(error = %e, "Grafana annotation disabled");
                    None
                }
            }
        }
        _ => None,
    };

    let annotator = annotator.as_ref().map(|a| a as &dyn Annotate);

    match fetcher {
        Ok(fetcher) => run(config, now_ms(), &fetcher, publisher.as_ref(), annotator).await,
        Err(e) => {
            log_missing_feed(config, &e);
            decide_and_publish(config, now_ms(), None, publisher.as_ref(), annotator).await
        }
    }
}
