//! Grafana annotations for elevated-reserve periods.

use std::time::Duration;

use async_trait::async_trait;
use dwd_feed::WarningEntry;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Text used when the warning carries no description.
pub const DEFAULT_ANNOTATION_TEXT: &str = "DWD Warning";

/// Where to post annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrafanaConfig {
    /// Annotations endpoint, e.g. `http://grafana:3000/api/annotations`.
    pub url: String,
    pub dashboard: Option<String>,
    pub panel: Option<String>,
}

/// Errors from posting an annotation.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Grafana answered with a non-2xx status.
    #[error("Grafana returned status {0}")]
    Status(u16),

    /// The warning has no complete time window to annotate.
    #[error("warning has no start/end time")]
    MissingWindow,
}

/// Marks a warning on a dashboard.
#[async_trait]
pub trait Annotate: Send + Sync {
    async fn annotate(&self, entry: &WarningEntry) -> Result<(), AnnotationError>;
}

/// Form fields for one annotation, or `None` if the warning lacks a window.
pub fn annotation_form(
    config: &GrafanaConfig,
    entry: &WarningEntry,
) -> Option<Vec<(&'static str, String)>> {
    let (start, end) = entry.window()?;

    let mut form = Vec::with_capacity(5);
    if let Some(dashboard) = &config.dashboard {
        form.push(("dashboardId", dashboard.clone()));
    }
    if let Some(panel) = &config.panel {
        form.push(("panelId", panel.clone()));
    }
    form.push(("time", start.to_string()));
    form.push(("timeEnd", end.to_string()));
    form.push((
        "text",
        entry
            .description
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_ANNOTATION_TEXT.to_string()),
    ));

    Some(form)
}

/// Posts form-encoded annotations to Grafana.
#[derive(Clone)]
pub struct GrafanaAnnotator {
    http: Client,
    config: GrafanaConfig,
}

impl GrafanaAnnotator {
    pub fn new(config: GrafanaConfig, timeout: Duration) -> Result<Self, AnnotationError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Annotate for GrafanaAnnotator {
    async fn annotate(&self, entry: &WarningEntry) -> Result<(), AnnotationError> {
        let form = annotation_form(&self.config, entry).ok_or(AnnotationError::MissingWindow)?;
        debug!(url = %self.config.url, "Posting Grafana annotation");

        let response = self.http.post(&self.config.url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(AnnotationError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}
