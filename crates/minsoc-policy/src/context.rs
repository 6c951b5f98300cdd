//! Evaluation parameters.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Two hours, added after a warning's end and subtracted from its start.
pub const DEFAULT_BUFFER_MS: i64 = 2 * 60 * 60 * 1000;

/// How a qualifying warning's time window is tested against "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRule {
    /// Actionable while `end + buffer > now`.
    #[default]
    EndOnly,
    /// Actionable while `end + buffer > now` or `start - buffer > now`.
    ///
    /// The second clause also fires for warnings that lie entirely in the
    /// future. Kept selectable for installations that relied on it.
    EndOrStart,
}

impl TimeRule {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRule::EndOnly => "end-only",
            TimeRule::EndOrStart => "end-or-start",
        }
    }
}

impl fmt::Display for TimeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TimeRule`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time rule '{0}' (expected 'end-only' or 'end-or-start')")]
pub struct ParseTimeRuleError(String);

impl FromStr for TimeRule {
    type Err = ParseTimeRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end-only" | "end" => Ok(TimeRule::EndOnly),
            "end-or-start" | "legacy" => Ok(TimeRule::EndOrStart),
            other => Err(ParseTimeRuleError(other.to_string())),
        }
    }
}

/// Criteria a warning must meet to raise the reserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Warning type codes that qualify (0 = warning, 2 = update).
    pub alert_types: BTreeSet<i64>,
    /// Severity levels that qualify.
    pub alert_levels: BTreeSet<i64>,
    /// Margin in milliseconds around the warning window.
    pub buffer_ms: i64,
    pub time_rule: TimeRule,
}

impl EvaluationContext {
    pub fn new(
        alert_types: impl IntoIterator<Item = i64>,
        alert_levels: impl IntoIterator<Item = i64>,
        buffer_ms: i64,
    ) -> Self {
        Self {
            alert_types: alert_types.into_iter().collect(),
            alert_levels: alert_levels.into_iter().collect(),
            buffer_ms,
            time_rule: TimeRule::default(),
        }
    }

    pub fn with_time_rule(mut self, time_rule: TimeRule) -> Self {
        self.time_rule = time_rule;
        self
    }

    /// Whether a type/level pair meets the alert criteria.
    pub fn qualifies(&self, warning_type: i64, level: i64) -> bool {
        self.alert_types.contains(&warning_type) && self.alert_levels.contains(&level)
    }

    /// Whether a `[start, end]` window is still actionable at `now_ms`.
    ///
    /// Buffer arithmetic saturates, so extreme timestamps never overflow.
    pub fn is_actionable(&self, start: i64, end: i64, now_ms: i64) -> bool {
        let effective_end = end.saturating_add(self.buffer_ms);
        let effective_start = start.saturating_sub(self.buffer_ms);

        match self.time_rule {
            TimeRule::EndOnly => effective_end > now_ms,
            TimeRule::EndOrStart => effective_end > now_ms || effective_start > now_ms,
        }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new([0, 2], [4, 5], DEFAULT_BUFFER_MS)
    }
}
