//! Warning feed document types.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FetchError;
use crate::jsonp::unwrap_callback;

/// A parsed warnings document.
///
/// Maps a region identifier (WARNCELLID) to the warnings currently listed for
/// it, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarningFeed {
    pub warnings: HashMap<String, Vec<WarningEntry>>,
    /// Generation time of the document in epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
}

/// A single warning for one region.
///
/// Only `type`, `level`, `start` and `end` drive decisions. Every field is
/// optional and a value of the wrong type reads as absent, so one odd entry
/// cannot invalidate the warnings of every other region. `end` is genuinely
/// `null` for open-ended warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningEntry {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub warning_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub level: Option<i64>,
    /// Start of the warning in epoch milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<i64>,
    /// End of the warning in epoch milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instruction: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub state_short: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub altitude_start: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub altitude_end: Option<i64>,
}

/// Read a field as `Some` only when it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl WarningFeed {
    /// Parse an unwrapped JSON document.
    ///
    /// Invalid JSON is reported as [`FetchError::Json`]; valid JSON that does
    /// not carry a `warnings` mapping of entry objects is [`FetchError::Schema`].
    pub fn from_json(text: &str) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(FetchError::Json)?;
        serde_json::from_value(value).map_err(FetchError::Schema)
    }

    /// Strip the callback wrapper from a raw feed body and parse the result.
    pub fn from_callback_body(body: &str) -> Result<Self, FetchError> {
        Self::from_json(unwrap_callback(body)?)
    }

    /// All warnings listed for a region, or `None` if the region is absent.
    pub fn region(&self, region: &str) -> Option<&[WarningEntry]> {
        self.warnings.get(region).map(Vec::as_slice)
    }

    /// The first warning listed for a region.
    pub fn first_entry(&self, region: &str) -> Option<&WarningEntry> {
        self.region(region).and_then(|entries| entries.first())
    }

    /// Number of regions with at least one listed warning.
    pub fn active_regions(&self) -> usize {
        self.warnings.values().filter(|entries| !entries.is_empty()).count()
    }
}

impl WarningEntry {
    /// The stated `(start, end)` window, if both bounds are present.
    pub fn window(&self) -> Option<(i64, i64)> {
        Some((self.start?, self.end?))
    }
}
