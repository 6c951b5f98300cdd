//! Warning evaluation.

use dwd_feed::{WarningEntry, WarningFeed};
use tracing::debug;

use crate::context::EvaluationContext;
use crate::decision::Decision;

/// Why an evaluation ended with its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// No feed could be obtained.
    NoFeed,
    /// The region is not listed in the feed.
    RegionAbsent,
    /// The region is listed with an empty warning list.
    NoEntries,
    /// The first warning's type or level does not meet the criteria.
    NotQualifying,
    /// The first warning qualifies but lacks a start or end time.
    MissingWindow,
    /// The first warning qualifies but its buffered window has passed.
    Expired,
    /// The first warning qualifies and is still actionable.
    Active,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::NoFeed => "no_feed",
            Reason::RegionAbsent => "region_absent",
            Reason::NoEntries => "no_entries",
            Reason::NotQualifying => "not_qualifying",
            Reason::MissingWindow => "missing_window",
            Reason::Expired => "expired",
            Reason::Active => "active",
        }
    }
}

/// Result of evaluating one region.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    pub decision: Decision,
    pub reason: Reason,
    /// The warning that was inspected, if the region had one.
    pub entry: Option<&'a WarningEntry>,
}

impl<'a> Evaluation<'a> {
    fn normal(reason: Reason, entry: Option<&'a WarningEntry>) -> Self {
        Self {
            decision: Decision::Normal,
            reason,
            entry,
        }
    }
}

/// Decide the reserve level for `region` at `now_ms`.
pub fn evaluate(
    feed: Option<&WarningFeed>,
    region: &str,
    now_ms: i64,
    ctx: &EvaluationContext,
) -> Decision {
    evaluate_with_reason(feed, region, now_ms, ctx).decision
}

/// Like [`evaluate`], but also reports why and which warning was inspected.
///
/// Only the first listed warning is considered; the feed is trusted to list
/// the most relevant one first.
pub fn evaluate_with_reason<'a>(
    feed: Option<&'a WarningFeed>,
    region: &str,
    now_ms: i64,
    ctx: &EvaluationContext,
) -> Evaluation<'a> {
    let Some(feed) = feed else {
        debug!("No warning data available");
        return Evaluation::normal(Reason::NoFeed, None);
    };

    let Some(entries) = feed.region(region) else {
        debug!(region = %region, "No warning listed for region");
        return Evaluation::normal(Reason::RegionAbsent, None);
    };

    let Some(entry) = entries.first() else {
        debug!(region = %region, "Region listed without warnings");
        return Evaluation::normal(Reason::NoEntries, None);
    };

    debug!(
        region = %region,
        warning_type = ?entry.warning_type,
        level = ?entry.level,
        start = ?entry.start,
        end = ?entry.end,
        "Inspecting first warning"
    );

    let qualifies = matches!(
        (entry.warning_type, entry.level),
        (Some(warning_type), Some(level)) if ctx.qualifies(warning_type, level)
    );
    if !qualifies {
        debug!(region = %region, "Warning does not meet alert criteria");
        return Evaluation::normal(Reason::NotQualifying, Some(entry));
    }

    let Some((start, end)) = entry.window() else {
        debug!(region = %region, "Qualifying warning has no complete time window");
        return Evaluation::normal(Reason::MissingWindow, Some(entry));
    };

    if ctx.is_actionable(start, end, now_ms) {
        debug!(region = %region, rule = %ctx.time_rule, "Alert conditions met");
        Evaluation {
            decision: Decision::Elevated,
            reason: Reason::Active,
            entry: Some(entry),
        }
    } else {
        debug!(region = %region, rule = %ctx.time_rule, "Warning window has passed");
        Evaluation::normal(Reason::Expired, Some(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TimeRule;

    const REGION: &str = "112069000";

    fn entry(warning_type: i64, level: i64, start: i64, end: i64) -> WarningEntry {
        WarningEntry {
            warning_type: Some(warning_type),
            level: Some(level),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    fn feed_with(region: &str, entries: Vec<WarningEntry>) -> WarningFeed {
        let mut feed = WarningFeed::default();
        feed.warnings.insert(region.to_string(), entries);
        feed
    }

    #[test]
    fn test_no_feed_is_normal() {
        let eval = evaluate_with_reason(None, REGION, 0, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::NoFeed);
        assert!(eval.entry.is_none());
    }

    #[test]
    fn test_region_absent_is_normal() {
        let feed = feed_with("105315000", vec![entry(2, 5, 1000, 2000)]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::RegionAbsent);
    }

    #[test]
    fn test_empty_region_is_normal() {
        let feed = feed_with(REGION, vec![]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::NoEntries);
    }

    #[test]
    fn test_active_severe_warning_is_elevated() {
        let feed = feed_with(REGION, vec![entry(2, 5, 1000, 2000)]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Elevated);
        assert_eq!(eval.reason, Reason::Active);
        assert_eq!(eval.entry.and_then(|e| e.level), Some(5));
    }

    #[test]
    fn test_expired_warning_is_normal() {
        let feed = feed_with(REGION, vec![entry(2, 5, 1000, 2000)]);
        let eval = evaluate_with_reason(
            Some(&feed),
            REGION,
            10_000_000,
            &EvaluationContext::default(),
        );
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::Expired);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let feed = feed_with(REGION, vec![entry(0, 4, 1000, 2000)]);
        let ctx = EvaluationContext::default();
        assert_eq!(evaluate(Some(&feed), REGION, 7_201_999, &ctx), Decision::Elevated);
        assert_eq!(evaluate(Some(&feed), REGION, 7_202_000, &ctx), Decision::Normal);
    }

    #[test]
    fn test_non_qualifying_type_is_normal() {
        let feed = feed_with(REGION, vec![entry(1, 5, 1000, 2000)]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::NotQualifying);
    }

    #[test]
    fn test_level_three_is_normal() {
        let feed = feed_with(REGION, vec![entry(0, 3, 1000, 2000)]);
        assert_eq!(
            evaluate(Some(&feed), REGION, 5000, &EvaluationContext::default()),
            Decision::Normal
        );
    }

    #[test]
    fn test_only_first_entry_counts() {
        let feed = feed_with(
            REGION,
            vec![entry(0, 2, 1000, 2000), entry(2, 5, 1000, 2000)],
        );
        assert_eq!(
            evaluate(Some(&feed), REGION, 5000, &EvaluationContext::default()),
            Decision::Normal
        );
    }

    #[test]
    fn test_missing_end_is_normal() {
        let mut warning = entry(2, 5, 1000, 2000);
        warning.end = None;
        let feed = feed_with(REGION, vec![warning]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.decision, Decision::Normal);
        assert_eq!(eval.reason, Reason::MissingWindow);
    }

    #[test]
    fn test_missing_level_is_not_qualifying() {
        let mut warning = entry(2, 5, 1000, 2000);
        warning.level = None;
        let feed = feed_with(REGION, vec![warning]);
        let eval = evaluate_with_reason(Some(&feed), REGION, 5000, &EvaluationContext::default());
        assert_eq!(eval.reason, Reason::NotQualifying);
    }

    #[test]
    fn test_inverted_window_does_not_panic() {
        let feed = feed_with(REGION, vec![entry(2, 5, 50_000_000, 1000)]);
        let ctx = EvaluationContext::default();
        assert_eq!(evaluate(Some(&feed), REGION, 10_000_000, &ctx), Decision::Normal);

        let legacy = ctx.with_time_rule(TimeRule::EndOrStart);
        assert_eq!(
            evaluate(Some(&feed), REGION, 10_000_000, &legacy),
            Decision::Elevated
        );
    }

    #[test]
    fn test_custom_criteria() {
        let feed = feed_with(REGION, vec![entry(1, 3, 1000, 2000)]);
        let ctx = EvaluationContext::new([1], [3], 0);
        assert_eq!(evaluate(Some(&feed), REGION, 1999, &ctx), Decision::Elevated);
        assert_eq!(evaluate(Some(&feed), REGION, 2000, &ctx), Decision::Normal);
    }
}
