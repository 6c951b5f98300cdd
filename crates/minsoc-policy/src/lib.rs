//! Minimum state-of-charge policy.
//!
//! Looks at the first warning listed for a region and decides whether the
//! battery reserve should be raised from [`Decision::Normal`] (25 %) to
//! [`Decision::Elevated`] (50 %). Evaluation is pure: the caller supplies the
//! feed, the region and the current time.
//!
//! ```
//! use dwd_feed::WarningFeed;
//! use minsoc_policy::{evaluate, Decision, EvaluationContext};
//!
//! let feed = WarningFeed::from_json(
//!     r#"{"warnings":{"112069000":[{"type":2,"level":5,"start":1000,"end":2000}]}}"#,
//! ).unwrap();
//!
//! let ctx = EvaluationContext::default();
//! assert_eq!(evaluate(Some(&feed), "112069000", 5_000, &ctx), Decision::Elevated);
//! assert_eq!(evaluate(None, "112069000", 5_000, &ctx), Decision::Normal);
//! ```

pub mod context;
pub mod decision;
pub mod evaluate;

pub use context::{EvaluationContext, ParseTimeRuleError, TimeRule, DEFAULT_BUFFER_MS};
pub use decision::Decision;
pub use evaluate::{evaluate, evaluate_with_reason, Evaluation, Reason};
