//! Rollup, engagement and pattern query handlers.

mod detect_patterns;
mod get_activity_summary;
mod get_rollup;

pub use detect_patterns::{DetectPatternsHandler, DetectPatternsQuery};
pub use get_activity_summary::{GetActivitySummaryHandler, GetActivitySummaryQuery};
pub use get_rollup::{GetRollupHandler, GetRollupQuery};
