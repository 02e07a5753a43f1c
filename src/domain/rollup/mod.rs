//! Temporal rollup module.
//!
//! Aggregates ledger rows and raw events into hourly, daily, weekly and
//! monthly views, classifies their trend, scores streaks and consistency,
//! and detects simple behavioral patterns.
//!
//! # Components
//!
//! - `TemporalRollupEngine` - Rollups, streaks, consistency
//! - `PatternDetector` - Meal timing, weekday and high-intake patterns
//! - `Deadline` - Time budget checked between periods; expiry fails the
//!   whole rollup
//!
//! Weeks are ISO weeks starting Monday; months are calendar months.

mod activity;
mod deadline;
mod engine;
mod errors;
mod granularity;
mod patterns;
mod scoring;

pub use activity::ActiveDayPolicy;
pub use deadline::Deadline;
pub use engine::{
    HourlyBucket, RollupPoint, RollupSettings, RollupView, TemporalRollupEngine, TrendMetric,
    DEFAULT_CONSISTENCY_MIN_DAYS, DEFAULT_CONSISTENCY_WINDOW_DAYS,
};
pub use errors::RollupError;
pub use granularity::{DateRange, Granularity, MAX_RANGE_DAYS};
pub use patterns::{
    MealSlot, PatternDetector, PatternDimension, PatternReport, DEFAULT_MIN_OBSERVATIONS,
};
pub use scoring::ActivitySummary;
