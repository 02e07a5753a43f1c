//! Analysis Module - Pure domain services over a window of ledger rows.
//!
//! # Components
//!
//! - `ProgressAnalyzer` - Adherence, RMS deviation from target, weight delta
//! - `WeightTrajectoryPredictor` - Linear weight projection and goal timeline
//! - `classify_trend` - First-half/second-half mean comparison
//!
//! All functions are pure and stateless. Insufficient data yields zeroed
//! reports, `None` fields or the `NoData` sentinel, never an error.

mod errors;
mod progress;
mod stats;
mod trajectory;
mod trend;

pub use errors::AnalysisError;
pub use progress::{ProgressAnalyzer, ProgressReport, DEFAULT_ADHERENCE_TOLERANCE_KCAL};
pub use trajectory::{ForecastConfidence, TrajectoryForecast, WeightTrajectoryPredictor};
pub use trend::{classify_trend, TrendAnalysis, TrendDirection, DEFAULT_TREND_THRESHOLD};

pub(crate) use stats::{mean, population_variance};
