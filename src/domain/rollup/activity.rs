//! Active-day policy.

use serde::{Deserialize, Serialize};

use crate::domain::ledger::DailyBalance;

/// Rule deciding whether a ledger day counts as active.
///
/// Streaks, consistency and activity percentages all share one policy so
/// that they agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold_kcal", rename_all = "snake_case")]
pub enum ActiveDayPolicy {
    /// Any consumed calories, exercise or weigh-in.
    #[default]
    TrackingOccurred,
    /// Exercise burn at or above the threshold.
    ExerciseAtLeast(f64),
    /// Consumed calories at or above the threshold.
    ConsumedAtLeast(f64),
}

impl ActiveDayPolicy {
    pub fn is_active(&self, row: &DailyBalance) -> bool {
        match self {
            ActiveDayPolicy::TrackingOccurred => row.has_tracking(),
            ActiveDayPolicy::ExerciseAtLeast(kcal) => row.calories_burned_exercise() >= *kcal,
            ActiveDayPolicy::ConsumedAtLeast(kcal) => row.calories_consumed() >= *kcal,
        }
    }
}
