//! Progress Analyzer - goal adherence over a window of ledger rows.

use serde::{Deserialize, Serialize};

use crate::domain::goal::CalorieGoal;
use crate::domain::ledger::DailyBalance;

use super::mean;

/// Default band around the target within which a day counts as adherent.
pub const DEFAULT_ADHERENCE_TOLERANCE_KCAL: f64 = 100.0;

/// Progress metrics for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub days_analyzed: usize,
    pub target_calories: f64,
    pub avg_daily_calories: f64,
    /// Percent of days with `|consumed - target| <= tolerance` (0-100)
    pub adherence_rate: f64,
    /// Root mean square deviation of consumed calories from the target
    pub variance: f64,
    /// Last weigh-in minus first weigh-in; needs two weigh-ins
    pub weight_change: Option<f64>,
    /// Average daily consumed calories minus the target
    pub calorie_surplus_deficit: f64,
}

impl ProgressReport {
    fn empty(target_calories: f64) -> Self {
        Self {
            days_analyzed: 0,
            target_calories,
            avg_daily_calories: 0.0,
            adherence_rate: 0.0,
            variance: 0.0,
            weight_change: None,
            calorie_surplus_deficit: 0.0,
        }
    }
}

/// Computes adherence, deviation and weight change against a goal.
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnalyzer {
    tolerance_kcal: f64,
}

impl Default for ProgressAnalyzer {
    fn default() -> Self {
        Self {
            tolerance_kcal: DEFAULT_ADHERENCE_TOLERANCE_KCAL,
        }
    }
}

impl ProgressAnalyzer {
    pub fn with_tolerance(tolerance_kcal: f64) -> Self {
        Self {
            tolerance_kcal: tolerance_kcal.abs(),
        }
    }

    pub fn tolerance_kcal(&self) -> f64 {
        self.tolerance_kcal
    }

    /// Analyzes a window of rows against the goal's target.
    ///
    /// # Edge Cases
    /// - Empty window: all numbers zero, `weight_change` None
    /// - Fewer than two weigh-ins: `weight_change` None
    pub fn analyze(&self, window: &[DailyBalance], goal: &CalorieGoal) -> ProgressReport {
        let target = goal.target_calories();
        let consumed: Vec<f64> = window.iter().map(DailyBalance::calories_consumed).collect();
        let Some(avg_daily_calories) = mean(&consumed) else {
            return ProgressReport::empty(target);
        };

        let n = consumed.len() as f64;
        let adherent = consumed
            .iter()
            .filter(|c| (*c - target).abs() <= self.tolerance_kcal)
            .count();
        let mean_squared_deviation =
            consumed.iter().map(|c| (c - target).powi(2)).sum::<f64>() / n;

        ProgressReport {
            days_analyzed: consumed.len(),
            target_calories: target,
            avg_daily_calories,
            adherence_rate: 100.0 * adherent as f64 / n,
            variance: mean_squared_deviation.sqrt(),
            weight_change: Self::weight_change(window),
            calorie_surplus_deficit: avg_daily_calories - target,
        }
    }

    /// Last minus first weigh-in, ordered by date.
    pub fn weight_change(window: &[DailyBalance]) -> Option<f64> {
        let mut weighed: Vec<(chrono::NaiveDate, f64)> = window
            .iter()
            .filter_map(|row| row.weight_kg().map(|w| (row.date(), w)))
            .collect();
        if weighed.len() < 2 {
            return None;
        }
        weighed.sort_by_key(|(date, _)| *date);
        let first = weighed.first()?.1;
        let last = weighed.last()?.1;
        Some(last - first)
    }
}
