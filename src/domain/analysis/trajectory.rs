//! Weight Trajectory Predictor - closed-form linear weight projection.
//!
//! `avg_daily_surplus = mean(net_calories - target_calories)`
//! `weekly = avg_daily_surplus * 7 / 7700`, `monthly = avg_daily_surplus * 30 / 7700`

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::KCAL_PER_KG;
use crate::domain::goal::CalorieGoal;
use crate::domain::ledger::DailyBalance;

use super::{mean, population_variance};

const HIGH_CONFIDENCE_BELOW: f64 = 500.0;
const MEDIUM_CONFIDENCE_BELOW: f64 = 1000.0;
const MIN_FEASIBLE_WEEKS: f64 = 1.0;
const MAX_FEASIBLE_WEEKS: f64 = 104.0;

/// Qualitative reliability of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastConfidence {
    High,
    Medium,
    Low,
}

impl ForecastConfidence {
    /// Bands the variance of daily net calories.
    pub fn from_variance(variance: f64) -> Self {
        if variance < HIGH_CONFIDENCE_BELOW {
            ForecastConfidence::High
        } else if variance < MEDIUM_CONFIDENCE_BELOW {
            ForecastConfidence::Medium
        } else {
            ForecastConfidence::Low
        }
    }
}

impl fmt::Display for ForecastConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ForecastConfidence::High => "high",
            ForecastConfidence::Medium => "medium",
            ForecastConfidence::Low => "low",
        };
        f.write_str(s)
    }
}

/// Projected weight change and goal timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryForecast {
    pub days_analyzed: usize,
    pub avg_daily_surplus: f64,
    pub predicted_weekly_change: f64,
    pub predicted_monthly_change: f64,
    pub current_weight_kg: Option<f64>,
    pub projected_weight_in_30_days: Option<f64>,
    pub target_weight_kg: Option<f64>,
    /// Weeks until the target weight; set only when feasible. Negative
    /// when the current trend moves away from the target.
    pub timeline_weeks: Option<f64>,
    /// Set only when the trend moves toward the target.
    pub estimated_goal_date: Option<NaiveDate>,
    pub feasible: bool,
    pub confidence: ForecastConfidence,
}

/// Projects weight change from the recent energy surplus.
pub struct WeightTrajectoryPredictor;

impl WeightTrajectoryPredictor {
    /// Builds a forecast for the window.
    ///
    /// `target_weight_kg` overrides the goal's own target when given.
    /// `as_of` anchors the estimated goal date.
    ///
    /// # Edge Cases
    /// - Empty window: zero projections, `Low` confidence, infeasible
    /// - Zero predicted change, unknown current or target weight, or a
    ///   timeline outside 1-104 weeks: infeasible, timeline `None`
    /// - Trend away from the target: negative timeline, no goal date
    pub fn forecast(
        window: &[DailyBalance],
        goal: &CalorieGoal,
        target_weight_kg: Option<f64>,
        current_weight_kg: Option<f64>,
        as_of: NaiveDate,
    ) -> TrajectoryForecast {
        let target_weight_kg = target_weight_kg.or(goal.target_weight_kg());
        let surpluses: Vec<f64> = window
            .iter()
            .map(|row| row.net_calories() - goal.target_calories())
            .collect();

        let Some(avg_daily_surplus) = mean(&surpluses) else {
            return TrajectoryForecast {
                days_analyzed: 0,
                avg_daily_surplus: 0.0,
                predicted_weekly_change: 0.0,
                predicted_monthly_change: 0.0,
                current_weight_kg,
                projected_weight_in_30_days: current_weight_kg,
                target_weight_kg,
                timeline_weeks: None,
                estimated_goal_date: None,
                feasible: false,
                confidence: ForecastConfidence::Low,
            };
        };

        let predicted_weekly_change = avg_daily_surplus * 7.0 / KCAL_PER_KG;
        let predicted_monthly_change = avg_daily_surplus * 30.0 / KCAL_PER_KG;

        let nets: Vec<f64> = window.iter().map(DailyBalance::net_calories).collect();
        let confidence = population_variance(&nets)
            .map(ForecastConfidence::from_variance)
            .unwrap_or(ForecastConfidence::Low);

        let timeline_weeks = match (target_weight_kg, current_weight_kg) {
            (Some(target), Some(current)) => {
                Self::weeks_to_goal(target, current, predicted_weekly_change)
            }
            _ => None,
        };
        let estimated_goal_date = timeline_weeks
            .filter(|weeks| *weeks > 0.0)
            .map(|weeks| Duration::days((weeks * 7.0).round() as i64))
            .and_then(|offset| as_of.checked_add_signed(offset));

        TrajectoryForecast {
            days_analyzed: window.len(),
            avg_daily_surplus,
            predicted_weekly_change,
            predicted_monthly_change,
            current_weight_kg,
            projected_weight_in_30_days: current_weight_kg.map(|w| w + predicted_monthly_change),
            target_weight_kg,
            timeline_weeks,
            estimated_goal_date,
            feasible: timeline_weeks.is_some(),
            confidence,
        }
    }

    /// Weeks to reach the target at the predicted rate, if feasible.
    pub fn weeks_to_goal(
        target_weight_kg: f64,
        current_weight_kg: f64,
        weekly_change: f64,
    ) -> Option<f64> {
        if weekly_change == 0.0 {
            return None;
        }
        let weeks = (target_weight_kg - current_weight_kg) / weekly_change;
        let magnitude = weeks.abs();
        if (MIN_FEASIBLE_WEEKS..=MAX_FEASIBLE_WEEKS).contains(&magnitude) {
            Some(weeks)
        } else {
            None
        }
    }
}
