//! Calorie Goal Calculator - daily calorie target for a weight-change goal.
//!
//! `daily_adjustment = weekly_weight_change_kg * 7700 / 7`
//! `target = clamp(TDEE + daily_adjustment, 1.2 * BMR, 1.5 * TDEE)`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::KCAL_PER_KG;
use crate::domain::metabolic::MetabolicEstimate;

use super::GoalError;

const MIN_BMR_FACTOR: f64 = 1.2;
const MAX_TDEE_FACTOR: f64 = 1.5;

/// A computed daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// kcal/day added to (or removed from) TDEE
    pub daily_adjustment: f64,
    /// TDEE + adjustment before the safety clamp
    pub unclamped_calories: f64,
    /// Final target within `[1.2 * BMR, 1.5 * TDEE]`
    pub target_calories: f64,
    /// Lower bound of the safety band
    pub min_safe_calories: f64,
    /// Upper bound of the safety band
    pub max_safe_calories: f64,
}

impl CalorieTarget {
    /// True when the safety clamp changed the raw target.
    pub fn was_clamped(&self) -> bool {
        self.target_calories != self.unclamped_calories
    }
}

/// Stateless calculator for goal targets.
pub struct CalorieGoalCalculator;

impl CalorieGoalCalculator {
    /// kcal/day needed to change body mass by `weekly_weight_change_kg` per week.
    pub fn daily_adjustment(weekly_weight_change_kg: f64) -> f64 {
        weekly_weight_change_kg * KCAL_PER_KG / 7.0
    }

    /// Computes the clamped daily target.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientProfileData` when no estimate is available or
    /// when BMR/TDEE are not positive.
    pub fn target(
        estimate: Option<&MetabolicEstimate>,
        weekly_weight_change_kg: f64,
    ) -> Result<CalorieTarget, GoalError> {
        let estimate = estimate.ok_or_else(GoalError::insufficient_profile_data)?;
        if estimate.bmr <= 0.0 || estimate.tdee <= 0.0 {
            return Err(GoalError::insufficient_profile_data());
        }

        let daily_adjustment = Self::daily_adjustment(weekly_weight_change_kg);
        let unclamped_calories = estimate.tdee + daily_adjustment;
        let min_safe_calories = MIN_BMR_FACTOR * estimate.bmr;
        let max_safe_calories = MAX_TDEE_FACTOR * estimate.tdee;
        // max/min rather than f64::clamp: a degenerate band must not panic
        let target_calories = unclamped_calories.max(min_safe_calories).min(max_safe_calories);

        Ok(CalorieTarget {
            daily_adjustment,
            unclamped_calories,
            target_calories,
            min_safe_calories,
            max_safe_calories,
        })
    }
}
