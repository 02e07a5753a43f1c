//! Calorie goal entity and its validated parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ensure_in_range, GoalId, Timestamp, UserId, ValidationError};

/// Largest weekly body-mass change a goal may request, in kg.
pub const MAX_WEEKLY_CHANGE_KG: f64 = 2.0;

/// Direction of the requested body-mass change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    WeightGain,
    Maintenance,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "weight_loss",
            GoalType::WeightGain => "weight_gain",
            GoalType::Maintenance => "maintenance",
        }
    }

    /// Checks that a weekly change has the sign this goal type requires.
    fn accepts(&self, weekly_weight_change_kg: f64) -> bool {
        match self {
            GoalType::WeightLoss => weekly_weight_change_kg <= 0.0,
            GoalType::WeightGain => weekly_weight_change_kg >= 0.0,
            GoalType::Maintenance => weekly_weight_change_kg == 0.0,
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weight_loss" => Ok(GoalType::WeightLoss),
            "weight_gain" => Ok(GoalType::WeightGain),
            "maintenance" => Ok(GoalType::Maintenance),
            other => Err(ValidationError::invalid_format(
                "goal_type",
                format!("unknown goal type '{}'", other),
            )),
        }
    }
}

/// Validated goal parameters, checked before any calculator runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    goal_type: GoalType,
    weekly_weight_change_kg: f64,
    target_weight_kg: Option<f64>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl GoalSpec {
    /// Validates goal parameters.
    ///
    /// # Errors
    ///
    /// - `Inconsistent` when the weekly change has the wrong sign for the
    ///   goal type (loss requires <= 0, gain >= 0, maintenance == 0), or
    ///   when `end_date` precedes `start_date`
    /// - `OutOfRange` when the weekly change exceeds 2 kg in magnitude or
    ///   the target weight is outside 30-300 kg
    pub fn try_new(
        goal_type: GoalType,
        weekly_weight_change_kg: f64,
        target_weight_kg: Option<f64>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        ensure_in_range(
            "weekly_weight_change_kg",
            weekly_weight_change_kg,
            -MAX_WEEKLY_CHANGE_KG,
            MAX_WEEKLY_CHANGE_KG,
        )?;
        if !goal_type.accepts(weekly_weight_change_kg) {
            return Err(ValidationError::inconsistent(
                "weekly_weight_change_kg",
                format!(
                    "{} goal cannot have a weekly change of {} kg",
                    goal_type, weekly_weight_change_kg
                ),
            ));
        }
        let target_weight_kg = target_weight_kg
            .map(|w| ensure_in_range("target_weight_kg", w, 30.0, 300.0))
            .transpose()?;
        if let Some(end) = end_date {
            if end < start_date {
                return Err(ValidationError::inconsistent(
                    "end_date",
                    "end date precedes start date",
                ));
            }
        }

        Ok(Self {
            goal_type,
            weekly_weight_change_kg,
            target_weight_kg,
            start_date,
            end_date,
        })
    }

    pub fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    pub fn weekly_weight_change_kg(&self) -> f64 {
        self.weekly_weight_change_kg
    }

    pub fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight_kg
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// A user's calorie goal.
///
/// # Invariants
///
/// - Exactly one active goal per user; activation of a new goal
///   deactivates all others in one atomic store operation
/// - `weekly_weight_change_kg` sign matches `goal_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieGoal {
    id: GoalId,
    user_id: UserId,
    goal_type: GoalType,
    target_calories: f64,
    target_weight_kg: Option<f64>,
    weekly_weight_change_kg: f64,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_active: bool,
    created_at: Timestamp,
}

impl CalorieGoal {
    /// Creates a new active goal from validated parameters and a computed target.
    pub fn new(
        user_id: UserId,
        spec: GoalSpec,
        target_calories: f64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: GoalId::new(),
            user_id,
            goal_type: spec.goal_type,
            target_calories,
            target_weight_kg: spec.target_weight_kg,
            weekly_weight_change_kg: spec.weekly_weight_change_kg,
            start_date: spec.start_date,
            end_date: spec.end_date,
            is_active: true,
            created_at,
        }
    }

    /// Rehydrates a goal from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: GoalId,
        user_id: UserId,
        goal_type: GoalType,
        target_calories: f64,
        target_weight_kg: Option<f64>,
        weekly_weight_change_kg: f64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        is_active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            goal_type,
            target_calories,
            target_weight_kg,
            weekly_weight_change_kg,
            start_date,
            end_date,
            is_active,
            created_at,
        }
    }

    pub fn id(&self) -> &GoalId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    pub fn target_calories(&self) -> f64 {
        self.target_calories
    }

    pub fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight_kg
    }

    pub fn weekly_weight_change_kg(&self) -> f64 {
        self.weekly_weight_change_kg
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Marks the goal inactive. Idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn weight_loss_accepts_negative_change() {
        assert!(GoalSpec::try_new(GoalType::WeightLoss, -0.5, Some(70.0), start(), None).is_ok());
    }

    #[test]
    fn weight_loss_rejects_positive_change() {
        let err = GoalSpec::try_new(GoalType::WeightLoss, 0.5, None, start(), None).unwrap_err();
        assert!(matches!(err, ValidationError::Inconsistent { .. }));
        assert_eq!(err.field(), "weekly_weight_change_kg");
    }

    #[test]
    fn weight_gain_rejects_negative_change() {
        assert!(GoalSpec::try_new(GoalType::WeightGain, -0.25, None, start(), None).is_err());
    }

    #[test]
    fn maintenance_requires_zero_change() {
        assert!(GoalSpec::try_new(GoalType::Maintenance, 0.0, None, start(), None).is_ok());
        assert!(GoalSpec::try_new(GoalType::Maintenance, 0.1, None, start(), None).is_err());
    }

    #[test]
    fn rejects_change_beyond_two_kg() {
        let err = GoalSpec::try_new(GoalType::WeightLoss, -2.5, None, start(), None).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn rejects_end_before_start() {
        let end = start().pred_opt().unwrap();
        let err =
            GoalSpec::try_new(GoalType::WeightLoss, -0.5, None, start(), Some(end)).unwrap_err();
        assert_eq!(err.field(), "end_date");
    }

    #[test]
    fn new_goal_is_active_and_deactivates() {
        let spec = GoalSpec::try_new(GoalType::WeightLoss, -0.5, None, start(), None).unwrap();
        let mut goal = CalorieGoal::new(
            UserId::new("user-1").unwrap(),
            spec,
            2083.06,
            Timestamp::start_of_day(start()),
        );
        assert!(goal.is_active());
        goal.deactivate();
        goal.deactivate();
        assert!(!goal.is_active());
    }

    #[test]
    fn goal_type_parses_snake_case() {
        assert_eq!("weight_gain".parse::<GoalType>().unwrap(), GoalType::WeightGain);
        assert!("bulk".parse::<GoalType>().is_err());
    }
}
