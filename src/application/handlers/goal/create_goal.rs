//! CreateGoalHandler - Command handler for creating and activating goals.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::foundation::UserId;
use crate::domain::goal::{
    CalorieGoal, CalorieGoalCalculator, CalorieTarget, GoalError, GoalSpec, GoalType,
};
use crate::domain::metabolic::MetabolicCalculator;
use crate::ports::{CalorieGoalStore, Clock, MetabolicProfileStore, ProfileProvider};

/// Command to create a goal, replacing any active one.
#[derive(Debug, Clone)]
pub struct CreateGoalCommand {
    pub user_id: UserId,
    pub goal_type: GoalType,
    pub weekly_weight_change_kg: f64,
    pub target_weight_kg: Option<f64>,
    /// Defaults to today.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Result of successful goal creation.
#[derive(Debug, Clone)]
pub struct CreateGoalResult {
    pub goal: CalorieGoal,
    pub target: CalorieTarget,
}

/// Handler for creating goals.
///
/// The target is computed from the stored metabolic profile while it is
/// current, otherwise from a fresh estimate of the physiological profile.
pub struct CreateGoalHandler {
    profiles: Arc<dyn ProfileProvider>,
    metabolic_profiles: Arc<dyn MetabolicProfileStore>,
    goals: Arc<dyn CalorieGoalStore>,
    clock: Arc<dyn Clock>,
    calculator: MetabolicCalculator,
}

impl CreateGoalHandler {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        metabolic_profiles: Arc<dyn MetabolicProfileStore>,
        goals: Arc<dyn CalorieGoalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            metabolic_profiles,
            goals,
            clock,
            calculator: MetabolicCalculator::default(),
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %cmd.user_id, goal_type = %cmd.goal_type))]
    pub async fn handle(&self, cmd: CreateGoalCommand) -> Result<CreateGoalResult, GoalError> {
        let now = self.clock.now();

        // 1. Validate parameters before touching any store
        let spec = GoalSpec::try_new(
            cmd.goal_type,
            cmd.weekly_weight_change_kg,
            cmd.target_weight_kg,
            cmd.start_date.unwrap_or_else(|| now.date()),
            cmd.end_date,
        )?;

        // 2. Resolve BMR/TDEE
        let physiology = self
            .profiles
            .get(&cmd.user_id)
            .await?
            .ok_or_else(|| GoalError::user_not_found(cmd.user_id.clone()))?;
        let estimate = match self.metabolic_profiles.get_current(&cmd.user_id).await? {
            Some(stored) if stored.is_current(now) => Some(stored.estimate()),
            _ => self.calculator.estimate(&physiology),
        };

        // 3. Compute the clamped target
        let target =
            CalorieGoalCalculator::target(estimate.as_ref(), spec.weekly_weight_change_kg())?;
        if target.was_clamped() {
            warn!(
                requested = target.unclamped_calories,
                clamped = target.target_calories,
                "goal target clamped to safe band"
            );
        }

        // 4. Deactivate the previous goal and store this one atomically
        let goal = CalorieGoal::new(cmd.user_id, spec, target.target_calories, now);
        self.goals.activate(&goal).await?;

        info!(goal_id = %goal.id(), target_calories = goal.target_calories(), "goal activated");

        Ok(CreateGoalResult { goal, target })
    }
}
