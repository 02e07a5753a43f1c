//! GetTrajectoryForecastHandler - Query handler for weight projections.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::analysis::{AnalysisError, TrajectoryForecast, WeightTrajectoryPredictor};
use crate::domain::foundation::UserId;
use crate::ports::{CalorieGoalStore, DailyBalanceStore, ProfileProvider};

use super::get_progress_report::ensure_ordered;

/// Query for a forecast built from the window `[start, end]`.
#[derive(Debug, Clone)]
pub struct GetTrajectoryForecastQuery {
    pub user_id: UserId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Overrides the goal's own target weight.
    pub target_weight_kg: Option<f64>,
}

/// Handler for trajectory forecasts.
///
/// Current weight is the latest weigh-in inside the window, falling back
/// to the physiological profile. The estimated goal date is anchored on
/// the window's end.
pub struct GetTrajectoryForecastHandler {
    profiles: Arc<dyn ProfileProvider>,
    goals: Arc<dyn CalorieGoalStore>,
    balances: Arc<dyn DailyBalanceStore>,
}

impl GetTrajectoryForecastHandler {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        goals: Arc<dyn CalorieGoalStore>,
        balances: Arc<dyn DailyBalanceStore>,
    ) -> Self {
        Self {
            profiles,
            goals,
            balances,
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %query.user_id))]
    pub async fn handle(
        &self,
        query: GetTrajectoryForecastQuery,
    ) -> Result<TrajectoryForecast, AnalysisError> {
        ensure_ordered(query.start, query.end)?;

        let (goal, window, physiology) = futures::try_join!(
            self.goals.get_active(&query.user_id),
            self.balances.range(&query.user_id, query.start, query.end),
            self.profiles.get(&query.user_id),
        )?;
        let goal = goal.ok_or_else(|| AnalysisError::no_active_goal(query.user_id.clone()))?;

        let current_weight_kg = window
            .iter()
            .rev()
            .find_map(|row| row.weight_kg())
            .or_else(|| physiology.and_then(|profile| profile.weight_kg()));

        let forecast = WeightTrajectoryPredictor::forecast(
            &window,
            &goal,
            query.target_weight_kg,
            current_weight_kg,
            query.end,
        );
        debug!(
            weekly_change = forecast.predicted_weekly_change,
            feasible = forecast.feasible,
            confidence = %forecast.confidence,
            "trajectory forecast built"
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCalorieGoalStore, InMemoryDailyBalanceStore, InMemoryProfileProvider,
    };
    use crate::application::handlers::test_support::{
        balance, complete_profile, date, maintenance_goal, user,
    };
    use crate::domain::analysis::ForecastConfidence;

    struct Fixture {
        profiles: Arc<InMemoryProfileProvider>,
        balances: Arc<InMemoryDailyBalanceStore>,
        handler: GetTrajectoryForecastHandler,
    }

    async fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileProvider::new());
        let goals = Arc::new(InMemoryCalorieGoalStore::new());
        goals.activate(&maintenance_goal(2000.0)).await.unwrap();
        let balances = Arc::new(InMemoryDailyBalanceStore::new());
        let handler = GetTrajectoryForecastHandler::new(profiles.clone(), goals, balances.clone());
        Fixture {
            profiles,
            balances,
            handler,
        }
    }

    fn query(target: Option<f64>) -> GetTrajectoryForecastQuery {
        GetTrajectoryForecastQuery {
            user_id: user(),
            start: date(2024, 5, 1),
            end: date(2024, 5, 7),
            target_weight_kg: target,
        }
    }

    #[tokio::test]
    async fn steady_surplus_projects_gain() {
        let f = fixture().await;
        for day in 1..=7 {
            // no BMR snapshot, so net = consumed and surplus = 1100 kcal/day
            f.balances.upsert(&balance(date(2024, 5, day), 3100.0, None)).await.unwrap();
        }
        f.balances
            .upsert(&balance(date(2024, 5, 7), 3100.0, Some(80.0)))
            .await
            .unwrap();

        let forecast = f.handler.handle(query(Some(81.0))).await.unwrap();

        assert!((forecast.predicted_weekly_change - 1.0).abs() < 1e-9);
        assert_eq!(forecast.current_weight_kg, Some(80.0));
        assert_eq!(forecast.timeline_weeks, Some(1.0));
        assert!(forecast.feasible);
        assert_eq!(forecast.estimated_goal_date, Some(date(2024, 5, 14)));
        assert_eq!(forecast.confidence, ForecastConfidence::High);
    }

    #[tokio::test]
    async fn falls_back_to_profile_weight() {
        let f = fixture().await;
        f.profiles.insert(complete_profile(75.0)).await;
        f.balances.upsert(&balance(date(2024, 5, 1), 2000.0, None)).await.unwrap();

        let forecast = f.handler.handle(query(None)).await.unwrap();
        assert_eq!(forecast.current_weight_kg, Some(75.0));
        assert!(!forecast.feasible);
    }

    #[tokio::test]
    async fn empty_window_is_low_confidence() {
        let f = fixture().await;
        let forecast = f.handler.handle(query(Some(70.0))).await.unwrap();

        assert_eq!(forecast.days_analyzed, 0);
        assert_eq!(forecast.confidence, ForecastConfidence::Low);
        assert!(forecast.timeline_weeks.is_none());
    }

    #[tokio::test]
    async fn missing_goal_is_an_error() {
        let handler = GetTrajectoryForecastHandler::new(
            Arc::new(InMemoryProfileProvider::new()),
            Arc::new(InMemoryCalorieGoalStore::new()),
            Arc::new(InMemoryDailyBalanceStore::new()),
        );
        let err = handler.handle(query(None)).await.unwrap_err();
        assert!(matches!(err, AnalysisError::NoActiveGoal(_)));
    }
}
