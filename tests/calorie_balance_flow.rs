//! Integration tests for the full calorie-balance flow.
//!
//! These tests drive the public handlers end to end:
//! 1. Metabolic profile is computed from physiological attributes
//! 2. A goal is created from it and activated
//! 3. Meal events fold into the daily ledger
//! 4. Progress, forecasts, rollups, streaks and patterns read the ledger
//!
//! Uses in-memory adapters so no database is required.

use std::sync::Arc;

use chrono::NaiveDate;

use calorie_balance::adapters::{
    FixedClock, InMemoryCalorieEventStore, InMemoryCalorieGoalStore, InMemoryDailyBalanceStore,
    InMemoryMetabolicProfileStore, InMemoryProfileProvider,
};
use calorie_balance::application::{
    CreateGoalCommand, CreateGoalHandler, DetectPatternsHandler, DetectPatternsQuery,
    GetActivitySummaryHandler, GetActivitySummaryQuery, GetProgressReportHandler,
    GetProgressReportQuery, GetRollupHandler, GetRollupQuery, GetTrajectoryForecastHandler,
    GetTrajectoryForecastQuery, RecordCalorieEventCommand, RecordCalorieEventHandler,
    RefreshMetabolicProfileCommand, RefreshMetabolicProfileHandler, UpdateDailyBalanceCommand,
    UpdateDailyBalanceHandler,
};
use calorie_balance::config::EngineConfig;
use calorie_balance::domain::analysis::{AnalysisError, ForecastConfidence, TrendDirection};
use calorie_balance::domain::foundation::{Timestamp, UserId};
use calorie_balance::domain::goal::GoalType;
use calorie_balance::domain::ledger::{EventEntry, EventPayload};
use calorie_balance::domain::profile::{
    ActivityLevel, Gender, PhysiologicalAttributes, UserPhysiologicalProfile,
};
use calorie_balance::domain::rollup::{Granularity, PatternDimension};
use calorie_balance::ports::DailyBalanceStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn user() -> UserId {
    UserId::new("athlete").unwrap()
}

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

/// Every store and handler wired against one clock.
struct App {
    clock: Arc<FixedClock>,
    balances: Arc<InMemoryDailyBalanceStore>,
    refresh: RefreshMetabolicProfileHandler,
    create_goal: CreateGoalHandler,
    record_event: RecordCalorieEventHandler,
    update_balance: UpdateDailyBalanceHandler,
    progress: GetProgressReportHandler,
    forecast: GetTrajectoryForecastHandler,
    rollup: GetRollupHandler,
    activity: GetActivitySummaryHandler,
    patterns: DetectPatternsHandler,
}

impl App {
    async fn new() -> Self {
        let config = EngineConfig::default();
        let clock = Arc::new(FixedClock::new(Timestamp::at_hour(may(1), 12)));
        let profiles = Arc::new(InMemoryProfileProvider::new());
        let metabolic = Arc::new(InMemoryMetabolicProfileStore::new());
        let events = Arc::new(InMemoryCalorieEventStore::new());
        let balances = Arc::new(InMemoryDailyBalanceStore::new());
        let goals = Arc::new(InMemoryCalorieGoalStore::new());

        profiles
            .insert(
                UserPhysiologicalProfile::try_new(
                    user(),
                    PhysiologicalAttributes {
                        age: Some(30),
                        gender: Some(Gender::Male),
                        height_cm: Some(175.0),
                        weight_kg: Some(75.0),
                        activity_level: Some(ActivityLevel::ModeratelyActive),
                    },
                )
                .unwrap(),
            )
            .await;

        Self {
            refresh: RefreshMetabolicProfileHandler::new(
                profiles.clone(),
                metabolic.clone(),
                clock.clone(),
            )
            .with_engine_config(&config),
            create_goal: CreateGoalHandler::new(
                profiles.clone(),
                metabolic.clone(),
                goals.clone(),
                clock.clone(),
            ),
            record_event: RecordCalorieEventHandler::new(
                profiles.clone(),
                metabolic.clone(),
                events.clone(),
                balances.clone(),
                clock.clone(),
            ),
            update_balance: UpdateDailyBalanceHandler::new(
                profiles.clone(),
                metabolic.clone(),
                balances.clone(),
                clock.clone(),
            ),
            progress: GetProgressReportHandler::new(goals.clone(), balances.clone())
                .with_engine_config(&config),
            forecast: GetTrajectoryForecastHandler::new(profiles, goals, balances.clone()),
            rollup: GetRollupHandler::new(balances.clone(), events.clone())
                .with_engine_config(&config),
            activity: GetActivitySummaryHandler::new(balances.clone(), clock.clone())
                .with_engine_config(&config),
            patterns: DetectPatternsHandler::new(events).with_engine_config(&config),
            clock,
            balances,
        }
    }

    async fn meal(&self, day: u32, hour: u32, kcal: f64) {
        self.record_event
            .handle(RecordCalorieEventCommand {
                user_id: user(),
                payload: EventPayload::Single(EventEntry::Consumed(kcal)),
                timestamp: Timestamp::at_hour(may(day), hour),
                source: "mobile".to_string(),
                confidence_score: 0.9,
            })
            .await
            .unwrap();
    }

    /// Profile, goal, then two weeks of three meals a day (2100 kcal).
    async fn seeded() -> Self {
        let app = Self::new().await;
        app.refresh
            .handle(RefreshMetabolicProfileCommand { user_id: user() })
            .await
            .unwrap();
        app.create_goal
            .handle(CreateGoalCommand {
                user_id: user(),
                goal_type: GoalType::WeightLoss,
                weekly_weight_change_kg: -0.5,
                target_weight_kg: Some(70.0),
                start_date: None,
                end_date: None,
            })
            .await
            .unwrap();
        for day in 1..=14 {
            app.meal(day, 8, 500.0).await;
            app.meal(day, 13, 700.0).await;
            app.meal(day, 19, 900.0).await;
        }
        app
    }
}

// =============================================================================
// Ledger
// =============================================================================

#[tokio::test]
async fn events_fold_into_ledger_with_bmr_snapshot() {
    let app = App::seeded().await;

    let row = app.balances.get(&user(), may(3)).await.unwrap().unwrap();
    assert_eq!(row.calories_consumed(), 2100.0);
    assert_eq!(row.calories_burned_bmr(), Some(1698.75));
    assert!((row.net_calories() - 401.25).abs() < 1e-9);
    assert_eq!(app.balances.count().await, 14);
}

#[tokio::test]
async fn repeating_a_set_update_does_not_double_count() {
    let app = App::seeded().await;
    let before = app.balances.get(&user(), may(1)).await.unwrap().unwrap();

    let command = UpdateDailyBalanceCommand {
        user_id: user(),
        date: may(1),
        calories_consumed: Some(2100.0),
        calories_burned_exercise: None,
        weight_kg: None,
        notes: None,
    };
    app.clock.advance_days(1);
    let first = app.update_balance.handle(command.clone()).await.unwrap();
    let second = app.update_balance.handle(command).await.unwrap();

    assert_eq!(first, before);
    assert_eq!(second, before);
}

// =============================================================================
// Analysis
// =============================================================================

#[tokio::test]
async fn progress_against_loss_goal() {
    let app = App::seeded().await;

    let report = app
        .progress
        .handle(GetProgressReportQuery {
            user_id: user(),
            start: may(1),
            end: may(14),
        })
        .await
        .unwrap();

    assert_eq!(report.days_analyzed, 14);
    assert!((report.target_calories - 2083.0625).abs() < 1e-6);
    assert!((report.avg_daily_calories - 2100.0).abs() < 1e-9);
    assert_eq!(report.adherence_rate, 100.0);
}

#[tokio::test]
async fn forecast_projects_loss_toward_target() {
    let app = App::seeded().await;

    let forecast = app
        .forecast
        .handle(GetTrajectoryForecastQuery {
            user_id: user(),
            start: may(1),
            end: may(14),
            target_weight_kg: None,
        })
        .await
        .unwrap();

    assert!(forecast.predicted_weekly_change < 0.0);
    assert_eq!(forecast.current_weight_kg, Some(75.0));
    assert_eq!(forecast.target_weight_kg, Some(70.0));
    assert!(forecast.feasible);
    assert_eq!(forecast.confidence, ForecastConfidence::High);
}

#[tokio::test]
async fn analysis_without_goal_fails() {
    let app = App::new().await;

    let err = app
        .progress
        .handle(GetProgressReportQuery {
            user_id: user(),
            start: may(1),
            end: may(14),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::NoActiveGoal(user()));
}

// =============================================================================
// Rollups
// =============================================================================

#[tokio::test]
async fn weekly_rollup_clips_partial_weeks() {
    let app = App::seeded().await;

    let view = app
        .rollup
        .handle(GetRollupQuery {
            user_id: user(),
            granularity: Granularity::Week,
            start: may(1),
            end: may(14),
        })
        .await
        .unwrap();

    // Wed 1st - Sun 5th, Mon 6th - Sun 12th, Mon 13th - Tue 14th
    assert_eq!(view.points.len(), 3);
    assert!((view.points[0].total_consumed - 10_500.0).abs() < 1e-9);
    assert_eq!(view.points[1].total_days, 7);
    assert_eq!(view.points[2].days_with_data, 2);
    assert_eq!(view.trend_direction(), TrendDirection::Stable);
}

#[tokio::test]
async fn hourly_rollup_places_meals() {
    let app = App::seeded().await;

    let view = app
        .rollup
        .handle(GetRollupQuery {
            user_id: user(),
            granularity: Granularity::Hour,
            start: may(3),
            end: may(3),
        })
        .await
        .unwrap();

    assert_eq!(view.points.len(), 24);
    let with_events: Vec<u32> = view
        .points
        .iter()
        .filter(|p| p.event_count > 0)
        .filter_map(|p| p.hour)
        .collect();
    assert_eq!(with_events, vec![8, 13, 19]);
}

#[tokio::test]
async fn activity_summary_after_two_weeks() {
    let app = App::seeded().await;
    app.clock.set(Timestamp::at_hour(may(14), 21));

    let summary = app
        .activity
        .handle(GetActivitySummaryQuery {
            user_id: user(),
            lookback_days: None,
        })
        .await
        .unwrap();

    assert_eq!(summary.current_streak, 14);
    assert_eq!(summary.longest_streak, 14);
    assert_eq!(summary.days_with_data, 14);
    assert!((summary.consistency_score - 14.0 / 30.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn meal_timing_patterns_split_evenly() {
    let app = App::seeded().await;

    let reports = app
        .patterns
        .handle(DetectPatternsQuery {
            user_id: user(),
            start: may(1),
            end: may(14),
            dimension: Some(PatternDimension::MealTimeOfDay),
            min_confidence: 0.3,
        })
        .await
        .unwrap();

    assert_eq!(reports.len(), 3);
    for report in &reports {
        assert_eq!(report.observations, 42);
        assert_eq!(report.matching_observations, 14);
    }

    let strict = app
        .patterns
        .handle(DetectPatternsQuery {
            user_id: user(),
            start: may(1),
            end: may(14),
            dimension: Some(PatternDimension::MealTimeOfDay),
            min_confidence: 0.5,
        })
        .await
        .unwrap();
    assert!(strict.is_empty());
}
