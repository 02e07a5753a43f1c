//! GetRollupHandler - Query handler for temporal rollups.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::rollup::{
    DateRange, Deadline, Granularity, RollupError, RollupView, TemporalRollupEngine,
};
use crate::ports::{CalorieEventStore, DailyBalanceStore};

const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Query for a rollup over `[start, end]`.
///
/// Hourly rollups cover exactly one day, so `start` must equal `end`.
#[derive(Debug, Clone)]
pub struct GetRollupQuery {
    pub user_id: UserId,
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Handler for rollups.
///
/// Fetch and computation share one time budget. When it runs out the
/// request fails with `DeadlineExceeded`; no partial view is returned.
pub struct GetRollupHandler {
    balances: Arc<dyn DailyBalanceStore>,
    events: Arc<dyn CalorieEventStore>,
    engine: TemporalRollupEngine,
    deadline: Duration,
}

impl GetRollupHandler {
    pub fn new(balances: Arc<dyn DailyBalanceStore>, events: Arc<dyn CalorieEventStore>) -> Self {
        Self {
            balances,
            events,
            engine: TemporalRollupEngine::default(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.engine = TemporalRollupEngine::new(config.rollup_settings());
        self.deadline = config.rollup_deadline();
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[tracing::instrument(
        skip(self),
        fields(user_id = %query.user_id, granularity = %query.granularity)
    )]
    pub async fn handle(&self, query: GetRollupQuery) -> Result<RollupView, RollupError> {
        let budget = Deadline::after(self.deadline);
        match tokio::time::timeout(self.deadline, self.compute(&query, budget)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(deadline_ms = self.deadline.as_millis() as u64, "rollup timed out");
                Err(RollupError::DeadlineExceeded)
            }
        }
    }

    async fn compute(
        &self,
        query: &GetRollupQuery,
        deadline: Deadline,
    ) -> Result<RollupView, RollupError> {
        let range = DateRange::new(query.start, query.end)?;

        let view = match query.granularity {
            Granularity::Hour => {
                if range.num_days() != 1 {
                    return Err(RollupError::invalid_window(
                        "hourly rollups cover exactly one day",
                    ));
                }
                let day_start = Timestamp::start_of_day(range.start());
                let events = self
                    .events
                    .query(&query.user_id, day_start, day_start.add_days(1), None)
                    .await?;
                deadline.check()?;
                self.engine.hourly_view(range.start(), &events)
            }
            granularity => {
                let rows = self
                    .balances
                    .range(&query.user_id, range.start(), range.end())
                    .await?;
                self.engine.rollup(granularity, &rows, range, deadline)?
            }
        };

        debug!(
            points = view.points.len(),
            trend = %view.trend_direction(),
            "rollup computed"
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCalorieEventStore, InMemoryDailyBalanceStore};
    use crate::application::handlers::test_support::{balance, date, user};
    use crate::domain::analysis::TrendDirection;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::ledger::{CalorieEvent, DailyBalance, EventEntry, EventPayload};
    use async_trait::async_trait;

    fn query(granularity: Granularity, start: NaiveDate, end: NaiveDate) -> GetRollupQuery {
        GetRollupQuery {
            user_id: user(),
            granularity,
            start,
            end,
        }
    }

    async fn seeded() -> (Arc<InMemoryDailyBalanceStore>, Arc<InMemoryCalorieEventStore>) {
        let balances = Arc::new(InMemoryDailyBalanceStore::new());
        // 2024-05-06 is a Monday
        for day in 6..=12 {
            balances.upsert(&balance(date(2024, 5, day), 1000.0, None)).await.unwrap();
        }
        for day in 13..=19 {
            balances.upsert(&balance(date(2024, 5, day), 1500.0, None)).await.unwrap();
        }
        (balances, Arc::new(InMemoryCalorieEventStore::new()))
    }

    #[tokio::test]
    async fn weekly_rollup_classifies_upward_trend() {
        let (balances, events) = seeded().await;
        let handler = GetRollupHandler::new(balances, events);

        let view = handler
            .handle(query(Granularity::Week, date(2024, 5, 6), date(2024, 5, 19)))
            .await
            .unwrap();

        assert_eq!(view.points.len(), 2);
        assert!((view.points[0].total_consumed - 7000.0).abs() < 1e-9);
        assert!((view.points[1].avg_consumed - 1500.0).abs() < 1e-9);
        assert_eq!(view.trend_direction(), TrendDirection::Up);
    }

    #[tokio::test]
    async fn daily_rollup_fills_missing_days() {
        let (balances, events) = seeded().await;
        let handler = GetRollupHandler::new(balances, events);

        let view = handler
            .handle(query(Granularity::Day, date(2024, 5, 1), date(2024, 5, 10)))
            .await
            .unwrap();

        assert_eq!(view.points.len(), 10);
        assert!(!view.points[0].has_data());
        assert!(view.points[9].has_data());
    }

    #[tokio::test]
    async fn hourly_rollup_has_24_points() {
        let (balances, events) = seeded().await;
        let meal = CalorieEvent::try_new(
            user(),
            EventPayload::Single(EventEntry::Consumed(650.0)),
            Timestamp::at_hour(date(2024, 5, 6), 13),
            "manual",
            1.0,
        )
        .unwrap();
        events.append(&meal).await.unwrap();
        let handler = GetRollupHandler::new(balances, events);

        let view = handler
            .handle(query(Granularity::Hour, date(2024, 5, 6), date(2024, 5, 6)))
            .await
            .unwrap();

        assert_eq!(view.points.len(), 24);
        assert_eq!(view.points[13].event_count, 1);
        assert!((view.points[13].total_consumed - 650.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn hourly_rollup_rejects_multi_day_window() {
        let (balances, events) = seeded().await;
        let handler = GetRollupHandler::new(balances, events);

        let err = handler
            .handle(query(Granularity::Hour, date(2024, 5, 6), date(2024, 5, 7)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let (balances, events) = seeded().await;
        let handler = GetRollupHandler::new(balances, events);

        let err = handler
            .handle(query(Granularity::Day, date(2024, 5, 9), date(2024, 5, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, RollupError::InvalidWindow(_)));
    }

    #[tokio::test]
    async fn exhausted_budget_fails_whole_rollup() {
        let (balances, events) = seeded().await;
        let handler = GetRollupHandler::new(balances, events).with_deadline(Duration::ZERO);

        let err = handler
            .handle(query(Granularity::Month, date(2015, 1, 1), date(2024, 12, 31)))
            .await
            .unwrap_err();
        assert_eq!(err, RollupError::DeadlineExceeded);
    }

    struct SlowBalanceStore;

    #[async_trait]
    impl DailyBalanceStore for SlowBalanceStore {
        async fn get(
            &self,
            _user_id: &UserId,
            _date: NaiveDate,
        ) -> Result<Option<DailyBalance>, DomainError> {
            Ok(None)
        }

        async fn upsert(&self, _balance: &DailyBalance) -> Result<(), DomainError> {
            Ok(())
        }

        async fn range(
            &self,
            _user_id: &UserId,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<DailyBalance>, DomainError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn slow_fetch_times_out() {
        let handler = GetRollupHandler::new(
            Arc::new(SlowBalanceStore),
            Arc::new(InMemoryCalorieEventStore::new()),
        )
        .with_deadline(Duration::from_millis(10));

        let err = handler
            .handle(query(Granularity::Day, date(2024, 5, 1), date(2024, 5, 7)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DeadlineExceeded);
    }

    #[tokio::test]
    async fn configured_deadline_is_used() {
        let config = EngineConfig {
            rollup_deadline_ms: 10,
            ..EngineConfig::default()
        };
        let handler = GetRollupHandler::new(
            Arc::new(SlowBalanceStore),
            Arc::new(InMemoryCalorieEventStore::new()),
        )
        .with_engine_config(&config);

        let err = handler
            .handle(query(Granularity::Week, date(2024, 5, 1), date(2024, 5, 7)))
            .await
            .unwrap_err();
        assert_eq!(err, RollupError::DeadlineExceeded);
    }
}
