//! GetActivitySummaryHandler - Query handler for streaks and consistency.

use std::sync::Arc;

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::foundation::UserId;
use crate::domain::rollup::{ActivitySummary, DateRange, RollupError, TemporalRollupEngine};
use crate::ports::{Clock, DailyBalanceStore};

/// Days of history loaded for the longest-streak search.
const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Query for a user's engagement summary as of today.
#[derive(Debug, Clone)]
pub struct GetActivitySummaryQuery {
    pub user_id: UserId,
    /// History searched for the longest streak. Never shorter than the
    /// consistency window.
    pub lookback_days: Option<u32>,
}

/// Handler for activity summaries.
pub struct GetActivitySummaryHandler {
    balances: Arc<dyn DailyBalanceStore>,
    clock: Arc<dyn Clock>,
    engine: TemporalRollupEngine,
}

impl GetActivitySummaryHandler {
    pub fn new(balances: Arc<dyn DailyBalanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            balances,
            clock,
            engine: TemporalRollupEngine::default(),
        }
    }

    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.engine = TemporalRollupEngine::new(config.rollup_settings());
        self
    }

    #[tracing::instrument(skip(self), fields(user_id = %query.user_id))]
    pub async fn handle(
        &self,
        query: GetActivitySummaryQuery,
    ) -> Result<ActivitySummary, RollupError> {
        let today = self.clock.today();
        let lookback = query
            .lookback_days
            .unwrap_or(DEFAULT_LOOKBACK_DAYS)
            .max(self.engine.settings().consistency_window_days);
        let window = DateRange::trailing(today, lookback);

        let rows = self
            .balances
            .range(&query.user_id, window.start(), window.end())
            .await?;
        let summary = self.engine.activity_summary(&rows, today);

        debug!(
            current_streak = summary.current_streak,
            consistency = summary.consistency_score,
            "activity summarized"
        );
        Ok(summary)
    }
}
