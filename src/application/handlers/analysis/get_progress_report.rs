//! GetProgressReportHandler - Query handler for goal adherence over a window.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::analysis::{AnalysisError, ProgressAnalyzer, ProgressReport};
use crate::domain::foundation::UserId;
use crate::ports::{CalorieGoalStore, DailyBalanceStore};

/// Query for a progress report over `[start, end]`.
#[derive(Debug, Clone)]
pub struct GetProgressReportQuery {
    pub user_id: UserId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Handler for progress reports.
pub struct GetProgressReportHandler {
    goals: Arc<dyn CalorieGoalStore>,
    balances: Arc<dyn DailyBalanceStore>,
    analyzer: ProgressAnalyzer,
}

impl GetProgressReportHandler {
    pub fn new(goals: Arc<dyn CalorieGoalStore>, balances: Arc<dyn DailyBalanceStore>) -> Self {
        Self {
            goals,
            balances,
            analyzer: ProgressAnalyzer::default(),
        }
    }

    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.analyzer = config.progress_analyzer();
        self
    }

    #[tracing::instrument(skip(self), fields(user_id = %query.user_id))]
    pub async fn handle(
        &self,
        query: GetProgressReportQuery,
    ) -> Result<ProgressReport, AnalysisError> {
        ensure_ordered(query.start, query.end)?;

        let (goal, window) = futures::try_join!(
            self.goals.get_active(&query.user_id),
            self.balances.range(&query.user_id, query.start, query.end),
        )?;
        let goal = goal.ok_or_else(|| AnalysisError::no_active_goal(query.user_id.clone()))?;

        let report = self.analyzer.analyze(&window, &goal);
        debug!(
            days = report.days_analyzed,
            adherence_rate = report.adherence_rate,
            "progress analyzed"
        );
        Ok(report)
    }
}

pub(super) fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<(), AnalysisError> {
    if end < start {
        return Err(AnalysisError::invalid_window(format!(
            "end {} precedes start {}",
            end, start
        )));
    }
    Ok(())
}
