//! DetectPatternsHandler - Query handler for behavioral patterns.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::rollup::{
    DateRange, PatternDetector, PatternDimension, PatternReport, RollupError,
};
use crate::ports::CalorieEventStore;

/// Query for patterns in the events of `[start, end]`.
#[derive(Debug, Clone)]
pub struct DetectPatternsQuery {
    pub user_id: UserId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `None` runs every dimension.
    pub dimension: Option<PatternDimension>,
    /// Reports below this confidence are dropped.
    pub min_confidence: f64,
}

/// Handler for pattern detection.
pub struct DetectPatternsHandler {
    events: Arc<dyn CalorieEventStore>,
    detector: PatternDetector,
}

impl DetectPatternsHandler {
    pub fn new(events: Arc<dyn CalorieEventStore>) -> Self {
        Self {
            events,
            detector: PatternDetector::default(),
        }
    }

    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.detector = config.pattern_detector();
        self
    }

    #[tracing::instrument(skip(self), fields(user_id = %query.user_id))]
    pub async fn handle(
        &self,
        query: DetectPatternsQuery,
    ) -> Result<Vec<PatternReport>, RollupError> {
        let range = DateRange::new(query.start, query.end)?;
        let events = self
            .events
            .query(
                &query.user_id,
                Timestamp::start_of_day(range.start()),
                Timestamp::start_of_day(range.end()).add_days(1),
                None,
            )
            .await?;

        let reports = match query.dimension {
            Some(dimension) => self.detector.detect(&events, dimension, query.min_confidence),
            None => self.detector.detect_all(&events, query.min_confidence),
        };

        debug!(
            events = events.len(),
            patterns = reports.len(),
            "patterns detected"
        );
        Ok(reports)
    }
}
