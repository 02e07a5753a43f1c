//! RecordCalorieEventHandler - Command handler for raw calorie events.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::ledger::{
    CalorieEvent, DailyBalance, DailyBalanceAggregator, EventPayload, LedgerError,
};
use crate::ports::{
    CalorieEventStore, Clock, DailyBalanceStore, MetabolicProfileStore, ProfileProvider,
};

use super::balance_writer::BalanceWriter;

/// Command to record one event, or a batch recorded together.
#[derive(Debug, Clone)]
pub struct RecordCalorieEventCommand {
    pub user_id: UserId,
    pub payload: EventPayload,
    pub timestamp: Timestamp,
    pub source: String,
    pub confidence_score: f64,
}

/// Result of recording an event.
#[derive(Debug, Clone)]
pub struct RecordCalorieEventResult {
    pub event: CalorieEvent,
    /// The ledger row for the event's date after re-folding.
    pub balance: DailyBalance,
}

/// Handler for recording calorie events.
///
/// After the append every event of that date is folded into one
/// replacement update, so the row always reflects the full event log and
/// replays never double count.
pub struct RecordCalorieEventHandler {
    events: Arc<dyn CalorieEventStore>,
    writer: BalanceWriter,
}

impl RecordCalorieEventHandler {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        metabolic_profiles: Arc<dyn MetabolicProfileStore>,
        events: Arc<dyn CalorieEventStore>,
        balances: Arc<dyn DailyBalanceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            writer: BalanceWriter::new(profiles, metabolic_profiles, balances, clock),
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %cmd.user_id))]
    pub async fn handle(
        &self,
        cmd: RecordCalorieEventCommand,
    ) -> Result<RecordCalorieEventResult, LedgerError> {
        // 1. Validate and append
        let event = CalorieEvent::try_new(
            cmd.user_id.clone(),
            cmd.payload,
            cmd.timestamp,
            cmd.source,
            cmd.confidence_score,
        )?;
        self.writer.ensure_user(&cmd.user_id).await?;
        self.events.append(&event).await?;

        // 2. Re-fold the whole day
        let date = event.timestamp().date();
        let day_start = Timestamp::start_of_day(date);
        let day_events = self
            .events
            .query(&cmd.user_id, day_start, day_start.add_days(1), None)
            .await?;
        let update = DailyBalanceAggregator::fold_events(date, &day_events);

        // 3. Write the row
        let balance = self.writer.write(&cmd.user_id, &update).await?;

        info!(
            event_id = %event.id(),
            event_type = %event.event_type(),
            date = %date,
            events_today = day_events.len(),
            "calorie event recorded"
        );

        Ok(RecordCalorieEventResult { event, balance })
    }
}
