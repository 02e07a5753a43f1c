//! UpdateDailyBalanceHandler - Command handler for manual ledger entries.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{DailyBalance, DailyBalanceUpdate, LedgerError};
use crate::ports::{Clock, DailyBalanceStore, MetabolicProfileStore, ProfileProvider};

use super::balance_writer::BalanceWriter;

/// Command that sets some of a day's ledger inputs.
///
/// Present fields replace the stored value; absent fields are left alone.
#[derive(Debug, Clone)]
pub struct UpdateDailyBalanceCommand {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub calories_consumed: Option<f64>,
    pub calories_burned_exercise: Option<f64>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
}

/// Handler for updating daily balances.
pub struct UpdateDailyBalanceHandler {
    writer: BalanceWriter,
}

impl UpdateDailyBalanceHandler {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        metabolic_profiles: Arc<dyn MetabolicProfileStore>,
        balances: Arc<dyn DailyBalanceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            writer: BalanceWriter::new(profiles, metabolic_profiles, balances, clock),
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %cmd.user_id, date = %cmd.date))]
    pub async fn handle(
        &self,
        cmd: UpdateDailyBalanceCommand,
    ) -> Result<DailyBalance, LedgerError> {
        let update = DailyBalanceUpdate::try_new(
            cmd.date,
            cmd.calories_consumed,
            cmd.calories_burned_exercise,
            cmd.weight_kg,
            cmd.notes,
        )?;

        self.writer.ensure_user(&cmd.user_id).await?;
        let row = self.writer.write(&cmd.user_id, &update).await?;

        info!(net_calories = row.net_calories(), "daily balance updated");
        Ok(row)
    }
}
