//! Shared write path for ledger rows.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::UserId;
use crate::domain::ledger::{DailyBalance, DailyBalanceAggregator, DailyBalanceUpdate, LedgerError};
use crate::ports::{Clock, DailyBalanceStore, MetabolicProfileStore, ProfileProvider};

/// Fetches the row, applies an update with a fresh BMR snapshot, upserts.
#[derive(Clone)]
pub(super) struct BalanceWriter {
    profiles: Arc<dyn ProfileProvider>,
    metabolic_profiles: Arc<dyn MetabolicProfileStore>,
    balances: Arc<dyn DailyBalanceStore>,
    clock: Arc<dyn Clock>,
}

impl BalanceWriter {
    pub(super) fn new(
        profiles: Arc<dyn ProfileProvider>,
        metabolic_profiles: Arc<dyn MetabolicProfileStore>,
        balances: Arc<dyn DailyBalanceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            metabolic_profiles,
            balances,
            clock,
        }
    }

    pub(super) async fn ensure_user(&self, user_id: &UserId) -> Result<(), LedgerError> {
        match self.profiles.get(user_id).await? {
            Some(_) => Ok(()),
            None => Err(LedgerError::user_not_found(user_id.clone())),
        }
    }

    /// Writes `update` into the row for its date.
    ///
    /// The BMR snapshot comes from the stored metabolic profile when it is
    /// still current. An expired or missing profile contributes nothing, so
    /// the row keeps its previous snapshot (unset on a new row).
    pub(super) async fn write(
        &self,
        user_id: &UserId,
        update: &DailyBalanceUpdate,
    ) -> Result<DailyBalance, LedgerError> {
        let (existing, metabolic) = futures::try_join!(
            self.balances.get(user_id, update.date()),
            self.metabolic_profiles.get_current(user_id),
        )?;
        let now = self.clock.now();
        let bmr_snapshot = metabolic
            .filter(|profile| profile.is_current(now))
            .map(|profile| profile.bmr());

        let row = DailyBalanceAggregator::apply(existing, user_id, update, bmr_snapshot, now);
        self.balances.upsert(&row).await?;

        debug!(
            date = %row.date(),
            net_calories = row.net_calories(),
            completeness = row.data_completeness_score(),
            "daily balance written"
        );
        Ok(row)
    }
}
