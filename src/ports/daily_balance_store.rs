//! Daily balance store port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::ledger::DailyBalance;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence for ledger rows, keyed by (user, date).
///
/// Implementations must make `upsert` atomic on that key so concurrent
/// writers for the same day resolve to last-writer-wins instead of two
/// rows.
#[async_trait]
pub trait DailyBalanceStore: Send + Sync {
    /// The row for a user and date, if any.
    async fn get(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyBalance>, DomainError>;

    /// Insert or replace the row for `(balance.user_id, balance.date)`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, balance: &DailyBalance) -> Result<(), DomainError>;

    /// Rows with `start <= date <= end`, ordered by date.
    async fn range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBalance>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_balance_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn DailyBalanceStore) {}
    }
}
