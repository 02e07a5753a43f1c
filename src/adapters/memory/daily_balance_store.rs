//! In-memory daily balance store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::ledger::DailyBalance;
use crate::ports::DailyBalanceStore;

/// Ledger rows keyed by user, then date.
///
/// The `BTreeMap` keeps ranges ordered and the key enforces one row per
/// (user, date).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDailyBalanceStore {
    rows: Arc<RwLock<HashMap<UserId, BTreeMap<NaiveDate, DailyBalance>>>>,
}

impl InMemoryDailyBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.values().map(BTreeMap::len).sum()
    }
}

#[async_trait]
impl DailyBalanceStore for InMemoryDailyBalanceStore {
    async fn get(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyBalance>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.get(user_id).and_then(|days| days.get(&date)).cloned())
    }

    async fn upsert(&self, balance: &DailyBalance) -> Result<(), DomainError> {
        self.rows
            .write()
            .await
            .entry(balance.user_id().clone())
            .or_default()
            .insert(balance.date(), balance.clone());
        Ok(())
    }

    async fn range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBalance>, DomainError> {
        if end < start {
            return Ok(Vec::new());
        }
        let rows = self.rows.read().await;
        Ok(rows
            .get(user_id)
            .map(|days| days.range(start..=end).map(|(_, row)| row.clone()).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn row(day: u32, consumed: f64) -> DailyBalance {
        DailyBalance::reconstitute(
            UserId::new("alice").unwrap(),
            d(day),
            consumed,
            0.0,
            None,
            None,
            None,
            Timestamp::start_of_day(d(day)),
            Timestamp::start_of_day(d(day)),
        )
    }

    #[tokio::test]
    async fn upsert_replaces_row_for_same_day() {
        let store = InMemoryDailyBalanceStore::new();
        store.upsert(&row(1, 1800.0)).await.unwrap();
        store.upsert(&row(1, 2100.0)).await.unwrap();

        assert_eq!(store.count().await, 1);
        let found = store.get(&UserId::new("alice").unwrap(), d(1)).await.unwrap().unwrap();
        assert_eq!(found.calories_consumed(), 2100.0);
    }

    #[tokio::test]
    async fn range_is_inclusive_and_ordered() {
        let store = InMemoryDailyBalanceStore::new();
        for day in [5, 1, 3, 7] {
            store.upsert(&row(day, 2000.0)).await.unwrap();
        }
        let rows = store.range(&UserId::new("alice").unwrap(), d(1), d(5)).await.unwrap();
        let days: Vec<NaiveDate> = rows.iter().map(DailyBalance::date).collect();
        assert_eq!(days, vec![d(1), d(3), d(5)]);
    }
}
