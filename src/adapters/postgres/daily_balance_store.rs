//! PostgreSQL implementation of DailyBalanceStore.
//!
//! The `(user_id, date)` primary key plus `ON CONFLICT` makes every write
//! a single atomic upsert.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ledger::DailyBalance;
use crate::ports::DailyBalanceStore;

use super::{column, database_error};

/// Ledger rows in `daily_balances`.
#[derive(Clone)]
pub struct PostgresDailyBalanceStore {
    pool: PgPool,
}

impl PostgresDailyBalanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyBalanceStore for PostgresDailyBalanceStore {
    async fn get(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyBalance>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, date, calories_consumed, calories_burned_exercise,
                   calories_burned_bmr, weight_kg, notes, created_at, updated_at
            FROM daily_balances
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch daily balance", e))?;

        row.map(|row| row_to_balance(&row)).transpose()
    }

    async fn upsert(&self, balance: &DailyBalance) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO daily_balances (
                user_id, date, calories_consumed, calories_burned_exercise,
                calories_burned_bmr, net_calories, weight_kg, notes,
                data_completeness_score, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, date) DO UPDATE SET
                calories_consumed = EXCLUDED.calories_consumed,
                calories_burned_exercise = EXCLUDED.calories_burned_exercise,
                calories_burned_bmr = EXCLUDED.calories_burned_bmr,
                net_calories = EXCLUDED.net_calories,
                weight_kg = EXCLUDED.weight_kg,
                notes = EXCLUDED.notes,
                data_completeness_score = EXCLUDED.data_completeness_score,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(balance.user_id().as_str())
        .bind(balance.date())
        .bind(balance.calories_consumed())
        .bind(balance.calories_burned_exercise())
        .bind(balance.calories_burned_bmr())
        .bind(balance.net_calories())
        .bind(balance.weight_kg())
        .bind(balance.notes())
        .bind(balance.data_completeness_score())
        .bind(balance.created_at().as_datetime())
        .bind(balance.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("upsert daily balance", e))?;

        Ok(())
    }

    async fn range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBalance>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, date, calories_consumed, calories_burned_exercise,
                   calories_burned_bmr, weight_kg, notes, created_at, updated_at
            FROM daily_balances
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("fetch daily balance range", e))?;

        rows.iter().map(row_to_balance).collect()
    }
}

fn row_to_balance(row: &PgRow) -> Result<DailyBalance, DomainError> {
    let user_id: String = column(row, "user_id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    // net_calories and completeness are recomputed on rehydration
    Ok(DailyBalance::reconstitute(
        UserId::new(user_id)?,
        column(row, "date")?,
        column(row, "calories_consumed")?,
        column(row, "calories_burned_exercise")?,
        column(row, "calories_burned_bmr")?,
        column(row, "weight_kg")?,
        column(row, "notes")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
