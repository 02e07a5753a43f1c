//! PostgreSQL implementation of CalorieGoalStore.
//!
//! `activate` runs deactivate + insert in one transaction; the partial
//! unique index on `(user_id) WHERE is_active` rejects any interleaving
//! that would leave two active goals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::{DomainError, GoalId, Timestamp, UserId};
use crate::domain::goal::{CalorieGoal, GoalType};
use crate::ports::CalorieGoalStore;

use super::{column, database_error};

const INSERT_GOAL: &str = r#"
    INSERT INTO calorie_goals (
        id, user_id, goal_type, target_calories, target_weight_kg,
        weekly_weight_change_kg, start_date, end_date, is_active, created_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

const DEACTIVATE_GOALS: &str =
    "UPDATE calorie_goals SET is_active = FALSE WHERE user_id = $1 AND is_active";

/// Goals in `calorie_goals`.
#[derive(Clone)]
pub struct PostgresCalorieGoalStore {
    pool: PgPool,
}

impl PostgresCalorieGoalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        goal: &CalorieGoal,
    ) -> Result<(), DomainError> {
        sqlx::query(INSERT_GOAL)
            .bind(goal.id().as_uuid())
            .bind(goal.user_id().as_str())
            .bind(goal.goal_type().as_str())
            .bind(goal.target_calories())
            .bind(goal.target_weight_kg())
            .bind(goal.weekly_weight_change_kg())
            .bind(goal.start_date())
            .bind(goal.end_date())
            .bind(goal.is_active())
            .bind(goal.created_at().as_datetime())
            .execute(&mut **tx)
            .await
            .map_err(|e| database_error("insert calorie goal", e))?;
        Ok(())
    }
}

#[async_trait]
impl CalorieGoalStore for PostgresCalorieGoalStore {
    async fn get_active(&self, user_id: &UserId) -> Result<Option<CalorieGoal>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, goal_type, target_calories, target_weight_kg,
                   weekly_weight_change_kg, start_date, end_date, is_active, created_at
            FROM calorie_goals
            WHERE user_id = $1 AND is_active
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch active goal", e))?;

        row.map(|row| row_to_goal(&row)).transpose()
    }

    async fn deactivate_all(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(DEACTIVATE_GOALS)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deactivate goals", e))?;

        Ok(result.rows_affected())
    }

    async fn create(&self, goal: &CalorieGoal) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("start transaction", e))?;
        Self::insert(&mut tx, goal).await?;
        tx.commit()
            .await
            .map_err(|e| database_error("commit transaction", e))
    }

    async fn activate(&self, goal: &CalorieGoal) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("start transaction", e))?;

        // Serialize concurrent activations for the same user.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(goal.user_id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("lock user goals", e))?;

        sqlx::query(DEACTIVATE_GOALS)
            .bind(goal.user_id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deactivate goals", e))?;

        Self::insert(&mut tx, goal).await?;

        tx.commit()
            .await
            .map_err(|e| database_error("commit transaction", e))
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<CalorieGoal>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, goal_type, target_calories, target_weight_kg,
                   weekly_weight_change_kg, start_date, end_date, is_active, created_at
            FROM calorie_goals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list goals", e))?;

        rows.iter().map(row_to_goal).collect()
    }
}

fn row_to_goal(row: &PgRow) -> Result<CalorieGoal, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let goal_type: String = column(row, "goal_type")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    let goal_type: GoalType = goal_type
        .parse()
        .map_err(|e| database_error("decode goal_type", e))?;

    Ok(CalorieGoal::reconstitute(
        GoalId::from_uuid(id),
        UserId::new(user_id)?,
        goal_type,
        column(row, "target_calories")?,
        column(row, "target_weight_kg")?,
        column(row, "weekly_weight_change_kg")?,
        column(row, "start_date")?,
        column(row, "end_date")?,
        column(row, "is_active")?,
        Timestamp::from_datetime(created_at),
    ))
}
