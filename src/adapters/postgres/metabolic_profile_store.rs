//! PostgreSQL implementation of MetabolicProfileStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, MetabolicProfileId, Timestamp, UserId};
use crate::domain::metabolic::MetabolicProfile;
use crate::ports::MetabolicProfileStore;

use super::{column, database_error};

/// Stores metabolic profiles in `metabolic_profiles`.
#[derive(Clone)]
pub struct PostgresMetabolicProfileStore {
    pool: PgPool,
}

impl PostgresMetabolicProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetabolicProfileStore for PostgresMetabolicProfileStore {
    async fn get_current(&self, user_id: &UserId) -> Result<Option<MetabolicProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, bmr, tdee, calculated_at, valid_until
            FROM metabolic_profiles
            WHERE user_id = $1
            ORDER BY calculated_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch metabolic profile", e))?;

        row.map(|row| row_to_profile(&row)).transpose()
    }

    async fn put(&self, profile: &MetabolicProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO metabolic_profiles (id, user_id, bmr, tdee, calculated_at, valid_until)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.user_id().as_str())
        .bind(profile.bmr())
        .bind(profile.tdee())
        .bind(profile.calculated_at().as_datetime())
        .bind(profile.valid_until().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert metabolic profile", e))?;

        Ok(())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<MetabolicProfile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, bmr, tdee, calculated_at, valid_until
            FROM metabolic_profiles
            WHERE user_id = $1
            ORDER BY calculated_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("fetch metabolic history", e))?;

        rows.iter().map(row_to_profile).collect()
    }
}

fn row_to_profile(row: &PgRow) -> Result<MetabolicProfile, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let calculated_at: DateTime<Utc> = column(row, "calculated_at")?;
    let valid_until: DateTime<Utc> = column(row, "valid_until")?;

    Ok(MetabolicProfile::reconstitute(
        MetabolicProfileId::from_uuid(id),
        UserId::new(user_id)?,
        column(row, "bmr")?,
        column(row, "tdee")?,
        Timestamp::from_datetime(calculated_at),
        Timestamp::from_datetime(valid_until),
    ))
}
