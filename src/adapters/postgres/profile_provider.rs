//! PostgreSQL implementation of ProfileProvider.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{
    ActivityLevel, Gender, PhysiologicalAttributes, UserPhysiologicalProfile,
};
use crate::ports::ProfileProvider;

use super::{column, database_error};

/// Reads `physiological_profiles`.
#[derive(Clone)]
pub struct PostgresProfileProvider {
    pool: PgPool,
}

impl PostgresProfileProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileProvider for PostgresProfileProvider {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserPhysiologicalProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, age, gender, height_cm, weight_kg, activity_level
            FROM physiological_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch physiological profile", e))?;

        row.map(|row| row_to_profile(user_id, &row)).transpose()
    }
}

fn row_to_profile(user_id: &UserId, row: &PgRow) -> Result<UserPhysiologicalProfile, DomainError> {
    let age: Option<i32> = column(row, "age")?;
    let gender: Option<String> = column(row, "gender")?;
    let activity_level: Option<String> = column(row, "activity_level")?;

    let attributes = PhysiologicalAttributes {
        age: age
            .map(u32::try_from)
            .transpose()
            .map_err(|e| database_error("decode age", e))?,
        gender: gender
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(|e| database_error("decode gender", e))?,
        height_cm: column(row, "height_cm")?,
        weight_kg: column(row, "weight_kg")?,
        activity_level: activity_level
            .map(|a| a.parse::<ActivityLevel>())
            .transpose()
            .map_err(|e| database_error("decode activity_level", e))?,
    };

    UserPhysiologicalProfile::try_new(user_id.clone(), attributes)
        .map_err(|e| database_error("validate stored profile", e))
}
