//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresProfileProvider` - Physiological profiles
//! - `PostgresMetabolicProfileStore` - Metabolic snapshots
//! - `PostgresCalorieEventStore` - Append-only events
//! - `PostgresDailyBalanceStore` - Keyed upsert of ledger rows
//! - `PostgresCalorieGoalStore` - Transactional goal activation

mod calorie_event_store;
mod calorie_goal_store;
mod daily_balance_store;
mod metabolic_profile_store;
mod profile_provider;

pub use calorie_event_store::PostgresCalorieEventStore;
pub use calorie_goal_store::PostgresCalorieGoalStore;
pub use daily_balance_store::PostgresDailyBalanceStore;
pub use metabolic_profile_store::PostgresMetabolicProfileStore;
pub use profile_provider::PostgresProfileProvider;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens a connection pool sized from configuration, migrating the schema
/// first when `run_migrations` is set.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| database_error("connect to database", e))?;

    if config.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("calorie balance schema migrated");
    }
    Ok(pool)
}

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to run migrations: {}", e),
            )
        })
}

pub(crate) fn database_error(action: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// Reads a column, mapping decode failures to `DatabaseError`.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| database_error(&format!("get {}", name), e))
}
