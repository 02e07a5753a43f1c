//! Store backend selection and PostgreSQL pool settings.
//!
//! An empty URL wires the handlers against the in-memory stores. Pool
//! settings are read by `adapters::postgres::connect` once a URL is set.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool `connect` will open.
pub const MAX_POOL_CONNECTIONS: u32 = 100;

/// Which adapters back the store ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL; empty selects in-memory stores
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Wait for a pooled connection before a store call fails, in ms
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    /// Apply `migrations/` as soon as the pool is open
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn backend(&self) -> StoreBackend {
        if self.url.trim().is_empty() {
            StoreBackend::InMemory
        } else {
            StoreBackend::Postgres
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Checks the PostgreSQL settings.
    ///
    /// # Errors
    ///
    /// - `InvalidDatabaseUrl` for any scheme other than postgres/postgresql
    /// - `InvalidPoolSize` for an empty pool
    /// - `PoolSizeTooLarge` above `MAX_POOL_CONNECTIONS`
    /// - `InvalidAcquireTimeout` for a zero timeout
    pub fn validate(&self) -> Result<(), ValidationError> {
        let scheme = self.url.split_once("://").map(|(scheme, _)| scheme);
        if !matches!(scheme, Some("postgres") | Some("postgresql")) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_CONNECTIONS {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.acquire_timeout_ms == 0 {
            return Err(ValidationError::InvalidAcquireTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_ms() -> u64 {
    3_000
}

fn default_run_migrations() -> bool {
    true
}
