//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CALORIE_BALANCE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use calorie_balance::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Rollup deadline: {:?}", config.engine.rollup_deadline());
//! ```

mod database;
mod engine;
mod error;
mod logging;

pub use database::{DatabaseConfig, StoreBackend, MAX_POOL_CONNECTIONS};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection; leave the URL empty to run on in-memory stores
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Calculator and rollup tunables
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CALORIE_BALANCE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CALORIE_BALANCE__DATABASE__URL=...` -> `database.url = ...`
    /// - `CALORIE_BALANCE__ENGINE__TREND_THRESHOLD=0.15` -> `engine.trend_threshold = 0.15`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CALORIE_BALANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only checked when it selects PostgreSQL.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.database.backend() == StoreBackend::Postgres {
            self.database.validate()?;
        }
        self.logging.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "CALORIE_BALANCE__DATABASE__URL",
        "CALORIE_BALANCE__LOGGING__FORMAT",
        "CALORIE_BALANCE__ENGINE__TREND_THRESHOLD",
        "CALORIE_BALANCE__ENGINE__ROLLUP_DEADLINE_MS",
        "CALORIE_BALANCE__ENGINE__CONSISTENCY_MIN_DAYS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.backend(), StoreBackend::InMemory);
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CALORIE_BALANCE__DATABASE__URL", "postgresql://test@localhost/calories");
        env::set_var("CALORIE_BALANCE__LOGGING__FORMAT", "json");
        env::set_var("CALORIE_BALANCE__ENGINE__TREND_THRESHOLD", "0.15");
        env::set_var("CALORIE_BALANCE__ENGINE__ROLLUP_DEADLINE_MS", "250");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/calories");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.engine.trend_threshold, 0.15);
        assert_eq!(config.engine.rollup_deadline_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_engine_setting_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CALORIE_BALANCE__ENGINE__CONSISTENCY_MIN_DAYS", "45");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }
}
