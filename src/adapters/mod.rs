//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores for tests and local runs
//! - `postgres` - PostgreSQL stores (sqlx)
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use memory::{
    InMemoryCalorieEventStore, InMemoryCalorieGoalStore, InMemoryDailyBalanceStore,
    InMemoryMetabolicProfileStore, InMemoryProfileProvider,
};
pub use postgres::{
    PostgresCalorieEventStore, PostgresCalorieGoalStore, PostgresDailyBalanceStore,
    PostgresMetabolicProfileStore, PostgresProfileProvider,
};
