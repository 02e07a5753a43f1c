//! In-memory adapters.
//!
//! Back every store port with `tokio::sync::RwLock`-guarded maps. Used by
//! unit tests, integration tests and local development.

mod calorie_event_store;
mod calorie_goal_store;
mod daily_balance_store;
mod metabolic_profile_store;
mod profile_provider;

pub use calorie_event_store::InMemoryCalorieEventStore;
pub use calorie_goal_store::InMemoryCalorieGoalStore;
pub use daily_balance_store::InMemoryDailyBalanceStore;
pub use metabolic_profile_store::InMemoryMetabolicProfileStore;
pub use profile_provider::InMemoryProfileProvider;
