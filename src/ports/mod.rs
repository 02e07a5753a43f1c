//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `ProfileProvider` - Physiological attributes (read only)
//! - `MetabolicProfileStore` - Computed BMR/TDEE snapshots
//! - `CalorieEventStore` - Append-only raw events
//! - `DailyBalanceStore` - One ledger row per (user, date)
//! - `CalorieGoalStore` - Goals with atomic single-active activation
//!
//! ## Runtime Ports
//!
//! - `Clock` - Current time

mod calorie_event_store;
mod calorie_goal_store;
mod clock;
mod daily_balance_store;
mod metabolic_profile_store;
mod profile_provider;

pub use calorie_event_store::CalorieEventStore;
pub use calorie_goal_store::CalorieGoalStore;
pub use clock::Clock;
pub use daily_balance_store::DailyBalanceStore;
pub use metabolic_profile_store::MetabolicProfileStore;
pub use profile_provider::ProfileProvider;
