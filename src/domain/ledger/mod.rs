//! Energy ledger module.
//!
//! Raw calorie events are append-only facts. The ledger keeps exactly one
//! `DailyBalance` row per (user, date), maintained only by the
//! `DailyBalanceAggregator` with "set" (never "add") update semantics.

mod aggregator;
mod balance;
mod errors;
mod event;

pub use aggregator::{DailyBalanceAggregator, DailyBalanceUpdate};
pub use balance::DailyBalance;
pub use errors::LedgerError;
pub use event::{CalorieEvent, CalorieEventType, EventEntry, EventPayload};
