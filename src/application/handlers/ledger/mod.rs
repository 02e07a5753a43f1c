//! Ledger command handlers.

mod balance_writer;
mod record_calorie_event;
mod update_daily_balance;

pub use record_calorie_event::{
    RecordCalorieEventCommand, RecordCalorieEventHandler, RecordCalorieEventResult,
};
pub use update_daily_balance::{UpdateDailyBalanceCommand, UpdateDailyBalanceHandler};
