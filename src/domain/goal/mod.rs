//! Calorie goal module.
//!
//! # Components
//!
//! - `GoalSpec` - Validated goal parameters (sign rules per goal type)
//! - `CalorieGoal` - The persisted goal; one active goal per user
//! - `CalorieGoalCalculator` - Daily calorie target with a safety clamp
//! - `GoalError` - Goal-specific failures

mod calculator;
mod errors;
mod aggregate;

pub use calculator::{CalorieGoalCalculator, CalorieTarget};
pub use errors::GoalError;
pub use aggregate::{CalorieGoal, GoalSpec, GoalType, MAX_WEEKLY_CHANGE_KG};
