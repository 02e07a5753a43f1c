//! Goal command and query handlers.

mod create_goal;
mod get_active_goal;

pub use create_goal::{CreateGoalCommand, CreateGoalHandler, CreateGoalResult};
pub use get_active_goal::{GetActiveGoalHandler, GetActiveGoalQuery};
