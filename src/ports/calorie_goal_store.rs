//! Calorie goal store port.
//!
//! # Design
//!
//! - **Single active goal**: at most one goal per user has `is_active`
//! - **Atomic activation**: `activate` deactivates and inserts as one unit

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::goal::CalorieGoal;
use async_trait::async_trait;

/// Persistence for calorie goals.
#[async_trait]
pub trait CalorieGoalStore: Send + Sync {
    /// The user's active goal, if any.
    async fn get_active(&self, user_id: &UserId) -> Result<Option<CalorieGoal>, DomainError>;

    /// Mark every goal of the user inactive.
    ///
    /// Returns how many goals were deactivated.
    async fn deactivate_all(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Insert a goal as-is.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure, including a second
    ///   active goal for the user
    async fn create(&self, goal: &CalorieGoal) -> Result<(), DomainError>;

    /// Deactivate all goals of `goal.user_id` and insert `goal` as the
    /// active one, atomically.
    ///
    /// Concurrent activations for one user must leave exactly one active
    /// goal. On failure nothing changes.
    async fn activate(&self, goal: &CalorieGoal) -> Result<(), DomainError>;

    /// Every goal of the user, newest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<CalorieGoal>, DomainError>;
}
