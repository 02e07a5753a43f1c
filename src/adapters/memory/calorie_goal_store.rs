//! In-memory calorie goal store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::goal::CalorieGoal;
use crate::ports::CalorieGoalStore;

/// Goals per user.
///
/// `activate` holds the write lock across deactivate and insert, which is
/// what makes it atomic here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalorieGoalStore {
    goals: Arc<RwLock<HashMap<UserId, Vec<CalorieGoal>>>>,
}

impl InMemoryCalorieGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn active_count(&self, user_id: &UserId) -> usize {
        self.goals
            .read()
            .await
            .get(user_id)
            .map(|goals| goals.iter().filter(|g| g.is_active()).count())
            .unwrap_or(0)
    }
}

fn deactivate_in(goals: &mut [CalorieGoal]) -> u64 {
    let mut changed = 0;
    for goal in goals.iter_mut().filter(|g| g.is_active()) {
        goal.deactivate();
        changed += 1;
    }
    changed
}

#[async_trait]
impl CalorieGoalStore for InMemoryCalorieGoalStore {
    async fn get_active(&self, user_id: &UserId) -> Result<Option<CalorieGoal>, DomainError> {
        let goals = self.goals.read().await;
        Ok(goals
            .get(user_id)
            .and_then(|list| list.iter().find(|g| g.is_active()))
            .cloned())
    }

    async fn deactivate_all(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut goals = self.goals.write().await;
        Ok(goals.get_mut(user_id).map(|list| deactivate_in(list)).unwrap_or(0))
    }

    async fn create(&self, goal: &CalorieGoal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        let list = goals.entry(goal.user_id().clone()).or_default();
        if goal.is_active() && list.iter().any(CalorieGoal::is_active) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("User {} already has an active goal", goal.user_id()),
            ));
        }
        list.push(goal.clone());
        Ok(())
    }

    async fn activate(&self, goal: &CalorieGoal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        let list = goals.entry(goal.user_id().clone()).or_default();
        deactivate_in(list);
        list.push(goal.clone());
        Ok(())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<CalorieGoal>, DomainError> {
        let goals = self.goals.read().await;
        let mut list = goals.get(user_id).cloned().unwrap_or_default();
        list.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(list)
    }
}
