//! GetActiveGoalHandler - Query handler for a user's active goal.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::goal::{CalorieGoal, GoalError};
use crate::ports::CalorieGoalStore;

/// Query for the active goal.
#[derive(Debug, Clone)]
pub struct GetActiveGoalQuery {
    pub user_id: UserId,
}

/// Handler for retrieving the active goal.
pub struct GetActiveGoalHandler {
    goals: Arc<dyn CalorieGoalStore>,
}

impl GetActiveGoalHandler {
    pub fn new(goals: Arc<dyn CalorieGoalStore>) -> Self {
        Self { goals }
    }

    /// Returns `None` when the user has no active goal.
    #[tracing::instrument(skip(self), fields(user_id = %query.user_id))]
    pub async fn handle(
        &self,
        query: GetActiveGoalQuery,
    ) -> Result<Option<CalorieGoal>, GoalError> {
        Ok(self.goals.get_active(&query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCalorieGoalStore;
    use crate::application::handlers::test_support::{date, noon, user};
    use crate::domain::goal::{GoalSpec, GoalType};

    fn goal() -> CalorieGoal {
        let spec =
            GoalSpec::try_new(GoalType::Maintenance, 0.0, None, date(2024, 5, 1), None).unwrap();
        CalorieGoal::new(user(), spec, 2400.0, noon(2024, 5, 1))
    }

    #[tokio::test]
    async fn returns_none_without_goal() {
        let handler = GetActiveGoalHandler::new(Arc::new(InMemoryCalorieGoalStore::new()));
        let found = handler
            .handle(GetActiveGoalQuery { user_id: user() })
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn returns_activated_goal() {
        let store = Arc::new(InMemoryCalorieGoalStore::new());
        let goal = goal();
        store.activate(&goal).await.unwrap();
        let handler = GetActiveGoalHandler::new(store);

        let found = handler
            .handle(GetActiveGoalQuery { user_id: user() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), goal.id());
    }
}
