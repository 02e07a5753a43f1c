//! Integration tests for single-active-goal activation.
//!
//! Goal creation deactivates the previous goal and stores the new one in a
//! single store operation, so concurrent requests still leave exactly one
//! active goal per user.

use std::sync::Arc;

use chrono::NaiveDate;

use calorie_balance::adapters::{
    FixedClock, InMemoryCalorieGoalStore, InMemoryMetabolicProfileStore, InMemoryProfileProvider,
};
use calorie_balance::application::{
    CreateGoalCommand, CreateGoalHandler, GetActiveGoalHandler, GetActiveGoalQuery,
};
use calorie_balance::domain::foundation::{ErrorCode, Timestamp, UserId};
use calorie_balance::domain::goal::GoalType;
use calorie_balance::domain::profile::{
    ActivityLevel, Gender, PhysiologicalAttributes, UserPhysiologicalProfile,
};
use calorie_balance::ports::CalorieGoalStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn profile(user_id: &UserId) -> UserPhysiologicalProfile {
    UserPhysiologicalProfile::try_new(
        user_id.clone(),
        PhysiologicalAttributes {
            age: Some(42),
            gender: Some(Gender::Female),
            height_cm: Some(165.0),
            weight_kg: Some(68.0),
            activity_level: Some(ActivityLevel::LightlyActive),
        },
    )
    .unwrap()
}

fn command(user_id: &UserId, goal_type: GoalType, weekly: f64) -> CreateGoalCommand {
    CreateGoalCommand {
        user_id: user_id.clone(),
        goal_type,
        weekly_weight_change_kg: weekly,
        target_weight_kg: None,
        start_date: None,
        end_date: None,
    }
}

async fn setup(users: &[&UserId]) -> (Arc<InMemoryCalorieGoalStore>, Arc<CreateGoalHandler>) {
    let profiles = Arc::new(InMemoryProfileProvider::new());
    for user_id in users {
        profiles.insert(profile(user_id)).await;
    }
    let goals = Arc::new(InMemoryCalorieGoalStore::new());
    let handler = CreateGoalHandler::new(
        profiles,
        Arc::new(InMemoryMetabolicProfileStore::new()),
        goals.clone(),
        Arc::new(FixedClock::new(Timestamp::at_hour(today(), 9))),
    );
    (goals, Arc::new(handler))
}

#[tokio::test]
async fn concurrent_creation_leaves_one_active_goal() {
    let user_id = UserId::new("busy-user").unwrap();
    let (goals, handler) = setup(&[&user_id]).await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let handler = handler.clone();
        let cmd = command(&user_id, GoalType::WeightLoss, -0.25 * f64::from(i % 4));
        tasks.push(tokio::spawn(async move { handler.handle(cmd).await }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(goals.active_count(&user_id).await, 1);
    let history = goals.list(&user_id).await.unwrap();
    assert_eq!(history.len(), 8);
    assert_eq!(history.iter().filter(|g| g.is_active()).count(), 1);
}

#[tokio::test]
async fn replacing_goal_keeps_history() {
    let user_id = UserId::new("switcher").unwrap();
    let (goals, handler) = setup(&[&user_id]).await;

    handler
        .handle(command(&user_id, GoalType::WeightLoss, -0.5))
        .await
        .unwrap();
    let maintenance = handler
        .handle(command(&user_id, GoalType::Maintenance, 0.0))
        .await
        .unwrap();

    let active = GetActiveGoalHandler::new(goals.clone())
        .handle(GetActiveGoalQuery {
            user_id: user_id.clone(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id(), maintenance.goal.id());
    assert_eq!(active.goal_type(), GoalType::Maintenance);
    assert_eq!(goals.list(&user_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn users_do_not_share_active_goals() {
    let alice = UserId::new("alice").unwrap();
    let bob = UserId::new("bob").unwrap();
    let (goals, handler) = setup(&[&alice, &bob]).await;

    handler
        .handle(command(&alice, GoalType::WeightGain, 0.25))
        .await
        .unwrap();
    handler
        .handle(command(&bob, GoalType::WeightLoss, -0.25))
        .await
        .unwrap();

    assert_eq!(goals.active_count(&alice).await, 1);
    assert_eq!(goals.active_count(&bob).await, 1);
}

#[tokio::test]
async fn invalid_goal_leaves_existing_goal_active() {
    let user_id = UserId::new("careful").unwrap();
    let (goals, handler) = setup(&[&user_id]).await;

    let original = handler
        .handle(command(&user_id, GoalType::WeightLoss, -0.5))
        .await
        .unwrap();
    let err = handler
        .handle(command(&user_id, GoalType::Maintenance, 0.5))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    let active = goals.get_active(&user_id).await.unwrap().unwrap();
    assert_eq!(active.id(), original.goal.id());
}
