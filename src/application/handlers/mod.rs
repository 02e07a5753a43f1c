//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;
pub mod goal;
pub mod ledger;
pub mod metabolic;
pub mod rollup;

pub use analysis::{
    GetProgressReportHandler, GetProgressReportQuery, GetTrajectoryForecastHandler,
    GetTrajectoryForecastQuery,
};
pub use goal::{
    CreateGoalCommand, CreateGoalHandler, CreateGoalResult, GetActiveGoalHandler,
    GetActiveGoalQuery,
};
pub use ledger::{
    RecordCalorieEventCommand, RecordCalorieEventHandler, RecordCalorieEventResult,
    UpdateDailyBalanceCommand, UpdateDailyBalanceHandler,
};
pub use metabolic::{
    RefreshMetabolicProfileCommand, RefreshMetabolicProfileHandler, RefreshMetabolicProfileResult,
};
pub use rollup::{
    DetectPatternsHandler, DetectPatternsQuery, GetActivitySummaryHandler,
    GetActivitySummaryQuery, GetRollupHandler, GetRollupQuery,
};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::goal::{CalorieGoal, GoalSpec, GoalType};
    use crate::domain::ledger::DailyBalance;
    use crate::domain::profile::{
        ActivityLevel, Gender, PhysiologicalAttributes, UserPhysiologicalProfile,
    };

    pub fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn noon(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::at_hour(date(y, m, d), 12)
    }

    /// Male, 30, 175 cm, moderately active.
    pub fn complete_profile(weight_kg: f64) -> UserPhysiologicalProfile {
        UserPhysiologicalProfile::try_new(
            user(),
            PhysiologicalAttributes {
                age: Some(30),
                gender: Some(Gender::Male),
                height_cm: Some(175.0),
                weight_kg: Some(weight_kg),
                activity_level: Some(ActivityLevel::ModeratelyActive),
            },
        )
        .unwrap()
    }

    pub fn maintenance_goal(target_calories: f64) -> CalorieGoal {
        let spec =
            GoalSpec::try_new(GoalType::Maintenance, 0.0, None, date(2024, 5, 1), None).unwrap();
        CalorieGoal::new(user(), spec, target_calories, noon(2024, 5, 1))
    }

    pub fn balance(date: NaiveDate, consumed: f64, weight_kg: Option<f64>) -> DailyBalance {
        DailyBalance::reconstitute(
            user(),
            date,
            consumed,
            0.0,
            None,
            weight_kg,
            None,
            Timestamp::start_of_day(date),
            Timestamp::start_of_day(date),
        )
    }
}
