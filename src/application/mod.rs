//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands write through the ledger and goal stores; queries read windows
//! and hand them to the pure calculators.

pub mod handlers;

pub use handlers::{
    // Metabolic
    RefreshMetabolicProfileCommand, RefreshMetabolicProfileHandler, RefreshMetabolicProfileResult,
    // Goals
    CreateGoalCommand, CreateGoalHandler, CreateGoalResult, GetActiveGoalHandler,
    GetActiveGoalQuery,
    // Ledger
    RecordCalorieEventCommand, RecordCalorieEventHandler, RecordCalorieEventResult,
    UpdateDailyBalanceCommand, UpdateDailyBalanceHandler,
    // Analysis
    GetProgressReportHandler, GetProgressReportQuery, GetTrajectoryForecastHandler,
    GetTrajectoryForecastQuery,
    // Rollups
    DetectPatternsHandler, DetectPatternsQuery, GetActivitySummaryHandler,
    GetActivitySummaryQuery, GetRollupHandler, GetRollupQuery,
};
