//! Analysis query handlers.

mod get_progress_report;
mod get_trajectory_forecast;

pub use get_progress_report::{GetProgressReportHandler, GetProgressReportQuery};
pub use get_trajectory_forecast::{GetTrajectoryForecastHandler, GetTrajectoryForecastQuery};
