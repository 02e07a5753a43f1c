//! Analysis-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors raised while assembling an analysis window.
///
/// Thin data never lands here; it yields zeroed reports instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Progress and forecasts are measured against the active goal.
    NoActiveGoal(UserId),
    /// The requested window is inverted.
    InvalidWindow(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl AnalysisError {
    pub fn no_active_goal(user_id: UserId) -> Self {
        AnalysisError::NoActiveGoal(user_id)
    }
    pub fn invalid_window(message: impl Into<String>) -> Self {
        AnalysisError::InvalidWindow(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::NoActiveGoal(_) => ErrorCode::NoActiveGoal,
            AnalysisError::InvalidWindow(_) => ErrorCode::ValidationFailed,
            AnalysisError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AnalysisError::NoActiveGoal(id) => format!("No active goal for user: {}", id),
            AnalysisError::InvalidWindow(msg) => format!("Invalid window: {}", msg),
            AnalysisError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AnalysisError {}

impl From<DomainError> for AnalysisError {
    fn from(err: DomainError) -> Self {
        AnalysisError::Infrastructure(err.to_string())
    }
}
