//! Rollup-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while building rollups.
#[derive(Debug, Clone, PartialEq)]
pub enum RollupError {
    /// The time budget ran out; no partial view is returned.
    DeadlineExceeded,
    /// The requested window is invalid.
    InvalidWindow(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl RollupError {
    pub fn invalid_window(message: impl Into<String>) -> Self {
        RollupError::InvalidWindow(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RollupError::DeadlineExceeded => ErrorCode::DeadlineExceeded,
            RollupError::InvalidWindow(_) => ErrorCode::ValidationFailed,
            RollupError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RollupError::DeadlineExceeded => "Rollup deadline exceeded".to_string(),
            RollupError::InvalidWindow(msg) => format!("Invalid window: {}", msg),
            RollupError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RollupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RollupError {}

impl From<DomainError> for RollupError {
    fn from(err: DomainError) -> Self {
        RollupError::Infrastructure(err.to_string())
    }
}

impl From<ValidationError> for RollupError {
    fn from(err: ValidationError) -> Self {
        RollupError::InvalidWindow(err.to_string())
    }
}
