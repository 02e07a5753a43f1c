//! Ledger-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Ledger-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// No physiological profile exists for the user.
    UserNotFound(UserId),
    /// Update or event failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl LedgerError {
    pub fn user_not_found(user_id: UserId) -> Self {
        LedgerError::UserNotFound(user_id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LedgerError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::UserNotFound(_) => ErrorCode::UserNotFound,
            LedgerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LedgerError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            LedgerError::UserNotFound(id) => format!("User not found: {}", id),
            LedgerError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LedgerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LedgerError {}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => LedgerError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => LedgerError::Infrastructure(err.to_string()),
        }
    }
}
