//! Metabolic-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised while refreshing a metabolic profile.
#[derive(Debug, Clone, PartialEq)]
pub enum MetabolicError {
    /// No physiological profile exists for the user.
    UserNotFound(UserId),
    /// Age, gender, height, weight or activity level is missing.
    InsufficientProfileData(UserId),
    /// Stored profile data failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl MetabolicError {
    pub fn user_not_found(user_id: UserId) -> Self {
        MetabolicError::UserNotFound(user_id)
    }

    pub fn insufficient_profile_data(user_id: UserId) -> Self {
        MetabolicError::InsufficientProfileData(user_id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MetabolicError::UserNotFound(_) => ErrorCode::UserNotFound,
            MetabolicError::InsufficientProfileData(_) => ErrorCode::InsufficientProfileData,
            MetabolicError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MetabolicError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            MetabolicError::UserNotFound(id) => format!("User not found: {}", id),
            MetabolicError::InsufficientProfileData(id) => {
                format!("Profile for user {} is missing BMR inputs", id)
            }
            MetabolicError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MetabolicError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MetabolicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MetabolicError {}

impl From<ValidationError> for MetabolicError {
    fn from(err: ValidationError) -> Self {
        MetabolicError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MetabolicError {
    fn from(err: DomainError) -> Self {
        MetabolicError::Infrastructure(err.to_string())
    }
}
