//! Goal-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Goal-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalError {
    /// No physiological profile exists for the user.
    UserNotFound(UserId),
    /// BMR/TDEE cannot be derived from the available profile data.
    InsufficientProfileData,
    /// The user has no active goal.
    NoActiveGoal(UserId),
    /// Goal parameters failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl GoalError {
    pub fn user_not_found(user_id: UserId) -> Self {
        GoalError::UserNotFound(user_id)
    }
    pub fn insufficient_profile_data() -> Self {
        GoalError::InsufficientProfileData
    }
    pub fn no_active_goal(user_id: UserId) -> Self {
        GoalError::NoActiveGoal(user_id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GoalError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        GoalError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            GoalError::UserNotFound(_) => ErrorCode::UserNotFound,
            GoalError::InsufficientProfileData => ErrorCode::InsufficientProfileData,
            GoalError::NoActiveGoal(_) => ErrorCode::NoActiveGoal,
            GoalError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            GoalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            GoalError::UserNotFound(id) => format!("User not found: {}", id),
            GoalError::InsufficientProfileData => {
                "Profile data is insufficient to compute BMR/TDEE".to_string()
            }
            GoalError::NoActiveGoal(id) => format!("No active goal for user: {}", id),
            GoalError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            GoalError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for GoalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GoalError {}

impl From<ValidationError> for GoalError {
    fn from(err: ValidationError) -> Self {
        GoalError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for GoalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => GoalError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            ErrorCode::InsufficientProfileData => GoalError::InsufficientProfileData,
            _ => GoalError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_field() {
        let err: GoalError = ValidationError::inconsistent("end_date", "before start").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.to_string().contains("end_date"));
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err: GoalError = DomainError::database("connection reset").into();
        assert!(matches!(err, GoalError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
