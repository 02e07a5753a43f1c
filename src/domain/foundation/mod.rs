//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the calorie-balance domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub(crate) use errors::ensure_in_range;
pub use ids::{CalorieEventId, GoalId, MetabolicProfileId, UserId};
pub use timestamp::Timestamp;

/// Kilocalories per kilogram of body-mass change.
pub const KCAL_PER_KG: f64 = 7700.0;
