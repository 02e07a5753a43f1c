//! Metabolic baseline module.
//!
//! # Components
//!
//! - `MetabolicCalculator` - Mifflin-St Jeor BMR, TDEE, recalculation policy
//! - `MetabolicProfile` - Persisted estimate with a validity window

mod calculator;
mod errors;
mod profile;

pub use calculator::{MetabolicCalculator, MetabolicEstimate, DEFAULT_RECALCULATION_THRESHOLD};
pub use errors::MetabolicError;
pub use profile::{MetabolicProfile, DEFAULT_VALIDITY_DAYS};
