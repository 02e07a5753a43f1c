//! Metabolic profile command handlers.

mod refresh_metabolic_profile;

pub use refresh_metabolic_profile::{
    RefreshMetabolicProfileCommand, RefreshMetabolicProfileHandler, RefreshMetabolicProfileResult,
};
