//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `profile` - Physiological attributes supplied by the user
//! - `metabolic` - BMR/TDEE estimation and the cached metabolic profile
//! - `goal` - Calorie goals and safe target calculation
//! - `ledger` - Calorie events and the per-day energy ledger
//! - `analysis` - Progress, trajectory and trend over ledger windows
//! - `rollup` - Multi-resolution rollups, streaks and patterns

pub mod analysis;
pub mod foundation;
pub mod goal;
pub mod ledger;
pub mod metabolic;
pub mod profile;
pub mod rollup;
