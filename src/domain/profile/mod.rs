//! Physiological profile module.
//!
//! The profile is an immutable snapshot owned by an external collaborator.
//! Every attribute is optional: a profile with gaps is still a valid value,
//! it just cannot produce a metabolic estimate.

mod attributes;
mod physiological;

pub use attributes::{ActivityLevel, Gender};
pub use physiological::{PhysiologicalAttributes, UserPhysiologicalProfile};
