//! Metabolic Calculator - BMR and TDEE from a physiological profile.
//!
//! BMR uses the Mifflin-St Jeor equation (1990):
//!
//! `BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age + sex_offset`
//!
//! with `+5` for men, `-161` for women and no offset for `Gender::Other`.
//! Whether the neutral baseline for `Other` is intended is unresolved; the
//! calculator keeps it rather than inventing a coefficient.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::profile::{ActivityLevel, Gender, UserPhysiologicalProfile};

use super::MetabolicProfile;

/// Relative BMR/TDEE drift that forces a stored profile to be replaced.
pub const DEFAULT_RECALCULATION_THRESHOLD: f64 = 0.05;

/// A freshly computed metabolic baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolicEstimate {
    /// Basal Metabolic Rate in kcal/day
    pub bmr: f64,
    /// Total Daily Energy Expenditure in kcal/day
    pub tdee: f64,
}

/// Stateless metabolic calculator.
#[derive(Debug, Clone, Copy)]
pub struct MetabolicCalculator {
    recalculation_threshold: f64,
}

impl Default for MetabolicCalculator {
    fn default() -> Self {
        Self {
            recalculation_threshold: DEFAULT_RECALCULATION_THRESHOLD,
        }
    }
}

impl MetabolicCalculator {
    /// Creates a calculator with a custom relative recalculation threshold.
    pub fn with_threshold(recalculation_threshold: f64) -> Self {
        Self {
            recalculation_threshold,
        }
    }

    /// Mifflin-St Jeor BMR in kcal/day.
    pub fn bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
        10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + gender.bmr_offset()
    }

    /// TDEE = BMR x activity multiplier.
    pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
        bmr * activity_level.multiplier()
    }

    /// Computes BMR and TDEE for a profile.
    ///
    /// Returns `None` when any required attribute is missing; that is the
    /// "insufficient data" outcome, not an error.
    pub fn estimate(&self, profile: &UserPhysiologicalProfile) -> Option<MetabolicEstimate> {
        let bmr = Self::bmr(
            profile.weight_kg()?,
            profile.height_cm()?,
            profile.age()?,
            profile.gender()?,
        );
        let tdee = Self::tdee(bmr, profile.activity_level()?);
        Some(MetabolicEstimate { bmr, tdee })
    }

    /// Decides whether a stored profile must be replaced by a fresh estimate.
    ///
    /// True when the stored profile has expired (`valid_until <= now`) or
    /// when BMR or TDEE drifted by more than the threshold relative to the
    /// stored value.
    pub fn needs_recalculation(
        &self,
        existing: &MetabolicProfile,
        fresh: &MetabolicEstimate,
        now: Timestamp,
    ) -> bool {
        if !existing.is_current(now) {
            return true;
        }
        self.drifted(existing.bmr(), fresh.bmr) || self.drifted(existing.tdee(), fresh.tdee)
    }

    fn drifted(&self, stored: f64, fresh: f64) -> bool {
        if stored == 0.0 {
            return fresh != 0.0;
        }
        ((fresh - stored) / stored).abs() > self.recalculation_threshold
    }
}
