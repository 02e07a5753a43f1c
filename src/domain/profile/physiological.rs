//! User physiological profile value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_in_range, UserId, ValidationError};

use super::{ActivityLevel, Gender};

const MIN_AGE: u32 = 13;
const MAX_AGE: u32 = 120;
const MIN_HEIGHT_CM: f64 = 100.0;
const MAX_HEIGHT_CM: f64 = 250.0;
const MIN_WEIGHT_KG: f64 = 30.0;
const MAX_WEIGHT_KG: f64 = 300.0;

/// Raw, unvalidated attributes as supplied by the profile collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalAttributes {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
}

/// Validated physiological snapshot for one user.
///
/// # Invariants
///
/// - Every present numeric attribute lies within physiological bounds
/// - Absent attributes are allowed and mean "unknown", never zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPhysiologicalProfile {
    user_id: UserId,
    age: Option<u32>,
    gender: Option<Gender>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    activity_level: Option<ActivityLevel>,
}

impl UserPhysiologicalProfile {
    /// Validates raw attributes into a profile.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when a present attribute is outside bounds
    /// (age 13-120, height 100-250 cm, weight 30-300 kg).
    pub fn try_new(
        user_id: UserId,
        attributes: PhysiologicalAttributes,
    ) -> Result<Self, ValidationError> {
        if let Some(age) = attributes.age {
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                return Err(ValidationError::out_of_range(
                    "age",
                    f64::from(MIN_AGE),
                    f64::from(MAX_AGE),
                    f64::from(age),
                ));
            }
        }
        let height_cm = attributes
            .height_cm
            .map(|h| ensure_in_range("height_cm", h, MIN_HEIGHT_CM, MAX_HEIGHT_CM))
            .transpose()?;
        let weight_kg = attributes
            .weight_kg
            .map(|w| ensure_in_range("weight_kg", w, MIN_WEIGHT_KG, MAX_WEIGHT_KG))
            .transpose()?;

        Ok(Self {
            user_id,
            age: attributes.age,
            gender: attributes.gender,
            height_cm,
            weight_kg,
            activity_level: attributes.activity_level,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn activity_level(&self) -> Option<ActivityLevel> {
        self.activity_level
    }

    /// True when every attribute needed for a metabolic estimate is present.
    pub fn is_complete(&self) -> bool {
        self.age.is_some()
            && self.gender.is_some()
            && self.height_cm.is_some()
            && self.weight_kg.is_some()
            && self.activity_level.is_some()
    }
}
