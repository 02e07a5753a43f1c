//! Metabolic profile entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MetabolicProfileId, Timestamp, UserId};

use super::MetabolicEstimate;

/// Days a computed profile stays current.
pub const DEFAULT_VALIDITY_DAYS: i64 = 30;

/// A stored BMR/TDEE estimate with a validity window.
///
/// # Invariants
///
/// - `valid_until = calculated_at + validity_days`
/// - Historical profiles are kept; only one with `valid_until > now`
///   is consulted at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicProfile {
    id: MetabolicProfileId,
    user_id: UserId,
    bmr: f64,
    tdee: f64,
    calculated_at: Timestamp,
    valid_until: Timestamp,
}

impl MetabolicProfile {
    /// Creates a profile valid for the default 30 days.
    pub fn from_estimate(
        user_id: UserId,
        estimate: MetabolicEstimate,
        calculated_at: Timestamp,
    ) -> Self {
        Self::with_validity(user_id, estimate, calculated_at, DEFAULT_VALIDITY_DAYS)
    }

    /// Creates a profile valid for a custom number of days.
    pub fn with_validity(
        user_id: UserId,
        estimate: MetabolicEstimate,
        calculated_at: Timestamp,
        validity_days: i64,
    ) -> Self {
        Self {
            id: MetabolicProfileId::new(),
            user_id,
            bmr: estimate.bmr,
            tdee: estimate.tdee,
            calculated_at,
            valid_until: calculated_at.add_days(validity_days),
        }
    }

    /// Rehydrates a profile from storage.
    pub fn reconstitute(
        id: MetabolicProfileId,
        user_id: UserId,
        bmr: f64,
        tdee: f64,
        calculated_at: Timestamp,
        valid_until: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            bmr,
            tdee,
            calculated_at,
            valid_until,
        }
    }

    pub fn id(&self) -> &MetabolicProfileId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn bmr(&self) -> f64 {
        self.bmr
    }

    pub fn tdee(&self) -> f64 {
        self.tdee
    }

    pub fn calculated_at(&self) -> &Timestamp {
        &self.calculated_at
    }

    pub fn valid_until(&self) -> &Timestamp {
        &self.valid_until
    }

    pub fn estimate(&self) -> MetabolicEstimate {
        MetabolicEstimate {
            bmr: self.bmr,
            tdee: self.tdee,
        }
    }

    /// A profile is current while `valid_until > now`.
    pub fn is_current(&self, now: Timestamp) -> bool {
        self.valid_until.is_after(&now)
    }
}
