//! Physiological profile port (read side).
//!
//! The profile itself is owned by the user-management context; this core
//! only reads it.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::UserPhysiologicalProfile;
use async_trait::async_trait;

/// Reader for the attributes BMR and TDEE are derived from.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch a user's physiological profile.
    ///
    /// Returns `None` if the user does not exist.
    async fn get(&self, user_id: &UserId) -> Result<Option<UserPhysiologicalProfile>, DomainError>;
}
