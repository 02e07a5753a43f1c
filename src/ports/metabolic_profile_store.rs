//! Metabolic profile store port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::metabolic::MetabolicProfile;
use async_trait::async_trait;

/// Persistence for computed metabolic profiles.
///
/// Profiles are append-only; the newest by `calculated_at` is the one in
/// effect. Expiry is decided by the domain, not the store.
#[async_trait]
pub trait MetabolicProfileStore: Send + Sync {
    /// The most recently calculated profile, expired or not.
    async fn get_current(&self, user_id: &UserId) -> Result<Option<MetabolicProfile>, DomainError>;

    /// Store a newly calculated profile.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn put(&self, profile: &MetabolicProfile) -> Result<(), DomainError>;

    /// Every stored profile for the user, newest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<MetabolicProfile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metabolic_profile_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn MetabolicProfileStore) {}
    }
}
