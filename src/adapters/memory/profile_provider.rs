//! In-memory physiological profile provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::UserPhysiologicalProfile;
use crate::ports::ProfileProvider;

/// Profiles keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileProvider {
    profiles: Arc<RwLock<HashMap<UserId, UserPhysiologicalProfile>>>,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile (test setup).
    pub async fn insert(&self, profile: UserPhysiologicalProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile);
    }

    pub async fn remove(&self, user_id: &UserId) {
        self.profiles.write().await.remove(user_id);
    }
}

#[async_trait]
impl ProfileProvider for InMemoryProfileProvider {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserPhysiologicalProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{ActivityLevel, Gender, PhysiologicalAttributes};

    fn profile(user: &str) -> UserPhysiologicalProfile {
        UserPhysiologicalProfile::try_new(
            UserId::new(user).unwrap(),
            PhysiologicalAttributes {
                age: Some(30),
                gender: Some(Gender::Male),
                height_cm: Some(175.0),
                weight_kg: Some(75.0),
                activity_level: Some(ActivityLevel::ModeratelyActive),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_inserted_profile() {
        let provider = InMemoryProfileProvider::new();
        provider.insert(profile("alice")).await;

        let found = provider.get(&UserId::new("alice").unwrap()).await.unwrap();
        assert_eq!(found.unwrap().age(), Some(30));
        assert!(provider.get(&UserId::new("bob").unwrap()).await.unwrap().is_none());
    }
}
