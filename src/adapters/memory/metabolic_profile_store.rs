//! In-memory metabolic profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::metabolic::MetabolicProfile;
use crate::ports::MetabolicProfileStore;

/// Profiles per user in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetabolicProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, Vec<MetabolicProfile>>>>,
}

impl InMemoryMetabolicProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles across all users.
    pub async fn count(&self) -> usize {
        self.profiles.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl MetabolicProfileStore for InMemoryMetabolicProfileStore {
    async fn get_current(&self, user_id: &UserId) -> Result<Option<MetabolicProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(user_id)
            .and_then(|history| history.iter().max_by_key(|p| *p.calculated_at()))
            .cloned())
    }

    async fn put(&self, profile: &MetabolicProfile) -> Result<(), DomainError> {
        self.profiles
            .write()
            .await
            .entry(profile.user_id().clone())
            .or_default()
            .push(profile.clone());
        Ok(())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<MetabolicProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        let mut history = profiles.get(user_id).cloned().unwrap_or_default();
        history.sort_by(|a, b| b.calculated_at().cmp(a.calculated_at()));
        Ok(history)
    }
}
