//! In-memory calorie event store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ledger::{CalorieEvent, CalorieEventType};
use crate::ports::CalorieEventStore;

/// Append-only event log per user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalorieEventStore {
    events: Arc<RwLock<HashMap<UserId, Vec<CalorieEvent>>>>,
}

impl InMemoryCalorieEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.events.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl CalorieEventStore for InMemoryCalorieEventStore {
    async fn query(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
        event_type: Option<CalorieEventType>,
    ) -> Result<Vec<CalorieEvent>, DomainError> {
        let events = self.events.read().await;
        let mut matching: Vec<CalorieEvent> = events
            .get(user_id)
            .map(|log| {
                log.iter()
                    .filter(|e| !e.timestamp().is_before(&start) && e.timestamp().is_before(&end))
                    .filter(|e| event_type.map_or(true, |t| e.matches_type(t)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matching.sort_by_key(|e| *e.timestamp());
        Ok(matching)
    }

    async fn append(&self, event: &CalorieEvent) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .entry(event.user_id().clone())
            .or_default()
            .push(event.clone());
        Ok(())
    }
}
