//! Calorie event store port.
//!
//! Events are append-only facts. Nothing in this core updates or deletes
//! them.

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ledger::{CalorieEvent, CalorieEventType};
use async_trait::async_trait;

/// Persistence for raw calorie, exercise and weight events.
#[async_trait]
pub trait CalorieEventStore: Send + Sync {
    /// Events with `start <= timestamp < end`, oldest first.
    ///
    /// With an `event_type` filter, batches containing an entry of that
    /// type are included.
    async fn query(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
        event_type: Option<CalorieEventType>,
    ) -> Result<Vec<CalorieEvent>, DomainError>;

    /// Append an event.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, event: &CalorieEvent) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calorie_event_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CalorieEventStore) {}
    }
}
