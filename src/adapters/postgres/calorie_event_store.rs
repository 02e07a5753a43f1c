//! PostgreSQL implementation of CalorieEventStore.
//!
//! The payload is stored as serialized JSON text next to a denormalized
//! `event_type` column used for filtering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{CalorieEventId, DomainError, Timestamp, UserId};
use crate::domain::ledger::{CalorieEvent, CalorieEventType, EventPayload};
use crate::ports::CalorieEventStore;

use super::{column, database_error};

/// Appends events to `calorie_events`.
#[derive(Clone)]
pub struct PostgresCalorieEventStore {
    pool: PgPool,
}

impl PostgresCalorieEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalorieEventStore for PostgresCalorieEventStore {
    async fn query(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
        event_type: Option<CalorieEventType>,
    ) -> Result<Vec<CalorieEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, payload, occurred_at, source, confidence_score
            FROM calorie_events
            WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at < $3
              AND ($4::TEXT IS NULL OR event_type = $4 OR event_type = 'batch')
            ORDER BY occurred_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .bind(event_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("query calorie events", e))?;

        let events = rows.iter().map(row_to_event).collect::<Result<Vec<_>, _>>()?;

        // Batches pass the SQL filter unconditionally; keep only those that
        // actually hold an entry of the requested type.
        Ok(match event_type {
            Some(t) => events.into_iter().filter(|e| e.matches_type(t)).collect(),
            None => events,
        })
    }

    async fn append(&self, event: &CalorieEvent) -> Result<(), DomainError> {
        let payload = serde_json::to_string(event.payload())
            .map_err(|e| database_error("serialize event payload", e))?;

        sqlx::query(
            r#"
            INSERT INTO calorie_events (
                id, user_id, event_type, payload, occurred_at, source, confidence_score
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.user_id().as_str())
        .bind(event.event_type().as_str())
        .bind(payload)
        .bind(event.timestamp().as_datetime())
        .bind(event.source())
        .bind(event.confidence_score())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("insert calorie event", e))?;

        Ok(())
    }
}

fn row_to_event(row: &PgRow) -> Result<CalorieEvent, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let payload: String = column(row, "payload")?;
    let occurred_at: DateTime<Utc> = column(row, "occurred_at")?;

    let payload: EventPayload =
        serde_json::from_str(&payload).map_err(|e| database_error("decode event payload", e))?;

    Ok(CalorieEvent::reconstitute(
        CalorieEventId::from_uuid(id),
        UserId::new(user_id)?,
        payload,
        Timestamp::from_datetime(occurred_at),
        column(row, "source")?,
        column(row, "confidence_score")?,
    ))
}
