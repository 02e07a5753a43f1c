//! Calorie event value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ensure_in_range, CalorieEventId, Timestamp, UserId, ValidationError,
};

const MAX_EVENT_CALORIES: f64 = 20_000.0;
const MIN_WEIGHT_KG: f64 = 30.0;
const MAX_WEIGHT_KG: f64 = 300.0;

/// Discriminant used for filtering event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieEventType {
    Consumed,
    BurnedExercise,
    Weight,
    Batch,
}

impl CalorieEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieEventType::Consumed => "consumed",
            CalorieEventType::BurnedExercise => "burned_exercise",
            CalorieEventType::Weight => "weight",
            CalorieEventType::Batch => "batch",
        }
    }
}

impl fmt::Display for CalorieEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalorieEventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumed" => Ok(CalorieEventType::Consumed),
            "burned_exercise" => Ok(CalorieEventType::BurnedExercise),
            "weight" => Ok(CalorieEventType::Weight),
            "batch" => Ok(CalorieEventType::Batch),
            other => Err(ValidationError::invalid_format(
                "event_type",
                format!("unknown event type '{}'", other),
            )),
        }
    }
}

/// A single measurement carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EventEntry {
    Consumed(f64),
    BurnedExercise(f64),
    Weight(f64),
}

impl EventEntry {
    pub fn event_type(&self) -> CalorieEventType {
        match self {
            EventEntry::Consumed(_) => CalorieEventType::Consumed,
            EventEntry::BurnedExercise(_) => CalorieEventType::BurnedExercise,
            EventEntry::Weight(_) => CalorieEventType::Weight,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            EventEntry::Consumed(v) | EventEntry::BurnedExercise(v) | EventEntry::Weight(v) => *v,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            EventEntry::Consumed(kcal) => {
                ensure_in_range("calories_consumed", *kcal, 0.0, MAX_EVENT_CALORIES)?;
            }
            EventEntry::BurnedExercise(kcal) => {
                ensure_in_range("calories_burned_exercise", *kcal, 0.0, MAX_EVENT_CALORIES)?;
            }
            EventEntry::Weight(kg) => {
                ensure_in_range("weight_kg", *kg, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
            }
        }
        Ok(())
    }
}

/// Event body: one entry, or several recorded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    Single(EventEntry),
    Batch(Vec<EventEntry>),
}

/// An immutable calorie, exercise or weight observation.
///
/// Events are append-only; nothing mutates them after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieEvent {
    id: CalorieEventId,
    user_id: UserId,
    payload: EventPayload,
    timestamp: Timestamp,
    source: String,
    confidence_score: f64,
}

impl CalorieEvent {
    /// Validates and creates an event.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank source or an empty batch
    /// - `OutOfRange` for negative/implausible calories, weight outside
    ///   30-300 kg, or confidence outside [0, 1]
    pub fn try_new(
        user_id: UserId,
        payload: EventPayload,
        timestamp: Timestamp,
        source: impl Into<String>,
        confidence_score: f64,
    ) -> Result<Self, ValidationError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(ValidationError::empty_field("source"));
        }
        ensure_in_range("confidence_score", confidence_score, 0.0, 1.0)?;
        match &payload {
            EventPayload::Single(entry) => entry.validate()?,
            EventPayload::Batch(entries) => {
                if entries.is_empty() {
                    return Err(ValidationError::empty_field("batch"));
                }
                for entry in entries {
                    entry.validate()?;
                }
            }
        }

        Ok(Self {
            id: CalorieEventId::new(),
            user_id,
            payload,
            timestamp,
            source,
            confidence_score,
        })
    }

    /// Rehydrates an event from storage without re-validating it.
    pub fn reconstitute(
        id: CalorieEventId,
        user_id: UserId,
        payload: EventPayload,
        timestamp: Timestamp,
        source: String,
        confidence_score: f64,
    ) -> Self {
        Self {
            id,
            user_id,
            payload,
            timestamp,
            source,
            confidence_score,
        }
    }

    pub fn id(&self) -> &CalorieEventId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn event_type(&self) -> CalorieEventType {
        match &self.payload {
            EventPayload::Single(entry) => entry.event_type(),
            EventPayload::Batch(_) => CalorieEventType::Batch,
        }
    }

    /// The measured value for single-entry events; `None` for batches.
    pub fn value(&self) -> Option<f64> {
        match &self.payload {
            EventPayload::Single(entry) => Some(entry.value()),
            EventPayload::Batch(_) => None,
        }
    }

    /// All entries, flattening batches.
    pub fn entries(&self) -> &[EventEntry] {
        match &self.payload {
            EventPayload::Single(entry) => std::slice::from_ref(entry),
            EventPayload::Batch(entries) => entries,
        }
    }

    /// True when the event is of `event_type` or is a batch containing it.
    pub fn matches_type(&self, event_type: CalorieEventType) -> bool {
        self.event_type() == event_type
            || self.entries().iter().any(|e| e.event_type() == event_type)
    }

    /// Calories consumed across all entries.
    pub fn consumed_calories(&self) -> f64 {
        self.sum_of(CalorieEventType::Consumed)
    }

    /// Exercise calories across all entries.
    pub fn burned_calories(&self) -> f64 {
        self.sum_of(CalorieEventType::BurnedExercise)
    }

    fn sum_of(&self, event_type: CalorieEventType) -> f64 {
        self.entries()
            .iter()
            .filter(|e| e.event_type() == event_type)
            .map(EventEntry::value)
            .sum()
    }
}
