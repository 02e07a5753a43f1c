//! Daily Balance Aggregator - maintains the single ledger row per date.
//!
//! Updates carry replacement values. Fields absent from an update keep
//! their prior value, so applying the same update twice yields the same
//! row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_in_range, Timestamp, UserId, ValidationError};

use super::{CalorieEvent, DailyBalance, EventEntry};

const MAX_DAILY_CALORIES: f64 = 50_000.0;

/// Partial replacement for one date's ledger inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalanceUpdate {
    date: NaiveDate,
    calories_consumed: Option<f64>,
    calories_burned_exercise: Option<f64>,
    weight_kg: Option<f64>,
    notes: Option<String>,
}

impl DailyBalanceUpdate {
    /// Validates an update.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for negative calories or a weight outside 30-300 kg.
    pub fn try_new(
        date: NaiveDate,
        calories_consumed: Option<f64>,
        calories_burned_exercise: Option<f64>,
        weight_kg: Option<f64>,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(kcal) = calories_consumed {
            ensure_in_range("calories_consumed", kcal, 0.0, MAX_DAILY_CALORIES)?;
        }
        if let Some(kcal) = calories_burned_exercise {
            ensure_in_range("calories_burned_exercise", kcal, 0.0, MAX_DAILY_CALORIES)?;
        }
        if let Some(kg) = weight_kg {
            ensure_in_range("weight_kg", kg, 30.0, 300.0)?;
        }
        Ok(Self {
            date,
            calories_consumed,
            calories_burned_exercise,
            weight_kg,
            notes,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn calories_consumed(&self) -> Option<f64> {
        self.calories_consumed
    }

    pub fn calories_burned_exercise(&self) -> Option<f64> {
        self.calories_burned_exercise
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True when the update would not set any field.
    pub fn is_empty(&self) -> bool {
        self.calories_consumed.is_none()
            && self.calories_burned_exercise.is_none()
            && self.weight_kg.is_none()
            && self.notes.is_none()
    }
}

/// Stateless aggregator for ledger rows.
pub struct DailyBalanceAggregator;

impl DailyBalanceAggregator {
    /// Applies an update to the existing row (or a fresh one).
    ///
    /// `bmr_snapshot` is the BMR of the user's current metabolic profile at
    /// write time. When it is `None` the row keeps whatever snapshot it
    /// already had, which for a new row means unset.
    ///
    /// `updated_at` only moves when an input actually changed.
    pub fn apply(
        existing: Option<DailyBalance>,
        user_id: &UserId,
        update: &DailyBalanceUpdate,
        bmr_snapshot: Option<f64>,
        now: Timestamp,
    ) -> DailyBalance {
        let previous = existing.clone();
        let mut row =
            existing.unwrap_or_else(|| DailyBalance::empty(user_id.clone(), update.date, now));

        if let Some(kcal) = update.calories_consumed {
            row.set_consumed(kcal);
        }
        if let Some(kcal) = update.calories_burned_exercise {
            row.set_burned_exercise(kcal);
        }
        if let Some(kg) = update.weight_kg {
            row.set_weight(kg);
        }
        if let Some(notes) = &update.notes {
            row.set_notes(notes.clone());
        }
        if bmr_snapshot.is_some() {
            row.set_burned_bmr(bmr_snapshot);
        }
        row.recompute();

        match previous {
            Some(prev) if prev.same_inputs(&row) => prev,
            _ => {
                row.touch(now);
                row
            }
        }
    }

    /// Folds every event recorded for a date into a replacement update.
    ///
    /// Consumed and exercise calories are summed over all entries; the
    /// weight is the latest weigh-in by timestamp. Kinds with no entries
    /// stay absent so they do not overwrite manually entered values.
    pub fn fold_events(date: NaiveDate, events: &[CalorieEvent]) -> DailyBalanceUpdate {
        let mut consumed: Option<f64> = None;
        let mut burned: Option<f64> = None;
        let mut latest_weight: Option<(Timestamp, f64)> = None;

        for event in events.iter().filter(|e| e.timestamp().date() == date) {
            for entry in event.entries() {
                match *entry {
                    EventEntry::Consumed(kcal) => *consumed.get_or_insert(0.0) += kcal,
                    EventEntry::BurnedExercise(kcal) => *burned.get_or_insert(0.0) += kcal,
                    EventEntry::Weight(kg) => {
                        let at = *event.timestamp();
                        if latest_weight.map_or(true, |(seen, _)| at >= seen) {
                            latest_weight = Some((at, kg));
                        }
                    }
                }
            }
        }

        DailyBalanceUpdate {
            date,
            calories_consumed: consumed,
            calories_burned_exercise: burned,
            weight_kg: latest_weight.map(|(_, kg)| kg),
            notes: None,
        }
    }
}
