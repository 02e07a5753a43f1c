//! Daily balance ledger row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

const CONSUMED_WEIGHT: f64 = 0.5;
const BMR_WEIGHT: f64 = 0.25;
const WEIGHT_WEIGHT: f64 = 0.25;

/// One user's energy ledger for one calendar date.
///
/// # Invariants
///
/// - Exactly one row per (user_id, date)
/// - `net_calories = calories_consumed - calories_burned_exercise - calories_burned_bmr`
///   (an unset BMR snapshot contributes zero), recomputed on every write
/// - `calories_burned_bmr` is a snapshot taken at write time; `None` means
///   no metabolic profile was available, which is distinct from zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    user_id: UserId,
    date: NaiveDate,
    calories_consumed: f64,
    calories_burned_exercise: f64,
    calories_burned_bmr: Option<f64>,
    net_calories: f64,
    weight_kg: Option<f64>,
    notes: Option<String>,
    data_completeness_score: f64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DailyBalance {
    /// Creates an empty row for a date.
    pub(crate) fn empty(user_id: UserId, date: NaiveDate, now: Timestamp) -> Self {
        let mut balance = Self {
            user_id,
            date,
            calories_consumed: 0.0,
            calories_burned_exercise: 0.0,
            calories_burned_bmr: None,
            net_calories: 0.0,
            weight_kg: None,
            notes: None,
            data_completeness_score: 0.0,
            created_at: now,
            updated_at: now,
        };
        balance.recompute();
        balance
    }

    /// Rehydrates a row from storage.
    ///
    /// Derived fields are recomputed from the inputs, so a stored row can
    /// never surface with a stale `net_calories`.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        date: NaiveDate,
        calories_consumed: f64,
        calories_burned_exercise: f64,
        calories_burned_bmr: Option<f64>,
        weight_kg: Option<f64>,
        notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        let mut balance = Self {
            user_id,
            date,
            calories_consumed,
            calories_burned_exercise,
            calories_burned_bmr,
            net_calories: 0.0,
            weight_kg,
            notes,
            data_completeness_score: 0.0,
            created_at,
            updated_at,
        };
        balance.recompute();
        balance
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn calories_consumed(&self) -> f64 {
        self.calories_consumed
    }

    pub fn calories_burned_exercise(&self) -> f64 {
        self.calories_burned_exercise
    }

    pub fn calories_burned_bmr(&self) -> Option<f64> {
        self.calories_burned_bmr
    }

    /// Exercise burn plus the BMR snapshot (zero when unset).
    pub fn total_burned(&self) -> f64 {
        self.calories_burned_exercise + self.calories_burned_bmr.unwrap_or(0.0)
    }

    pub fn net_calories(&self) -> f64 {
        self.net_calories
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Share of expected inputs present, 0.0 to 1.0.
    ///
    /// Consumed calories count for half; the BMR snapshot and a weigh-in
    /// each count for a quarter.
    pub fn data_completeness_score(&self) -> f64 {
        self.data_completeness_score
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when anything was tracked for the day.
    pub fn has_tracking(&self) -> bool {
        self.calories_consumed > 0.0
            || self.calories_burned_exercise > 0.0
            || self.weight_kg.is_some()
    }

    pub(crate) fn set_consumed(&mut self, kcal: f64) {
        self.calories_consumed = kcal;
    }

    pub(crate) fn set_burned_exercise(&mut self, kcal: f64) {
        self.calories_burned_exercise = kcal;
    }

    pub(crate) fn set_burned_bmr(&mut self, kcal: Option<f64>) {
        self.calories_burned_bmr = kcal;
    }

    pub(crate) fn set_weight(&mut self, kg: f64) {
        self.weight_kg = Some(kg);
    }

    pub(crate) fn set_notes(&mut self, notes: String) {
        self.notes = Some(notes);
    }

    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Recomputes every derived field from the inputs.
    pub(crate) fn recompute(&mut self) {
        self.net_calories = self.calories_consumed
            - self.calories_burned_exercise
            - self.calories_burned_bmr.unwrap_or(0.0);

        let mut score = 0.0;
        if self.calories_consumed > 0.0 {
            score += CONSUMED_WEIGHT;
        }
        if self.calories_burned_bmr.is_some() {
            score += BMR_WEIGHT;
        }
        if self.weight_kg.is_some() {
            score += WEIGHT_WEIGHT;
        }
        self.data_completeness_score = score;
    }

    /// Compares the stored inputs, ignoring audit timestamps.
    pub(crate) fn same_inputs(&self, other: &DailyBalance) -> bool {
        self.calories_consumed == other.calories_consumed
            && self.calories_burned_exercise == other.calories_burned_exercise
            && self.calories_burned_bmr == other.calories_burned_bmr
            && self.weight_kg == other.weight_kg
            && self.notes == other.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn now() -> Timestamp {
        Timestamp::start_of_day(date())
    }

    #[test]
    fn empty_row_has_zero_net_and_completeness() {
        let row = DailyBalance::empty(UserId::new("u").unwrap(), date(), now());
        assert_eq!(row.net_calories(), 0.0);
        assert_eq!(row.data_completeness_score(), 0.0);
        assert!(!row.has_tracking());
    }

    #[test]
    fn reconstitute_recomputes_net() {
        let row = DailyBalance::reconstitute(
            UserId::new("u").unwrap(),
            date(),
            2200.0,
            300.0,
            Some(1700.0),
            Some(80.0),
            None,
            now(),
            now(),
        );
        assert_eq!(row.net_calories(), 2200.0 - 300.0 - 1700.0);
        assert_eq!(row.data_completeness_score(), 1.0);
    }

    #[test]
    fn unset_bmr_lowers_completeness() {
        let row = DailyBalance::reconstitute(
            UserId::new("u").unwrap(),
            date(),
            2000.0,
            0.0,
            None,
            None,
            None,
            now(),
            now(),
        );
        assert_eq!(row.calories_burned_bmr(), None);
        assert_eq!(row.net_calories(), 2000.0);
        assert_eq!(row.data_completeness_score(), 0.5);
    }
}
