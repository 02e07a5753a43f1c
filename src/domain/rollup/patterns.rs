//! Behavioral pattern detection over raw events.
//!
//! Observations are grouped by a dimension. A group only produces a
//! pattern once it holds `min_observations` observations, and the pattern's
//! confidence is `matching / total` within that group. Patterns below the
//! caller's `min_confidence` are dropped rather than reported as weak.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::analysis::mean;
use crate::domain::ledger::{CalorieEvent, EventEntry};

/// Observations a group needs before it can yield a pattern.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 5;

/// Share above the mean daily intake at which a day counts as high-intake.
const HIGH_INTAKE_RATIO: f64 = 0.20;

/// Grouping used for detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDimension {
    /// Consumed entries grouped by meal slot.
    MealTimeOfDay,
    /// Days grouped by weekday, matched on high intake.
    Weekday,
    /// All days, matched on high intake.
    HighIntakeDay,
}

impl PatternDimension {
    pub const ALL: [PatternDimension; 3] = [
        PatternDimension::MealTimeOfDay,
        PatternDimension::Weekday,
        PatternDimension::HighIntakeDay,
    ];
}

/// Meal window by local hour of the event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
    LateNight,
}

impl MealSlot {
    /// 05-10 breakfast, 11-14 lunch, 15-16 snack, 17-21 dinner, else late night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => MealSlot::Breakfast,
            11..=14 => MealSlot::Lunch,
            15..=16 => MealSlot::Snack,
            17..=21 => MealSlot::Dinner,
            _ => MealSlot::LateNight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack => "snack",
            MealSlot::Dinner => "dinner",
            MealSlot::LateNight => "late_night",
        }
    }

    fn recommendations(&self) -> Vec<String> {
        let lines: &[&str] = match self {
            MealSlot::Breakfast => &["Keep breakfast protein-rich to carry you to lunch"],
            MealSlot::Lunch => &["Balance lunch portions so dinner stays moderate"],
            MealSlot::Snack => &[
                "Plan afternoon snacks ahead of time",
                "Prefer fruit, yogurt or nuts over packaged snacks",
            ],
            MealSlot::Dinner => &["Front-load more of the day's calories before dinner"],
            MealSlot::LateNight => &[
                "Set a kitchen closing time in the evening",
                "Move late snacks into an earlier planned meal",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub pattern_id: String,
    pub dimension: PatternDimension,
    pub description: String,
    /// `matching_observations / observations`, 0.0 to 1.0
    pub confidence_score: f64,
    pub observations: usize,
    pub matching_observations: usize,
    pub recommendations: Vec<String>,
}

/// Finds recurring behaviors in a user's events.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    min_observations: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_OBSERVATIONS)
    }
}

impl PatternDetector {
    pub fn new(min_observations: usize) -> Self {
        Self {
            min_observations: min_observations.max(1),
        }
    }

    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    /// Runs every dimension, strongest pattern first.
    pub fn detect_all(&self, events: &[CalorieEvent], min_confidence: f64) -> Vec<PatternReport> {
        let mut reports: Vec<PatternReport> = PatternDimension::ALL
            .iter()
            .flat_map(|dimension| self.detect(events, *dimension, min_confidence))
            .collect();
        sort_by_confidence(&mut reports);
        reports
    }

    /// Patterns along one dimension with confidence of at least
    /// `min_confidence`, strongest first.
    pub fn detect(
        &self,
        events: &[CalorieEvent],
        dimension: PatternDimension,
        min_confidence: f64,
    ) -> Vec<PatternReport> {
        let min_confidence = min_confidence.clamp(0.0, 1.0);
        let mut reports = match dimension {
            PatternDimension::MealTimeOfDay => self.meal_timing(events),
            PatternDimension::Weekday => self.weekday_intake(events),
            PatternDimension::HighIntakeDay => self.high_intake_days(events),
        };
        reports.retain(|r| r.confidence_score >= min_confidence);
        sort_by_confidence(&mut reports);
        reports
    }

    fn meal_timing(&self, events: &[CalorieEvent]) -> Vec<PatternReport> {
        let mut slots: BTreeMap<MealSlot, usize> = BTreeMap::new();
        let mut total = 0;
        for event in events {
            let slot = MealSlot::from_hour(event.timestamp().hour());
            for entry in event.entries() {
                if matches!(entry, EventEntry::Consumed(_)) {
                    *slots.entry(slot).or_default() += 1;
                    total += 1;
                }
            }
        }
        if total < self.min_observations {
            return Vec::new();
        }

        slots
            .into_iter()
            .map(|(slot, matching)| {
                let confidence = ratio(matching, total);
                PatternReport {
                    pattern_id: format!("meal_time_{}", slot.as_str()),
                    dimension: PatternDimension::MealTimeOfDay,
                    description: format!(
                        "{:.0}% of logged meals fall in the {} window",
                        confidence * 100.0,
                        slot.as_str().replace('_', " ")
                    ),
                    confidence_score: confidence,
                    observations: total,
                    matching_observations: matching,
                    recommendations: slot.recommendations(),
                }
            })
            .collect()
    }

    fn weekday_intake(&self, events: &[CalorieEvent]) -> Vec<PatternReport> {
        let days = daily_intake(events);
        let Some(threshold) = high_intake_threshold(&days) else {
            return Vec::new();
        };

        let mut by_weekday: BTreeMap<u32, (Weekday, usize, usize)> = BTreeMap::new();
        for (date, intake) in &days {
            let weekday = date.weekday();
            let group = by_weekday
                .entry(weekday.num_days_from_monday())
                .or_insert((weekday, 0, 0));
            group.1 += 1;
            if *intake > threshold {
                group.2 += 1;
            }
        }

        by_weekday
            .into_values()
            .filter(|(_, observed, matching)| *observed >= self.min_observations && *matching > 0)
            .map(|(weekday, observed, matching)| {
                let name = weekday_name(weekday);
                PatternReport {
                    pattern_id: format!("weekday_high_intake_{}", name.to_lowercase()),
                    dimension: PatternDimension::Weekday,
                    description: format!(
                        "Intake runs more than {:.0}% above average on {} of {} {}s",
                        HIGH_INTAKE_RATIO * 100.0,
                        matching,
                        observed,
                        name
                    ),
                    confidence_score: ratio(matching, observed),
                    observations: observed,
                    matching_observations: matching,
                    recommendations: vec![
                        format!("Plan {} meals in advance", name),
                        format!("Add an activity you enjoy on {}s", name),
                    ],
                }
            })
            .collect()
    }

    fn high_intake_days(&self, events: &[CalorieEvent]) -> Vec<PatternReport> {
        let days = daily_intake(events);
        if days.len() < self.min_observations {
            return Vec::new();
        }
        let Some(threshold) = high_intake_threshold(&days) else {
            return Vec::new();
        };

        let matching = days.values().filter(|intake| **intake > threshold).count();
        if matching == 0 {
            return Vec::new();
        }

        vec![PatternReport {
            pattern_id: "frequent_high_intake_days".to_string(),
            dimension: PatternDimension::HighIntakeDay,
            description: format!(
                "{} of {} tracked days ran more than {:.0}% above average intake",
                matching,
                days.len(),
                HIGH_INTAKE_RATIO * 100.0
            ),
            confidence_score: ratio(matching, days.len()),
            observations: days.len(),
            matching_observations: matching,
            recommendations: vec![
                "Review what preceded your highest-intake days".to_string(),
                "Keep portions consistent from day to day".to_string(),
            ],
        }]
    }
}

/// Consumed calories per date, for dates with at least one consumed entry.
fn daily_intake(events: &[CalorieEvent]) -> BTreeMap<NaiveDate, f64> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for event in events {
        for entry in event.entries() {
            if let EventEntry::Consumed(kcal) = entry {
                *days.entry(event.timestamp().date()).or_default() += kcal;
            }
        }
    }
    days
}

fn high_intake_threshold(days: &BTreeMap<NaiveDate, f64>) -> Option<f64> {
    let intakes: Vec<f64> = days.values().copied().collect();
    mean(&intakes)
        .filter(|m| *m > 0.0)
        .map(|m| m * (1.0 + HIGH_INTAKE_RATIO))
}

fn ratio(matching: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn sort_by_confidence(reports: &mut [PatternReport]) {
    reports.sort_by(|a, b| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then_with(|| a.pattern_id.cmp(&b.pattern_id))
    });
}
