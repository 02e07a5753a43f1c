//! Streak and consistency scoring.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::ledger::DailyBalance;

use super::engine::activity_percentage;
use super::{DateRange, TemporalRollupEngine};

/// Engagement summary as of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub as_of: NaiveDate,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// 0-100; zero until enough days of data exist.
    pub consistency_score: f64,
    pub days_with_data: u32,
    pub active_days: u32,
    pub window_days: u32,
    pub activity_percentage: f64,
}

impl TemporalRollupEngine {
    /// Consecutive active days ending on `today`.
    ///
    /// Walks backward from `today` and stops at the first day that is
    /// missing or inactive, so an untracked `today` gives zero.
    pub fn current_streak(&self, rows: &[DailyBalance], today: NaiveDate) -> u32 {
        let by_date = index(rows);
        let policy = self.active_day_policy();

        let mut streak = 0;
        let mut day = today;
        while let Some(row) = by_date.get(&day) {
            if !policy.is_active(row) {
                break;
            }
            streak += 1;
            day = match day.checked_sub_signed(Duration::days(1)) {
                Some(previous) => previous,
                None => break,
            };
        }
        streak
    }

    /// Longest run of consecutive active days anywhere in `rows`.
    pub fn longest_streak(&self, rows: &[DailyBalance]) -> u32 {
        let policy = self.active_day_policy();
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;

        for (date, row) in index(rows) {
            if !policy.is_active(row) {
                run = 0;
                previous = None;
                continue;
            }
            run = match previous {
                Some(prev) if prev.succ_opt() == Some(date) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(date);
        }
        longest
    }

    /// `min(100, active_days / window * 100)` over the trailing window.
    ///
    /// Returns zero while fewer than the configured minimum of days have a
    /// ledger row; thin data is not an error.
    pub fn consistency_score(&self, rows: &[DailyBalance], today: NaiveDate) -> f64 {
        let settings = self.settings();
        let window = DateRange::trailing(today, settings.consistency_window_days);
        let (days_with_data, active_days) = self.count_days(rows, window);

        if days_with_data < settings.consistency_min_days {
            return 0.0;
        }
        activity_percentage(active_days, settings.consistency_window_days).min(100.0)
    }

    /// Streaks, consistency and activity share over the consistency window.
    pub fn activity_summary(&self, rows: &[DailyBalance], today: NaiveDate) -> ActivitySummary {
        let window_days = self.settings().consistency_window_days;
        let window = DateRange::trailing(today, window_days);
        let (days_with_data, active_days) = self.count_days(rows, window);

        ActivitySummary {
            as_of: today,
            current_streak: self.current_streak(rows, today),
            longest_streak: self.longest_streak(rows),
            consistency_score: self.consistency_score(rows, today),
            days_with_data,
            active_days,
            window_days,
            activity_percentage: activity_percentage(active_days, window_days),
        }
    }

    fn count_days(&self, rows: &[DailyBalance], window: DateRange) -> (u32, u32) {
        let policy = self.active_day_policy();
        let in_window: Vec<&DailyBalance> = index(rows)
            .into_iter()
            .filter(|(date, _)| window.contains(*date))
            .map(|(_, row)| row)
            .collect();
        let active = in_window.iter().filter(|row| policy.is_active(row)).count();
        (in_window.len() as u32, active as u32)
    }
}

fn index(rows: &[DailyBalance]) -> BTreeMap<NaiveDate, &DailyBalance> {
    rows.iter().map(|row| (row.date(), row)).collect()
}
