//! Temporal Rollup Engine - multi-resolution aggregation of the ledger.
//!
//! Hourly rollups read raw events because ledger rows have day resolution.
//! Day, week and month rollups read ledger rows. Averages are taken over
//! the days that have a ledger row, so a missing day never reads as a
//! zero-calorie day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analysis::{
    classify_trend, TrendAnalysis, TrendDirection, DEFAULT_TREND_THRESHOLD,
};
use crate::domain::ledger::{CalorieEvent, DailyBalance, EventEntry};

use super::{ActiveDayPolicy, DateRange, Deadline, Granularity, RollupError};

const HOURS_PER_DAY: u32 = 24;

/// Default trailing window for the consistency score.
pub const DEFAULT_CONSISTENCY_WINDOW_DAYS: u32 = 30;
/// Days of data required before a consistency score is given.
pub const DEFAULT_CONSISTENCY_MIN_DAYS: u32 = 10;

/// Series a rollup trend is classified over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    #[default]
    Consumed,
    Burned,
    Net,
}

impl TrendMetric {
    fn value(&self, point: &RollupPoint) -> f64 {
        match self {
            TrendMetric::Consumed => point.avg_consumed,
            TrendMetric::Burned => point.avg_burned,
            TrendMetric::Net => point.avg_net,
        }
    }
}

/// Tunables for the rollup engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollupSettings {
    pub trend_threshold: f64,
    pub trend_metric: TrendMetric,
    pub active_day_policy: ActiveDayPolicy,
    pub consistency_window_days: u32,
    pub consistency_min_days: u32,
}

impl Default for RollupSettings {
    fn default() -> Self {
        Self {
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            trend_metric: TrendMetric::default(),
            active_day_policy: ActiveDayPolicy::default(),
            consistency_window_days: DEFAULT_CONSISTENCY_WINDOW_DAYS,
            consistency_min_days: DEFAULT_CONSISTENCY_MIN_DAYS,
        }
    }
}

/// One hour of a single day's events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub consumed: f64,
    /// Exercise burn only; BMR has no intra-day resolution.
    pub burned: f64,
    pub net: f64,
    pub event_count: usize,
}

impl HourlyBucket {
    fn empty(hour: u32) -> Self {
        Self {
            hour,
            consumed: 0.0,
            burned: 0.0,
            net: 0.0,
            event_count: 0,
        }
    }
}

/// One period of a rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupPoint {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Set for hourly points only.
    pub hour: Option<u32>,
    pub total_consumed: f64,
    pub total_burned: f64,
    pub total_net: f64,
    pub avg_consumed: f64,
    pub avg_burned: f64,
    pub avg_net: f64,
    pub event_count: usize,
    pub days_with_data: u32,
    pub active_days: u32,
    pub total_days: u32,
    /// 0-100; zero when the period has no days.
    pub activity_percentage: f64,
}

impl RollupPoint {
    fn from_hour(date: NaiveDate, bucket: &HourlyBucket) -> Self {
        Self {
            period_start: date,
            period_end: date,
            hour: Some(bucket.hour),
            total_consumed: bucket.consumed,
            total_burned: bucket.burned,
            total_net: bucket.net,
            avg_consumed: bucket.consumed,
            avg_burned: bucket.burned,
            avg_net: bucket.net,
            event_count: bucket.event_count,
            days_with_data: 0,
            active_days: 0,
            total_days: 0,
            activity_percentage: 0.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.days_with_data > 0 || self.event_count > 0
    }
}

/// A complete rollup at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupView {
    pub granularity: Granularity,
    pub range: DateRange,
    pub points: Vec<RollupPoint>,
    pub trend: TrendAnalysis,
}

impl RollupView {
    pub fn trend_direction(&self) -> TrendDirection {
        self.trend.direction
    }
}

/// Builds rollups, streaks and consistency scores from ledger data.
///
/// Stateless apart from its settings; every call is a pure computation over
/// the rows handed in.
#[derive(Debug, Clone, Default)]
pub struct TemporalRollupEngine {
    settings: RollupSettings,
}

impl TemporalRollupEngine {
    pub fn new(settings: RollupSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RollupSettings {
        &self.settings
    }

    pub fn active_day_policy(&self) -> ActiveDayPolicy {
        self.settings.active_day_policy
    }

    /// Exactly 24 buckets for `date`, zero-filled.
    ///
    /// Events from other dates are ignored; batch events contribute every
    /// entry but count as one event.
    pub fn hourly(&self, date: NaiveDate, events: &[CalorieEvent]) -> Vec<HourlyBucket> {
        let mut buckets: Vec<HourlyBucket> = (0..HOURS_PER_DAY).map(HourlyBucket::empty).collect();

        for event in events.iter().filter(|e| e.timestamp().date() == date) {
            let hour = event.timestamp().hour().min(HOURS_PER_DAY - 1) as usize;
            let bucket = &mut buckets[hour];
            for entry in event.entries() {
                match entry {
                    EventEntry::Consumed(kcal) => bucket.consumed += kcal,
                    EventEntry::BurnedExercise(kcal) => bucket.burned += kcal,
                    EventEntry::Weight(_) => {}
                }
            }
            bucket.event_count += 1;
        }

        for bucket in &mut buckets {
            bucket.net = bucket.consumed - bucket.burned;
        }
        buckets
    }

    /// Hourly view with the trend taken over hours that saw events.
    pub fn hourly_view(&self, date: NaiveDate, events: &[CalorieEvent]) -> RollupView {
        let points: Vec<RollupPoint> = self
            .hourly(date, events)
            .iter()
            .map(|bucket| RollupPoint::from_hour(date, bucket))
            .collect();
        let trend = self.trend_over(&points);
        RollupView {
            granularity: Granularity::Hour,
            range: DateRange::single(date),
            points,
            trend,
        }
    }

    /// Rolls ledger rows up to day, week or month periods over `range`.
    ///
    /// Every period of the range yields a point, including periods without
    /// rows. The deadline is checked before each period; once it passes the
    /// whole rollup fails.
    pub fn rollup(
        &self,
        granularity: Granularity,
        rows: &[DailyBalance],
        range: DateRange,
        deadline: Deadline,
    ) -> Result<RollupView, RollupError> {
        if granularity == Granularity::Hour {
            return Err(RollupError::invalid_window(
                "hourly rollups are built from events, not ledger rows",
            ));
        }

        let by_date: BTreeMap<NaiveDate, &DailyBalance> = rows
            .iter()
            .filter(|row| range.contains(row.date()))
            .map(|row| (row.date(), row))
            .collect();

        let mut points = Vec::new();
        for period in range.periods(granularity) {
            deadline.check()?;
            let period_rows: Vec<&DailyBalance> = by_date
                .range(period.start()..=period.end())
                .map(|(_, row)| *row)
                .collect();
            points.push(self.summarize(period, &period_rows));
        }
        deadline.check()?;

        let trend = self.trend_over(&points);
        Ok(RollupView {
            granularity,
            range,
            points,
            trend,
        })
    }

    pub fn daily(
        &self,
        rows: &[DailyBalance],
        range: DateRange,
        deadline: Deadline,
    ) -> Result<RollupView, RollupError> {
        self.rollup(Granularity::Day, rows, range, deadline)
    }

    pub fn weekly(
        &self,
        rows: &[DailyBalance],
        range: DateRange,
        deadline: Deadline,
    ) -> Result<RollupView, RollupError> {
        self.rollup(Granularity::Week, rows, range, deadline)
    }

    pub fn monthly(
        &self,
        rows: &[DailyBalance],
        range: DateRange,
        deadline: Deadline,
    ) -> Result<RollupView, RollupError> {
        self.rollup(Granularity::Month, rows, range, deadline)
    }

    fn summarize(&self, period: DateRange, rows: &[&DailyBalance]) -> RollupPoint {
        let total_consumed: f64 = rows.iter().map(|r| r.calories_consumed()).sum();
        let total_burned: f64 = rows.iter().map(|r| r.total_burned()).sum();
        let total_net: f64 = rows.iter().map(|r| r.net_calories()).sum();
        let days_with_data = rows.len() as u32;
        let active_days = rows
            .iter()
            .filter(|r| self.settings.active_day_policy.is_active(r))
            .count() as u32;
        let total_days = period.num_days() as u32;

        let per_day = |total: f64| {
            if days_with_data == 0 {
                0.0
            } else {
                total / f64::from(days_with_data)
            }
        };

        RollupPoint {
            period_start: period.start(),
            period_end: period.end(),
            hour: None,
            total_consumed,
            total_burned,
            total_net,
            avg_consumed: per_day(total_consumed),
            avg_burned: per_day(total_burned),
            avg_net: per_day(total_net),
            event_count: 0,
            days_with_data,
            active_days,
            total_days,
            activity_percentage: activity_percentage(active_days, total_days),
        }
    }

    fn trend_over(&self, points: &[RollupPoint]) -> TrendAnalysis {
        let series: Vec<f64> = points
            .iter()
            .filter(|p| p.has_data())
            .map(|p| self.settings.trend_metric.value(p))
            .collect();
        classify_trend(&series, self.settings.trend_threshold)
    }
}

/// `active / total * 100`, zero for an empty period.
pub(crate) fn activity_percentage(active_days: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        0.0
    } else {
        f64::from(active_days) / f64::from(total_days) * 100.0
    }
}
