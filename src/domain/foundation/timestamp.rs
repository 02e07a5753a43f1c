//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Domain code never reads the wall clock itself; the current instant is
/// supplied by the `Clock` port so construction stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp at the given hour of a calendar date.
    ///
    /// Hours past 23 saturate to the last hour of the day.
    pub fn at_hour(date: NaiveDate, hour: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        Self(date.and_time(time).and_utc())
    }

    /// Creates a timestamp for midnight (00:00:00 UTC) of a calendar date.
    pub fn start_of_day(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the UTC calendar date of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns the UTC hour of day (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn at_hour_places_instant_in_bucket() {
        let ts = Timestamp::at_hour(date(2024, 3, 10), 13);
        assert_eq!(ts.hour(), 13);
        assert_eq!(ts.date(), date(2024, 3, 10));
    }

    #[test]
    fn at_hour_saturates_out_of_range_hours() {
        let ts = Timestamp::at_hour(date(2024, 3, 10), 40);
        assert_eq!(ts.hour(), 23);
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        let ts = Timestamp::start_of_day(date(2024, 1, 31)).add_days(1);
        assert_eq!(ts.date().month(), 2);
        assert_eq!(ts.date().day(), 1);
    }

    #[test]
    fn duration_since_is_signed() {
        let a = Timestamp::start_of_day(date(2024, 1, 1));
        let b = a.add_days(30);
        assert_eq!(b.duration_since(&a).num_days(), 30);
        assert_eq!(a.duration_since(&b).num_days(), -30);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = Timestamp::at_hour(date(2024, 1, 15), 10);
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::at_hour(date(2024, 1, 15), 9);
        let ts2 = Timestamp::at_hour(date(2024, 1, 15), 10);
        assert!(ts1 < ts2);
        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
    }
}
