//! Trend classification over an ordered numeric series.
//!
//! The series is split by index: the first `len / 2` points form the first
//! half and the rest the second half, so for odd lengths the middle point
//! belongs to the second half. The relative change of the half means
//! decides the direction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::mean;

/// Relative change beyond which a series counts as moving.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.10;

/// Direction of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
    NoData,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "UP",
            TrendDirection::Down => "DOWN",
            TrendDirection::Stable => "STABLE",
            TrendDirection::NoData => "NO_DATA",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub first_half_mean: Option<f64>,
    pub second_half_mean: Option<f64>,
    /// `(second - first) / first`; `None` when undefined
    pub change_ratio: Option<f64>,
}

impl TrendAnalysis {
    fn no_data(first_half_mean: Option<f64>, second_half_mean: Option<f64>) -> Self {
        Self {
            direction: TrendDirection::NoData,
            first_half_mean,
            second_half_mean,
            change_ratio: None,
        }
    }
}

/// Classifies an ordered series.
///
/// Returns `NoData` for fewer than two points or a zero first-half mean.
/// The change is relative to the signed first-half mean, so a series of
/// negative values moving toward zero has a negative change.
pub fn classify_trend(series: &[f64], threshold: f64) -> TrendAnalysis {
    if series.len() < 2 {
        return TrendAnalysis::no_data(None, None);
    }

    let (first, second) = series.split_at(series.len() / 2);
    let (Some(first_mean), Some(second_mean)) = (mean(first), mean(second)) else {
        return TrendAnalysis::no_data(None, None);
    };
    if first_mean == 0.0 {
        return TrendAnalysis::no_data(Some(first_mean), Some(second_mean));
    }

    let change = (second_mean - first_mean) / first_mean;
    let direction = if change > threshold {
        TrendDirection::Up
    } else if change < -threshold {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    TrendAnalysis {
        direction,
        first_half_mean: Some(first_mean),
        second_half_mean: Some(second_mean),
        change_ratio: Some(change),
    }
}
