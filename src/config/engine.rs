//! Engine tunables
//!
//! Thresholds and windows used by the calculators and rollup engine. Every
//! field has a default, so the whole section is optional.

use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::{
    ProgressAnalyzer, DEFAULT_ADHERENCE_TOLERANCE_KCAL, DEFAULT_TREND_THRESHOLD,
};
use crate::domain::metabolic::{
    MetabolicCalculator, DEFAULT_RECALCULATION_THRESHOLD, DEFAULT_VALIDITY_DAYS,
};
use crate::domain::rollup::{
    ActiveDayPolicy, PatternDetector, RollupSettings, TrendMetric, DEFAULT_CONSISTENCY_MIN_DAYS,
    DEFAULT_CONSISTENCY_WINDOW_DAYS, DEFAULT_MIN_OBSERVATIONS,
};

use super::error::ValidationError;

/// Engine configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Distance from target (kcal) still counted as adherent
    #[serde(default = "default_adherence_tolerance")]
    pub adherence_tolerance_kcal: f64,

    /// Days a metabolic profile stays valid
    #[serde(default = "default_validity_days")]
    pub metabolic_validity_days: i64,

    /// Relative BMR/TDEE drift that forces recalculation
    #[serde(default = "default_recalculation_threshold")]
    pub recalculation_threshold: f64,

    /// Relative change separating UP/DOWN from STABLE
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    #[serde(default)]
    pub trend_metric: TrendMetric,

    /// Trailing window for the consistency score
    #[serde(default = "default_consistency_window")]
    pub consistency_window_days: u32,

    /// Days of data required before consistency is scored
    #[serde(default = "default_consistency_min_days")]
    pub consistency_min_days: u32,

    /// When set, a day is active only with at least this much exercise
    #[serde(default)]
    pub active_day_min_exercise_kcal: Option<f64>,

    #[serde(default = "default_pattern_min_observations")]
    pub pattern_min_observations: usize,

    /// Time budget for a single rollup request
    #[serde(default = "default_rollup_deadline_ms")]
    pub rollup_deadline_ms: u64,
}

impl EngineConfig {
    pub fn rollup_deadline(&self) -> Duration {
        Duration::from_millis(self.rollup_deadline_ms)
    }

    pub fn active_day_policy(&self) -> ActiveDayPolicy {
        match self.active_day_min_exercise_kcal {
            Some(kcal) => ActiveDayPolicy::ExerciseAtLeast(kcal),
            None => ActiveDayPolicy::TrackingOccurred,
        }
    }

    pub fn rollup_settings(&self) -> RollupSettings {
        RollupSettings {
            trend_threshold: self.trend_threshold,
            trend_metric: self.trend_metric,
            active_day_policy: self.active_day_policy(),
            consistency_window_days: self.consistency_window_days,
            consistency_min_days: self.consistency_min_days,
        }
    }

    pub fn metabolic_calculator(&self) -> MetabolicCalculator {
        MetabolicCalculator::with_threshold(self.recalculation_threshold)
    }

    pub fn progress_analyzer(&self) -> ProgressAnalyzer {
        ProgressAnalyzer::with_tolerance(self.adherence_tolerance_kcal)
    }

    pub fn pattern_detector(&self) -> PatternDetector {
        PatternDetector::new(self.pattern_min_observations)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_non_negative(self.adherence_tolerance_kcal) {
            return Err(invalid("adherence_tolerance_kcal", "must be non-negative"));
        }
        if self.metabolic_validity_days < 1 {
            return Err(invalid("metabolic_validity_days", "must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.recalculation_threshold) {
            return Err(invalid("recalculation_threshold", "must be in [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.trend_threshold) {
            return Err(invalid("trend_threshold", "must be in [0, 1)"));
        }
        if self.consistency_window_days == 0 {
            return Err(invalid("consistency_window_days", "must be positive"));
        }
        if self.consistency_min_days > self.consistency_window_days {
            return Err(invalid(
                "consistency_min_days",
                "must not exceed consistency_window_days",
            ));
        }
        if self.active_day_min_exercise_kcal.is_some_and(|kcal| !is_non_negative(kcal)) {
            return Err(invalid("active_day_min_exercise_kcal", "must be non-negative"));
        }
        if self.pattern_min_observations == 0 {
            return Err(invalid("pattern_min_observations", "must be positive"));
        }
        if self.rollup_deadline_ms == 0 {
            return Err(invalid("rollup_deadline_ms", "must be positive"));
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(field: &'static str, reason: &str) -> ValidationError {
    ValidationError::InvalidEngineSetting {
        field,
        reason: reason.to_string(),
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            adherence_tolerance_kcal: default_adherence_tolerance(),
            metabolic_validity_days: default_validity_days(),
            recalculation_threshold: default_recalculation_threshold(),
            trend_threshold: default_trend_threshold(),
            trend_metric: TrendMetric::default(),
            consistency_window_days: default_consistency_window(),
            consistency_min_days: default_consistency_min_days(),
            active_day_min_exercise_kcal: None,
            pattern_min_observations: default_pattern_min_observations(),
            rollup_deadline_ms: default_rollup_deadline_ms(),
        }
    }
}

fn default_adherence_tolerance() -> f64 {
    DEFAULT_ADHERENCE_TOLERANCE_KCAL
}

fn default_validity_days() -> i64 {
    DEFAULT_VALIDITY_DAYS
}

fn default_recalculation_threshold() -> f64 {
    DEFAULT_RECALCULATION_THRESHOLD
}

fn default_trend_threshold() -> f64 {
    DEFAULT_TREND_THRESHOLD
}

fn default_consistency_window() -> u32 {
    DEFAULT_CONSISTENCY_WINDOW_DAYS
}

fn default_consistency_min_days() -> u32 {
    DEFAULT_CONSISTENCY_MIN_DAYS
}

fn default_pattern_min_observations() -> usize {
    DEFAULT_MIN_OBSERVATIONS
}

fn default_rollup_deadline_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.adherence_tolerance_kcal, 100.0);
        assert_eq!(config.metabolic_validity_days, 30);
        assert_eq!(config.recalculation_threshold, 0.05);
        assert_eq!(config.trend_threshold, 0.10);
        assert_eq!(config.consistency_window_days, 30);
        assert_eq!(config.consistency_min_days, 10);
        assert_eq!(config.pattern_min_observations, 5);
        assert_eq!(config.rollup_deadline(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rollup_settings_follow_config() {
        let config = EngineConfig {
            trend_threshold: 0.2,
            active_day_min_exercise_kcal: Some(150.0),
            ..Default::default()
        };
        let settings = config.rollup_settings();
        assert_eq!(settings.trend_threshold, 0.2);
        assert_eq!(settings.active_day_policy, ActiveDayPolicy::ExerciseAtLeast(150.0));
    }

    #[test]
    fn rejects_min_days_above_window() {
        let config = EngineConfig {
            consistency_window_days: 7,
            consistency_min_days: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEngineSetting { field: "consistency_min_days", .. })
        ));
    }

    #[test]
    fn rejects_nan_tolerance() {
        let config = EngineConfig {
            adherence_tolerance_kcal: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_deadline() {
        let config = EngineConfig {
            rollup_deadline_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
