//! Trajectory sentinel: drift/resonance monitoring over a bounded window
//!
//! Alert classification is recomputed fresh on every observation:
//! - CRITICAL: di2 >= di2_critical OR ri <= ri_critical
//! - WARNING:  di2 >= di2_warning  OR ri <= ri_warning
//! - STABLE:   otherwise
//!
//! One sentinel per logical session; concurrent `observe` calls on the same
//! instance must be serialized by the caller.

use chrono::{DateTime, Utc};

use crate::types::{
    AlertLevel, MonitoringReport, MonitoringSample, MonitoringWindow, Stability, ThresholdConfig,
    TrajectoryAnalysis, Trend,
};
use crate::{CV_EPSILON, STABILITY_CV_CUTOFF};

/// Drift monitoring with trajectory tracking
#[derive(Debug, Clone)]
pub struct TrajectorySentinel {
    thresholds: ThresholdConfig,
    window: MonitoringWindow,
}

impl Default for TrajectorySentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectorySentinel {
    /// Sentinel with default thresholds
    pub fn new() -> Self {
        Self::with_thresholds(ThresholdConfig::default())
    }

    pub fn with_thresholds(thresholds: ThresholdConfig) -> Self {
        let window = MonitoringWindow::with_max_len(thresholds.trajectory_window);
        Self { thresholds, window }
    }

    /// Record one (drift, resonance) observation and report on the current
    /// trajectory. Never fails for valid numeric input; the timestamp
    /// defaults to now.
    pub fn observe(
        &mut self,
        di2: f64,
        ri: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> MonitoringReport {
        let timestamp = timestamp.unwrap_or_else(Utc::now);
        let alert = self.classify(di2, ri);

        let sample = MonitoringSample::new(timestamp, di2, ri, alert);
        self.window.push(sample.clone());

        MonitoringReport {
            sample,
            trajectory: self.analyze(),
            history_length: self.window.len(),
            thresholds: self.thresholds.clone(),
        }
    }

    /// Alert level for one observation. CRITICAL is checked before WARNING;
    /// within each band either metric alone can trigger.
    fn classify(&self, di2: f64, ri: f64) -> AlertLevel {
        if di2 >= self.thresholds.di2_critical || ri <= self.thresholds.ri_critical {
            AlertLevel::Critical
        } else if di2 >= self.thresholds.di2_warning || ri <= self.thresholds.ri_warning {
            AlertLevel::Warning
        } else {
            AlertLevel::Stable
        }
    }

    /// Trend and stability over the current window
    fn analyze(&self) -> TrajectoryAnalysis {
        if self.window.len() < 2 {
            return TrajectoryAnalysis::insufficient_data();
        }

        let di2_series = self.window.di2_series();
        let ri_series = self.window.ri_series();

        // Endpoint comparison, not a regression fit
        let di2_trend = endpoint_trend(&di2_series);
        let ri_trend = endpoint_trend(&ri_series);

        let di2_volatility = coefficient_of_variation(&di2_series);
        let ri_volatility = coefficient_of_variation(&ri_series);

        let stability = if di2_volatility.max(ri_volatility) < STABILITY_CV_CUTOFF {
            Stability::Stable
        } else {
            Stability::Volatile
        };

        TrajectoryAnalysis {
            di2_trend,
            ri_trend,
            stability,
            di2_volatility,
            ri_volatility,
        }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn window(&self) -> &MonitoringWindow {
        &self.window
    }

    /// Drop all history, keep thresholds
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

/// "increasing" when the last value exceeds the first, else "decreasing"
fn endpoint_trend(series: &[f64]) -> Trend {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if last > first => Trend::Increasing,
        (Some(_), Some(_)) => Trend::Decreasing,
        _ => Trend::InsufficientData,
    }
}

/// Population standard deviation over (mean + ε)
fn coefficient_of_variation(series: &[f64]) -> f64 {
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / (mean + CV_EPSILON)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_classification() {
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.05, 0.8, None);
        assert_eq!(report.sample.alert, AlertLevel::Stable);
    }

    #[test]
    fn test_critical_on_drift_alone() {
        // di2 past critical even though ri is healthy - OR precedence
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.35, 0.8, None);
        assert_eq!(report.sample.alert, AlertLevel::Critical);
    }

    #[test]
    fn test_critical_on_resonance_alone() {
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.05, 0.1, None);
        assert_eq!(report.sample.alert, AlertLevel::Critical);
    }

    #[test]
    fn test_warning_band() {
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.25, 0.8, None);
        assert_eq!(report.sample.alert, AlertLevel::Warning);

        let report = sentinel.observe(0.05, 0.35, None);
        assert_eq!(report.sample.alert, AlertLevel::Warning);
    }

    #[test]
    fn test_critical_wins_over_warning() {
        // Meets both a warning and a critical condition
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.25, 0.15, None);
        assert_eq!(report.sample.alert, AlertLevel::Critical);
    }

    #[test]
    fn test_first_observation_insufficient_data() {
        let mut sentinel = TrajectorySentinel::new();
        let report = sentinel.observe(0.05, 0.8, None);
        assert!(!report.trajectory.is_known());
        assert_eq!(report.trajectory.di2_trend, Trend::InsufficientData);
        assert_eq!(report.trajectory.stability, Stability::Unknown);
        assert_eq!(report.history_length, 1);
    }

    #[test]
    fn test_decreasing_resonance_and_window_cap() {
        let mut sentinel = TrajectorySentinel::new();
        let series = [0.80, 0.65, 0.30, 0.15, 0.10, 0.05];

        let mut last = None;
        for ri in series {
            last = Some(sentinel.observe(0.05, ri, None));
        }
        let report = last.unwrap();

        assert_eq!(report.trajectory.ri_trend, Trend::Decreasing);
        assert_eq!(report.history_length, 5);
        assert_eq!(sentinel.window().len(), 5);
    }

    #[test]
    fn test_increasing_drift_trend() {
        let mut sentinel = TrajectorySentinel::new();
        sentinel.observe(0.05, 0.8, None);
        let report = sentinel.observe(0.15, 0.8, None);
        assert_eq!(report.trajectory.di2_trend, Trend::Increasing);
    }

    #[test]
    fn test_flat_series_is_stable_and_decreasing() {
        // Endpoint tie breaks toward "decreasing"
        let mut sentinel = TrajectorySentinel::new();
        sentinel.observe(0.05, 0.8, None);
        let report = sentinel.observe(0.05, 0.8, None);
        assert_eq!(report.trajectory.ri_trend, Trend::Decreasing);
        assert_eq!(report.trajectory.stability, Stability::Stable);
        assert!(report.trajectory.ri_volatility.abs() < 1e-9);
    }

    #[test]
    fn test_volatile_series() {
        let mut sentinel = TrajectorySentinel::new();
        for ri in [0.9, 0.2, 0.9, 0.2, 0.9] {
            sentinel.observe(0.05, ri, None);
        }
        let report = sentinel.observe(0.05, 0.2, None);
        assert_eq!(report.trajectory.stability, Stability::Volatile);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut sentinel = TrajectorySentinel::with_thresholds(ThresholdConfig {
            di2_warning: 0.5,
            di2_critical: 0.9,
            ri_warning: 0.1,
            ri_critical: 0.05,
            trajectory_window: 3,
        });

        // Would be CRITICAL under defaults
        let report = sentinel.observe(0.35, 0.8, None);
        assert_eq!(report.sample.alert, AlertLevel::Stable);

        for _ in 0..5 {
            sentinel.observe(0.1, 0.8, None);
        }
        assert_eq!(sentinel.window().len(), 3);
    }

    #[test]
    fn test_explicit_timestamp_is_kept() {
        let mut sentinel = TrajectorySentinel::new();
        let ts = "2026-01-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let report = sentinel.observe(0.05, 0.8, Some(ts));
        assert_eq!(report.sample.timestamp, ts);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut sentinel = TrajectorySentinel::new();
        sentinel.observe(0.05, 0.8, None);
        sentinel.observe(0.05, 0.8, None);
        sentinel.reset();
        assert!(sentinel.window().is_empty());
    }
}
