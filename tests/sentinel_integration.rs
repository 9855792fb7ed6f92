//! Integration tests for the trajectory sentinel

use pretty_assertions::assert_eq;
use rsm0::core::TrajectorySentinel;
use rsm0::types::{AlertLevel, Stability, ThresholdConfig, Trend};
use rsm0::TRAJECTORY_WINDOW;

/// Low drift, healthy resonance: STABLE under default thresholds
#[test]
fn test_default_stable() {
    let mut sentinel = TrajectorySentinel::new();
    let report = sentinel.observe(0.05, 0.8, None);
    assert_eq!(report.sample.alert, AlertLevel::Stable);
}

/// Drift past di2_critical alone forces CRITICAL even with healthy resonance
#[test]
fn test_or_precedence_drift_critical() {
    let mut sentinel = TrajectorySentinel::new();
    let report = sentinel.observe(0.35, 0.8, None);
    assert_eq!(report.sample.alert, AlertLevel::Critical);
}

/// The six-sample decreasing resonance series: trend decreasing, window
/// capped at the default length after the sixth call
#[test]
fn test_decreasing_series_caps_window() {
    let mut sentinel = TrajectorySentinel::new();
    let resonances = [0.80, 0.65, 0.30, 0.15, 0.10, 0.05];

    let mut last = None;
    for ri in resonances {
        last = Some(sentinel.observe(0.05, ri, None));
    }

    let report = last.unwrap();
    assert_eq!(report.trajectory.ri_trend, Trend::Decreasing);
    assert_eq!(report.history_length, TRAJECTORY_WINDOW);
}

/// Alert classification is fresh per call, not cumulative
#[test]
fn test_classification_not_sticky() {
    let mut sentinel = TrajectorySentinel::new();

    let critical = sentinel.observe(0.5, 0.8, None);
    assert_eq!(critical.sample.alert, AlertLevel::Critical);

    let stable = sentinel.observe(0.05, 0.8, None);
    assert_eq!(stable.sample.alert, AlertLevel::Stable);
}

/// Report carries the active thresholds, the trajectory and the window length
#[test]
fn test_report_bundle() {
    let thresholds = ThresholdConfig {
        di2_warning: 0.1,
        di2_critical: 0.2,
        ri_warning: 0.5,
        ri_critical: 0.3,
        trajectory_window: 4,
    };
    let mut sentinel = TrajectorySentinel::with_thresholds(thresholds.clone());

    sentinel.observe(0.05, 0.9, None);
    let report = sentinel.observe(0.05, 0.9, None);

    assert_eq!(report.thresholds, thresholds);
    assert_eq!(report.history_length, 2);
    assert_eq!(report.trajectory.stability, Stability::Stable);
}

/// Boundary values: thresholds are inclusive (>= for drift, <= for resonance)
#[test]
fn test_threshold_boundaries_inclusive() {
    let mut sentinel = TrajectorySentinel::new();

    assert_eq!(sentinel.observe(0.3, 0.8, None).sample.alert, AlertLevel::Critical);
    assert_eq!(sentinel.observe(0.2, 0.8, None).sample.alert, AlertLevel::Warning);
    assert_eq!(sentinel.observe(0.05, 0.2, None).sample.alert, AlertLevel::Critical);
    assert_eq!(sentinel.observe(0.05, 0.4, None).sample.alert, AlertLevel::Warning);
}

/// Report serializes to the documented JSON shape
#[test]
fn test_report_serialization() {
    let mut sentinel = TrajectorySentinel::new();
    sentinel.observe(0.05, 0.8, None);
    let report = sentinel.observe(0.1, 0.7, None);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sample"]["alert"], "STABLE");
    assert!(json["trajectory"]["ri_trend"].is_string());
    assert_eq!(json["history_length"], 2);
    assert_eq!(json["thresholds"]["trajectory_window"], 5);
}
