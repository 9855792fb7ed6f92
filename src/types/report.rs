//! Report structures for monitoring output and end-to-end readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AlertLevel, DimensionVector, MonitoringSample, ResonanceRequest, SynthesisAudit,
    TrajectoryAnalysis,
};

/// Sentinel threshold configuration, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub di2_warning: f64,
    pub di2_critical: f64,
    pub ri_warning: f64,
    pub ri_critical: f64,
    pub trajectory_window: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            di2_warning: crate::DI2_WARNING,
            di2_critical: crate::DI2_CRITICAL,
            ri_warning: crate::RI_WARNING,
            ri_critical: crate::RI_CRITICAL,
            trajectory_window: crate::TRAJECTORY_WINDOW,
        }
    }
}

/// Output of one sentinel observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringReport {
    /// The just-recorded sample
    pub sample: MonitoringSample,
    pub trajectory: TrajectoryAnalysis,
    /// Window length after this observation
    pub history_length: usize,
    /// Active thresholds
    pub thresholds: ThresholdConfig,
}

impl MonitoringReport {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.sample.alert.color_code();
        let reset = AlertLevel::color_reset();
        let emoji = self.sample.alert.emoji();

        format!(
            "{}{} di2={:.3} | ri={:.3} | alert={} | window={}{}",
            color,
            emoji,
            self.sample.di2,
            self.sample.ri,
            self.sample.alert,
            self.history_length,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "di2={:.3} | ri={:.3} | alert={} | window={}",
            self.sample.di2, self.sample.ri, self.sample.alert, self.history_length
        )
    }
}

/// End-to-end pipeline result: vector, resonance, alert, trajectory.
/// The shape every presentation layer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Echo of the caller's request
    pub input: ResonanceRequest,
    /// Synthesized unit vector
    pub vme: DimensionVector,
    pub resonance_index: f64,
    /// Drift magnitude fed to the sentinel
    pub di2: f64,
    pub alert: AlertLevel,
    pub drift: MonitoringReport,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<SynthesisAudit>,
}

impl Reading {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.alert.color_code();
        let reset = AlertLevel::color_reset();
        let emoji = self.alert.emoji();

        format!(
            "{}{} vme={} | ri={:.3} | alert={}{}",
            color, emoji, self.vme, self.resonance_index, self.alert, reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "vme={} | ri={:.3} | di2={:.3} | alert={}",
            self.vme, self.resonance_index, self.di2, self.alert
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(thresholds.di2_warning, 0.2);
        assert_eq!(thresholds.di2_critical, 0.3);
        assert_eq!(thresholds.ri_warning, 0.4);
        assert_eq!(thresholds.ri_critical, 0.2);
        assert_eq!(thresholds.trajectory_window, 5);
    }

    #[test]
    fn test_parseable_report_format() {
        let report = MonitoringReport {
            sample: MonitoringSample::new(Utc::now(), 0.05, 0.8, AlertLevel::Stable),
            trajectory: TrajectoryAnalysis::insufficient_data(),
            history_length: 1,
            thresholds: ThresholdConfig::default(),
        };

        let formatted = report.to_parseable_string();
        assert!(formatted.contains("di2="));
        assert!(formatted.contains("ri="));
        assert!(formatted.contains("alert=STABLE"));
    }
}
