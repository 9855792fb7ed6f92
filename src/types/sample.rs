//! Monitoring samples and the bounded trajectory window

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AlertLevel;
use crate::TRAJECTORY_WINDOW;

/// One sentinel observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSample {
    pub timestamp: DateTime<Utc>,
    /// Drift magnitude (DI2), externally supplied, >= 0
    pub di2: f64,
    /// Resonance (RI), expected in [0,1]
    pub ri: f64,
    pub alert: AlertLevel,
}

impl MonitoringSample {
    pub fn new(timestamp: DateTime<Utc>, di2: f64, ri: f64, alert: AlertLevel) -> Self {
        Self {
            timestamp,
            di2,
            ri,
            alert,
        }
    }
}

/// Bounded FIFO of monitoring samples. Owned by exactly one sentinel; the
/// oldest sample is evicted when the configured maximum is exceeded.
#[derive(Debug, Clone)]
pub struct MonitoringWindow {
    samples: VecDeque<MonitoringSample>,
    max_len: usize,
}

impl Default for MonitoringWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitoringWindow {
    /// Create window with the default maximum length (5)
    pub fn new() -> Self {
        Self::with_max_len(TRAJECTORY_WINDOW)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            max_len: max_len.max(1),
        }
    }

    /// Append a sample, evicting from the front until within bounds
    pub fn push(&mut self, sample: MonitoringSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.max_len {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Samples oldest first
    pub fn samples(&self) -> impl Iterator<Item = &MonitoringSample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&MonitoringSample> {
        self.samples.front()
    }

    pub fn last(&self) -> Option<&MonitoringSample> {
        self.samples.back()
    }

    /// Drift series, oldest first
    pub fn di2_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.di2).collect()
    }

    /// Resonance series, oldest first
    pub fn ri_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.ri).collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Endpoint-comparison trend over a window series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    InsufficientData,
}

/// Coefficient-of-variation stability classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Volatile,
    Unknown,
}

/// Trend and stability descriptors for the current window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryAnalysis {
    pub di2_trend: Trend,
    pub ri_trend: Trend,
    pub stability: Stability,
    /// Coefficient of variation of the drift series
    pub di2_volatility: f64,
    /// Coefficient of variation of the resonance series
    pub ri_volatility: f64,
}

impl TrajectoryAnalysis {
    /// Analysis for a window with fewer than 2 samples
    pub fn insufficient_data() -> Self {
        Self {
            di2_trend: Trend::InsufficientData,
            ri_trend: Trend::InsufficientData,
            stability: Stability::Unknown,
            di2_volatility: 0.0,
            ri_volatility: 0.0,
        }
    }

    /// True when the window held enough samples to analyze
    pub fn is_known(&self) -> bool {
        self.stability != Stability::Unknown
    }
}

// =============================================================================
// TESTS
// =============================================================================
