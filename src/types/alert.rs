//! Alert level definitions

use serde::{Deserialize, Serialize};

/// Alert level for one monitoring observation, recomputed fresh every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    /// Both metrics inside their comfortable bands
    Stable,
    /// Drift elevated or resonance sagging
    Warning,
    /// Drift past the critical threshold or resonance collapsed
    Critical,
}

impl AlertLevel {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            AlertLevel::Stable => "\x1b[32m",   // Green
            AlertLevel::Warning => "\x1b[33m",  // Orange/Yellow
            AlertLevel::Critical => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for alert level
    pub fn emoji(&self) -> &'static str {
        match self {
            AlertLevel::Stable => "🟢",
            AlertLevel::Warning => "🟡",
            AlertLevel::Critical => "🔴",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlertLevel::Stable => "STABLE",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}
