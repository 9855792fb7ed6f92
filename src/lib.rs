//! RSM-0: Reference implementation of the RSM ontology
//!
//! Pipeline: symbolic request → VectorSynthesizer → resonance scoring → TrajectorySentinel

pub mod core;
pub mod types;

// =============================================================================
// CONFLICT PENALTY COEFFICIENTS [C] - Empirically tuned in RSM v2.2
// =============================================================================

/// Chaos vs rebirth opposition (strongest tension)
pub const PENALTY_CHAOS_REBIRTH: f64 = 0.15;

/// Rebirth vs transformation opposition (weakest tension)
pub const PENALTY_REBIRTH_TRANSFORMATION: f64 = 0.10;

/// Chaos vs transformation opposition
pub const PENALTY_CHAOS_TRANSFORMATION: f64 = 0.12;

/// Excess-chaos penalty, applied only above CHAOS_DOMINANCE_THRESHOLD
pub const PENALTY_EXCESS_CHAOS: f64 = 0.05;

/// Stagnation penalty, applied when the weakest dimension drops below STAGNATION_FLOOR
pub const PENALTY_STAGNATION: f64 = 0.08;

/// Chaos level above which the excess-chaos penalty kicks in
pub const CHAOS_DOMINANCE_THRESHOLD: f64 = 0.8;

/// Floor under the weakest dimension before the stagnation penalty kicks in
pub const STAGNATION_FLOOR: f64 = 0.2;

/// Hard cap on the total conflict penalty
pub const PENALTY_CAP: f64 = 0.3;

// =============================================================================
// SENTINEL THRESHOLDS [C] - Defaults, overridable per sentinel instance
// =============================================================================

/// Drift magnitude at which a WARNING is raised
pub const DI2_WARNING: f64 = 0.2;

/// Drift magnitude at which a CRITICAL is raised
pub const DI2_CRITICAL: f64 = 0.3;

/// Resonance at or below which a WARNING is raised
pub const RI_WARNING: f64 = 0.4;

/// Resonance at or below which a CRITICAL is raised
pub const RI_CRITICAL: f64 = 0.2;

/// Maximum number of samples kept in the trajectory window
pub const TRAJECTORY_WINDOW: usize = 5;

/// Coefficient-of-variation cutoff between "stable" and "volatile"
pub const STABILITY_CV_CUTOFF: f64 = 0.2;

/// Guard against division by zero in the CV calculation
pub const CV_EPSILON: f64 = 1e-8;

// =============================================================================
// SYNTHESIS CONSTANTS
// =============================================================================

/// Maximum accepted length for a symbol name
pub const MAX_SYMBOL_LEN: usize = 100;

/// Neutral dimension value, used when a request names no systems
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Confidence assumed when a record carries no confidence level
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Drift magnitude assumed for a single one-shot pipeline evaluation
pub const SINGLE_SHOT_DI2: f64 = 0.01;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "2.2.0";
