//! Resonance scorer: normalized vector → bounded harmony scalar
//!
//! RI = clamp((dot(vme, w) / ||w||  -  conflict_penalty(vme)) * confidence, 0, 1)
//!
//! Pure functions, no state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, DimensionVector};
use crate::{
    CHAOS_DOMINANCE_THRESHOLD, PENALTY_CAP, PENALTY_CHAOS_REBIRTH, PENALTY_CHAOS_TRANSFORMATION,
    PENALTY_EXCESS_CHAOS, PENALTY_REBIRTH_TRANSFORMATION, PENALTY_STAGNATION, STAGNATION_FLOOR,
};

/// Per-dimension projection weights. Missing dimensions default to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextWeights {
    pub chaos: f64,
    pub rebirth: f64,
    pub transformation: f64,
}

impl Default for ContextWeights {
    fn default() -> Self {
        Self {
            chaos: 1.0,
            rebirth: 1.0,
            transformation: 1.0,
        }
    }
}

impl ContextWeights {
    pub fn new(chaos: f64, rebirth: f64, transformation: f64) -> Self {
        Self {
            chaos,
            rebirth,
            transformation,
        }
    }

    /// Build from a string-keyed map, defaulting absent dimensions to 1.0
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        Self {
            chaos: map.get("chaos").copied().unwrap_or(1.0),
            rebirth: map.get("rebirth").copied().unwrap_or(1.0),
            transformation: map.get("transformation").copied().unwrap_or(1.0),
        }
    }

    /// Euclidean norm of the weight vector
    pub fn norm(&self) -> f64 {
        (self.chaos * self.chaos
            + self.rebirth * self.rebirth
            + self.transformation * self.transformation)
            .sqrt()
    }

    fn dot(&self, vme: &DimensionVector) -> f64 {
        self.chaos * vme.chaos
            + self.rebirth * vme.rebirth
            + self.transformation * vme.transformation
    }
}

/// Resonance index in [0,1] for a synthesized vector.
///
/// Fails only when the supplied weights have zero norm; that is a caller
/// configuration error, not a data error.
pub fn resonance_index(
    vme: &DimensionVector,
    context_weights: Option<&ContextWeights>,
    confidence_factor: f64,
) -> Result<f64, ConfigError> {
    let default_weights = ContextWeights::default();
    let weights = context_weights.unwrap_or(&default_weights);

    let norm_factor = weights.norm();
    if norm_factor == 0.0 {
        return Err(ConfigError::ZeroWeightNorm);
    }

    let weighted_projection = weights.dot(vme) / norm_factor;
    let penalty = conflict_penalty(vme);

    let raw = weighted_projection - penalty;
    let adjusted = raw * confidence_factor;

    Ok(adjusted.clamp(0.0, 1.0))
}

/// Conflict penalty: five non-negative tension terms, capped at 0.3.
///
/// Three pairwise oppositions with asymmetric weights, an excess-chaos term
/// above the 0.8 dominance threshold, and a stagnation term when the weakest
/// dimension drops below 0.2.
pub fn conflict_penalty(vme: &DimensionVector) -> f64 {
    let chaos = vme.chaos;
    let rebirth = vme.rebirth;
    let transformation = vme.transformation;

    let opposition = (chaos - rebirth).abs() * PENALTY_CHAOS_REBIRTH
        + (rebirth - transformation).abs() * PENALTY_REBIRTH_TRANSFORMATION
        + (chaos - transformation).abs() * PENALTY_CHAOS_TRANSFORMATION;

    let excess_chaos = (chaos - CHAOS_DOMINANCE_THRESHOLD).max(0.0) * PENALTY_EXCESS_CHAOS;
    let stagnation = (STAGNATION_FLOOR - vme.min_component()).max(0.0) * PENALTY_STAGNATION;

    (opposition + excess_chaos + stagnation).min(PENALTY_CAP)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced() -> DimensionVector {
        DimensionVector::fallback_unit()
    }

    #[test]
    fn test_ri_in_unit_interval() {
        let extremes = [
            DimensionVector::new(1.0, 0.0, 0.0),
            DimensionVector::new(0.0, 1.0, 0.0),
            DimensionVector::new(0.0, 0.0, 1.0),
            balanced(),
        ];
        for vme in extremes {
            let ri = resonance_index(&vme, None, 1.0).unwrap();
            assert!((0.0..=1.0).contains(&ri), "ri out of range for {}: {}", vme, ri);
            assert!(ri.is_finite());
        }
    }

    #[test]
    fn test_ri_deterministic() {
        let vme = DimensionVector::new(0.5, 0.5, 0.707);
        let (vme, _) = vme.normalized();
        let a = resonance_index(&vme, None, 1.0).unwrap();
        let b = resonance_index(&vme, None, 1.0).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_conflicted_vector_penalized_more() {
        let conflicted = conflict_penalty(&DimensionVector::new(1.0, 0.0, 0.0));
        let calm = conflict_penalty(&balanced());
        assert!(
            conflicted > calm,
            "conflicted {} should exceed balanced {}",
            conflicted,
            calm
        );
    }

    #[test]
    fn test_penalty_non_negative_and_capped() {
        let worst = conflict_penalty(&DimensionVector::new(1.0, 0.0, 0.0));
        assert!(worst >= 0.0);
        assert!(worst <= PENALTY_CAP);
        // (1,0,0): 0.15 + 0 + 0.12 + 0.05*0.2 + 0.08*0.2 = 0.296, under the cap
        assert!((worst - 0.296).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_vector_has_no_opposition_penalty() {
        // Equal components: no pairwise terms, no excess chaos, no stagnation
        let penalty = conflict_penalty(&balanced());
        assert!(penalty.abs() < 1e-12);
    }

    #[test]
    fn test_stagnation_penalty_applies_below_floor() {
        let low = DimensionVector::new(0.1, 0.1, 0.1);
        let penalty = conflict_penalty(&low);
        // Only the stagnation term fires: 0.08 * (0.2 - 0.1)
        assert!((penalty - 0.008).abs() < 1e-12);
    }

    #[test]
    fn test_context_weights_from_map_defaults() {
        let mut map = HashMap::new();
        map.insert("chaos".to_string(), 0.5);
        let weights = ContextWeights::from_map(&map);
        assert_eq!(weights.chaos, 0.5);
        assert_eq!(weights.rebirth, 1.0);
        assert_eq!(weights.transformation, 1.0);
    }

    #[test]
    fn test_zero_norm_weights_rejected() {
        let weights = ContextWeights::new(0.0, 0.0, 0.0);
        let err = resonance_index(&balanced(), Some(&weights), 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWeightNorm));
    }

    #[test]
    fn test_confidence_factor_scales_down() {
        let vme = balanced();
        let full = resonance_index(&vme, None, 1.0).unwrap();
        let half = resonance_index(&vme, None, 0.5).unwrap();
        assert!(half < full);
        assert!((half - full * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_projection_does_not_require_unit_input() {
        // Contract holds for non-unit vme too; result still clamped
        let vme = DimensionVector::new(0.5, 0.5, 0.5);
        let ri = resonance_index(&vme, None, 1.0).unwrap();
        assert!((0.0..=1.0).contains(&ri));
    }
}
