//! Three-dimensional meaning-energy vector

use serde::{Deserialize, Serialize};

/// Ordered triple over the fixed dimensions (chaos, rebirth, transformation).
///
/// Raw table vectors keep each component in [0,1]. A synthesized vector is
/// additionally unit length (or the fixed fallback when the blend cancels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionVector {
    pub chaos: f64,
    pub rebirth: f64,
    pub transformation: f64,
}

/// The three dimension names, in canonical order
pub const DIMENSIONS: [&str; 3] = ["chaos", "rebirth", "transformation"];

impl DimensionVector {
    pub fn new(chaos: f64, rebirth: f64, transformation: f64) -> Self {
        Self {
            chaos,
            rebirth,
            transformation,
        }
    }

    /// Neutral vector used when a request names no systems
    pub fn neutral() -> Self {
        Self::new(
            crate::NEUTRAL_VALUE,
            crate::NEUTRAL_VALUE,
            crate::NEUTRAL_VALUE,
        )
    }

    /// Fixed fallback unit vector (1/√3, 1/√3, 1/√3) for a fully-cancelling blend
    pub fn fallback_unit() -> Self {
        let c = 1.0 / 3.0_f64.sqrt();
        Self::new(c, c, c)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.chaos, self.rebirth, self.transformation]
    }

    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        (self.chaos * self.chaos
            + self.rebirth * self.rebirth
            + self.transformation * self.transformation)
            .sqrt()
    }

    pub fn dot(&self, other: &DimensionVector) -> f64 {
        self.chaos * other.chaos
            + self.rebirth * other.rebirth
            + self.transformation * other.transformation
    }

    /// Smallest component
    pub fn min_component(&self) -> f64 {
        self.chaos.min(self.rebirth).min(self.transformation)
    }

    /// True when every component lies in [0,1]
    pub fn in_unit_range(&self) -> bool {
        self.as_array().iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Component-wise arithmetic mean of a non-empty slice.
    /// Returns the neutral vector for an empty slice.
    pub fn mean(vectors: &[DimensionVector]) -> DimensionVector {
        if vectors.is_empty() {
            return DimensionVector::neutral();
        }
        let n = vectors.len() as f64;
        let mut sum = DimensionVector::new(0.0, 0.0, 0.0);
        for v in vectors {
            sum.chaos += v.chaos;
            sum.rebirth += v.rebirth;
            sum.transformation += v.transformation;
        }
        DimensionVector::new(sum.chaos / n, sum.rebirth / n, sum.transformation / n)
    }

    /// Scale to unit length. Returns the normalized vector and whether the
    /// zero-norm fallback was used.
    pub fn normalized(&self) -> (DimensionVector, bool) {
        let norm = self.norm();
        if norm > 0.0 {
            (
                DimensionVector::new(
                    self.chaos / norm,
                    self.rebirth / norm,
                    self.transformation / norm,
                ),
                false,
            )
        } else {
            (DimensionVector::fallback_unit(), true)
        }
    }
}

impl std::fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4})",
            self.chaos, self.rebirth, self.transformation
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
