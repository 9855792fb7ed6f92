//! Synthesis audit trail
//!
//! Records every input and intermediate value of one vector synthesis so the
//! computation can be checked after the fact. The audited path wraps the same
//! arithmetic as the plain path; the audit only observes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{DimensionVector, ResonanceRequest, SymbolicSystem, ValidatedRequest};

/// One system's contribution to a synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemContribution {
    pub system: SymbolicSystem,
    /// Normalized symbol name as resolved in the table
    pub symbol: String,
    /// Raw dimension vector as stored
    pub vector: DimensionVector,
    pub confidence: f64,
}

/// Full audit record for one synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisAudit {
    pub timestamp: DateTime<Utc>,
    /// Echo of the raw request
    pub input: ResonanceRequest,
    pub validated: ValidatedRequest,
    pub contributions: Vec<SystemContribution>,
    /// Component-wise mean before normalization
    pub raw_mean: DimensionVector,
    /// Unit vector after normalization
    pub normalized: DimensionVector,
    /// Mean confidence across contributing systems; 0.5 when none contributed
    pub overall_confidence: f64,
    /// Fallback warnings triggered during the calculation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Human-readable calculation steps, in order
    pub steps: Vec<String>,
    /// SHA-256 over the calculation steps, hex encoded
    pub digest: String,
}

impl SynthesisAudit {
    /// Compute the digest over the recorded steps. Identical steps always
    /// seal to an identical digest.
    pub fn seal(&mut self) {
        let mut hasher = Sha256::new();
        for step in &self.steps {
            hasher.update(step.as_bytes());
            hasher.update(b"\n");
        }
        let digest: [u8; 32] = hasher.finalize().into();
        self.digest = hex_encode(&digest);
    }

    pub fn systems_used(&self) -> Vec<SymbolicSystem> {
        self.contributions.iter().map(|c| c.system).collect()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// =============================================================================
// TESTS
// =============================================================================
