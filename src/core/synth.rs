//! Vector synthesizer: symbolic request → normalized meaning-energy vector
//!
//! Validation is a single typed pass over the request; the plain and audited
//! paths share one blend routine so both always produce the same vector for
//! the same input.

use std::sync::Arc;

use chrono::Utc;

use crate::core::{DiagnosticSink, NullSink};
use crate::types::{
    DimensionVector, ResolvedSymbol, ResonanceRequest, SymbolLibrary, SymbolicSystem,
    SynthesisAudit, SynthesisError, SystemContribution, SystemInfo, ValidatedRequest,
};
use crate::{DEFAULT_CONFIDENCE, MAX_SYMBOL_LEN};

/// Outcome of the shared blend routine
#[derive(Debug, Clone)]
struct BlendOutcome {
    raw_mean: DimensionVector,
    normalized: DimensionVector,
    fallback_used: bool,
}

/// Everything one synthesis run produces; the audit record is built from this
#[derive(Debug, Clone)]
struct SynthesisRun {
    validated: ValidatedRequest,
    contributions: Vec<SystemContribution>,
    blend: BlendOutcome,
}

/// Validates symbolic requests and blends their dimension vectors into one
/// unit-length vector. Holds no mutable state.
#[derive(Debug)]
pub struct VectorSynthesizer {
    library: SymbolLibrary,
    sink: Arc<dyn DiagnosticSink>,
}

impl VectorSynthesizer {
    pub fn new(library: SymbolLibrary) -> Self {
        Self {
            library,
            sink: Arc::new(NullSink),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn library(&self) -> &SymbolLibrary {
        &self.library
    }

    pub fn system_info(&self) -> SystemInfo {
        self.library.system_info()
    }

    /// Single typed validation pass over a raw request.
    ///
    /// Checks every entry's length, then resolves each known system's symbol
    /// against its table. Keys naming no known system are reported and
    /// skipped rather than rejected.
    pub fn validate(&self, request: &ResonanceRequest) -> Result<ValidatedRequest, SynthesisError> {
        for (key, value) in request.iter() {
            if value.chars().count() > MAX_SYMBOL_LEN {
                return Err(SynthesisError::SymbolTooLong {
                    key: key.to_string(),
                    max: MAX_SYMBOL_LEN,
                });
            }
        }

        let mut symbols = Vec::new();
        for system in SymbolicSystem::ALL {
            if let Some(raw_name) = request.get(system.key()) {
                let table = self.library.table(system);
                let (symbol, record) = table.resolve(raw_name).ok_or_else(|| {
                    SynthesisError::UnknownSymbol {
                        system,
                        symbol: raw_name.trim().to_string(),
                    }
                })?;
                // Tables validate on load; re-check here so a record built
                // through other means still honors the contract.
                if !record.dimensions.in_unit_range() {
                    return Err(SynthesisError::MalformedRecord {
                        system,
                        symbol: symbol.clone(),
                        detail: format!("dimension value out of [0,1]: {}", record.dimensions),
                    });
                }
                symbols.push(ResolvedSymbol { system, symbol });
            }
        }

        let ignored_keys: Vec<String> = request
            .iter()
            .filter(|(key, _)| SymbolicSystem::from_key(key).is_none())
            .map(|(key, _)| key.to_string())
            .collect();
        if !ignored_keys.is_empty() {
            self.sink
                .event(&format!("ignoring unknown request keys: {:?}", ignored_keys));
        }

        Ok(ValidatedRequest {
            symbols,
            ignored_keys,
        })
    }

    /// Synthesize the normalized meaning-energy vector for a request
    pub fn synthesize(
        &self,
        request: &ResonanceRequest,
    ) -> Result<DimensionVector, SynthesisError> {
        let run = self.run(request)?;
        Ok(run.blend.normalized)
    }

    /// Audited variant: same arithmetic, plus a record of every input and
    /// intermediate value. Vector output is identical to `synthesize` for
    /// identical input.
    pub fn synthesize_with_audit(
        &self,
        request: &ResonanceRequest,
    ) -> Result<(DimensionVector, SynthesisAudit), SynthesisError> {
        let run = self.run(request)?;

        let mut steps = vec!["Input validation passed".to_string()];
        for contribution in &run.contributions {
            steps.push(format!(
                "Extracted {} vector: {}",
                contribution.system, contribution.vector
            ));
        }
        steps.push(format!("Raw VME (pre-normalization): {}", run.blend.raw_mean));
        steps.push(format!("Normalized VME: {}", run.blend.normalized));
        steps.push("VME calculation completed successfully".to_string());

        let mut warnings = Vec::new();
        if run.contributions.is_empty() {
            warnings.push("No systems provided, used neutral input vector".to_string());
        }
        if run.blend.fallback_used {
            warnings.push("Zero norm detected, used default normalization".to_string());
        }

        let overall_confidence = if run.contributions.is_empty() {
            DEFAULT_CONFIDENCE
        } else {
            run.contributions.iter().map(|c| c.confidence).sum::<f64>()
                / run.contributions.len() as f64
        };

        let mut audit = SynthesisAudit {
            timestamp: Utc::now(),
            input: request.clone(),
            validated: run.validated,
            contributions: run.contributions,
            raw_mean: run.blend.raw_mean,
            normalized: run.blend.normalized,
            overall_confidence,
            warnings,
            steps,
            digest: String::new(),
        };
        audit.seal();

        Ok((run.blend.normalized, audit))
    }

    /// The one synthesis routine both public variants delegate to
    fn run(&self, request: &ResonanceRequest) -> Result<SynthesisRun, SynthesisError> {
        let validated = self.validate(request)?;

        let mut contributions = Vec::with_capacity(validated.symbols.len());
        for resolved in &validated.symbols {
            let table = self.library.table(resolved.system);
            let record = table.get(&resolved.symbol).ok_or_else(|| {
                // Unreachable for a table that validated the symbol above
                SynthesisError::UnknownSymbol {
                    system: resolved.system,
                    symbol: resolved.symbol.clone(),
                }
            })?;
            contributions.push(SystemContribution {
                system: resolved.system,
                symbol: resolved.symbol.clone(),
                vector: record.dimensions,
                confidence: record.confidence(),
            });
        }

        let vectors: Vec<DimensionVector> = contributions.iter().map(|c| c.vector).collect();
        let blend = blend(&vectors);

        if blend.fallback_used {
            self.sink
                .event("zero norm VME vector, using default normalization");
        }
        self.sink.event(&format!(
            "VME calculated using systems: {:?}",
            validated
                .systems()
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
        ));

        Ok(SynthesisRun {
            validated,
            contributions,
            blend,
        })
    }
}

/// Equal-weight blend: component-wise mean, then scale to unit length.
/// An empty input blends a single neutral vector; a zero-norm mean falls
/// back to the fixed unit vector.
fn blend(vectors: &[DimensionVector]) -> BlendOutcome {
    let raw_mean = if vectors.is_empty() {
        DimensionVector::neutral()
    } else {
        DimensionVector::mean(vectors)
    };
    let (normalized, fallback_used) = raw_mean.normalized();
    BlendOutcome {
        raw_mean,
        normalized,
        fallback_used,
    }
}

// =============================================================================
// TESTS
// =============================================================================
