//! End-to-end pipeline: request → synthesis → scoring → monitoring
//!
//! Thin driver around the three core components. Holds the one piece of
//! cross-call state in the system, the sentinel's trajectory window.

use chrono::Utc;

use crate::core::{resonance_index, ContextWeights, TrajectorySentinel, VectorSynthesizer};
use crate::types::{PipelineError, Reading, ResonanceRequest, SymbolLibrary, SystemInfo};
use crate::{SINGLE_SHOT_DI2, VERSION};

/// The complete RSM pipeline
#[derive(Debug)]
pub struct RsmPipeline {
    synthesizer: VectorSynthesizer,
    sentinel: TrajectorySentinel,
}

impl RsmPipeline {
    /// Pipeline over a loaded symbol library, with default thresholds
    pub fn new(library: SymbolLibrary) -> Self {
        Self {
            synthesizer: VectorSynthesizer::new(library),
            sentinel: TrajectorySentinel::new(),
        }
    }

    pub fn with_parts(synthesizer: VectorSynthesizer, sentinel: TrajectorySentinel) -> Self {
        Self {
            synthesizer,
            sentinel,
        }
    }

    /// One-shot evaluation with the minimal single-shot drift constant
    pub fn process(&mut self, request: &ResonanceRequest) -> Result<Reading, PipelineError> {
        self.run(request, SINGLE_SHOT_DI2, false)
    }

    /// Evaluation with a caller-supplied drift magnitude
    pub fn process_with_drift(
        &mut self,
        request: &ResonanceRequest,
        di2: f64,
    ) -> Result<Reading, PipelineError> {
        self.run(request, di2, false)
    }

    /// One-shot evaluation with the synthesis audit trail attached
    pub fn process_audited(&mut self, request: &ResonanceRequest) -> Result<Reading, PipelineError> {
        self.run(request, SINGLE_SHOT_DI2, true)
    }

    fn run(
        &mut self,
        request: &ResonanceRequest,
        di2: f64,
        with_audit: bool,
    ) -> Result<Reading, PipelineError> {
        let (vme, audit) = if with_audit {
            let (vme, audit) = self.synthesizer.synthesize_with_audit(request)?;
            (vme, Some(audit))
        } else {
            (self.synthesizer.synthesize(request)?, None)
        };

        let ri = resonance_index(&vme, Some(&ContextWeights::default()), 1.0)?;
        let drift = self.sentinel.observe(di2, ri, None);

        Ok(Reading {
            timestamp: Utc::now(),
            input: request.clone(),
            vme,
            resonance_index: ri,
            di2,
            alert: drift.sample.alert,
            drift,
            version: VERSION.to_string(),
            audit,
        })
    }

    pub fn synthesizer(&self) -> &VectorSynthesizer {
        &self.synthesizer
    }

    pub fn sentinel(&self) -> &TrajectorySentinel {
        &self.sentinel
    }

    pub fn system_info(&self) -> SystemInfo {
        self.synthesizer.system_info()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AlertLevel, DimensionVector, SymbolRecord, SymbolTable, SymbolicSystem,
    };
    use std::collections::HashMap;

    fn library() -> SymbolLibrary {
        let mut tarot = HashMap::new();
        tarot.insert(
            "Death".to_string(),
            SymbolRecord::new(DimensionVector::new(0.8, 0.9, 0.95)),
        );
        let mut saju = HashMap::new();
        saju.insert(
            "Fire Yang".to_string(),
            SymbolRecord::new(DimensionVector::new(0.7, 0.5, 0.6)),
        );
        let mut astrology = HashMap::new();
        astrology.insert(
            "Scorpio".to_string(),
            SymbolRecord::new(DimensionVector::new(0.6, 0.8, 0.9)),
        );
        SymbolLibrary::new(
            SymbolTable::from_records(SymbolicSystem::Tarot, tarot).unwrap(),
            SymbolTable::from_records(SymbolicSystem::Saju, saju).unwrap(),
            SymbolTable::from_records(SymbolicSystem::Astrology, astrology).unwrap(),
        )
    }

    #[test]
    fn test_reading_shape() {
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new().with_symbol(SymbolicSystem::Tarot, "Death");
        let reading = pipeline.process(&request).unwrap();

        assert!((reading.vme.norm() - 1.0).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&reading.resonance_index));
        assert_eq!(reading.di2, SINGLE_SHOT_DI2);
        assert_eq!(reading.version, VERSION);
        assert!(reading.audit.is_none());
    }

    #[test]
    fn test_single_shot_is_not_critical_on_drift() {
        // The 0.01 single-shot drift never trips the drift thresholds; any
        // elevated alert must come from resonance
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new().with_symbol(SymbolicSystem::Saju, "Fire Yang");
        let reading = pipeline.process(&request).unwrap();
        if reading.resonance_index > 0.4 {
            assert_eq!(reading.alert, AlertLevel::Stable);
        }
    }

    #[test]
    fn test_audited_reading_carries_trail() {
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new()
            .with_symbol(SymbolicSystem::Tarot, "Death")
            .with_symbol(SymbolicSystem::Astrology, "Scorpio");
        let reading = pipeline.process_audited(&request).unwrap();

        let audit = reading.audit.expect("audit trail expected");
        assert_eq!(audit.contributions.len(), 2);
        assert_eq!(audit.normalized, reading.vme);
    }

    #[test]
    fn test_sentinel_window_grows_across_calls() {
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new().with_symbol(SymbolicSystem::Tarot, "Death");
        for _ in 0..3 {
            pipeline.process(&request).unwrap();
        }
        assert_eq!(pipeline.sentinel().window().len(), 3);
    }

    #[test]
    fn test_high_drift_goes_critical() {
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new().with_symbol(SymbolicSystem::Tarot, "Death");
        let reading = pipeline.process_with_drift(&request, 0.35).unwrap();
        assert_eq!(reading.alert, AlertLevel::Critical);
    }

    #[test]
    fn test_reading_serializes() {
        let mut pipeline = RsmPipeline::new(library());
        let request = ResonanceRequest::new().with_symbol(SymbolicSystem::Tarot, "Death");
        let reading = pipeline.process_audited(&request).unwrap();

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"resonance_index\""));
        assert!(json.contains("\"alert\""));
        assert!(json.contains("\"audit\""));

        let _: Reading = serde_json::from_str(&json).unwrap();
    }
}
