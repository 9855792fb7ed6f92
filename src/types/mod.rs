//! Core types for RSM-0

mod alert;
mod audit;
mod error;
mod report;
mod request;
mod sample;
mod symbol;
mod vector;

pub use alert::AlertLevel;
pub use audit::{SynthesisAudit, SystemContribution};
pub use error::{ConfigError, LoadError, PipelineError, SynthesisError};
pub use report::{MonitoringReport, Reading, ThresholdConfig};
pub use request::{ResolvedSymbol, ResonanceRequest, ValidatedRequest};
pub use sample::{MonitoringSample, MonitoringWindow, Stability, TrajectoryAnalysis, Trend};
pub use symbol::{
    normalize_symbol, SymbolLibrary, SymbolMetadata, SymbolRecord, SymbolTable, SymbolicSystem,
    SystemInfo, ASTROLOGY_STORE, SAJU_STORE, TAROT_STORE,
};
pub use vector::{DimensionVector, DIMENSIONS};
