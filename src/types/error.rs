//! Error taxonomy
//!
//! Three families, mirroring who got it wrong:
//! - `SynthesisError`: the caller's symbolic data or request shape is wrong
//! - `ConfigError`: the caller's scoring configuration is degenerate
//! - `LoadError`: a symbol store is absent or structurally invalid
//!
//! Every failure is deterministic for the same input; there is no retry path.

use crate::types::SymbolicSystem;
use thiserror::Error;

/// Request validation failures raised by the vector synthesizer
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The request argument is not a string-keyed mapping at all
    #[error("request must be a mapping of system identifier to symbol name")]
    RequestNotAMap,

    /// A request value is neither a string nor a number
    #[error("invalid type for '{key}': must be string or number")]
    InvalidValueType { key: String },

    /// A symbol name exceeds the accepted length
    #[error("input too long for '{key}': max {max} characters")]
    SymbolTooLong { key: String, max: usize },

    /// A named symbol is absent from its system's table
    #[error("unknown {system} symbol: '{symbol}'")]
    UnknownSymbol {
        system: SymbolicSystem,
        symbol: String,
    },

    /// A resolved record's stored dimensions are missing or out of range
    #[error("malformed {system} record for '{symbol}': {detail}")]
    MalformedRecord {
        system: SymbolicSystem,
        symbol: String,
        detail: String,
    },
}

/// Scoring configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Context weights with zero Euclidean norm cannot be projected onto
    #[error("context weights normalization factor is zero")]
    ZeroWeightNorm,
}

/// Any failure surfaced by the end-to-end pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Symbol store load failures; all fail fast at startup
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{system} store not found: {path}")]
    Missing { system: SymbolicSystem, path: String },

    #[error("failed to read {system} store {path}: {source}")]
    Io {
        system: SymbolicSystem,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {system} store {path}: {source}")]
    Parse {
        system: SymbolicSystem,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record failed structural validation
    #[error("malformed {system} record for '{symbol}': {detail}")]
    MalformedRecord {
        system: SymbolicSystem,
        symbol: String,
        detail: String,
    },
}
