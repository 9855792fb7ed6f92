//! Core engines for RSM-0

pub mod diag;
pub mod pipeline;
pub mod resonance;
pub mod sentinel;
pub mod synth;

pub use diag::{DiagnosticSink, MemorySink, NullSink, StderrSink};
pub use pipeline::RsmPipeline;
pub use resonance::{conflict_penalty, resonance_index, ContextWeights};
pub use sentinel::TrajectorySentinel;
pub use synth::VectorSynthesizer;
