//! Resonance request: the caller's symbolic input
//!
//! A flat mapping of system key to symbol name, at most one symbol per
//! system, possibly empty. Built per call and consumed immediately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{SymbolicSystem, SynthesisError};

/// Raw request as supplied by the caller, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResonanceRequest {
    entries: BTreeMap<String, String>,
}

impl ResonanceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for one system's symbol
    pub fn with_symbol(mut self, system: SymbolicSystem, symbol: impl Into<String>) -> Self {
        self.entries.insert(system.key().to_string(), symbol.into());
        self
    }

    /// Insert an arbitrary key. Unknown keys survive until validation, where
    /// they are reported and skipped.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Parse a request out of arbitrary JSON. The value must be an object;
    /// entry values must be strings or numbers (numbers are stringified).
    pub fn from_json(value: &Value) -> Result<Self, SynthesisError> {
        let map = value.as_object().ok_or(SynthesisError::RequestNotAMap)?;

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(SynthesisError::InvalidValueType { key: key.clone() });
                }
            };
            entries.insert(key.clone(), text);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One symbol resolved against its system's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    pub system: SymbolicSystem,
    /// Normalized symbol name as stored in the table
    pub symbol: String,
}

/// Outcome of the single typed validation pass over a raw request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatedRequest {
    /// Resolved symbols in canonical system order (tarot, saju, astrology)
    pub symbols: Vec<ResolvedSymbol>,
    /// Request keys that name no known system; reported, then skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
}

impl ValidatedRequest {
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Systems that contributed, in canonical order
    pub fn systems(&self) -> Vec<SymbolicSystem> {
        self.symbols.iter().map(|s| s.system).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
