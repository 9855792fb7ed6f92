//! Symbolic systems and their read-only symbol tables
//!
//! Each of the three systems is backed by a JSON store mapping symbol name to
//! a record with a `dimensions` map plus optional metadata. Stores are loaded
//! once at startup, validated fail-fast, and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{DimensionVector, LoadError, DIMENSIONS};
use crate::DEFAULT_CONFIDENCE;

/// Store file names, fixed per system
pub const TAROT_STORE: &str = "tarot_meanings.json";
pub const SAJU_STORE: &str = "saju_elements.json";
pub const ASTROLOGY_STORE: &str = "astrology_mappings.json";

/// The three fixed symbolic systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolicSystem {
    Tarot,
    Saju,
    Astrology,
}

impl SymbolicSystem {
    pub const ALL: [SymbolicSystem; 3] = [
        SymbolicSystem::Tarot,
        SymbolicSystem::Saju,
        SymbolicSystem::Astrology,
    ];

    /// Request key for this system
    pub fn key(&self) -> &'static str {
        match self {
            SymbolicSystem::Tarot => "tarot",
            SymbolicSystem::Saju => "saju",
            SymbolicSystem::Astrology => "astrology",
        }
    }

    /// Parse a request key; unknown keys belong to no system
    pub fn from_key(key: &str) -> Option<SymbolicSystem> {
        match key {
            "tarot" => Some(SymbolicSystem::Tarot),
            "saju" => Some(SymbolicSystem::Saju),
            "astrology" => Some(SymbolicSystem::Astrology),
            _ => None,
        }
    }

    /// Store file name for this system
    pub fn store_name(&self) -> &'static str {
        match self {
            SymbolicSystem::Tarot => TAROT_STORE,
            SymbolicSystem::Saju => SAJU_STORE,
            SymbolicSystem::Astrology => ASTROLOGY_STORE,
        }
    }
}

impl std::fmt::Display for SymbolicSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Optional per-record metadata carried by the stores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One symbol's record: a raw dimension vector plus optional metadata.
/// Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub dimensions: DimensionVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SymbolMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

impl SymbolRecord {
    /// Bare record with only a dimension vector
    pub fn new(dimensions: DimensionVector) -> Self {
        Self {
            dimensions,
            metadata: None,
            confidence_level: None,
        }
    }

    /// Confidence for this record. Metadata wins over the top-level field;
    /// absent both, defaults to 0.5.
    pub fn confidence(&self) -> f64 {
        self.metadata
            .as_ref()
            .and_then(|m| m.confidence_level)
            .or(self.confidence_level)
            .unwrap_or(DEFAULT_CONFIDENCE)
    }
}

/// On-disk record shape, before structural validation
#[derive(Debug, Deserialize)]
struct RawRecord {
    dimensions: Option<HashMap<String, f64>>,
    #[serde(default)]
    metadata: Option<SymbolMetadata>,
    #[serde(default)]
    confidence_level: Option<f64>,
}

/// Read-only table of symbol records for one system
#[derive(Debug, Clone)]
pub struct SymbolTable {
    system: SymbolicSystem,
    records: HashMap<String, SymbolRecord>,
}

impl SymbolTable {
    /// Build a table from already-typed records (used by tests and embedders)
    pub fn from_records(
        system: SymbolicSystem,
        records: HashMap<String, SymbolRecord>,
    ) -> Result<Self, LoadError> {
        for (name, record) in &records {
            if !record.dimensions.in_unit_range() {
                return Err(LoadError::MalformedRecord {
                    system,
                    symbol: name.clone(),
                    detail: format!("dimension value out of [0,1]: {}", record.dimensions),
                });
            }
        }
        Ok(Self { system, records })
    }

    /// Load and validate a JSON store. Fails fast on a missing file, bad
    /// JSON, or any record missing a required dimension or holding an
    /// out-of-range value.
    pub fn load(system: SymbolicSystem, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(LoadError::Missing {
                system,
                path: display,
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            system,
            path: display.clone(),
            source,
        })?;

        let raw: HashMap<String, RawRecord> =
            serde_json::from_str(&text).map_err(|source| LoadError::Parse {
                system,
                path: display,
                source,
            })?;

        let mut records = HashMap::with_capacity(raw.len());
        for (name, record) in raw {
            let dims = record.dimensions.ok_or_else(|| LoadError::MalformedRecord {
                system,
                symbol: name.clone(),
                detail: "missing 'dimensions' key".to_string(),
            })?;

            let mut values = [0.0; 3];
            for (i, dim) in DIMENSIONS.iter().enumerate() {
                let value = *dims.get(*dim).ok_or_else(|| LoadError::MalformedRecord {
                    system,
                    symbol: name.clone(),
                    detail: format!("missing dimension '{}'", dim),
                })?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(LoadError::MalformedRecord {
                        system,
                        symbol: name.clone(),
                        detail: format!("{} = {} out of [0,1]", dim, value),
                    });
                }
                values[i] = value;
            }

            records.insert(
                name,
                SymbolRecord {
                    dimensions: DimensionVector::from_array(values),
                    metadata: record.metadata,
                    confidence_level: record.confidence_level,
                },
            );
        }

        Ok(Self { system, records })
    }

    pub fn system(&self) -> SymbolicSystem {
        self.system
    }

    /// Exact-name lookup (no normalization)
    pub fn get(&self, name: &str) -> Option<&SymbolRecord> {
        self.records.get(name)
    }

    /// Lookup with normalization: trim whitespace, title-case words
    pub fn resolve(&self, name: &str) -> Option<(String, &SymbolRecord)> {
        let normalized = normalize_symbol(name);
        self.records.get(&normalized).map(|r| (normalized, r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Symbol names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

/// Normalize a symbol name for lookup: trim, then title-case each word
pub fn normalize_symbol(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// All three symbol tables, loaded once per process
#[derive(Debug, Clone)]
pub struct SymbolLibrary {
    tarot: SymbolTable,
    saju: SymbolTable,
    astrology: SymbolTable,
}

/// Per-system record counts, for startup reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub tarot_cards: usize,
    pub saju_pillars: usize,
    pub astrology_signs: usize,
    pub version: String,
}

impl SymbolLibrary {
    pub fn new(tarot: SymbolTable, saju: SymbolTable, astrology: SymbolTable) -> Self {
        Self {
            tarot,
            saju,
            astrology,
        }
    }

    /// Load all three stores from a directory by their fixed file names
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = data_dir.as_ref();
        Ok(Self {
            tarot: SymbolTable::load(SymbolicSystem::Tarot, dir.join(TAROT_STORE))?,
            saju: SymbolTable::load(SymbolicSystem::Saju, dir.join(SAJU_STORE))?,
            astrology: SymbolTable::load(SymbolicSystem::Astrology, dir.join(ASTROLOGY_STORE))?,
        })
    }

    pub fn table(&self, system: SymbolicSystem) -> &SymbolTable {
        match system {
            SymbolicSystem::Tarot => &self.tarot,
            SymbolicSystem::Saju => &self.saju,
            SymbolicSystem::Astrology => &self.astrology,
        }
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            tarot_cards: self.tarot.len(),
            saju_pillars: self.saju.len(),
            astrology_signs: self.astrology.len(),
            version: crate::VERSION.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
