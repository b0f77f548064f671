//! Error types for the password checking subsystem

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while sizing or constructing a Bloom filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid false positive probability: {probability} (must be in (0, 1))")]
    InvalidProbability { probability: f64 },

    #[error("Expected element count must be greater than 0")]
    ZeroExpectedElements,

    #[error("Bit array size must be greater than 0")]
    EmptyBitArray,

    #[error("Bit store size mismatch: expected {expected} bits, store has {actual}")]
    StoreSizeMismatch { expected: usize, actual: usize },
}

/// Invalid configuration, rejected at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid false positive probability: {probability} (must be in (0, 1))")]
    InvalidProbability { probability: f64 },

    #[error("Maximum number of passwords must be greater than 0, or disabled")]
    InvalidMaxItems,

    #[error("Minimum length {min} exceeds maximum length {max}")]
    LengthBoundsInverted { min: usize, max: usize },

    #[error("A length assertion needs a minimum or a maximum length requirement")]
    NoLengthRequirement,

    #[error("Filter sized for false positive probability {filter}, expected {configured}")]
    ProbabilityMismatch { configured: f64, filter: f64 },
}

/// Errors from word-list sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Password data file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error reading {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while ingesting a word list into a filter
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Word list source error: {0}")]
    Source(#[from] SourceError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Added {inserted} passwords but expected {expected}. Did the data file change?")]
    Inconsistent { inserted: u64, expected: u64 },

    #[error("Word list {name} changed between passes (digest {first} != {second})")]
    SourceChanged {
        name: String,
        first: String,
        second: String,
    },

    #[error("Word list {name} has no entries within the configured length bounds")]
    EmptyWordList { name: String },
}

/// Umbrella error for building policy assertions
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingestion failed: {0}")]
    Ingest(#[from] IngestError),
}

impl From<SourceError> for PolicyError {
    fn from(err: SourceError) -> Self {
        PolicyError::Ingest(IngestError::Source(err))
    }
}

impl SourceError {
    pub(crate) fn io(name: impl Into<String>, source: io::Error) -> Self {
        SourceError::Io {
            name: name.into(),
            source,
        }
    }
}
