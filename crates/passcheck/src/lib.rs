//! # PassCheck
//!
//! Password policy checks, with a Bloom filter standing in for a large
//! leaked/common password list.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BitArray` / `BitStore`: Fixed-size bit storage and its contract
//!   - `BloomFilter`: Core probabilistic data structure
//!   - `BloomFilterParams`: Optimal sizing from capacity and target FPP
//!   - `PassCheckConfig`: Word-list filter configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `WordListSource`: Where word-list lines come from
//!   - `BitStore`: Where filter bits live
//!
//! - **Adapters Layer** (`adapters/`): `WordListSource` implementations
//!   - `FileWordList`, `BundledWordList`, `InMemoryWordList`
//!
//! - **Ingestion Layer** (`ingest/`): Word list to filter
//!   - `WordListIngestor`: Two-pass and counted single-pass protocols
//!
//! - **Policy Layer** (`policy/`): Assertions and their composition
//!   - `LengthAssertion`, `NotLeakedAssertion`
//!   - `PolicyAssertion`: Closed set of assertion kinds
//!   - `PasswordPolicy`: Evaluates every assertion, reports every violation
//!
//! ## Invariants
//!
//! - **No false negatives**: a password inserted into the filter always
//!   tests positive
//! - **Bounded false positives**: FPR = (1 - e^(-kn/m))^k <= target FPP once
//!   the filter holds `n` elements
//! - Case folding is applied identically on insert and on query
//! - Ingestion fails instead of building an under-sized filter when the
//!   source changes between passes
//!
//! ## Usage Example
//!
//! ```
//! use passcheck::{
//!     AssertionResult, InMemoryWordList, LengthAssertion, NotLeakedAssertion,
//!     PassCheckConfig, PasswordPolicy,
//! };
//!
//! let length = LengthAssertion::new(Some(8), None)?;
//! let not_leaked = NotLeakedAssertion::from_source(
//!     PassCheckConfig::default(),
//!     &InMemoryWordList::new(["password", "dog", "cat"]),
//! )?;
//! let policy = PasswordPolicy::new(vec![length.into(), not_leaked.into()]);
//!
//! let violations = policy.evaluate(Some("password")).violations();
//! assert_eq!(violations.len(), 1);
//! assert!(violations
//!     .iter()
//!     .all(|outcome| outcome.result == AssertionResult::LEAKED_PASSWORD));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod policy;
pub mod ports;

// Re-exports for convenience
pub use adapters::{source_for, BundledWordList, FileWordList, InMemoryWordList};
pub use domain::{
    BitArray, BitStore, BloomFilter, BloomFilterParams, PassCheckConfig, DEFAULT_FP_PROBABILITY,
};
pub use error::{ConfigError, FilterError, IngestError, PolicyError, SourceError};
pub use ingest::{IngestReport, Ingested, WordListIngestor};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use policy::{
    AssertionId, AssertionOutcome, AssertionResult, LengthAssertion, NotLeakedAssertion,
    PasswordPolicy, PolicyAssertion, PolicyEvaluation,
};
pub use ports::{LineIter, WordListSource};
