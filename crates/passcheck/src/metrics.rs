//! Metrics hooks for ingestion and policy evaluation
//!
//! Accounting flows through an explicit [`MetricsRecorder`] handed to the
//! ingestor or the policy, instead of through global state.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use passcheck::{InMemoryWordList, Metrics, PassCheckConfig, WordListIngestor};
//!
//! let metrics = Arc::new(Metrics::new());
//! let ingestor = WordListIngestor::new(&PassCheckConfig::default())
//!     .with_recorder(metrics.clone());
//! ingestor.ingest(&InMemoryWordList::new(["password", "dog"])).unwrap();
//!
//! assert_eq!(metrics.snapshot().entries_inserted, 2);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward counts to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    /// A filter was sized and allocated
    fn record_filter_built(&self, size_bits: usize, hash_count: u32, expected_elements: u64);

    /// A word-list entry was read during the insert pass
    fn record_entry_read(&self);

    /// A word-list entry was skipped by the length filter
    fn record_entry_skipped(&self);

    /// An entry was added; `new` is false when every one of its bits was already set
    fn record_insert(&self, new: bool);

    /// A membership query ran; `found` includes false positives
    fn record_lookup(&self, found: bool);

    /// A password was evaluated against a whole policy
    fn record_evaluation(&self, violations: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_built(&self, _: usize, _: u32, _: u64) {}
    fn record_entry_read(&self) {}
    fn record_entry_skipped(&self) {}
    fn record_insert(&self, _: bool) {}
    fn record_lookup(&self, _: bool) {}
    fn record_evaluation(&self, _: usize) {}
}

/// Thread-safe counters for ingestion and evaluation
#[derive(Debug, Default)]
pub struct Metrics {
    pub filters_built: AtomicU64,
    pub bytes_allocated: AtomicU64,
    pub entries_read: AtomicU64,
    pub entries_skipped: AtomicU64,
    pub entries_inserted: AtomicU64,
    pub duplicate_entries: AtomicU64,
    pub lookups_performed: AtomicU64,
    pub lookups_positive: AtomicU64,
    pub evaluations: AtomicU64,
    pub violations: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_built: self.filters_built.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            entries_read: self.entries_read.load(Ordering::Relaxed),
            entries_skipped: self.entries_skipped.load(Ordering::Relaxed),
            entries_inserted: self.entries_inserted.load(Ordering::Relaxed),
            duplicate_entries: self.duplicate_entries.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
            violations: self.violations.load(Ordering::Relaxed),
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }
}

impl MetricsRecorder for Metrics {
    fn record_filter_built(&self, size_bits: usize, _hash_count: u32, _expected_elements: u64) {
        self.filters_built.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(size_bits.div_ceil(8) as u64, Ordering::Relaxed);
    }

    fn record_entry_read(&self) {
        self.entries_read.fetch_add(1, Ordering::Relaxed);
    }

    fn record_entry_skipped(&self) {
        self.entries_skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert(&self, new: bool) {
        if new {
            self.entries_inserted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.duplicate_entries.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_evaluation(&self, violations: usize) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.violations.fetch_add(violations as u64, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub filters_built: u64,
    pub bytes_allocated: u64,
    pub entries_read: u64,
    pub entries_skipped: u64,
    pub entries_inserted: u64,
    pub duplicate_entries: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub evaluations: u64,
    pub violations: u64,
}
