//! Word-list ingestion into a Bloom filter
//!
//! Two protocols are offered:
//!
//! - [`WordListIngestor::ingest`] reads the source twice. Pass 1 counts the
//!   entries that survive the length filter (capped by `max_items`) and sizes
//!   the filter from that count; pass 2 inserts. A source that grows between
//!   passes is detected by the insert count, and any change to a fully-read
//!   source is detected by comparing SHA-256 digests of both passes.
//! - [`WordListIngestor::ingest_counted`] reads the source once when the
//!   caller already knows how many entries to expect.

use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use super::entry::{fold_case, parse_line, WordListEntry};
use crate::domain::{BitArray, BitStore, BloomFilter, BloomFilterParams, PassCheckConfig};
use crate::error::{FilterError, IngestError, SourceError};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::WordListSource;

/// Result of pass 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligibleCount {
    /// Entries within the length bounds, capped by `max_items`
    pub count: u64,
    /// Hex SHA-256 of every line read
    pub digest: String,
}

/// Accounting for one ingestion run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngestReport {
    pub source: String,
    pub expected_elements: u64,
    pub entries_read: u64,
    pub skipped_length: u64,
    pub duplicates: u64,
    pub inserted: u64,
    /// Ingestion stopped early at `max_items`
    pub capped: bool,
    pub size_bits: usize,
    pub hash_count: u32,
    /// Digest of the source, when the two-pass protocol was used
    pub digest: Option<String>,
}

/// A populated filter together with its ingestion report
#[derive(Clone, Debug)]
pub struct Ingested<S: BitStore = BitArray> {
    pub filter: BloomFilter<S>,
    pub report: IngestReport,
}

/// Builds Bloom filters from word lists under length, case and count rules
#[derive(Clone)]
pub struct WordListIngestor {
    false_positive_probability: f64,
    min_length: Option<usize>,
    max_length: Option<usize>,
    max_items: Option<u64>,
    ignore_case: bool,
    recorder: Arc<dyn MetricsRecorder>,
}

impl WordListIngestor {
    /// Create an ingestor from the filter configuration
    pub fn new(config: &PassCheckConfig) -> Self {
        Self {
            false_positive_probability: config.false_positive_probability,
            min_length: config.min_length,
            max_length: config.max_length,
            max_items: config.max_items,
            ignore_case: config.ignore_case,
            recorder: Arc::new(NoOpMetrics),
        }
    }

    /// Report ingestion progress to `recorder`
    pub fn with_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Whether an entry passes the length filter
    pub fn accepts(&self, entry: &WordListEntry) -> bool {
        let length = entry.length();
        self.min_length.map_or(true, |min| length >= min)
            && self.max_length.map_or(true, |max| length <= max)
    }

    /// Pass 1: count eligible entries and digest the source
    pub fn count_eligible(
        &self,
        source: &dyn WordListSource,
    ) -> Result<EligibleCount, IngestError> {
        let name = source.describe();
        let mut hasher = Sha256::new();
        let mut count = 0u64;

        for line in source.open()? {
            let line = line.map_err(|e| SourceError::io(&name, e))?;
            digest_line(&mut hasher, &line);
            if parse_line(&line).is_some_and(|entry| self.accepts(&entry)) {
                count += 1;
            }
        }

        let count = self.max_items.map_or(count, |max| count.min(max));
        Ok(EligibleCount {
            count,
            digest: hex::encode(hasher.finalize()),
        })
    }

    /// Build a filter from `source` with the two-pass protocol
    pub fn ingest(&self, source: &dyn WordListSource) -> Result<Ingested, IngestError> {
        self.ingest_with(source, |params| BitArray::new(params.size_bits))
    }

    /// Two-pass protocol over a caller-provided bit store
    ///
    /// `alloc` receives the computed sizing and must return a clear store of
    /// exactly `params.size_bits` bits.
    pub fn ingest_with<S, F>(
        &self,
        source: &dyn WordListSource,
        alloc: F,
    ) -> Result<Ingested<S>, IngestError>
    where
        S: BitStore,
        F: FnOnce(&BloomFilterParams) -> Result<S, FilterError>,
    {
        let name = source.describe();
        info!(source = %name, "Processing password data");

        let first = self.count_eligible(source)?;
        let mut filter = self.new_filter(&name, first.count, alloc)?;
        let mut report = self.new_report(&name, &filter);

        let mut hasher = Sha256::new();
        let mut complete = true;
        for line in source.open()? {
            let line = line.map_err(|e| SourceError::io(&name, e))?;
            digest_line(&mut hasher, &line);
            let Some(entry) = parse_line(&line) else {
                continue;
            };
            if self.accepts(&entry) && self.limit_reached(&report) {
                report.capped = true;
                complete = false;
                break;
            }
            self.insert(&mut filter, &entry, &mut report)?;
        }

        if complete {
            let second = hex::encode(hasher.finalize());
            if second != first.digest {
                error!(source = %name, "Password data changed between ingestion passes");
                return Err(IngestError::SourceChanged {
                    name,
                    first: first.digest,
                    second,
                });
            }
        }

        report.digest = Some(first.digest);
        self.finish(&report);
        Ok(Ingested { filter, report })
    }

    /// Build a filter from `source` in a single pass
    ///
    /// `expected` is the number of eligible entries the caller knows the
    /// source holds. Inserting more than that fails with
    /// `IngestError::Inconsistent`.
    pub fn ingest_counted(
        &self,
        source: &dyn WordListSource,
        expected: u64,
    ) -> Result<Ingested, IngestError> {
        let name = source.describe();
        info!(source = %name, expected, "Processing password data with a known count");

        let expected = self.max_items.map_or(expected, |max| expected.min(max));
        let mut filter =
            self.new_filter(&name, expected, |params| BitArray::new(params.size_bits))?;
        let mut report = self.new_report(&name, &filter);

        for line in source.open()? {
            let line = line.map_err(|e| SourceError::io(&name, e))?;
            let Some(entry) = parse_line(&line) else {
                continue;
            };
            if self.accepts(&entry) && self.limit_reached(&report) {
                report.capped = true;
                break;
            }
            self.insert(&mut filter, &entry, &mut report)?;
        }

        self.finish(&report);
        Ok(Ingested { filter, report })
    }

    /// Case folding applied on insert; queries must use the same rule
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    fn new_filter<S, F>(
        &self,
        name: &str,
        expected: u64,
        alloc: F,
    ) -> Result<BloomFilter<S>, IngestError>
    where
        S: BitStore,
        F: FnOnce(&BloomFilterParams) -> Result<S, FilterError>,
    {
        if expected == 0 {
            error!(source = %name, "No eligible passwords in word list");
            return Err(IngestError::EmptyWordList {
                name: name.to_string(),
            });
        }

        info!(
            false_positive_probability = self.false_positive_probability,
            expected_elements = expected,
            "Creating filter"
        );
        let params = BloomFilterParams::optimal(expected, self.false_positive_probability)?;
        let store = alloc(&params)?;
        let filter = BloomFilter::with_store(params, store)?;
        self.recorder
            .record_filter_built(filter.size_bits(), filter.hash_count(), expected);
        Ok(filter)
    }

    fn new_report<S: BitStore>(&self, name: &str, filter: &BloomFilter<S>) -> IngestReport {
        IngestReport {
            source: name.to_string(),
            expected_elements: filter.expected_elements(),
            entries_read: 0,
            skipped_length: 0,
            duplicates: 0,
            inserted: 0,
            capped: false,
            size_bits: filter.size_bits(),
            hash_count: filter.hash_count(),
            digest: None,
        }
    }

    fn limit_reached(&self, report: &IngestReport) -> bool {
        self.max_items.is_some_and(|max| report.inserted >= max)
    }

    fn insert<S: BitStore>(
        &self,
        filter: &mut BloomFilter<S>,
        entry: &WordListEntry,
        report: &mut IngestReport,
    ) -> Result<(), IngestError> {
        report.entries_read += 1;
        self.recorder.record_entry_read();

        if !self.accepts(entry) {
            debug!(length = entry.length(), "Skipping entry outside length bounds");
            report.skipped_length += 1;
            self.recorder.record_entry_skipped();
            return Ok(());
        }

        let password = fold_case(&entry.password, self.ignore_case);
        let new = filter.add(&password);
        self.recorder.record_insert(new);
        if new {
            report.inserted += 1;
        } else {
            report.duplicates += 1;
        }

        if report.inserted > report.expected_elements {
            error!(
                inserted = report.inserted,
                expected = report.expected_elements,
                "Inserted more passwords than counted"
            );
            return Err(IngestError::Inconsistent {
                inserted: report.inserted,
                expected: report.expected_elements,
            });
        }
        Ok(())
    }

    fn finish(&self, report: &IngestReport) {
        info!(
            source = %report.source,
            inserted = report.inserted,
            duplicates = report.duplicates,
            skipped = report.skipped_length,
            capped = report.capped,
            size_bits = report.size_bits,
            hash_count = report.hash_count,
            "Password data loaded"
        );
    }
}

fn digest_line(hasher: &mut Sha256, line: &str) {
    hasher.update(line.as_bytes());
    hasher.update(b"\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryWordList;
    use crate::metrics::Metrics;
    use crate::ports::LineIter;
    use std::cell::Cell;

    fn config() -> PassCheckConfig {
        PassCheckConfig::default()
    }

    /// Source that returns more lines on every open
    struct GrowingSource {
        opens: Cell<usize>,
    }

    impl WordListSource for GrowingSource {
        fn describe(&self) -> String {
            "growing".to_string()
        }

        fn open(&self) -> Result<LineIter<'_>, SourceError> {
            let opens = self.opens.get() + 1;
            self.opens.set(opens);
            let lines: Vec<String> = (0..opens * 5).map(|i| format!("entry-{}", i)).collect();
            Ok(Box::new(lines.into_iter().map(Ok)))
        }
    }

    /// Source whose contents change, but not its size, between opens
    struct MutatingSource {
        opens: Cell<usize>,
    }

    impl WordListSource for MutatingSource {
        fn describe(&self) -> String {
            "mutating".to_string()
        }

        fn open(&self) -> Result<LineIter<'_>, SourceError> {
            let opens = self.opens.get() + 1;
            self.opens.set(opens);
            let lines: Vec<String> = (0..5).map(|i| format!("v{}-{}", opens, i)).collect();
            Ok(Box::new(lines.into_iter().map(Ok)))
        }
    }

    struct FailingSource;

    impl WordListSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn open(&self) -> Result<LineIter<'_>, SourceError> {
            let lines = vec![
                Ok("first".to_string()),
                Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8")),
            ];
            Ok(Box::new(lines.into_iter()))
        }
    }

    #[test]
    fn test_ingest_inserts_every_entry() {
        let source = InMemoryWordList::new(["password", "dog", "cat"]);
        let ingested = WordListIngestor::new(&config()).ingest(&source).unwrap();

        assert_eq!(ingested.report.expected_elements, 3);
        assert_eq!(ingested.report.inserted, 3);
        assert_eq!(ingested.filter.elements_inserted(), 3);
        assert!(!ingested.report.capped);
        assert!(ingested.report.digest.is_some());
        for word in ["password", "dog", "cat"] {
            assert!(ingested.filter.contains(word), "{} must be present", word);
        }
    }

    #[test]
    fn test_length_filter_skips_entries() {
        let config = PassCheckConfig {
            min_length: Some(4),
            max_length: Some(8),
            ..Default::default()
        };
        let source = InMemoryWordList::new(["dog", "password", "passwords", "monkey"]);
        let ingestor = WordListIngestor::new(&config);

        assert_eq!(ingestor.count_eligible(&source).unwrap().count, 2);

        let ingested = ingestor.ingest(&source).unwrap();
        assert_eq!(ingested.report.expected_elements, 2);
        assert_eq!(ingested.report.skipped_length, 2);
        assert_eq!(ingested.report.inserted, 2);
        assert!(ingested.filter.contains("password"));
        assert!(ingested.filter.contains("monkey"));
    }

    #[test]
    fn test_declared_length_drives_filter() {
        let config = PassCheckConfig {
            min_length: Some(5),
            ..Default::default()
        };
        // "abc" declares length 10 and passes; "abcdefgh" declares 2 and is skipped
        let source = InMemoryWordList::new(["abc\t10", "abcdefgh\t2"]);
        let ingested = WordListIngestor::new(&config).ingest(&source).unwrap();

        assert_eq!(ingested.report.inserted, 1);
        assert!(ingested.filter.contains("abc"));
    }

    #[test]
    fn test_max_items_caps_ingestion() {
        let config = PassCheckConfig {
            max_items: Some(2),
            ..Default::default()
        };
        let source = InMemoryWordList::new(["password", "dog", "cat", "bird"]);
        let ingested = WordListIngestor::new(&config).ingest(&source).unwrap();

        assert_eq!(ingested.report.expected_elements, 2, "Sizing is capped too");
        assert_eq!(ingested.report.inserted, 2);
        assert!(ingested.report.capped);
        assert!(ingested.filter.contains("password"));
        assert!(ingested.filter.contains("dog"));
    }

    #[test]
    fn test_cap_ignores_trailing_ineligible_lines() {
        let config = PassCheckConfig {
            max_items: Some(2),
            min_length: Some(2),
            ..Default::default()
        };
        let source = InMemoryWordList::new(["a1", "b2", "", "x"]);
        let ingestor = WordListIngestor::new(&config);

        let ingested = ingestor.ingest(&source).unwrap();
        assert_eq!(ingested.report.inserted, 2);
        assert!(
            !ingested.report.capped,
            "Only blank or too-short lines follow the cap"
        );
        assert!(ingested.report.digest.is_some());

        let counted = ingestor.ingest_counted(&source, 2).unwrap();
        assert!(!counted.report.capped);
    }

    #[test]
    fn test_ignore_case_folds_entries() {
        let config = PassCheckConfig {
            ignore_case: true,
            ..Default::default()
        };
        let source = InMemoryWordList::new(["PassWord", "password"]);
        let ingested = WordListIngestor::new(&config).ingest(&source).unwrap();

        assert!(ingested.filter.contains("password"));
        assert_eq!(ingested.report.inserted, 1);
        assert_eq!(ingested.report.duplicates, 1);
    }

    #[test]
    fn test_growing_source_is_inconsistent() {
        let source = GrowingSource { opens: Cell::new(0) };
        let result = WordListIngestor::new(&config()).ingest(&source);

        assert!(
            matches!(result, Err(IngestError::Inconsistent { expected: 5, .. })),
            "A source that grows between passes must fail, got {:?}",
            result.map(|i| i.report)
        );
    }

    #[test]
    fn test_mutated_source_is_detected() {
        let source = MutatingSource { opens: Cell::new(0) };
        let result = WordListIngestor::new(&config()).ingest(&source);

        assert!(matches!(result, Err(IngestError::SourceChanged { .. })));
    }

    #[test]
    fn test_read_errors_propagate() {
        let result = WordListIngestor::new(&config()).ingest(&FailingSource);
        assert!(matches!(
            result,
            Err(IngestError::Source(SourceError::Io { .. }))
        ));
    }

    #[test]
    fn test_empty_word_list_is_rejected() {
        let source = InMemoryWordList::new(["", "\r"]);
        let result = WordListIngestor::new(&config()).ingest(&source);

        assert!(matches!(result, Err(IngestError::EmptyWordList { .. })));
    }

    #[test]
    fn test_ingest_counted_single_pass() {
        let source = InMemoryWordList::new(["password", "dog", "cat"]);
        let ingested = WordListIngestor::new(&config())
            .ingest_counted(&source, 3)
            .unwrap();

        assert_eq!(ingested.report.inserted, 3);
        assert_eq!(ingested.report.digest, None);
        assert!(ingested.filter.contains("cat"));
    }

    #[test]
    fn test_ingest_counted_rejects_undercount() {
        let source = InMemoryWordList::new(["password", "dog", "cat"]);
        let result = WordListIngestor::new(&config()).ingest_counted(&source, 2);

        assert!(matches!(
            result,
            Err(IngestError::Inconsistent {
                inserted: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_recorder_observes_ingestion() {
        let metrics = Arc::new(Metrics::new());
        let config = PassCheckConfig {
            min_length: Some(4),
            ..Default::default()
        };
        let source = InMemoryWordList::new(["password", "dog", "password"]);
        WordListIngestor::new(&config)
            .with_recorder(metrics.clone())
            .ingest(&source)
            .unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_built, 1);
        assert_eq!(snapshot.entries_read, 3);
        assert_eq!(snapshot.entries_skipped, 1);
        assert_eq!(snapshot.entries_inserted, 1);
        assert_eq!(snapshot.duplicate_entries, 1);
    }

    #[test]
    fn test_custom_store_allocation() {
        let source = InMemoryWordList::new(["password"]);
        let ingested = WordListIngestor::new(&config())
            .ingest_with(&source, |params| BitArray::new(params.size_bits))
            .unwrap();

        assert_eq!(ingested.filter.store().size(), ingested.report.size_bits);
    }
}
