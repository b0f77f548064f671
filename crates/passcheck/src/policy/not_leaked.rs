//! Leaked/common password check backed by a Bloom filter
//!
//! The assertion can only confirm that a password is *definitely not* in the
//! word list, or that it *probably is* (to the configured false positive
//! probability). A false positive rejects a password that was never leaked;
//! a leaked password is never accepted.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::result::AssertionResult;
use crate::adapters::source_for;
use crate::domain::{BloomFilter, PassCheckConfig};
use crate::error::{ConfigError, PolicyError};
use crate::ingest::{fold_case, IngestReport, Ingested, WordListIngestor};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::WordListSource;

/// Fails when a password is found in the leaked/common password list
#[derive(Clone)]
pub struct NotLeakedAssertion {
    filter: BloomFilter,
    config: PassCheckConfig,
    report: IngestReport,
    recorder: Arc<dyn MetricsRecorder>,
}

impl NotLeakedAssertion {
    /// Validate `config` and build the filter from its configured source
    ///
    /// Uses `config.password_data_file` when set, the bundled list otherwise.
    pub fn build(config: PassCheckConfig) -> Result<Self, PolicyError> {
        Self::load(config, Arc::new(NoOpMetrics))
    }

    /// Like [`build`](Self::build), reporting to `recorder`
    pub fn load(
        config: PassCheckConfig,
        recorder: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, PolicyError> {
        config.validate()?;
        let source = source_for(&config);
        Self::from_source_observed(config, source.as_ref(), recorder)
    }

    /// Build the filter from an explicit word-list source
    ///
    /// `config.password_data_file` is kept for reporting but not opened.
    pub fn from_source(
        config: PassCheckConfig,
        source: &dyn WordListSource,
    ) -> Result<Self, PolicyError> {
        Self::from_source_observed(config, source, Arc::new(NoOpMetrics))
    }

    fn from_source_observed(
        config: PassCheckConfig,
        source: &dyn WordListSource,
        recorder: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, PolicyError> {
        config.validate()?;
        let ingested = WordListIngestor::new(&config)
            .with_recorder(recorder.clone())
            .ingest(source)?;
        Ok(Self::assemble(config, ingested, recorder))
    }

    /// Wrap a filter the caller already ingested
    ///
    /// Pairs with [`WordListIngestor::ingest_counted`] when the number of
    /// entries is known up front. The caller is trusted to have used an
    /// ingestor built from the same `config`, so that case folding matches.
    ///
    /// # Errors
    /// `ConfigError::ProbabilityMismatch` if the filter was sized for a
    /// different false positive probability than `config` names.
    pub fn from_ingested(config: PassCheckConfig, ingested: Ingested) -> Result<Self, PolicyError> {
        config.validate()?;
        let filter_probability = ingested.filter.false_positive_probability();
        if filter_probability != config.false_positive_probability {
            return Err(ConfigError::ProbabilityMismatch {
                configured: config.false_positive_probability,
                filter: filter_probability,
            }
            .into());
        }
        Ok(Self::assemble(config, ingested, Arc::new(NoOpMetrics)))
    }

    fn assemble(
        config: PassCheckConfig,
        ingested: Ingested,
        recorder: Arc<dyn MetricsRecorder>,
    ) -> Self {
        info!(
            source = %ingested.report.source,
            passwords = ingested.report.inserted,
            ignore_case = config.ignore_case,
            "Leaked password assertion ready"
        );
        Self {
            filter: ingested.filter,
            config,
            report: ingested.report,
            recorder,
        }
    }

    /// Number of passwords actually stored in the filter
    pub fn num_passwords(&self) -> u64 {
        self.report.inserted
    }

    pub fn false_positive_probability(&self) -> f64 {
        self.config.false_positive_probability
    }

    /// Configured cap on passwords in the filter, `None` when disabled
    pub fn max_num_passwords(&self) -> Option<u64> {
        self.config.max_items
    }

    pub fn ignore_case(&self) -> bool {
        self.config.ignore_case
    }

    /// Custom data file the filter was built from, if any
    pub fn password_data_file(&self) -> Option<&Path> {
        self.config.password_data_file.as_deref()
    }

    pub fn config(&self) -> &PassCheckConfig {
        &self.config
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    /// Whether the password is (probably) in the word list
    pub fn is_common(&self, password: &str) -> bool {
        let folded = fold_case(password, self.config.ignore_case);
        let found = self.filter.contains(&folded);
        self.recorder.record_lookup(found);
        found
    }

    /// Check that the password is not in the word list
    pub fn verify(&self, password: Option<&str>) -> AssertionResult {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            debug!("Leaked password assertion failed - password is null or empty");
            return AssertionResult::NULL_VALUE;
        };

        if self.is_common(password) {
            debug!("Leaked password assertion failed - found in filter");
            return AssertionResult::LEAKED_PASSWORD;
        }
        AssertionResult::SUCCESS
    }
}

impl fmt::Debug for NotLeakedAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotLeakedAssertion")
            .field("config", &self.config)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}
