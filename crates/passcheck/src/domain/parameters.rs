//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2)), at least 1  -- optimal bits
//! - k = max(1, round((m/n) * ln(2)))             -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k                      -- estimated false positive rate

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Bloom filter sizing parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions per item (k)
    pub hash_count: u32,
    /// Number of elements the filter was sized for (n)
    pub expected_elements: u64,
    /// Target false positive probability (p)
    pub false_positive_probability: f64,
}

impl BloomFilterParams {
    /// Calculate optimal parameters for `expected_elements` items at rate `p`
    ///
    /// Fails if `expected_elements == 0` or if `p` is not strictly between 0 and 1.
    pub fn optimal(expected_elements: u64, p: f64) -> Result<Self, FilterError> {
        validate_probability(p)?;
        if expected_elements == 0 {
            return Err(FilterError::ZeroExpectedElements);
        }

        let n = expected_elements as f64;
        let size_bits = ((-(n * p.ln()) / (LN_2 * LN_2)).ceil() as usize).max(1);
        let hash_count = ((size_bits as f64 / n) * LN_2).round().max(1.0) as u32;

        Ok(Self {
            size_bits,
            hash_count,
            expected_elements,
            false_positive_probability: p,
        })
    }

    /// Estimated false positive rate once the filter holds `expected_elements`
    pub fn expected_fpr(&self) -> f64 {
        estimated_fpp(self.size_bits, self.expected_elements, self.hash_count)
    }
}

/// Check that a probability lies in the open interval (0, 1)
///
/// NaN is rejected as well.
pub fn validate_probability(p: f64) -> Result<(), FilterError> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidProbability { probability: p })
    }
}

/// Estimated false positive rate for m bits, n elements and k hashes
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn estimated_fpp(m: usize, n: u64, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
