//! Core Bloom filter implementation
//!
//! Invariants:
//! - `size_bits` and `hash_count` are fixed at construction from the expected
//!   element count and the target false positive probability.
//! - No false negatives - if added, `contains()` MUST return true.
//! - The filter is append-only; there is no removal.

use super::bit_array::{BitArray, BitStore};
use super::hash_functions::bit_positions;
use super::parameters::{estimated_fpp, BloomFilterParams};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing of strings
///
/// False positives are possible at a rate bounded by the configured
/// probability once the filter holds its expected number of elements.
/// False negatives are not.
///
/// The bit storage is any [`BitStore`]; the default is the local [`BitArray`].
#[derive(Clone, Debug)]
pub struct BloomFilter<S: BitStore = BitArray> {
    /// Bit storage (m bits)
    bits: S,
    /// Sizing parameters the filter was built with
    params: BloomFilterParams,
    /// Number of add() calls that set at least one new bit
    inserted: u64,
}

impl BloomFilter<BitArray> {
    /// Build an empty filter sized for `expected_elements` items at rate `p`
    ///
    /// # Errors
    /// `FilterError::InvalidProbability` if `p` is not in (0, 1),
    /// `FilterError::ZeroExpectedElements` if `expected_elements == 0`.
    pub fn build(expected_elements: u64, p: f64) -> Result<Self, FilterError> {
        let params = BloomFilterParams::optimal(expected_elements, p)?;
        let bits = BitArray::new(params.size_bits)?;
        Ok(Self {
            bits,
            params,
            inserted: 0,
        })
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Bytes used by the local bit array
    pub fn storage_bytes(&self) -> usize {
        self.bits.storage_bytes()
    }
}

impl<S: BitStore> BloomFilter<S> {
    /// Build a filter over an externally provided bit store
    ///
    /// The store must be exactly `params.size_bits` bits wide. Its contents
    /// are not scanned: bits already set answer `contains` as if added, and
    /// `elements_inserted()` counts only insertions made through this filter.
    /// Callers sharing a store across filters own that accounting.
    pub fn with_store(params: BloomFilterParams, store: S) -> Result<Self, FilterError> {
        if store.size() != params.size_bits {
            return Err(FilterError::StoreSizeMismatch {
                expected: params.size_bits,
                actual: store.size(),
            });
        }
        Ok(Self {
            bits: store,
            params,
            inserted: 0,
        })
    }

    /// Add an item to the filter
    ///
    /// Returns `true` if at least one of its bits was previously unset (the
    /// item was probably not present before), `false` if all of them were
    /// already set. Only a `true` result advances `elements_inserted()`.
    pub fn add(&mut self, item: &str) -> bool {
        let mut changed = false;
        for pos in bit_positions(item.as_bytes(), self.params.hash_count, self.params.size_bits) {
            changed |= self.bits.set(pos);
        }
        if changed {
            self.inserted += 1;
        }
        changed
    }

    /// Test if an item might be in the filter
    ///
    /// Returns:
    /// - `true` if the item might be in the set (could be a false positive)
    /// - `false` if the item is definitely NOT in the set (never a false negative)
    pub fn contains(&self, item: &str) -> bool {
        bit_positions(item.as_bytes(), self.params.hash_count, self.params.size_bits)
            .all(|pos| self.bits.get(pos))
    }

    /// Sizing parameters of this filter
    pub fn params(&self) -> &BloomFilterParams {
        &self.params
    }

    /// Filter size in bits (m)
    pub fn size_bits(&self) -> usize {
        self.params.size_bits
    }

    /// Number of hash functions per item (k)
    pub fn hash_count(&self) -> u32 {
        self.params.hash_count
    }

    /// Element count the filter was sized for (n)
    pub fn expected_elements(&self) -> u64 {
        self.params.expected_elements
    }

    /// Target false positive probability the filter was sized for
    pub fn false_positive_probability(&self) -> f64 {
        self.params.false_positive_probability
    }

    /// Number of first-time insertions
    pub fn elements_inserted(&self) -> u64 {
        self.inserted
    }

    /// Estimated false positive rate at the current fill level
    pub fn estimated_false_positive_rate(&self) -> f64 {
        estimated_fpp(self.params.size_bits, self.inserted, self.params.hash_count)
    }

    /// Borrow the underlying bit store
    pub fn store(&self) -> &S {
        &self.bits
    }
}
