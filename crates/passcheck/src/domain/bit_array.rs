//! Fixed-size bit storage for Bloom filters
//!
//! INVARIANTS:
//! - Every index is reduced modulo `size()` before access, so out-of-bounds
//!   bit addressing cannot happen.
//! - `size()` never changes after construction.

use bitvec::prelude::*;

use crate::error::FilterError;

/// The bit-array contract a Bloom filter depends on
///
/// The local [`BitArray`] satisfies it with in-process memory. A shared or
/// remote backend can be injected through [`crate::BloomFilter::with_store`]
/// as long as it honors the same three operations.
pub trait BitStore: Send + Sync {
    /// Number of addressable bits
    fn size(&self) -> usize;

    /// Set the bit at `index mod size`
    ///
    /// Returns `true` if the bit was previously unset, `false` if the call
    /// changed nothing.
    fn set(&mut self, index: usize) -> bool;

    /// Read the bit at `index mod size`
    fn get(&self, index: usize) -> bool;
}

/// In-memory bit array backed by `ceil(size / 8)` bytes
#[derive(Clone, Debug)]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    /// Create a zeroed bit array of `size` bits
    pub fn new(size: usize) -> Result<Self, FilterError> {
        if size == 0 {
            return Err(FilterError::EmptyBitArray);
        }
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; size],
        })
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Bytes used by the underlying storage
    pub fn storage_bytes(&self) -> usize {
        self.bits.as_raw_slice().len()
    }
}

impl BitStore for BitArray {
    fn size(&self) -> usize {
        self.bits.len()
    }

    fn set(&mut self, index: usize) -> bool {
        let index = index % self.bits.len();
        !self.bits.replace(index, true)
    }

    fn get(&self, index: usize) -> bool {
        self.bits[index % self.bits.len()]
    }
}
