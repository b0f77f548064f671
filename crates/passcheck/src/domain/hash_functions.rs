//! Hash functions for the Bloom filter
//!
//! Uses MurmurHash3 with two seeds to derive the base hashes, then double
//! hashing to synthesize the k bit positions.

use std::io::Cursor;

const SEED_H1: u32 = 0;
const SEED_H2: u32 = 1;

/// Hash an item with MurmurHash3 x64/128 and keep the lower 64 bits
pub fn murmur_hash(item: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(item);
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// The two independent base hashes of an item
pub fn base_hashes(item: &[u8]) -> (u64, u64) {
    (murmur_hash(item, SEED_H1), murmur_hash(item, SEED_H2))
}

/// Bit positions for an item in a filter of `m` bits with `k` hashes
///
/// Uses double hashing: position(i) = (h1 + i * h2) mod m, for i in [0, k).
/// Positions are produced lazily so lookups can stop at the first unset bit.
pub fn bit_positions(item: &[u8], k: u32, m: usize) -> impl Iterator<Item = usize> {
    let (h1, h2) = base_hashes(item);
    let m = m as u64;
    (0..u64::from(k)).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
}
