//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Bit storage contract and local bit array
//! - Core Bloom filter implementation
//! - Hash functions
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bit_array;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bit_array::{BitArray, BitStore};
pub use bloom_filter::BloomFilter;
pub use config::{PassCheckConfig, DEFAULT_FP_PROBABILITY};
pub use parameters::{estimated_fpp, validate_probability, BloomFilterParams};
