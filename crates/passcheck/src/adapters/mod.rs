//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the `WordListSource` port.
//!
//! ## Adapters
//!
//! - `FileWordList` - a UTF-8 word list on disk
//! - `BundledWordList` - the default list compiled into the crate
//! - `InMemoryWordList` - lines held in memory

pub mod word_list;

pub use word_list::{source_for, BundledWordList, FileWordList, InMemoryWordList};
