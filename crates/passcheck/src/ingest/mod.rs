//! Ingestion Layer
//!
//! Turns word-list lines into a populated Bloom filter, applying case
//! folding, length filtering and the item cap.

pub mod entry;
pub mod ingestor;

pub use entry::{fold_case, parse_line, WordListEntry};
pub use ingestor::{EligibleCount, IngestReport, Ingested, WordListIngestor};
