//! Outbound Ports (Driven Ports)
//!
//! Dependencies the core needs from its surroundings. Reading files and
//! talking to remote stores happens behind these traits.

use std::io;

use crate::error::SourceError;

pub use crate::domain::bit_array::BitStore;

/// Raw lines produced by an opened word-list source
pub type LineIter<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

/// A replayable sequence of word-list lines (Driven Port)
///
/// Each call to `open()` must start again from the first line. The two-pass
/// ingestion protocol relies on this to count entries before inserting them.
pub trait WordListSource {
    /// Human-readable identifier used in logs and errors
    fn describe(&self) -> String;

    /// Open the source and return its lines from the beginning
    fn open(&self) -> Result<LineIter<'_>, SourceError>;
}
