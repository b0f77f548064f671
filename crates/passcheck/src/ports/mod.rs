//! Ports Layer
//!
//! Defines the interfaces (traits) the core depends on:
//! - `WordListSource` - where word-list entries come from
//! - `BitStore` - where filter bits live (re-exported from the domain)

pub mod outbound;

pub use outbound::{BitStore, LineIter, WordListSource};
