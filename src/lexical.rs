//! Lexical retrieval: the reverse-index contract, an in-memory
//! implementation of it, and the fuzzy matcher used for approximate lookup.
//!
//! # Module Structure
//!
//! - `reverse_index`: the `ReverseIndex` trait and retrieval options
//! - `memory`: in-memory postings built through the term pipeline
//! - `fuzzy`: edit-distance / common-subsequence term matching

pub mod fuzzy;
pub mod memory;
pub mod reverse_index;

// Re-exports
pub use fuzzy::{FuzzyMatch, FuzzyMatcher};
pub use memory::MemoryReverseIndex;
pub use reverse_index::{IdStream, RetrieveMethod, RetrieveOptions, ReverseIndex};
