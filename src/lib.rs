//! # Sift
//!
//! Locale-aware term analysis and WQL query evaluation for inverted-index
//! search.
//!
//! ## Features
//!
//! - Lazy, locale-dependent term pipeline (case folding, accent stripping,
//!   stop words, singularization, spelling corrections, synonyms)
//! - Per-locale lexical resources loaded from plain text files
//! - Reverse-index contract plus an in-memory implementation
//! - WQL expression trees evaluated against an index or in memory
//! - Locale-aware collation for ordering and range comparisons

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
mod error;
pub mod lexical;
pub mod util;
pub mod wql;

// Re-exports for the public API
pub use analysis::{LexicalResources, Locale, TermPipeline};
pub use config::{IndexContext, IndexContextBuilder};
pub use data::{DataValue, Document, IndexItem};
pub use error::{Result, SiftError};
pub use lexical::{MemoryReverseIndex, RetrieveMethod, RetrieveOptions, ReverseIndex};
pub use wql::{ExpressionNode, Filter, Statement};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
