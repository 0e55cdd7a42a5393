//! Text analysis for Sift.
//!
//! This module turns raw text into normalized terms. It includes:
//!
//! - **Tokenizer**: splits text into positioned tokens
//! - **Token filters**: the individual pipeline stages
//! - **Resources**: per-locale stop words, singular forms, corrections and
//!   synonyms loaded from disk
//! - **Pipeline**: the fixed composition of stages used for both indexing and
//!   querying
//! - **Collation**: locale-aware string ordering for range comparisons
//!
//! # Architecture
//!
//! ```text
//! Text → Tokenizer → Token Stream → Token Filters → Terms
//! ```
//!
//! # Examples
//!
//! ```
//! use sift::analysis::{LexicalResources, Locale, TermPipeline};
//!
//! let pipeline = TermPipeline::new(&LexicalResources::empty());
//! let terms = pipeline.terms("Crème BRÛLÉE.", &Locale::new("fr"));
//! assert_eq!(terms, vec!["creme", "brulee"]);
//! ```

pub mod collation;
pub mod locale;
pub mod pipeline;
pub mod resource;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-exports
pub use collation::Collator;
pub use locale::{DEFAULT_LOCALE, Locale};
pub use pipeline::TermPipeline;
pub use resource::{LexicalResources, LocaleTable, ResourceKind};
pub use token::{Token, TokenStream};
pub use token_filter::Filter as TokenFilter;
pub use tokenizer::WordTokenizer;
