//! The reverse-index contract consumed by query conditions.
//!
//! Conditions never see the storage engine. They hold an
//! `Arc<dyn ReverseIndex>` injected into the attribute when the tree is
//! built and call [`ReverseIndex::retrieve`] with the raw parameter text;
//! normalizing that text is the index's job, so it must use the same
//! [`TermPipeline`](crate::analysis::TermPipeline) it indexed with.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lazy sequence of record ids.
pub type IdStream<'a> = Box<dyn Iterator<Item = Uuid> + 'a>;

/// How the index matches the query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RetrieveMethod {
    /// Exact terms, in sequence.
    Phrase,
    /// Approximate terms, bounded by [`RetrieveOptions::distance`].
    #[default]
    Default,
}

/// Options for a single retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RetrieveOptions {
    pub method: RetrieveMethod,
    /// Maximum edit distance for [`RetrieveMethod::Default`].
    pub distance: u32,
}

impl RetrieveOptions {
    /// Exact phrase lookup.
    pub fn phrase() -> Self {
        RetrieveOptions {
            method: RetrieveMethod::Phrase,
            distance: 0,
        }
    }

    /// Approximate lookup within `distance` edits.
    pub fn fuzzy(distance: u32) -> Self {
        RetrieveOptions {
            method: RetrieveMethod::Default,
            distance,
        }
    }
}

/// Term to record-id lookup.
pub trait ReverseIndex: Send + Sync + Debug {
    /// Retrieve the ids of records matching `term`.
    ///
    /// Implementations return an empty stream rather than failing when
    /// nothing matches.
    fn retrieve(&self, term: &str, options: &RetrieveOptions) -> IdStream<'_>;
}
