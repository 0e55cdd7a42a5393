//! In-memory reverse index.
//!
//! [`MemoryReverseIndex`] keeps `term → record → positions` postings in
//! memory. Documents and query terms both go through the same
//! [`TermPipeline`], so a query for `"Cafés"` finds a record indexed as
//! `"café"`.
//!
//! Positions are ordinals in the analyzed token sequence (after stop words
//! are removed), which is what phrase adjacency is checked against.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::analysis::locale::Locale;
use crate::analysis::pipeline::TermPipeline;
use crate::lexical::fuzzy::FuzzyMatcher;
use crate::lexical::reverse_index::{IdStream, RetrieveMethod, RetrieveOptions, ReverseIndex};

type PostingList = AHashMap<Uuid, Vec<usize>>;

#[derive(Debug, Default)]
struct Postings {
    terms: BTreeMap<String, PostingList>,
    records: AHashMap<Uuid, Vec<String>>,
}

impl Postings {
    fn remove(&mut self, id: &Uuid) -> bool {
        let Some(terms) = self.records.remove(id) else {
            return false;
        };
        for term in terms {
            if let Some(list) = self.terms.get_mut(&term) {
                list.remove(id);
                if list.is_empty() {
                    self.terms.remove(&term);
                }
            }
        }
        true
    }
}

/// A thread-safe in-memory [`ReverseIndex`].
#[derive(Debug)]
pub struct MemoryReverseIndex {
    pipeline: Arc<TermPipeline>,
    locale: Locale,
    matcher: FuzzyMatcher,
    postings: RwLock<Postings>,
}

impl MemoryReverseIndex {
    /// Create an empty index analyzing text with `pipeline` for `locale`.
    pub fn new(pipeline: Arc<TermPipeline>, locale: Locale) -> Self {
        MemoryReverseIndex {
            pipeline,
            locale,
            matcher: FuzzyMatcher::new(),
            postings: RwLock::new(Postings::default()),
        }
    }

    /// Set the matcher used for approximate retrieval. Its edit limit is
    /// replaced per call by [`RetrieveOptions::distance`].
    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// The locale this index analyzes with.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Index `text` for record `id`, replacing any previous entry for `id`.
    pub fn add(&self, id: Uuid, text: &str) {
        let terms = self.pipeline.terms(text, &self.locale);

        let mut postings = self.postings.write();
        postings.remove(&id);
        for (ordinal, term) in terms.iter().enumerate() {
            postings
                .terms
                .entry(term.clone())
                .or_default()
                .entry(id)
                .or_default()
                .push(ordinal);
        }
        debug!("indexed record {id} with {} terms", terms.len());
        postings.records.insert(id, terms);
    }

    /// Remove record `id`. Returns false if it was not indexed.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.postings.write().remove(id)
    }

    /// Remove every record.
    pub fn clear(&self) {
        let mut postings = self.postings.write();
        postings.terms.clear();
        postings.records.clear();
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.read().terms.len()
    }

    /// Number of indexed records.
    pub fn record_count(&self) -> usize {
        self.postings.read().records.len()
    }

    /// Whether the (already normalized) term is present.
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.read().terms.contains_key(term)
    }

    fn retrieve_phrase(&self, postings: &Postings, terms: &[String]) -> BTreeSet<Uuid> {
        let lists: Option<Vec<&PostingList>> =
            terms.iter().map(|term| postings.terms.get(term)).collect();
        let Some(lists) = lists else {
            return BTreeSet::new();
        };

        lists[0]
            .iter()
            .filter(|(id, starts)| {
                starts.iter().any(|&start| {
                    lists[1..].iter().enumerate().all(|(offset, list)| {
                        list.get(*id)
                            .is_some_and(|positions| positions.contains(&(start + offset + 1)))
                    })
                })
            })
            .map(|(id, _)| *id)
            .collect()
    }

    fn retrieve_fuzzy(&self, postings: &Postings, terms: &[String], distance: u32) -> BTreeSet<Uuid> {
        let matcher = self.matcher.max_edits(distance);
        let mut result: Option<BTreeSet<Uuid>> = None;

        for term in terms {
            let ids: BTreeSet<Uuid> = matcher
                .matches(term, postings.terms.keys().map(String::as_str))
                .into_iter()
                .filter_map(|m| postings.terms.get(m.term))
                .flat_map(|list| list.keys().copied())
                .collect();

            result = Some(match result {
                Some(acc) => acc.intersection(&ids).copied().collect(),
                None => ids,
            });
            if result.as_ref().is_some_and(BTreeSet::is_empty) {
                break;
            }
        }
        result.unwrap_or_default()
    }
}

impl ReverseIndex for MemoryReverseIndex {
    fn retrieve(&self, term: &str, options: &RetrieveOptions) -> IdStream<'_> {
        let terms = self.pipeline.terms(term, &self.locale);
        if terms.is_empty() {
            return Box::new(std::iter::empty());
        }

        let postings = self.postings.read();
        let ids = match options.method {
            RetrieveMethod::Phrase => self.retrieve_phrase(&postings, &terms),
            RetrieveMethod::Default => self.retrieve_fuzzy(&postings, &terms, options.distance),
        };
        debug!(
            "retrieve {term:?} ({:?}, distance {}) -> {} ids",
            options.method,
            options.distance,
            ids.len()
        );
        Box::new(ids.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::resource::{LexicalResources, ResourceKind};

    fn index() -> (MemoryReverseIndex, Uuid, Uuid) {
        let resources = LexicalResources::empty()
            .with_source(ResourceKind::StopWords, "en", "the, of")
            .unwrap();
        let index = MemoryReverseIndex::new(
            Arc::new(TermPipeline::new(&resources)),
            Locale::new("en"),
        );
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        index.add(a, "The Art of War");
        index.add(b, "War and Peace");
        (index, a, b)
    }

    fn ids(index: &MemoryReverseIndex, term: &str, options: RetrieveOptions) -> Vec<Uuid> {
        index.retrieve(term, &options).collect()
    }

    #[test]
    fn test_phrase() {
        let (index, a, b) = index();
        assert_eq!(ids(&index, "art war", RetrieveOptions::phrase()), vec![a]);
        // Stop words are removed on both sides.
        assert_eq!(ids(&index, "the ART of the WAR", RetrieveOptions::phrase()), vec![a]);
        assert_eq!(ids(&index, "war and", RetrieveOptions::phrase()), vec![b]);
        assert!(ids(&index, "war art", RetrieveOptions::phrase()).is_empty());
    }

    #[test]
    fn test_fuzzy() {
        let (index, a, b) = index();
        let mut found = ids(&index, "wor", RetrieveOptions::fuzzy(1));
        found.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(found, expected);
        assert!(ids(&index, "wor", RetrieveOptions::fuzzy(0)).is_empty());
        assert_eq!(ids(&index, "pease", RetrieveOptions::fuzzy(1)), vec![b]);
    }

    #[test]
    fn test_empty_query() {
        let (index, _, _) = index();
        assert!(ids(&index, "the of", RetrieveOptions::phrase()).is_empty());
        assert!(ids(&index, "", RetrieveOptions::fuzzy(2)).is_empty());
    }

    #[test]
    fn test_reindex_and_remove() {
        let (index, a, _) = index();
        assert_eq!(index.record_count(), 2);
        index.add(a, "Peace");
        assert!(ids(&index, "art", RetrieveOptions::phrase()).is_empty());
        assert!(!index.contains_term("art"));

        assert!(index.remove(&a));
        assert!(!index.remove(&a));
        assert_eq!(index.record_count(), 1);

        index.clear();
        assert_eq!(index.term_count(), 0);
    }
}
