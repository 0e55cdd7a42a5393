//! Fuzzy term matching for approximate retrieval.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::util::levenshtein::{
    damerau_levenshtein_distance, levenshtein_distance, longest_common_subsequence,
};

/// A candidate term accepted by a [`FuzzyMatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// The matching index term.
    pub term: &'a str,
    /// Edit distance from the query term.
    pub distance: usize,
    /// Similarity score in `[0, 1]`; higher is closer.
    pub score: f32,
}

/// Scores index terms against a query term by edit distance and common
/// subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatcher {
    /// Maximum edit distance for a match.
    max_edits: u32,
    /// Minimum prefix length that must match exactly.
    prefix_length: u32,
    /// Whether transpositions count as single edits (Damerau-Levenshtein).
    transpositions: bool,
}

impl FuzzyMatcher {
    /// Create a matcher with default settings: two edits, no required prefix,
    /// transpositions enabled.
    pub fn new() -> Self {
        FuzzyMatcher {
            max_edits: 2,
            prefix_length: 0,
            transpositions: true,
        }
    }

    /// Set the maximum edit distance.
    pub fn max_edits(mut self, max_edits: u32) -> Self {
        self.max_edits = max_edits;
        self
    }

    /// Set the minimum prefix length that must match exactly.
    pub fn prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    /// Set whether transpositions should be considered single edits.
    pub fn transpositions(mut self, transpositions: bool) -> Self {
        self.transpositions = transpositions;
        self
    }

    /// Get the maximum edit distance.
    pub fn get_max_edits(&self) -> u32 {
        self.max_edits
    }

    /// Get the prefix length.
    pub fn get_prefix_length(&self) -> u32 {
        self.prefix_length
    }

    /// Check if transpositions are enabled.
    pub fn get_transpositions(&self) -> bool {
        self.transpositions
    }

    /// Edit distance between two terms under this matcher's settings.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        if self.transpositions {
            damerau_levenshtein_distance(a, b)
        } else {
            levenshtein_distance(a, b)
        }
    }

    /// Common-subsequence similarity: `2 * lcs / (len(a) + len(b))`.
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        let total = a.chars().count() + b.chars().count();
        if total == 0 {
            return 1.0;
        }
        (2 * longest_common_subsequence(a, b)) as f32 / total as f32
    }

    /// Combined score of edit distance and common-subsequence similarity.
    pub fn score(&self, query: &str, candidate: &str) -> f32 {
        let longest = query.chars().count().max(candidate.chars().count());
        if longest == 0 {
            return 1.0;
        }
        let edit_similarity = 1.0 - self.distance(query, candidate) as f32 / longest as f32;
        (edit_similarity + self.similarity(query, candidate)) / 2.0
    }

    /// Whether `candidate` is within the allowed edits of `query`.
    pub fn is_match(&self, query: &str, candidate: &str) -> bool {
        self.check(query, candidate).is_some()
    }

    /// Collect the candidates matching `query`, best first.
    pub fn matches<'a, I>(&self, query: &str, candidates: I) -> Vec<FuzzyMatch<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut matches: Vec<FuzzyMatch<'a>> = candidates
            .into_iter()
            .filter_map(|term| {
                self.check(query, term).map(|distance| FuzzyMatch {
                    term,
                    distance,
                    score: self.score(query, term),
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.term.cmp(b.term))
        });
        matches
    }

    fn check(&self, query: &str, candidate: &str) -> Option<usize> {
        let prefix = self.prefix_length as usize;
        if prefix > 0 && !query.chars().take(prefix).eq(candidate.chars().take(prefix)) {
            return None;
        }

        let max = self.max_edits as usize;
        if query.chars().count().abs_diff(candidate.chars().count()) > max {
            return None;
        }

        let distance = self.distance(query, candidate);
        (distance <= max).then_some(distance)
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_matcher_creation() {
        let matcher = FuzzyMatcher::new()
            .max_edits(1)
            .prefix_length(2)
            .transpositions(false);

        assert_eq!(matcher.get_max_edits(), 1);
        assert_eq!(matcher.get_prefix_length(), 2);
        assert!(!matcher.get_transpositions());
    }

    #[test]
    fn test_is_match() {
        let matcher = FuzzyMatcher::new().max_edits(1);
        assert!(matcher.is_match("hello", "hallo"));
        assert!(matcher.is_match("hello", "hello"));
        assert!(!matcher.is_match("hello", "help"));
    }

    #[test]
    fn test_transpositions() {
        let with = FuzzyMatcher::new().max_edits(1);
        let without = FuzzyMatcher::new().max_edits(1).transpositions(false);
        assert!(with.is_match("recieve", "receive"));
        assert!(!without.is_match("recieve", "receive"));
    }

    #[test]
    fn test_prefix_length() {
        let matcher = FuzzyMatcher::new().max_edits(1).prefix_length(1);
        assert!(!matcher.is_match("cat", "bat"));
        assert!(matcher.is_match("cat", "cut"));
    }

    #[test]
    fn test_zero_edits_is_exact() {
        let matcher = FuzzyMatcher::new().max_edits(0);
        assert!(matcher.is_match("bob", "bob"));
        assert!(!matcher.is_match("bob", "rob"));
    }

    #[test]
    fn test_similarity_and_score() {
        let matcher = FuzzyMatcher::new();
        assert_eq!(matcher.similarity("abc", "abc"), 1.0);
        assert_eq!(matcher.similarity("abc", "xyz"), 0.0);
        assert_eq!(matcher.similarity("", ""), 1.0);
        assert!(matcher.score("search", "serch") > matcher.score("search", "starch"));
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let matcher = FuzzyMatcher::new().max_edits(2);
        let terms = ["apple", "apply", "ample", "banana", "appl"];
        let matches = matcher.matches("apple", terms);
        let found: Vec<&str> = matches.iter().map(|m| m.term).collect();
        assert_eq!(found[0], "apple");
        assert!(found.contains(&"apply"));
        assert!(found.contains(&"appl"));
        assert!(!found.contains(&"banana"));
        assert_eq!(matches[0].distance, 0);
    }
}
