//! Per-locale lexical resources backing the table-driven pipeline stages.
//!
//! Resources live in a single directory, one file per kind and locale, named
//! `<kind>.<code>` (for example `stopwords.en` or `synonyms.de`). All files are
//! loaded eagerly when [`LexicalResources::load`] runs and are immutable
//! afterwards.
//!
//! # File formats
//!
//! Stop-word files hold comma-separated words; lines starting with `#` are
//! ignored:
//!
//! ```text
//! # English stop words
//! a, an, and, the,
//! of, or
//! ```
//!
//! All other kinds are line-oriented `key=value` files. `#` starts a comment,
//! blank lines are skipped.
//!
//! Stop words and word-map entries are lower-cased and stripped of accents,
//! matching the tokens they are compared with (`für` is stored as `fur`):
//!
//! ```text
//! children=child   # irregular plural
//! ```
//!
//! Regular singularization rules (`regularwords.<code>`) use a regular
//! expression as key and a replacement as value. Captures are referenced as
//! `$1`, or `${1}` when letters follow (`^(.+)ies$=${1}y`). Rules are applied
//! in file order. Patterns keep their case because regex
//! classes such as `\S` are case-sensitive.
//!
//! A missing directory or missing file leaves the corresponding table empty.
//! A file that exists but cannot be read or parsed fails the whole load.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};
use regex::Regex;

use crate::analysis::locale::Locale;
use crate::analysis::token_filter::normalize::strip_diacritics;
use crate::config::IndexContext;
use crate::error::{Result, SiftError};

/// Stop words of one locale.
pub type StopWordSet = AHashSet<String>;

/// Word replacements of one locale.
pub type WordMap = AHashMap<String, String>;

/// The kinds of resource files understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    StopWords,
    IrregularWords,
    RegularWords,
    MisspelledWords,
    Synonyms,
}

impl ResourceKind {
    /// All kinds, in load order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::StopWords,
        ResourceKind::IrregularWords,
        ResourceKind::RegularWords,
        ResourceKind::MisspelledWords,
        ResourceKind::Synonyms,
    ];

    /// The file name prefix of this kind.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ResourceKind::StopWords => "stopwords",
            ResourceKind::IrregularWords => "irregularwords",
            ResourceKind::RegularWords => "regularwords",
            ResourceKind::MisspelledWords => "misspelledwords",
            ResourceKind::Synonyms => "synonyms",
        }
    }

    /// Look up a kind by its file name prefix.
    pub fn from_file_prefix(prefix: &str) -> Option<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.file_prefix() == prefix)
    }

    /// The file name for this kind and a locale code, e.g. `stopwords.en`.
    pub fn file_name(&self, code: &str) -> String {
        format!("{}.{}", self.file_prefix(), code)
    }
}

/// A table of values keyed by locale, resolved with fallback.
#[derive(Debug, Clone)]
pub struct LocaleTable<V> {
    entries: AHashMap<String, V>,
}

impl<V> LocaleTable<V> {
    /// Create an empty table.
    pub fn new() -> Self {
        LocaleTable {
            entries: AHashMap::new(),
        }
    }

    /// Insert the value for a locale key, replacing any previous value.
    pub fn insert(&mut self, locale: &Locale, value: V) {
        self.entries.insert(locale.as_str().to_string(), value);
    }

    /// Resolve the value for a locale: exact tag, then language, then the
    /// default locale.
    pub fn resolve(&self, locale: &Locale) -> Option<&V> {
        locale
            .fallback_chain()
            .into_iter()
            .find_map(|key| self.entries.get(key))
    }

    /// The locale keys present in this table.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Number of locales in this table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no locales.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for LocaleTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A regular singularization rule: a pattern and its replacement.
#[derive(Debug, Clone)]
pub struct SingularRule {
    pattern: Regex,
    replacement: String,
}

impl SingularRule {
    /// Compile a new rule.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| SiftError::resource_load(format!("invalid rule pattern '{pattern}': {e}")))?;
        Ok(SingularRule {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Apply the rule, returning `None` when the pattern does not match.
    pub fn apply(&self, word: &str) -> Option<String> {
        if self.pattern.is_match(word) {
            Some(
                self.pattern
                    .replace(word, self.replacement.as_str())
                    .into_owned(),
            )
        } else {
            None
        }
    }
}

/// All lexical tables used by the term pipeline.
///
/// Tables are reference counted so that pipeline stages can hold the slice
/// they need without copying.
#[derive(Debug, Clone, Default)]
pub struct LexicalResources {
    stop_words: Arc<LocaleTable<StopWordSet>>,
    irregular_words: Arc<LocaleTable<WordMap>>,
    regular_words: Arc<LocaleTable<Vec<SingularRule>>>,
    misspelled_words: Arc<LocaleTable<WordMap>>,
    synonyms: Arc<LocaleTable<WordMap>>,
}

impl LexicalResources {
    /// Create an empty resource set. Every table-driven stage is identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every resource file found in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut resources = Self::empty();

        if !dir.is_dir() {
            warn!(
                "resource directory {} does not exist; lexical tables are empty",
                dir.display()
            );
            return Ok(resources);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| {
            SiftError::resource_load(format!("cannot read {}: {e}", dir.display()))
        })? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((prefix, code)) = file_name.split_once('.') else {
                continue;
            };
            let Some(kind) = ResourceKind::from_file_prefix(prefix) else {
                debug!("skipping unrecognized resource file {file_name}");
                continue;
            };

            let content = fs::read_to_string(&path)
                .map_err(|e| SiftError::resource_load(format!("cannot read {file_name}: {e}")))?;
            resources
                .add_source(kind, &Locale::new(code), &content)
                .map_err(|e| match e {
                    SiftError::ResourceLoad(msg) => {
                        SiftError::resource_load(format!("{file_name}: {msg}"))
                    }
                    other => other,
                })?;
            debug!("loaded resource file {file_name}");
        }

        Ok(resources)
    }

    /// Load the resources of the directory named by `context`.
    pub fn from_context(context: &IndexContext) -> Result<Self> {
        Self::load(context.resource_dir())
    }

    /// Parse `content` as a resource of `kind` and install it for `locale`.
    pub fn add_source(&mut self, kind: ResourceKind, locale: &Locale, content: &str) -> Result<()> {
        match kind {
            ResourceKind::StopWords => {
                Arc::make_mut(&mut self.stop_words).insert(locale, parse_stop_words(content));
            }
            ResourceKind::IrregularWords => {
                Arc::make_mut(&mut self.irregular_words).insert(locale, parse_word_map(content)?);
            }
            ResourceKind::RegularWords => {
                Arc::make_mut(&mut self.regular_words).insert(locale, parse_rules(content)?);
            }
            ResourceKind::MisspelledWords => {
                Arc::make_mut(&mut self.misspelled_words).insert(locale, parse_word_map(content)?);
            }
            ResourceKind::Synonyms => {
                Arc::make_mut(&mut self.synonyms).insert(locale, parse_word_map(content)?);
            }
        }
        Ok(())
    }

    /// Builder-style variant of [`add_source`](Self::add_source).
    pub fn with_source(mut self, kind: ResourceKind, locale: &str, content: &str) -> Result<Self> {
        self.add_source(kind, &Locale::new(locale), content)?;
        Ok(self)
    }

    pub fn stop_words(&self) -> Arc<LocaleTable<StopWordSet>> {
        Arc::clone(&self.stop_words)
    }

    pub fn irregular_words(&self) -> Arc<LocaleTable<WordMap>> {
        Arc::clone(&self.irregular_words)
    }

    pub fn regular_words(&self) -> Arc<LocaleTable<Vec<SingularRule>>> {
        Arc::clone(&self.regular_words)
    }

    pub fn misspelled_words(&self) -> Arc<LocaleTable<WordMap>> {
        Arc::clone(&self.misspelled_words)
    }

    pub fn synonyms(&self) -> Arc<LocaleTable<WordMap>> {
        Arc::clone(&self.synonyms)
    }
}

/// Fold a table entry the way the pipeline folds tokens before lookup.
fn fold(word: &str) -> String {
    strip_diacritics(&word.trim().to_lowercase())
}

/// Parse a comma-separated stop-word list.
pub fn parse_stop_words(content: &str) -> StopWordSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(fold)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Parse a `key=value` file into a folded map.
pub fn parse_word_map(content: &str) -> Result<WordMap> {
    let mut map = WordMap::new();
    for (line_no, key, value) in key_value_lines(content)? {
        if value.is_empty() {
            return Err(SiftError::resource_load(format!(
                "line {line_no}: empty replacement for '{key}'"
            )));
        }
        map.insert(fold(key), fold(value));
    }
    Ok(map)
}

/// Parse an ordered list of regular singularization rules.
pub fn parse_rules(content: &str) -> Result<Vec<SingularRule>> {
    key_value_lines(content)?
        .into_iter()
        .map(|(line_no, pattern, replacement)| {
            SingularRule::new(pattern, replacement.to_lowercase()).map_err(|e| match e {
                SiftError::ResourceLoad(msg) => {
                    SiftError::resource_load(format!("line {line_no}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Split a line-oriented file into `(line number, key, value)` triples.
fn key_value_lines(content: &str) -> Result<Vec<(usize, &str, &str)>> {
    let mut entries = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(SiftError::resource_load(format!(
                "line {line_no}: expected 'key=value', found '{line}'"
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(SiftError::resource_load(format!("line {line_no}: empty key")));
        }
        entries.push((line_no, key, value.trim()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stop_words() {
        let set = parse_stop_words("# comment, ignored\nThe, a ,an,\n\nof");
        assert_eq!(set.len(), 4);
        assert!(set.contains("the"));
        assert!(set.contains("of"));
        assert!(!set.contains("comment"));
    }

    #[test]
    fn test_entries_are_folded() {
        let set = parse_stop_words("für, Über");
        assert!(set.contains("fur"));
        assert!(set.contains("uber"));

        let map = parse_word_map("Crème=Café").unwrap();
        assert_eq!(map.get("creme").map(String::as_str), Some("cafe"));
    }

    #[test]
    fn test_parse_word_map() {
        let map = parse_word_map("# header\nChildren=Child # trailing\n\n  mice = mouse\n").unwrap();
        assert_eq!(map.get("children").map(String::as_str), Some("child"));
        assert_eq!(map.get("mice").map(String::as_str), Some("mouse"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_word_map_malformed() {
        assert!(matches!(
            parse_word_map("valid=ok\nbroken line"),
            Err(SiftError::ResourceLoad(_))
        ));
        assert!(parse_word_map("=value").is_err());
        assert!(parse_word_map("key=").is_err());
    }

    #[test]
    fn test_parse_rules_keeps_order() {
        let rules = parse_rules("(\\w+)ies$=${1}y\n(\\w+)s$=$1").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].apply("cities").as_deref(), Some("city"));
        assert_eq!(rules[1].apply("cars").as_deref(), Some("car"));
        assert_eq!(rules[1].apply("car"), None);
    }

    #[test]
    fn test_parse_rules_invalid_pattern() {
        assert!(matches!(parse_rules("(unclosed=x"), Err(SiftError::ResourceLoad(_))));
    }

    #[test]
    fn test_locale_table_fallback() {
        let mut table = LocaleTable::new();
        table.insert(&Locale::new("en"), 1);
        table.insert(&Locale::new("de-ch"), 2);

        assert_eq!(table.resolve(&Locale::new("de-CH")), Some(&2));
        assert_eq!(table.resolve(&Locale::new("en-US")), Some(&1));
        // No German language-only table: falls through to the default locale.
        assert_eq!(table.resolve(&Locale::new("de-DE")), Some(&1));
    }

    #[test]
    fn test_locale_table_unresolved() {
        let mut table = LocaleTable::new();
        table.insert(&Locale::new("de"), 1);
        assert_eq!(table.resolve(&Locale::new("fr")), None);
    }

    #[test]
    fn test_resource_kind_prefix() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_file_prefix(kind.file_prefix()), Some(kind));
        }
        assert_eq!(ResourceKind::StopWords.file_name("en"), "stopwords.en");
        assert_eq!(ResourceKind::from_file_prefix("unknown"), None);
    }

    #[test]
    fn test_missing_directory_fails_open() {
        let resources = LexicalResources::load(Path::new("/nonexistent/sift/resources")).unwrap();
        assert!(resources.stop_words().is_empty());
        assert!(resources.synonyms().is_empty());
    }

    #[test]
    fn test_with_source() {
        let resources = LexicalResources::empty()
            .with_source(ResourceKind::Synonyms, "en", "automobile=car")
            .unwrap();
        let synonyms = resources.synonyms();
        let table = synonyms.resolve(&Locale::new("en")).unwrap();
        assert_eq!(table.get("automobile").map(String::as_str), Some("car"));
    }
}
