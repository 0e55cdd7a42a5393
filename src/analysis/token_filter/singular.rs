//! Plural to singular conversion.

use std::sync::Arc;

use crate::analysis::locale::Locale;
use crate::analysis::resource::{LocaleTable, SingularRule, WordMap};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Reduces plural forms to their singular.
///
/// The irregular table (`children=child`) is consulted first. Otherwise the
/// first regular rule whose pattern matches rewrites the word. Words matching
/// neither pass through.
#[derive(Debug, Clone)]
pub struct SingularFilter {
    irregular: Arc<LocaleTable<WordMap>>,
    rules: Arc<LocaleTable<Vec<SingularRule>>>,
}

impl SingularFilter {
    pub fn new(
        irregular: Arc<LocaleTable<WordMap>>,
        rules: Arc<LocaleTable<Vec<SingularRule>>>,
    ) -> Self {
        SingularFilter { irregular, rules }
    }

    /// Singularize a single word for `locale`.
    pub fn singularize(&self, word: &str, locale: &Locale) -> Option<String> {
        singularize_with(
            word,
            self.irregular.resolve(locale),
            self.rules.resolve(locale).map(Vec::as_slice),
        )
    }
}

fn singularize_with(
    word: &str,
    irregular: Option<&WordMap>,
    rules: Option<&[SingularRule]>,
) -> Option<String> {
    if let Some(singular) = irregular.and_then(|map| map.get(word)) {
        return Some(singular.clone());
    }
    rules?.iter().find_map(|rule| rule.apply(word))
}

impl Filter for SingularFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a> {
        let irregular = self.irregular.resolve(locale);
        let rules = self.rules.resolve(locale).map(Vec::as_slice);
        if irregular.is_none() && rules.is_none() {
            return tokens;
        }

        Box::new(tokens.map(move |token| {
            match singularize_with(&token.value, irregular, rules) {
                Some(singular) => token.with_value(singular),
                None => token,
            }
        }))
    }

    fn name(&self) -> &'static str {
        "singular"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::resource::{LexicalResources, ResourceKind};
    use crate::analysis::token_filter::test_util::{stream, values};

    fn filter() -> SingularFilter {
        let resources = LexicalResources::empty()
            .with_source(ResourceKind::IrregularWords, "en", "children=child\nmice=mouse")
            .unwrap()
            .with_source(
                ResourceKind::RegularWords,
                "en",
                "^(.+)ies$=${1}y\n^(.+[sxz])es$=$1\n^(.+[^s])s$=$1",
            )
            .unwrap();
        SingularFilter::new(resources.irregular_words(), resources.regular_words())
    }

    #[test]
    fn test_irregular_first() {
        let filter = filter();
        let locale = Locale::new("en");
        assert_eq!(filter.singularize("children", &locale).as_deref(), Some("child"));
        assert_eq!(filter.singularize("mice", &locale).as_deref(), Some("mouse"));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let out = values(filter().filter(
            stream(&["cities", "boxes", "cars", "glass", "child"]),
            &Locale::new("en-US"),
        ));
        assert_eq!(out, vec!["city", "box", "car", "glass", "child"]);
    }

    #[test]
    fn test_unresolved_locale_is_identity() {
        let resources = LexicalResources::empty()
            .with_source(ResourceKind::IrregularWords, "de", "kinder=kind")
            .unwrap();
        let filter = SingularFilter::new(resources.irregular_words(), resources.regular_words());
        let out = values(filter.filter(stream(&["kinder", "cars"]), &Locale::new("fr")));
        assert_eq!(out, vec!["kinder", "cars"]);
    }
}
