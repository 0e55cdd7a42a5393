//! Synonym replacement.

use std::sync::Arc;

use crate::analysis::locale::Locale;
use crate::analysis::resource::{LocaleTable, WordMap};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, replace_tokens};

/// Replaces each word by its canonical synonym, so that `automobile` and
/// `car` index to the same term.
#[derive(Debug, Clone)]
pub struct SynonymFilter {
    synonyms: Arc<LocaleTable<WordMap>>,
}

impl SynonymFilter {
    pub fn new(synonyms: Arc<LocaleTable<WordMap>>) -> Self {
        SynonymFilter { synonyms }
    }
}

impl Filter for SynonymFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a> {
        match self.synonyms.resolve(locale) {
            Some(map) => replace_tokens(tokens, map),
            None => tokens,
        }
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}
