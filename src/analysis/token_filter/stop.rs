//! Stop-word removal.

use std::sync::Arc;

use crate::analysis::locale::Locale;
use crate::analysis::resource::{LocaleTable, StopWordSet};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Drops tokens found in the locale's stop-word set.
///
/// Values are compared as they arrive, so this filter belongs after the
/// lower-case and normalize stages.
#[derive(Debug, Clone)]
pub struct StopFilter {
    stop_words: Arc<LocaleTable<StopWordSet>>,
}

impl StopFilter {
    pub fn new(stop_words: Arc<LocaleTable<StopWordSet>>) -> Self {
        StopFilter { stop_words }
    }

    /// Whether `word` is a stop word for `locale`.
    pub fn is_stop_word(&self, word: &str, locale: &Locale) -> bool {
        self.stop_words
            .resolve(locale)
            .is_some_and(|set| set.contains(word))
    }
}

impl Filter for StopFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a> {
        match self.stop_words.resolve(locale) {
            Some(set) => Box::new(tokens.filter(move |token| !set.contains(&token.value))),
            None => tokens,
        }
    }

    fn name(&self) -> &'static str {
        "stop_word"
    }
}
