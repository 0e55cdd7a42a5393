//! Spelling correction from a per-locale table.

use std::sync::Arc;

use crate::analysis::locale::Locale;
use crate::analysis::resource::{LocaleTable, WordMap};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, replace_tokens};

/// Replaces known misspellings with their correction.
#[derive(Debug, Clone)]
pub struct MisspelledFilter {
    corrections: Arc<LocaleTable<WordMap>>,
}

impl MisspelledFilter {
    pub fn new(corrections: Arc<LocaleTable<WordMap>>) -> Self {
        MisspelledFilter { corrections }
    }
}

impl Filter for MisspelledFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a> {
        match self.corrections.resolve(locale) {
            Some(map) => replace_tokens(tokens, map),
            None => tokens,
        }
    }

    fn name(&self) -> &'static str {
        "misspelled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::resource::{LexicalResources, ResourceKind};
    use crate::analysis::token_filter::test_util::{stream, values};

    #[test]
    fn test_corrects_known_words() {
        let resources = LexicalResources::empty()
            .with_source(ResourceKind::MisspelledWords, "en", "recieve=receive\nteh=the")
            .unwrap();
        let filter = MisspelledFilter::new(resources.misspelled_words());
        let out = values(filter.filter(stream(&["recieve", "teh", "mail"]), &Locale::new("en")));
        assert_eq!(out, vec!["receive", "the", "mail"]);
    }
}
