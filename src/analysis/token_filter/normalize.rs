//! Unicode normalization filter for diacritic removal.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::locale::Locale;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Applies NFKD decomposition and strips combining marks.
///
/// `café` becomes `cafe`, the `ﬁ` ligature becomes `fi`. The decomposed
/// value is lower-cased again because compatibility letters decompose to
/// upper case (`ℝ` becomes `R`).
#[derive(Debug, Clone, Default)]
pub struct NormalizeFilter;

impl NormalizeFilter {
    pub fn new() -> Self {
        NormalizeFilter
    }
}

/// Decompose `text` and drop its combining marks.
pub fn strip_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

impl Filter for NormalizeFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, _locale: &Locale) -> TokenStream<'a> {
        Box::new(tokens.map(|token| {
            if token.value.is_ascii() {
                token
            } else {
                let normalized = strip_diacritics(&token.value).to_lowercase();
                token.with_value(normalized)
            }
        }))
    }

    fn name(&self) -> &'static str {
        "normalize"
    }
}
