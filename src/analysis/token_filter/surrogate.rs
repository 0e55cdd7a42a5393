//! Drops tokens with characters outside the Basic Multilingual Plane.

use crate::analysis::locale::Locale;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Removes tokens containing any character that UTF-16 encodes as a surrogate
/// pair (emoji, pictographs and other supplementary-plane symbols).
#[derive(Debug, Clone, Default)]
pub struct SurrogateCharacterFilter;

impl SurrogateCharacterFilter {
    pub fn new() -> Self {
        SurrogateCharacterFilter
    }
}

/// Whether `text` contains a supplementary-plane character.
pub fn has_surrogate(text: &str) -> bool {
    text.chars().any(|c| c.len_utf16() == 2)
}

impl Filter for SurrogateCharacterFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, _locale: &Locale) -> TokenStream<'a> {
        Box::new(tokens.filter(|token| !has_surrogate(&token.value)))
    }

    fn name(&self) -> &'static str {
        "surrogate_character"
    }
}
