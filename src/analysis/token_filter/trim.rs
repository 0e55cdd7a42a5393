//! Boundary-character trimming.

use crate::analysis::locale::Locale;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Characters stripped from both ends of a token.
pub const BOUNDARY_CHARS: &[char] = &['.', ',', '-', '_', '…'];

/// Strips [`BOUNDARY_CHARS`] from both ends of each token.
#[derive(Debug, Clone, Default)]
pub struct TrimFilter;

impl TrimFilter {
    pub fn new() -> Self {
        TrimFilter
    }
}

impl Filter for TrimFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, _locale: &Locale) -> TokenStream<'a> {
        Box::new(tokens.map(|token| {
            let trimmed = token.value.trim_matches(BOUNDARY_CHARS);
            if trimmed.len() == token.value.len() {
                token
            } else {
                let trimmed = trimmed.to_string();
                token.with_value(trimmed)
            }
        }))
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}
