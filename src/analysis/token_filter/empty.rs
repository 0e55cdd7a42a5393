//! Drops blank tokens.

use crate::analysis::locale::Locale;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Removes tokens whose value is empty or whitespace only.
#[derive(Debug, Clone, Default)]
pub struct EmptyFilter;

impl EmptyFilter {
    pub fn new() -> Self {
        EmptyFilter
    }
}

impl Filter for EmptyFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, _locale: &Locale) -> TokenStream<'a> {
        Box::new(tokens.filter(|token| !token.is_blank()))
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::test_util::stream;

    #[test]
    fn test_drops_blank() {
        let filter = EmptyFilter::new();
        let out: Vec<_> = filter
            .filter(stream(&["a", "", "  ", "b"]), &Locale::default())
            .collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].value, "b");
        assert_eq!(out[1].position, 30);
    }
}
