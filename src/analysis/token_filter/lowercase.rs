//! Lower-case filter.

use crate::analysis::locale::Locale;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Converts token values to lower case.
#[derive(Debug, Clone, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, _locale: &Locale) -> TokenStream<'a> {
        Box::new(tokens.map(|token| {
            let lower = token.value.to_lowercase();
            token.with_value(lower)
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::test_util::{stream, values};

    #[test]
    fn test_lowercase() {
        let filter = LowercaseFilter::new();
        let out = values(filter.filter(stream(&["Hello", "WORLD", "ÉTÉ"]), &Locale::default()));
        assert_eq!(out, vec!["hello", "world", "été"]);
    }

    #[test]
    fn test_positions_survive() {
        let filter = LowercaseFilter::new();
        let positions: Vec<usize> = filter
            .filter(stream(&["A", "B"]), &Locale::default())
            .map(|t| t.position)
            .collect();
        assert_eq!(positions, vec![0, 10]);
    }
}
