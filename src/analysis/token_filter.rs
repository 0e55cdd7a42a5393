//! Token filters: the stages of the term pipeline.
//!
//! Each filter takes a lazy [`TokenStream`] and returns another one. Filters
//! either rewrite token values (keeping positions), drop tokens, or pass them
//! through; they never reorder. A filter never fails for a single token.
//!
//! Table-driven filters resolve their per-locale table once per call. When no
//! table resolves for the locale, the filter returns its input unchanged.

use std::fmt::Debug;

use crate::analysis::locale::Locale;
use crate::analysis::resource::WordMap;
use crate::analysis::token::TokenStream;

pub mod empty;
pub mod lowercase;
pub mod misspelled;
pub mod normalize;
pub mod singular;
pub mod stop;
pub mod surrogate;
pub mod synonym;
pub mod trim;

pub use empty::EmptyFilter;
pub use lowercase::LowercaseFilter;
pub use misspelled::MisspelledFilter;
pub use normalize::NormalizeFilter;
pub use singular::SingularFilter;
pub use stop::StopFilter;
pub use surrogate::SurrogateCharacterFilter;
pub use synonym::SynonymFilter;
pub use trim::TrimFilter;

/// A stage of the term pipeline.
pub trait Filter: Send + Sync + Debug {
    /// Transform the token stream for `locale`.
    fn filter<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a>;

    /// The name of this stage.
    fn name(&self) -> &'static str;
}

/// Replace each token found in `map` by its mapped value.
pub(crate) fn replace_tokens<'a>(tokens: TokenStream<'a>, map: &'a WordMap) -> TokenStream<'a> {
    Box::new(tokens.map(move |token| match map.get(&token.value) {
        Some(replacement) => token.with_value(replacement.as_str()),
        None => token,
    }))
}
