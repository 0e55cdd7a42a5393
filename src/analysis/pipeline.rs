//! The term pipeline: raw text to indexable/queryable terms.
//!
//! A [`TermPipeline`] is the single place that decides how text becomes a
//! term. The reverse index runs documents through it when building postings
//! and runs query parameters through the same instance when retrieving, so
//! both sides always agree.
//!
//! The default stage order is:
//!
//! ```text
//! lowercase → normalize → trim → empty → surrogate_character
//!           → misspelled → stop_word → singular → synonym
//! ```
//!
//! Case folding and diacritic removal come first so every table lookup sees
//! normalized words; trimming happens after normalization because NFKD can
//! expose boundary characters (`…` decomposes to `...`); blank tokens left by
//! trimming are dropped before any table is consulted.
//!
//! Among the table stages, corrections run first rather than after
//! singularization: a misspelled stop word (`teh`) is corrected and then
//! dropped, and the singular stage sees corrected spellings. Synonyms run
//! last so they map singular forms.

use std::sync::Arc;

use crate::analysis::locale::Locale;
use crate::analysis::resource::LexicalResources;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{
    EmptyFilter, Filter, LowercaseFilter, MisspelledFilter, NormalizeFilter, SingularFilter,
    StopFilter, SurrogateCharacterFilter, SynonymFilter, TrimFilter,
};
use crate::analysis::tokenizer::WordTokenizer;
use crate::config::IndexContext;
use crate::error::Result;

/// An ordered, immutable composition of pipeline stages.
#[derive(Debug, Clone)]
pub struct TermPipeline {
    tokenizer: WordTokenizer,
    stages: Vec<Arc<dyn Filter>>,
}

impl TermPipeline {
    /// Build the default pipeline over `resources`.
    pub fn new(resources: &LexicalResources) -> Self {
        let stages: Vec<Arc<dyn Filter>> = vec![
            Arc::new(LowercaseFilter::new()),
            Arc::new(NormalizeFilter::new()),
            Arc::new(TrimFilter::new()),
            Arc::new(EmptyFilter::new()),
            Arc::new(SurrogateCharacterFilter::new()),
            Arc::new(MisspelledFilter::new(resources.misspelled_words())),
            Arc::new(StopFilter::new(resources.stop_words())),
            Arc::new(SingularFilter::new(
                resources.irregular_words(),
                resources.regular_words(),
            )),
            Arc::new(SynonymFilter::new(resources.synonyms())),
        ];
        Self::with_stages(stages)
    }

    /// Load resources from the context's directory and build the default
    /// pipeline.
    pub fn from_context(context: &IndexContext) -> Result<Self> {
        let resources = LexicalResources::from_context(context)?;
        Ok(Self::new(&resources))
    }

    /// Build a pipeline from an explicit ordered list of stages.
    pub fn with_stages(stages: Vec<Arc<dyn Filter>>) -> Self {
        TermPipeline {
            tokenizer: WordTokenizer::new(),
            stages,
        }
    }

    /// The names of the stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run already tokenized input through every stage.
    pub fn process<'a>(&'a self, tokens: TokenStream<'a>, locale: &Locale) -> TokenStream<'a> {
        self.stages
            .iter()
            .fold(tokens, |stream, stage| stage.filter(stream, locale))
    }

    /// Tokenize `text` and run it through every stage.
    pub fn analyze<'a>(&'a self, text: &'a str, locale: &Locale) -> TokenStream<'a> {
        self.process(self.tokenizer.tokenize(text), locale)
    }

    /// Collect the normalized terms of `text`.
    pub fn terms(&self, text: &str, locale: &Locale) -> Vec<String> {
        self.analyze(text, locale).map(|token| token.value).collect()
    }

    /// Collect the normalized tokens of `text`.
    pub fn tokens(&self, text: &str, locale: &Locale) -> Vec<Token> {
        self.analyze(text, locale).collect()
    }
}
