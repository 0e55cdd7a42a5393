//! Splits raw text into tokens.
//!
//! The tokenizer breaks on whitespace and on structural punctuation only.
//! Boundary characters such as `.`, `,`, `-` and `_` stay attached to the
//! token so that the trim stage decides what to strip; this keeps tokens like
//! `e-mail` or `v1.2` intact.

use crate::analysis::token::{Token, TokenStream};

/// Characters (besides whitespace) that separate tokens.
const DELIMITERS: &[char] = &[
    ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '<', '>', '"', '/', '\\', '|',
];

/// Whitespace and punctuation tokenizer.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }

    /// Tokenize `text` lazily.
    pub fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(WordIter { text, offset: 0 })
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

struct WordIter<'a> {
    text: &'a str,
    offset: usize,
}

impl Iterator for WordIter<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.offset..];
        let start = rest.find(|c: char| !is_separator(c))?;
        let word = &rest[start..];
        let len = word.find(is_separator).unwrap_or(word.len());

        let position = self.offset + start;
        self.offset = position + len;
        Some(Token::new(&word[..len], position))
    }
}
