//! Token representation.

use serde::{Deserialize, Serialize};

/// A lexical unit taken from a text field.
///
/// `position` is the byte offset of the token in the source text. Pipeline
/// stages may rewrite `value`, but they never change `position`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The (possibly normalized) text of the token.
    pub value: String,
    /// Byte offset of the token in the source text.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(value: impl Into<String>, position: usize) -> Self {
        Token {
            value: value.into(),
            position,
        }
    }

    /// Replace the value, keeping the position.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        Token {
            value: value.into(),
            position: self.position,
        }
    }

    /// Whether the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A lazy, single-pass, finite sequence of tokens.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;
