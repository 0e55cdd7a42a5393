//! Error types for Sift.
//!
//! All fallible operations in the crate return [`Result<T>`], whose error side
//! is [`SiftError`]. Errors fall into two groups:
//!
//! - **Construction-time**: resource files that cannot be read or parsed,
//!   unknown operators or functions while a tree is assembled.
//! - **Evaluation-time**: a parameter that cannot be coerced to, or compared
//!   with, the attribute's value.
//!
//! A missing reverse index is deliberately not represented here; conditions
//! without an index fall back to scanning candidates.

use thiserror::Error;

/// The error type for analysis and query evaluation.
#[derive(Error, Debug)]
pub enum SiftError {
    /// I/O error while reading resources or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A lexical resource file is unreadable or malformed.
    #[error("Resource load error: {0}")]
    ResourceLoad(String),

    /// No implementation is registered for an operator symbol.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// No implementation is registered for a function name.
    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),

    /// A parameter cannot be coerced to or compared with an attribute value.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SiftError {
    /// Create a resource load error.
    pub fn resource_load(msg: impl Into<String>) -> Self {
        SiftError::ResourceLoad(msg.into())
    }

    /// Create an unsupported operator error.
    pub fn unsupported_operator(symbol: impl Into<String>) -> Self {
        SiftError::UnsupportedOperator(symbol.into())
    }

    /// Create an unsupported function error.
    pub fn unsupported_function(name: impl Into<String>) -> Self {
        SiftError::UnsupportedFunction(name.into())
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        SiftError::TypeMismatch(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        SiftError::InvalidArgument(msg.into())
    }

    /// Returns true if this error was raised while evaluating a tree rather
    /// than while building one.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(self, SiftError::TypeMismatch(_))
    }
}

/// Result type alias for Sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SiftError::resource_load("stopwords.en: unreadable");
        assert_eq!(err.to_string(), "Resource load error: stopwords.en: unreadable");

        let err = SiftError::unsupported_operator("<>");
        assert_eq!(err.to_string(), "Unsupported operator: <>");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SiftError = io.into();
        assert!(matches!(err, SiftError::Io(_)));
        assert!(!err.is_evaluation_error());
        assert!(SiftError::type_mismatch("x").is_evaluation_error());
    }
}
