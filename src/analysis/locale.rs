//! Locale identifiers and the lookup fallback chain.
//!
//! A [`Locale`] is a lower-cased language tag such as `en`, `en-us` or
//! `de-ch`. Underscores are accepted on input (`de_DE`) and normalized to `-`.
//! Per-locale resources are resolved in the order
//! exact tag → language-only tag → [`DEFAULT_LOCALE`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};

/// The locale used when neither the exact tag nor its language resolves.
pub const DEFAULT_LOCALE: &str = "en";

/// A normalized language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a tag. An empty tag yields the default locale.
    pub fn new(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            return Locale(DEFAULT_LOCALE.to_string());
        }
        Locale(tag.replace('_', "-").to_lowercase())
    }

    /// The normalized tag, e.g. `en-us`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language part of the tag, e.g. `en` for `en-us`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Whether the tag carries only a language.
    pub fn is_language_only(&self) -> bool {
        !self.0.contains('-')
    }

    /// Keys to try, in order, when resolving a per-locale table.
    pub fn fallback_chain(&self) -> [&str; 3] {
        [self.as_str(), self.language(), DEFAULT_LOCALE]
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        let valid = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if s.trim().is_empty() || !valid {
            return Err(SiftError::invalid_argument(format!(
                "invalid locale tag '{s}'"
            )));
        }
        Ok(Locale::new(s))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let locale = Locale::new("de_DE");
        assert_eq!(locale.as_str(), "de-de");
        assert_eq!(locale.language(), "de");
        assert!(!locale.is_language_only());
        assert!(Locale::new("fr").is_language_only());
    }

    #[test]
    fn test_empty_tag_is_default() {
        assert_eq!(Locale::new("  "), Locale::default());
        assert_eq!(Locale::default().as_str(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_fallback_chain() {
        let locale = Locale::new("en-GB");
        assert_eq!(locale.fallback_chain(), ["en-gb", "en", "en"]);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("en-US".parse::<Locale>().is_ok());
        assert!("".parse::<Locale>().is_err());
        assert!("en US".parse::<Locale>().is_err());
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let json = serde_json::to_string(&Locale::new("de-AT")).unwrap();
        assert_eq!(json, "\"de-at\"");
        let locale: Locale = serde_json::from_str("\"FR_ca\"").unwrap();
        assert_eq!(locale.as_str(), "fr-ca");
    }
}
