use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::locale::Locale;
use crate::error::Result;

/// Construction context for pipelines and query trees.
///
/// Carries the directory holding the lexical resource files and the locale
/// used when a caller does not name one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexContext {
    /// Directory containing `<kind>.<code>` resource files.
    pub resource_dir: PathBuf,
    /// Locale used when none is given per call.
    #[serde(default)]
    pub default_locale: Locale,
}

impl IndexContext {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            default_locale: Locale::default(),
        }
    }

    pub fn builder() -> IndexContextBuilder {
        IndexContextBuilder::default()
    }

    /// Load a context from a JSON file.
    ///
    /// A relative `resource_dir` is resolved against the directory of the
    /// configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut context: IndexContext = serde_json::from_str(&content)?;
        if context.resource_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            context.resource_dir = parent.join(&context.resource_dir);
        }
        Ok(context)
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }
}

impl Default for IndexContext {
    fn default() -> Self {
        Self::new("resources")
    }
}

#[derive(Default)]
pub struct IndexContextBuilder {
    resource_dir: Option<PathBuf>,
    default_locale: Option<Locale>,
}

impl IndexContextBuilder {
    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    pub fn default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn build(self) -> IndexContext {
        let mut context = IndexContext::default();
        if let Some(dir) = self.resource_dir {
            context.resource_dir = dir;
        }
        if let Some(locale) = self.default_locale {
            context.default_locale = locale;
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let context = IndexContext::builder()
            .resource_dir("/srv/lexicon")
            .default_locale("de_DE")
            .build();
        assert_eq!(context.resource_dir(), Path::new("/srv/lexicon"));
        assert_eq!(context.default_locale().as_str(), "de-de");
    }

    #[test]
    fn test_defaults() {
        let context = IndexContext::default();
        assert_eq!(context.resource_dir(), Path::new("resources"));
        assert_eq!(context.default_locale(), &Locale::default());
    }

    #[test]
    fn test_from_json_file_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sift.json");
        fs::write(&path, r#"{ "resource_dir": "lexicon", "default_locale": "fr" }"#).unwrap();

        let context = IndexContext::from_json_file(&path).unwrap();
        assert_eq!(context.resource_dir(), dir.path().join("lexicon"));
        assert_eq!(context.default_locale().as_str(), "fr");
    }

    #[test]
    fn test_from_json_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sift.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            IndexContext::from_json_file(&path),
            Err(crate::error::SiftError::Json(_))
        ));
    }
}
