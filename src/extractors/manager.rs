//! ExtractorManager - extension-keyed entry point over the front ends
//!
//! Holds one front end per language, all built from the same [`ParserConfig`]. Front
//! ends carry configuration only, so a manager can be shared freely across threads.

use std::collections::HashMap;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::language::Language;

use super::base::ParseResult;
use super::frontend::FrontEnd;
use super::javascript::JavaScriptFrontEnd;
use super::python::PythonFrontEnd;
use super::typescript::TypeScriptFrontEnd;

/// Registry of front ends by file extension
pub struct ExtractorManager {
    front_ends: HashMap<Language, Box<dyn FrontEnd>>,
    by_extension: HashMap<&'static str, Language>,
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl ExtractorManager {
    pub fn new(config: ParserConfig) -> Self {
        let mut manager = Self {
            front_ends: HashMap::new(),
            by_extension: HashMap::new(),
        };
        manager.register(Box::new(PythonFrontEnd::new(config.clone())));
        manager.register(Box::new(TypeScriptFrontEnd::new(config.clone())));
        manager.register(Box::new(JavaScriptFrontEnd::new(config)));
        manager
    }

    /// Add (or replace) the front end for its language
    pub fn register(&mut self, front_end: Box<dyn FrontEnd>) {
        let language = front_end.language();
        for &extension in front_end.extensions() {
            self.by_extension.insert(extension, language);
        }
        self.front_ends.insert(language, front_end);
    }

    /// Registered languages, in a stable order
    pub fn supported_languages(&self) -> Vec<Language> {
        Language::all()
            .iter()
            .copied()
            .filter(|language| self.front_ends.contains_key(language))
            .collect()
    }

    /// Front end responsible for a path, by its extension
    pub fn front_end_for(&self, file_path: &str) -> Option<&dyn FrontEnd> {
        let file_name = file_path.rsplit(['/', '\\']).next()?;
        let (stem, extension) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        let language = self.by_extension.get(extension.to_ascii_lowercase().as_str())?;
        self.front_ends.get(language).map(|f| f.as_ref())
    }

    /// Parse one file with the front end its extension selects
    pub fn parse_file(
        &self,
        cancel: &CancellationToken,
        content: &[u8],
        file_path: &str,
    ) -> Result<ParseResult, ParseError> {
        let front_end = self
            .front_end_for(file_path)
            .ok_or_else(|| ParseError::UnsupportedLanguage(file_path.to_string()))?;
        front_end.parse(cancel, content, file_path)
    }

    /// Parse many `(file_path, content)` pairs in parallel
    ///
    /// Results come back in input order; one failing file does not affect the others.
    pub fn parse_batch(
        &self,
        cancel: &CancellationToken,
        files: &[(String, Vec<u8>)],
    ) -> Vec<Result<ParseResult, ParseError>> {
        let results: Vec<Result<ParseResult, ParseError>> = files
            .par_iter()
            .map(|(file_path, content)| self.parse_file(cancel, content, file_path))
            .collect();

        debug!(
            files = files.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch parse complete"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_languages() {
        let manager = ExtractorManager::default();
        assert_eq!(
            manager.supported_languages(),
            vec![Language::Python, Language::TypeScript, Language::JavaScript]
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let manager = ExtractorManager::default();
        let result = manager.parse_file(&CancellationToken::new(), b"fn main() {}", "main.rs");
        assert!(matches!(result, Err(ParseError::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_front_end_selection() {
        let manager = ExtractorManager::default();
        let front_end = manager.front_end_for("src/App.tsx").map(|f| f.language());
        assert_eq!(front_end, Some(Language::TypeScript));
        assert!(manager.front_end_for("README").is_none());
    }
}
