//! Language Support - tree-sitter grammar selection
//!
//! Every grammar lookup goes through here. The file extension only picks the grammar
//! dialect (`.tsx` gets the TSX grammar, `.jsx` the JavaScript grammar with JSX); the
//! path is never opened.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
        }
    }

    /// File extensions (without the dot) handled by this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyi"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::Python, Language::TypeScript, Language::JavaScript]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the tree-sitter grammar for a dialect name
///
/// Dialects are finer than [`Language`]: TypeScript splits into `typescript` and `tsx`.
pub fn get_tree_sitter_language(dialect: &str) -> Result<tree_sitter::Language> {
    match dialect {
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        "typescript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "javascript" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported grammar dialect: '{}'. Supported dialects: python, typescript, tsx, javascript, jsx",
            dialect
        )),
    }
}

/// Detect language from file extension
pub fn detect_language_from_extension(extension: &str) -> Option<Language> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    Language::all()
        .iter()
        .copied()
        .find(|language| language.extensions().contains(&extension.as_str()))
}

/// Detect language from a forward-slash path
pub fn detect_language_from_path(file_path: &str) -> Option<Language> {
    extension_of(file_path).and_then(detect_language_from_extension)
}

/// Grammar dialect for a file of the given language
pub fn dialect_for_path(language: Language, file_path: &str) -> &'static str {
    let extension = extension_of(file_path).map(str::to_ascii_lowercase);
    match (language, extension.as_deref()) {
        (Language::TypeScript, Some("tsx")) => "tsx",
        (Language::JavaScript, Some("jsx")) => "jsx",
        (language, _) => language.as_str(),
    }
}

fn extension_of(file_path: &str) -> Option<&str> {
    let file_name = file_path.rsplit('/').next()?;
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(detect_language_from_extension("py"), Some(Language::Python));
        assert_eq!(detect_language_from_extension(".TSX"), Some(Language::TypeScript));
        assert_eq!(detect_language_from_extension("cjs"), Some(Language::JavaScript));
        assert_eq!(detect_language_from_extension("rs"), None);
    }

    #[test]
    fn test_path_detection_ignores_dotfiles() {
        assert_eq!(
            detect_language_from_path("lib/router/index.js"),
            Some(Language::JavaScript)
        );
        assert_eq!(detect_language_from_path("config/.py"), None);
        assert_eq!(detect_language_from_path("Makefile"), None);
    }

    #[test]
    fn test_tsx_dialect_selected_by_extension() {
        assert_eq!(dialect_for_path(Language::TypeScript, "src/App.tsx"), "tsx");
        assert_eq!(dialect_for_path(Language::TypeScript, "src/app.ts"), "typescript");
        assert_eq!(dialect_for_path(Language::Python, "tsx.py"), "python");
    }

    #[test]
    fn test_every_dialect_loads() {
        for dialect in ["python", "typescript", "tsx", "javascript", "jsx"] {
            assert!(
                get_tree_sitter_language(dialect).is_ok(),
                "grammar for {} should load",
                dialect
            );
        }
        assert!(get_tree_sitter_language("cobol").is_err());
    }
}
