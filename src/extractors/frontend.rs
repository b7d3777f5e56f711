//! FrontEnd - the per-language parse contract and its shared pipeline
//!
//! A front end is configuration only. `parse` builds a fresh tree-sitter parser per
//! call, so one front end can be shared across threads without locking.
//!
//! Pipeline order:
//! 1. cancellation, size and UTF-8 checks (no parsing work yet)
//! 2. content hash over the raw bytes
//! 3. grammar engine -> CST, then a second cancellation check
//! 4. syntax diagnostics, language extraction, tree assembly, private-symbol filter
//! 5. structural validation, then a final cancellation check

use std::time::Instant;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tree_sitter::{Parser, Tree};

use crate::config::ParserConfig;
use crate::error::{CancelPhase, ParseError};
use crate::language::{dialect_for_path, get_tree_sitter_language, Language};
use crate::utils::hash_content;
use crate::validation::validate_result;

use super::base::traversal::syntax_diagnostics;
use super::base::{BaseExtractor, Extraction, ParseResult, Symbol};

pub trait FrontEnd: Send + Sync {
    fn language(&self) -> Language;

    fn config(&self) -> &ParserConfig;

    /// Map the CST onto the IR
    fn extract(&self, base: BaseExtractor, tree: &Tree) -> Result<Extraction, ParseError>;

    /// File extensions this front end accepts
    fn extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    fn parse(
        &self,
        cancel: &CancellationToken,
        content: &[u8],
        file_path: &str,
    ) -> Result<ParseResult, ParseError> {
        let started = Instant::now();
        let config = self.config();
        let language = self.language();

        if cancel.is_cancelled() {
            return Err(ParseError::Cancelled(CancelPhase::BeforeStart));
        }
        if content.len() > config.max_file_size {
            return Err(ParseError::FileTooLarge {
                size: content.len(),
                max: config.max_file_size,
            });
        }
        let text = std::str::from_utf8(content).map_err(ParseError::InvalidContent)?;
        let hash = hash_content(content);

        let tree = build_tree(language, text, file_path)?;
        if cancel.is_cancelled() {
            return Err(ParseError::Cancelled(CancelPhase::AfterSyntaxTree));
        }

        let root = tree.root_node();
        let mut errors = Vec::new();
        if root.has_error() {
            errors = syntax_diagnostics(root, config.limits.max_depth);
            warn!(
                file = file_path,
                count = errors.len(),
                "syntax errors present; extracting best-effort symbols"
            );
        }

        let mut visited_nodes = 0;
        let (symbols, imports) = if root.kind() == "ERROR" {
            errors.push("syntax tree root is unusable; no symbols extracted".to_string());
            (Vec::new(), Vec::new())
        } else {
            let base = BaseExtractor::new(
                language,
                file_path.to_string(),
                text.to_string(),
                config.limits.clone(),
                cancel.clone(),
            );
            let extraction = self.extract(base, &tree)?;
            errors.extend(extraction.diagnostics);
            visited_nodes = extraction.visited_nodes;
            let mut symbols = extraction.arena.into_tree()?;
            if !config.options.include_private {
                retain_exported(&mut symbols);
            }
            (symbols, extraction.imports)
        };

        let result = ParseResult {
            file_path: file_path.to_string(),
            language,
            hash,
            parsed_at: Utc::now(),
            symbols,
            imports,
            errors,
        };

        // symbols can nest at most one level per admitted CST level
        validate_result(&result, config.limits.max_depth + 1)?;
        if cancel.is_cancelled() {
            return Err(ParseError::Cancelled(CancelPhase::AfterExtraction));
        }

        debug!(
            file = file_path,
            language = %language,
            symbols = result.symbols.len(),
            imports = result.imports.len(),
            diagnostics = result.errors.len(),
            visited_nodes,
            elapsed_us = started.elapsed().as_micros() as u64,
            "extraction complete"
        );
        Ok(result)
    }
}

/// Run the grammar engine once with a fresh parser
fn build_tree(language: Language, text: &str, file_path: &str) -> Result<Tree, ParseError> {
    let engine_error = |source: anyhow::Error| ParseError::Engine {
        file_path: file_path.to_string(),
        source,
    };

    let grammar = get_tree_sitter_language(dialect_for_path(language, file_path))
        .map_err(engine_error)?;
    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .map_err(|e| engine_error(anyhow::anyhow!("Failed to set parser language: {}", e)))?;
    parser
        .parse(text, None)
        .ok_or_else(|| engine_error(anyhow::anyhow!("Failed to parse file: {}", file_path)))
}

/// Drop non-exported symbols (and everything under them) at every level
fn retain_exported(symbols: &mut Vec<Symbol>) {
    let mut stack: Vec<&mut Vec<Symbol>> = vec![symbols];
    while let Some(list) = stack.pop() {
        list.retain(|symbol| symbol.exported);
        for symbol in list {
            stack.push(&mut symbol.children);
        }
    }
}
