// Symbol and import construction for BaseExtractor

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::types::{Import, Symbol, SymbolKind, SymbolMetadata, TypeReference, CallSite};

/// Everything about a symbol the front end knows at declaration time
#[derive(Debug, Clone, Default)]
pub struct SymbolOptions {
    pub exported: bool,
    pub signature: Option<String>,
    /// Explicit doc text (Python docstrings); leading comments are used otherwise
    pub doc_comment: Option<String>,
    pub receiver: Option<String>,
    pub calls: Vec<CallSite>,
    pub type_references: Vec<TypeReference>,
    pub metadata: SymbolMetadata,
}

impl BaseExtractor {
    /// Build a symbol anchored at `node`
    pub fn create_symbol(
        &self,
        node: &Node,
        name: String,
        kind: SymbolKind,
        options: SymbolOptions,
    ) -> Symbol {
        let id = self.generate_id(&name, node);
        Symbol {
            id,
            name,
            kind,
            language: self.language,
            exported: options.exported,
            signature: options.signature.unwrap_or_default(),
            doc_comment: options.doc_comment.or_else(|| self.find_doc_comment(node)),
            location: self.location(node),
            receiver: options.receiver.unwrap_or_default(),
            children: Vec::new(),
            calls: options.calls,
            type_references: options.type_references,
            metadata: options.metadata.into_option(),
        }
    }

    /// Build a symbol and store it under `parent`, returning its arena index
    pub fn add_symbol(
        &mut self,
        node: &Node,
        name: String,
        kind: SymbolKind,
        options: SymbolOptions,
        parent: Option<usize>,
    ) -> usize {
        let symbol = self.create_symbol(node, name, kind, options);
        self.arena.push(symbol, parent)
    }

    /// Record an import anchored at `node`
    pub fn add_import(&mut self, node: &Node, import: Import) {
        if import.path.is_empty() {
            return;
        }
        let location = Some(self.location(node));
        self.imports.push(Import { location, ..import });
    }
}
