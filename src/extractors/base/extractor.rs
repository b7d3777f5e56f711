// BaseExtractor: per-file state shared by every front end
//
// Owns the source text, the symbol arena, collected imports, diagnostics and the
// traversal budget. One instance lives for exactly one `parse` call.

use tokio_util::sync::CancellationToken;
use tracing::warn;
use tree_sitter::Node;

use crate::config::ExtractionLimits;
use crate::error::ParseError;
use crate::language::Language;
use crate::utils::symbol_id;

use super::arena::SymbolArena;
use super::traversal::TraversalBudget;
use super::types::{Import, Location};

/// Node kinds that only wrap a declaration; doc comments sit in front of the wrapper
const DECLARATION_WRAPPERS: &[&str] = &[
    "decorated_definition",
    "export_statement",
    "ambient_declaration",
    "lexical_declaration",
    "variable_declaration",
    "variable_declarator",
    "expression_statement",
    "assignment_expression",
    "assignment",
];

/// Everything one extraction produced, before tree assembly
#[derive(Debug)]
pub struct Extraction {
    pub arena: SymbolArena,
    pub imports: Vec<Import>,
    pub diagnostics: Vec<String>,
    /// CST nodes touched by the walk and the miners
    pub visited_nodes: usize,
}

pub struct BaseExtractor {
    pub language: Language,
    pub file_path: String,
    pub content: String,
    pub limits: ExtractionLimits,
    pub arena: SymbolArena,
    pub imports: Vec<Import>,
    pub diagnostics: Vec<String>,
    budget: TraversalBudget,
}

impl BaseExtractor {
    pub fn new(
        language: Language,
        file_path: String,
        content: String,
        limits: ExtractionLimits,
        cancel: CancellationToken,
    ) -> Self {
        let budget = TraversalBudget::new(cancel, limits.cancel_check_interval, limits.max_depth);
        Self {
            language,
            file_path,
            content,
            limits,
            arena: SymbolArena::new(),
            imports: Vec::new(),
            diagnostics: Vec::new(),
            budget,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        self.content
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
            .to_string()
    }

    /// Text of a named field, if present
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field| self.get_node_text(&field))
    }

    pub fn location(&self, node: &Node) -> Location {
        let start = node.start_position();
        let end = node.end_position();
        Location {
            file_path: self.file_path.clone(),
            start_line: (start.row + 1) as u32,
            end_line: (end.row + 1) as u32,
            start_col: start.column as u32,
            end_col: end.column as u32,
            start_byte: node.start_byte() as u32,
            end_byte: node.end_byte() as u32,
        }
    }

    /// Symbol ID for a declaration starting at `node`
    pub fn generate_id(&self, name: &str, node: &Node) -> String {
        symbol_id(&self.file_path, (node.start_position().row + 1) as u32, name)
    }

    /// Leading comment block for a declaration
    ///
    /// Walks contiguous comment siblings in front of the node, climbing through pure
    /// wrapper nodes (`export`, decorators, declarators) when the node itself has none.
    pub fn find_doc_comment(&self, node: &Node) -> Option<String> {
        let mut current = *node;
        loop {
            let comments = self.leading_comments(&current);
            if !comments.is_empty() {
                return Some(comments.join("\n"));
            }
            match current.parent() {
                Some(parent) if DECLARATION_WRAPPERS.contains(&parent.kind()) => current = parent,
                _ => return None,
            }
        }
    }

    fn leading_comments(&self, node: &Node) -> Vec<String> {
        let mut comments = Vec::new();
        let mut anchor_row = node.start_position().row;
        let mut current = node.prev_named_sibling();
        while let Some(sibling) = current {
            if sibling.kind() != "comment" || sibling.end_position().row + 1 < anchor_row {
                break;
            }
            let text = self.get_node_text(&sibling);
            if !self.is_doc_comment(&text) {
                break;
            }
            comments.push(text.trim_end().to_string());
            anchor_row = sibling.start_position().row;
            current = sibling.prev_named_sibling();
        }
        comments.reverse();
        comments
    }

    fn is_doc_comment(&self, text: &str) -> bool {
        let trimmed = text.trim_start();
        match self.language {
            Language::Python => trimmed.starts_with('#') && !trimmed.starts_with("#!"),
            Language::TypeScript | Language::JavaScript => {
                trimmed.starts_with("/**") || trimmed.starts_with("//")
            }
        }
    }

    /// Count one visited node; checks cancellation every `cancel_check_interval` nodes
    pub fn tick(&mut self) -> Result<(), ParseError> {
        self.budget.tick()
    }

    /// Whether a node at `depth` may be followed; records the first truncation
    pub fn admit_depth(&mut self, depth: usize) -> bool {
        if self.budget.admits(depth) {
            return true;
        }
        if self.budget.note_truncation() {
            warn!(
                file = %self.file_path,
                max_depth = self.limits.max_depth,
                "nesting depth limit reached; deeper nodes skipped"
            );
            self.diagnostics.push(format!(
                "nesting depth limit ({}) reached; deeper nodes skipped",
                self.limits.max_depth
            ));
        }
        false
    }

    pub fn push_diagnostic(&mut self, message: String) {
        self.diagnostics.push(message);
    }

    pub fn finish(self) -> Extraction {
        Extraction {
            visited_nodes: self.budget.visited(),
            arena: self.arena,
            imports: self.imports,
            diagnostics: self.diagnostics,
        }
    }
}
