// Type-reference mining
//
// Collects user-defined type names from annotation subtrees. Built-in and standard
// container names are filtered per language, qualified names keep only their leaf,
// and duplicates are dropped within one annotation (not across a symbol).

use std::collections::HashSet;
use tracing::warn;
use tree_sitter::Node;

use crate::error::ParseError;

use super::extractor::BaseExtractor;
use super::traversal::named_children;
use super::types::TypeReference;

/// Grammar tables for one language's annotation syntax
pub struct TypeGrammar {
    /// Leaf kinds that name a type (`identifier`, `type_identifier`)
    pub name_kinds: &'static [&'static str],
    /// Qualified forms and the field holding their leaf name
    pub qualified_kinds: &'static [(&'static str, &'static str)],
    /// Kinds whose subtree never contains type names
    pub opaque_kinds: &'static [&'static str],
    /// Kinds whose named children are generic type arguments
    pub argument_list_kinds: &'static [&'static str],
    pub builtins: &'static [&'static str],
}

impl TypeGrammar {
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(&name)
    }
}

/// Accumulates type references for one symbol across all of its annotations
pub struct TypeRefCollector<'g> {
    grammar: &'g TypeGrammar,
    owner: String,
    refs: Vec<TypeReference>,
    generic_args: Vec<String>,
    truncated: bool,
}

impl<'g> TypeRefCollector<'g> {
    pub fn new(grammar: &'g TypeGrammar, owner: &str) -> Self {
        Self {
            grammar,
            owner: owner.to_string(),
            refs: Vec::new(),
            generic_args: Vec::new(),
            truncated: false,
        }
    }

    /// Mine one annotation node (parameter, return, field or variable type)
    pub fn collect(&mut self, base: &mut BaseExtractor, annotation: Node<'_>) -> Result<(), ParseError> {
        let cap = base.limits.max_type_refs_per_symbol;
        let mut seen: HashSet<String> = HashSet::new();
        let mut stack = vec![(annotation, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            base.tick()?;
            let kind = node.kind();

            if self.grammar.opaque_kinds.contains(&kind) {
                continue;
            }

            if self.grammar.argument_list_kinds.contains(&kind) {
                for argument in named_children(&node) {
                    let text = base.get_node_text(&argument);
                    if !text.is_empty() && !self.generic_args.contains(&text) {
                        self.generic_args.push(text);
                    }
                }
            }

            let leaf = if self.grammar.name_kinds.contains(&kind) {
                Some(node)
            } else {
                self.grammar
                    .qualified_kinds
                    .iter()
                    .find(|(qualified, _)| *qualified == kind)
                    .map(|(_, field)| {
                        node.child_by_field_name(field)
                            .or_else(|| named_children(&node).pop())
                    })
                    .map(|leaf| leaf.unwrap_or(node))
            };

            if let Some(leaf) = leaf {
                let name = base.get_node_text(&leaf);
                if !name.is_empty() && !self.grammar.is_builtin(&name) && seen.insert(name.clone()) {
                    if self.refs.len() >= cap {
                        self.note_truncation(base, cap);
                        return Ok(());
                    }
                    self.refs.push(TypeReference {
                        name,
                        location: base.location(&leaf),
                    });
                }
                continue;
            }

            if !base.admit_depth(depth + 1) {
                continue;
            }
            for child in named_children(&node).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }

    fn note_truncation(&mut self, base: &mut BaseExtractor, cap: usize) {
        if self.truncated {
            return;
        }
        self.truncated = true;
        warn!(
            file = %base.file_path,
            symbol = %self.owner,
            cap,
            "type-reference limit reached; remaining references discarded"
        );
        base.push_diagnostic(format!(
            "type-reference limit ({}) reached in symbol `{}`",
            cap, self.owner
        ));
    }

    /// `(type_references, generic_args)`
    pub fn finish(self) -> (Vec<TypeReference>, Vec<String>) {
        (self.refs, self.generic_args)
    }
}
