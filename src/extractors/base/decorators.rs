// Decorator / annotation capture
//
// `@Component({ providers: [UserService] })` -> name `Component`, args `[UserService]`.
// Only identifier-valued arguments are kept; list and object containers are entered
// up to MAX_ARGUMENT_NESTING levels to find nested identifiers.

use std::collections::BTreeMap;
use tree_sitter::Node;

use super::calls::is_identifier_path;
use super::extractor::BaseExtractor;
use super::traversal::named_children;

pub const MAX_ARGUMENT_NESTING: usize = 3;

const NON_REFERENCES: &[&str] = &[
    "true", "false", "True", "False", "None", "null", "undefined",
];

pub struct DecoratorGrammar {
    /// Call node kind and its callee / argument fields
    pub call_kind: &'static str,
    /// Kinds captured as argument identifiers
    pub reference_kinds: &'static [&'static str],
    /// Kinds entered while looking for identifiers (lists, arrays, objects)
    pub container_kinds: &'static [&'static str],
    /// Key/value kinds and the field holding the value
    pub pair_kinds: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    pub name: String,
    pub args: Vec<String>,
}

impl Decorator {
    /// Last dotted segment: `abc.abstractmethod` -> `abstractmethod`
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// `(names, args)` ready for SymbolMetadata; decorators without captured args are omitted from the map
pub fn metadata_parts(decorators: &[Decorator]) -> (Vec<String>, BTreeMap<String, Vec<String>>) {
    let names = decorators.iter().map(|d| d.name.clone()).collect();
    let args = decorators
        .iter()
        .filter(|d| !d.args.is_empty())
        .map(|d| (d.name.clone(), d.args.clone()))
        .collect();
    (names, args)
}

/// Read one decorator's expression (the part after `@`)
pub fn read_decorator(base: &BaseExtractor, grammar: &DecoratorGrammar, expression: Node) -> Decorator {
    if expression.kind() == grammar.call_kind {
        let name = expression
            .child_by_field_name("function")
            .map(|callee| base.get_node_text(&callee))
            .unwrap_or_default();
        let args = expression
            .child_by_field_name("arguments")
            .map(|arguments| capture_arguments(base, grammar, arguments))
            .unwrap_or_default();
        return Decorator {
            name: compact_name(&name),
            args,
        };
    }
    Decorator {
        name: compact_name(&base.get_node_text(&expression)),
        args: Vec::new(),
    }
}

fn compact_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Identifier arguments of a decorator call, in source order
pub fn capture_arguments(base: &BaseExtractor, grammar: &DecoratorGrammar, arguments: Node) -> Vec<String> {
    let mut captured = Vec::new();
    let mut stack: Vec<(Node, usize)> = named_children(&arguments)
        .into_iter()
        .rev()
        .map(|n| (n, 0))
        .collect();

    while let Some((node, nesting)) = stack.pop() {
        let kind = node.kind();

        if grammar.reference_kinds.contains(&kind) {
            let text = base.get_node_text(&node);
            if is_identifier_path(&text) && !NON_REFERENCES.contains(&text.as_str()) {
                captured.push(text);
            }
            continue;
        }

        if let Some((_, field)) = grammar.pair_kinds.iter().find(|(pair, _)| *pair == kind) {
            if let Some(value) = node.child_by_field_name(field) {
                stack.push((value, nesting));
            }
            continue;
        }

        if grammar.container_kinds.contains(&kind) && nesting < MAX_ARGUMENT_NESTING {
            for child in named_children(&node).into_iter().rev() {
                stack.push((child, nesting + 1));
            }
        }
    }

    captured
}
