// Call-site mining
//
// Walks one executable body, stopping at nested definitions (they own their calls),
// and turns every call-shaped node into a CallSite. The grammar-specific parts live
// behind `CallSyntax`; everything else is shared by all front ends.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;
use tree_sitter::Node;

use crate::error::ParseError;

use super::extractor::BaseExtractor;
use super::traversal::named_children;
use super::types::CallSite;

/// `name`, `obj.attr`, `this.handlers.onClose`
static IDENTIFIER_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// Identifier-shaped literals that never count as callback arguments
const LITERAL_NAMES: &[&str] = &[
    "true",
    "false",
    "True",
    "False",
    "null",
    "undefined",
    "None",
    "NaN",
    "Infinity",
];

const ARGUMENT_KINDS: &[&str] = &["identifier", "attribute", "member_expression"];

/// Longest receiver text kept verbatim
const MAX_RECEIVER_CHARS: usize = 200;

/// How a node inside an executable body relates to call mining
pub enum CallShape<'t> {
    Call {
        callee: Node<'t>,
        arguments: Option<Node<'t>>,
    },
    Instantiation {
        constructor: Node<'t>,
        arguments: Option<Node<'t>>,
    },
    /// A nested definition; its body belongs to another symbol
    ScopeBoundary,
    Other,
}

/// Grammar-specific call shapes
pub trait CallSyntax {
    fn classify<'t>(&self, node: &Node<'t>) -> CallShape<'t>;

    /// Split a member/attribute callee into `(object, property)`
    fn split_member<'t>(&self, callee: &Node<'t>) -> Option<(Node<'t>, Node<'t>)>;

    /// Canonical receiver for supertype delegation (`super(X, self).m()` -> `super`)
    fn normalize_receiver(&self, _base: &BaseExtractor, _object: &Node) -> Option<String> {
        None
    }

    /// Value expression of one argument (unwraps keyword arguments)
    fn argument_value<'t>(&self, argument: Node<'t>) -> Option<Node<'t>> {
        Some(argument)
    }

    /// Type names narrowed by a runtime check rooted at this node
    fn narrowed_types(&self, _base: &BaseExtractor, _node: &Node) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Default)]
pub struct MinedBody {
    pub calls: Vec<CallSite>,
    pub narrowed_types: Vec<String>,
}

/// Mine every call in `body` on behalf of the symbol named `owner`
pub fn mine_calls<S: CallSyntax>(
    base: &mut BaseExtractor,
    syntax: &S,
    body: Node<'_>,
    owner: &str,
) -> Result<MinedBody, ParseError> {
    let cap = base.limits.max_calls_per_symbol;
    let mut mined = MinedBody::default();
    let mut stack = vec![(body, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        base.tick()?;

        let site = match syntax.classify(&node) {
            CallShape::ScopeBoundary if depth > 0 => continue,
            CallShape::Call { callee, arguments } => call_site(base, syntax, &node, callee, arguments),
            CallShape::Instantiation {
                constructor,
                arguments,
            } => instantiation_site(base, syntax, &node, constructor, arguments),
            _ => None,
        };

        if let Some(site) = site {
            if mined.calls.len() >= cap {
                warn!(
                    file = %base.file_path,
                    symbol = owner,
                    cap,
                    "call-site limit reached; remaining calls discarded"
                );
                base.push_diagnostic(format!(
                    "call-site limit ({}) reached in symbol `{}`",
                    cap, owner
                ));
                break;
            }
            mined.calls.push(site);
        }

        for name in syntax.narrowed_types(base, &node) {
            if !mined.narrowed_types.contains(&name) {
                mined.narrowed_types.push(name);
            }
        }

        if !base.admit_depth(depth + 1) {
            continue;
        }
        for child in named_children(&node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(mined)
}

fn call_site<S: CallSyntax>(
    base: &BaseExtractor,
    syntax: &S,
    call: &Node,
    callee: Node,
    arguments: Option<Node>,
) -> Option<CallSite> {
    let (target, receiver, is_method) = match syntax.split_member(&callee) {
        Some((object, property)) => {
            let receiver = syntax
                .normalize_receiver(base, &object)
                .unwrap_or_else(|| compact_text(&base.get_node_text(&object)));
            (base.get_node_text(&property), receiver, true)
        }
        None => {
            let text = base.get_node_text(&callee);
            if !IDENTIFIER_PATH.is_match(&text) || text.contains('.') {
                return None;
            }
            (text, String::new(), false)
        }
    };
    if target.is_empty() {
        return None;
    }
    Some(CallSite {
        target,
        receiver,
        is_method,
        function_args: function_args(base, syntax, arguments),
        location: base.location(call),
    })
}

fn instantiation_site<S: CallSyntax>(
    base: &BaseExtractor,
    syntax: &S,
    expression: &Node,
    constructor: Node,
    arguments: Option<Node>,
) -> Option<CallSite> {
    let target = match syntax.split_member(&constructor) {
        Some((_, property)) => base.get_node_text(&property),
        None => {
            let text = base.get_node_text(&constructor);
            let leaf = text.rsplit('.').next().unwrap_or_default().trim();
            if !IDENTIFIER_PATH.is_match(leaf) {
                return None;
            }
            leaf.to_string()
        }
    };
    Some(CallSite {
        target,
        receiver: String::new(),
        is_method: false,
        function_args: function_args(base, syntax, arguments),
        location: base.location(expression),
    })
}

/// Identifier-like arguments, in order; literals and complex expressions are skipped
fn function_args<S: CallSyntax>(
    base: &BaseExtractor,
    syntax: &S,
    arguments: Option<Node>,
) -> Vec<String> {
    let Some(arguments) = arguments else {
        return Vec::new();
    };
    named_children(&arguments)
        .into_iter()
        .filter_map(|arg| syntax.argument_value(arg))
        .filter(|value| ARGUMENT_KINDS.contains(&value.kind()))
        .map(|value| base.get_node_text(&value))
        .filter(|text| IDENTIFIER_PATH.is_match(text) && !LITERAL_NAMES.contains(&text.as_str()))
        .collect()
}

/// Collapse whitespace and clip very long receiver expressions
pub fn compact_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_RECEIVER_CHARS {
        collapsed
    } else {
        collapsed.chars().take(MAX_RECEIVER_CHARS).collect::<String>() + "..."
    }
}

/// First line of a value expression, clipped for display in a signature
pub fn clip_value(text: &str) -> String {
    const MAX_VALUE_CHARS: usize = 80;
    let first_line = text.lines().next().unwrap_or_default().trim_end();
    let clipped: String = first_line.chars().take(MAX_VALUE_CHARS).collect();
    if clipped.len() < text.trim_end().len() {
        format!("{}...", clipped)
    } else {
        clipped
    }
}

/// Whether `text` is a plain identifier or dotted identifier path
pub fn is_identifier_path(text: &str) -> bool {
    IDENTIFIER_PATH.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_path_shapes() {
        assert!(is_identifier_path("handler"));
        assert!(is_identifier_path("this.onClose"));
        assert!(is_identifier_path("$scope.apply"));
        assert!(!is_identifier_path("a[0]"));
        assert!(!is_identifier_path("foo()"));
        assert!(!is_identifier_path("'x'"));
        assert!(!is_identifier_path("1e3"));
    }

    #[test]
    fn test_compact_text() {
        assert_eq!(compact_text("a\n    .b()"), "a .b()");
        let long = "x".repeat(500);
        assert_eq!(compact_text(&long).chars().count(), MAX_RECEIVER_CHARS + 3);
    }

    #[test]
    fn test_clip_value() {
        assert_eq!(clip_value("42"), "42");
        assert_eq!(clip_value("{\n  'a': 1\n}"), "{...");
    }
}
