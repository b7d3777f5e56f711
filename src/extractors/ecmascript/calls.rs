/// TypeScript / JavaScript call syntax for the shared call-site miner
use tree_sitter::Node;

use crate::extractors::base::{BaseExtractor, CallShape, CallSyntax};
use crate::utils::naming::base_type_name;

/// Declarations that own their calls; arrow functions and function expressions do not
const SCOPE_BOUNDARIES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "class_declaration",
    "abstract_class_declaration",
    "class",
    "method_definition",
];

pub(crate) struct EcmaCallSyntax;

impl CallSyntax for EcmaCallSyntax {
    fn classify<'t>(&self, node: &Node<'t>) -> CallShape<'t> {
        match node.kind() {
            // `import("x")` is a dynamic import, not a call
            "call_expression" => match node.child_by_field_name("function") {
                Some(callee) if callee.kind() != "import" => CallShape::Call {
                    callee,
                    arguments: node.child_by_field_name("arguments"),
                },
                _ => CallShape::Other,
            },
            "new_expression" => match node.child_by_field_name("constructor") {
                Some(constructor) => CallShape::Instantiation {
                    constructor,
                    arguments: node.child_by_field_name("arguments"),
                },
                None => CallShape::Other,
            },
            kind if SCOPE_BOUNDARIES.contains(&kind) => CallShape::ScopeBoundary,
            _ => CallShape::Other,
        }
    }

    fn split_member<'t>(&self, callee: &Node<'t>) -> Option<(Node<'t>, Node<'t>)> {
        if callee.kind() != "member_expression" {
            return None;
        }
        Some((
            callee.child_by_field_name("object")?,
            callee.child_by_field_name("property")?,
        ))
    }

    fn argument_value<'t>(&self, argument: Node<'t>) -> Option<Node<'t>> {
        match argument.kind() {
            "spread_element" | "comment" => None,
            _ => Some(argument),
        }
    }

    /// `x instanceof Foo` / `x instanceof ns.Foo`
    fn narrowed_types(&self, base: &BaseExtractor, node: &Node) -> Vec<String> {
        if node.kind() != "binary_expression" {
            return Vec::new();
        }
        let is_instanceof = node
            .child_by_field_name("operator")
            .is_some_and(|op| op.kind() == "instanceof");
        if !is_instanceof {
            return Vec::new();
        }
        node.child_by_field_name("right")
            .filter(|right| matches!(right.kind(), "identifier" | "member_expression"))
            .map(|right| vec![base_type_name(&base.get_node_text(&right))])
            .unwrap_or_default()
    }
}
