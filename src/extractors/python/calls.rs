/// Python call syntax for the shared call-site miner
use tree_sitter::Node;

use crate::extractors::base::{BaseExtractor, CallShape, CallSyntax};
use crate::utils::naming::base_type_name;

pub(super) struct PythonCallSyntax;

impl CallSyntax for PythonCallSyntax {
    fn classify<'t>(&self, node: &Node<'t>) -> CallShape<'t> {
        match node.kind() {
            "call" => match node.child_by_field_name("function") {
                Some(callee) => CallShape::Call {
                    callee,
                    arguments: node.child_by_field_name("arguments"),
                },
                None => CallShape::Other,
            },
            "function_definition" | "class_definition" | "decorated_definition" => {
                CallShape::ScopeBoundary
            }
            _ => CallShape::Other,
        }
    }

    fn split_member<'t>(&self, callee: &Node<'t>) -> Option<(Node<'t>, Node<'t>)> {
        if callee.kind() != "attribute" {
            return None;
        }
        Some((
            callee.child_by_field_name("object")?,
            callee.child_by_field_name("attribute")?,
        ))
    }

    /// `super().m()` and `super(Cls, self).m()` both report receiver `super`
    fn normalize_receiver(&self, base: &BaseExtractor, object: &Node) -> Option<String> {
        if object.kind() != "call" {
            return None;
        }
        let function = object.child_by_field_name("function")?;
        (base.get_node_text(&function) == "super").then(|| "super".to_string())
    }

    fn argument_value<'t>(&self, argument: Node<'t>) -> Option<Node<'t>> {
        match argument.kind() {
            "keyword_argument" => argument.child_by_field_name("value"),
            "list_splat" | "dictionary_splat" | "comment" => None,
            _ => Some(argument),
        }
    }

    /// `isinstance(x, Foo)` / `isinstance(x, (Foo, mod.Bar))`
    fn narrowed_types(&self, base: &BaseExtractor, node: &Node) -> Vec<String> {
        if node.kind() != "call" {
            return Vec::new();
        }
        let is_isinstance = node
            .child_by_field_name("function")
            .is_some_and(|f| base.get_node_text(&f) == "isinstance");
        if !is_isinstance {
            return Vec::new();
        }
        let Some(arguments) = node.child_by_field_name("arguments") else {
            return Vec::new();
        };
        let mut cursor = arguments.walk();
        let Some(class_arg) = arguments.named_children(&mut cursor).nth(1) else {
            return Vec::new();
        };

        let candidates = if class_arg.kind() == "tuple" {
            let mut tuple_cursor = class_arg.walk();
            class_arg.named_children(&mut tuple_cursor).collect::<Vec<_>>()
        } else {
            vec![class_arg]
        };
        candidates
            .iter()
            .filter(|n| matches!(n.kind(), "identifier" | "attribute"))
            .map(|n| base_type_name(&base.get_node_text(n)))
            .collect()
    }
}
