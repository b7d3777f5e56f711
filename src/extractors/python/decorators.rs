/// Decorator extraction and handling
/// Supports @property, @staticmethod, @abstractmethod, @overload, and custom decorators
use tree_sitter::Node;

use super::helpers::PYTHON_DECORATORS;
use super::PythonExtractor;
use crate::extractors::base::decorators::read_decorator;
use crate::extractors::base::Decorator;

/// Decorators of a `decorated_definition`, in source order
pub(super) fn extract_decorators(extractor: &PythonExtractor, node: &Node) -> Vec<Decorator> {
    let base = extractor.base();
    let mut decorators = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "decorator" {
            continue;
        }
        let mut inner = child.walk();
        let expression = child.named_children(&mut inner).find(|n| n.kind() != "comment");
        if let Some(expression) = expression {
            decorators.push(read_decorator(base, &PYTHON_DECORATORS, expression));
        }
    }

    decorators
}

pub(super) fn has_decorator(decorators: &[Decorator], names: &[&str]) -> bool {
    decorators.iter().any(|d| names.contains(&d.leaf_name()))
}

/// `@name.setter` / `@name.deleter` accessors of a property
pub(super) fn is_property_accessor(decorators: &[Decorator]) -> bool {
    decorators
        .iter()
        .any(|d| matches!(d.leaf_name(), "setter" | "getter" | "deleter") && d.name.contains('.'))
}
