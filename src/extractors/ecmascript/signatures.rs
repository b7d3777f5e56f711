/// Parameters, annotations, type parameters and rendered headers
use tree_sitter::Node;

use crate::error::ParseError;
use crate::extractors::base::calls::compact_text;
use crate::extractors::base::traversal::{children, has_child_kind, named_children};
use crate::extractors::base::{BaseExtractor, MethodSignature, TypeRefCollector};

use super::helpers;

/// Return types that produce no value
const EMPTY_RETURNS: &[&str] = &["void", "never", "undefined"];

/// The callable parts of a function-like node
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallableParts<'t> {
    pub parameters: Option<Node<'t>>,
    /// Single unparenthesized arrow parameter: `x => x + 1`
    pub bare_parameter: Option<Node<'t>>,
    pub return_type: Option<Node<'t>>,
    pub body: Option<Node<'t>>,
    pub is_async: bool,
}

impl<'t> CallableParts<'t> {
    pub fn of(node: Node<'t>) -> Self {
        Self {
            parameters: node.child_by_field_name("parameters"),
            bare_parameter: node.child_by_field_name("parameter"),
            return_type: node.child_by_field_name("return_type"),
            body: node.child_by_field_name("body"),
            is_async: has_child_kind(&node, "async"),
        }
    }

    /// Declared parameters, not counting a TypeScript `this` parameter
    pub fn parameter_count(&self) -> u32 {
        if self.bare_parameter.is_some() {
            return 1;
        }
        let Some(parameters) = self.parameters else {
            return 0;
        };
        named_children(&parameters)
            .iter()
            .filter(|p| p.kind() != "comment")
            .filter(|p| {
                p.child_by_field_name("pattern")
                    .map_or(true, |pattern| pattern.kind() != "this")
            })
            .count() as u32
    }
}

/// Feed every parameter annotation and the return annotation to the collector
pub(crate) fn collect_annotation_refs(
    base: &mut BaseExtractor,
    parts: &CallableParts,
    collector: &mut TypeRefCollector,
) -> Result<(), ParseError> {
    if let Some(parameters) = parts.parameters {
        let annotations: Vec<Node> = named_children(&parameters)
            .into_iter()
            .filter_map(|p| p.child_by_field_name("type"))
            .collect();
        for annotation in annotations {
            collector.collect(base, annotation)?;
        }
    }
    if let Some(return_type) = parts.return_type {
        collector.collect(base, return_type)?;
    }
    Ok(())
}

/// `<T, U extends Base>` -> `["T", "U extends Base"]`
pub(crate) fn type_parameters(base: &BaseExtractor, node: &Node) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    named_children(&params)
        .iter()
        .filter(|p| p.kind() == "type_parameter")
        .map(|p| compact_text(&base.get_node_text(p)))
        .collect()
}

/// `(return_count, returns)` from a return annotation
///
/// `void` and a missing annotation return nothing; a tuple `[A, B]` returns two.
pub(crate) fn return_shape(base: &BaseExtractor, return_type: Option<Node>) -> (u32, Vec<String>) {
    let Some(annotation) = return_type else {
        return (0, Vec::new());
    };
    // `: T` annotations wrap the type itself
    let ty = if annotation.kind() == "type_annotation" {
        match named_children(&annotation).into_iter().next() {
            Some(ty) => ty,
            None => return (0, Vec::new()),
        }
    } else {
        annotation
    };

    let text = compact_text(&base.get_node_text(&ty));
    if EMPTY_RETURNS.contains(&text.as_str()) {
        return (0, Vec::new());
    }
    if ty.kind() == "tuple_type" {
        let parts: Vec<String> = named_children(&ty)
            .iter()
            .filter(|t| t.kind() != "comment")
            .map(|t| compact_text(&base.get_node_text(t)))
            .collect();
        return (parts.len() as u32, parts);
    }
    (1, vec![text])
}

/// Shape of one method or method signature, for structural matching downstream
pub(crate) fn method_shape(base: &BaseExtractor, member: &Node) -> Option<MethodSignature> {
    let name = helpers::member_name(base, member)?;
    let parts = CallableParts::of(*member);
    let (return_count, returns) = return_shape(base, parts.return_type);
    Some(MethodSignature {
        name,
        param_count: parts.parameter_count(),
        return_count,
        returns,
    })
}

/// Declaration text up to its body, decorators excluded, whitespace collapsed
///
/// `@Get() async find(id: string): Promise<User> { ... }` -> `async find(id: string): Promise<User>`
pub(crate) fn header_text(base: &BaseExtractor, node: &Node, body: Option<Node>) -> String {
    let start = children(node)
        .into_iter()
        .find(|c| c.kind() != "decorator" && c.kind() != "comment")
        .map_or(node.start_byte(), |c| c.start_byte());
    let end = body.map_or(node.end_byte(), |b| b.start_byte()).max(start);
    let text = base.content.get(start..end).unwrap_or_default();
    let trimmed = text.trim().trim_end_matches([';', ',']).trim_end();
    compact_text(trimmed)
}
