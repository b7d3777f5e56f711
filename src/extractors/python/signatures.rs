/// Function signatures and parameter extraction
/// Parameter lists, annotations, PEP 695 type parameters, and return shapes
use tree_sitter::Node;

use super::PythonExtractor;
use crate::error::ParseError;
use crate::extractors::base::calls::compact_text;
use crate::extractors::base::TypeRefCollector;

const SEPARATOR_KINDS: &[&str] = &["keyword_separator", "positional_separator", "comment"];

/// Parameter list as written, whitespace collapsed: `(self, x: int = 1)`
pub(super) fn render_parameters(extractor: &PythonExtractor, parameters: Option<Node>) -> String {
    match parameters {
        Some(parameters) => compact_text(&extractor.base().get_node_text(&parameters)),
        None => "()".to_string(),
    }
}

/// Number of declared parameters, not counting `self` / `cls` of a method
pub(super) fn parameter_count(
    extractor: &PythonExtractor,
    parameters: Option<Node>,
    is_method: bool,
) -> u32 {
    let Some(parameters) = parameters else {
        return 0;
    };
    let mut cursor = parameters.walk();
    let params: Vec<Node> = parameters
        .named_children(&mut cursor)
        .filter(|p| !SEPARATOR_KINDS.contains(&p.kind()))
        .collect();

    let skips_receiver = is_method
        && params
            .first()
            .is_some_and(|p| matches!(parameter_name(extractor, p).as_str(), "self" | "cls"));
    (params.len() - usize::from(skips_receiver)) as u32
}

/// Bare name of one parameter node
pub(super) fn parameter_name(extractor: &PythonExtractor, param: &Node) -> String {
    let base = extractor.base();
    match param.kind() {
        "identifier" => base.get_node_text(param),
        "default_parameter" | "typed_default_parameter" => {
            base.get_field_text(param, "name").unwrap_or_default()
        }
        _ => {
            let mut cursor = param.walk();
            let name = param
                .named_children(&mut cursor)
                .find(|c| c.kind() == "identifier")
                .map(|c| base.get_node_text(&c))
                .unwrap_or_default();
            name
        }
    }
}

/// Feed every parameter annotation and the return annotation to the collector
pub(super) fn collect_annotation_refs(
    extractor: &mut PythonExtractor,
    parameters: Option<Node>,
    return_type: Option<Node>,
    collector: &mut TypeRefCollector,
) -> Result<(), ParseError> {
    if let Some(parameters) = parameters {
        let mut cursor = parameters.walk();
        let annotations: Vec<Node> = parameters
            .named_children(&mut cursor)
            .filter_map(|p| p.child_by_field_name("type"))
            .collect();
        for annotation in annotations {
            collector.collect(extractor.base_mut(), annotation)?;
        }
    }
    if let Some(return_type) = return_type {
        collector.collect(extractor.base_mut(), return_type)?;
    }
    Ok(())
}

/// PEP 695 type parameters: `def first[T](xs: list[T]) -> T`
pub(super) fn type_parameters(extractor: &PythonExtractor, node: &Node) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    let base = extractor.base();
    let mut cursor = params.walk();
    let names = params
        .named_children(&mut cursor)
        .map(|p| compact_text(&base.get_node_text(&p)))
        .collect();
    names
}

/// `(return_count, returns)` from a return annotation
///
/// `-> None` and a missing annotation return nothing; `-> tuple[A, B]` returns two.
pub(super) fn return_shape(extractor: &PythonExtractor, return_type: Option<Node>) -> (u32, Vec<String>) {
    let Some(return_type) = return_type else {
        return (0, Vec::new());
    };
    let text = compact_text(&extractor.base().get_node_text(&return_type));
    if text == "None" {
        return (0, Vec::new());
    }
    let lowered = text.to_ascii_lowercase();
    if lowered.starts_with("tuple[") && text.ends_with(']') && !text.contains("...") {
        let inner = &text[6..text.len() - 1];
        let parts = split_top_level(inner);
        return (parts.len() as u32, parts);
    }
    (1, vec![text])
}

/// Split on commas that are not nested inside brackets
fn split_top_level(inner: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '[' | '(' => {
                depth += 1;
                current.push(c);
            }
            ']' | ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}
