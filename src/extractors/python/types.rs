/// Class and type extraction for Python
/// Handles class definitions, enums, protocols, abstract base classes, and docstrings
use tree_sitter::Node;

use super::helpers::{self, ABSTRACT_DECORATORS, ENUM_BASES};
use super::{decorators, signatures, ClassInfo, Context, PythonExtractor, Scope};
use crate::error::ParseError;
use crate::extractors::base::decorators::metadata_parts;
use crate::extractors::base::{
    Decorator, Frame, MethodSignature, SymbolKind, SymbolMetadata, SymbolOptions,
};

/// Bases whose subscript carries the class's type parameters
const GENERIC_CARRIERS: &[&str] = &["Generic", "Protocol"];

/// Extract a class definition; returns its arena index and body context
pub(super) fn extract_class(
    extractor: &mut PythonExtractor,
    node: Node,
    decorators: Vec<Decorator>,
    frame: &Frame<'_, Scope>,
) -> Result<(usize, ClassInfo), ParseError> {
    let base = extractor.base();
    let name = base
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());

    let superclasses = node.child_by_field_name("superclasses");
    let bases = superclasses
        .map(|s| helpers::extract_argument_list(extractor, &s))
        .unwrap_or_default();
    let body = node.child_by_field_name("body");

    let is_enum = bases.bases.iter().any(|b| ENUM_BASES.contains(&b.as_str()));
    let is_protocol = bases.bases.iter().any(|b| b == "Protocol");
    let is_abc =
        bases.bases.iter().any(|b| b == "ABC") || bases.metaclass.as_deref() == Some("ABCMeta");
    let has_abstract_member = body.is_some_and(|b| has_abstract_member(extractor, &b));

    // a bare ABC subclass without abstract members stays a plain class
    let kind = if is_enum {
        SymbolKind::Enum
    } else if is_protocol || (is_abc && has_abstract_member) {
        SymbolKind::Interface
    } else {
        SymbolKind::Class
    };

    let mut type_params = signatures::type_parameters(extractor, &node);
    for raw in &bases.raw {
        let Some((head, rest)) = raw.split_once('[') else {
            continue;
        };
        let carrier = crate::utils::naming::base_type_name(head);
        if GENERIC_CARRIERS.contains(&carrier.as_str()) {
            for param in rest.trim_end_matches(']').split(',') {
                let param = param.trim().to_string();
                if !param.is_empty() && !type_params.contains(&param) {
                    type_params.push(param);
                }
            }
        }
    }

    let methods = body
        .map(|b| method_shapes(extractor, &b))
        .unwrap_or_default();
    let (decorator_names, decorator_args) = metadata_parts(&decorators);

    let superclass_text = superclasses
        .map(|s| crate::extractors::base::calls::compact_text(&extractor.base().get_node_text(&s)))
        .unwrap_or_default();
    let signature = format!("class {}{}", name, superclass_text);

    let receiver = match frame.scope.context {
        Context::ClassBody => frame.scope.class.as_ref().map(|c| c.name.clone()),
        _ => None,
    };

    let metadata = SymbolMetadata {
        decorators: decorator_names,
        decorator_args,
        extends: bases.bases.first().cloned(),
        implements: bases.bases.iter().skip(1).cloned().collect(),
        is_abstract: is_abc && has_abstract_member,
        type_params,
        access_modifier: receiver.as_ref().and_then(|_| helpers::access_modifier(&name)),
        methods,
        ..Default::default()
    };

    let doc_comment = extract_docstring(extractor, &node);
    let idx = extractor.base_mut().add_symbol(
        &node,
        name.clone(),
        kind,
        SymbolOptions {
            exported: helpers::is_exported(&name),
            signature: Some(signature),
            doc_comment,
            receiver,
            metadata,
            ..Default::default()
        },
        frame.parent,
    );

    Ok((
        idx,
        ClassInfo {
            idx,
            name,
            is_enum,
        },
    ))
}

/// Shallow scan of a class body for an `@abstractmethod`-style member
fn has_abstract_member(extractor: &PythonExtractor, body: &Node) -> bool {
    let mut cursor = body.walk();
    let found = body
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "decorated_definition")
        .any(|c| {
            let decorators = decorators::extract_decorators(extractor, &c);
            decorators::has_decorator(&decorators, ABSTRACT_DECORATORS)
        });
    found
}

/// Flattened method shapes of a class body, for structural matching downstream
fn method_shapes(extractor: &PythonExtractor, body: &Node) -> Vec<MethodSignature> {
    let base = extractor.base();
    let mut shapes = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        let function = match child.kind() {
            "function_definition" => child,
            "decorated_definition" => match child.child_by_field_name("definition") {
                Some(def) if def.kind() == "function_definition" => def,
                _ => continue,
            },
            _ => continue,
        };
        let Some(name) = base.get_field_text(&function, "name") else {
            continue;
        };
        let parameters = function.child_by_field_name("parameters");
        let (return_count, returns) =
            signatures::return_shape(extractor, function.child_by_field_name("return_type"));
        shapes.push(MethodSignature {
            name,
            param_count: signatures::parameter_count(extractor, parameters, true),
            return_count,
            returns,
        });
    }
    shapes
}

/// Extract docstring from a function or class: the first statement, if it is a string
pub(super) fn extract_docstring(extractor: &PythonExtractor, node: &Node) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let base = extractor.base();

    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    let string = match first.kind() {
        "expression_statement" => {
            let mut inner = first.walk();
            let string = first.named_children(&mut inner).next()?;
            string
        }
        "string" => first,
        _ => return None,
    };
    if string.kind() != "string" {
        return None;
    }

    let docstring = helpers::strip_string_delimiters(&base.get_node_text(&string));
    let trimmed = docstring.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
