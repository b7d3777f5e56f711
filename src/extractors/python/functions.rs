/// Function and method extraction
/// Handles functions, async functions, methods, properties, and module-level lambdas
use tree_sitter::Node;

use super::calls::PythonCallSyntax;
use super::helpers::{self, ABSTRACT_DECORATORS, PYTHON_TYPES};
use super::{decorators, signatures, types, Context, PythonExtractor, Scope};
use crate::error::ParseError;
use crate::extractors::base::decorators::metadata_parts;
use crate::extractors::base::calls::compact_text;
use crate::extractors::base::traversal::has_child_kind;
use crate::extractors::base::{
    mine_calls, Decorator, Frame, MinedBody, SymbolKind, SymbolMetadata, SymbolOptions,
    TypeRefCollector,
};

const PROPERTY_DECORATORS: &[&str] = &["property", "cached_property", "abstractproperty"];

/// Extract a function definition; methods when directly inside a class body
pub(super) fn extract_function(
    extractor: &mut PythonExtractor,
    node: Node,
    decorators: Vec<Decorator>,
    frame: &Frame<'_, Scope>,
) -> Result<usize, ParseError> {
    let name = extractor
        .base()
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());

    let owner = match frame.scope.context {
        Context::ClassBody => frame.scope.class.as_ref().map(|c| c.name.clone()),
        _ => None,
    };
    let is_method = owner.is_some();
    let is_async = has_child_kind(&node, "async");
    let parameters = node.child_by_field_name("parameters");
    let return_type = node.child_by_field_name("return_type");

    let is_property = is_method
        && (decorators::has_decorator(&decorators, PROPERTY_DECORATORS)
            || decorators::is_property_accessor(&decorators));
    let kind = if is_property {
        SymbolKind::Property
    } else if is_method {
        SymbolKind::Method
    } else {
        SymbolKind::Function
    };

    let async_prefix = if is_async { "async " } else { "" };
    let return_suffix = return_type
        .map(|r| format!(" -> {}", compact_text(&extractor.base().get_node_text(&r))))
        .unwrap_or_default();
    let signature = format!(
        "{}def {}{}{}",
        async_prefix,
        name,
        signatures::render_parameters(extractor, parameters),
        return_suffix
    );

    let mined = match node.child_by_field_name("body") {
        Some(body) => mine_calls(extractor.base_mut(), &PythonCallSyntax, body, &name)?,
        None => MinedBody::default(),
    };

    let mut collector = TypeRefCollector::new(&PYTHON_TYPES, &name);
    signatures::collect_annotation_refs(extractor, parameters, return_type, &mut collector)?;
    let (type_references, generic_args) = collector.finish();

    let (decorator_names, decorator_args) = metadata_parts(&decorators);
    let metadata = SymbolMetadata {
        decorators: decorator_names,
        decorator_args,
        is_async,
        is_static: decorators::has_decorator(&decorators, &["staticmethod"]),
        is_abstract: decorators::has_decorator(&decorators, ABSTRACT_DECORATORS),
        is_constructor: is_method && name == "__init__",
        is_overload: decorators::has_decorator(&decorators, &["overload"]),
        type_params: signatures::type_parameters(extractor, &node),
        generic_args,
        narrowed_types: mined.narrowed_types,
        access_modifier: if is_method {
            helpers::access_modifier(&name)
        } else {
            None
        },
        ..Default::default()
    };

    let doc_comment = types::extract_docstring(extractor, &node);
    Ok(extractor.base_mut().add_symbol(
        &node,
        name.clone(),
        kind,
        SymbolOptions {
            exported: helpers::is_exported(&name),
            signature: Some(signature),
            doc_comment,
            receiver: owner,
            calls: mined.calls,
            type_references,
            metadata,
        },
        frame.parent,
    ))
}

/// `handler = lambda event: dispatch(event)` at module level
pub(super) fn extract_lambda_function(
    extractor: &mut PythonExtractor,
    assignment: Node,
    name: String,
    lambda: Node,
    frame: &Frame<'_, Scope>,
) -> Result<usize, ParseError> {
    let parameters = lambda
        .child_by_field_name("parameters")
        .map(|p| compact_text(&extractor.base().get_node_text(&p)))
        .unwrap_or_default();
    let signature = format!("{} = lambda {}", name, parameters).trim_end().to_string();

    let mined = match lambda.child_by_field_name("body") {
        Some(body) => mine_calls(extractor.base_mut(), &PythonCallSyntax, body, &name)?,
        None => MinedBody::default(),
    };

    let metadata = SymbolMetadata {
        narrowed_types: mined.narrowed_types,
        ..Default::default()
    };
    Ok(extractor.base_mut().add_symbol(
        &assignment,
        name.clone(),
        SymbolKind::Function,
        SymbolOptions {
            exported: helpers::is_exported(&name),
            signature: Some(signature),
            calls: mined.calls,
            metadata,
            ..Default::default()
        },
        frame.parent,
    ))
}
