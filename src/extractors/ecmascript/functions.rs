/// Function and method extraction
/// Handles function declarations, overload signatures, function-valued bindings and
/// class methods
use tree_sitter::Node;

use super::calls::EcmaCallSyntax;
use super::decorators::member_decorators;
use super::helpers::{self, ECMA_TYPES};
use super::signatures::{self, header_text, CallableParts};
use super::{ClassInfo, Scope};
use crate::error::ParseError;
use crate::extractors::base::decorators::metadata_parts;
use crate::extractors::base::{
    mine_calls, BaseExtractor, Frame, MinedBody, SymbolKind, SymbolMetadata, SymbolOptions,
    TypeRefCollector, TypeReference,
};

/// How a function value that is not a declaration should be recorded
#[derive(Debug, Clone)]
pub(crate) struct FunctionValue {
    pub name: String,
    pub kind: SymbolKind,
    pub receiver: Option<String>,
    /// Rendered in front of the function's own header: `const add = `
    pub prefix: String,
    pub exported: bool,
    pub is_static: bool,
}

impl FunctionValue {
    pub fn new(name: String, prefix: impl Into<String>) -> Self {
        Self {
            name,
            kind: SymbolKind::Function,
            receiver: None,
            prefix: prefix.into(),
            exported: false,
            is_static: false,
        }
    }
}

/// Calls, type references and metadata shared by every callable
struct CallableSummary {
    mined: MinedBody,
    type_references: Vec<TypeReference>,
    metadata: SymbolMetadata,
}

fn summarize(
    base: &mut BaseExtractor,
    node: &Node,
    parts: &CallableParts,
    owner: &str,
) -> Result<CallableSummary, ParseError> {
    let mined = match parts.body {
        Some(body) => mine_calls(base, &EcmaCallSyntax, body, owner)?,
        None => MinedBody::default(),
    };

    let mut collector = TypeRefCollector::new(&ECMA_TYPES, owner);
    signatures::collect_annotation_refs(base, parts, &mut collector)?;
    let (type_references, generic_args) = collector.finish();

    let metadata = SymbolMetadata {
        is_async: parts.is_async,
        type_params: signatures::type_parameters(base, node),
        generic_args,
        narrowed_types: mined.narrowed_types.clone(),
        ..Default::default()
    };
    Ok(CallableSummary {
        mined,
        type_references,
        metadata,
    })
}

/// `function name(...) {}`, `function* name(...) {}` and TypeScript overload signatures
pub(crate) fn extract_function_declaration(
    base: &mut BaseExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<usize, ParseError> {
    let name = base
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "default".to_string());
    let parts = CallableParts::of(node);
    let summary = summarize(base, &node, &parts, &name)?;

    let metadata = SymbolMetadata {
        is_overload: node.kind() == "function_signature",
        ..summary.metadata
    };
    let signature = header_text(base, &node, parts.body);
    Ok(base.add_symbol(
        &node,
        name,
        SymbolKind::Function,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            calls: summary.mined.calls,
            type_references: summary.type_references,
            metadata,
            ..Default::default()
        },
        frame.parent,
    ))
}

/// A function expression or arrow function bound to a name
///
/// `anchor` is the binding node (declarator, assignment or pair) that carries the
/// location and the leading doc comment.
pub(crate) fn extract_function_value(
    base: &mut BaseExtractor,
    anchor: Node,
    value: Node,
    spec: FunctionValue,
    parent: Option<usize>,
) -> Result<usize, ParseError> {
    let parts = CallableParts::of(value);
    let summary = summarize(base, &value, &parts, &spec.name)?;

    let metadata = SymbolMetadata {
        is_static: spec.is_static,
        ..summary.metadata
    };
    let signature = format!("{}{}", spec.prefix, header_text(base, &value, parts.body));
    Ok(base.add_symbol(
        &anchor,
        spec.name,
        spec.kind,
        SymbolOptions {
            exported: spec.exported,
            signature: Some(signature),
            receiver: spec.receiver,
            calls: summary.mined.calls,
            type_references: summary.type_references,
            metadata,
            ..Default::default()
        },
        parent,
    ))
}

/// Methods, accessors, abstract methods and overload signatures inside a class body
pub(crate) fn extract_method(
    base: &mut BaseExtractor,
    node: Node,
    class: &ClassInfo,
) -> Result<usize, ParseError> {
    let name = helpers::member_name(base, &node).unwrap_or_else(|| "anonymous".to_string());
    let parts = CallableParts::of(node);
    let summary = summarize(base, &node, &parts, &name)?;

    let access = helpers::access_modifier(base, &node);
    let decorators = member_decorators(base, &node);
    let (decorator_names, decorator_args) = metadata_parts(&decorators);
    let kind = if helpers::is_accessor(&node) {
        SymbolKind::Property
    } else {
        SymbolKind::Method
    };

    let metadata = SymbolMetadata {
        decorators: decorator_names,
        decorator_args,
        is_static: helpers::is_static_member(&node),
        is_abstract: node.kind() == "abstract_method_signature",
        is_constructor: name == "constructor",
        is_overload: node.kind() == "method_signature",
        access_modifier: access,
        ..summary.metadata
    };
    let signature = header_text(base, &node, parts.body);
    Ok(base.add_symbol(
        &node,
        name,
        kind,
        SymbolOptions {
            exported: helpers::member_exported(access),
            signature: Some(signature),
            receiver: Some(class.name.clone()),
            calls: summary.mined.calls,
            type_references: summary.type_references,
            metadata,
            ..Default::default()
        },
        Some(class.idx),
    ))
}
