/// TypeScript-only declarations: interfaces, type aliases, enums and namespaces
use tree_sitter::Node;

use crate::error::ParseError;
use crate::extractors::base::calls::{clip_value, compact_text};
use crate::extractors::base::traversal::{find_child_by_type, named_children};
use crate::extractors::base::{
    BaseExtractor, Frame, SymbolKind, SymbolMetadata, SymbolOptions, TypeRefCollector,
};
use crate::extractors::ecmascript::helpers::{self, strip_quotes, ECMA_TYPES};
use crate::extractors::ecmascript::signatures::{self, header_text, CallableParts};
use crate::extractors::ecmascript::Scope;
use crate::utils::naming::base_type_name;

/// `interface Name<T> extends A, B { ... }`
///
/// Property signatures become fields and method signatures become methods. The method
/// shapes are also listed on the interface for structural matching.
pub(crate) fn extract_interface(
    base: &mut BaseExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let Some(name) = base.get_field_text(&node, "name") else {
        return Ok(());
    };
    let body = node.child_by_field_name("body");

    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    let mut supertypes = Vec::new();
    if let Some(clause) = find_child_by_type(&node, "extends_type_clause") {
        let mut cursor = clause.walk();
        let types: Vec<Node> = clause.children_by_field_name("type", &mut cursor).collect();
        for ty in types {
            supertypes.push(base_type_name(&base.get_node_text(&ty)));
            collector.collect(base, ty)?;
        }
    }
    let (type_references, generic_args) = collector.finish();

    let mut supertypes = supertypes.into_iter();
    let metadata = SymbolMetadata {
        extends: supertypes.next(),
        implements: supertypes.collect(),
        type_params: signatures::type_parameters(base, &node),
        generic_args,
        methods: body
            .map(|b| {
                named_children(&b)
                    .iter()
                    .filter(|m| m.kind() == "method_signature")
                    .filter_map(|m| signatures::method_shape(base, m))
                    .collect()
            })
            .unwrap_or_default(),
        ..Default::default()
    };

    let signature = header_text(base, &node, body);
    let idx = base.add_symbol(
        &node,
        name.clone(),
        SymbolKind::Interface,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            type_references,
            metadata,
            ..Default::default()
        },
        frame.parent,
    );

    if let Some(body) = body {
        for member in named_children(&body) {
            base.tick()?;
            match member.kind() {
                "property_signature" => interface_property(base, member, &name, idx)?,
                "method_signature" => interface_method(base, member, &name, idx)?,
                _ => {}
            }
        }
    }
    Ok(())
}

fn interface_property(
    base: &mut BaseExtractor,
    member: Node,
    owner: &str,
    parent: usize,
) -> Result<(), ParseError> {
    let Some(name) = helpers::member_name(base, &member) else {
        return Ok(());
    };
    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    if let Some(annotation) = member.child_by_field_name("type") {
        collector.collect(base, annotation)?;
    }
    let (type_references, generic_args) = collector.finish();

    let signature = header_text(base, &member, None);
    base.add_symbol(
        &member,
        name,
        SymbolKind::Field,
        SymbolOptions {
            exported: true,
            signature: Some(signature),
            receiver: Some(owner.to_string()),
            type_references,
            metadata: SymbolMetadata {
                generic_args,
                ..Default::default()
            },
            ..Default::default()
        },
        Some(parent),
    );
    Ok(())
}

fn interface_method(
    base: &mut BaseExtractor,
    member: Node,
    owner: &str,
    parent: usize,
) -> Result<(), ParseError> {
    let Some(name) = helpers::member_name(base, &member) else {
        return Ok(());
    };
    let parts = CallableParts::of(member);
    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    signatures::collect_annotation_refs(base, &parts, &mut collector)?;
    let (type_references, generic_args) = collector.finish();

    let signature = header_text(base, &member, None);
    base.add_symbol(
        &member,
        name,
        SymbolKind::Method,
        SymbolOptions {
            exported: true,
            signature: Some(signature),
            receiver: Some(owner.to_string()),
            type_references,
            metadata: SymbolMetadata {
                type_params: signatures::type_parameters(base, &member),
                generic_args,
                ..Default::default()
            },
            ..Default::default()
        },
        Some(parent),
    );
    Ok(())
}

/// `type Name<T> = ...`
pub(crate) fn extract_type_alias(
    base: &mut BaseExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let Some(name) = base.get_field_text(&node, "name") else {
        return Ok(());
    };
    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    if let Some(value) = node.child_by_field_name("value") {
        collector.collect(base, value)?;
    }
    let (type_references, generic_args) = collector.finish();

    let signature = clip_value(&header_text(base, &node, None));
    base.add_symbol(
        &node,
        name,
        SymbolKind::TypeAlias,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            type_references,
            metadata: SymbolMetadata {
                type_params: signatures::type_parameters(base, &node),
                generic_args,
                ..Default::default()
            },
            ..Default::default()
        },
        frame.parent,
    );
    Ok(())
}

/// `enum Name { A, B = 2, "c" }`, with one enum member per entry
pub(crate) fn extract_enum(
    base: &mut BaseExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let Some(name) = base.get_field_text(&node, "name") else {
        return Ok(());
    };
    let body = node.child_by_field_name("body");
    let signature = header_text(base, &node, body);
    let idx = base.add_symbol(
        &node,
        name.clone(),
        SymbolKind::Enum,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            ..Default::default()
        },
        frame.parent,
    );

    let Some(body) = body else {
        return Ok(());
    };
    for entry in named_children(&body) {
        base.tick()?;
        let member_name = match entry.kind() {
            "property_identifier" => base.get_node_text(&entry),
            "string" => strip_quotes(&base.get_node_text(&entry)),
            "enum_assignment" => match base.get_field_text(&entry, "name") {
                Some(name) => strip_quotes(&name),
                None => continue,
            },
            _ => continue,
        };
        let signature = compact_text(&base.get_node_text(&entry));
        base.add_symbol(
            &entry,
            member_name,
            SymbolKind::EnumMember,
            SymbolOptions {
                exported: true,
                signature: Some(signature),
                receiver: Some(name.clone()),
                ..Default::default()
            },
            Some(idx),
        );
    }
    Ok(())
}

/// `namespace A.B { ... }` and `declare module "pkg" { ... }`
pub(crate) fn extract_namespace(
    base: &mut BaseExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Option<usize> {
    let name = strip_quotes(&base.get_field_text(&node, "name")?);
    let body = node.child_by_field_name("body");
    let signature = header_text(base, &node, body);
    Some(base.add_symbol(
        &node,
        name,
        SymbolKind::Module,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            ..Default::default()
        },
        frame.parent,
    ))
}
