/// Class extraction
/// Handles class declarations and expressions, heritage clauses, fields, constructor
/// parameter properties and fields assigned through `this` in constructors
use tree_sitter::Node;

use super::decorators::{member_decorators, own_decorators};
use super::functions::{self, FunctionValue};
use super::helpers::{self, ECMA_TYPES};
use super::signatures::{self, header_text};
use super::{body_step, ClassInfo, Context, Scope};
use crate::error::ParseError;
use crate::extractors::base::calls::{clip_value, compact_text};
use crate::extractors::base::decorators::metadata_parts;
use crate::extractors::base::traversal::{find_child_by_type, has_child_kind, named_children};
use crate::extractors::base::{
    AccessModifier, BaseExtractor, Frame, MethodSignature, Step, SymbolKind, SymbolMetadata, SymbolOptions,
    TypeRefCollector,
};
use crate::utils::naming::base_type_name;

/// Nodes whose bodies have their own `this`
const RECEIVER_BOUNDARIES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "class_declaration",
    "class",
    "method_definition",
];

/// Declared supertypes of a class
#[derive(Debug, Default)]
struct Heritage<'t> {
    /// `extends` targets, normalized to their base name
    supertypes: Vec<String>,
    /// `implements` targets, normalized to their base name
    interfaces: Vec<String>,
    /// Type nodes worth mining for references
    annotations: Vec<Node<'t>>,
}

fn read_heritage<'t>(base: &BaseExtractor, node: &Node<'t>) -> Heritage<'t> {
    let mut heritage = Heritage::default();
    let Some(clause) = find_child_by_type(node, "class_heritage") else {
        return heritage;
    };

    for child in named_children(&clause) {
        match child.kind() {
            "extends_clause" => {
                let mut cursor = child.walk();
                for value in child.children_by_field_name("value", &mut cursor) {
                    heritage
                        .supertypes
                        .push(base_type_name(&base.get_node_text(&value)));
                }
                let mut cursor = child.walk();
                heritage
                    .annotations
                    .extend(child.children_by_field_name("type_arguments", &mut cursor));
            }
            "implements_clause" => {
                for ty in named_children(&child) {
                    if ty.kind() == "comment" {
                        continue;
                    }
                    heritage
                        .interfaces
                        .push(base_type_name(&base.get_node_text(&ty)));
                    heritage.annotations.push(ty);
                }
            }
            "comment" => {}
            // JavaScript: `extends <expression>`
            _ => heritage
                .supertypes
                .push(base_type_name(&base.get_node_text(&child))),
        }
    }
    heritage
}

/// Extract a class declaration or class expression
///
/// `name` overrides the class's own name (`const Foo = class {}`); `anchor` is the node
/// that carries the location.
pub(crate) fn extract_class<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    name: Option<String>,
    anchor: Node<'t>,
    frame: &Frame<'t, Scope>,
) -> Result<(usize, ClassInfo), ParseError> {
    let name = name
        .or_else(|| base.get_field_text(&node, "name"))
        .unwrap_or_else(|| "default".to_string());
    let body = node.child_by_field_name("body");
    let heritage = read_heritage(base, &node);

    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    for annotation in &heritage.annotations {
        collector.collect(base, *annotation)?;
    }
    let (type_references, generic_args) = collector.finish();

    let mut decorators = frame.scope.decorators.clone();
    decorators.extend(own_decorators(base, &node));
    let (decorator_names, decorator_args) = metadata_parts(&decorators);

    let mut supertypes = heritage.supertypes.into_iter();
    let extends = supertypes.next();
    let mut implements: Vec<String> = supertypes.collect();
    implements.extend(heritage.interfaces);

    let metadata = SymbolMetadata {
        decorators: decorator_names,
        decorator_args,
        extends,
        implements,
        is_abstract: node.kind() == "abstract_class_declaration",
        type_params: signatures::type_parameters(base, &node),
        generic_args,
        methods: body.map(|b| method_shapes(base, &b)).unwrap_or_default(),
        ..Default::default()
    };

    let signature = header_text(base, &node, body);
    let idx = base.add_symbol(
        &anchor,
        name.clone(),
        SymbolKind::Class,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            type_references,
            metadata,
            ..Default::default()
        },
        frame.parent,
    );
    Ok((idx, ClassInfo { idx, name }))
}

/// Implemented method shapes of a class body
fn method_shapes(base: &BaseExtractor, body: &Node) -> Vec<MethodSignature> {
    named_children(body)
        .iter()
        .filter(|m| matches!(m.kind(), "method_definition" | "abstract_method_signature"))
        .filter_map(|m| signatures::method_shape(base, m))
        .collect()
}

/// One member of a class body; returns how the walk continues
pub(crate) fn extract_member<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    frame: &Frame<'t, Scope>,
) -> Result<Step<'t, Scope>, ParseError> {
    let Some(class) = frame.scope.class.clone() else {
        return Ok(Step::Skip);
    };

    match node.kind() {
        "method_definition" => {
            let idx = functions::extract_method(base, node, &class)?;
            let is_constructor = helpers::member_name(base, &node).as_deref() == Some("constructor");
            if is_constructor {
                constructor_fields(base, node, &class)?;
            }
            Ok(body_step(&node, idx, Context::FunctionBody, Some(class)))
        }
        "abstract_method_signature" | "method_signature" => {
            functions::extract_method(base, node, &class)?;
            Ok(Step::Skip)
        }
        "public_field_definition" | "field_definition" => {
            extract_field(base, node, &class)?;
            Ok(Step::Skip)
        }
        _ => Ok(Step::Skip),
    }
}

/// Class fields; function-valued fields are methods
fn extract_field(base: &mut BaseExtractor, node: Node, class: &ClassInfo) -> Result<usize, ParseError> {
    let name = helpers::member_name(base, &node).unwrap_or_else(|| "anonymous".to_string());
    let access = helpers::access_modifier(base, &node);
    let is_static = helpers::is_static_member(&node);
    let value = node.child_by_field_name("value");

    if let Some(value) = value.filter(helpers::is_function_value) {
        let spec = FunctionValue {
            kind: SymbolKind::Method,
            receiver: Some(class.name.clone()),
            exported: helpers::member_exported(access),
            is_static,
            ..FunctionValue::new(name.clone(), format!("{} = ", name))
        };
        let idx = functions::extract_function_value(base, node, value, spec, Some(class.idx))?;
        if let Some(symbol) = base.arena.get_mut(idx) {
            symbol.metadata_mut().access_modifier = access;
            symbol.normalize_metadata();
        }
        return Ok(idx);
    }

    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    if let Some(annotation) = node.child_by_field_name("type") {
        collector.collect(base, annotation)?;
    }
    let (type_references, generic_args) = collector.finish();

    let decorators = member_decorators(base, &node);
    let (decorator_names, decorator_args) = metadata_parts(&decorators);
    let metadata = SymbolMetadata {
        decorators: decorator_names,
        decorator_args,
        is_static,
        generic_args,
        access_modifier: access,
        ..Default::default()
    };

    let signature = clip_value(&compact_text(&header_text(base, &node, None)));
    Ok(base.add_symbol(
        &node,
        name,
        SymbolKind::Field,
        SymbolOptions {
            exported: helpers::member_exported(access),
            signature: Some(signature),
            receiver: Some(class.name.clone()),
            type_references,
            metadata,
            ..Default::default()
        },
        Some(class.idx),
    ))
}

/// Names declared directly in a class body
fn declared_members(base: &BaseExtractor, body: &Node) -> Vec<String> {
    named_children(body)
        .iter()
        .filter_map(|member| helpers::member_name(base, member))
        .collect()
}

/// Fields introduced by a constructor
///
/// TypeScript parameter properties (`constructor(private repo: Repo)`) and
/// `this.x = ...` assignments both become fields of the class, unless the class body
/// already declares a member of that name.
fn constructor_fields(base: &mut BaseExtractor, constructor: Node, class: &ClassInfo) -> Result<(), ParseError> {
    let declared = constructor
        .parent()
        .map(|body| declared_members(base, &body))
        .unwrap_or_default();

    if let Some(parameters) = constructor.child_by_field_name("parameters") {
        for parameter in named_children(&parameters) {
            let is_property = has_child_kind(&parameter, "accessibility_modifier")
                || has_child_kind(&parameter, "readonly");
            if !is_property {
                continue;
            }
            parameter_property(base, parameter, class, &declared)?;
        }
    }

    if let Some(body) = constructor.child_by_field_name("body") {
        let assignments = receiver_assignments(base, body)?;
        let assignments = assignments
            .into_iter()
            .filter(|(name, _)| !declared.contains(name))
            .collect();
        add_receiver_fields(base, assignments, class);
    }
    Ok(())
}

fn parameter_property(
    base: &mut BaseExtractor,
    parameter: Node,
    class: &ClassInfo,
    declared: &[String],
) -> Result<(), ParseError> {
    let Some(pattern) = parameter.child_by_field_name("pattern") else {
        return Ok(());
    };
    if pattern.kind() != "identifier" {
        return Ok(());
    }
    let name = base.get_node_text(&pattern);
    if declared.contains(&name) || base.arena.find_child(Some(class.idx), &name).is_some() {
        return Ok(());
    }

    let access = helpers::access_modifier(base, &parameter);
    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    if let Some(annotation) = parameter.child_by_field_name("type") {
        collector.collect(base, annotation)?;
    }
    let (type_references, generic_args) = collector.finish();

    let signature = compact_text(&base.get_node_text(&parameter));
    base.add_symbol(
        &parameter,
        name,
        SymbolKind::Field,
        SymbolOptions {
            exported: helpers::member_exported(access),
            signature: Some(signature),
            receiver: Some(class.name.clone()),
            type_references,
            metadata: SymbolMetadata {
                generic_args,
                access_modifier: access,
                ..Default::default()
            },
            ..Default::default()
        },
        Some(class.idx),
    );
    Ok(())
}

/// `this.x = ...` assignments in a body, first occurrence of each name, in source order
///
/// Arrow functions share the enclosing `this` and are searched; nested functions,
/// classes and methods are not.
pub(crate) fn receiver_assignments<'t>(
    base: &mut BaseExtractor,
    body: Node<'t>,
) -> Result<Vec<(String, Node<'t>)>, ParseError> {
    let mut found: Vec<(String, Node<'t>)> = Vec::new();
    let mut stack = vec![(body, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        base.tick()?;
        if depth > 0 && RECEIVER_BOUNDARIES.contains(&node.kind()) {
            continue;
        }

        if node.kind() == "assignment_expression" {
            let target = node.child_by_field_name("left").filter(|l| l.kind() == "member_expression");
            if let Some(target) = target {
                let on_this = target
                    .child_by_field_name("object")
                    .is_some_and(|o| o.kind() == "this");
                let property = target.child_by_field_name("property");
                if let Some(property) = property.filter(|_| on_this) {
                    let name = base.get_node_text(&property);
                    if !found.iter().any(|(existing, _)| *existing == name) {
                        found.push((name, node));
                    }
                }
            }
        }

        if !base.admit_depth(depth + 1) {
            continue;
        }
        for child in named_children(&node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(found)
}

/// Add `this.x` fields to a class, skipping names it already has
pub(crate) fn add_receiver_fields(
    base: &mut BaseExtractor,
    assignments: Vec<(String, Node)>,
    class: &ClassInfo,
) {
    for (name, assignment) in assignments {
        if base.arena.find_child(Some(class.idx), &name).is_some() {
            continue;
        }
        let value = assignment
            .child_by_field_name("right")
            .map(|r| clip_value(&base.get_node_text(&r)))
            .unwrap_or_default();
        let access = name.starts_with('#').then_some(AccessModifier::Private);
        base.add_symbol(
            &assignment,
            name.clone(),
            SymbolKind::Field,
            SymbolOptions {
                exported: helpers::member_exported(access),
                signature: Some(format!("this.{} = {}", name, value)),
                receiver: Some(class.name.clone()),
                metadata: SymbolMetadata {
                    access_modifier: access,
                    ..Default::default()
                },
                ..Default::default()
            },
            Some(class.idx),
        );
    }
}
