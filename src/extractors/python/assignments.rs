/// Variable and constant assignment extraction
/// Handles module variables, constants, type aliases, lambdas, class fields, enum
/// members, and `self.x` instance fields
use tree_sitter::Node;

use super::helpers::{self, PYTHON_TYPES};
use super::{functions, signatures, ClassInfo, Context, PythonExtractor, Scope};
use crate::error::ParseError;
use crate::extractors::base::calls::{clip_value, compact_text};
use crate::extractors::base::{
    Frame, SymbolKind, SymbolMetadata, SymbolOptions, TypeRefCollector,
};
use crate::utils::naming::{base_type_name, is_screaming_case};

/// Extract an assignment statement according to where it appears
pub(super) fn extract_assignment(
    extractor: &mut PythonExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let Some(left) = node.child_by_field_name("left") else {
        return Ok(());
    };

    match (frame.scope.context, frame.scope.class.clone()) {
        (Context::Module, _) => module_assignment(extractor, node, left, frame),
        (Context::ClassBody, Some(class)) => class_assignment(extractor, node, left, &class, frame),
        (Context::FunctionBody { is_method: true }, Some(class)) => {
            instance_fields(extractor, node, left, &class)
        }
        _ => Ok(()),
    }
}

/// Identifiers (or attributes) bound by the left side, in order
fn targets<'t>(left: Node<'t>) -> Vec<Node<'t>> {
    match left.kind() {
        "pattern_list" | "tuple_pattern" | "list_pattern" => {
            let mut cursor = left.walk();
            let targets = left.named_children(&mut cursor).collect();
            targets
        }
        _ => vec![left],
    }
}

fn module_assignment(
    extractor: &mut PythonExtractor,
    node: Node,
    left: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let right = node.child_by_field_name("right");
    let annotation = node.child_by_field_name("type");
    let single = left.kind() == "identifier";

    for target in targets(left) {
        if target.kind() != "identifier" {
            continue;
        }
        let name = extractor.base().get_node_text(&target);
        let anchor = if single { node } else { target };

        if let Some(lambda) = right.filter(|r| single && r.kind() == "lambda") {
            functions::extract_lambda_function(extractor, node, name, lambda, frame)?;
            continue;
        }

        let is_alias = single
            && annotation.is_some_and(|a| {
                base_type_name(&extractor.base().get_node_text(&a)) == "TypeAlias"
            });
        let kind = if is_alias {
            SymbolKind::TypeAlias
        } else if is_screaming_case(&name) {
            SymbolKind::Constant
        } else {
            SymbolKind::Variable
        };

        let mut collector = TypeRefCollector::new(&PYTHON_TYPES, &name);
        if is_alias {
            if let Some(right) = right {
                collector.collect(extractor.base_mut(), right)?;
            }
        } else if let Some(annotation) = annotation {
            collector.collect(extractor.base_mut(), annotation)?;
        }
        let (type_references, generic_args) = collector.finish();

        let signature = render(extractor, &name, annotation, right);
        extractor.base_mut().add_symbol(
            &anchor,
            name.clone(),
            kind,
            SymbolOptions {
                exported: helpers::is_exported(&name),
                signature: Some(signature),
                type_references,
                metadata: SymbolMetadata {
                    generic_args,
                    ..Default::default()
                },
                ..Default::default()
            },
            frame.parent,
        );
    }
    Ok(())
}

fn class_assignment(
    extractor: &mut PythonExtractor,
    node: Node,
    left: Node,
    class: &ClassInfo,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let right = node.child_by_field_name("right");
    let annotation = node.child_by_field_name("type");
    let single = left.kind() == "identifier";

    for target in targets(left) {
        if target.kind() != "identifier" {
            continue;
        }
        let name = extractor.base().get_node_text(&target);
        let anchor = if single { node } else { target };
        let kind = if class.is_enum && !name.starts_with('_') {
            SymbolKind::EnumMember
        } else {
            SymbolKind::Field
        };

        let mut collector = TypeRefCollector::new(&PYTHON_TYPES, &name);
        if let Some(annotation) = annotation {
            collector.collect(extractor.base_mut(), annotation)?;
        }
        let (type_references, generic_args) = collector.finish();

        let signature = render(extractor, &name, annotation, right);
        extractor.base_mut().add_symbol(
            &anchor,
            name.clone(),
            kind,
            SymbolOptions {
                exported: helpers::is_exported(&name),
                signature: Some(signature),
                receiver: Some(class.name.clone()),
                type_references,
                metadata: SymbolMetadata {
                    generic_args,
                    access_modifier: helpers::access_modifier(&name),
                    ..Default::default()
                },
                ..Default::default()
            },
            frame.parent,
        );
    }
    Ok(())
}

/// `self.x = ...` inside a method declares field `x` on the owning class
///
/// The first assignment wins; later ones (and names already declared on the class)
/// are ignored.
fn instance_fields(
    extractor: &mut PythonExtractor,
    node: Node,
    left: Node,
    class: &ClassInfo,
) -> Result<(), ParseError> {
    let right = node.child_by_field_name("right");
    let annotation = node.child_by_field_name("type");

    for target in targets(left) {
        if target.kind() != "attribute" {
            continue;
        }
        let base = extractor.base();
        let is_self = target
            .child_by_field_name("object")
            .is_some_and(|o| base.get_node_text(&o) == "self");
        let Some(attribute) = target.child_by_field_name("attribute") else {
            continue;
        };
        if !is_self {
            continue;
        }
        let name = base.get_node_text(&attribute);
        if base.arena.find_child(Some(class.idx), &name).is_some() {
            continue;
        }

        let mut collector = TypeRefCollector::new(&PYTHON_TYPES, &name);
        if let Some(annotation) = annotation {
            collector.collect(extractor.base_mut(), annotation)?;
        }
        let (type_references, generic_args) = collector.finish();

        let signature = render(extractor, &format!("self.{}", name), annotation, right);
        extractor.base_mut().add_symbol(
            &node,
            name.clone(),
            SymbolKind::Field,
            SymbolOptions {
                exported: helpers::is_exported(&name),
                signature: Some(signature),
                receiver: Some(class.name.clone()),
                type_references,
                metadata: SymbolMetadata {
                    generic_args,
                    access_modifier: helpers::access_modifier(&name),
                    ..Default::default()
                },
                ..Default::default()
            },
            Some(class.idx),
        );
    }
    Ok(())
}

/// `type Vector = list[float]` (PEP 695)
pub(super) fn extract_type_alias_statement(
    extractor: &mut PythonExtractor,
    node: Node,
    frame: &Frame<'_, Scope>,
) -> Result<(), ParseError> {
    let Some(left) = node.child_by_field_name("left") else {
        return Ok(());
    };
    let name = compact_text(&extractor.base().get_node_text(&left));
    let right = node.child_by_field_name("right");

    let mut collector = TypeRefCollector::new(&PYTHON_TYPES, &name);
    if let Some(right) = right {
        collector.collect(extractor.base_mut(), right)?;
    }
    let (type_references, generic_args) = collector.finish();

    let value = right
        .map(|r| compact_text(&extractor.base().get_node_text(&r)))
        .unwrap_or_default();
    let metadata = SymbolMetadata {
        type_params: signatures::type_parameters(extractor, &node),
        generic_args,
        ..Default::default()
    };
    extractor.base_mut().add_symbol(
        &node,
        name.clone(),
        SymbolKind::TypeAlias,
        SymbolOptions {
            exported: helpers::is_exported(&name),
            signature: Some(format!("type {} = {}", name, value)),
            type_references,
            metadata,
            ..Default::default()
        },
        frame.parent,
    );
    Ok(())
}

/// `name: T = value`, value clipped to one short line
fn render(
    extractor: &PythonExtractor,
    name: &str,
    annotation: Option<Node>,
    right: Option<Node>,
) -> String {
    let base = extractor.base();
    let mut signature = name.to_string();
    if let Some(annotation) = annotation {
        signature.push_str(": ");
        signature.push_str(&compact_text(&base.get_node_text(&annotation)));
    }
    if let Some(right) = right {
        signature.push_str(" = ");
        signature.push_str(&clip_value(&base.get_node_text(&right)));
    }
    signature
}
