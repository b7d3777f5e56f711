/// Module-level `const` / `let` / `var` bindings
/// Function values become functions, class expressions become classes, everything
/// else is a variable or (for `const SCREAMING_CASE`) a constant
use tree_sitter::Node;

use super::functions::{self, FunctionValue};
use super::helpers::{self, ECMA_TYPES};
use super::{body_step, class_step, classes, modules, Context, Scope};
use crate::error::ParseError;
use crate::extractors::base::calls::{clip_value, compact_text};
use crate::extractors::base::{
    BaseExtractor, Frame, Step, SymbolKind, SymbolMetadata, SymbolOptions, TypeRefCollector,
};
use crate::utils::naming::is_screaming_case;

/// A binding that was turned into a symbol, and how the walk continues
pub(crate) struct Binding<'t> {
    pub symbol: Option<usize>,
    pub step: Step<'t, Scope>,
}

/// `const` / `let` / `var` of the declaration owning a declarator
fn declaration_keyword(base: &BaseExtractor, declarator: &Node) -> String {
    match declarator.parent() {
        Some(parent) if parent.kind() == "variable_declaration" => "var".to_string(),
        Some(parent) => parent
            .child_by_field_name("kind")
            .map(|kind| base.get_node_text(&kind))
            .unwrap_or_else(|| "const".to_string()),
        None => "var".to_string(),
    }
}

/// Extract one `variable_declarator` at module (or namespace) level
pub(crate) fn extract_declarator<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    frame: &Frame<'t, Scope>,
) -> Result<Binding<'t>, ParseError> {
    let Some(pattern) = node.child_by_field_name("name") else {
        return Ok(Binding {
            symbol: None,
            step: Step::Skip,
        });
    };
    let value = node.child_by_field_name("value");

    if let Some(value) = value {
        if modules::extract_require_binding(base, node, pattern, value) {
            return Ok(Binding {
                symbol: None,
                step: Step::Skip,
            });
        }
    }

    // destructuring declares no single symbol; its value may still hold calls
    if pattern.kind() != "identifier" {
        return Ok(Binding {
            symbol: None,
            step: value_step(value, frame.parent),
        });
    }

    let name = base.get_node_text(&pattern);
    let keyword = declaration_keyword(base, &node);

    match value {
        Some(value) if helpers::is_function_value(&value) => {
            let spec = FunctionValue {
                exported: frame.scope.exported,
                ..FunctionValue::new(name.clone(), format!("{} {} = ", keyword, name))
            };
            let idx = functions::extract_function_value(base, node, value, spec, frame.parent)?;
            Ok(Binding {
                symbol: Some(idx),
                step: body_step(&value, idx, Context::FunctionBody, None),
            })
        }
        Some(value) if value.kind() == "class" => {
            let (idx, class) = classes::extract_class(base, value, Some(name), node, frame)?;
            Ok(Binding {
                symbol: Some(idx),
                step: class_step(&value, class),
            })
        }
        _ => {
            let idx = extract_variable(base, node, name, &keyword, value, frame)?;
            Ok(Binding {
                symbol: Some(idx),
                step: value_step(value, Some(idx)),
            })
        }
    }
}

fn extract_variable(
    base: &mut BaseExtractor,
    node: Node,
    name: String,
    keyword: &str,
    value: Option<Node>,
    frame: &Frame<'_, Scope>,
) -> Result<usize, ParseError> {
    let annotation = node.child_by_field_name("type");
    let kind = if keyword == "const" && is_screaming_case(&name) {
        SymbolKind::Constant
    } else {
        SymbolKind::Variable
    };

    let mut collector = TypeRefCollector::new(&ECMA_TYPES, &name);
    if let Some(annotation) = annotation {
        collector.collect(base, annotation)?;
    }
    let (type_references, generic_args) = collector.finish();

    let mut signature = format!("{} {}", keyword, name);
    if let Some(annotation) = annotation {
        signature.push_str(&compact_text(&base.get_node_text(&annotation)));
    }
    if let Some(value) = value {
        signature.push_str(" = ");
        signature.push_str(&clip_value(&base.get_node_text(&value)));
    }

    Ok(base.add_symbol(
        &node,
        name,
        kind,
        SymbolOptions {
            exported: frame.scope.exported,
            signature: Some(signature),
            type_references,
            metadata: SymbolMetadata {
                generic_args,
                ..Default::default()
            },
            ..Default::default()
        },
        frame.parent,
    ))
}

/// Keep walking an initializer: nested functions and calls inside it are not module-level
fn value_step<'t>(value: Option<Node<'t>>, parent: Option<usize>) -> Step<'t, Scope> {
    match value {
        Some(value) => Step::Nodes {
            nodes: vec![value],
            parent,
            scope: Scope::body(Context::FunctionBody, None),
        },
        None => Step::Skip,
    }
}
