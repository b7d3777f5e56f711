/// Module-level assignments: CommonJS exports and prototype-based members
///
/// - `module.exports = ...` and `exports.x = ...`
/// - `X.prototype.m = function () {}` and `X.prototype = { ... }`
/// - `X.prototype = Object.create(P.prototype)`
/// - `X.m = function () {}`
use tree_sitter::Node;

use super::legacy::{self, LegacyFacts};
use crate::error::ParseError;
use crate::extractors::base::calls::clip_value;
use crate::extractors::base::traversal::named_children;
use crate::extractors::base::{BaseExtractor, Frame, Step, SymbolKind, SymbolOptions};
use crate::extractors::ecmascript::functions::{self, FunctionValue};
use crate::extractors::ecmascript::helpers::{self, member_name, strip_quotes};
use crate::extractors::ecmascript::modules::ExportedNames;
use crate::extractors::ecmascript::{body_step, class_step, classes, Context, Scope};
use crate::utils::naming::{is_screaming_case, semantic_module_name, starts_uppercase};

/// Export and legacy-pattern bookkeeping threaded through the walk
pub(crate) struct ModuleState<'a> {
    pub exports: &'a mut ExportedNames,
    pub facts: &'a mut LegacyFacts,
}

/// Target of an assignment, split into the parts the patterns look at
struct Target {
    /// Full left-hand text: `module.exports.x`
    text: String,
    /// Everything before the last property: `module.exports`
    object: String,
    property: String,
    /// Owner of `X.prototype.m`
    prototype_owner: Option<String>,
}

fn read_target(base: &BaseExtractor, left: &Node) -> Option<Target> {
    if left.kind() != "member_expression" {
        return None;
    }
    let object = left.child_by_field_name("object")?;
    if object.kind() == "this" {
        return None;
    }
    let property = base.get_node_text(&left.child_by_field_name("property")?);

    let prototype_owner = (object.kind() == "member_expression")
        .then(|| {
            let inner = object.child_by_field_name("property")?;
            (base.get_node_text(&inner) == "prototype")
                .then(|| object.child_by_field_name("object"))
                .flatten()
                .map(|owner| base.get_node_text(&owner))
        })
        .flatten();

    Some(Target {
        text: base.get_node_text(left),
        object: base.get_node_text(&object),
        property,
        prototype_owner,
    })
}

fn is_exports_object(text: &str) -> bool {
    text == "exports" || text == "module.exports"
}

/// Handle one module-level `assignment_expression`; returns how the walk continues
pub(crate) fn extract_assignment<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    frame: &Frame<'t, Scope>,
    state: ModuleState<'_>,
) -> Result<Step<'t, Scope>, ParseError> {
    let descend = Step::Children {
        parent: frame.parent,
        scope: frame.scope.inner(),
    };
    let (Some(left), Some(right)) = (
        node.child_by_field_name("left"),
        node.child_by_field_name("right"),
    ) else {
        return Ok(descend);
    };
    let Some(target) = read_target(base, &left) else {
        return Ok(descend);
    };

    if target.text == "module.exports" {
        return module_exports(base, node, right, frame, state);
    }
    if is_exports_object(&target.object) {
        return named_export(base, node, right, &target, frame, state.exports);
    }
    if let Some(owner) = &target.prototype_owner {
        if helpers::is_function_value(&right) {
            let spec = FunctionValue {
                kind: SymbolKind::Method,
                receiver: Some(owner.clone()),
                exported: true,
                ..FunctionValue::new(target.property.clone(), format!("{} = ", target.text))
            };
            let idx = functions::extract_function_value(base, node, right, spec, frame.parent)?;
            return Ok(body_step(&right, idx, Context::FunctionBody, None));
        }
        return Ok(descend);
    }
    if target.property == "prototype" {
        return prototype_assignment(base, right, &target, frame, state.facts, descend);
    }
    if helpers::is_function_value(&right) {
        let spec = FunctionValue {
            kind: SymbolKind::Method,
            receiver: Some(target.object.clone()),
            exported: true,
            is_static: starts_uppercase(&target.object),
            ..FunctionValue::new(target.property.clone(), format!("{} = ", target.text))
        };
        let idx = functions::extract_function_value(base, node, right, spec, frame.parent)?;
        return Ok(body_step(&right, idx, Context::FunctionBody, None));
    }
    Ok(descend)
}

/// `module.exports = <value>`
fn module_exports<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    right: Node<'t>,
    frame: &Frame<'t, Scope>,
    state: ModuleState<'_>,
) -> Result<Step<'t, Scope>, ParseError> {
    let exported_scope = Frame {
        node: right,
        depth: frame.depth,
        parent: frame.parent,
        scope: Scope {
            exported: true,
            ..frame.scope.inner()
        },
    };

    match right.kind() {
        "identifier" => {
            let name = base.get_node_text(&right);
            state.facts.alias(name.clone(), base.location(&node));
            state.exports.insert(name);
            Ok(Step::Skip)
        }
        "object" => {
            mark_object_exports(base, &right, state.exports);
            Ok(Step::Children {
                parent: frame.parent,
                scope: frame.scope.inner(),
            })
        }
        "class" => {
            let name = base
                .get_field_text(&right, "name")
                .or_else(|| semantic_module_name(&base.file_path));
            let (_, class) = classes::extract_class(base, right, name, node, &exported_scope)?;
            Ok(class_step(&right, class))
        }
        _ if helpers::is_function_value(&right) => {
            let name = base
                .get_field_text(&right, "name")
                .or_else(|| semantic_module_name(&base.file_path))
                .unwrap_or_else(|| "default".to_string());
            let spec = FunctionValue {
                exported: true,
                ..FunctionValue::new(name, "module.exports = ")
            };
            let idx = functions::extract_function_value(base, node, right, spec, frame.parent)?;
            Ok(body_step(&right, idx, Context::FunctionBody, None))
        }
        // `module.exports = exports = ...` and `module.exports = require("./x")`
        _ => Ok(Step::Children {
            parent: frame.parent,
            scope: frame.scope.inner(),
        }),
    }
}

/// `{ a, b: b, c: impl }` exports `a`, `b` and `impl`
fn mark_object_exports(base: &BaseExtractor, object: &Node, exports: &mut ExportedNames) {
    for entry in named_children(object) {
        match entry.kind() {
            "shorthand_property_identifier" => exports.insert(base.get_node_text(&entry)),
            "pair" => {
                if let Some(value) = entry
                    .child_by_field_name("value")
                    .filter(|v| v.kind() == "identifier")
                {
                    exports.insert(base.get_node_text(&value));
                }
            }
            _ => {}
        }
    }
}

/// `exports.x = ...` / `module.exports.x = ...`
fn named_export<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    right: Node<'t>,
    target: &Target,
    frame: &Frame<'t, Scope>,
    exports: &mut ExportedNames,
) -> Result<Step<'t, Scope>, ParseError> {
    let name = target.property.clone();

    if helpers::is_function_value(&right) {
        let spec = FunctionValue {
            exported: true,
            ..FunctionValue::new(name, format!("{} = ", target.text))
        };
        let idx = functions::extract_function_value(base, node, right, spec, frame.parent)?;
        return Ok(body_step(&right, idx, Context::FunctionBody, None));
    }
    if right.kind() == "identifier" {
        exports.insert(base.get_node_text(&right));
        return Ok(Step::Skip);
    }

    let kind = if is_screaming_case(&name) {
        SymbolKind::Constant
    } else {
        SymbolKind::Variable
    };
    let signature = format!("{} = {}", target.text, clip_value(&base.get_node_text(&right)));
    let idx = base.add_symbol(
        &node,
        name,
        kind,
        SymbolOptions {
            exported: true,
            signature: Some(signature),
            ..Default::default()
        },
        frame.parent,
    );
    Ok(Step::Nodes {
        nodes: vec![right],
        parent: Some(idx),
        scope: Scope::body(Context::FunctionBody, None),
    })
}

/// `X.prototype = { ... }` and `X.prototype = Object.create(P.prototype)`
fn prototype_assignment<'t>(
    base: &mut BaseExtractor,
    right: Node<'t>,
    target: &Target,
    frame: &Frame<'t, Scope>,
    facts: &mut LegacyFacts,
    descend: Step<'t, Scope>,
) -> Result<Step<'t, Scope>, ParseError> {
    let owner = target.object.clone();

    if let Some(supertype) = legacy::allocated_prototype(base, &right) {
        facts.link(&owner, &supertype);
        return Ok(descend);
    }
    if right.kind() != "object" {
        return Ok(descend);
    }

    for entry in named_children(&right) {
        base.tick()?;
        let (name, value) = match entry.kind() {
            "pair" => {
                let Some(value) = entry
                    .child_by_field_name("value")
                    .filter(helpers::is_function_value)
                else {
                    continue;
                };
                let Some(name) = base.get_field_text(&entry, "key").map(|k| strip_quotes(&k)) else {
                    continue;
                };
                (name, value)
            }
            "method_definition" => {
                let Some(name) = member_name(base, &entry) else {
                    continue;
                };
                (name, entry)
            }
            _ => continue,
        };
        let prefix = if entry.kind() == "pair" {
            format!("{}: ", name)
        } else {
            String::new()
        };
        let spec = FunctionValue {
            kind: SymbolKind::Method,
            receiver: Some(owner.clone()),
            exported: true,
            ..FunctionValue::new(name, prefix)
        };
        functions::extract_function_value(base, entry, value, spec, frame.parent)?;
    }
    Ok(Step::Skip)
}
