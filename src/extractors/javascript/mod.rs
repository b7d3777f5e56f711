//! JavaScript front end
//!
//! Modern syntax (classes, ES modules, arrow functions) goes through the shapes shared
//! with TypeScript in `extractors::ecmascript`. On top of that, JavaScript code in the
//! wild still leans on patterns that predate `class` and `import`:
//!
//! - **commonjs**: `module.exports` / `exports.x` and property-assigned methods
//! - **legacy**: constructor functions, `inherits`-style prototype links and the
//!   synthetic class for an undeclared `module.exports` alias
//!
//! `.jsx` files use the same grammar.

pub(crate) mod commonjs;
pub(crate) mod legacy;

use tree_sitter::{Node, Tree};

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extractors::base::{
    walk, BaseExtractor, Extraction, Frame, NodeVisitor, Step, SymbolKind,
};
use crate::extractors::ecmascript::classes::{add_receiver_fields, receiver_assignments};
use crate::extractors::ecmascript::decorators::own_decorators;
use crate::extractors::ecmascript::modules::{self, ExportTarget, ExportedNames};
use crate::extractors::ecmascript::{
    body_step, class_step, classes, default_export, functions, variables, ClassInfo, Context,
    EsNode, Scope,
};
use crate::extractors::frontend::FrontEnd;
use crate::language::Language;
use crate::utils::naming::starts_uppercase;

use commonjs::ModuleState;
use legacy::LegacyFacts;

/// JavaScript front end; configuration only, safe to share
#[derive(Debug, Clone, Default)]
pub struct JavaScriptFrontEnd {
    config: ParserConfig,
}

impl JavaScriptFrontEnd {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl FrontEnd for JavaScriptFrontEnd {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn extract(&self, base: BaseExtractor, tree: &Tree) -> Result<Extraction, ParseError> {
        let mut extractor = JavaScriptExtractor::new(base);
        walk(&mut extractor, tree.root_node(), Scope::default())?;
        Ok(extractor.finish())
    }
}

pub(crate) struct JavaScriptExtractor {
    base: BaseExtractor,
    exports: ExportedNames,
    facts: LegacyFacts,
}

impl JavaScriptExtractor {
    pub fn new(base: BaseExtractor) -> Self {
        Self {
            base,
            exports: ExportedNames::default(),
            facts: LegacyFacts::default(),
        }
    }

    fn finish(mut self) -> Extraction {
        legacy::apply(&mut self.base.arena, &self.facts, &self.base.file_path);
        modules::mark_exported(&mut self.base.arena, &self.exports);
        self.base.finish()
    }

    /// `var app = module.exports = ...` names the module's export
    fn record_export_alias(&mut self, declarator: &Node) {
        let (Some(name), Some(value)) = (
            declarator.child_by_field_name("name"),
            declarator.child_by_field_name("value"),
        ) else {
            return;
        };
        if name.kind() != "identifier" || !assigns_module_exports(&self.base, &value) {
            return;
        }
        let name = self.base.get_node_text(&name);
        self.facts.alias(name.clone(), self.base.location(declarator));
        self.exports.insert(name);
    }
}

/// `module.exports = ...`, possibly chained: `exports = module.exports = ...`
fn assigns_module_exports(base: &BaseExtractor, value: &Node) -> bool {
    let mut current = *value;
    while current.kind() == "assignment_expression" {
        let Some(left) = current.child_by_field_name("left") else {
            return false;
        };
        if base.get_node_text(&left) == "module.exports" {
            return true;
        }
        match current.child_by_field_name("right") {
            Some(right) => current = right,
            None => return false,
        }
    }
    false
}

/// Promote a capitalized function that assigns to `this` into a class
///
/// Its `this.x` assignments become fields. Nested functions have their own receiver and
/// are not searched.
fn promote_constructor(
    base: &mut BaseExtractor,
    idx: usize,
    callable: Node,
) -> Result<Option<ClassInfo>, ParseError> {
    if callable.kind() == "arrow_function" {
        return Ok(None);
    }
    let name = match base.arena.get(idx) {
        Some(symbol) if symbol.kind == SymbolKind::Function && starts_uppercase(&symbol.name) => {
            symbol.name.clone()
        }
        _ => return Ok(None),
    };
    let Some(body) = callable.child_by_field_name("body") else {
        return Ok(None);
    };
    let assignments = receiver_assignments(base, body)?;
    if assignments.is_empty() {
        return Ok(None);
    }

    if let Some(symbol) = base.arena.get_mut(idx) {
        symbol.kind = SymbolKind::Class;
        symbol.metadata_mut().is_constructor = true;
    }
    let class = ClassInfo { idx, name };
    add_receiver_fields(base, assignments, &class);
    Ok(Some(class))
}

impl NodeVisitor for JavaScriptExtractor {
    type Scope = Scope;

    fn base_mut(&mut self) -> &mut BaseExtractor {
        &mut self.base
    }

    fn visit<'t>(&mut self, frame: &Frame<'t, Scope>) -> Result<Step<'t, Scope>, ParseError> {
        let node = frame.node;
        let descend = Step::Children {
            parent: frame.parent,
            scope: frame.scope.inner(),
        };

        match EsNode::classify(&node) {
            EsNode::Export => match modules::extract_export(&mut self.base, node, &mut self.exports)
            {
                ExportTarget::Declaration(declaration) => Ok(Step::Nodes {
                    nodes: vec![declaration],
                    parent: frame.parent,
                    scope: Scope {
                        exported: true,
                        decorators: own_decorators(&self.base, &node),
                        ..frame.scope.clone()
                    },
                }),
                ExportTarget::DefaultValue(value) => {
                    default_export(&mut self.base, node, value, frame)
                }
                ExportTarget::Nothing => Ok(Step::Skip),
            },
            EsNode::Import => {
                modules::extract_import_statement(&mut self.base, node);
                Ok(Step::Skip)
            }
            EsNode::Function => {
                let idx = functions::extract_function_declaration(&mut self.base, node, frame)?;
                let class = promote_constructor(&mut self.base, idx, node)?;
                Ok(body_step(&node, idx, Context::FunctionBody, class))
            }
            EsNode::Class => {
                let (_, class) = classes::extract_class(&mut self.base, node, None, node, frame)?;
                Ok(class_step(&node, class))
            }
            EsNode::ClassMember if frame.scope.context == Context::ClassBody => {
                classes::extract_member(&mut self.base, node, frame)
            }
            EsNode::Declaration => Ok(Step::Children {
                parent: frame.parent,
                scope: frame.scope.clone(),
            }),
            EsNode::Declarator if frame.scope.context.is_module_level() => {
                self.record_export_alias(&node);
                let binding = variables::extract_declarator(&mut self.base, node, frame)?;
                let value = node.child_by_field_name("value");
                match (binding.symbol, value) {
                    (Some(idx), Some(value)) => {
                        match promote_constructor(&mut self.base, idx, value)? {
                            Some(class) => {
                                Ok(body_step(&value, idx, Context::FunctionBody, Some(class)))
                            }
                            None => Ok(binding.step),
                        }
                    }
                    _ => Ok(binding.step),
                }
            }
            EsNode::Assignment if frame.scope.context.is_module_level() => {
                let state = ModuleState {
                    exports: &mut self.exports,
                    facts: &mut self.facts,
                };
                commonjs::extract_assignment(&mut self.base, node, frame, state)
            }
            EsNode::Call => {
                modules::extract_call_import(&mut self.base, &node);
                if let Some((child, parent)) = legacy::inheritance_call(&self.base, &node) {
                    self.facts.link(&child, &parent);
                }
                Ok(descend)
            }
            EsNode::Decorator => Ok(Step::Skip),
            // TypeScript-only shapes never occur in a JavaScript tree
            EsNode::FunctionSignature
            | EsNode::Interface
            | EsNode::TypeAlias
            | EsNode::Enum
            | EsNode::Namespace
            | EsNode::ClassMember
            | EsNode::Declarator
            | EsNode::Assignment
            | EsNode::Other => Ok(descend),
        }
    }
}
