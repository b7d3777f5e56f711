//! TypeScript front end
//!
//! The statement, class and call shapes are shared with JavaScript (see
//! `extractors::ecmascript`); this module adds the dispatch and the declarations only
//! TypeScript has:
//!
//! - **declarations**: interfaces, type aliases, enums, namespaces and `declare module`
//!
//! `.tsx` files select the TSX grammar dialect; the extraction is identical.

pub(crate) mod declarations;

use tree_sitter::Tree;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extractors::base::{walk, BaseExtractor, Extraction, Frame, NodeVisitor, Step};
use crate::extractors::ecmascript::decorators::own_decorators;
use crate::extractors::ecmascript::modules::{self, ExportTarget, ExportedNames};
use crate::extractors::ecmascript::{
    body_step, class_step, classes, default_export, functions, variables, Context, EsNode, Scope,
};
use crate::extractors::frontend::FrontEnd;
use crate::language::Language;

/// TypeScript front end; configuration only, safe to share
#[derive(Debug, Clone, Default)]
pub struct TypeScriptFrontEnd {
    config: ParserConfig,
}

impl TypeScriptFrontEnd {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl FrontEnd for TypeScriptFrontEnd {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn extract(&self, base: BaseExtractor, tree: &Tree) -> Result<Extraction, ParseError> {
        let mut extractor = TypeScriptExtractor::new(base);
        walk(&mut extractor, tree.root_node(), Scope::default())?;
        Ok(extractor.finish())
    }
}

pub(crate) struct TypeScriptExtractor {
    base: BaseExtractor,
    /// Names listed in `export { ... }`, `export default x` and `export = x`
    exports: ExportedNames,
}

impl TypeScriptExtractor {
    pub fn new(base: BaseExtractor) -> Self {
        Self {
            base,
            exports: ExportedNames::default(),
        }
    }

    fn finish(mut self) -> Extraction {
        modules::mark_exported(&mut self.base.arena, &self.exports);
        self.base.finish()
    }
}

impl NodeVisitor for TypeScriptExtractor {
    type Scope = Scope;

    fn base_mut(&mut self) -> &mut BaseExtractor {
        &mut self.base
    }

    fn visit<'t>(&mut self, frame: &Frame<'t, Scope>) -> Result<Step<'t, Scope>, ParseError> {
        let node = frame.node;
        let base = &mut self.base;
        let descend = Step::Children {
            parent: frame.parent,
            scope: frame.scope.inner(),
        };

        match EsNode::classify(&node) {
            EsNode::Export => match modules::extract_export(base, node, &mut self.exports) {
                ExportTarget::Declaration(declaration) => Ok(Step::Nodes {
                    nodes: vec![declaration],
                    parent: frame.parent,
                    scope: Scope {
                        exported: true,
                        decorators: own_decorators(base, &node),
                        ..frame.scope.clone()
                    },
                }),
                ExportTarget::DefaultValue(value) => default_export(base, node, value, frame),
                ExportTarget::Nothing => Ok(Step::Skip),
            },
            EsNode::Import => {
                modules::extract_import_statement(base, node);
                Ok(Step::Skip)
            }
            EsNode::Function | EsNode::FunctionSignature => {
                let idx = functions::extract_function_declaration(base, node, frame)?;
                Ok(body_step(&node, idx, Context::FunctionBody, None))
            }
            EsNode::Class => {
                let (_, class) = classes::extract_class(base, node, None, node, frame)?;
                Ok(class_step(&node, class))
            }
            EsNode::ClassMember if frame.scope.context == Context::ClassBody => {
                classes::extract_member(base, node, frame)
            }
            // the export marker of `export const` / `export declare` reaches the declarators
            EsNode::Declaration => Ok(Step::Children {
                parent: frame.parent,
                scope: frame.scope.clone(),
            }),
            EsNode::Declarator if frame.scope.context.is_module_level() => {
                Ok(variables::extract_declarator(base, node, frame)?.step)
            }
            EsNode::Call => {
                modules::extract_call_import(base, &node);
                Ok(descend)
            }
            EsNode::Interface => {
                declarations::extract_interface(base, node, frame)?;
                Ok(Step::Skip)
            }
            EsNode::TypeAlias => {
                declarations::extract_type_alias(base, node, frame)?;
                Ok(Step::Skip)
            }
            EsNode::Enum => {
                declarations::extract_enum(base, node, frame)?;
                Ok(Step::Skip)
            }
            EsNode::Namespace => match declarations::extract_namespace(base, node, frame) {
                Some(idx) => Ok(body_step(&node, idx, Context::Namespace, None)),
                None => Ok(descend),
            },
            EsNode::Decorator => Ok(Step::Skip),
            EsNode::ClassMember
            | EsNode::Declarator
            | EsNode::Assignment
            | EsNode::Other => Ok(descend),
        }
    }
}
