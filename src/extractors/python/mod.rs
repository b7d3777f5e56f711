/// Python front end
///
/// This module is organized into focused sub-modules:
/// - helpers: visibility rules, grammar tables, string handling
/// - calls: call-site syntax (`super()` normalization, `isinstance` narrowing)
/// - types: classes, enums, protocol / ABC interface detection, docstrings
/// - functions: functions, methods, properties, module-level lambdas
/// - signatures: parameters, annotations, type parameters
/// - decorators: decorator names and captured arguments
/// - imports: import statements, `TYPE_CHECKING` blocks, dynamic imports
/// - assignments: variables, constants, type aliases, class and instance fields
pub(crate) mod assignments;
pub(crate) mod calls;
pub(crate) mod decorators;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod imports;
pub(crate) mod signatures;
pub(crate) mod types;

use tree_sitter::{Node, Tree};

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::extractors::base::{walk, BaseExtractor, Decorator, Extraction, Frame, NodeVisitor, Step};
use crate::extractors::frontend::FrontEnd;
use crate::language::Language;

/// Python front end; configuration only, safe to share
#[derive(Debug, Clone, Default)]
pub struct PythonFrontEnd {
    config: ParserConfig,
}

impl PythonFrontEnd {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl FrontEnd for PythonFrontEnd {
    fn language(&self) -> Language {
        Language::Python
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn extract(&self, base: BaseExtractor, tree: &Tree) -> Result<Extraction, ParseError> {
        let mut extractor = PythonExtractor::new(base);
        walk(&mut extractor, tree.root_node(), Scope::default())?;
        Ok(extractor.base.finish())
    }
}

/// Enclosing class of a class body or method body
#[derive(Debug, Clone)]
pub(crate) struct ClassInfo {
    pub idx: usize,
    pub name: String,
    pub is_enum: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Context {
    #[default]
    Module,
    ClassBody,
    FunctionBody {
        is_method: bool,
    },
}

/// Lexical position of a node during the walk
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    pub context: Context,
    pub class: Option<ClassInfo>,
    /// Inside `if TYPE_CHECKING:`
    pub type_checking: bool,
}

/// Node kinds the Python walk reacts to
enum PyNode<'t> {
    Decorated {
        definition: Node<'t>,
    },
    Class,
    Function,
    Assignment,
    Import,
    TypeAlias,
    If,
    Call,
    Other,
}

impl<'t> PyNode<'t> {
    fn classify(node: &Node<'t>) -> Self {
        match node.kind() {
            "decorated_definition" => match node.child_by_field_name("definition") {
                Some(definition) => PyNode::Decorated { definition },
                None => PyNode::Other,
            },
            "class_definition" => PyNode::Class,
            "function_definition" => PyNode::Function,
            "assignment" => PyNode::Assignment,
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                PyNode::Import
            }
            "type_alias_statement" => PyNode::TypeAlias,
            "if_statement" => PyNode::If,
            "call" => PyNode::Call,
            _ => PyNode::Other,
        }
    }
}

pub(crate) struct PythonExtractor {
    base: BaseExtractor,
}

impl PythonExtractor {
    pub fn new(base: BaseExtractor) -> Self {
        Self { base }
    }

    /// Handle a class or function definition, with decorators already read
    fn visit_definition<'t>(
        &mut self,
        node: Node<'t>,
        decorators: Vec<Decorator>,
        frame: &Frame<'t, Scope>,
    ) -> Result<Step<'t, Scope>, ParseError> {
        let Some(body) = node.child_by_field_name("body") else {
            return Ok(Step::Skip);
        };
        match node.kind() {
            "class_definition" => {
                let (idx, info) = types::extract_class(self, node, decorators, frame)?;
                Ok(Step::Nodes {
                    nodes: vec![body],
                    parent: Some(idx),
                    scope: Scope {
                        context: Context::ClassBody,
                        class: Some(info),
                        type_checking: false,
                    },
                })
            }
            "function_definition" => {
                let is_method = frame.scope.context == Context::ClassBody;
                let idx = functions::extract_function(self, node, decorators, frame)?;
                Ok(Step::Nodes {
                    nodes: vec![body],
                    parent: Some(idx),
                    scope: Scope {
                        context: Context::FunctionBody { is_method },
                        class: frame.scope.class.clone(),
                        type_checking: false,
                    },
                })
            }
            _ => Ok(Step::Skip),
        }
    }

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut BaseExtractor {
        &mut self.base
    }
}

impl NodeVisitor for PythonExtractor {
    type Scope = Scope;

    fn base_mut(&mut self) -> &mut BaseExtractor {
        &mut self.base
    }

    fn visit<'t>(&mut self, frame: &Frame<'t, Scope>) -> Result<Step<'t, Scope>, ParseError> {
        let node = frame.node;
        let descend = Step::Children {
            parent: frame.parent,
            scope: frame.scope.clone(),
        };

        match PyNode::classify(&node) {
            PyNode::Decorated { definition } => {
                let decorators = decorators::extract_decorators(self, &node);
                self.visit_definition(definition, decorators, frame)
            }
            PyNode::Class | PyNode::Function => self.visit_definition(node, Vec::new(), frame),
            PyNode::Assignment => {
                assignments::extract_assignment(self, node, frame)?;
                Ok(descend)
            }
            PyNode::Import => {
                imports::extract_imports(self, node, frame.scope.type_checking);
                Ok(Step::Skip)
            }
            PyNode::TypeAlias => {
                assignments::extract_type_alias_statement(self, node, frame)?;
                Ok(Step::Skip)
            }
            PyNode::If if imports::is_type_checking_guard(self, &node) => {
                // the guarded branch gets its own scope; else-branches run at runtime
                let mut nodes = Vec::new();
                if let Some(consequence) = node.child_by_field_name("consequence") {
                    let guarded = Scope {
                        type_checking: true,
                        ..frame.scope.clone()
                    };
                    nodes.push((consequence, guarded));
                }
                let mut cursor = node.walk();
                nodes.extend(
                    node.children_by_field_name("alternative", &mut cursor)
                        .map(|alternative| (alternative, frame.scope.clone())),
                );
                Ok(Step::Scoped {
                    nodes,
                    parent: frame.parent,
                })
            }
            PyNode::Call => {
                imports::extract_dynamic_import(self, &node);
                Ok(descend)
            }
            PyNode::If | PyNode::Other => Ok(descend),
        }
    }
}
