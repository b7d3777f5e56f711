//! Grammar shapes shared by the TypeScript and JavaScript front ends
//!
//! tree-sitter-typescript extends the JavaScript grammar, so both front ends walk the
//! same statement, class and call shapes. TypeScript-only nodes never occur in a
//! JavaScript tree, which lets the shared code handle them unconditionally.
//!
//! - helpers: grammar tables, access modifiers, string handling
//! - calls: call-site syntax (`new`, member calls, `instanceof` narrowing)
//! - decorators: class, member and export decorators
//! - signatures: parameters, annotations, type parameters, return shapes
//! - functions: function declarations, function values, methods
//! - classes: class declarations, fields, constructor-assigned fields
//! - variables: module-level bindings
//! - modules: imports, exports, `require` and `import()`

pub(crate) mod calls;
pub(crate) mod classes;
pub(crate) mod decorators;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod modules;
pub(crate) mod signatures;
pub(crate) mod variables;

use tree_sitter::Node;

use crate::error::ParseError;
use crate::extractors::base::{BaseExtractor, Decorator, Frame, Step};

use functions::FunctionValue;

/// Enclosing class of a class body
#[derive(Debug, Clone)]
pub(crate) struct ClassInfo {
    pub idx: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Context {
    #[default]
    Module,
    /// `namespace X { ... }` / `declare module "x" { ... }`
    Namespace,
    ClassBody,
    FunctionBody,
}

impl Context {
    /// Where `const` / `let` / `var` bindings declare symbols
    pub fn is_module_level(self) -> bool {
        matches!(self, Context::Module | Context::Namespace)
    }
}

/// Lexical position of a node during the walk
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    pub context: Context,
    pub class: Option<ClassInfo>,
    /// Directly under an `export` statement
    pub exported: bool,
    /// Decorators written on the enclosing `export` statement
    pub decorators: Vec<Decorator>,
}

impl Scope {
    /// Scope for the body of a freshly declared symbol
    pub fn body(context: Context, class: Option<ClassInfo>) -> Self {
        Self {
            context,
            class,
            exported: false,
            decorators: Vec::new(),
        }
    }

    /// Same position, without the export marker
    pub fn inner(&self) -> Self {
        Self {
            exported: false,
            decorators: Vec::new(),
            ..self.clone()
        }
    }
}

/// Node kinds the ECMAScript walks react to
pub(crate) enum EsNode {
    Export,
    Import,
    Function,
    /// TypeScript overload signature without a body
    FunctionSignature,
    Class,
    ClassMember,
    /// `const` / `let` / `var` / `declare`: wrappers whose export marker carries over
    Declaration,
    Declarator,
    Assignment,
    Call,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
    Decorator,
    Other,
}

impl EsNode {
    pub fn classify(node: &Node) -> Self {
        match node.kind() {
            "export_statement" => EsNode::Export,
            "import_statement" => EsNode::Import,
            "function_declaration" | "generator_function_declaration" => EsNode::Function,
            "function_signature" => EsNode::FunctionSignature,
            "class_declaration" | "abstract_class_declaration" => EsNode::Class,
            "method_definition"
            | "abstract_method_signature"
            | "method_signature"
            | "public_field_definition"
            | "field_definition" => EsNode::ClassMember,
            "lexical_declaration" | "variable_declaration" | "ambient_declaration" => {
                EsNode::Declaration
            }
            "variable_declarator" => EsNode::Declarator,
            "assignment_expression" => EsNode::Assignment,
            "call_expression" => EsNode::Call,
            "interface_declaration" => EsNode::Interface,
            "type_alias_declaration" => EsNode::TypeAlias,
            "enum_declaration" => EsNode::Enum,
            "internal_module" | "module" => EsNode::Namespace,
            "decorator" => EsNode::Decorator,
            _ => EsNode::Other,
        }
    }
}

/// Walk the `body` field of a symbol's node under the given context
pub(crate) fn body_step<'t>(
    node: &Node<'t>,
    idx: usize,
    context: Context,
    class: Option<ClassInfo>,
) -> Step<'t, Scope> {
    match node.child_by_field_name("body") {
        Some(body) => Step::Nodes {
            nodes: vec![body],
            parent: Some(idx),
            scope: Scope::body(context, class),
        },
        None => Step::Skip,
    }
}

/// Step for a class declaration: its body is walked as a class body
pub(crate) fn class_step<'t>(node: &Node<'t>, class: ClassInfo) -> Step<'t, Scope> {
    body_step(node, class.idx, Context::ClassBody, Some(class))
}

/// `export default function () {}` / `export default class {}`
pub(crate) fn default_export<'t>(
    base: &mut BaseExtractor,
    statement: Node<'t>,
    value: Node<'t>,
    frame: &Frame<'t, Scope>,
) -> Result<Step<'t, Scope>, ParseError> {
    let scope = Scope {
        exported: true,
        decorators: decorators::own_decorators(base, &statement),
        ..frame.scope.clone()
    };
    let frame = Frame {
        node: value,
        depth: frame.depth,
        parent: frame.parent,
        scope,
    };

    if value.kind() == "class" {
        let (_, class) = classes::extract_class(base, value, None, statement, &frame)?;
        return Ok(class_step(&value, class));
    }

    let name = base
        .get_field_text(&value, "name")
        .unwrap_or_else(|| "default".to_string());
    let idx = functions::extract_function_value(
        base,
        statement,
        value,
        FunctionValue {
            exported: true,
            ..FunctionValue::new(name, "export default ")
        },
        frame.parent,
    )?;
    Ok(body_step(&value, idx, Context::FunctionBody, None))
}
