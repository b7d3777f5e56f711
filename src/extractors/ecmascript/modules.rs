/// Import and export extraction
/// Handles ES module imports, export statements and clauses, re-exports, TypeScript
/// `import x = require()`, CommonJS `require` and dynamic `import()`
use tree_sitter::Node;

use super::helpers::{self, first_string_argument, is_relative_path, strip_quotes};
use crate::extractors::base::traversal::{find_child_by_type, has_child_kind, named_children};
use crate::extractors::base::{BaseExtractor, Import, SymbolArena};

/// Local names made public by export clauses or CommonJS export forms
#[derive(Debug, Default)]
pub(crate) struct ExportedNames {
    names: Vec<String>,
}

impl ExportedNames {
    pub fn insert(&mut self, name: String) {
        if !name.is_empty() && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Mark top-level symbols named by an export clause as exported
pub(crate) fn mark_exported(arena: &mut SymbolArena, exported: &ExportedNames) {
    let marked: Vec<usize> = arena
        .iter()
        .filter(|(_, parent, symbol)| parent.is_none() && exported.contains(&symbol.name))
        .map(|(idx, _, _)| idx)
        .collect();
    for idx in marked {
        if let Some(symbol) = arena.get_mut(idx) {
            symbol.exported = true;
        }
    }
}

/// What an export statement hands back to the walk
pub(crate) enum ExportTarget<'t> {
    /// `export <declaration>`
    Declaration(Node<'t>),
    /// `export default function () {}` / `export default class {}`
    DefaultValue(Node<'t>),
    Nothing,
}

/// `import ... from "x"`, `import "x"`, `import x = require("x")`
pub(crate) fn extract_import_statement(base: &mut BaseExtractor, node: Node) {
    let type_only = has_child_kind(&node, "type");

    if let Some(clause) = find_child_by_type(&node, "import_require_clause") {
        let alias = named_children(&clause)
            .into_iter()
            .find(|c| c.kind() == "identifier")
            .map(|c| base.get_node_text(&c))
            .unwrap_or_default();
        let Some(path) = clause
            .child_by_field_name("source")
            .map(|s| strip_quotes(&base.get_node_text(&s)))
        else {
            return;
        };
        let import = Import {
            is_relative: is_relative_path(&path),
            path,
            alias,
            is_common_js: true,
            is_module: true,
            is_type_only: type_only,
            ..Default::default()
        };
        base.add_import(&node, import);
        return;
    }

    let Some(path) = node
        .child_by_field_name("source")
        .map(|s| strip_quotes(&base.get_node_text(&s)))
    else {
        return;
    };
    let mut import = Import {
        is_relative: is_relative_path(&path),
        path,
        is_type_only: type_only,
        ..Default::default()
    };

    match find_child_by_type(&node, "import_clause") {
        Some(clause) => {
            for child in named_children(&clause) {
                match child.kind() {
                    "identifier" => {
                        import.alias = base.get_node_text(&child);
                        import.is_default = true;
                    }
                    "namespace_import" => {
                        import.alias = named_children(&child)
                            .into_iter()
                            .find(|c| c.kind() == "identifier")
                            .map(|c| base.get_node_text(&c))
                            .unwrap_or_default();
                        import.is_namespace = true;
                    }
                    "named_imports" => {
                        for specifier in named_children(&child) {
                            if specifier.kind() == "import_specifier" {
                                import.names.push(render_specifier(base, &specifier));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        // side-effect import: `import "./polyfills"`
        None => import.is_module = true,
    }

    base.add_import(&node, import);
}

/// `name` or `name as alias`
fn render_specifier(base: &BaseExtractor, specifier: &Node) -> String {
    let name = base
        .get_field_text(specifier, "name")
        .map(|n| strip_quotes(&n))
        .unwrap_or_default();
    match base.get_field_text(specifier, "alias") {
        Some(alias) if alias != name => format!("{} as {}", name, alias),
        _ => name,
    }
}

/// Record what an export statement exports
///
/// Re-exports (`export * from`, `export { a } from`) become imports. Local export
/// clauses and `export default <identifier>` / `export = X` record names to mark once
/// extraction is complete.
pub(crate) fn extract_export<'t>(
    base: &mut BaseExtractor,
    node: Node<'t>,
    exported: &mut ExportedNames,
) -> ExportTarget<'t> {
    if let Some(declaration) = node.child_by_field_name("declaration") {
        return ExportTarget::Declaration(declaration);
    }

    let clause = find_child_by_type(&node, "export_clause");
    if let Some(source) = node.child_by_field_name("source") {
        let path = strip_quotes(&base.get_node_text(&source));
        let mut import = Import {
            is_relative: is_relative_path(&path),
            path,
            is_type_only: has_child_kind(&node, "type"),
            ..Default::default()
        };
        if let Some(clause) = clause {
            import.names = named_children(&clause)
                .iter()
                .filter(|s| s.kind() == "export_specifier")
                .map(|s| render_specifier(base, s))
                .collect();
        } else if let Some(namespace) = find_child_by_type(&node, "namespace_export") {
            import.alias = named_children(&namespace)
                .into_iter()
                .find(|c| c.kind() == "identifier")
                .map(|c| base.get_node_text(&c))
                .unwrap_or_default();
            import.is_namespace = true;
        } else {
            import.is_wildcard = true;
        }
        base.add_import(&node, import);
        return ExportTarget::Nothing;
    }

    if let Some(clause) = clause {
        for specifier in named_children(&clause) {
            if specifier.kind() == "export_specifier" {
                if let Some(name) = base.get_field_text(&specifier, "name") {
                    exported.insert(name);
                }
            }
        }
        return ExportTarget::Nothing;
    }

    let value = node.child_by_field_name("value").or_else(|| {
        // TypeScript `export = Foo`
        has_child_kind(&node, "=")
            .then(|| named_children(&node).into_iter().find(|c| c.kind() != "comment"))
            .flatten()
    });
    match value {
        Some(value) if value.kind() == "identifier" => {
            exported.insert(base.get_node_text(&value));
            ExportTarget::Nothing
        }
        Some(value) if value.kind() == "class" || helpers::is_function_value(&value) => {
            ExportTarget::DefaultValue(value)
        }
        _ => ExportTarget::Nothing,
    }
}

/// Whether a call is `require("literal")`
pub(crate) fn is_require_call(base: &BaseExtractor, node: &Node) -> bool {
    node.kind() == "call_expression"
        && node
            .child_by_field_name("function")
            .is_some_and(|f| f.kind() == "identifier" && base.get_node_text(&f) == "require")
        && first_string_argument(base, node).is_some()
}

/// `const x = require("x")` / `const { a, b: c } = require("x")`
///
/// Returns false when the declarator is not a require binding.
pub(crate) fn extract_require_binding(
    base: &mut BaseExtractor,
    declarator: Node,
    pattern: Node,
    value: Node,
) -> bool {
    if !is_require_call(base, &value) {
        return false;
    }
    let Some(path) = first_string_argument(base, &value) else {
        return false;
    };

    let mut import = Import {
        is_relative: is_relative_path(&path),
        path,
        is_common_js: true,
        ..Default::default()
    };
    match pattern.kind() {
        "identifier" => {
            import.alias = base.get_node_text(&pattern);
            import.is_module = true;
        }
        "object_pattern" => {
            for property in named_children(&pattern) {
                match property.kind() {
                    "shorthand_property_identifier_pattern" => {
                        import.names.push(base.get_node_text(&property));
                    }
                    "pair_pattern" => {
                        let key = base.get_field_text(&property, "key").unwrap_or_default();
                        let local = base.get_field_text(&property, "value").unwrap_or_default();
                        if key == local || local.is_empty() {
                            import.names.push(key);
                        } else {
                            import.names.push(format!("{} as {}", key, local));
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => import.is_module = true,
    }
    base.add_import(&declarator, import);
    true
}

/// Bare `require("x")` and dynamic `import("x")` anywhere in the file
pub(crate) fn extract_call_import(base: &mut BaseExtractor, node: &Node) {
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };
    let is_dynamic = function.kind() == "import";
    if !is_dynamic && !is_require_call(base, node) {
        return;
    }
    let Some(path) = first_string_argument(base, node) else {
        return;
    };
    let import = Import {
        is_relative: is_relative_path(&path),
        path,
        is_dynamic,
        is_common_js: !is_dynamic,
        is_module: true,
        ..Default::default()
    };
    base.add_import(node, import);
}
