/// Import statement extraction
/// Handles import, from...import, __future__, TYPE_CHECKING blocks, and dynamic imports
use tree_sitter::Node;

use super::helpers::strip_string_delimiters;
use super::PythonExtractor;
use crate::extractors::base::Import;

const DYNAMIC_IMPORTERS: &[&str] = &["importlib.import_module", "import_module", "__import__"];

/// Record the imports of one import statement
pub(super) fn extract_imports(extractor: &mut PythonExtractor, node: Node, type_only: bool) {
    match node.kind() {
        "import_statement" => extract_module_imports(extractor, node, type_only),
        "import_from_statement" | "future_import_statement" => {
            extract_from_import(extractor, node, type_only)
        }
        _ => {}
    }
}

/// `import a.b` / `import a.b as c`: one module import per dotted name
fn extract_module_imports(extractor: &mut PythonExtractor, node: Node, type_only: bool) {
    let base = extractor.base();
    let mut imports = Vec::new();

    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        let (path, alias) = match child.kind() {
            "aliased_import" => (
                base.get_field_text(&child, "name").unwrap_or_default(),
                base.get_field_text(&child, "alias").unwrap_or_default(),
            ),
            _ => (base.get_node_text(&child), String::new()),
        };
        imports.push(Import {
            path,
            alias,
            is_module: true,
            is_type_only: type_only,
            ..Default::default()
        });
    }

    for import in imports {
        extractor.base_mut().add_import(&node, import);
    }
}

/// `from x import a, b as c` -> one import with names `["a", "b as c"]`
fn extract_from_import(extractor: &mut PythonExtractor, node: Node, type_only: bool) {
    let base = extractor.base();
    let path = if node.kind() == "future_import_statement" {
        "__future__".to_string()
    } else {
        match node.child_by_field_name("module_name") {
            Some(module) => base.get_node_text(&module),
            None => return,
        }
    };

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        match child.kind() {
            "aliased_import" => {
                let name = base.get_field_text(&child, "name").unwrap_or_default();
                let alias = base.get_field_text(&child, "alias").unwrap_or_default();
                names.push(format!("{} as {}", name, alias));
            }
            _ => names.push(base.get_node_text(&child)),
        }
    }

    let mut cursor = node.walk();
    let is_wildcard = node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "wildcard_import");

    let import = Import {
        is_relative: path.starts_with('.'),
        path,
        names,
        is_wildcard,
        is_type_only: type_only,
        ..Default::default()
    };
    extractor.base_mut().add_import(&node, import);
}

/// `importlib.import_module("pkg.mod")` / `__import__("mod")` with a literal argument
pub(super) fn extract_dynamic_import(extractor: &mut PythonExtractor, node: &Node) {
    let base = extractor.base();
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };
    if !DYNAMIC_IMPORTERS.contains(&base.get_node_text(&function).as_str()) {
        return;
    }
    let Some(arguments) = node.child_by_field_name("arguments") else {
        return;
    };
    let mut cursor = arguments.walk();
    let Some(first) = arguments.named_children(&mut cursor).next() else {
        return;
    };
    if first.kind() != "string" {
        return;
    }
    let path = strip_string_delimiters(&base.get_node_text(&first));
    if path.is_empty() {
        return;
    }

    let import = Import {
        is_relative: path.starts_with('.'),
        path,
        is_dynamic: true,
        is_module: true,
        ..Default::default()
    };
    extractor.base_mut().add_import(node, import);
}

/// `if TYPE_CHECKING:` / `if typing.TYPE_CHECKING:`
pub(super) fn is_type_checking_guard(extractor: &PythonExtractor, node: &Node) -> bool {
    node.child_by_field_name("condition")
        .map(|c| extractor.base().get_node_text(&c))
        .is_some_and(|c| c == "TYPE_CHECKING" || c == "typing.TYPE_CHECKING")
}
