/// Helper utilities for Python symbol extraction
/// Visibility conventions, grammar tables, and string handling
use tree_sitter::Node;

use super::PythonExtractor;
use crate::extractors::base::{AccessModifier, DecoratorGrammar, TypeGrammar};
use crate::utils::naming::base_type_name;

pub(super) static PYTHON_TYPES: TypeGrammar = TypeGrammar {
    name_kinds: &["identifier"],
    qualified_kinds: &[("attribute", "attribute"), ("member_type", "")],
    opaque_kinds: &[
        "string",
        "concatenated_string",
        "integer",
        "float",
        "none",
        "true",
        "false",
        "ellipsis",
        "keyword_argument",
        "call",
        "comment",
    ],
    argument_list_kinds: &["type_parameter"],
    builtins: &[
        "str",
        "int",
        "float",
        "bool",
        "bytes",
        "bytearray",
        "complex",
        "object",
        "type",
        "list",
        "dict",
        "set",
        "frozenset",
        "tuple",
        "None",
        "Optional",
        "List",
        "Dict",
        "Set",
        "FrozenSet",
        "Tuple",
        "Union",
        "Any",
        "Callable",
        "Type",
        "Iterable",
        "Iterator",
        "Generator",
        "AsyncGenerator",
        "AsyncIterator",
        "AsyncIterable",
        "Awaitable",
        "Coroutine",
        "Sequence",
        "MutableSequence",
        "Mapping",
        "MutableMapping",
        "Literal",
        "Final",
        "ClassVar",
        "Annotated",
        "TypeVar",
        "Generic",
        "Protocol",
        "Self",
        "NoReturn",
        "Never",
        "TypeAlias",
        "typing",
    ],
};

pub(super) static PYTHON_DECORATORS: DecoratorGrammar = DecoratorGrammar {
    call_kind: "call",
    reference_kinds: &["identifier", "attribute"],
    container_kinds: &["list", "tuple", "set", "dictionary", "parenthesized_expression"],
    pair_kinds: &[("keyword_argument", "value"), ("pair", "value")],
};

/// Bases that make a class an `Enum`
pub(super) const ENUM_BASES: &[&str] = &["Enum", "IntEnum", "StrEnum", "Flag", "IntFlag"];

/// Decorators marking an abstract member
pub(super) const ABSTRACT_DECORATORS: &[&str] = &[
    "abstractmethod",
    "abstractproperty",
    "abstractclassmethod",
    "abstractstaticmethod",
];

/// Python export rule: dunder names are public, `_x` and `__x` are not
pub fn is_exported(name: &str) -> bool {
    if is_dunder(name) {
        true
    } else {
        !name.starts_with('_')
    }
}

/// `__x` (name-mangled) is private, `_x` protected, dunders carry no modifier
pub fn access_modifier(name: &str) -> Option<AccessModifier> {
    if is_dunder(name) {
        None
    } else if name.starts_with("__") {
        Some(AccessModifier::Private)
    } else if name.starts_with('_') {
        Some(AccessModifier::Protected)
    } else {
        None
    }
}

pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Declared bases of a class, split from its keyword arguments
#[derive(Debug, Default)]
pub(super) struct ClassBases {
    /// Normalized names (`typing.Generic[T]` -> `Generic`), in order
    pub bases: Vec<String>,
    /// Raw base expressions, for type-parameter recovery
    pub raw: Vec<String>,
    pub metaclass: Option<String>,
}

/// Extract bases and `metaclass=` from a superclasses argument list
pub(super) fn extract_argument_list(extractor: &PythonExtractor, node: &Node) -> ClassBases {
    let base = extractor.base();
    let mut out = ClassBases::default();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" | "attribute" | "subscript" | "generic_type" => {
                let text = base.get_node_text(&child);
                out.bases.push(base_type_name(&text));
                out.raw.push(text);
            }
            "keyword_argument" => {
                let keyword = base.get_field_text(&child, "name").unwrap_or_default();
                if keyword == "metaclass" {
                    out.metaclass = base
                        .get_field_text(&child, "value")
                        .map(|value| base_type_name(&value));
                }
            }
            _ => {}
        }
    }

    out
}

/// Helper to strip string delimiters (quotes and prefixes) from Python strings
/// Handles triple quotes (""" or '''), double quotes ("), and single quotes (')
pub fn strip_string_delimiters(s: &str) -> String {
    let s = s.trim_start_matches(|c: char| "rRbBuUfF".contains(c));
    let delimiters = [("\"\"\"", 3), ("'''", 3), ("\"", 1), ("'", 1)];

    for (delimiter, strip_count) in &delimiters {
        if s.starts_with(delimiter) && s.ends_with(delimiter) && s.len() >= strip_count * 2 {
            return s[*strip_count..s.len() - strip_count].to_string();
        }
    }

    s.to_string()
}
