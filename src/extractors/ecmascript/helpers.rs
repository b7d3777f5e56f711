// Grammar tables and small node helpers for TypeScript / JavaScript

use tree_sitter::Node;

use crate::extractors::base::traversal::{find_child_by_type, has_child_kind, named_children};
use crate::extractors::base::{AccessModifier, BaseExtractor, DecoratorGrammar, TypeGrammar};

pub(crate) static ECMA_TYPES: TypeGrammar = TypeGrammar {
    name_kinds: &["type_identifier"],
    qualified_kinds: &[("nested_type_identifier", "name")],
    opaque_kinds: &[
        "predefined_type",
        "literal_type",
        "template_literal_type",
        "string",
        "number",
        "this_type",
        "type_query",
        "comment",
    ],
    argument_list_kinds: &["type_arguments"],
    builtins: &[
        "string",
        "number",
        "boolean",
        "bigint",
        "symbol",
        "object",
        "any",
        "unknown",
        "void",
        "never",
        "undefined",
        "null",
        "Object",
        "String",
        "Number",
        "Boolean",
        "Symbol",
        "Function",
        "Date",
        "RegExp",
        "Error",
        "Promise",
        "PromiseLike",
        "Array",
        "ReadonlyArray",
        "Map",
        "ReadonlyMap",
        "Set",
        "ReadonlySet",
        "WeakMap",
        "WeakSet",
        "Record",
        "Partial",
        "Required",
        "Readonly",
        "Pick",
        "Omit",
        "Exclude",
        "Extract",
        "NonNullable",
        "ReturnType",
        "Parameters",
        "InstanceType",
        "Awaited",
        "Iterable",
        "Iterator",
        "IterableIterator",
        "AsyncIterable",
        "AsyncIterator",
        "Generator",
        "AsyncGenerator",
    ],
};

pub(crate) static ECMA_DECORATORS: DecoratorGrammar = DecoratorGrammar {
    call_kind: "call_expression",
    reference_kinds: &["identifier", "member_expression", "shorthand_property_identifier"],
    container_kinds: &["array", "object", "parenthesized_expression"],
    pair_kinds: &[("pair", "value")],
};

const FUNCTION_VALUE_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// Expressions that evaluate to a function
pub(crate) fn is_function_value(node: &Node) -> bool {
    FUNCTION_VALUE_KINDS.contains(&node.kind())
}

/// Strip one layer of `'`, `"` or backtick quotes
pub(crate) fn strip_quotes(text: &str) -> String {
    let trimmed = text.trim();
    for quote in ['\'', '"', '`'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

pub(crate) fn is_relative_path(path: &str) -> bool {
    path.starts_with('.')
}

/// Value of a plain string literal node
pub(crate) fn string_literal(base: &BaseExtractor, node: &Node) -> Option<String> {
    (node.kind() == "string").then(|| strip_quotes(&base.get_node_text(node)))
}

/// Arguments of a call, comments dropped
pub(crate) fn call_arguments<'t>(call: &Node<'t>) -> Vec<Node<'t>> {
    call.child_by_field_name("arguments")
        .map(|arguments| {
            named_children(&arguments)
                .into_iter()
                .filter(|a| a.kind() != "comment")
                .collect()
        })
        .unwrap_or_default()
}

/// First argument of a call when it is a string literal: `require("x")`
pub(crate) fn first_string_argument(base: &BaseExtractor, call: &Node) -> Option<String> {
    call_arguments(call)
        .first()
        .and_then(|first| string_literal(base, first))
}

/// Declared name of a class member (`name` in TypeScript, `property` in JavaScript fields)
pub(crate) fn member_name(base: &BaseExtractor, member: &Node) -> Option<String> {
    member
        .child_by_field_name("name")
        .or_else(|| member.child_by_field_name("property"))
        .map(|name| strip_quotes(&base.get_node_text(&name)))
}

/// `public` / `protected` / `private` keyword, or `#name` private fields
pub(crate) fn access_modifier(base: &BaseExtractor, member: &Node) -> Option<AccessModifier> {
    if let Some(modifier) = find_child_by_type(member, "accessibility_modifier") {
        return AccessModifier::from_keyword(&base.get_node_text(&modifier));
    }
    let private_name = member
        .child_by_field_name("name")
        .or_else(|| member.child_by_field_name("property"))
        .is_some_and(|name| name.kind() == "private_property_identifier");
    private_name.then_some(AccessModifier::Private)
}

/// Class members are exported unless declared private
pub(crate) fn member_exported(access: Option<AccessModifier>) -> bool {
    access != Some(AccessModifier::Private)
}

pub(crate) fn is_static_member(member: &Node) -> bool {
    has_child_kind(member, "static") || has_child_kind(member, "static get")
}

pub(crate) fn is_accessor(member: &Node) -> bool {
    has_child_kind(member, "get") || has_child_kind(member, "set") || has_child_kind(member, "static get")
}

/// `Base.prototype` -> `Base`; `ns.Base` -> `Base`
pub(crate) fn constructor_name(text: &str) -> String {
    let trimmed = text.trim();
    let stripped = trimmed.strip_suffix(".prototype").unwrap_or(trimmed);
    stripped.rsplit('.').next().unwrap_or(stripped).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'react'"), "react");
        assert_eq!(strip_quotes("\"./util\""), "./util");
        assert_eq!(strip_quotes("`tpl`"), "tpl");
        assert_eq!(strip_quotes("bare"), "bare");
    }

    #[test]
    fn test_constructor_name() {
        assert_eq!(constructor_name("EventEmitter.prototype"), "EventEmitter");
        assert_eq!(constructor_name("events.EventEmitter"), "EventEmitter");
        assert_eq!(constructor_name("Router"), "Router");
    }
}
