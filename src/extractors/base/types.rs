// Intermediate representation shared by every front end
//
// Symbols, imports, call sites and type references, all anchored to a Location.
// Nothing here has behavior beyond small conveniences; extractors build these and
// hand them to the caller inside a ParseResult.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::language::Language;

/// Source span of a CST node
///
/// Lines are 1-based, columns are 0-based, the byte range is half-open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Location {
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub start_col: u32,
    pub end_col: u32,
    pub start_byte: u32,
    pub end_byte: u32,
}

/// Symbol kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Module,
    Import,
    Class,
    Interface,
    Function,
    Method,
    Field,
    Property,
    Variable,
    Constant,
    TypeAlias,
    Enum,
    EnumMember,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Module => write!(f, "module"),
            SymbolKind::Import => write!(f, "import"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Interface => write!(f, "interface"),
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Property => write!(f, "property"),
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::TypeAlias => write!(f, "type_alias"),
            SymbolKind::Enum => write!(f, "enum"),
            SymbolKind::EnumMember => write!(f, "enum_member"),
        }
    }
}

/// Declared access level of a member
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
}

impl AccessModifier {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text.trim() {
            "public" => Some(AccessModifier::Public),
            "protected" => Some(AccessModifier::Protected),
            "private" => Some(AccessModifier::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessModifier::Public => write!(f, "public"),
            AccessModifier::Protected => write!(f, "protected"),
            AccessModifier::Private => write!(f, "private"),
        }
    }
}

/// Flattened method shape used for structural-typing matches downstream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MethodSignature {
    pub name: String,
    pub param_count: u32,
    pub return_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<String>,
}

/// Language-specific extras attached to a symbol
///
/// Built once per symbol with struct-update syntax; see [`SymbolMetadata::into_option`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SymbolMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub decorator_args: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_constructor: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_overload: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub narrowed_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_modifier: Option<AccessModifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSignature>,
}

impl SymbolMetadata {
    pub fn is_default(&self) -> bool {
        *self == SymbolMetadata::default()
    }

    /// `None` when every field is at its default
    pub fn into_option(self) -> Option<SymbolMetadata> {
        if self.is_default() {
            None
        } else {
            Some(self)
        }
    }
}

/// One call-shaped node found in an executable symbol's body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallSite {
    /// Unqualified called name
    pub target: String,
    /// Text left of the call for member calls; empty for bare calls
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub receiver: String,
    pub is_method: bool,
    /// Identifier-like arguments (callbacks, handlers); never literals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub function_args: Vec<String>,
    pub location: Location,
}

/// One mention of a user-defined type in an annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeReference {
    pub name: String,
    pub location: Location,
}

/// A module dependency edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Import {
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    pub is_wildcard: bool,
    pub is_relative: bool,
    pub is_default: bool,
    pub is_namespace: bool,
    pub is_type_only: bool,
    pub is_common_js: bool,
    pub is_dynamic: bool,
    pub is_module: bool,
    pub location: Option<Location>,
}

/// A declared program entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Symbol {
    /// MD5 of `file_path:start_line:name`; stable across re-parses, not globally unique
    pub id: String,
    pub name: String,
    pub kind: SymbolKind,
    pub language: Language,
    pub exported: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    pub location: Location,
    /// Owning type name for methods and fields
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub receiver: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<CallSite>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_references: Vec<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SymbolMetadata>,
}

impl Symbol {
    /// Metadata by value; defaults when absent
    pub fn meta(&self) -> SymbolMetadata {
        self.metadata.clone().unwrap_or_default()
    }

    pub fn metadata_mut(&mut self) -> &mut SymbolMetadata {
        self.metadata.get_or_insert_with(SymbolMetadata::default)
    }

    /// Drop the metadata again when a post-pass left it at defaults
    pub fn normalize_metadata(&mut self) {
        if self.metadata.as_ref().is_some_and(SymbolMetadata::is_default) {
            self.metadata = None;
        }
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Symbol> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Everything extracted from one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseResult {
    pub file_path: String,
    pub language: Language,
    /// Hex BLAKE3 digest of the raw input bytes
    pub hash: String,
    pub parsed_at: DateTime<Utc>,
    pub symbols: Vec<Symbol>,
    pub imports: Vec<Import>,
    /// Human-readable diagnostics; never means the result is unusable
    pub errors: Vec<String>,
}

impl ParseResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Depth-first iterator over every symbol, parents before children
    pub fn all_symbols(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();
        let mut stack: Vec<&Symbol> = self.symbols.iter().rev().collect();
        while let Some(symbol) = stack.pop() {
            out.push(symbol);
            stack.extend(symbol.children.iter().rev());
        }
        out
    }

    /// First symbol anywhere in the tree with this name
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.all_symbols().into_iter().find(|s| s.name == name)
    }
}
