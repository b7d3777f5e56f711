// Scenario tests for the front ends, run against the real tree-sitter grammars
//
// - python_tests.rs: Python symbols, visibility, imports, fields, interfaces
// - typescript_tests.rs: TypeScript classes, interfaces, exports, declarations
// - javascript_tests.rs: CommonJS, constructor functions, prototype patterns
// - pipeline_tests.rs: input rejection, cancellation, determinism, resource caps

mod javascript_tests;
mod pipeline_tests;
mod typescript_tests;

use tokio_util::sync::CancellationToken;

use crate::config::{ParseOptions, ParserConfig};
use crate::extractors::base::{ParseResult, Symbol, SymbolKind};
use crate::extractors::frontend::FrontEnd;
use crate::extractors::{JavaScriptFrontEnd, PythonFrontEnd, TypeScriptFrontEnd};

fn parse_with(front_end: &dyn FrontEnd, file_path: &str, code: &str) -> ParseResult {
    front_end
        .parse(&CancellationToken::new(), code.as_bytes(), file_path)
        .unwrap_or_else(|e| panic!("parse of {} failed: {}", file_path, e))
}

pub(crate) fn parse_python(code: &str) -> ParseResult {
    parse_with(&PythonFrontEnd::default(), "pkg/module.py", code)
}

pub(crate) fn parse_typescript(code: &str) -> ParseResult {
    parse_with(&TypeScriptFrontEnd::default(), "src/app.ts", code)
}

pub(crate) fn parse_javascript_at(file_path: &str, code: &str) -> ParseResult {
    parse_with(&JavaScriptFrontEnd::default(), file_path, code)
}

pub(crate) fn parse_javascript(code: &str) -> ParseResult {
    parse_javascript_at("lib/module.js", code)
}

/// Configuration that drops non-exported declarations
pub(crate) fn public_only() -> ParserConfig {
    ParserConfig::default().with_options(ParseOptions {
        include_private: false,
    })
}

/// Symbol lookup that fails the test with a readable message
pub(crate) fn symbol<'a>(result: &'a ParseResult, name: &str) -> &'a Symbol {
    result.find_symbol(name).unwrap_or_else(|| {
        let names: Vec<&str> = result.all_symbols().iter().map(|s| s.name.as_str()).collect();
        panic!("no symbol named `{}`; found {:?}", name, names)
    })
}

pub(crate) fn child<'a>(parent: &'a Symbol, name: &str) -> &'a Symbol {
    parent.child(name).unwrap_or_else(|| {
        let names: Vec<&str> = parent.children.iter().map(|s| s.name.as_str()).collect();
        panic!("`{}` has no child `{}`; children: {:?}", parent.name, name, names)
    })
}

pub(crate) fn names_of_kind(result: &ParseResult, kind: SymbolKind) -> Vec<String> {
    result
        .all_symbols()
        .into_iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.name.clone())
        .collect()
}
