use super::*;
use crate::config::ExtractionLimits;
use crate::error::{CancelPhase, ParseError};
use crate::extractors::ExtractorManager;
use crate::language::Language;

fn limited(limits: ExtractionLimits) -> ParserConfig {
    ParserConfig::default().with_limits(limits)
}

#[test]
fn test_oversized_input_is_rejected() {
    let front_end = PythonFrontEnd::new(ParserConfig::default().with_max_file_size(16));
    let result = front_end.parse(
        &CancellationToken::new(),
        b"def a_rather_long_function_name(): pass\n",
        "big.py",
    );

    match result {
        Err(ParseError::FileTooLarge { size, max }) => {
            assert_eq!(max, 16);
            assert!(size > max);
        }
        other => panic!("expected FileTooLarge, got {:?}", other.map(|r| r.symbols.len())),
    }
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let result = TypeScriptFrontEnd::default().parse(
        &CancellationToken::new(),
        &[b'c', b'o', b'n', b's', b't', b' ', 0xff, 0xfe],
        "bad.ts",
    );
    assert!(matches!(result, Err(ParseError::InvalidContent(_))));
}

#[test]
fn test_cancelled_before_start() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = JavaScriptFrontEnd::default().parse(&cancel, b"function f() {}", "a.js");
    match result {
        Err(ParseError::Cancelled(phase)) => {
            assert_eq!(phase, CancelPhase::BeforeStart);
            assert!(!phase.had_partial_work());
        }
        other => panic!("expected cancellation, got {:?}", other.map(|r| r.symbols.len())),
    }
}

#[test]
fn test_empty_file() {
    let result = parse_python("");
    assert!(result.symbols.is_empty());
    assert!(result.imports.is_empty());
    assert!(result.errors.is_empty());
    assert_eq!(result.language, Language::Python);
    assert_eq!(result.file_path, "pkg/module.py");
}

#[test]
fn test_extraction_is_deterministic() {
    let code = r#"
import os

class Loader:
    def load(self, path):
        return open(os.path.join(path, "data"))
"#;
    let first = parse_python(code);
    let second = parse_python(code);

    assert_eq!(first.hash, second.hash);
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.imports, second.imports);
    assert_eq!(first.errors, second.errors);
}

#[test]
fn test_hash_tracks_content_not_path() {
    let front_end = TypeScriptFrontEnd::default();
    let a = parse_with(&front_end, "a.ts", "export const x = 1;");
    let b = parse_with(&front_end, "nested/b.ts", "export const x = 1;");
    let c = parse_with(&front_end, "a.ts", "export const x = 2;");

    assert_eq!(a.hash, b.hash);
    assert_ne!(a.hash, c.hash);
    assert_ne!(
        a.symbols[0].id, b.symbols[0].id,
        "symbol IDs include the file path"
    );
}

#[test]
fn test_call_sites_are_capped() {
    let code = r#"
def busy():
    one()
    two()
    three()
    four()
    five()
"#;
    let front_end = PythonFrontEnd::new(limited(ExtractionLimits {
        max_calls_per_symbol: 3,
        ..Default::default()
    }));
    let result = parse_with(&front_end, "busy.py", code);

    let busy = symbol(&result, "busy");
    let targets: Vec<&str> = busy.calls.iter().map(|c| c.target.as_str()).collect();
    assert_eq!(targets, vec!["one", "two", "three"]);
    assert!(
        result.errors.iter().any(|e| e.contains("call-site limit (3)")),
        "the cap is reported: {:?}",
        result.errors
    );
}

#[test]
fn test_deep_nesting_is_bounded() {
    let mut code = String::new();
    for level in 0..40 {
        code.push_str(&"    ".repeat(level));
        code.push_str(&format!("def level{}():\n", level));
    }
    code.push_str(&"    ".repeat(40));
    code.push_str("pass\n");

    let front_end = PythonFrontEnd::new(limited(ExtractionLimits {
        max_depth: 16,
        ..Default::default()
    }));
    let result = parse_with(&front_end, "deep.py", &code);

    let count = result.all_symbols().len();
    assert!(count > 0);
    assert!(count < 40, "symbols past the depth limit are dropped, got {}", count);
}

#[test]
fn test_syntax_errors_give_partial_results() {
    let code = "def broken(:\n    pass\n";
    let result = parse_python(code);

    assert!(!result.errors.is_empty());
    assert!(result.errors[0].starts_with("syntax error at line"));
}

#[test]
fn test_partial_result_keeps_valid_declarations() {
    let code = "export function good(): void {}\nconst = ;\n";
    let result = parse_typescript(code);

    assert!(!result.errors.is_empty());
    assert!(result.find_symbol("good").is_some());
}

#[test]
fn test_json_round_trip() {
    let code = r#"
from dataclasses import dataclass

@dataclass
class Point:
    x: int = 0

    def norm(self) -> float:
        return abs(self.x)
"#;
    let result = parse_python(code);
    let json = result.to_json().expect("serializable");

    let decoded: ParseResult = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(decoded, result);

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["language"], "python");
    assert_eq!(value["symbols"][0]["kind"], "class");
}

#[test]
fn test_manager_batch_preserves_order() {
    let manager = ExtractorManager::default();
    let files = vec![
        ("a.py".to_string(), b"def a(): pass\n".to_vec()),
        ("b.ts".to_string(), b"export function b() {}\n".to_vec()),
        ("c.txt".to_string(), b"plain text".to_vec()),
        ("d.js".to_string(), b"function d() {}\n".to_vec()),
    ];

    let results = manager.parse_batch(&CancellationToken::new(), &files);

    assert_eq!(results.len(), 4);
    let first = results[0].as_ref().expect("python parses");
    assert_eq!(first.symbols[0].name, "a");
    assert_eq!(results[1].as_ref().expect("ts parses").language, Language::TypeScript);
    assert!(matches!(results[2], Err(ParseError::UnsupportedLanguage(_))));
    assert_eq!(results[3].as_ref().expect("js parses").symbols[0].name, "d");
}

#[test]
fn test_manager_routes_by_extension() {
    let manager = ExtractorManager::default();
    let cancel = CancellationToken::new();

    let pyi = manager
        .parse_file(&cancel, b"def stub() -> int: ...\n", "types/stub.pyi")
        .expect("stub parses");
    assert_eq!(pyi.language, Language::Python);

    let mjs = manager
        .parse_file(&cancel, b"export default function main() {}\n", "bin/cli.MJS")
        .expect("upper-case extension parses");
    assert_eq!(mjs.language, Language::JavaScript);
}

#[test]
fn test_type_references_are_capped() {
    let code = "def f(a: A, b: B, c: C, d: A) -> D:\n    pass\n";
    let front_end = PythonFrontEnd::new(limited(ExtractionLimits {
        max_type_refs_per_symbol: 2,
        ..Default::default()
    }));
    let result = parse_with(&front_end, "typed.py", code);

    let refs: Vec<&str> = symbol(&result, "f")
        .type_references
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(refs, vec!["A", "B"]);
    let reported: Vec<&String> = result
        .errors
        .iter()
        .filter(|e| e.contains("type-reference limit"))
        .collect();
    assert_eq!(
        reported,
        vec!["type-reference limit (2) reached in symbol `f`"],
        "the cap is reported once"
    );
}

#[test]
fn test_nested_type_checking_guards_stay_bounded() {
    let mut code = String::from("from typing import TYPE_CHECKING\n");
    for level in 0..60 {
        code.push_str(&"    ".repeat(level));
        code.push_str("if TYPE_CHECKING:\n");
    }
    code.push_str(&"    ".repeat(60));
    code.push_str("import hidden\n");

    let front_end = PythonFrontEnd::new(limited(ExtractionLimits {
        max_depth: 16,
        ..Default::default()
    }));
    let result = parse_with(&front_end, "guards.py", &code);

    assert!(result.imports.iter().any(|i| i.path == "typing"));
    assert!(
        !result.imports.iter().any(|i| i.path == "hidden"),
        "guards past the depth limit are not followed"
    );
}
