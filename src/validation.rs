//! Post-extraction structural checks
//!
//! A failure here means the extractor produced something malformed, not that the input
//! was bad. Duplicate symbol IDs are allowed: same-name declarations on one line share
//! an ID.

use crate::error::ValidationError;
use crate::extractors::base::{Location, ParseResult, Symbol};

pub fn validate_result(result: &ParseResult, max_nesting: usize) -> Result<(), ValidationError> {
    if result.file_path.is_empty() {
        return Err(ValidationError::EmptyField("file_path"));
    }
    if result.hash.is_empty() {
        return Err(ValidationError::EmptyField("hash"));
    }

    let mut stack: Vec<(&Symbol, usize)> = result.symbols.iter().map(|s| (s, 1)).collect();
    while let Some((symbol, depth)) = stack.pop() {
        if depth > max_nesting {
            return Err(ValidationError::NestingTooDeep(max_nesting));
        }
        validate_symbol(symbol, &result.file_path)?;
        stack.extend(symbol.children.iter().map(|c| (c, depth + 1)));
    }

    for import in &result.imports {
        if import.path.is_empty() {
            return Err(ValidationError::EmptyField("import path"));
        }
        if let Some(location) = &import.location {
            check_location(location, &result.file_path, || format!("import `{}`", import.path))?;
        }
    }

    Ok(())
}

fn validate_symbol(symbol: &Symbol, file_path: &str) -> Result<(), ValidationError> {
    if symbol.name.is_empty() {
        return Err(ValidationError::EmptySymbolField {
            name: format!("<{} at line {}>", symbol.kind, symbol.location.start_line),
            field: "name",
        });
    }
    if symbol.id.is_empty() {
        return Err(ValidationError::EmptySymbolField {
            name: symbol.name.clone(),
            field: "id",
        });
    }
    check_location(&symbol.location, file_path, || format!("symbol `{}`", symbol.name))?;

    for call in &symbol.calls {
        if call.target.is_empty() {
            return Err(ValidationError::EmptySymbolField {
                name: symbol.name.clone(),
                field: "call target",
            });
        }
        check_location(&call.location, file_path, || {
            format!("call `{}` in `{}`", call.target, symbol.name)
        })?;
    }
    for reference in &symbol.type_references {
        check_location(&reference.location, file_path, || {
            format!("type reference `{}` in `{}`", reference.name, symbol.name)
        })?;
    }
    Ok(())
}

fn check_location(
    location: &Location,
    file_path: &str,
    what: impl Fn() -> String,
) -> Result<(), ValidationError> {
    if location.file_path != file_path {
        return Err(ValidationError::ForeignLocation {
            what: what(),
            expected: file_path.to_string(),
            found: location.file_path.clone(),
        });
    }
    let lines_ok = location.start_line >= 1 && location.end_line >= location.start_line;
    let bytes_ok = location.end_byte >= location.start_byte;
    if !lines_ok || !bytes_ok {
        return Err(ValidationError::BadLocation {
            what: what(),
            file_path: file_path.to_string(),
            start_line: location.start_line,
            end_line: location.end_line,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{Import, SymbolKind};
    use crate::language::Language;
    use chrono::Utc;

    fn location(line: u32) -> Location {
        Location {
            file_path: "m.py".to_string(),
            start_line: line,
            end_line: line,
            start_col: 0,
            end_col: 4,
            start_byte: 0,
            end_byte: 4,
        }
    }

    fn symbol(name: &str) -> Symbol {
        Symbol {
            id: "abc".to_string(),
            name: name.to_string(),
            kind: SymbolKind::Function,
            language: Language::Python,
            exported: true,
            signature: String::new(),
            doc_comment: None,
            location: location(1),
            receiver: String::new(),
            children: Vec::new(),
            calls: Vec::new(),
            type_references: Vec::new(),
            metadata: None,
        }
    }

    fn result(symbols: Vec<Symbol>) -> ParseResult {
        ParseResult {
            file_path: "m.py".to_string(),
            language: Language::Python,
            hash: "deadbeef".to_string(),
            parsed_at: Utc::now(),
            symbols,
            imports: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_valid_result_passes() {
        let mut parent = symbol("Foo");
        parent.children.push(symbol("bar"));
        // duplicate IDs are tolerated
        parent.children.push(symbol("bar"));
        assert!(validate_result(&result(vec![parent]), 8).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(matches!(
            validate_result(&result(vec![symbol("")]), 8),
            Err(ValidationError::EmptySymbolField { field: "name", .. })
        ));
    }

    #[test]
    fn test_inverted_lines_fail() {
        let mut bad = symbol("x");
        bad.location.start_line = 5;
        bad.location.end_line = 2;
        assert!(matches!(
            validate_result(&result(vec![bad]), 8),
            Err(ValidationError::BadLocation { .. })
        ));
    }

    #[test]
    fn test_foreign_location_fails() {
        let mut bad = symbol("x");
        bad.location.file_path = "other.py".to_string();
        assert!(matches!(
            validate_result(&result(vec![bad]), 8),
            Err(ValidationError::ForeignLocation { .. })
        ));
    }

    #[test]
    fn test_nesting_bound() {
        let mut inner = symbol("c");
        for name in ["b", "a"] {
            let mut outer = symbol(name);
            outer.children.push(inner);
            inner = outer;
        }
        assert!(validate_result(&result(vec![inner.clone()]), 3).is_ok());
        assert_eq!(
            validate_result(&result(vec![inner]), 2),
            Err(ValidationError::NestingTooDeep(2))
        );
    }

    #[test]
    fn test_empty_import_path_fails() {
        let mut r = result(Vec::new());
        r.imports.push(Import::default());
        assert_eq!(
            validate_result(&r, 8),
            Err(ValidationError::EmptyField("import path"))
        );
    }
}
