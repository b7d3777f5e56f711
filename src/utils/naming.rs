// Name shaping helpers shared by the front ends

use super::paths::{file_stem, parent_dir_name};

/// `body-parser` / `body_parser` / `body.parser` -> `BodyParser`
pub fn to_pascal_case(raw: &str) -> String {
    raw.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Type-like name a module stands for, derived from its path
///
/// `lib/application.js` -> `Application`; `lib/router/index.js` -> `Router`.
/// Returns `None` when nothing usable remains (e.g. a bare `index.js`).
pub fn semantic_module_name(file_path: &str) -> Option<String> {
    let stem = file_stem(file_path);
    let base = if stem.eq_ignore_ascii_case("index") {
        parent_dir_name(file_path)?
    } else {
        stem
    };
    let name = to_pascal_case(base);
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    if starts_ok {
        Some(name)
    } else {
        None
    }
}

/// `MAX_RETRIES`, `API_V2`: all letters uppercase and at least one letter
pub fn is_screaming_case(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Strip generic brackets and qualification: `typing.Generic[T]` -> `Generic`
pub fn base_type_name(raw: &str) -> String {
    let without_generics = raw
        .split(['[', '<', '('])
        .next()
        .unwrap_or(raw)
        .trim();
    without_generics
        .rsplit('.')
        .next()
        .unwrap_or(without_generics)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("application"), "Application");
        assert_eq!(to_pascal_case("body-parser"), "BodyParser");
        assert_eq!(to_pascal_case("http_server.v2"), "HttpServerV2");
    }

    #[test]
    fn test_semantic_module_name() {
        assert_eq!(
            semantic_module_name("express/lib/application.js").as_deref(),
            Some("Application")
        );
        assert_eq!(
            semantic_module_name("express/lib/router/index.js").as_deref(),
            Some("Router")
        );
        assert_eq!(semantic_module_name("index.js"), None);
        assert_eq!(semantic_module_name("lib/2fa.js"), None);
    }

    #[test]
    fn test_base_type_name() {
        assert_eq!(base_type_name("typing.Generic[T]"), "Generic");
        assert_eq!(base_type_name("events.EventEmitter.prototype"), "prototype");
        assert_eq!(base_type_name("Repository<User>"), "Repository");
        assert_eq!(base_type_name("Base"), "Base");
    }

    #[test]
    fn test_screaming_case() {
        assert!(is_screaming_case("MAX_RETRIES"));
        assert!(is_screaming_case("API_V2"));
        assert!(!is_screaming_case("Config"));
        assert!(!is_screaming_case("__"));
    }
}
