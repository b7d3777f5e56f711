//! Pre-class inheritance and export-alias patterns
//!
//! During the walk the front end only records facts: `inherits`-style calls and
//! `module.exports` aliases. Once every symbol exists, [`apply`] runs as a separate pass:
//!
//! 1. property-assigned methods move under the constructor they were assigned to
//! 2. an export alias with orphaned methods and no declaration gets a synthetic class
//! 3. recorded prototype links set `extends`, the last link for a constructor wins

use std::collections::HashMap;

use tree_sitter::Node;

use crate::extractors::base::{BaseExtractor, Location, Symbol, SymbolArena, SymbolKind};
use crate::extractors::ecmascript::helpers::{call_arguments, constructor_name};
use crate::language::Language;
use crate::utils::hash::symbol_id;
use crate::utils::naming::{base_type_name, semantic_module_name, starts_uppercase};

/// A `module.exports = alias` binding
#[derive(Debug, Clone)]
pub(crate) struct ExportAlias {
    pub name: String,
    pub location: Location,
}

/// What the walk observed about legacy patterns
#[derive(Debug, Default)]
pub(crate) struct LegacyFacts {
    /// `(constructor, supertype)` in source order
    pub links: Vec<(String, String)>,
    pub aliases: Vec<ExportAlias>,
}

impl LegacyFacts {
    pub fn link(&mut self, constructor: &str, supertype: &str) {
        let child = constructor_name(constructor);
        let parent = base_type_name(&constructor_name(supertype));
        if !child.is_empty() && !parent.is_empty() {
            self.links.push((child, parent));
        }
    }

    pub fn alias(&mut self, name: String, location: Location) {
        if !self.aliases.iter().any(|a| a.name == name) {
            self.aliases.push(ExportAlias { name, location });
        }
    }
}

/// Trailing segment of a callee: `util.inherits` -> `inherits`
fn callee_leaf<'a>(callee: &'a str) -> &'a str {
    callee.rsplit('.').next().unwrap_or(callee)
}

/// Recognize a call that links two prototype chains; returns `(constructor, supertype)`
///
/// - `util.inherits(Child, Parent)`
/// - `Object.assign(Child.prototype, Parent.prototype)` (also `extend` / `merge`)
/// - `mixin(Child, Parent)` / `mixin(Child, Parent, false)`
pub(crate) fn inheritance_call(base: &BaseExtractor, call: &Node) -> Option<(String, String)> {
    let callee = base.get_node_text(&call.child_by_field_name("function")?);
    let arguments: Vec<String> = call_arguments(call)
        .iter()
        .map(|a| base.get_node_text(a))
        .collect();

    match (callee_leaf(&callee), arguments.as_slice()) {
        ("inherits", [child, parent]) => Some((child.clone(), parent.clone())),
        ("assign" | "extend" | "merge", [target, source, ..])
            if target.ends_with(".prototype") && source.ends_with(".prototype") =>
        {
            Some((target.clone(), source.clone()))
        }
        ("mixin", [child, parent] | [child, parent, _]) => Some((child.clone(), parent.clone())),
        _ => None,
    }
}

/// `Object.create(Parent.prototype)`; returns the argument text
pub(crate) fn allocated_prototype(base: &BaseExtractor, value: &Node) -> Option<String> {
    if value.kind() != "call_expression" {
        return None;
    }
    let callee = base.get_node_text(&value.child_by_field_name("function")?);
    if callee != "Object.create" {
        return None;
    }
    call_arguments(value)
        .first()
        .map(|a| base.get_node_text(a))
        .filter(|text| text != "null")
}

fn is_constructor_like(kind: SymbolKind) -> bool {
    matches!(kind, SymbolKind::Class | SymbolKind::Function)
}

/// Root-level class or function with the given name
fn root_constructor(arena: &SymbolArena, name: &str) -> Option<usize> {
    arena
        .iter()
        .find(|(_, parent, s)| parent.is_none() && is_constructor_like(s.kind) && s.name == name)
        .map(|(idx, _, _)| idx)
}

/// Root-level methods carrying `receiver`
fn orphan_methods(arena: &SymbolArena, receiver: &str) -> Vec<usize> {
    arena
        .iter()
        .filter(|(_, parent, s)| {
            parent.is_none() && s.kind == SymbolKind::Method && s.receiver == receiver
        })
        .map(|(idx, _, _)| idx)
        .collect()
}

/// Root-level symbol that may own property-assigned methods
///
/// A plain function only qualifies when its name reads as a constructor.
fn method_owner(arena: &SymbolArena, name: &str) -> Option<usize> {
    root_constructor(arena, name).filter(|&idx| {
        arena
            .get(idx)
            .is_some_and(|s| s.kind == SymbolKind::Class || starts_uppercase(&s.name))
    })
}

/// Post-pass over a finished JavaScript extraction
pub(crate) fn apply(arena: &mut SymbolArena, facts: &LegacyFacts, file_path: &str) {
    reparent_methods(arena);
    let synthesized = synthesize_aliases(arena, &facts.aliases, file_path);

    for (child, parent) in &facts.links {
        let target = synthesized.get(child).unwrap_or(child);
        let Some(idx) = root_constructor(arena, target) else {
            continue;
        };
        if let Some(symbol) = arena.get_mut(idx) {
            symbol.metadata_mut().extends = Some(parent.clone());
        }
    }
}

/// Move `X.prototype.m = ...` / `X.m = ...` methods under a root class or constructor `X`
fn reparent_methods(arena: &mut SymbolArena) {
    let moves: Vec<(usize, usize)> = arena
        .iter()
        .filter(|(_, parent, s)| {
            parent.is_none() && s.kind == SymbolKind::Method && !s.receiver.is_empty()
        })
        .filter_map(|(idx, _, s)| method_owner(arena, &s.receiver).map(|owner| (idx, owner)))
        .filter(|(idx, owner)| idx != owner)
        .collect();
    for (idx, owner) in moves {
        arena.set_parent(idx, Some(owner));
    }
}

/// Give undeclared export aliases with orphaned methods a class of their own
///
/// Returns alias name -> synthesized class name.
fn synthesize_aliases(
    arena: &mut SymbolArena,
    aliases: &[ExportAlias],
    file_path: &str,
) -> HashMap<String, String> {
    let mut synthesized = HashMap::new();

    for alias in aliases {
        if root_constructor(arena, &alias.name).is_some() {
            continue;
        }
        let orphans = orphan_methods(arena, &alias.name);
        if orphans.is_empty() {
            continue;
        }
        let Some(name) = semantic_module_name(file_path) else {
            continue;
        };
        if arena.find_child(None, &name).is_some() {
            continue;
        }

        let location = arena
            .iter()
            .find(|(_, parent, s)| parent.is_none() && s.name == alias.name)
            .map(|(_, _, s)| s.location.clone())
            .unwrap_or_else(|| alias.location.clone());
        let symbol = Symbol {
            id: symbol_id(file_path, location.start_line, &name),
            name: name.clone(),
            kind: SymbolKind::Class,
            language: Language::JavaScript,
            exported: true,
            signature: format!("class {}", name),
            doc_comment: Some(format!(
                "Synthesized from the `module.exports` alias `{}`",
                alias.name
            )),
            location,
            receiver: String::new(),
            children: Vec::new(),
            calls: Vec::new(),
            type_references: Vec::new(),
            metadata: None,
        };
        let class_idx = arena.push(symbol, None);

        for idx in orphans {
            arena.set_parent(idx, Some(class_idx));
            if let Some(method) = arena.get_mut(idx) {
                method.receiver = name.clone();
            }
        }
        synthesized.insert(alias.name.clone(), name);
    }
    synthesized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(line: u32) -> Location {
        Location {
            file_path: "lib/application.js".to_string(),
            start_line: line,
            end_line: line,
            start_col: 0,
            end_col: 10,
            start_byte: 0,
            end_byte: 10,
        }
    }

    fn symbol(name: &str, kind: SymbolKind, receiver: &str, line: u32) -> Symbol {
        Symbol {
            id: symbol_id("lib/application.js", line, name),
            name: name.to_string(),
            kind,
            language: Language::JavaScript,
            exported: false,
            signature: String::new(),
            doc_comment: None,
            location: location(line),
            receiver: receiver.to_string(),
            children: Vec::new(),
            calls: Vec::new(),
            type_references: Vec::new(),
            metadata: None,
        }
    }

    #[test]
    fn test_link_normalizes_names() {
        let mut facts = LegacyFacts::default();
        facts.link("Child.prototype", "events.EventEmitter.prototype");
        assert_eq!(
            facts.links,
            vec![("Child".to_string(), "EventEmitter".to_string())]
        );
    }

    #[test]
    fn test_reparent_onto_declared_constructor() {
        let mut arena = SymbolArena::new();
        arena.push(symbol("Router", SymbolKind::Function, "", 1), None);
        arena.push(symbol("handle", SymbolKind::Method, "Router", 3), None);
        apply(&mut arena, &LegacyFacts::default(), "lib/application.js");
        assert_eq!(arena.parent_of(1), Some(0));
    }

    #[test]
    fn test_helper_function_keeps_no_methods() {
        let mut arena = SymbolArena::new();
        arena.push(symbol("noop", SymbolKind::Function, "", 1), None);
        arena.push(symbol("x", SymbolKind::Method, "noop", 2), None);
        apply(&mut arena, &LegacyFacts::default(), "lib/application.js");
        assert_eq!(arena.parent_of(1), None);
    }

    #[test]
    fn test_synthesis_skipped_when_name_taken() {
        let mut arena = SymbolArena::new();
        arena.push(symbol("Application", SymbolKind::Variable, "", 1), None);
        arena.push(symbol("init", SymbolKind::Method, "app", 2), None);
        let mut facts = LegacyFacts::default();
        facts.alias("app".to_string(), location(1));
        apply(&mut arena, &facts, "lib/application.js");
        assert_eq!(arena.len(), 2, "no class is synthesized over an existing name");
        assert_eq!(arena.parent_of(1), None, "the orphan keeps its textual receiver");
    }

    #[test]
    fn test_last_link_wins() {
        let mut arena = SymbolArena::new();
        arena.push(symbol("Child", SymbolKind::Function, "", 1), None);
        let mut facts = LegacyFacts::default();
        facts.link("Child", "First");
        facts.link("Child", "Second");
        apply(&mut arena, &facts, "lib/application.js");
        let extends = arena.get(0).and_then(|s| s.meta().extends);
        assert_eq!(extends.as_deref(), Some("Second"));
    }
}
