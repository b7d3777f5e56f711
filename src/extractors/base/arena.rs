// Flat symbol storage used while a file is being extracted
//
// Extraction appends symbols with a parent index instead of building nested
// `children` vectors in place. Post-passes (JavaScript prototype re-parenting,
// synthetic symbols) only rewrite parent indices, and the owned tree is assembled once
// at the end with an explicit-stack post-order pass.

use crate::error::ValidationError;

use super::types::Symbol;

#[derive(Debug, Clone)]
pub struct ArenaEntry {
    pub symbol: Symbol,
    pub parent: Option<usize>,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolArena {
    entries: Vec<ArenaEntry>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: Symbol, parent: Option<usize>) -> usize {
        self.entries.push(ArenaEntry { symbol, parent });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Symbol> {
        self.entries.get(idx).map(|e| &e.symbol)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Symbol> {
        self.entries.get_mut(idx).map(|e| &mut e.symbol)
    }

    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        self.entries.get(idx).and_then(|e| e.parent)
    }

    pub fn set_parent(&mut self, idx: usize, parent: Option<usize>) {
        if let Some(entry) = self.entries.get_mut(idx) {
            entry.parent = parent;
        }
    }

    /// Iterate `(index, parent, symbol)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>, &Symbol)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (idx, e.parent, &e.symbol))
    }

    /// Direct child of `parent` (or a root when `None`) with the given name
    pub fn find_child(&self, parent: Option<usize>, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.parent == parent && e.symbol.name == name)
    }

    /// Assemble the owned symbol tree
    ///
    /// Children keep insertion order. Entries never reached from a root (a parent
    /// cycle) make the whole assembly fail rather than silently vanish.
    pub fn into_tree(self) -> Result<Vec<Symbol>, ValidationError> {
        let n = self.entries.len();
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut roots = Vec::new();
        let mut slots: Vec<Option<Symbol>> = Vec::with_capacity(n);

        for (idx, entry) in self.entries.into_iter().enumerate() {
            match entry.parent {
                None => roots.push(idx),
                Some(parent) if parent < n && parent != idx => children_of[parent].push(idx),
                Some(parent) if parent == idx => {}
                Some(parent) => return Err(ValidationError::DanglingParent { child: idx, parent }),
            }
            slots.push(Some(entry.symbol));
        }

        let mut built: Vec<Option<Symbol>> = vec![None; n];
        let mut visited = 0usize;
        let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();

        while let Some((idx, expanded)) = stack.pop() {
            if !expanded {
                stack.push((idx, true));
                for &child in children_of[idx].iter().rev() {
                    stack.push((child, false));
                }
                continue;
            }

            let Some(mut symbol) = slots[idx].take() else {
                continue;
            };
            for &child in &children_of[idx] {
                if let Some(child_symbol) = built[child].take() {
                    symbol.children.push(child_symbol);
                }
            }
            built[idx] = Some(symbol);
            visited += 1;
        }

        if visited != n {
            return Err(ValidationError::CyclicChildren(n - visited));
        }

        Ok(roots.into_iter().filter_map(|r| built[r].take()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::types::{Location, SymbolKind};
    use crate::language::Language;

    fn symbol(name: &str) -> Symbol {
        Symbol {
            id: name.to_string(),
            name: name.to_string(),
            kind: SymbolKind::Function,
            language: Language::Python,
            exported: true,
            signature: String::new(),
            doc_comment: None,
            location: Location {
                file_path: "a.py".to_string(),
                start_line: 1,
                end_line: 1,
                start_col: 0,
                end_col: 0,
                start_byte: 0,
                end_byte: 0,
            },
            receiver: String::new(),
            children: Vec::new(),
            calls: Vec::new(),
            type_references: Vec::new(),
            metadata: None,
        }
    }

    #[test]
    fn test_tree_preserves_insertion_order() {
        let mut arena = SymbolArena::new();
        let class = arena.push(symbol("Foo"), None);
        arena.push(symbol("a"), Some(class));
        let b = arena.push(symbol("b"), Some(class));
        arena.push(symbol("inner"), Some(b));
        arena.push(symbol("bar"), None);

        let tree = arena.into_tree().unwrap();
        assert_eq!(tree.len(), 2);
        let names: Vec<_> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(tree[0].children[1].children[0].name, "inner");
    }

    #[test]
    fn test_reparenting_after_the_fact() {
        let mut arena = SymbolArena::new();
        let method = arena.push(symbol("handle"), None);
        let owner = arena.push(symbol("Router"), None);
        arena.set_parent(method, Some(owner));

        let tree = arena.into_tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "Router");
        assert_eq!(tree[0].children[0].name, "handle");
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut arena = SymbolArena::new();
        let a = arena.push(symbol("a"), None);
        let b = arena.push(symbol("b"), Some(a));
        arena.set_parent(a, Some(b));

        assert_eq!(
            arena.into_tree().unwrap_err(),
            ValidationError::CyclicChildren(2)
        );
    }

    #[test]
    fn test_dangling_parent_is_rejected() {
        let mut arena = SymbolArena::new();
        arena.push(symbol("a"), Some(7));

        assert!(matches!(
            arena.into_tree(),
            Err(ValidationError::DanglingParent { child: 0, parent: 7 })
        ));
    }
}
