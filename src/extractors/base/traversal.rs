// Bounded tree walking
//
// Every walk over the CST uses an explicit stack of frames with a depth counter, so
// adversarially deep input cannot overflow the native stack. Children are pushed in
// reverse so they pop in source order.

use tokio_util::sync::CancellationToken;
use tree_sitter::Node;

use crate::error::{CancelPhase, ParseError};

use super::extractor::BaseExtractor;

/// Upper bound on reported syntax-error locations per file
pub const MAX_SYNTAX_DIAGNOSTICS: usize = 20;

/// Cooperative cancellation and depth accounting for one extraction
///
/// The visited counter is shared by the main traversal and every miner, so the
/// cancellation stride is measured in total nodes touched.
#[derive(Debug)]
pub struct TraversalBudget {
    cancel: CancellationToken,
    interval: usize,
    max_depth: usize,
    visited: usize,
    depth_truncated: bool,
}

impl TraversalBudget {
    pub fn new(cancel: CancellationToken, interval: usize, max_depth: usize) -> Self {
        Self {
            cancel,
            interval: interval.max(1),
            max_depth,
            visited: 0,
            depth_truncated: false,
        }
    }

    pub fn tick(&mut self) -> Result<(), ParseError> {
        self.visited += 1;
        if self.visited % self.interval == 0 && self.cancel.is_cancelled() {
            return Err(ParseError::Cancelled(CancelPhase::DuringExtraction));
        }
        Ok(())
    }

    pub fn admits(&self, depth: usize) -> bool {
        depth <= self.max_depth
    }

    /// Returns true only the first time a truncation happens
    pub fn note_truncation(&mut self) -> bool {
        !std::mem::replace(&mut self.depth_truncated, true)
    }

    pub fn visited(&self) -> usize {
        self.visited
    }
}

/// One pending node on the extraction stack
#[derive(Debug, Clone)]
pub struct Frame<'t, S> {
    pub node: Node<'t>,
    pub depth: usize,
    /// Arena index of the enclosing symbol
    pub parent: Option<usize>,
    pub scope: S,
}

/// What the walker does after a node has been visited
pub enum Step<'t, S> {
    /// Do not look inside this node
    Skip,
    /// Push every named child
    Children { parent: Option<usize>, scope: S },
    /// Push only the given nodes, in the given (source) order
    Nodes {
        nodes: Vec<Node<'t>>,
        parent: Option<usize>,
        scope: S,
    },
    /// Push the given nodes, each under its own scope
    Scoped {
        nodes: Vec<(Node<'t>, S)>,
        parent: Option<usize>,
    },
}

/// A front end's node-kind dispatch
pub trait NodeVisitor {
    type Scope: Clone;

    fn base_mut(&mut self) -> &mut BaseExtractor;

    fn visit<'t>(
        &mut self,
        frame: &Frame<'t, Self::Scope>,
    ) -> Result<Step<'t, Self::Scope>, ParseError>;
}

/// Drive a visitor top-down over `root`
pub fn walk<V: NodeVisitor>(
    visitor: &mut V,
    root: Node<'_>,
    scope: V::Scope,
) -> Result<(), ParseError> {
    let mut stack = vec![Frame {
        node: root,
        depth: 0,
        parent: None,
        scope,
    }];

    while let Some(frame) = stack.pop() {
        visitor.base_mut().tick()?;

        let (nodes, parent) = match visitor.visit(&frame)? {
            Step::Skip => continue,
            Step::Children { parent, scope } => (
                named_children(&frame.node)
                    .into_iter()
                    .map(|node| (node, scope.clone()))
                    .collect::<Vec<_>>(),
                parent,
            ),
            Step::Nodes {
                nodes,
                parent,
                scope,
            } => (
                nodes
                    .into_iter()
                    .map(|node| (node, scope.clone()))
                    .collect::<Vec<_>>(),
                parent,
            ),
            Step::Scoped { nodes, parent } => (nodes, parent),
        };

        let depth = frame.depth + 1;
        if nodes.is_empty() || !visitor.base_mut().admit_depth(depth) {
            continue;
        }
        for (node, scope) in nodes.into_iter().rev() {
            stack.push(Frame {
                node,
                depth,
                parent,
                scope,
            });
        }
    }

    Ok(())
}

pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Find first direct child of a kind
pub fn find_child_by_type<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Whether a direct (possibly anonymous) child has the given kind, e.g. `async`
pub fn has_child_kind(node: &Node, kind: &str) -> bool {
    find_child_by_type(node, kind).is_some()
}

/// Locations of `ERROR` and `MISSING` nodes, in source order
///
/// Only subtrees flagged with `has_error` are entered; at most
/// [`MAX_SYNTAX_DIAGNOSTICS`] messages are produced plus one overflow note.
pub fn syntax_diagnostics(root: Node<'_>, max_depth: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut overflow = false;
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        if node.is_error() || node.is_missing() {
            if messages.len() == MAX_SYNTAX_DIAGNOSTICS {
                overflow = true;
                break;
            }
            let pos = node.start_position();
            let mut message = format!(
                "syntax error at line {}, column {}",
                pos.row + 1,
                pos.column
            );
            if node.is_missing() {
                message.push_str(&format!(" (missing `{}`)", node.kind()));
            }
            messages.push(message);
            if node.is_missing() {
                continue;
            }
        }
        if !node.has_error() || depth >= max_depth {
            continue;
        }
        for child in children(&node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    if overflow {
        messages.push(format!(
            "more than {} syntax errors; remaining locations omitted",
            MAX_SYNTAX_DIAGNOSTICS
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_tree_sitter_language;
    use tree_sitter::Parser;

    fn parse(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&get_tree_sitter_language("python").unwrap())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    #[test]
    fn test_budget_cancels_on_stride() {
        let token = CancellationToken::new();
        let mut budget = TraversalBudget::new(token.clone(), 3, 10);
        token.cancel();

        assert!(budget.tick().is_ok());
        assert!(budget.tick().is_ok());
        assert!(matches!(
            budget.tick(),
            Err(ParseError::Cancelled(CancelPhase::DuringExtraction))
        ));
    }

    #[test]
    fn test_truncation_reported_once() {
        let mut budget = TraversalBudget::new(CancellationToken::new(), 100, 2);
        assert!(budget.admits(2));
        assert!(!budget.admits(3));
        assert!(budget.note_truncation());
        assert!(!budget.note_truncation());
    }

    #[test]
    fn test_syntax_diagnostics_on_clean_input() {
        let tree = parse("def ok():\n    return 1\n");
        assert!(syntax_diagnostics(tree.root_node(), 512).is_empty());
    }

    #[test]
    fn test_syntax_diagnostics_report_location() {
        let tree = parse("def broken(:\n    pass\n");
        let messages = syntax_diagnostics(tree.root_node(), 512);
        assert!(!messages.is_empty(), "malformed input must be reported");
        assert!(messages[0].starts_with("syntax error at line 1"));
    }
}
