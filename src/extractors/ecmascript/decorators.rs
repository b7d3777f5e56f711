/// Decorator extraction for classes, class members and export statements
///
/// Decorators sit in different places depending on the grammar: as children of the
/// decorated node (classes, fields, JavaScript methods, `export` statements) or as
/// siblings directly in front of a TypeScript method inside the class body.
use tree_sitter::Node;

use super::helpers::ECMA_DECORATORS;
use crate::extractors::base::decorators::read_decorator;
use crate::extractors::base::traversal::named_children;
use crate::extractors::base::{BaseExtractor, Decorator};

/// Decorators written as direct children of `node`, in source order
pub(crate) fn own_decorators(base: &BaseExtractor, node: &Node) -> Vec<Decorator> {
    named_children(node)
        .into_iter()
        .filter(|child| child.kind() == "decorator")
        .filter_map(|decorator| read(base, &decorator))
        .collect()
}

/// Decorators of a class member: preceding decorator siblings, then its own
pub(crate) fn member_decorators(base: &BaseExtractor, member: &Node) -> Vec<Decorator> {
    let mut leading = Vec::new();
    let mut previous = member.prev_named_sibling();
    while let Some(sibling) = previous {
        if sibling.kind() != "decorator" {
            break;
        }
        leading.push(sibling);
        previous = sibling.prev_named_sibling();
    }
    leading.reverse();

    let mut decorators: Vec<Decorator> = leading
        .iter()
        .filter_map(|decorator| read(base, decorator))
        .collect();
    decorators.extend(own_decorators(base, member));
    decorators
}

fn read(base: &BaseExtractor, decorator: &Node) -> Option<Decorator> {
    let expression = named_children(decorator)
        .into_iter()
        .find(|n| n.kind() != "comment")?;
    Some(read_decorator(base, &ECMA_DECORATORS, expression))
}
