//! Depth-first, document-order stepping over a [`TreeModel`].
//!
//! Both functions take a node plus its depth and return the neighbour with
//! the neighbour's depth. For any `b = next_node(a)`, `previous_node(b)`
//! yields `a` with the original depth.

use crate::model::{NodeId, TreeModel};

/// Next node in document order: first child, else next sibling, else the
/// next sibling of the nearest ancestor that has one.
pub fn next_node<M: TreeModel + ?Sized>(
    model: &M,
    node: NodeId,
    level: i32,
) -> Option<(NodeId, i32)> {
    if let Some(child) = model.first_child(node) {
        return Some((child, level + 1));
    }
    if let Some(sibling) = model.next_sibling(node) {
        return Some((sibling, level));
    }

    let mut current = node;
    let mut level = level;
    loop {
        let parent = model.parent(current)?;
        level -= 1;
        if let Some(sibling) = model.next_sibling(parent) {
            return Some((sibling, level));
        }
        current = parent;
    }
}

/// Previous node in document order: the deepest last descendant of the
/// previous sibling, else the parent. `None` only for the root.
pub fn previous_node<M: TreeModel + ?Sized>(
    model: &M,
    node: NodeId,
    level: i32,
) -> Option<(NodeId, i32)> {
    match model.previous_sibling(node) {
        Some(sibling) => {
            let mut current = sibling;
            let mut level = level;
            while let Some(child) = model.last_child(current) {
                current = child;
                level += 1;
            }
            Some((current, level))
        }
        None => model.parent(node).map(|parent| (parent, level - 1)),
    }
}
