use crate::model::NodeId;
use crate::view::layout::{PaintList, Size, TopNode};

/// Ordered set of selected nodes. The last entry is the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    /// Replace the selection with exactly `node`.
    pub fn replace(&mut self, node: NodeId) {
        self.nodes.clear();
        self.nodes.push(node);
    }

    /// Add `node` as the active entry. A node already present moves to the end.
    pub fn append(&mut self, node: NodeId) {
        self.nodes.retain(|n| *n != node);
        self.nodes.push(node);
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

/// Transient per-view state. Rebuilt from the model on every bind, resize
/// and scroll; never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// `None` until a model with at least one row is bound.
    pub top: Option<TopNode>,
    /// Units of the top node hidden above the viewport.
    pub offset_y: u32,
    pub paint_list: PaintList,
    pub selection: Selection,
    /// Node under the pointer.
    pub highlighted: Option<NodeId>,
    pub viewport: Size,
    pub total_height: u64,
    /// Absolute scroll position: rows above the top node plus `offset_y`.
    pub scroll_y: u64,
}

impl ViewState {
    /// Reset everything except the viewport size.
    pub fn reset(&mut self) {
        let viewport = self.viewport;
        *self = Self {
            viewport,
            ..Self::default()
        };
    }
}
