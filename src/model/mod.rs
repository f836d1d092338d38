//! Tree model adapter: the navigation capability a view needs from any tree.
//!
//! The view never owns nodes. It only holds [`NodeId`] handles and asks the
//! model for neighbours one step at a time, so a model must answer every
//! navigation query in O(1) or O(depth).

pub mod arena;
pub mod flat;

use bitflags::bitflags;

pub use arena::ArenaTreeModel;
pub use flat::FlatTestModel;

/// Opaque handle to one node of an externally owned tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

bitflags! {
    /// Per-node state bits read by the view and written through [`TreeModel::set_flags`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        const SELECTABLE = 1 << 0;
        const EDITABLE = 1 << 1;
        const EDITED = 1 << 2;
        const SELECTED = 1 << 3;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl ItemFlags {
    /// Short label for the status bar, e.g. `"sel,edit"`.
    pub fn label(self) -> String {
        if self.is_empty() {
            return "none".to_string();
        }
        let mut parts = Vec::new();
        if self.contains(ItemFlags::SELECTABLE) {
            parts.push("sel");
        }
        if self.contains(ItemFlags::EDITABLE) {
            parts.push("edit");
        }
        if self.contains(ItemFlags::EDITED) {
            parts.push("edited");
        }
        if self.contains(ItemFlags::SELECTED) {
            parts.push("selected");
        }
        parts.join(",")
    }
}

/// Navigation and attribute access over an arbitrary tree.
///
/// Every navigation method returns `None` at a boundary (no parent, no
/// sibling, no child) and for handles the model does not recognise.
pub trait TreeModel {
    /// The synthetic root. It is never rendered as a row.
    fn root(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    fn last_child(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Number of direct children. Layout and status only, never used for indexing.
    fn child_count(&self, node: NodeId) -> usize;

    fn column_count(&self, node: NodeId) -> usize;

    fn flags(&self, node: NodeId) -> ItemFlags;

    fn set_flags(&mut self, flags: ItemFlags, node: NodeId);

    /// Display name, used by the status bar. Models without names may keep the default.
    fn name(&self, node: NodeId) -> String {
        format!("#{}", node.raw())
    }
}

impl<T: TreeModel + ?Sized> TreeModel for Box<T> {
    fn root(&self) -> NodeId {
        (**self).root()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        (**self).parent(node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        (**self).first_child(node)
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        (**self).last_child(node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        (**self).next_sibling(node)
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        (**self).previous_sibling(node)
    }

    fn child_count(&self, node: NodeId) -> usize {
        (**self).child_count(node)
    }

    fn column_count(&self, node: NodeId) -> usize {
        (**self).column_count(node)
    }

    fn flags(&self, node: NodeId) -> ItemFlags {
        (**self).flags(node)
    }

    fn set_flags(&mut self, flags: ItemFlags, node: NodeId) {
        (**self).set_flags(flags, node)
    }

    fn name(&self, node: NodeId) -> String {
        (**self).name(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_model_delegates() {
        let mut model: Box<dyn TreeModel> = Box::new(FlatTestModel::new(3));
        let root = model.root();
        let first = model.first_child(root).unwrap();
        assert_eq!(model.name(first), "0");
        model.set_flags(ItemFlags::EDITED, first);
        assert_eq!(model.flags(first), ItemFlags::EDITED);
        assert_eq!(model.child_count(root), 3);
    }

    #[test]
    fn empty_flags_label_is_none() {
        assert_eq!(ItemFlags::empty().label(), "none");
    }

    #[test]
    fn flags_label_lists_set_bits() {
        let flags = ItemFlags::SELECTABLE | ItemFlags::EDITED;
        assert_eq!(flags.label(), "sel,edited");
    }

    #[test]
    fn node_id_round_trips_raw_value() {
        assert_eq!(NodeId::new(42).raw(), 42);
        assert_eq!(NodeId::new(3), NodeId::new(3));
        assert_ne!(NodeId::new(3), NodeId::new(4));
    }
}
