use super::{ItemFlags, NodeId, TreeModel};

/// Number of leaves in the default fixture.
pub const DEFAULT_NODE_COUNT: usize = 1000;
/// Columns reported for every node.
pub const DEFAULT_COLUMN_COUNT: usize = 3;

const ROOT_NAME: &str = "(root)";

#[derive(Debug, Clone)]
struct Leaf {
    name: String,
    flags: ItemFlags,
}

/// A one-level fixture: a synthetic root with `n` leaves named `"0"` to `"n-1"`.
///
/// Leaves are located by parsing their name back into an index. That shortcut
/// is only acceptable in a fixture.
#[derive(Debug, Clone)]
pub struct FlatTestModel {
    root_flags: ItemFlags,
    leaves: Vec<Leaf>,
    columns: usize,
}

impl FlatTestModel {
    pub fn new(count: usize) -> Self {
        Self::with_flags(count, ItemFlags::SELECTABLE | ItemFlags::EDITABLE)
    }

    /// Build the fixture with every leaf starting from `flags`.
    pub fn with_flags(count: usize, flags: ItemFlags) -> Self {
        let leaves = (0..count)
            .map(|i| Leaf {
                name: i.to_string(),
                flags,
            })
            .collect();
        Self {
            root_flags: ItemFlags::empty(),
            leaves,
            columns: DEFAULT_COLUMN_COUNT,
        }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Handle of the `index`-th leaf, if it exists.
    pub fn leaf(&self, index: usize) -> Option<NodeId> {
        (index < self.leaves.len()).then(|| NodeId::new(index + 1))
    }

    /// Rename a leaf. Used by tests to check the name lookup.
    #[cfg(test)]
    pub fn rename(&mut self, node: NodeId, name: impl Into<String>) {
        if let Some(leaf) = self.leaf_mut(node) {
            leaf.name = name.into();
        }
    }

    /// Reverse lookup from a handle to its position, via the node's name.
    ///
    /// Unknown handles and names that are not base-10 numbers give `None`.
    pub fn node_number(&self, node: NodeId) -> Option<usize> {
        let leaf = self.leaf_ref(node)?;
        leaf.name.parse::<usize>().ok()
    }

    fn leaf_ref(&self, node: NodeId) -> Option<&Leaf> {
        node.raw().checked_sub(1).and_then(|i| self.leaves.get(i))
    }

    fn leaf_mut(&mut self, node: NodeId) -> Option<&mut Leaf> {
        node.raw().checked_sub(1).and_then(|i| self.leaves.get_mut(i))
    }

    fn is_root(&self, node: NodeId) -> bool {
        node == self.root()
    }
}

impl Default for FlatTestModel {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_COUNT)
    }
}

impl TreeModel for FlatTestModel {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        if self.is_root(node) {
            return None;
        }
        self.leaf_ref(node).map(|_| self.root())
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        if self.is_root(node) {
            self.leaf(0)
        } else {
            None
        }
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        if self.is_root(node) {
            self.leaves.len().checked_sub(1).and_then(|i| self.leaf(i))
        } else {
            None
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let n = self.node_number(node)?;
        self.leaf(n + 1)
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let n = self.node_number(node)?;
        n.checked_sub(1).and_then(|i| self.leaf(i))
    }

    fn child_count(&self, node: NodeId) -> usize {
        if self.is_root(node) {
            self.leaves.len()
        } else {
            0
        }
    }

    fn column_count(&self, _node: NodeId) -> usize {
        self.columns
    }

    fn flags(&self, node: NodeId) -> ItemFlags {
        if self.is_root(node) {
            return self.root_flags;
        }
        self.leaf_ref(node).map(|l| l.flags).unwrap_or_default()
    }

    fn set_flags(&mut self, flags: ItemFlags, node: NodeId) {
        if self.is_root(node) {
            self.root_flags = flags;
        } else if let Some(leaf) = self.leaf_mut(node) {
            leaf.flags = flags;
        }
    }

    fn name(&self, node: NodeId) -> String {
        if self.is_root(node) {
            return ROOT_NAME.to_string();
        }
        self.leaf_ref(node)
            .map(|l| l.name.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fixture_has_thousand_leaves() {
        let model = FlatTestModel::default();
        assert_eq!(model.len(), 1000);
        assert_eq!(model.child_count(model.root()), 1000);
        assert_eq!(model.column_count(model.root()), 3);
        assert_eq!(model.name(model.root()), "(root)");
    }

    #[test]
    fn root_has_no_parent_and_leaves_point_to_root() {
        let model = FlatTestModel::new(5);
        assert_eq!(model.parent(model.root()), None);
        let leaf = model.leaf(3).unwrap();
        assert_eq!(model.parent(leaf), Some(model.root()));
    }

    #[test]
    fn boundary_children() {
        let model = FlatTestModel::new(5);
        assert_eq!(model.first_child(model.root()), model.leaf(0));
        assert_eq!(model.last_child(model.root()), model.leaf(4));
        let leaf = model.leaf(2).unwrap();
        assert_eq!(model.first_child(leaf), None);
        assert_eq!(model.last_child(leaf), None);
    }

    #[test]
    fn siblings_stop_at_boundaries() {
        let model = FlatTestModel::new(3);
        let first = model.leaf(0).unwrap();
        let last = model.leaf(2).unwrap();
        assert_eq!(model.previous_sibling(first), None);
        assert_eq!(model.next_sibling(first), model.leaf(1));
        assert_eq!(model.previous_sibling(model.leaf(1).unwrap()), Some(first));
        assert_eq!(model.next_sibling(last), None);
        assert_eq!(model.next_sibling(model.root()), None);
        assert_eq!(model.previous_sibling(model.root()), None);
    }

    #[test]
    fn empty_model_has_no_children() {
        let model = FlatTestModel::new(0);
        assert!(model.is_empty());
        assert_eq!(model.first_child(model.root()), None);
        assert_eq!(model.last_child(model.root()), None);
    }

    #[test]
    fn non_numeric_name_is_not_found() {
        let mut model = FlatTestModel::new(3);
        let leaf = model.leaf(1).unwrap();
        model.rename(leaf, "one");
        assert_eq!(model.node_number(leaf), None);
        assert_eq!(model.next_sibling(leaf), None);
        assert_eq!(model.node_number(model.root()), None);
    }

    #[test]
    fn unknown_handle_degrades_gracefully() {
        let mut model = FlatTestModel::new(2);
        let ghost = NodeId::new(99);
        assert_eq!(model.parent(ghost), None);
        assert_eq!(model.flags(ghost), ItemFlags::empty());
        model.set_flags(ItemFlags::EDITED, ghost);
        assert_eq!(model.flags(ghost), ItemFlags::empty());
    }

    #[test]
    fn flags_round_trip_through_setter() {
        let mut model = FlatTestModel::with_flags(2, ItemFlags::empty());
        let leaf = model.leaf(0).unwrap();
        assert_eq!(model.flags(leaf), ItemFlags::empty());
        model.set_flags(ItemFlags::SELECTABLE | ItemFlags::SELECTED, leaf);
        assert!(model.flags(leaf).contains(ItemFlags::SELECTED));
        assert_eq!(model.flags(model.leaf(1).unwrap()), ItemFlags::empty());
    }
}
