use super::{ItemFlags, NodeId, TreeModel};

#[derive(Debug, Clone)]
struct ArenaNode {
    name: String,
    flags: ItemFlags,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    previous_sibling: Option<NodeId>,
    child_count: usize,
}

impl ArenaNode {
    fn new(name: String, flags: ItemFlags, parent: Option<NodeId>) -> Self {
        Self {
            name,
            flags,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            previous_sibling: None,
            child_count: 0,
        }
    }
}

/// A nested tree stored in a `Vec` arena with explicit sibling links.
///
/// Every navigation query is a single index lookup.
#[derive(Debug, Clone)]
pub struct ArenaTreeModel {
    nodes: Vec<ArenaNode>,
    columns: usize,
    default_flags: ItemFlags,
}

impl ArenaTreeModel {
    pub fn new(columns: usize) -> Self {
        Self {
            nodes: vec![ArenaNode::new("(root)".into(), ItemFlags::empty(), None)],
            columns,
            default_flags: ItemFlags::SELECTABLE | ItemFlags::EDITABLE,
        }
    }

    /// Flags given to nodes added after this call.
    pub fn set_default_flags(&mut self, flags: ItemFlags) {
        self.default_flags = flags;
    }

    /// Append a child after the current last child of `parent`.
    ///
    /// Returns `None` when `parent` is not a node of this arena.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Option<NodeId> {
        let previous = self.get(parent)?.last_child;
        let id = NodeId::new(self.nodes.len());

        let mut node = ArenaNode::new(name.into(), self.default_flags, Some(parent));
        node.previous_sibling = previous;
        self.nodes.push(node);

        if let Some(prev) = previous {
            self.nodes[prev.raw()].next_sibling = Some(id);
        }
        let p = &mut self.nodes[parent.raw()];
        if p.first_child.is_none() {
            p.first_child = Some(id);
        }
        p.last_child = Some(id);
        p.child_count += 1;
        Some(id)
    }

    /// Total nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Demo tree: `groups` top-level groups, each holding `per_group`
    /// items, and every third item holding two sub-items.
    ///
    /// Groups are selectable but not editable; items and details are both.
    pub fn demo(groups: usize, per_group: usize, columns: usize) -> Self {
        let mut model = Self::new(columns);
        let root = model.root();
        for g in 0..groups {
            model.set_default_flags(ItemFlags::SELECTABLE);
            let Some(group) = model.add_child(root, format!("group {g}")) else {
                continue;
            };
            model.set_default_flags(ItemFlags::SELECTABLE | ItemFlags::EDITABLE);
            for i in 0..per_group {
                let Some(item) = model.add_child(group, format!("item {g}.{i}")) else {
                    continue;
                };
                if i % 3 == 0 {
                    model.add_child(item, format!("detail {g}.{i}.a"));
                    model.add_child(item, format!("detail {g}.{i}.b"));
                }
            }
        }
        model
    }

    fn get(&self, node: NodeId) -> Option<&ArenaNode> {
        self.nodes.get(node.raw())
    }
}

impl TreeModel for ArenaTreeModel {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.first_child
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.last_child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.next_sibling
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.previous_sibling
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.get(node).map(|n| n.child_count).unwrap_or(0)
    }

    fn column_count(&self, _node: NodeId) -> usize {
        self.columns
    }

    fn flags(&self, node: NodeId) -> ItemFlags {
        self.get(node).map(|n| n.flags).unwrap_or_default()
    }

    fn set_flags(&mut self, flags: ItemFlags, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(node.raw()) {
            n.flags = flags;
        }
    }

    fn name(&self, node: NodeId) -> String {
        self.get(node).map(|n| n.name.clone()).unwrap_or_default()
    }
}
