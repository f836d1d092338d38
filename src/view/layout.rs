//! Incremental layout: the top-node cursor, pixel scrolling across rows of
//! varying height, and the list of rows visible in the viewport.
//!
//! Nothing here walks from the root except [`calculate_total_height`]. All
//! other functions step outward from the current top node.

use crate::model::{NodeId, TreeModel};
use crate::view::traversal::{next_node, previous_node};

/// Width and height in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Size hints for rows and cells.
///
/// `row` is the document-order row index when known. `column` is `None`
/// when the whole row is being measured.
pub trait CellMetrics {
    fn cell_size(&self, row: Option<usize>, column: Option<usize>, node: NodeId) -> Size;
}

/// Every cell has the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformCells {
    pub width: u32,
    pub height: u32,
}

impl UniformCells {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for UniformCells {
    fn default() -> Self {
        Self::new(128, 64)
    }
}

impl CellMetrics for UniformCells {
    fn cell_size(&self, _row: Option<usize>, _column: Option<usize>, _node: NodeId) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Uniform cells, except every `every`-th node (by handle) is `tall_height` high.
///
/// Keyed on the node rather than the row so a full-tree measurement without
/// row indices agrees with the incremental one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripedHeights {
    pub base: UniformCells,
    pub every: usize,
    pub tall_height: u32,
}

impl CellMetrics for StripedHeights {
    fn cell_size(&self, row: Option<usize>, column: Option<usize>, node: NodeId) -> Size {
        let base = self.base.cell_size(row, column, node);
        if self.every > 0 && node.raw() % self.every == 0 {
            Size::new(base.width, self.tall_height)
        } else {
            base
        }
    }
}

/// The first node scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNode {
    pub node: NodeId,
    pub row: usize,
    pub level: i32,
    pub size: Size,
}

/// One visible row of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub node: NodeId,
    pub row: usize,
    pub level: i32,
    pub size: Size,
}

pub type PaintList = Vec<NodeInfo>;

/// Result of absorbing a scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub top: TopNode,
    /// Units of `top` hidden above the viewport.
    pub offset_y: u32,
    /// Signed distance actually travelled. Less than requested at either end.
    pub moved: i64,
}

/// Top node for a freshly bound model: the first node after the root.
pub fn seed_top_node<M: TreeModel + ?Sized>(
    model: &M,
    metrics: &dyn CellMetrics,
) -> Option<TopNode> {
    let (node, level) = next_node(model, model.root(), -1)?;
    Some(TopNode {
        node,
        row: 0,
        level,
        size: metrics.cell_size(Some(0), None, node),
    })
}

fn step_forward<M: TreeModel + ?Sized>(
    model: &M,
    metrics: &dyn CellMetrics,
    top: &TopNode,
) -> Option<TopNode> {
    let (node, level) = next_node(model, top.node, top.level)?;
    let row = top.row + 1;
    Some(TopNode {
        node,
        row,
        level,
        size: metrics.cell_size(Some(row), None, node),
    })
}

fn step_backward<M: TreeModel + ?Sized>(
    model: &M,
    metrics: &dyn CellMetrics,
    top: &TopNode,
) -> Option<TopNode> {
    let (node, level) = previous_node(model, top.node, top.level)?;
    if node == model.root() {
        return None;
    }
    let row = top.row.saturating_sub(1);
    Some(TopNode {
        node,
        row,
        level,
        size: metrics.cell_size(Some(row), None, node),
    })
}

/// Move the top node by `delta` units. Positive scrolls towards the end.
///
/// Steps one node at a time, so the cost is proportional to the number of
/// rows crossed, never to the size of the tree. Running past either end
/// parks on the boundary node with a zero offset. A forward scroll that
/// starts on the last node keeps its offset, so `moved` is never negative
/// for a positive `delta`.
pub fn find_top_node<M: TreeModel + ?Sized>(
    model: &M,
    metrics: &dyn CellMetrics,
    top: TopNode,
    offset_y: u32,
    delta: i64,
) -> ScrollOutcome {
    let mut top = top;
    let mut pos = i64::from(offset_y) + delta;
    let mut passed: i64 = 0;

    if pos >= 0 {
        while pos >= i64::from(top.size.height) {
            match step_forward(model, metrics, &top) {
                Some(next) => {
                    pos -= i64::from(top.size.height);
                    passed += i64::from(top.size.height);
                    top = next;
                }
                // Already inside the last node: hold position rather than snap back.
                None if passed == 0 => {
                    pos = i64::from(offset_y);
                    break;
                }
                None => {
                    pos = 0;
                    break;
                }
            }
        }
    } else {
        while pos < 0 {
            match step_backward(model, metrics, &top) {
                Some(prev) => {
                    pos += i64::from(prev.size.height);
                    passed -= i64::from(prev.size.height);
                    top = prev;
                }
                None => {
                    pos = 0;
                    break;
                }
            }
        }
    }

    let new_offset = u32::try_from(pos).unwrap_or(0);
    ScrollOutcome {
        top,
        offset_y: new_offset,
        moved: passed + i64::from(new_offset) - i64::from(offset_y),
    }
}

/// Rows visible in a viewport of `viewport_height`, starting at `top`.
///
/// The last row may overflow the bottom edge. A top row that is only
/// partly visible is always included.
pub fn make_paint_list<M: TreeModel + ?Sized>(
    model: &M,
    metrics: &dyn CellMetrics,
    top: &TopNode,
    offset_y: u32,
    viewport_height: u32,
) -> PaintList {
    let mut list = PaintList::new();
    if viewport_height == 0 {
        return list;
    }

    let mut remaining = i64::from(viewport_height) + i64::from(offset_y);
    let mut row = top.row;
    let mut cursor = Some((top.node, top.level));

    while let Some((node, level)) = cursor {
        if remaining <= 0 {
            break;
        }
        let size = metrics.cell_size(Some(row), None, node);
        list.push(NodeInfo {
            node,
            row,
            level,
            size,
        });
        remaining -= i64::from(size.height);
        row += 1;
        cursor = next_node(model, node, level);
    }
    list
}

/// Row under the vertical position `y` (viewport coordinates).
pub fn obj_at_pos(paint_list: &[NodeInfo], offset_y: u32, y: i64) -> Option<&NodeInfo> {
    if y < 0 {
        return None;
    }
    let mut remaining = y + i64::from(offset_y);
    for info in paint_list {
        let h = i64::from(info.size.height);
        if remaining < h {
            return Some(info);
        }
        remaining -= h;
    }
    None
}

/// Viewport y of the top edge of `node`, if it is in the paint list.
pub fn row_top(paint_list: &[NodeInfo], offset_y: u32, node: NodeId) -> Option<(i64, &NodeInfo)> {
    let mut y = -i64::from(offset_y);
    for info in paint_list {
        if info.node == node {
            return Some((y, info));
        }
        y += i64::from(info.size.height);
    }
    None
}

/// Height of every row in the tree, root excluded. Walks the whole tree.
pub fn calculate_total_height<M: TreeModel + ?Sized>(model: &M, metrics: &dyn CellMetrics) -> u64 {
    let mut total: u64 = 0;
    let mut row = 0;
    let mut cursor = next_node(model, model.root(), -1);
    while let Some((node, level)) = cursor {
        total += u64::from(metrics.cell_size(Some(row), None, node).height);
        row += 1;
        cursor = next_node(model, node, level);
    }
    total
}
