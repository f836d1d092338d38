//! The virtualized tree view.
//!
//! [`TreeView`] binds a [`TreeModel`], keeps a [`ViewState`] in sync with the
//! viewport, and turns pointer, key and scroll input into model queries.
//! Only the rows in the viewport are ever measured, except for the single
//! full walk that sizes the scrollbar when a model is bound.

pub mod layout;
pub mod state;
pub mod traversal;

use tracing::{debug, trace};

use crate::model::{ItemFlags, NodeId, TreeModel};
use layout::{CellMetrics, NodeInfo, Size};
use state::ViewState;

/// Tree view over a model `M`.
pub struct TreeView<M> {
    model: Option<M>,
    metrics: Box<dyn CellMetrics>,
    state: ViewState,
    follow_selection: bool,
}

impl<M: TreeModel> TreeView<M> {
    /// Create a view with no model bound.
    pub fn new(metrics: impl CellMetrics + 'static) -> Self {
        Self {
            model: None,
            metrics: Box::new(metrics),
            state: ViewState::default(),
            follow_selection: false,
        }
    }

    /// Scroll keyboard-selected rows into view. Off by default.
    pub fn with_follow_selection(mut self, follow: bool) -> Self {
        self.follow_selection = follow;
        self
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn metrics(&self) -> &dyn CellMetrics {
        self.metrics.as_ref()
    }

    /// Bind `model`, dropping all selection, highlight and scroll state.
    pub fn set_model(&mut self, model: M) {
        self.state.reset();
        self.state.top = layout::seed_top_node(&model, self.metrics.as_ref());
        self.state.total_height = layout::calculate_total_height(&model, self.metrics.as_ref());
        debug!(
            total_height = self.state.total_height,
            root_children = model.child_count(model.root()),
            "model bound"
        );
        self.model = Some(model);
        self.rebuild_paint_list();
    }

    /// Take the model back out, leaving the view empty.
    #[cfg(test)]
    pub fn take_model(&mut self) -> Option<M> {
        self.state.reset();
        self.model.take()
    }

    /// Viewport resized: the paint list is rebuilt for the new height.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.viewport = Size::new(width, height);
        trace!(width, height, "viewport resized");
        self.rebuild_paint_list();
    }

    /// Scroll by `delta` units (positive towards the end). Returns the
    /// distance actually travelled.
    pub fn scroll_by(&mut self, delta: i64) -> i64 {
        let (Some(model), Some(top)) = (self.model.as_ref(), self.state.top) else {
            return 0;
        };
        let outcome =
            layout::find_top_node(model, self.metrics.as_ref(), top, self.state.offset_y, delta);
        self.state.top = Some(outcome.top);
        self.state.offset_y = outcome.offset_y;
        self.state.scroll_y = self.state.scroll_y.saturating_add_signed(outcome.moved);
        trace!(
            delta,
            moved = outcome.moved,
            row = outcome.top.row,
            offset_y = outcome.offset_y,
            "scrolled"
        );
        self.rebuild_paint_list();
        outcome.moved
    }

    pub fn page_down(&mut self) -> i64 {
        self.scroll_by(i64::from(self.state.viewport.height))
    }

    pub fn page_up(&mut self) -> i64 {
        self.scroll_by(-i64::from(self.state.viewport.height))
    }

    pub fn scroll_to_start(&mut self) -> i64 {
        let back = i64::try_from(self.state.scroll_y).unwrap_or(i64::MAX);
        self.scroll_by(-back)
    }

    pub fn scroll_to_end(&mut self) -> i64 {
        let remaining = self.state.total_height.saturating_sub(self.state.scroll_y);
        self.scroll_by(i64::try_from(remaining).unwrap_or(i64::MAX))
    }

    /// Row under viewport position `(x, y)`. Only `y` matters: rows span the full width.
    pub fn row_at(&self, _x: i64, y: i64) -> Option<&NodeInfo> {
        layout::obj_at_pos(&self.state.paint_list, self.state.offset_y, y)
    }

    pub fn node_at(&self, x: i64, y: i64) -> Option<NodeId> {
        self.row_at(x, y).map(|info| info.node)
    }

    /// Pointer moved: track the row under it for hover drawing.
    pub fn hover(&mut self, x: i64, y: i64) {
        self.state.highlighted = self.node_at(x, y);
    }

    /// Pointer left the viewport.
    pub fn clear_hover(&mut self) {
        self.state.highlighted = None;
    }

    /// Select the row under `(x, y)` if it is selectable. With `append` the
    /// row joins the selection instead of replacing it.
    pub fn click(&mut self, x: i64, y: i64, append: bool) -> bool {
        let Some(node) = self.node_at(x, y) else {
            return false;
        };
        let Some(model) = self.model.as_ref() else {
            return false;
        };
        if !model.flags(node).contains(ItemFlags::SELECTABLE) {
            trace!(node = node.raw(), "click on non-selectable row ignored");
            return false;
        }
        if append {
            self.state.selection.append(node);
        } else {
            self.state.selection.replace(node);
        }
        debug!(node = node.raw(), append, selected = self.state.selection.len(), "row selected");
        true
    }

    /// Next row in document order. The root is never a row.
    pub fn next_row(&self, node: NodeId) -> Option<NodeId> {
        let model = self.model.as_ref()?;
        traversal::next_node(model, node, 0).map(|(n, _)| n)
    }

    /// Previous row in document order. Stepping back onto the root is a boundary.
    pub fn previous_row(&self, node: NodeId) -> Option<NodeId> {
        let model = self.model.as_ref()?;
        traversal::previous_node(model, node, 0)
            .map(|(n, _)| n)
            .filter(|n| *n != model.root())
    }

    /// Move the active selection one row down. The view does not scroll
    /// unless follow-selection is on.
    pub fn select_next(&mut self) -> bool {
        let Some(current) = self.state.selection.last() else {
            return false;
        };
        let Some(next) = self.next_row(current) else {
            return false;
        };
        self.move_selection(next);
        true
    }

    /// Move the active selection one row up.
    pub fn select_previous(&mut self) -> bool {
        let Some(current) = self.state.selection.last() else {
            return false;
        };
        let Some(prev) = self.previous_row(current) else {
            return false;
        };
        self.move_selection(prev);
        true
    }

    fn move_selection(&mut self, node: NodeId) {
        self.state.selection.replace(node);
        debug!(node = node.raw(), "selection moved");
        if self.follow_selection {
            self.ensure_visible(node);
        }
    }

    /// Mark the active node as being edited, if it is editable.
    pub fn begin_edit(&mut self) -> bool {
        let Some(node) = self.state.selection.last() else {
            return false;
        };
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        let flags = model.flags(node);
        if !flags.contains(ItemFlags::EDITABLE) {
            return false;
        }
        model.set_flags(flags | ItemFlags::EDITED, node);
        debug!(node = node.raw(), "edit started");
        true
    }

    /// Leave edit mode on the active node, or drop its selected flag when
    /// it is not being edited. The view's own selection is left alone.
    pub fn cancel(&mut self) -> bool {
        let Some(node) = self.state.selection.last() else {
            return false;
        };
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        let mut flags = model.flags(node);
        if flags.contains(ItemFlags::EDITED) {
            flags.remove(ItemFlags::EDITED);
        } else if flags.contains(ItemFlags::SELECTED) {
            flags.remove(ItemFlags::SELECTED);
        }
        model.set_flags(flags, node);
        debug!(node = node.raw(), flags = %flags.label(), "cancel");
        true
    }

    /// Scroll the smallest distance that brings `node` fully into view.
    ///
    /// Only rows in or adjacent to the paint list can be reached; anything
    /// further away is left alone.
    pub fn ensure_visible(&mut self, node: NodeId) {
        let Some(top) = self.state.top else {
            return;
        };
        let viewport = i64::from(self.state.viewport.height);

        if let Some((y, info)) = layout::row_top(&self.state.paint_list, self.state.offset_y, node) {
            let bottom = y + i64::from(info.size.height);
            if y < 0 {
                self.scroll_by(y);
            } else if bottom > viewport {
                self.scroll_by((bottom - viewport).min(y));
            }
            return;
        }

        if self.previous_row(top.node) == Some(node) {
            let row = top.row.saturating_sub(1);
            let h = self.metrics.cell_size(Some(row), None, node).height;
            self.scroll_by(-(i64::from(self.state.offset_y) + i64::from(h)));
            return;
        }

        let Some(last) = self.state.paint_list.last().copied() else {
            return;
        };
        if self.next_row(last.node) == Some(node) {
            let Some((last_y, _)) =
                layout::row_top(&self.state.paint_list, self.state.offset_y, last.node)
            else {
                return;
            };
            let y = last_y + i64::from(last.size.height);
            let h = self.metrics.cell_size(Some(last.row + 1), None, node).height;
            let bottom = y + i64::from(h);
            self.scroll_by((bottom - viewport).min(y));
        } else {
            trace!(node = node.raw(), "ensure_visible: node not adjacent to viewport");
        }
    }

    fn rebuild_paint_list(&mut self) {
        self.state.paint_list = match (self.model.as_ref(), self.state.top) {
            (Some(model), Some(top)) => layout::make_paint_list(
                model,
                self.metrics.as_ref(),
                &top,
                self.state.offset_y,
                self.state.viewport.height,
            ),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArenaTreeModel, FlatTestModel};
    use layout::UniformCells;

    fn flat_view() -> TreeView<FlatTestModel> {
        let mut view = TreeView::new(UniformCells::new(128, 64));
        view.resize(384, 256);
        view.set_model(FlatTestModel::new(1000));
        view
    }

    fn leaf(view: &TreeView<FlatTestModel>, i: usize) -> NodeId {
        view.model().unwrap().leaf(i).unwrap()
    }

    fn rows(view: &TreeView<FlatTestModel>) -> Vec<usize> {
        view.state().paint_list.iter().map(|n| n.row).collect()
    }

    #[test]
    fn unbound_view_is_inert() {
        let mut view: TreeView<FlatTestModel> = TreeView::new(UniformCells::default());
        view.resize(100, 100);
        assert_eq!(view.scroll_by(500), 0);
        assert!(!view.click(0, 0, false));
        assert!(!view.select_next());
        assert!(!view.begin_edit());
        assert!(view.state().paint_list.is_empty());
    }

    #[test]
    fn set_model_seeds_state() {
        let view = flat_view();
        let state = view.state();
        assert_eq!(state.total_height, 64_000);
        assert_eq!(state.top.unwrap().node, leaf(&view, 0));
        assert_eq!(rows(&view), vec![0, 1, 2, 3]);
        assert_eq!(state.scroll_y, 0);
    }

    #[test]
    fn set_model_resets_selection_and_scroll() {
        let mut view = flat_view();
        view.scroll_by(300);
        view.hover(0, 10);
        view.click(0, 10, false);
        view.set_model(FlatTestModel::new(10));
        let state = view.state();
        assert!(state.selection.is_empty());
        assert!(state.highlighted.is_none());
        assert_eq!(state.offset_y, 0);
        assert_eq!(state.scroll_y, 0);
        assert_eq!(state.top.unwrap().row, 0);
    }

    #[test]
    fn scroll_640_shows_rows_10_to_13() {
        let mut view = flat_view();
        assert_eq!(view.scroll_by(640), 640);
        assert_eq!(view.state().top.unwrap().row, 10);
        assert_eq!(rows(&view), vec![10, 11, 12, 13]);
        assert_eq!(view.state().scroll_y, 640);
    }

    #[test]
    fn scroll_round_trip() {
        let mut view = flat_view();
        let before = view.state().top;
        view.scroll_by(777);
        view.scroll_by(-777);
        assert_eq!(view.state().top, before);
        assert_eq!(view.state().offset_y, 0);
        assert_eq!(view.state().scroll_y, 0);
    }

    #[test]
    fn resize_rebuilds_paint_list() {
        let mut view = flat_view();
        view.resize(384, 640);
        assert_eq!(view.state().paint_list.len(), 10);
        view.resize(384, 0);
        assert!(view.state().paint_list.is_empty());
    }

    #[test]
    fn paging_and_ends() {
        let mut view = flat_view();
        view.page_down();
        assert_eq!(view.state().top.unwrap().row, 4);
        view.page_up();
        assert_eq!(view.state().top.unwrap().row, 0);
        view.scroll_to_end();
        assert_eq!(view.state().top.unwrap().row, 999);
        view.scroll_to_start();
        assert_eq!(view.state().top.unwrap().row, 0);
        assert_eq!(view.state().scroll_y, 0);
    }

    #[test]
    fn click_replaces_selection() {
        let mut view = flat_view();
        assert!(view.click(0, 10, false));
        assert!(view.click(0, 70, false));
        let selected: Vec<NodeId> = view.state().selection.iter().collect();
        assert_eq!(selected, vec![leaf(&view, 1)]);
    }

    #[test]
    fn ctrl_click_appends() {
        let mut view = flat_view();
        view.click(0, 10, false);
        view.click(0, 200, true);
        let selected: Vec<NodeId> = view.state().selection.iter().collect();
        assert_eq!(selected, vec![leaf(&view, 0), leaf(&view, 3)]);
    }

    #[test]
    fn click_on_non_selectable_is_noop() {
        let mut view = TreeView::new(UniformCells::new(128, 64));
        view.resize(384, 256);
        view.set_model(FlatTestModel::with_flags(10, ItemFlags::EDITABLE));
        assert!(!view.click(0, 10, false));
        assert!(view.state().selection.is_empty());
    }

    #[test]
    fn click_below_last_row_is_noop() {
        let mut view = TreeView::new(UniformCells::new(10, 5));
        view.resize(30, 100);
        view.set_model(FlatTestModel::new(2));
        view.click(0, 0, false);
        assert!(!view.click(0, 50, false));
        assert_eq!(view.state().selection.len(), 1);
    }

    #[test]
    fn hover_tracks_row_under_pointer() {
        let mut view = flat_view();
        view.hover(5, 130);
        assert_eq!(view.state().highlighted, Some(leaf(&view, 2)));
        view.hover(5, 10_000);
        assert_eq!(view.state().highlighted, None);
        view.hover(5, 0);
        view.clear_hover();
        assert_eq!(view.state().highlighted, None);
    }

    #[test]
    fn keyboard_moves_selection_without_scrolling() {
        let mut view = flat_view();
        view.click(0, 200, false);
        assert!(view.select_next());
        assert!(view.select_next());
        assert_eq!(view.state().selection.last(), Some(leaf(&view, 5)));
        assert_eq!(view.state().top.unwrap().row, 0);
        assert!(view.select_previous());
        assert_eq!(view.state().selection.last(), Some(leaf(&view, 4)));
    }

    #[test]
    fn keyboard_stops_at_document_boundaries() {
        let mut view = flat_view();
        view.click(0, 0, false);
        assert!(!view.select_previous());
        assert_eq!(view.state().selection.last(), Some(leaf(&view, 0)));

        view.scroll_to_end();
        view.click(0, 0, false);
        assert!(!view.select_next());
        assert_eq!(view.state().selection.last(), Some(leaf(&view, 999)));
    }

    #[test]
    fn keyboard_without_selection_does_nothing() {
        let mut view = flat_view();
        assert!(!view.select_next());
        assert!(!view.select_previous());
    }

    #[test]
    fn follow_selection_scrolls_down_one_row() {
        let mut view = TreeView::new(UniformCells::new(128, 64)).with_follow_selection(true);
        view.resize(384, 256);
        view.set_model(FlatTestModel::new(100));
        view.click(0, 200, false);
        view.select_next();
        assert_eq!(view.state().top.unwrap().row, 1);
        assert_eq!(view.state().offset_y, 0);
    }

    #[test]
    fn follow_selection_reveals_partial_top_row() {
        let mut view = TreeView::new(UniformCells::new(128, 64)).with_follow_selection(true);
        view.resize(384, 256);
        view.set_model(FlatTestModel::new(100));
        view.scroll_by(64 + 20);
        view.click(0, 10, false);
        assert_eq!(view.state().selection.last(), view.model().unwrap().leaf(1));
        view.select_previous();
        assert_eq!(view.state().top.unwrap().row, 0);
        assert_eq!(view.state().offset_y, 0);
    }

    #[test]
    fn f2_marks_editable_node_as_edited() {
        let mut view = flat_view();
        view.click(0, 0, false);
        assert!(view.begin_edit());
        let node = leaf(&view, 0);
        assert!(view.model().unwrap().flags(node).contains(ItemFlags::EDITED));
    }

    #[test]
    fn f2_ignores_non_editable_node() {
        let mut view = TreeView::new(UniformCells::new(128, 64));
        view.resize(384, 256);
        view.set_model(FlatTestModel::with_flags(5, ItemFlags::SELECTABLE));
        view.click(0, 0, false);
        assert!(!view.begin_edit());
        let node = view.model().unwrap().leaf(0).unwrap();
        assert!(!view.model().unwrap().flags(node).contains(ItemFlags::EDITED));
    }

    #[test]
    fn escape_clears_edited_then_selected() {
        let mut view = TreeView::new(UniformCells::new(128, 64));
        view.resize(384, 256);
        let flags = ItemFlags::SELECTABLE | ItemFlags::EDITABLE | ItemFlags::SELECTED;
        view.set_model(FlatTestModel::with_flags(5, flags));
        view.click(0, 0, false);
        view.begin_edit();
        let node = view.model().unwrap().leaf(0).unwrap();

        view.cancel();
        let after_first = view.model().unwrap().flags(node);
        assert!(!after_first.contains(ItemFlags::EDITED));
        assert!(after_first.contains(ItemFlags::SELECTED));

        view.cancel();
        assert!(!view.model().unwrap().flags(node).contains(ItemFlags::SELECTED));
        assert_eq!(view.state().selection.last(), Some(node));
    }

    #[test]
    fn nested_model_scrolls_through_levels() {
        let mut view = TreeView::new(UniformCells::new(10, 1));
        view.resize(30, 3);
        view.set_model(ArenaTreeModel::demo(2, 3, 3));
        let levels: Vec<i32> = view.state().paint_list.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
        view.scroll_by(6);
        assert_eq!(view.state().top.unwrap().row, 6);
        let levels: Vec<i32> = view.state().paint_list.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
        view.scroll_by(-6);
        assert_eq!(view.state().top.unwrap().level, 0);
    }

    #[test]
    fn take_model_empties_view() {
        let mut view = flat_view();
        assert!(view.take_model().is_some());
        assert!(view.model().is_none());
        assert!(view.state().paint_list.is_empty());
    }
}
