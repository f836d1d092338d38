use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use crate::model::{ItemFlags, TreeModel};
use crate::theme::ThemeColors;
use crate::view::layout::NodeInfo;
use crate::view::TreeView;

/// Marker drawn in the gutter of selected rows.
const FOCUS_MARKER: &str = "▌";
/// Columns reserved on the left for the focus marker.
const GUTTER: i64 = 1;

/// Draws the view's paint list. Reads model flags but never mutates anything.
pub struct TreeWidget<'a, M> {
    view: &'a TreeView<M>,
    theme: &'a ThemeColors,
    indent: u32,
    block: Option<Block<'a>>,
}

impl<'a, M: TreeModel> TreeWidget<'a, M> {
    pub fn new(view: &'a TreeView<M>, theme: &'a ThemeColors, indent: u32) -> Self {
        Self {
            view,
            theme,
            indent,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Placeholder cell content. Real applications would render per-column data.
    fn cell_text(row: usize, column: usize, flags: ItemFlags) -> String {
        if flags.contains(ItemFlags::EDITED) {
            "edited".to_string()
        } else {
            format!("({row},{column})")
        }
    }

    fn row_style(&self, info: &NodeInfo) -> Style {
        let state = self.view.state();
        let mut style = Style::default().fg(self.theme.row_fg).bg(if info.row % 2 == 1 {
            self.theme.row_alt_bg
        } else {
            self.theme.row_bg
        });
        if state.highlighted == Some(info.node) {
            style = style.bg(self.theme.hover_bg);
        }
        if state.selection.contains(info.node) {
            style = style
                .bg(self.theme.selected_bg)
                .fg(self.theme.selected_fg)
                .add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Draw one row whose top edge is at `top` (relative to `area`, may be negative).
    fn draw_row(&self, model: &M, info: &NodeInfo, top: i64, area: Rect, buf: &mut Buffer) {
        let height = i64::from(area.height);
        let bottom = top + i64::from(info.size.height);
        let first = top.max(0);
        let last = bottom.min(height);
        if first >= last {
            return;
        }

        let style = self.row_style(info);
        let selected = self.view.state().selection.contains(info.node);
        for line in first..last {
            let y = area.y + line as u16;
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            if selected {
                buf.set_string(area.x, y, FOCUS_MARKER, style.fg(self.theme.focus_fg));
            }
        }

        // Cell text sits on the middle line of the row.
        let middle = top + (i64::from(info.size.height) - 1).max(0) / 2;
        if middle < first || middle >= last {
            return;
        }
        let y = area.y + middle as u16;
        let flags = model.flags(info.node);
        let text_style = if flags.contains(ItemFlags::EDITED) {
            style.fg(self.theme.edited_fg).add_modifier(Modifier::ITALIC)
        } else {
            style
        };

        let width = i64::from(area.width);
        let mut x = GUTTER + i64::from(info.level.max(0)) * i64::from(self.indent);
        for column in 0..model.column_count(info.node) {
            if x >= width {
                break;
            }
            let cell_width = i64::from(
                self.view
                    .metrics()
                    .cell_size(Some(info.row), Some(column), info.node)
                    .width,
            );
            self.draw_cell(
                &Self::cell_text(info.row, column, flags),
                x,
                cell_width.min(width - x),
                cell_width,
                Rect::new(area.x, y, area.width, 1),
                text_style,
                buf,
            );
            x += cell_width;
        }
    }

    /// Centre `text` in a cell of `cell_width` starting at column `x`, clipped to `visible`.
    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        text: &str,
        x: i64,
        visible: i64,
        cell_width: i64,
        line: Rect,
        style: Style,
        buf: &mut Buffer,
    ) {
        if visible <= 0 {
            return;
        }
        let len = text.chars().count() as i64;
        let pad = ((cell_width - len) / 2).max(0);
        if pad >= visible {
            return;
        }
        let max = (visible - pad) as usize;
        buf.set_stringn(line.x + (x + pad) as u16, line.y, text, max, style);
    }
}

impl<'a, M: TreeModel> Widget for TreeWidget<'a, M> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let Some(model) = self.view.model() else {
            return;
        };

        let state = self.view.state();
        let rows_area = if inner.width > 1 {
            Rect {
                width: inner.width - 1,
                ..inner
            }
        } else {
            inner
        };

        let mut top = -i64::from(state.offset_y);
        for info in &state.paint_list {
            self.draw_row(model, info, top, rows_area, buf);
            top += i64::from(info.size.height);
        }

        if inner.width > 1 && state.total_height > 0 {
            let mut scrollbar_state =
                ScrollbarState::new(usize::try_from(state.total_height).unwrap_or(usize::MAX))
                    .position(usize::try_from(state.scroll_y).unwrap_or(usize::MAX))
                    .viewport_content_length(inner.height as usize);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Style::default().fg(self.theme.scrollbar_fg))
                .render(inner, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArenaTreeModel, FlatTestModel};
    use crate::theme;
    use crate::view::layout::UniformCells;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    fn flat_view(rows: u32, height: u32) -> TreeView<FlatTestModel> {
        let mut view = TreeView::new(UniformCells::new(8, height));
        view.resize(40, 6);
        view.set_model(FlatTestModel::new(rows as usize));
        view
    }

    fn render<M: TreeModel>(view: &TreeView<M>, width: u16, height: u16) -> Buffer {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(view, &tc, 2).render(area, &mut buf);
        buf
    }

    #[test]
    fn draws_one_line_per_row_with_cells() {
        let view = flat_view(100, 1);
        let buf = render(&view, 40, 6);
        let first = line(&buf, 0);
        assert!(first.contains("(0,0)"));
        assert!(first.contains("(0,1)"));
        assert!(first.contains("(0,2)"));
        assert!(line(&buf, 5).contains("(5,0)"));
    }

    #[test]
    fn scrolled_view_starts_at_top_row() {
        let mut view = flat_view(100, 1);
        view.scroll_by(10);
        let buf = render(&view, 40, 6);
        assert!(line(&buf, 0).contains("(10,0)"));
    }

    #[test]
    fn tall_rows_put_text_on_middle_line() {
        let view = flat_view(10, 3);
        let buf = render(&view, 40, 6);
        assert!(!line(&buf, 0).contains("(0,0)"));
        assert!(line(&buf, 1).contains("(0,0)"));
        assert!(line(&buf, 4).contains("(1,0)"));
    }

    #[test]
    fn partially_scrolled_row_is_clipped() {
        let mut view = flat_view(10, 3);
        view.scroll_by(2);
        let buf = render(&view, 40, 6);
        // row 0's middle line is scrolled off; row 1 starts at line 1
        assert!(!line(&buf, 0).contains("(0,0)"));
        assert!(line(&buf, 2).contains("(1,0)"));
    }

    #[test]
    fn selected_row_gets_focus_marker() {
        let mut view = flat_view(10, 1);
        view.click(0, 2, false);
        let buf = render(&view, 40, 6);
        assert_eq!(buf.cell((0, 2)).unwrap().symbol(), FOCUS_MARKER);
        assert_ne!(buf.cell((0, 1)).unwrap().symbol(), FOCUS_MARKER);
        let tc = theme::dark_theme();
        assert_eq!(buf.cell((5, 2)).unwrap().bg, tc.selected_bg);
    }

    #[test]
    fn alternate_rows_are_striped() {
        let view = flat_view(10, 1);
        let buf = render(&view, 40, 6);
        let tc = theme::dark_theme();
        assert_eq!(buf.cell((3, 0)).unwrap().bg, tc.row_bg);
        assert_eq!(buf.cell((3, 1)).unwrap().bg, tc.row_alt_bg);
    }

    #[test]
    fn hovered_row_is_highlighted() {
        let mut view = flat_view(10, 1);
        view.hover(0, 3);
        let buf = render(&view, 40, 6);
        let tc = theme::dark_theme();
        assert_eq!(buf.cell((3, 3)).unwrap().bg, tc.hover_bg);
    }

    #[test]
    fn edited_node_shows_marker_text() {
        let mut view = flat_view(10, 1);
        view.click(0, 1, false);
        view.begin_edit();
        let buf = render(&view, 40, 6);
        assert!(line(&buf, 1).contains("edited"));
        assert!(!line(&buf, 1).contains("(1,0)"));
    }

    #[test]
    fn nested_rows_are_indented() {
        let mut view = TreeView::new(UniformCells::new(8, 1));
        view.resize(40, 4);
        view.set_model(ArenaTreeModel::demo(1, 1, 1));
        let buf = render(&view, 40, 4);
        let group = line(&buf, 0).find("(0,0)").unwrap();
        let item = line(&buf, 1).find("(1,0)").unwrap();
        let detail = line(&buf, 2).find("(2,0)").unwrap();
        assert_eq!(item - group, 2);
        assert_eq!(detail - item, 2);
    }

    #[test]
    fn unbound_view_renders_nothing() {
        let view: TreeView<FlatTestModel> = TreeView::new(UniformCells::default());
        let buf = render(&view, 20, 3);
        assert_eq!(line(&buf, 0).trim(), "");
    }

    #[test]
    fn zero_area_does_not_panic() {
        let view = flat_view(10, 1);
        render(&view, 0, 0);
    }
}
