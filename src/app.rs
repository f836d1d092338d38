use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::model::{ArenaTreeModel, FlatTestModel, TreeModel};
use crate::theme::{resolve_theme, ThemeColors};
use crate::view::layout::{StripedHeights, UniformCells};
use crate::view::TreeView;

/// Items per group in the nested demo tree.
const NESTED_ITEMS_PER_GROUP: usize = 10;
/// Columns shown by the demo models.
const DEMO_COLUMNS: usize = 3;
/// Seconds a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Model type the application binds: either demo model behind one trait object.
pub type DynModel = Box<dyn TreeModel>;

/// Main application state.
pub struct App {
    pub view: TreeView<DynModel>,
    pub theme: ThemeColors,
    pub indent: u32,
    pub row_height: u32,
    /// Inner area of the tree panel in terminal coordinates, updated on every draw.
    pub tree_area: Rect,
    pub should_quit: bool,
    /// Message, whether it is an error, and when it was set.
    pub status_message: Option<(String, bool, Instant)>,
}

impl App {
    /// Build the demo application described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        let metrics = StripedHeights {
            base: UniformCells::new(config.cell_width(), config.row_height()),
            every: config.tall_every(),
            tall_height: config.tall_height(),
        };
        let mut view = TreeView::new(metrics).with_follow_selection(config.follow_selection());
        view.set_model(Self::build_model(config));
        info!(
            nested = config.demo_nested(),
            nodes = config.demo_nodes(),
            total_height = view.state().total_height,
            "demo model loaded"
        );

        Self {
            view,
            theme: resolve_theme(&config.theme),
            indent: config.indent(),
            row_height: config.row_height(),
            tree_area: Rect::default(),
            should_quit: false,
            status_message: None,
        }
    }

    fn build_model(config: &AppConfig) -> DynModel {
        if config.demo_nested() {
            let model =
                ArenaTreeModel::demo(config.demo_nodes(), NESTED_ITEMS_PER_GROUP, DEMO_COLUMNS);
            if model.is_empty() {
                warn!("nested demo has no groups");
            }
            info!(nodes = model.len(), "nested demo built");
            Box::new(model)
        } else {
            let model = FlatTestModel::new(config.demo_nodes());
            if model.is_empty() {
                warn!("flat demo has no leaves");
            }
            info!(leaves = model.len(), "flat demo built");
            Box::new(model)
        }
    }

    /// Record the tree panel's inner area and resize the view when it changed.
    pub fn sync_viewport(&mut self, inner: Rect) {
        let changed = inner.width != self.tree_area.width || inner.height != self.tree_area.height;
        self.tree_area = inner;
        if changed {
            self.view
                .resize(u32::from(inner.width), u32::from(inner.height));
        }
    }

    /// Terminal cell to viewport coordinates, or `None` outside the tree panel.
    pub fn to_viewport(&self, column: u16, row: u16) -> Option<(i64, i64)> {
        let area = self.tree_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| (i64::from(column - area.x), i64::from(row - area.y)))
    }

    /// Name of the active node, if any.
    pub fn active_name(&self) -> Option<String> {
        let node = self.view.state().selection.last()?;
        self.view.model().map(|m| m.name(node))
    }

    /// Left side of the status bar.
    pub fn status_summary(&self) -> String {
        let state = self.view.state();
        let top = state
            .top
            .map(|t| format!("row {} +{}", t.row, state.offset_y))
            .unwrap_or_else(|| "empty".to_string());
        if state.selection.is_empty() {
            return format!("{top} | no selection");
        }
        let mut summary = format!("{top} | {} selected", state.selection.len());
        if let (Some(model), Some(node)) = (self.view.model(), state.selection.last()) {
            summary.push_str(&format!(
                " | {} [{}]",
                model.name(node),
                model.flags(node).label()
            ));
        }
        summary
    }

    /// Scroll position against total height, plus root child count.
    pub fn position_text(&self) -> String {
        let state = self.view.state();
        let children = self
            .view
            .model()
            .map(|m| m.child_count(m.root()))
            .unwrap_or(0);
        format!("{}/{} · {} top-level ", state.scroll_y, state.total_height, children)
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String, is_error: bool) {
        self.status_message = Some((msg, is_error, Instant::now()));
    }

    /// Clear the status message once it has been shown long enough.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, _, ref created)) = self.status_message {
            if created.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
