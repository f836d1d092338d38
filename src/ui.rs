use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;

/// Render the application UI: the tree panel and a one-line status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let title = match app.view.model() {
        Some(model) => format!(" {} ", model.name(model.root())),
        None => " (no model) ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));

    // Resize before drawing so the paint list matches this frame.
    app.sync_viewport(block.inner(chunks[0]));

    let tree_widget = TreeWidget::new(&app.view, &app.theme, app.indent).block(block);
    frame.render_widget(tree_widget, chunks[0]);

    let summary = app.status_summary();
    let position = app.position_text();
    let mut status = StatusBarWidget::new(&summary, &position, &app.theme);
    if let Some((msg, is_error, _)) = &app.status_message {
        status = status.status_message(msg, *is_error);
    }
    frame.render_widget(status, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DemoConfig};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn render_sizes_view_to_panel() {
        let config = AppConfig {
            demo: DemoConfig {
                nodes: Some(100),
                nested: Some(false),
            },
            ..Default::default()
        };
        let mut app = App::new(&config);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        // 12 lines minus status bar minus two border lines
        assert_eq!(app.view.state().viewport.height, 9);
        assert_eq!(app.view.state().paint_list.len(), 9);

        let buffer = terminal.backend().buffer();
        let title: String = (0..60)
            .map(|x| buffer.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(title.contains("(root)"));
        let status: String = (0..60)
            .map(|x| buffer.cell((x, 11)).unwrap().symbol().to_string())
            .collect();
        assert!(status.contains("no selection"));
        assert!(status.contains("0/100"));
    }

    #[test]
    fn status_line_keeps_selection_details_at_sixty_columns() {
        let config = AppConfig {
            demo: DemoConfig {
                nodes: Some(100),
                nested: Some(false),
            },
            ..Default::default()
        };
        let mut app = App::new(&config);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();
        app.view.click(0, 2, false);
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let status: String = (0..60)
            .map(|x| buffer.cell((x, 11)).unwrap().symbol().to_string())
            .collect();
        assert!(status.contains("1 selected"));
        assert!(status.contains("2 [sel,edit]"));
        assert!(status.contains("0/100"));
        assert!(status.contains("100 top-level"));
    }
}
