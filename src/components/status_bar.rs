use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " q:quit  ↑↓:select  F2:edit  Esc:cancel  PgUp/PgDn ";

/// One-line status bar: scroll/selection summary on the left, position next
/// to it, or a transient message across the whole width. Key hints are
/// appended only when summary and position already fit in full.
pub struct StatusBarWidget<'a> {
    summary: &'a str,
    position: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(summary: &'a str, position: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            summary,
            position,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Truncate to at most `max` characters.
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), base);

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                base.bg(self.theme.error_bg).fg(self.theme.error_fg)
            } else {
                base.fg(self.theme.success_fg)
            };
            let display = format!("{:<width$}", clip(msg, width), width = width);
            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        let hints_len = KEY_HINTS.chars().count();
        let needed = self.summary.chars().count() + 1 + self.position.chars().count();
        let show_hints = width >= needed + hints_len;
        let remaining = if show_hints { width - hints_len } else { width };

        let summary = clip(self.summary, remaining);
        let position_budget = remaining.saturating_sub(summary.chars().count() + 1);
        let position = clip(self.position, position_budget);
        let gap = remaining
            .saturating_sub(summary.chars().count())
            .saturating_sub(position.chars().count());

        let mut spans = vec![
            Span::styled(summary, base),
            Span::styled(" ".repeat(gap), base),
            Span::styled(position, base.add_modifier(Modifier::BOLD)),
        ];
        if show_hints {
            spans.push(Span::styled(
                KEY_HINTS,
                base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
