use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

use crate::app::App;
use crate::model::TreeModel;
use crate::view::TreeView;

/// Keys the tree view itself understands. They act only with no modifier
/// held. Returns whether the key was consumed.
pub fn handle_view_key<M: TreeModel>(view: &mut TreeView<M>, key: KeyEvent) -> bool {
    if key.modifiers != KeyModifiers::NONE {
        return false;
    }
    match key.code {
        KeyCode::Up => view.select_previous(),
        KeyCode::Down => view.select_next(),
        KeyCode::F(2) => view.begin_edit(),
        KeyCode::Esc => view.cancel(),
        _ => false,
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::PageDown => {
            app.view.page_down();
        }
        KeyCode::PageUp => {
            app.view.page_up();
        }
        KeyCode::Home => {
            app.view.scroll_to_start();
        }
        KeyCode::End => {
            app.view.scroll_to_end();
        }
        code => {
            let consumed = handle_view_key(&mut app.view, key);
            trace!(?code, consumed, "view key");
            if !consumed {
                if code == KeyCode::F(2) && key.modifiers == KeyModifiers::NONE {
                    if let Some(name) = app.active_name() {
                        app.set_status_message(format!("{name} is not editable"), true);
                    }
                }
                return;
            }
            let name = app.active_name().unwrap_or_default();
            match code {
                KeyCode::F(2) => app.set_status_message(format!("Editing {name}"), false),
                KeyCode::Esc => app.set_status_message(format!("Cancelled on {name}"), false),
                _ => {}
            }
        }
    }
}

/// Handle a mouse event: left click selects (Ctrl appends), movement
/// tracks hover, and the wheel scrolls by one row.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let step = i64::from(app.row_height);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, y)) = app.to_viewport(mouse.column, mouse.row) {
                let append = mouse.modifiers.contains(KeyModifiers::CONTROL);
                app.view.click(x, y, append);
            }
        }
        MouseEventKind::Moved => match app.to_viewport(mouse.column, mouse.row) {
            Some((x, y)) => app.view.hover(x, y),
            None => app.view.clear_hover(),
        },
        MouseEventKind::ScrollDown => {
            app.view.scroll_by(step);
        }
        MouseEventKind::ScrollUp => {
            app.view.scroll_by(-step);
        }
        _ => {}
    }
}
