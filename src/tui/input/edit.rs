use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::ignore_rejected;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => finish(app),
        KeyCode::Enter => {
            if let Some(id) = app.edit_target.clone() {
                // Blank input is rejected and the old text stays
                ignore_rejected(app.session.update_text(&id, app.editor.text()));
            }
            finish(app);
            // An edit can take the task out of a search filter
            app.clamp_cursor();
        }
        _ => {
            app.editor.handle_key(key);
        }
    }
}

fn finish(app: &mut App) {
    app.edit_target = None;
    app.editor.clear();
    app.mode = Mode::Navigate;
}
