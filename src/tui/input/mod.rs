mod add;
mod edit;
mod move_mode;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops::TaskError;

use super::app::{App, AddField, Mode};

use add::handle_add;
use edit::handle_edit;
use move_mode::handle_move;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Move => handle_move(app, key),
    }
}

/// Handle a bracketed paste event: the text goes into whichever line editor
/// has focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Edit => app.editor.insert_str(text),
        Mode::Search => {
            app.editor.insert_str(text);
            search::apply_search(app);
        }
        Mode::Add if app.add_form.field == AddField::Text => app.add_form.text.insert_str(text),
        _ => {}
    }
}

/// Shift+letter arrives as either `Char('P')` or `Char('p')` with SHIFT
/// depending on the terminal; use the uppercase form.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Rejected edits leave the collection untouched and are not shown
fn ignore_rejected<T>(result: Result<T, TaskError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, "edit rejected");
            None
        }
    }
}
