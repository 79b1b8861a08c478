use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: restore the criterion the prompt opened with
        KeyCode::Esc => {
            let before = std::mem::take(&mut app.search_before);
            app.session.update_filters(|f| f.search = before);
            close(app);
        }
        // Keep the typed criterion
        KeyCode::Enter => close(app),
        _ => {
            if app.editor.handle_key(key) {
                apply_search(app);
            }
        }
    }
}

/// Push the editor text into the search criterion
pub(super) fn apply_search(app: &mut App) {
    let text = app.editor.text().to_string();
    app.session.update_filters(|f| f.search = text);
    app.cursor = 0;
}

fn close(app: &mut App) {
    app.editor.clear();
    app.mode = Mode::Navigate;
    app.clamp_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, press, type_text, visible_texts};

    #[test]
    fn typing_filters_live() {
        let mut app = app_with_tasks(&["Buy milk", "Call mom", "Milk the cow"]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "MILK");
        assert_eq!(visible_texts(&app), vec!["Buy milk", "Milk the cow"]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.session.filters().search, "MILK");
    }

    #[test]
    fn esc_restores_previous_search() {
        let mut app = app_with_tasks(&["Buy milk", "Call mom"]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "mom");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.editor.text(), "mom");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(visible_texts(&app).len(), 2);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.filters().search, "mom");
        assert_eq!(visible_texts(&app), vec!["Call mom"]);
    }

    #[test]
    fn no_matches_leaves_empty_view() {
        let mut app = app_with_tasks(&["A"]);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        assert!(visible_texts(&app).is_empty());
        assert_eq!(app.cursor, 0);
    }
}
