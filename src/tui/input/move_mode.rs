use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::ignore_rejected;

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => shift_target(app, 1),
        KeyCode::Up | KeyCode::Char('k') => shift_target(app, -1),
        KeyCode::Home | KeyCode::Char('g') => set_target(app, 0),
        KeyCode::End | KeyCode::Char('G') => set_target(app, app.visible_len().saturating_sub(1)),
        KeyCode::Enter | KeyCode::Char('m') => drop_task(app),
        // Release outside a slot: nothing moves
        KeyCode::Esc => {
            if let Some(ms) = app.move_state.take() {
                app.cursor = ms.origin;
            }
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn shift_target(app: &mut App, delta: isize) {
    if let Some(ms) = &app.move_state {
        let next = (ms.target as isize + delta).max(0) as usize;
        set_target(app, next);
    }
}

fn set_target(app: &mut App, target: usize) {
    let last = app.visible_len().saturating_sub(1);
    if let Some(ms) = &mut app.move_state {
        ms.target = target.min(last);
        app.cursor = ms.target;
    }
}

/// Commit the move within the visible list
fn drop_task(app: &mut App) {
    if let Some(ms) = app.move_state.take() {
        ignore_rejected(app.session.reorder_in_view(ms.origin, ms.target));
        app.cursor = app.session.view_position(&ms.task_id).unwrap_or(ms.origin);
    }
    app.mode = Mode::Navigate;
    app.clamp_cursor();
}
