use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Priority;
use crate::ops::task_ops::NewTask;
use crate::tui::app::{AddField, App, Mode};
use crate::tui::editor::LineEditor;

use super::ignore_rejected;

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit(app),
        KeyCode::Tab => app.add_form.field = app.add_form.field.next(),
        KeyCode::BackTab => app.add_form.field = app.add_form.field.prev(),
        _ => match app.add_form.field {
            AddField::Text => {
                app.add_form.text.handle_key(key);
            }
            AddField::Category => match key.code {
                KeyCode::Right | KeyCode::Char('l') => cycle_category(app, 1),
                KeyCode::Left | KeyCode::Char('h') => cycle_category(app, -1),
                _ => {}
            },
            AddField::Priority => match key.code {
                KeyCode::Right | KeyCode::Char('l') => cycle_priority(app, 1),
                KeyCode::Left | KeyCode::Char('h') => cycle_priority(app, -1),
                _ => {}
            },
        },
    }
}

/// Create the task. On success the form clears, selectors included, and
/// stays open; blank text leaves the form as it is.
fn submit(app: &mut App) {
    let form = &app.add_form;
    let new = NewTask {
        text: form.text.text().to_string(),
        category: form.category.clone(),
        priority: form.priority,
    };
    if let Some(id) = ignore_rejected(app.session.create(new)) {
        app.add_form.text = LineEditor::new();
        app.add_form.category = None;
        app.add_form.priority = None;
        app.add_form.field = AddField::Text;
        if let Some(pos) = app.session.view_position(&id) {
            app.cursor = pos;
        }
    }
}

/// Step through `None` followed by each option, wrapping
fn step<T: Clone + PartialEq>(current: Option<&T>, options: &[T], delta: isize) -> Option<T> {
    let slots = options.len() as isize + 1;
    let index = match current {
        None => 0,
        Some(v) => options.iter().position(|o| o == v).map_or(0, |i| i as isize + 1),
    };
    let next = (index + delta).rem_euclid(slots);
    if next == 0 {
        None
    } else {
        options.get(next as usize - 1).cloned()
    }
}

fn cycle_category(app: &mut App, delta: isize) {
    let options = app.session.categories();
    app.add_form.category = step(app.add_form.category.as_ref(), &options, delta);
}

fn cycle_priority(app: &mut App, delta: isize) {
    app.add_form.priority = step(app.add_form.priority.as_ref(), &Priority::ALL, delta);
}
