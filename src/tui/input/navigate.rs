use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Priority, Selection};
use crate::tui::app::{AddForm, App, Mode, MoveState};
use crate::tui::editor::LineEditor;

use super::ignore_rejected;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.cursor = app.visible_len().saturating_sub(1),

        // Task actions
        KeyCode::Char('a') => {
            app.add_form = AddForm::default();
            app.mode = Mode::Add;
        }
        KeyCode::Enter | KeyCode::Char('e') => begin_edit(app),
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_cursor_task(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_cursor_task(app),
        KeyCode::Char('m') => grab_cursor_task(app),

        // Filters
        KeyCode::Char('/') => {
            let current = app.session.filters().search.clone();
            app.editor = LineEditor::with_text(&current);
            app.search_before = current;
            app.mode = Mode::Search;
        }
        KeyCode::Char('s') => {
            app.session.update_filters(|f| f.status = f.status.next());
            app.clamp_cursor();
        }
        KeyCode::Char('c') => cycle_category_filter(app),
        KeyCode::Char('p') => {
            app.session
                .update_filters(|f| f.priority = next_priority_selection(&f.priority));
            app.clamp_cursor();
        }
        KeyCode::Char('F') => {
            app.session.clear_filters();
            app.clamp_cursor();
        }

        KeyCode::Char('t') => {
            app.session.toggle_display_mode();
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible_len();
    if len == 0 {
        return;
    }
    let next = app.cursor as isize + delta;
    app.cursor = next.clamp(0, len as isize - 1) as usize;
}

fn begin_edit(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    let id = task.id.clone();
    app.editor = LineEditor::with_text(&task.text);
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

fn toggle_cursor_task(app: &mut App) {
    let Some(id) = app.cursor_task().map(|t| t.id.clone()) else {
        return;
    };
    ignore_rejected(app.session.toggle_complete(&id));
    // A status filter may have hidden the task
    app.clamp_cursor();
}

fn delete_cursor_task(app: &mut App) {
    let Some(id) = app.cursor_task().map(|t| t.id.clone()) else {
        return;
    };
    ignore_rejected(app.session.delete(&id));
    app.clamp_cursor();
}

fn grab_cursor_task(app: &mut App) {
    let Some(id) = app.cursor_task().map(|t| t.id.clone()) else {
        return;
    };
    app.move_state = Some(MoveState {
        task_id: id,
        origin: app.cursor,
        target: app.cursor,
    });
    app.mode = Mode::Move;
}

fn cycle_category_filter(app: &mut App) {
    let categories = app.session.categories();
    app.session.update_filters(|f| {
        f.category = next_in_cycle(&f.category, &categories);
    });
    app.clamp_cursor();
}

/// All -> each option in order -> All
fn next_in_cycle<T: Clone + PartialEq>(current: &Selection<T>, options: &[T]) -> Selection<T> {
    let next_index = match current {
        Selection::All => 0,
        Selection::Only(v) => match options.iter().position(|o| o == v) {
            Some(i) => i + 1,
            None => options.len(),
        },
    };
    match options.get(next_index) {
        Some(v) => Selection::Only(v.clone()),
        None => Selection::All,
    }
}

fn next_priority_selection(current: &Selection<Priority>) -> Selection<Priority> {
    next_in_cycle(current, &Priority::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusFilter;
    use crate::ops::task_ops::NewTask;
    use crate::tui::render::test_helpers::{app_with_tasks, press, visible_texts};

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app_with_tasks(&["A", "B"]);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn space_toggles_and_d_deletes() {
        let mut app = app_with_tasks(&["A", "B"]);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.tasks()[0].completed);
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.session.tasks()[0].completed);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(visible_texts(&app), vec!["A"]);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn actions_on_empty_list_are_noops() {
        let mut app = app_with_tasks(&[]);
        for c in [' ', 'd', 'e', 'm', 'j'] {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.session.tasks().is_empty());
    }

    #[test]
    fn status_filter_cycles() {
        let mut app = app_with_tasks(&["A", "B"]);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.filters().status, StatusFilter::Active);
        assert_eq!(visible_texts(&app), vec!["B"]);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(visible_texts(&app), vec!["A"]);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.filters().status, StatusFilter::All);
    }

    #[test]
    fn toggling_under_active_filter_hides_task() {
        let mut app = app_with_tasks(&["A", "B"]);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(visible_texts(&app), vec!["A"]);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn category_filter_cycles_through_known_categories() {
        let mut app = app_with_tasks(&[]);
        app.session
            .create(NewTask {
                text: "Garden".into(),
                category: Some("Home".into()),
                priority: None,
            })
            .unwrap();
        let mut seen = Vec::new();
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('c'));
            seen.push(app.session.filters().category.label("All"));
        }
        assert_eq!(seen, vec!["Work", "Personal", "School", "Home", "All"]);
    }

    #[test]
    fn priority_filter_cycles_and_clear_resets() {
        let mut app = app_with_tasks(&["A"]);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session.filters().priority, Selection::Only(Priority::High));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('F'));
        assert!(!app.session.filters().is_active());
    }

    #[test]
    fn t_toggles_display_mode() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('t'));
        assert!(app.session.dark_mode());
        press(&mut app, KeyCode::Char('t'));
        assert!(!app.session.dark_mode());
    }

    #[test]
    fn next_in_cycle_handles_stale_selection() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            next_in_cycle(&Selection::Only("gone".to_string()), &options),
            Selection::All
        );
        assert_eq!(
            next_in_cycle(&Selection::All, &options),
            Selection::Only("a".to_string())
        );
    }
}
