pub mod add_form;
pub mod filter_bar;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod status_row;
pub mod task_list;
#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};

/// Rows taken by the add form (border, text, selectors, border)
const ADD_FORM_HEIGHT: u16 = 4;

/// Draw the whole screen and place the terminal cursor
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme().background);
    frame.render_widget(Block::default().style(bg_style), area);

    let add_height = if app.mode == Mode::Add {
        ADD_FORM_HEIGHT
    } else {
        0
    };

    // Layout: header (2) | filter bar (1) | task list | add form | status row (1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(add_height),
            Constraint::Length(1),
        ])
        .split(area);

    // Set again by whichever field has focus
    app.cursor_anchor = None;

    header::render_header(frame, app, chunks[0]);
    filter_bar::render_filter_bar(frame, app, chunks[1]);
    task_list::render_task_list(frame, app, chunks[2]);
    if app.mode == Mode::Add {
        add_form::render_add_form(frame, app, chunks[3]);
    }
    status_row::render_status_row(frame, app, chunks[4]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
        return;
    }

    // Place the terminal cursor in the focused field
    if let Some(anchor) = app.cursor_anchor {
        frame.set_cursor_position(anchor);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, press, render_app};
    use crossterm::event::KeyCode;

    #[test]
    fn highlight_splits_at_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let hl = Style::default().bg(ratatui::style::Color::Yellow);
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Buy MILK now", Style::default(), hl, Some(&re));
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Buy ", "MILK", " now"]);
        assert_eq!(spans[1].style, hl);
    }

    #[test]
    fn highlight_without_match_is_single_span() {
        let re = Regex::new("zzz").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "abc", Style::default(), Style::default(), Some(&re));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }

    #[test]
    fn full_screen_has_all_regions() {
        let mut app = app_with_tasks(&["Buy milk"]);
        let out = render_app(&mut app, 80, 12);
        assert!(out.contains("My Planner"));
        assert!(out.contains("Search:"));
        assert!(out.contains("Buy milk"));
        assert!(!out.contains("New task"));

        press(&mut app, KeyCode::Char('a'));
        let out = render_app(&mut app, 80, 12);
        assert!(out.contains("New task"));
    }

    #[test]
    fn focused_field_gets_cursor_anchor() {
        let mut app = app_with_tasks(&["Buy milk"]);
        render_app(&mut app, 80, 12);
        assert!(app.cursor_anchor.is_none());

        press(&mut app, KeyCode::Char('e'));
        render_app(&mut app, 80, 12);
        assert!(app.cursor_anchor.is_some());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('/'));
        render_app(&mut app, 80, 12);
        let (_, y) = app.cursor_anchor.unwrap();
        assert_eq!(y, 2);
    }

    #[test]
    fn help_overlay_renders_on_top() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('?'));
        let out = render_app(&mut app, 80, 30);
        assert!(out.contains("Key Bindings"));
    }
}
