use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{badge, spans_width};
use super::push_highlighted_spans;

pub const EMPTY_MESSAGE: &str = "No tasks found. Add a new task to get started!";

const HANDLE: &str = "\u{283F}";
const SELECTED_MARKER: &str = "\u{25B8}";

/// Render the filtered tasks, keeping the cursor row on screen
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme().clone();
    let bg = theme.background;
    let height = area.height as usize;
    let width = area.width as usize;
    let len = app.visible_len();

    if len == 0 || height == 0 {
        app.scroll_offset = 0;
        let line = Line::from(Span::styled(
            format!(" {}", EMPTY_MESSAGE),
            Style::default().fg(theme.dim).bg(bg),
        ));
        let paragraph = Paragraph::new(vec![Line::from(""), line]).style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    // Scroll so the cursor stays visible
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    app.scroll_offset = app.scroll_offset.min(len.saturating_sub(height));

    let search_re = app.search_re();
    let highlight_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let grabbed = app.move_state.as_ref().map(|ms| ms.task_id.clone());
    let editing = match app.mode {
        Mode::Edit => app.edit_target.clone(),
        _ => None,
    };

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (row, pos) in app
        .display_order()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let Some(task) = app.session.visible(pos) else {
            continue;
        };
        let selected = row == app.cursor;
        let is_grabbed = grabbed.as_ref() == Some(&task.id);
        let row_bg = if selected { theme.selection_bg } else { bg };
        let on_row = |style: Style| style.bg(row_bg);

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            if selected {
                format!("{} ", SELECTED_MARKER)
            } else {
                "  ".to_string()
            },
            on_row(Style::default().fg(theme.highlight)),
        ));
        spans.push(Span::styled(
            format!("{} ", HANDLE),
            on_row(Style::default().fg(if is_grabbed {
                theme.highlight
            } else {
                theme.dim
            })),
        ));
        spans.push(Span::styled(
            if task.completed { "[x] " } else { "[ ] " },
            on_row(Style::default().fg(if task.completed {
                theme.green
            } else {
                theme.text
            })),
        ));

        let mut badges: Vec<Span> = Vec::new();
        if let Some(category) = &task.category {
            badges.push(Span::styled(" ", on_row(Style::default())));
            badges.push(badge(category, theme.text, &theme));
        }
        if let Some(priority) = task.priority {
            badges.push(Span::styled(" ", on_row(Style::default())));
            badges.push(badge(priority.label(), theme.priority_color(priority), &theme));
        }

        let prefix_width = spans_width(&spans);
        let text_budget = width.saturating_sub(prefix_width + spans_width(&badges) + 1);

        if editing.as_ref() == Some(&task.id) {
            spans.push(Span::styled(
                app.editor.text().to_string(),
                on_row(Style::default().fg(theme.text_bright)),
            ));
            let x = area.x as usize + prefix_width + app.editor.cursor_col();
            let y = area.y as usize + row - app.scroll_offset;
            if x < (area.x + area.width) as usize {
                app.cursor_anchor = Some((x as u16, y as u16));
            }
        } else {
            let base = if task.completed {
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if is_grabbed {
                Style::default()
                    .fg(theme.text_bright)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let text = unicode::truncate_to_width(&task.text, text_budget);
            push_highlighted_spans(
                &mut spans,
                &text,
                on_row(base),
                highlight_style,
                search_re.as_ref(),
            );
            spans.extend(badges);
        }

        let used = spans_width(&spans);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), on_row(Style::default())));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
