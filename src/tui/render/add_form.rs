use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{AddField, App};

use super::helpers::spans_width;

const TEXT_PLACEHOLDER: &str = "What needs to be done?";

/// Bordered form: text field, then category and priority selectors
pub fn render_add_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme().clone();
    let bg = theme.background;
    let form = &app.add_form;

    let label_style = Style::default().fg(theme.dim).bg(bg);
    let focused_label = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(theme.text_bright).bg(bg);
    let label_for = |field: AddField| {
        if form.field == field {
            focused_label
        } else {
            label_style
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(" New task ", focused_label))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    let mut text_spans = vec![Span::styled(" Text: ", label_for(AddField::Text))];
    let field_col = spans_width(&text_spans);
    if form.text.text().is_empty() && form.field != AddField::Text {
        text_spans.push(Span::styled(TEXT_PLACEHOLDER, label_style));
    } else {
        text_spans.push(Span::styled(form.text.text().to_string(), value_style));
    }
    let anchor = if form.field == AddField::Text && inner.height > 0 {
        let x = inner.x as usize + field_col + form.text.cursor_col();
        (x < (inner.x + inner.width) as usize).then_some((x as u16, inner.y))
    } else {
        None
    };

    let category = form.category.as_deref().unwrap_or("none");
    let priority = form.priority.map_or("none", |p| p.label());
    let priority_style = match form.priority {
        Some(p) => Style::default().fg(theme.priority_color(p)).bg(bg),
        None => value_style,
    };
    let selectors = Line::from(vec![
        Span::styled(" Category: ", label_for(AddField::Category)),
        Span::styled(format!("\u{2039} {} \u{203A}", category), value_style),
        Span::styled("   Priority: ", label_for(AddField::Priority)),
        Span::styled(format!("\u{2039} {} \u{203A}", priority), priority_style),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(text_spans), selectors]).block(block);
    frame.render_widget(paragraph, area);

    if anchor.is_some() {
        app.cursor_anchor = anchor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, press, render_to_string, type_text};
    use crossterm::event::KeyCode;

    fn render_form(app: &mut App) -> String {
        render_to_string(60, 4, |frame, area| render_add_form(frame, app, area))
    }

    #[test]
    fn empty_form_shows_defaults() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        let out = render_form(&mut app);
        assert!(out.contains("New task"));
        assert!(out.contains("Category: \u{2039} none \u{203A}"));
        assert!(out.contains("Priority: \u{2039} none \u{203A}"));
        // Cursor sits right after the label
        assert_eq!(app.cursor_anchor, Some((8, 1)));
    }

    #[test]
    fn typed_text_and_selection_show() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        let out = render_form(&mut app);
        assert!(out.contains("Text: Buy milk"));
        assert!(out.contains("\u{2039} Work \u{203A}"));
        assert!(app.cursor_anchor.is_none());
    }
}
