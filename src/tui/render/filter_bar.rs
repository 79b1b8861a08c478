use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::StatusFilter;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

const SEARCH_PLACEHOLDER: &str = "press / to search";

/// One row: search field, then status, category and priority selections
pub fn render_filter_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme().clone();
    let bg = theme.background;
    let label_style = Style::default().fg(theme.dim).bg(bg);
    let value_style = Style::default().fg(theme.text).bg(bg);
    let active_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let filters = app.session.filters().clone();
    let searching = app.mode == Mode::Search;

    let mut spans: Vec<Span> = vec![Span::styled(" Search: ", label_style)];
    let field_col = spans_width(&spans);
    if searching {
        spans.push(Span::styled(
            app.editor.text().to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
        let x = area.x as usize + field_col + app.editor.cursor_col();
        if x < (area.x + area.width) as usize {
            app.cursor_anchor = Some((x as u16, area.y));
        }
    } else if filters.search.is_empty() {
        spans.push(Span::styled(SEARCH_PLACEHOLDER, label_style));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(&filters.search, 24),
            active_style,
        ));
    }

    let selections = [
        ("Status", filters.status.label().to_string(), filters.status != StatusFilter::All),
        ("Category", filters.category.label("All"), !filters.category.is_all()),
        ("Priority", filters.priority.label("All"), !filters.priority.is_all()),
    ];
    for (label, value, active) in selections {
        spans.push(Span::styled(format!("   {}: ", label), label_style));
        spans.push(Span::styled(
            value,
            if active { active_style } else { value_style },
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
