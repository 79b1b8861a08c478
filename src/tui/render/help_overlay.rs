use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let theme = app.theme();
    let bg = theme.background;

    let key_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.text).bg(bg);
    let header_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor up/down", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " a", "Add tasks", key_style, desc_style);
    add_binding(&mut lines, " Enter/e", "Edit text", key_style, desc_style);
    add_binding(&mut lines, " Space/x", "Toggle complete", key_style, desc_style);
    add_binding(&mut lines, " d/Del", "Delete", key_style, desc_style);
    add_binding(&mut lines, " m", "Grab, then j/k and Enter to drop", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Filters", header_style)));
    add_binding(&mut lines, " /", "Search", key_style, desc_style);
    add_binding(&mut lines, " s", "Cycle status", key_style, desc_style);
    add_binding(&mut lines, " c", "Cycle category", key_style, desc_style);
    add_binding(&mut lines, " p", "Cycle priority", key_style, desc_style);
    add_binding(&mut lines, " F", "Clear filters", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Other", header_style)));
    add_binding(&mut lines, " t", "Toggle dark/light", key_style, desc_style);
    add_binding(&mut lines, " ?", "Close this help", key_style, desc_style);
    add_binding(&mut lines, " q/Ctrl+C", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
