use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::split_line;

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "",
        Mode::Add => "ADD",
        Mode::Edit => "EDIT",
        Mode::Search => "SEARCH",
        Mode::Move => "MOVE",
    }
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  e edit  space done  d delete  m move  / search  ? help",
        Mode::Add => "Enter add  Tab field  \u{2190}\u{2192} choose  Esc close",
        Mode::Edit => "Enter save  Esc cancel",
        Mode::Search => "Enter keep  Esc restore",
        Mode::Move => "j/k move  Enter drop  Esc cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let bg = theme.background;
    let width = area.width as usize;

    let label = mode_label(app.mode);
    let left = if label.is_empty() {
        vec![Span::styled(" ", Style::default().bg(bg))]
    } else {
        vec![Span::styled(
            format!(" -- {} -- ", label),
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )]
    };
    let right = if app.show_key_hints {
        vec![Span::styled(
            format!("{} ", key_hints(app.mode)),
            Style::default().fg(theme.dim).bg(bg),
        )]
    } else {
        Vec::new()
    };

    let line = split_line(left, right, width, bg);
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
