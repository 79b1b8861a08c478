use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::session::Counts;
use crate::tui::app::App;

use super::helpers::split_line;

pub const TITLE: &str = "My Planner";
pub const TAGLINE: &str = "Plan your day, own your goals";

/// Label of the display toggle; names the mode it switches to
pub fn display_toggle_label(dark: bool) -> &'static str {
    if dark { "\u{2600} Light" } else { "\u{263E} Dark" }
}

fn counts_label(counts: Counts) -> String {
    format!(
        "{} tasks \u{00B7} {} active \u{00B7} {} done",
        counts.total, counts.active, counts.completed
    )
}

/// Title row with the display toggle, tagline row with task counts
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let bg = theme.background;
    let width = area.width as usize;

    let title = split_line(
        vec![Span::styled(
            format!(" {}", TITLE),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )],
        vec![Span::styled(
            format!("{} ", display_toggle_label(app.session.dark_mode())),
            Style::default().fg(theme.highlight).bg(bg),
        )],
        width,
        bg,
    );
    let tagline = split_line(
        vec![Span::styled(
            format!(" {}", TAGLINE),
            Style::default().fg(theme.dim).bg(bg),
        )],
        vec![Span::styled(
            format!("{} ", counts_label(app.session.counts())),
            Style::default().fg(theme.dim).bg(bg),
        )],
        width,
        bg,
    );

    let paragraph = Paragraph::new(vec![title, tagline]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};

    #[test]
    fn header_shows_title_counts_and_toggle() {
        let mut app = app_with_tasks(&["A", "B", "C"]);
        let id = app.session.tasks()[1].id.clone();
        app.session.toggle_complete(&id).unwrap();

        let out = render_to_string(80, 2, |frame, area| render_header(frame, &app, area));
        assert!(out.contains("My Planner"));
        assert!(out.contains("Plan your day, own your goals"));
        assert!(out.contains("3 tasks \u{00B7} 2 active \u{00B7} 1 done"));
        assert!(out.contains("\u{263E} Dark"));
    }

    #[test]
    fn toggle_label_names_other_mode() {
        let mut app = app_with_tasks(&[]);
        app.session.set_display_mode(true);
        let out = render_to_string(80, 2, |frame, area| render_header(frame, &app, area));
        assert!(out.contains("\u{2600} Light"));
    }
}
