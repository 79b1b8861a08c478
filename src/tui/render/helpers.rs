use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::theme::Theme;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Left spans, then `right` flush against the right edge when both fit.
/// Without room the right side is dropped.
pub(super) fn split_line<'a>(
    mut left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    bg: Color,
) -> Line<'a> {
    let left_width = spans_width(&left);
    let right_width = spans_width(&right);
    if left_width + right_width < width {
        let padding = width - left_width - right_width;
        left.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        left.extend(right);
    }
    Line::from(left)
}

/// ` label ` on the badge background
pub(super) fn badge(label: &str, fg: Color, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default()
            .fg(fg)
            .bg(theme.badge_bg)
            .add_modifier(Modifier::BOLD),
    )
}
