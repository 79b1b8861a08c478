use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub badge_bg: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x11, 0x18, 0x27),
            text: Color::Rgb(0xD1, 0xD5, 0xDB),
            text_bright: Color::Rgb(0xF9, 0xFA, 0xFB),
            highlight: Color::Rgb(0x81, 0x8C, 0xF8),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            red: Color::Rgb(0xF8, 0x71, 0x71),
            yellow: Color::Rgb(0xFA, 0xCC, 0x15),
            green: Color::Rgb(0x4A, 0xDE, 0x80),
            badge_bg: Color::Rgb(0x37, 0x41, 0x51),
            selection_bg: Color::Rgb(0x1F, 0x29, 0x37),
            search_match_bg: Color::Rgb(0xFA, 0xCC, 0x15),
            search_match_fg: Color::Rgb(0x11, 0x18, 0x27),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF9, 0xFA, 0xFB),
            text: Color::Rgb(0x37, 0x41, 0x51),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            highlight: Color::Rgb(0x4F, 0x46, 0xE5),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            yellow: Color::Rgb(0xCA, 0x8A, 0x04),
            green: Color::Rgb(0x16, 0xA3, 0x4A),
            badge_bg: Color::Rgb(0xE5, 0xE7, 0xEB),
            selection_bg: Color::Rgb(0xE0, 0xE7, 0xFF),
            search_match_bg: Color::Rgb(0xFE, 0xF0, 0x8A),
            search_match_fg: Color::Rgb(0x11, 0x18, 0x27),
        }
    }

    /// Palette for the given mode with `[ui.colors.dark]` or
    /// `[ui.colors.light]` applied
    pub fn from_config(ui: &UiConfig, dark: bool) -> Self {
        if dark {
            Theme::dark().with_overrides(&ui.colors.dark)
        } else {
            Theme::light().with_overrides(&ui.colors.light)
        }
    }

    /// Unknown slot names and malformed colors are ignored
    fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => self.background = color,
                "text" => self.text = color,
                "text_bright" => self.text_bright = color,
                "highlight" => self.highlight = color,
                "dim" => self.dim = color,
                "red" => self.red = color,
                "yellow" => self.yellow = color,
                "green" => self.green = color,
                "badge_bg" => self.badge_bg = color,
                "selection_bg" => self.selection_bg = color,
                "search_match_bg" => self.search_match_bg = color,
                "search_match_fg" => self.search_match_fg = color,
                _ => {}
            }
        }
        self
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.green,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
