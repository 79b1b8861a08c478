use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Categories offered by the add form and the category filter, in order.
    /// Categories already used by tasks are appended after these.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub colors: ColorOverrides,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            categories: default_categories(),
            colors: ColorOverrides::default(),
        }
    }
}

/// Per-palette color overrides: `[ui.colors.dark]` / `[ui.colors.light]`,
/// mapping a theme slot name to `#RRGGBB`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorOverrides {
    #[serde(default)]
    pub dark: HashMap<String, String>,
    #[serde(default)]
    pub light: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file, relative paths resolve against the data directory
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_categories() -> Vec<String> {
    vec!["Work".into(), "Personal".into(), "School".into()]
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_log_file() -> String {
    "planner.log".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: PlannerConfig = toml::from_str("").unwrap();
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.categories, vec!["Work", "Personal", "School"]);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.file, "planner.log");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PlannerConfig = toml::from_str(
            r##"
[ui]
categories = ["Home"]

[ui.colors.light]
background = "#FFFFFF"

[log]
level = "debug"
"##,
        )
        .unwrap();
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.categories, vec!["Home"]);
        assert_eq!(
            config.ui.colors.light.get("background").map(String::as_str),
            Some("#FFFFFF")
        );
        assert!(config.ui.colors.dark.is_empty());
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, "planner.log");
    }
}
