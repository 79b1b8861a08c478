use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

use crate::model::config::LogConfig;

/// Environment variable overriding `[log] level`
pub const LOG_LEVEL_ENV: &str = "PLANNER_LOG";

/// Pick the effective level: env override, then config, then `warn`.
/// Unknown names fall back to `warn`.
pub fn effective_level(config: &LogConfig, env_value: Option<&str>) -> LevelFilter {
    env_value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(config.level.as_str())
        .trim()
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::WARN)
}

/// Log file location; relative paths resolve against the data directory
pub fn log_path(config: &LogConfig, data_dir: &Path) -> PathBuf {
    let file = Path::new(&config.file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_dir.join(file)
    }
}

/// Install the global subscriber writing to the log file. The terminal belongs
/// to the UI, so nothing is logged to stderr. Failure to open the file leaves
/// logging disabled.
pub fn init_logging(config: &LogConfig, data_dir: &Path) {
    let env_value = std::env::var(LOG_LEVEL_ENV).ok();
    let level = effective_level(config, env_value.as_deref());
    if level == LevelFilter::OFF {
        return;
    }

    let path = log_path(config, data_dir);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();

    tracing::info!(level = %level, path = %path.display(), "logging started");
}
