use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::PlannerConfig;

/// File name of the config inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the config from an explicit path, or from `config.toml` in the data
/// directory. A missing file means defaults; an explicit path must exist.
pub fn read_config(data_dir: &Path, explicit: Option<&Path>) -> Result<PlannerConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => data_dir.join(CONFIG_FILE),
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(PlannerConfig::default());
        }
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };

    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_default_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path(), None).unwrap();
        assert_eq!(config.ui.categories.len(), 3);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            read_config(dir.path(), Some(&path)),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn reads_config_from_data_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[ui]\nshow_key_hints = false\ncategories = [\"Errands\"]\n",
        )
        .unwrap();
        let config = read_config(dir.path(), None).unwrap();
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.categories, vec!["Errands"]);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[ui\nbroken").unwrap();
        assert!(matches!(
            read_config(dir.path(), None),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
