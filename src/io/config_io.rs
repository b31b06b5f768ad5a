use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Name of the optional config file inside the data directory
pub const CONFIG_FILE: &str = "tasklist.toml";

/// Error type for reading tasklist.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse tasklist.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read the config from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(Config::default());
    }
    let config_text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&config_text)?)
}

/// Path of the task file named by the config
pub fn storage_path(data_dir: &Path, config: &Config) -> PathBuf {
    data_dir.join(&config.storage.file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.storage.file, "tasks.json");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.empty_text, "No task found");
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"[storage]
file = "todo.json"

[ui.colors]
accent = "#112233"
"##,
        )
        .unwrap();

        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.storage.file, "todo.json");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("accent").unwrap(), "#112233");
        assert_eq!(
            storage_path(tmp.path(), &config),
            tmp.path().join("todo.json")
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[storage\nfile = ").unwrap();
        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn empty_config_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.storage.file, "tasks.json");
    }
}
