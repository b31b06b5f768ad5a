use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from tasklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File (relative to the data directory) holding the task list
    #[serde(default = "default_storage_file")]
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file: default_storage_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Shown in place of the list when the filtered view is empty
    #[serde(default = "default_empty_text")]
    pub empty_text: String,
    /// Hex color overrides keyed by theme slot (e.g. `accent = "#5FB3F0"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            empty_text: default_empty_text(),
            colors: HashMap::new(),
        }
    }
}

fn default_storage_file() -> String {
    "tasks.json".to_string()
}

fn default_empty_text() -> String {
    "No task found".to_string()
}

fn default_true() -> bool {
    true
}
