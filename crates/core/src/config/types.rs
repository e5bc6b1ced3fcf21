use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Value;

use crate::template::ValueRule;

/// On-disk configuration (JSON or TOML).
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Per-key default/generator rules, overriding the template's own.
    #[serde(default)]
    pub value_insertion: HashMap<String, Value>,
    /// Key that `--gen-id` fills in (default: `id`).
    #[serde(default)]
    pub id_key: Option<String>,
    /// File extensions picked up in directory mode (default: `md`).
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Folders skipped in directory mode, relative to the scanned directory.
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_id_key() -> String {
    "id".to_string()
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the config was read from, if any.
    pub source: Option<PathBuf>,
    pub value_insertion: HashMap<String, ValueRule>,
    pub id_key: String,
    /// Lowercase extensions without the leading dot.
    pub extensions: Vec<String>,
    pub excluded_folders: Vec<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            value_insertion: HashMap::new(),
            id_key: default_id_key(),
            extensions: default_extensions(),
            excluded_folders: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}
