use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use crate::config::types::{
    ConfigFile, LoggingConfig, ResolvedConfig, default_extensions, default_id_key,
};
use crate::template::ValueRule;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    TomlError(String, #[source] toml::de::Error),

    #[error("failed to parse JSON in {0}: {1}")]
    JsonError(String, #[source] serde_json::Error),

    #[error("idKey must not be empty")]
    EmptyIdKey,

    #[error("extensions must not be empty")]
    NoExtensions,

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise built-in defaults apply.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let p = default_config_path();
                if !p.exists() {
                    tracing::debug!(looked_for = %p.display(), "no config file, using defaults");
                    return Ok(ResolvedConfig::default());
                }
                p
            }
        };

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf = Self::parse(&s, &path)?;
        let resolved = Self::resolve(cf, &path)?;
        tracing::debug!(config = %path.display(), "loaded config");
        Ok(resolved)
    }

    /// Parse config text; `.toml` paths are TOML, everything else JSON.
    pub fn parse(s: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(s).map_err(|e| ConfigError::TomlError(path.display().to_string(), e))
        } else {
            serde_json::from_str(s)
                .map_err(|e| ConfigError::JsonError(path.display().to_string(), e))
        }
    }

    fn resolve(cf: ConfigFile, path: &Path) -> Result<ResolvedConfig, ConfigError> {
        let id_key = cf.id_key.unwrap_or_else(default_id_key);
        if id_key.trim().is_empty() {
            return Err(ConfigError::EmptyIdKey);
        }

        let extensions: Vec<String> = cf
            .extensions
            .unwrap_or_else(default_extensions)
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }

        let value_insertion = cf
            .value_insertion
            .into_iter()
            .filter_map(|(k, v)| ValueRule::from_value(v).map(|r| (k, r)))
            .collect();

        // Resolve log file path if present
        let mut logging: LoggingConfig = cf.logging;
        if let Some(file) = logging.file.take() {
            logging.file = Some(expand_path(&file.to_string_lossy())?);
        }

        let excluded_folders = cf.excluded_folders.iter().map(PathBuf::from).collect();

        Ok(ResolvedConfig {
            source: Some(path.to_path_buf()),
            value_insertion,
            id_key,
            extensions,
            excluded_folders,
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("fmcheck").join("config.json");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("fmcheck").join("config.json")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
