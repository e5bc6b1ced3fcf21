//! Loading a template schema from a JSON or YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::schema::{SchemaKey, TemplateSchema, ValueRule};

/// Reserved top-level template key holding per-key value rules.
pub const VALUE_INSERTION_KEY: &str = "valueInsertion";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON template {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML template {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("template {0} must be an object at the top level")]
    NotAnObject(PathBuf),

    #[error("invalid template {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("template {0} does not define any keys")]
    NoKeys(PathBuf),
}

/// Load a template schema from `path`.
///
/// `.yaml`/`.yml` files are read as YAML; anything else as JSON.
pub fn load_template(path: &Path) -> Result<TemplateSchema, SchemaError> {
    let text = fs::read_to_string(path)
        .map_err(|source| SchemaError::Io { path: path.to_path_buf(), source })?;

    let value = if is_yaml_path(path) {
        serde_yaml::from_str::<Value>(&text)
            .map_err(|source| SchemaError::Yaml { path: path.to_path_buf(), source })?
    } else {
        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|source| SchemaError::Json { path: path.to_path_buf(), source })?;
        json_to_yaml(&json).map_err(|source| SchemaError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    let schema = schema_from_value(value, path)?;
    tracing::debug!(template = %path.display(), keys = schema.len(), "loaded template");
    Ok(schema)
}

/// Parse a JSON template from a string.
pub fn parse_json_template(text: &str) -> Result<TemplateSchema, SchemaError> {
    let origin = Path::new("<inline>");
    let json: serde_json::Value = serde_json::from_str(text)
        .map_err(|source| SchemaError::Json { path: origin.to_path_buf(), source })?;
    let value = json_to_yaml(&json)
        .map_err(|source| SchemaError::Yaml { path: origin.to_path_buf(), source })?;
    schema_from_value(value, origin)
}

pub(crate) fn is_yaml_path(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}

/// Convert a JSON value into the YAML value model, keeping key order.
pub(crate) fn json_to_yaml(json: &serde_json::Value) -> Result<Value, serde_yaml::Error> {
    serde_yaml::to_value(json)
}

fn schema_from_value(value: Value, path: &Path) -> Result<TemplateSchema, SchemaError> {
    let Value::Mapping(map) = value else {
        return Err(SchemaError::NotAnObject(path.to_path_buf()));
    };

    let mut keys = Vec::with_capacity(map.len());
    let mut rules: Option<Mapping> = None;

    for (key, value) in map {
        let name = key_name(&key, path)?;
        if name == VALUE_INSERTION_KEY {
            match value {
                Value::Mapping(m) => {
                    rules = Some(m);
                    continue;
                }
                Value::Null => continue,
                _ => {
                    return Err(SchemaError::Invalid {
                        path: path.to_path_buf(),
                        message: format!("'{VALUE_INSERTION_KEY}' must be an object"),
                    });
                }
            }
        }
        keys.push(SchemaKey { name, rule: ValueRule::from_value(value) });
    }

    if keys.is_empty() {
        return Err(SchemaError::NoKeys(path.to_path_buf()));
    }

    let mut schema = TemplateSchema::new(keys);
    for (key, value) in rules.unwrap_or_default() {
        let name = key_name(&key, path)?;
        let Some(rule) = ValueRule::from_value(value) else { continue };
        if !schema.set_rule(&name, rule) {
            tracing::warn!(key = %name, "value rule for key not in template, ignoring");
        }
    }
    Ok(schema)
}

fn key_name(key: &Value, path: &Path) -> Result<String, SchemaError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(SchemaError::Invalid {
            path: path.to_path_buf(),
            message: "template keys must be scalars".to_string(),
        }),
    }
}
