//! `{{placeholder}}` rendering for default and generator rules.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::{Captures, Regex};
use serde_yaml::Value;

use crate::ids::generate_id;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([a-zA-Z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// Placeholders that produce a fresh value on every use.
const FRESH_ID_VARS: [&str; 2] = ["uuid", "id"];

/// Per-document variables available to rule rendering.
///
/// Static variables: `path`, `filename`, `stem`, `dir`, `date`, `datetime`.
/// `uuid` and `id` expand to a new identifier each time they appear.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    vars: HashMap<String, String>,
}

impl RenderContext {
    /// Context with only the date variables set.
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Context with date variables taken from `now`.
    pub fn at(now: DateTime<Local>) -> Self {
        let mut vars = HashMap::new();
        vars.insert("date".to_string(), now.format("%Y-%m-%d").to_string());
        vars.insert("datetime".to_string(), now.to_rfc3339());
        Self { vars }
    }

    /// Context for a document at `path`.
    pub fn for_path(path: &Path) -> Self {
        Self::new().with_path(path)
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.set("path", path.display().to_string());
        if let Some(name) = path.file_name() {
            self.set("filename", name.to_string_lossy());
        }
        if let Some(stem) = path.file_stem() {
            self.set("stem", stem.to_string_lossy());
        }
        if let Some(dir) = path.parent() {
            self.set("dir", dir.display().to_string());
        }
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if FRESH_ID_VARS.contains(&key) {
            return Some(generate_id());
        }
        self.vars.get(key).cloned()
    }
}

/// Whether `s` contains at least one placeholder.
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER.is_match(s)
}

/// Render placeholders in a string. Unknown placeholders are left as-is.
pub fn render_string(template: &str, ctx: &RenderContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            ctx.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Render placeholders in every string inside a YAML value.
pub fn render_value(value: &Value, ctx: &RenderContext) -> Value {
    match value {
        Value::String(s) => Value::String(render_string(s, ctx)),
        Value::Mapping(map) => Value::Mapping(
            map.iter().map(|(k, v)| (k.clone(), render_value(v, ctx))).collect(),
        ),
        Value::Sequence(seq) => {
            Value::Sequence(seq.iter().map(|v| render_value(v, ctx)).collect())
        }
        _ => value.clone(),
    }
}
