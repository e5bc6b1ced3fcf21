//! Template schema: the ordered set of expected frontmatter keys.

use std::collections::HashMap;

use serde_yaml::Value;

use super::render::{RenderContext, has_placeholders, render_value};

/// How to produce a value for a key that is being inserted or generated.
///
/// Strings may contain `{{placeholder}}` variables, including inside
/// sequences and mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRule {
    value: Value,
}

impl ValueRule {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// A rule from a template or config value. `null` means "no rule".
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            v => Some(Self::new(v)),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the rule produces values from placeholders rather than a
    /// fixed literal.
    pub fn is_generator(&self) -> bool {
        contains_placeholder(&self.value)
    }

    pub fn render(&self, ctx: &RenderContext) -> Value {
        render_value(&self.value, ctx)
    }
}

fn contains_placeholder(value: &Value) -> bool {
    match value {
        Value::String(s) => has_placeholders(s),
        Value::Sequence(seq) => seq.iter().any(contains_placeholder),
        Value::Mapping(map) => map.values().any(contains_placeholder),
        _ => false,
    }
}

/// One expected key and its optional value rule.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaKey {
    pub name: String,
    pub rule: Option<ValueRule>,
}

/// The reference key set documents are checked against.
///
/// Key order is the order documents are expected to follow. Immutable once
/// loaded for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSchema {
    keys: Vec<SchemaKey>,
}

impl TemplateSchema {
    pub fn new(keys: Vec<SchemaKey>) -> Self {
        Self { keys }
    }

    /// Schema with the given key names and no rules.
    pub fn from_keys<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|n| SchemaKey { name: n.into(), rule: None }).collect())
    }

    /// Set or replace the rule for `name`. No-op if the key is not in the schema.
    pub fn with_rule(mut self, name: &str, rule: ValueRule) -> Self {
        self.set_rule(name, rule);
        self
    }

    pub fn set_rule(&mut self, name: &str, rule: ValueRule) -> bool {
        match self.keys.iter_mut().find(|k| k.name == name) {
            Some(key) => {
                key.rule = Some(rule);
                true
            }
            None => false,
        }
    }

    /// Merge rules over the schema's own. Returns the names that are not
    /// schema keys, sorted, which were not applied.
    pub fn merge_rules(&mut self, rules: &HashMap<String, ValueRule>) -> Vec<String> {
        let mut ignored: Vec<String> = rules
            .iter()
            .filter(|(name, rule)| !self.set_rule(name, (*rule).clone()))
            .map(|(name, _)| name.clone())
            .collect();
        ignored.sort();
        ignored
    }

    pub fn keys(&self) -> &[SchemaKey] {
        &self.keys
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.name == name)
    }

    pub fn rule(&self, name: &str) -> Option<&ValueRule> {
        self.keys.iter().find(|k| k.name == name).and_then(|k| k.rule.as_ref())
    }
}
