//! Turning a diagnostic into an ordered, idempotent edit plan.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::diff::Diagnostic;
use super::errors::ApplyConflict;
use crate::frontmatter::{Frontmatter, is_empty_value};
use crate::ids::generate_id;
use crate::template::{RenderContext, TemplateSchema, ValueRule};

/// Independently toggleable fix policies.
///
/// `full_conform` turns on every other policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySet {
    pub full_conform: bool,
    pub all_props: bool,
    pub fix_order: bool,
    pub remove_extra_props: bool,
    pub gen_id: bool,
}

impl PolicySet {
    pub fn all() -> Self {
        Self { full_conform: true, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        !(self.full_conform
            || self.all_props
            || self.fix_order
            || self.remove_extra_props
            || self.gen_id)
    }

    pub fn inserts_missing(&self) -> bool {
        self.full_conform || self.all_props
    }

    pub fn reorders(&self) -> bool {
        self.full_conform || self.fix_order
    }

    pub fn removes_extra(&self) -> bool {
        self.full_conform || self.remove_extra_props
    }

    pub fn generates_id(&self) -> bool {
        self.full_conform || self.gen_id
    }
}

/// One atomic frontmatter edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    /// Append a key that is not present.
    Insert { key: String, value: Value },
    /// Delete a present key.
    Remove { key: String },
    /// Move a present key to `index`.
    MoveTo { key: String, index: usize },
    /// Insert if absent, set if empty, otherwise leave alone.
    SetIfEmpty { key: String, value: Value },
}

impl EditOp {
    pub fn apply(&self, fm: &mut Frontmatter) -> Result<(), ApplyConflict> {
        match self {
            Self::Insert { key, value } => {
                if !fm.push(key.clone(), value.clone()) {
                    return Err(ApplyConflict::KeyExists(key.clone()));
                }
            }
            Self::Remove { key } => {
                fm.remove(key).ok_or_else(|| ApplyConflict::KeyMissing(key.clone()))?;
            }
            Self::MoveTo { key, index } => {
                if !fm.contains_key(key) {
                    return Err(ApplyConflict::KeyMissing(key.clone()));
                }
                if !fm.move_to(key, *index) {
                    return Err(ApplyConflict::IndexOutOfRange {
                        key: key.clone(),
                        index: *index,
                        len: fm.len(),
                    });
                }
            }
            Self::SetIfEmpty { key, value } => match fm.get(key) {
                None => {
                    fm.push(key.clone(), value.clone());
                }
                Some(current) if is_empty_value(current) => {
                    fm.replace(key, value.clone());
                }
                Some(_) => {}
            },
        }
        Ok(())
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { key, value } => {
                write!(f, "added missing field '{}' = {}", key, inline(value))
            }
            Self::Remove { key } => write!(f, "removed field '{key}'"),
            Self::MoveTo { key, index } => {
                write!(f, "moved field '{}' to position {}", key, index + 1)
            }
            Self::SetIfEmpty { key, value } => {
                write!(f, "generated '{}' = {}", key, inline(value))
            }
        }
    }
}

/// Single-line rendering of a value for reports.
fn inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        other => serde_json::to_string(other).unwrap_or_else(|_| "<value>".to_string()),
    }
}

/// Ordered list of edits for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EditPlan {
    ops: Vec<EditOp>,
}

impl EditPlan {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Apply every op in order. Stops at the first conflict.
    pub fn apply_to(&self, fm: &mut Frontmatter) -> Result<(), ApplyConflict> {
        self.ops.iter().try_for_each(|op| op.apply(fm))
    }
}

impl<'a> IntoIterator for &'a EditPlan {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Computes edit plans for a fixed schema and policy set.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    pub schema: &'a TemplateSchema,
    pub policies: PolicySet,
    /// Key filled in by the `gen_id` policy.
    pub id_key: &'a str,
    /// Rule used to generate the id, if it is a generator.
    pub id_rule: Option<&'a ValueRule>,
}

impl Planner<'_> {
    /// Build the plan for `fm` given its diagnostic.
    ///
    /// Policies run in a fixed order: insert missing keys, generate the id,
    /// remove extra keys, reorder. Each op is simulated on a working copy so
    /// later steps see earlier effects, and only ops that change the block
    /// are emitted. Planning again on the result yields an empty plan.
    pub fn plan(&self, fm: &Frontmatter, diag: &Diagnostic, ctx: &RenderContext) -> EditPlan {
        let policies = self.policies;
        let mut work = fm.clone();
        let mut ops = Vec::new();

        if policies.inserts_missing() {
            for key in &diag.missing_keys {
                if work.contains_key(key) {
                    continue;
                }
                let value =
                    self.schema.rule(key).map_or(Value::Null, |rule| rule.render(ctx));
                record(&mut ops, &mut work, EditOp::Insert { key: key.clone(), value });
            }
        }

        if policies.generates_id() && work.get(self.id_key).is_none_or(is_empty_value) {
            let value = self.generate_id(ctx);
            record(
                &mut ops,
                &mut work,
                EditOp::SetIfEmpty { key: self.id_key.to_string(), value },
            );
        }

        if policies.removes_extra() {
            for key in &diag.extra_keys {
                if policies.generates_id() && key == self.id_key {
                    continue;
                }
                if work.contains_key(key) {
                    record(&mut ops, &mut work, EditOp::Remove { key: key.clone() });
                }
            }
        }

        if policies.reorders() {
            for (index, key) in target_order(&work, self.schema).into_iter().enumerate() {
                if work.position(&key) != Some(index) {
                    record(&mut ops, &mut work, EditOp::MoveTo { key, index });
                }
            }
        }

        EditPlan::new(ops)
    }

    fn generate_id(&self, ctx: &RenderContext) -> Value {
        self.id_rule
            .filter(|rule| rule.is_generator())
            .map(|rule| rule.render(ctx))
            .filter(|value| !is_empty_value(value))
            .unwrap_or_else(|| Value::String(generate_id()))
    }
}

fn record(ops: &mut Vec<EditOp>, work: &mut Frontmatter, op: EditOp) {
    if op.apply(work).is_ok() {
        ops.push(op);
    }
}

/// Schema keys in schema order, then the remaining keys in their current order.
fn target_order(fm: &Frontmatter, schema: &TemplateSchema) -> Vec<String> {
    schema
        .names()
        .filter(|k| fm.contains_key(k))
        .chain(fm.keys().filter(|k| !schema.contains(k)))
        .map(str::to_string)
        .collect()
}
