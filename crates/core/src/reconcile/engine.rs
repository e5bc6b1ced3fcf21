//! Per-document entry points tying extraction, diffing, planning and rewriting together.

use tracing::debug;

use super::diff::{Diagnostic, diff};
use super::errors::DocumentError;
use super::plan::{EditPlan, Planner, PolicySet};
use super::rewrite::apply;
use crate::config::ResolvedConfig;
use crate::frontmatter::{extract, parse};
use crate::template::{RenderContext, TemplateSchema, ValueRule};

/// Default key filled in by the `gen_id` policy.
pub const DEFAULT_ID_KEY: &str = "id";

/// Result of fixing one document.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// Diagnostic of the document as read.
    pub diagnostic: Diagnostic,
    pub plan: EditPlan,
    /// Rewritten text, present only when the plan changed something.
    pub content: Option<String>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.content.is_some()
    }
}

/// Immutable run configuration: schema, policies and identifier settings.
///
/// Holds no mutable state, so one instance can be shared across threads
/// processing different documents.
#[derive(Debug, Clone)]
pub struct Reconciler {
    schema: TemplateSchema,
    policies: PolicySet,
    id_key: String,
    id_rule: Option<ValueRule>,
}

impl Reconciler {
    pub fn new(schema: TemplateSchema, policies: PolicySet) -> Self {
        let id_rule = schema.rule(DEFAULT_ID_KEY).cloned();
        Self { schema, policies, id_key: DEFAULT_ID_KEY.to_string(), id_rule }
    }

    /// Build from a template and loaded config.
    ///
    /// Config value rules override the template's. A rule for the identifier
    /// key is kept even when that key is not part of the schema.
    pub fn from_config(
        mut schema: TemplateSchema,
        policies: PolicySet,
        config: &ResolvedConfig,
    ) -> Self {
        for name in schema.merge_rules(&config.value_insertion) {
            if name != config.id_key {
                tracing::warn!(key = %name, "config value rule for key not in template, ignoring");
            }
        }
        let id_rule = config
            .value_insertion
            .get(&config.id_key)
            .or_else(|| schema.rule(&config.id_key))
            .cloned();
        Self { schema, policies, id_key: config.id_key.clone(), id_rule }
    }

    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = id_key.into();
        self.id_rule = self.schema.rule(&self.id_key).cloned();
        self
    }

    pub fn schema(&self) -> &TemplateSchema {
        &self.schema
    }

    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    fn planner(&self) -> Planner<'_> {
        Planner {
            schema: &self.schema,
            policies: self.policies,
            id_key: &self.id_key,
            id_rule: self.id_rule.as_ref(),
        }
    }

    /// Diff a document against the schema without changing it.
    pub fn analyze(&self, text: &str) -> Result<Diagnostic, DocumentError> {
        let doc = extract(text)?;
        let fm = parse(doc.block())?;
        let diagnostic = diff(&fm, &self.schema);
        debug!(
            missing = diagnostic.missing_keys.len(),
            extra = diagnostic.extra_keys.len(),
            order_mismatch = diagnostic.order_mismatch,
            "analyzed document"
        );
        Ok(diagnostic)
    }

    /// Compute and apply the edit plan for a document.
    ///
    /// Nothing is returned for writing unless every stage succeeded.
    pub fn fix(&self, text: &str, ctx: &RenderContext) -> Result<FixOutcome, DocumentError> {
        let doc = extract(text)?;
        let fm = parse(doc.block())?;
        let diagnostic = diff(&fm, &self.schema);
        let plan = self.planner().plan(&fm, &diagnostic, ctx);
        debug!(ops = plan.len(), "planned document edits");

        let content = if plan.is_empty() { None } else { Some(apply(&doc, fm, &plan)?) };
        Ok(FixOutcome { diagnostic, plan, content })
    }
}
