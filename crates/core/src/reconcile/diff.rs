//! Comparing a document's frontmatter against the template schema.

use serde::Serialize;

use crate::frontmatter::Frontmatter;
use crate::template::TemplateSchema;

/// How a document's keys deviate from the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Schema keys absent from the document, in schema order.
    pub missing_keys: Vec<String>,
    /// Document keys absent from the schema, in document order.
    pub extra_keys: Vec<String>,
    /// Schema keys present in the document are not in schema order.
    pub order_mismatch: bool,
}

impl Diagnostic {
    pub fn is_conformant(&self) -> bool {
        self.missing_keys.is_empty() && self.extra_keys.is_empty() && !self.order_mismatch
    }
}

/// Diff `fm` against `schema`. Never fails.
pub fn diff(fm: &Frontmatter, schema: &TemplateSchema) -> Diagnostic {
    let missing_keys =
        schema.names().filter(|k| !fm.contains_key(k)).map(str::to_string).collect();

    let extra_keys =
        fm.keys().filter(|k| !schema.contains(k)).map(str::to_string).collect();

    // Schema positions of the document's schema keys, in document order.
    let positions: Vec<usize> = fm.keys().filter_map(|k| schema.position(k)).collect();
    let order_mismatch = positions.windows(2).any(|w| w[0] > w[1]);

    Diagnostic { missing_keys, extra_keys, order_mismatch }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn fm(keys: &[&str]) -> Frontmatter {
        keys.iter().map(|k| (k.to_string(), Value::Null)).collect()
    }

    #[test]
    fn conformant_document() {
        let schema = TemplateSchema::from_keys(["title", "id"]);
        let d = diff(&fm(&["title", "id"]), &schema);
        assert!(d.is_conformant());
    }

    #[test]
    fn missing_keys_in_schema_order() {
        let schema = TemplateSchema::from_keys(["title", "id", "date", "tags"]);
        let d = diff(&fm(&["date"]), &schema);
        assert_eq!(d.missing_keys, vec!["title", "id", "tags"]);
        assert!(d.extra_keys.is_empty());
        assert!(!d.order_mismatch);
    }

    #[test]
    fn extra_keys_in_document_order() {
        let schema = TemplateSchema::from_keys(["title"]);
        let d = diff(&fm(&["zeta", "title", "alpha"]), &schema);
        assert_eq!(d.extra_keys, vec!["zeta", "alpha"]);
        assert!(!d.order_mismatch);
    }

    #[test]
    fn order_mismatch_ignores_extras_and_missing() {
        let schema = TemplateSchema::from_keys(["title", "id", "date"]);
        assert!(!diff(&fm(&["extra", "title", "other", "date"]), &schema).order_mismatch);
        assert!(diff(&fm(&["date", "extra", "title"]), &schema).order_mismatch);
        assert!(diff(&fm(&["id", "extra", "title"]), &schema).order_mismatch);
    }

    #[test]
    fn empty_frontmatter_misses_everything() {
        let schema = TemplateSchema::from_keys(["a", "b"]);
        let d = diff(&Frontmatter::new(), &schema);
        assert_eq!(d.missing_keys, vec!["a", "b"]);
        assert!(!d.order_mismatch);
    }
}
