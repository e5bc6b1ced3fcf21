//! Applying an edit plan and reassembling the document.

use super::errors::DocumentError;
use super::plan::EditPlan;
use crate::frontmatter::{ExtractedDocument, Frontmatter, serialize};

/// Apply `plan` to `fm` and rebuild the document text.
///
/// An empty plan returns the source unchanged, byte for byte. Otherwise the
/// block is re-serialized in the document's line-ending convention; the
/// delimiters and body are copied verbatim.
pub fn apply(
    doc: &ExtractedDocument<'_>,
    mut fm: Frontmatter,
    plan: &EditPlan,
) -> Result<String, DocumentError> {
    if plan.is_empty() {
        return Ok(doc.source().to_string());
    }
    plan.apply_to(&mut fm)?;
    let block = serialize(&fm)?;
    Ok(doc.reassemble(&block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{extract, parse};
    use crate::reconcile::errors::ApplyConflict;
    use crate::reconcile::plan::EditOp;
    use serde_yaml::Value;

    #[test]
    fn empty_plan_is_byte_identical() {
        let src = "---\ntitle:   'A'   # keep me\n---\n\nBody\n";
        let doc = extract(src).unwrap();
        let fm = parse(doc.block()).unwrap();
        assert_eq!(apply(&doc, fm, &EditPlan::default()).unwrap(), src);
    }

    #[test]
    fn body_is_untouched() {
        let src = "---\ntitle: A\n---\nBody\n---\nnot frontmatter: true\n";
        let doc = extract(src).unwrap();
        let fm = parse(doc.block()).unwrap();
        let plan = EditPlan::new(vec![EditOp::Insert { key: "id".into(), value: Value::Null }]);
        let out = apply(&doc, fm, &plan).unwrap();
        assert_eq!(out, "---\ntitle: A\nid: null\n---\nBody\n---\nnot frontmatter: true\n");
    }

    #[test]
    fn keeps_crlf() {
        let src = "---\r\ntitle: A\r\nextra: 1\r\n---\r\nBody\r\n";
        let doc = extract(src).unwrap();
        let fm = parse(doc.block()).unwrap();
        let plan = EditPlan::new(vec![EditOp::Remove { key: "extra".into() }]);
        let out = apply(&doc, fm, &plan).unwrap();
        assert_eq!(out, "---\r\ntitle: A\r\n---\r\nBody\r\n");
    }

    #[test]
    fn removing_every_key_leaves_empty_block() {
        let src = "---\nx: 1\n---\nBody";
        let doc = extract(src).unwrap();
        let fm = parse(doc.block()).unwrap();
        let plan = EditPlan::new(vec![EditOp::Remove { key: "x".into() }]);
        assert_eq!(apply(&doc, fm, &plan).unwrap(), "---\n---\nBody");
    }

    #[test]
    fn conflict_is_reported() {
        let src = "---\ntitle: A\n---\nBody";
        let doc = extract(src).unwrap();
        let fm = parse(doc.block()).unwrap();
        let plan = EditPlan::new(vec![EditOp::Remove { key: "missing".into() }]);
        let err = apply(&doc, fm, &plan).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Conflict(ApplyConflict::KeyMissing(ref k)) if k == "missing"
        ));
    }
}
