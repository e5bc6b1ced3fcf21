//! Front matter reconciliation: diff against a template schema, plan
//! corrective edits under a policy set, and rewrite the document.
//!
//! ```
//! use fmcheck_core::reconcile::{PolicySet, Reconciler};
//! use fmcheck_core::template::{RenderContext, TemplateSchema};
//!
//! let schema = TemplateSchema::from_keys(["title", "id"]);
//! let policies = PolicySet { fix_order: true, remove_extra_props: true, ..Default::default() };
//! let reconciler = Reconciler::new(schema, policies);
//!
//! let out = reconciler
//!     .fix("---\nid: 7\nextra: x\ntitle: A\n---\nBody", &RenderContext::new())
//!     .unwrap();
//! assert_eq!(out.content.as_deref(), Some("---\ntitle: A\nid: 7\n---\nBody"));
//! ```

pub mod diff;
pub mod engine;
pub mod errors;
pub mod plan;
pub mod rewrite;

pub use diff::{Diagnostic, diff};
pub use engine::{DEFAULT_ID_KEY, FixOutcome, Reconciler};
pub use errors::{ApplyConflict, DocumentError, FileError};
pub use plan::{EditOp, EditPlan, Planner, PolicySet};
pub use rewrite::apply;
