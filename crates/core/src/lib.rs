//! Front matter conformance checking and repair.
//!
//! The engine extracts the `---` delimited YAML block at the top of a
//! document, diffs it against a template schema, and plans and applies
//! corrective edits under a set of toggleable policies.

pub mod config;
pub mod files;
pub mod frontmatter;
pub mod ids;
pub mod reconcile;
pub mod template;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
