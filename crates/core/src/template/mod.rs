//! Template schemas and value rules.
//!
//! A template is a JSON (or YAML) object whose top-level keys, in file
//! order, are the keys every document is expected to carry. Each key's value
//! is its default. The reserved `valueInsertion` object maps key names to
//! rules that override those defaults:
//!
//! ```json
//! {
//!   "title": "",
//!   "id": null,
//!   "tags": [],
//!   "date": null,
//!   "valueInsertion": { "id": "{{uuid}}", "date": "{{date}}" }
//! }
//! ```

pub mod loader;
pub mod render;
pub mod schema;

pub use loader::{SchemaError, VALUE_INSERTION_KEY, load_template, parse_json_template};
pub use render::{RenderContext, render_string, render_value};
pub use schema::{SchemaKey, TemplateSchema, ValueRule};
