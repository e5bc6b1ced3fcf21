//! Frontmatter extraction, parsing, and serialization.
//!
//! This module provides functionality to:
//! - Locate the `---` delimited block at the top of a document
//! - Parse it into an ordered key/value [`Frontmatter`]
//! - Serialize the block back to YAML text

pub mod errors;
pub mod extractor;
pub mod parser;
pub mod serializer;
pub mod types;

pub use errors::FrontmatterError;
pub use extractor::{DELIMITER, extract};
pub use parser::parse;
pub use serializer::serialize;
pub use types::{ExtractedDocument, Frontmatter, LineEnding, is_empty_value};
