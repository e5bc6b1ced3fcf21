//! Frontmatter serialization back to block text.

use serde_yaml::Mapping;

use super::errors::FrontmatterError;
use super::types::Frontmatter;

/// Serialize frontmatter fields to YAML in block order (without delimiters).
///
/// The result is `\n`-terminated; an empty frontmatter yields an empty string.
pub fn serialize(fm: &Frontmatter) -> Result<String, FrontmatterError> {
    if fm.is_empty() {
        return Ok(String::new());
    }
    let mapping: Mapping = fm.raw_entries().map(|(k, v)| (k.clone(), v.clone())).collect();
    let yaml = serde_yaml::to_string(&mapping)?;
    Ok(yaml)
}
