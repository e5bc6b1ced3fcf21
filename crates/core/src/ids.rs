//! Identifier generation for frontmatter `id` fields.
//!
//! Generated ids are random UUID v4 values in their lowercase hyphenated
//! form. With 122 random bits per id, collisions across the files of a run
//! are not a practical concern.

use uuid::Uuid;

/// Generate a fresh identifier.
///
/// # Examples
/// ```
/// use fmcheck_core::ids::generate_id;
///
/// let id = generate_id();
/// assert_eq!(id.len(), 36);
/// assert_ne!(id, generate_id());
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_lowercase_uuid_v4() {
        let id = generate_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
