//! Frontmatter parsing from block text.

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_yaml::Value;

use super::errors::FrontmatterError;
use super::types::Frontmatter;

/// Parse the text between the delimiters into an ordered [`Frontmatter`].
///
/// A blank or comment-only block yields an empty frontmatter. The top-level
/// value must be a mapping with scalar keys, and no key may repeat.
pub fn parse(block: &str) -> Result<Frontmatter, FrontmatterError> {
    if is_blank(block) {
        return Ok(Frontmatter::new());
    }

    let RawEntries(entries) = serde_yaml::from_str(block)?;

    let mut seen = HashSet::with_capacity(entries.len());
    let mut fm = Frontmatter::new();
    for (key, value) in entries {
        let name = key_to_string(&key)?;
        if !seen.insert(name.clone()) {
            return Err(FrontmatterError::DuplicateKey(name));
        }
        fm.push_keyed(name, key, value);
    }
    Ok(fm)
}

fn is_blank(block: &str) -> bool {
    block.lines().map(str::trim).all(|l| l.is_empty() || l.starts_with('#'))
}

fn key_to_string(key: &Value) -> Result<String, FrontmatterError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(FrontmatterError::MalformedMetadata(format!(
            "unsupported key {}",
            describe(other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Top-level mapping entries in document order, duplicates included.
///
/// `serde_yaml::Mapping` rejects duplicates with a generic message, so the
/// entries are collected raw and checked afterwards.
struct RawEntries(Vec<(Value, Value)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = RawEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of frontmatter fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawEntries, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            entries.push((key, value));
        }
        Ok(RawEntries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_frontmatter() {
        let fm = parse("title: Hello\ncount: 42\n").unwrap();
        assert_eq!(fm.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(fm.get("count").and_then(|v| v.as_i64()), Some(42));
    }

    #[test]
    fn parse_preserves_order() {
        let fm = parse("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn parse_nested_values_are_opaque() {
        let fm = parse("tags:\n  - rust\n  - cli\nmeta:\n  a: 1\n").unwrap();
        assert_eq!(fm.get("tags").and_then(|v| v.as_sequence()).map(Vec::len), Some(2));
        assert!(fm.get("meta").is_some_and(Value::is_mapping));
    }

    #[test]
    fn parse_blank_and_comment_only_blocks() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n  \n").unwrap().is_empty());
        assert!(parse("# just a comment\n").unwrap().is_empty());
    }

    #[test]
    fn scalar_keys_become_strings() {
        let fm = parse("2024: year\ntrue: yes\n").unwrap();
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["2024", "true"]);
        assert_eq!(fm.get("2024").and_then(Value::as_str), Some("year"));
    }

    #[test]
    fn written_key_types_are_kept() {
        let fm = parse("2024: year\ntrue: yes\nname: x\n").unwrap();
        let keys: Vec<&Value> = fm.raw_entries().map(|(k, _)| k).collect();
        assert_eq!(keys[0], &Value::Number(2024.into()));
        assert_eq!(keys[1], &Value::Bool(true));
        assert_eq!(keys[2], &Value::String("name".into()));
    }

    #[test]
    fn number_and_string_spelling_of_a_key_are_duplicates() {
        let err = parse("2024: a\n'2024': b\n").unwrap_err();
        assert_eq!(err, FrontmatterError::DuplicateKey("2024".to_string()));
    }

    #[test]
    fn duplicate_key_rejected() {
        let err = parse("title: A\nid: 1\ntitle: B\n").unwrap_err();
        assert_eq!(err, FrontmatterError::DuplicateKey("title".to_string()));
    }

    #[test]
    fn keys_differing_in_case_are_distinct() {
        let fm = parse("Title: A\ntitle: B\n").unwrap();
        assert_eq!(fm.len(), 2);
    }

    #[test]
    fn invalid_yaml_is_malformed() {
        let err = parse("title: [unclosed\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::MalformedMetadata(_)));
    }

    #[test]
    fn non_mapping_top_level_is_malformed() {
        assert!(matches!(
            parse("just a string\n").unwrap_err(),
            FrontmatterError::MalformedMetadata(_)
        ));
        assert!(matches!(
            parse("- a\n- b\n").unwrap_err(),
            FrontmatterError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn sequence_key_is_malformed() {
        let err = parse("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::MalformedMetadata(_)));
    }
}
