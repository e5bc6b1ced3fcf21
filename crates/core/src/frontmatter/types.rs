//! Frontmatter types and data structures.

use std::ops::Range;

use serde_yaml::Value;

/// Parsed YAML frontmatter from a markdown document.
///
/// Keys are unique and case-sensitive. Insertion order is kept because it is
/// what order-conformance checks compare against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Vec<Field>,
}

/// One entry of the block.
///
/// `name` is the key's string form, used for identity and diffing. `key` is
/// the key as written, so that number and bool keys serialize back unchanged.
#[derive(Debug, Clone, PartialEq)]
struct Field {
    name: String,
    key: Value,
    value: Value,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == key).map(|f| &f.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Index of `key` in the block, if present.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == key)
    }

    /// Keys in block order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|f| (f.name.as_str(), &f.value))
    }

    /// Entries with their keys as originally written.
    pub(crate) fn raw_entries(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.fields.iter().map(|f| (&f.key, &f.value))
    }

    /// Append a new field. Returns `false` (and leaves the block untouched)
    /// if the key already exists.
    pub fn push(&mut self, key: impl Into<String>, value: Value) -> bool {
        let name = key.into();
        let key = Value::String(name.clone());
        self.push_keyed(name, key, value)
    }

    /// Append a field whose written key differs from its string name.
    pub(crate) fn push_keyed(&mut self, name: String, key: Value, value: Value) -> bool {
        if self.contains_key(&name) {
            return false;
        }
        self.fields.push(Field { name, key, value });
        true
    }

    /// Replace the value of an existing field. Returns the previous value.
    pub fn replace(&mut self, key: &str, value: Value) -> Option<Value> {
        let slot = self.fields.iter_mut().find(|f| f.name == key)?;
        Some(std::mem::replace(&mut slot.value, value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.position(key)?;
        Some(self.fields.remove(idx).value)
    }

    /// Move `key` so that it ends up at `index`.
    ///
    /// Returns `false` if the key is absent or `index` is out of bounds.
    pub fn move_to(&mut self, key: &str, index: usize) -> bool {
        let Some(from) = self.position(key) else {
            return false;
        };
        if index >= self.fields.len() {
            return false;
        }
        let entry = self.fields.remove(from);
        self.fields.insert(index, entry);
        true
    }
}

impl FromIterator<(String, Value)> for Frontmatter {
    /// Later duplicates are dropped; use the parser for strict handling.
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut fm = Frontmatter::new();
        for (k, v) in iter {
            fm.push(k, v);
        }
        fm
    }
}

/// Whether a value counts as "empty" for fill-if-empty semantics.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(tagged) => is_empty_value(&tagged.value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Line terminator convention detected on the opening delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Convert `\n`-terminated text to this convention.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

/// A document split around its frontmatter block.
///
/// Borrows the source text; the byte ranges partition it so that
/// `preamble() + raw_block() + closing() + body()` equals the source.
#[derive(Debug, Clone)]
pub struct ExtractedDocument<'a> {
    source: &'a str,
    /// Opening delimiter line (with optional BOM and its terminator).
    pub(crate) open: Range<usize>,
    /// Lines strictly between the delimiters.
    pub(crate) content: Range<usize>,
    /// Closing delimiter line including its terminator, if any.
    pub(crate) close: Range<usize>,
    pub(crate) line_ending: LineEnding,
    /// Block content normalised to `\n` terminators.
    pub(crate) block: String,
}

impl<'a> ExtractedDocument<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn preamble(&self) -> &'a str {
        &self.source[self.open.clone()]
    }

    /// Block content exactly as it appears in the source.
    pub fn raw_block(&self) -> &'a str {
        &self.source[self.content.clone()]
    }

    /// Block content with line endings normalised to `\n`.
    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn closing(&self) -> &'a str {
        &self.source[self.close.clone()]
    }

    pub fn body(&self) -> &'a str {
        &self.source[self.close.end..]
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Reassemble the document with a replacement block.
    ///
    /// `block` must be `\n`-terminated; it is converted to the document's
    /// line ending. The preamble, closing delimiter and body are copied
    /// verbatim.
    pub fn reassemble(&self, block: &str) -> String {
        let block = self.line_ending.apply(block);
        let mut out = String::with_capacity(self.source.len() + block.len());
        out.push_str(self.preamble());
        out.push_str(&block);
        out.push_str(self.closing());
        out.push_str(self.body());
        out
    }

    pub(crate) fn new(
        source: &'a str,
        open: Range<usize>,
        content: Range<usize>,
        close: Range<usize>,
        line_ending: LineEnding,
        block: String,
    ) -> Self {
        Self { source, open, content, close, line_ending, block }
    }
}
