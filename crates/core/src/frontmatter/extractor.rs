//! Locating the frontmatter block inside a document.

use super::errors::FrontmatterError;
use super::types::{ExtractedDocument, LineEnding};

/// Delimiter line that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

const BOM: char = '\u{feff}';

/// Split a document into preamble, frontmatter block, closing delimiter and body.
///
/// The first line must be exactly `---` (an optional UTF-8 BOM is allowed
/// before it). The block ends at the next line that is `---` once surrounding
/// whitespace is trimmed. `\n`, `\r\n` and bare `\r` are all accepted as line
/// terminators.
///
/// ```
/// use fmcheck_core::frontmatter::extract;
///
/// let doc = extract("---\ntitle: A\n---\nBody").unwrap();
/// assert_eq!(doc.block(), "title: A\n");
/// assert_eq!(doc.body(), "Body");
/// ```
pub fn extract(source: &str) -> Result<ExtractedDocument<'_>, FrontmatterError> {
    let offset = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    let mut lines = LineSpans::new(source, offset);

    let first = lines.next().ok_or(FrontmatterError::NoFrontMatter)?;
    if first.text(source) != DELIMITER {
        return Err(FrontmatterError::NoFrontMatter);
    }
    let line_ending =
        first.ending.ok_or(FrontmatterError::UnterminatedFrontMatter)?;

    let content_start = first.next;
    let mut block = String::new();

    for line in lines {
        let text = line.text(source);
        if text.trim() == DELIMITER {
            return Ok(ExtractedDocument::new(
                source,
                0..content_start,
                content_start..line.start,
                line.start..line.next,
                line_ending,
                block,
            ));
        }
        block.push_str(text);
        block.push('\n');
    }

    Err(FrontmatterError::UnterminatedFrontMatter)
}

/// Byte span of one line.
#[derive(Debug, Clone, Copy)]
struct LineSpan {
    start: usize,
    /// End of the line text, excluding the terminator.
    end: usize,
    /// Start of the following line.
    next: usize,
    ending: Option<LineEnding>,
}

impl LineSpan {
    fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Iterator over line spans that recognises all three terminator styles.
struct LineSpans<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LineSpans<'a> {
    fn new(source: &'a str, offset: usize) -> Self {
        Self { bytes: source.as_bytes(), pos: offset }
    }
}

impl Iterator for LineSpans<'_> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        let len = self.bytes.len();
        if self.pos >= len {
            return None;
        }
        let start = self.pos;
        let mut i = start;
        while i < len {
            match self.bytes[i] {
                b'\n' => {
                    self.pos = i + 1;
                    return Some(LineSpan {
                        start,
                        end: i,
                        next: self.pos,
                        ending: Some(LineEnding::Lf),
                    });
                }
                b'\r' => {
                    let (next, ending) = if self.bytes.get(i + 1) == Some(&b'\n') {
                        (i + 2, LineEnding::CrLf)
                    } else {
                        (i + 1, LineEnding::Cr)
                    };
                    self.pos = next;
                    return Some(LineSpan { start, end: i, next, ending: Some(ending) });
                }
                _ => i += 1,
            }
        }
        self.pos = len;
        Some(LineSpan { start, end: len, next: len, ending: None })
    }
}
