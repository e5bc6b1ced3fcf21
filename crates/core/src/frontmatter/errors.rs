//! Error types for frontmatter extraction and parsing.

use thiserror::Error;

/// Errors that can occur while locating or parsing a frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    /// The first line of the document is not the `---` delimiter.
    #[error("document does not start with a frontmatter block")]
    NoFrontMatter,

    /// The opening delimiter has no matching closing delimiter.
    #[error("frontmatter block is not terminated by a closing '---' line")]
    UnterminatedFrontMatter,

    /// The block is not valid YAML or not a mapping.
    #[error("malformed frontmatter: {0}")]
    MalformedMetadata(String),

    /// A top-level key appears more than once.
    #[error("duplicate frontmatter key: '{0}'")]
    DuplicateKey(String),
}

impl From<serde_yaml::Error> for FrontmatterError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::MalformedMetadata(err.to_string())
    }
}
