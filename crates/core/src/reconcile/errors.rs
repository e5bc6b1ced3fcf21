//! Error types for applying edit plans and processing documents.

use std::path::PathBuf;

use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// An edit operation does not match the state of the block it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyConflict {
    #[error("cannot insert '{0}': key already present")]
    KeyExists(String),

    #[error("cannot edit '{0}': key not present")]
    KeyMissing(String),

    #[error("cannot move '{key}' to index {index}: block has {len} keys")]
    IndexOutOfRange { key: String, index: usize, len: usize },
}

/// File-level I/O failure while processing one document.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure confined to a single document.
///
/// These are reported against the document and never abort a batch.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error(transparent)]
    Conflict(#[from] ApplyConflict),

    #[error(transparent)]
    File(#[from] FileError),
}

impl DocumentError {
    /// Short stable name of the error kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frontmatter(FrontmatterError::NoFrontMatter) => "NoFrontMatter",
            Self::Frontmatter(FrontmatterError::UnterminatedFrontMatter) => {
                "UnterminatedFrontMatter"
            }
            Self::Frontmatter(FrontmatterError::MalformedMetadata(_)) => "MalformedMetadata",
            Self::Frontmatter(FrontmatterError::DuplicateKey(_)) => "DuplicateKey",
            Self::Conflict(_) => "ApplyConflict",
            Self::File(_) => "FileIOError",
        }
    }
}
