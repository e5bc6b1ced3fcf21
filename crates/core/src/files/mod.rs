//! File-level processing: discovery, reading, and safe rewriting.

pub mod walker;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::reconcile::{Diagnostic, DocumentError, EditPlan, FileError, Reconciler};
use crate::template::RenderContext;

pub use walker::{DiscoveryError, DocumentWalker};
pub use writer::write_atomic;

/// What to do with each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report deviations only.
    Analyze,
    /// Compute fixes; write them unless `dry_run`.
    Fix { dry_run: bool },
}

/// Outcome of processing one file successfully.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostic: Diagnostic,
    /// Edits computed for the file; empty in analyze mode.
    pub plan: EditPlan,
    /// Whether the file on disk was rewritten.
    pub written: bool,
}

/// Read, check, and (in fix mode) rewrite one file.
///
/// The file is only written after the whole rewrite succeeded in memory,
/// and then atomically, so any error leaves it untouched.
pub fn process_file(
    reconciler: &Reconciler,
    path: &Path,
    mode: Mode,
) -> Result<FileReport, DocumentError> {
    let text = fs::read_to_string(path)
        .map_err(|source| FileError::Read { path: path.to_path_buf(), source })?;

    match mode {
        Mode::Analyze => {
            let diagnostic = reconciler.analyze(&text)?;
            Ok(FileReport {
                path: path.to_path_buf(),
                diagnostic,
                plan: EditPlan::default(),
                written: false,
            })
        }
        Mode::Fix { dry_run } => {
            let ctx = RenderContext::for_path(path);
            let outcome = reconciler.fix(&text, &ctx)?;

            let mut written = false;
            if let Some(content) = &outcome.content {
                if dry_run {
                    debug!(path = %path.display(), ops = outcome.plan.len(), "dry run, not writing");
                } else {
                    write_atomic(path, content).map_err(|source| FileError::Write {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    info!(path = %path.display(), ops = outcome.plan.len(), "rewrote frontmatter");
                    written = true;
                }
            }

            Ok(FileReport {
                path: path.to_path_buf(),
                diagnostic: outcome.diagnostic,
                plan: outcome.plan,
                written,
            })
        }
    }
}
