//! Discovering the documents a run should process.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to walk directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("no files to process")]
    NoFilesFound,
}

/// Walker for finding documents by extension under a directory.
#[derive(Debug, Clone)]
pub struct DocumentWalker {
    /// Lowercase extensions without the dot.
    extensions: Vec<String>,
    /// Folders to skip, relative to the walked root.
    excluded_folders: Vec<PathBuf>,
}

impl Default for DocumentWalker {
    fn default() -> Self {
        Self::new(vec!["md".to_string()])
    }
}

impl DocumentWalker {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions, excluded_folders: Vec::new() }
    }

    pub fn with_exclusions(mut self, excluded_folders: Vec<PathBuf>) -> Self {
        self.excluded_folders = excluded_folders;
        self
    }

    /// Recursively collect matching files under `root`, sorted by path.
    ///
    /// Hidden entries and common build/dependency directories are skipped.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        if !root.is_dir() {
            return Err(DiscoveryError::MissingDir(root.display().to_string()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(root, e))
        {
            let entry = entry
                .map_err(|e| DiscoveryError::WalkError(root.display().to_string(), e))?;
            let path = entry.path();
            if entry.file_type().is_file() && self.matches_extension(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Combine directory results with an explicit file list.
    ///
    /// Explicit files are taken as given (no extension filter). Paths naming
    /// the same file are dropped after the first, compared by canonical path
    /// (or as written when that cannot be resolved); the first spelling is
    /// kept. Fails with `NoFilesFound` if the result is empty.
    pub fn discover(
        &self,
        dir: Option<&Path>,
        explicit: &[PathBuf],
    ) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut files = match dir {
            Some(d) => self.walk(d)?,
            None => Vec::new(),
        };
        files.extend(explicit.iter().cloned());

        let mut seen = HashSet::new();
        files.retain(|p| seen.insert(fs::canonicalize(p).unwrap_or_else(|_| p.clone())));

        if files.is_empty() {
            return Err(DiscoveryError::NoFilesFound);
        }
        tracing::debug!(count = files.len(), "discovered files");
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
    }

    fn is_excluded(&self, root: &Path, entry: &walkdir::DirEntry) -> bool {
        // Never filter the root directory (depth 0)
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();

        if name.starts_with('.') {
            return true;
        }

        if entry.file_type().is_dir()
            && matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv")
        {
            return true;
        }

        if !self.excluded_folders.is_empty()
            && let Ok(relative) = entry.path().strip_prefix(root)
        {
            return self.excluded_folders.iter().any(|excluded| relative.starts_with(excluded));
        }

        false
    }
}
