//! Atomic replacement of document files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replace the contents of `path` with `content` atomically.
///
/// The content is written to a hidden sibling file, synced, and renamed over
/// the original, so a failure at any point leaves the original intact. The
/// original file's permissions are carried over. A symlink is resolved first
/// so the file it points to is replaced and the link itself stays.
pub fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let temp_path = temp_path_for(&target);

    let result = write_temp(&temp_path, &target, content)
        .and_then(|()| fs::rename(&temp_path, &target));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, original: &Path, content: &str) -> std::io::Result<()> {
    let mut file =
        OpenOptions::new().write(true).create(true).truncate(true).open(temp_path)?;

    if let Ok(meta) = fs::metadata(original) {
        file.set_permissions(meta.permissions())?;
    }

    file.write_all(content.as_bytes())?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("document");
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.fmcheck.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failure_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("doc.md");

        assert!(write_atomic(&path, "x").is_err());
        assert!(!temp_path_for(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_kept_and_target_replaced() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.md");
        let link = dir.path().join("link.md");
        fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomic(&link, "new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new");
        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path_for(Path::new("docs/a.md")),
            PathBuf::from("docs/.a.md.fmcheck.tmp")
        );
    }
}
