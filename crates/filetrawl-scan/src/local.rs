//! Local filesystem backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use filetrawl_core::{DirectoryEntry, EntryKind, ScanError};

use crate::fs::{FileSystem, normalize, resolve_against};

/// Backend over the real filesystem using `tokio::fs`.
///
/// Entries are classified from the listing itself, so symlinks are
/// reported as [`EntryKind::Other`] and never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a local filesystem backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFs {
    async fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, ScanError> {
        let mut read_dir = fs::read_dir(dir).await.map_err(|e| ScanError::io(dir, e))?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await.map_err(|e| ScanError::io(dir, e))? {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ScanError::metadata(entry.path(), e))?;

            entries.push(DirectoryEntry::from_os(
                entry.file_name(),
                EntryKind::from_file_type(file_type),
            ));
        }

        Ok(entries)
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf, ScanError> {
        if path.is_absolute() {
            return Ok(normalize(path));
        }
        let cwd = std::env::current_dir().map_err(|e| ScanError::io(path, e))?;
        Ok(resolve_against(&cwd, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_classifies_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std_fs::create_dir(root.join("sub")).unwrap();
        std_fs::write(root.join("file.txt"), "x").unwrap();

        let mut entries = LocalFs::new().list(root).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![DirectoryEntry::file("file.txt"), DirectoryEntry::directory("sub")]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_are_other() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std_fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let entries = LocalFs::new().list(root).await.unwrap();
        let link = entries.iter().find(|e| e.name.as_str() == "link").unwrap();
        assert_eq!(link.kind, EntryKind::Other);
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = LocalFs::new().list(&temp.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_absolutize_relative() {
        let cwd = std::env::current_dir().unwrap();
        let abs = LocalFs::new().absolutize(Path::new("example")).unwrap();
        assert!(abs.is_absolute());
        assert_eq!(abs, cwd.join("example"));
    }
}
