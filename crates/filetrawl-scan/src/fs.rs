//! Filesystem abstraction consumed by the collector.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use filetrawl_core::{DirectoryEntry, ScanError};

/// The two capabilities the collector needs from its host.
///
/// Backends report listing failures with the listed path and metadata
/// failures with the offending entry's path, already classified as
/// [`ScanError`]s.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the immediate children of `dir`, each tagged with its kind.
    ///
    /// Entries come back in the backend's natural order; callers must not
    /// assume any sorting.
    async fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, ScanError>;

    /// Make `path` absolute against the backend's working directory.
    fn absolutize(&self, path: &Path) -> Result<PathBuf, ScanError>;
}

/// Lexically normalize a path: drop `.` and resolve `..` against the
/// preceding component. Symlinks are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Join `path` onto `cwd` unless it is already absolute, then normalize.
pub(crate) fn resolve_against(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}
