//! In-memory filesystem backend.
//!
//! Used for tests and embedders that need a deterministic tree. Listings
//! return children in insertion order, which makes ordering observable.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;

use filetrawl_core::{DirectoryEntry, EntryKind, ScanError};

use crate::fs::{FileSystem, resolve_against};

/// Node in the memory filesystem.
#[derive(Debug, Clone)]
enum Node {
    File,
    Directory {
        latency: Option<Duration>,
        failure: Option<io::ErrorKind>,
    },
    Other,
    /// An entry whose type cannot be determined.
    Unreadable,
}

impl Node {
    fn directory() -> Self {
        Self::Directory {
            latency: None,
            failure: None,
        }
    }
}

/// In-memory filesystem.
///
/// Paths are absolute; relative paths passed to the `add_*` helpers are
/// resolved against the working directory (default `/`).
#[derive(Debug)]
pub struct MemoryFs {
    cwd: PathBuf,
    nodes: RwLock<IndexMap<PathBuf, Node>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    listings: AtomicUsize,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create a memory filesystem containing only `/`.
    pub fn new() -> Self {
        Self::with_cwd("/")
    }

    /// Create a memory filesystem with the given working directory.
    ///
    /// The working directory and its ancestors are created.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        let cwd = resolve_against(Path::new("/"), &cwd.into());
        let fs = Self {
            cwd: cwd.clone(),
            nodes: RwLock::new(IndexMap::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        };
        fs.insert(&cwd, Node::directory());
        fs
    }

    /// Working directory used to resolve relative paths.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Add a directory (and any missing parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert(&path, Node::directory());
        self
    }

    /// Add a regular file (and any missing parents).
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert(&path, Node::File);
        self
    }

    /// Add an entry that is neither a file nor a directory.
    pub fn add_other(&self, path: impl AsRef<Path>) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert(&path, Node::Other);
        self
    }

    /// Add an entry whose type lookup fails when its parent is listed.
    pub fn add_unreadable(&self, path: impl AsRef<Path>) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert(&path, Node::Unreadable);
        self
    }

    /// Delay every listing of `dir` by `latency`.
    pub fn set_latency(&self, dir: impl AsRef<Path>, latency: Duration) -> &Self {
        self.update_dir(dir.as_ref(), |lat, _| *lat = Some(latency));
        self
    }

    /// Make every listing of `dir` fail with `kind`.
    pub fn fail_listing(&self, dir: impl AsRef<Path>, kind: io::ErrorKind) -> &Self {
        self.update_dir(dir.as_ref(), |_, failure| *failure = Some(kind));
        self
    }

    /// Number of `list` calls served so far.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::Relaxed)
    }

    /// Highest number of listings that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        resolve_against(&self.cwd, path)
    }

    fn insert(&self, path: &Path, node: Node) {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        let mut ancestors: Vec<&Path> = path.ancestors().skip(1).collect();
        ancestors.reverse();
        for ancestor in ancestors {
            nodes.entry(ancestor.to_path_buf()).or_insert_with(Node::directory);
        }
        nodes.insert(path.to_path_buf(), node);
    }

    fn update_dir(&self, dir: &Path, update: impl FnOnce(&mut Option<Duration>, &mut Option<io::ErrorKind>)) {
        let dir = self.resolve(dir);
        self.insert_if_missing(&dir);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(Node::Directory { latency, failure }) = nodes.get_mut(&dir) {
            update(latency, failure);
        }
    }

    fn insert_if_missing(&self, dir: &Path) {
        let exists = self
            .nodes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(dir);
        if !exists {
            self.insert(dir, Node::directory());
        }
    }

    /// Look up `dir` and return its latency, or the listing error.
    fn check_listable(&self, dir: &Path) -> Result<Option<Duration>, ScanError> {
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        match nodes.get(dir) {
            Some(Node::Directory { failure: Some(kind), .. }) => {
                Err(ScanError::io(dir, io::Error::from(*kind)))
            }
            Some(Node::Directory { latency, .. }) => Ok(*latency),
            Some(_) => Err(ScanError::NotADirectory {
                path: dir.to_path_buf(),
            }),
            None => Err(ScanError::NotFound {
                path: dir.to_path_buf(),
            }),
        }
    }

    fn children(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, ScanError> {
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| {
                let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
                let kind = match node {
                    Node::File => EntryKind::File,
                    Node::Directory { .. } => EntryKind::Directory,
                    Node::Other => EntryKind::Other,
                    Node::Unreadable => {
                        return Err(ScanError::metadata(
                            path,
                            io::Error::new(io::ErrorKind::NotFound, "entry vanished"),
                        ));
                    }
                };
                Ok(DirectoryEntry::from_os(name, kind))
            })
            .collect()
    }
}

/// Decrements the in-flight counter when a listing finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, ScanError> {
        self.listings.fetch_add(1, Ordering::Relaxed);
        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        let _guard = InFlight(&self.in_flight);
        self.peak_in_flight.fetch_max(current, Ordering::Relaxed);

        let latency = self.check_listable(dir)?;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.children(dir)
    }

    fn absolutize(&self, path: &Path) -> Result<PathBuf, ScanError> {
        Ok(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insertion_order_is_listing_order() {
        let fs = MemoryFs::new();
        fs.add_file("/root/b.md").add_dir("/root/a").add_file("/root/c.md");

        let entries = fs.list(Path::new("/root")).await.unwrap();
        assert_eq!(
            entries,
            vec![
                DirectoryEntry::file("b.md"),
                DirectoryEntry::directory("a"),
                DirectoryEntry::file("c.md"),
            ]
        );
    }

    #[tokio::test]
    async fn test_parents_are_created() {
        let fs = MemoryFs::new();
        fs.add_file("/x/y/z.txt");

        assert_eq!(fs.list(Path::new("/")).await.unwrap(), vec![DirectoryEntry::directory("x")]);
        assert_eq!(fs.list(Path::new("/x")).await.unwrap(), vec![DirectoryEntry::directory("y")]);
    }

    #[tokio::test]
    async fn test_listing_errors() {
        let fs = MemoryFs::new();
        fs.add_file("/file.txt");
        fs.add_dir("/locked");
        fs.fail_listing("/locked", io::ErrorKind::PermissionDenied);

        assert!(matches!(
            fs.list(Path::new("/missing")).await,
            Err(ScanError::NotFound { .. })
        ));
        assert!(matches!(
            fs.list(Path::new("/file.txt")).await,
            Err(ScanError::NotADirectory { .. })
        ));
        assert!(matches!(
            fs.list(Path::new("/locked")).await,
            Err(ScanError::PermissionDenied { .. })
        ));
        assert_eq!(fs.peak_in_flight(), 1);
        assert_eq!(fs.listings(), 3);
    }

    #[tokio::test]
    async fn test_unreadable_entry_fails_parent_listing() {
        let fs = MemoryFs::new();
        fs.add_file("/d/ok.md").add_unreadable("/d/gone.md");

        let err = fs.list(Path::new("/d")).await.unwrap_err();
        match err {
            ScanError::Metadata { path, .. } => assert_eq!(path, PathBuf::from("/d/gone.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_relative_paths_use_cwd() {
        let fs = MemoryFs::with_cwd("/work");
        fs.add_file("example/one.md");

        assert_eq!(fs.cwd(), Path::new("/work"));
        assert_eq!(
            fs.absolutize(Path::new("example")).unwrap(),
            PathBuf::from("/work/example")
        );
    }
}
