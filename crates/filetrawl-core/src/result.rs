//! Scan results and the append-only accumulator.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Ordered, append-only collection of matched absolute paths.
///
/// Entries are never removed or overwritten; a scan only appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultAccumulator {
    paths: Vec<PathBuf>,
}

impl ResultAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one path.
    pub fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Number of collected paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over collected paths in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Collected paths as a slice.
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Consume the accumulator, returning the paths.
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl Extend<PathBuf> for ResultAccumulator {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl From<Vec<PathBuf>> for ResultAccumulator {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl IntoIterator for ResultAccumulator {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultAccumulator {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Counters gathered during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Directories listed, including the root.
    pub dirs_scanned: u64,
    /// Entries returned by all listings.
    pub entries_seen: u64,
    /// Files that passed the filter.
    pub files_matched: u64,
    /// Entries that were neither files nor directories.
    pub others_skipped: u64,
    /// Deepest directory level listed (root = 0).
    pub max_depth: u32,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Absolute form of the scanned root.
    pub root: PathBuf,
    /// Matching files, in the configured order.
    pub files: ResultAccumulator,
    /// Scan counters.
    pub stats: ScanStats,
    /// Wall time of the scan.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Number of matched files in the accumulator.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no files are in the accumulator.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Matched paths as a slice.
    pub fn paths(&self) -> &[PathBuf] {
        self.files.as_slice()
    }

    /// Consume the result, returning the matched paths.
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.files.into_vec()
    }

    /// Check if a path was collected.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.files.iter().any(|p| p == path)
    }
}
