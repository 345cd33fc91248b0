//! Recursive directory collector.

use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use tokio::sync::{Semaphore, SemaphorePermit, broadcast};
use tracing::{debug, info, warn};

use filetrawl_core::{
    DirectoryEntry, EntryKind, ResultAccumulator, ScanConfig, ScanError, ScanOrder, ScanResult,
    SuffixFilter,
};

use crate::fs::FileSystem;
use crate::local::LocalFs;
use crate::progress::{ProgressTracker, ScanProgress};

/// Collects files matching a suffix filter from a directory tree.
///
/// Each directory's children are expanded as one concurrent batch on the
/// caller's task. Output order follows listing order as selected by
/// [`ScanOrder`], independent of which branch completes first.
pub struct Collector<F = LocalFs> {
    fs: F,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Collector<LocalFs> {
    /// Create a collector over the local filesystem.
    pub fn new() -> Self {
        Self::with_fs(LocalFs::new())
    }
}

impl Default for Collector<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Collector<F> {
    /// Create a collector over the given filesystem backend.
    pub fn with_fs(fs: F) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { fs, progress_tx }
    }

    /// The filesystem backend.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan `config.root` and return every matching file.
    pub async fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        self.scan_into(config, ResultAccumulator::new()).await
    }

    /// Scan `config.root`, appending matches after whatever `accumulator`
    /// already holds.
    ///
    /// On error nothing is appended and the accumulator is dropped.
    pub async fn scan_into(
        &self,
        config: &ScanConfig,
        mut accumulator: ResultAccumulator,
    ) -> Result<ScanResult, ScanError> {
        let root = self.fs.absolutize(&config.root)?;
        info!(
            root = %root.display(),
            filter = config.filter.as_str(),
            max_concurrency = config.max_concurrency,
            "starting scan"
        );

        let ctx = ScanContext::new(config);
        let matches = match self.collect_dir(&ctx, root.clone(), 0).await {
            Ok(matches) => matches,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "scan aborted");
                return Err(err);
            }
        };
        accumulator.extend(matches);

        let stats = ctx.tracker.stats();
        let scan_duration = ctx.tracker.elapsed();
        info!(
            root = %root.display(),
            dirs = stats.dirs_scanned,
            matched = stats.files_matched,
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanResult {
            root,
            files: accumulator,
            stats,
            scan_duration,
        })
    }

    /// List one directory and expand its children as a single batch.
    fn collect_dir<'a>(
        &'a self,
        ctx: &'a ScanContext<'a>,
        dir: PathBuf,
        depth: u32,
    ) -> BoxFuture<'a, Result<Vec<PathBuf>, ScanError>> {
        async move {
            // The permit covers the listing only, so nested expansion cannot
            // starve on permits held by its ancestors.
            let entries = {
                let _permit = ctx.acquire().await?;
                self.fs.list(&dir).await?
            };

            ctx.tracker.record_dir(depth, entries.len());
            if self.progress_tx.receiver_count() > 0 {
                let _ = self.progress_tx.send(ctx.tracker.snapshot(dir.clone()));
            }
            debug!(dir = %dir.display(), depth, entries = entries.len(), "listed directory");

            let batch = entries
                .into_iter()
                .filter(|entry| !ctx.config.should_skip_hidden(&entry.name))
                .map(|entry| self.expand(ctx, &dir, entry, depth));
            let branches = try_join_all(batch).await?;

            Ok(merge(branches, ctx.config.order))
        }
        .boxed()
    }

    /// Classify one entry: recurse into directories, filter files.
    async fn expand(
        &self,
        ctx: &ScanContext<'_>,
        dir: &Path,
        entry: DirectoryEntry,
        depth: u32,
    ) -> Result<Branch, ScanError> {
        match entry.kind {
            EntryKind::Directory => {
                let child_depth = depth + 1;
                if !ctx.config.within_depth(child_depth) {
                    return Ok(Branch::Skipped);
                }
                let nested = self
                    .collect_dir(ctx, dir.join(&entry.file_name), child_depth)
                    .await?;
                Ok(Branch::Descendants(nested))
            }
            EntryKind::File if ctx.filter().matches(&entry.name) => {
                ctx.tracker.record_match();
                Ok(Branch::Match(dir.join(&entry.file_name)))
            }
            EntryKind::File => Ok(Branch::Skipped),
            EntryKind::Other => {
                ctx.tracker.record_other();
                Ok(Branch::Skipped)
            }
        }
    }
}

/// Per-scan state shared by reference across the whole recursion.
struct ScanContext<'a> {
    config: &'a ScanConfig,
    gate: Option<Semaphore>,
    tracker: ProgressTracker,
}

impl<'a> ScanContext<'a> {
    fn new(config: &'a ScanConfig) -> Self {
        let gate = (config.max_concurrency > 0).then(|| Semaphore::new(config.max_concurrency));
        Self {
            config,
            gate,
            tracker: ProgressTracker::new(),
        }
    }

    fn filter(&self) -> &SuffixFilter {
        &self.config.filter
    }

    async fn acquire(&self) -> Result<Option<SemaphorePermit<'_>>, ScanError> {
        match &self.gate {
            Some(gate) => gate
                .acquire()
                .await
                .map(Some)
                .map_err(|_| ScanError::Interrupted),
            None => Ok(None),
        }
    }
}

/// Result of expanding a single entry, kept at its listing index.
enum Branch {
    Match(PathBuf),
    Descendants(Vec<PathBuf>),
    Skipped,
}

/// Combine a directory's branches according to `order`.
fn merge(branches: Vec<Branch>, order: ScanOrder) -> Vec<PathBuf> {
    let mut merged = Vec::new();
    match order {
        ScanOrder::Listing => {
            for branch in branches {
                match branch {
                    Branch::Match(path) => merged.push(path),
                    Branch::Descendants(paths) => merged.extend(paths),
                    Branch::Skipped => {}
                }
            }
        }
        ScanOrder::DescendantsFirst => {
            let mut own = Vec::new();
            for branch in branches {
                match branch {
                    Branch::Match(path) => own.push(path),
                    Branch::Descendants(paths) => merged.extend(paths),
                    Branch::Skipped => {}
                }
            }
            merged.extend(own);
        }
    }
    merged
}

/// Collect every file under `root` whose name ends with `filter`.
///
/// An empty filter collects every file. Paths are absolute.
pub async fn collect_files(
    root: impl AsRef<Path>,
    filter: impl Into<SuffixFilter>,
) -> Result<Vec<PathBuf>, ScanError> {
    let config = ScanConfig::with_filter(root.as_ref(), filter);
    Collector::new().scan(&config).await.map(ScanResult::into_paths)
}
