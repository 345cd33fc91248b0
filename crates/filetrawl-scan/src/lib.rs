//! Asynchronous recursive file collector for filetrawl.
//!
//! # Overview
//!
//! `filetrawl-scan` walks a directory tree and returns every file whose
//! name ends with a literal suffix. Key features:
//!
//! - **Concurrent expansion** of each directory's children as one batch
//! - **Deterministic order** driven by listing index, not completion time
//! - **Fail-fast errors**: any listing failure aborts the whole scan
//! - **Optional concurrency cap** on in-flight directory listings
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use filetrawl_scan::{Collector, ScanConfig};
//!
//! # async fn run() -> Result<(), filetrawl_scan::ScanError> {
//! let config = ScanConfig::with_filter("example", ".md");
//! let result = Collector::new().scan(&config).await?;
//!
//! for path in result.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use filetrawl_scan::Collector;
//!
//! let collector = Collector::new();
//! let mut progress_rx = collector.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Listed {} directories", progress.dirs_scanned);
//!     }
//! });
//! ```

mod collector;
mod fs;
mod local;
mod memory;
mod progress;

pub use collector::{Collector, collect_files};
pub use fs::{FileSystem, normalize};
pub use local::LocalFs;
pub use memory::MemoryFs;
pub use progress::ScanProgress;

// Re-export core types for convenience
pub use filetrawl_core::{
    DirectoryEntry, EntryKind, ResultAccumulator, ScanConfig, ScanError, ScanOrder, ScanResult,
    ScanStats, SuffixFilter,
};
