//! Scan progress reporting.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use filetrawl_core::ScanStats;

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of directories listed so far.
    pub dirs_scanned: u64,
    /// Number of entries returned by those listings.
    pub entries_seen: u64,
    /// Number of files that passed the filter so far.
    pub files_matched: u64,
    /// Directory that was just listed.
    pub current_path: PathBuf,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            dirs_scanned: 0,
            entries_seen: 0,
            files_matched: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in directories per second.
    pub fn dirs_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.dirs_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters shared by every branch of one scan.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    dirs_scanned: AtomicU64,
    entries_seen: AtomicU64,
    files_matched: AtomicU64,
    others_skipped: AtomicU64,
    max_depth: AtomicU32,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            dirs_scanned: AtomicU64::new(0),
            entries_seen: AtomicU64::new(0),
            files_matched: AtomicU64::new(0),
            others_skipped: AtomicU64::new(0),
            max_depth: AtomicU32::new(0),
        }
    }

    pub fn record_dir(&self, depth: u32, entries: usize) {
        self.dirs_scanned.fetch_add(1, Ordering::Relaxed);
        self.entries_seen.fetch_add(entries as u64, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn record_match(&self) {
        self.files_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_other(&self) {
        self.others_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self, current_path: PathBuf) -> ScanProgress {
        ScanProgress {
            dirs_scanned: self.dirs_scanned.load(Ordering::Relaxed),
            entries_seen: self.entries_seen.load(Ordering::Relaxed),
            files_matched: self.files_matched.load(Ordering::Relaxed),
            current_path,
            elapsed: self.elapsed(),
        }
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats {
            dirs_scanned: self.dirs_scanned.load(Ordering::Relaxed),
            entries_seen: self.entries_seen.load(Ordering::Relaxed),
            files_matched: self.files_matched.load(Ordering::Relaxed),
            others_skipped: self.others_skipped.load(Ordering::Relaxed),
            max_depth: self.max_depth.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_stats() {
        let tracker = ProgressTracker::new();
        tracker.record_dir(0, 3);
        tracker.record_dir(2, 1);
        tracker.record_match();
        tracker.record_other();

        let stats = tracker.stats();
        assert_eq!(stats.dirs_scanned, 2);
        assert_eq!(stats.entries_seen, 4);
        assert_eq!(stats.files_matched, 1);
        assert_eq!(stats.others_skipped, 1);
        assert_eq!(stats.max_depth, 2);

        let progress = tracker.snapshot(PathBuf::from("/a"));
        assert_eq!(progress.dirs_scanned, 2);
        assert_eq!(progress.current_path, PathBuf::from("/a"));
    }

    #[test]
    fn test_rate_without_elapsed_time() {
        assert_eq!(ScanProgress::new().dirs_per_second(), 0.0);
    }
}
