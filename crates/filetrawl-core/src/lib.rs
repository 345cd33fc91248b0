//! Core types for filetrawl.
//!
//! This crate provides the data model shared by the scanner and its
//! consumers: scan configuration, directory entries, the suffix filter,
//! the append-only result accumulator and the error type.

mod config;
mod entry;
mod error;
mod filter;
mod result;

pub use config::{ScanConfig, ScanConfigBuilder, ScanConfigBuilderError, ScanOrder};
pub use entry::{DirectoryEntry, EntryKind};
pub use error::ScanError;
pub use filter::SuffixFilter;
pub use result::{ResultAccumulator, ScanResult, ScanStats};
