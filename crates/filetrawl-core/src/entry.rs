//! Directory entries produced by a single listing.

use std::ffi::OsString;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else (symlink, device, socket, fifo).
    Other,
}

impl EntryKind {
    /// Classify a file type without following symlinks.
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Display name, lossily converted to UTF-8. Used for name tests only.
    pub name: CompactString,
    /// Exact name as returned by the filesystem. Used to build paths.
    pub file_name: OsString,
    /// Entry kind as reported by the listing.
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Create a new entry from a UTF-8 name.
    pub fn new(name: impl Into<CompactString>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            file_name: OsString::from(name.as_str()),
            name,
            kind,
        }
    }

    /// Create an entry from a raw filesystem name, which may not be UTF-8.
    pub fn from_os(file_name: OsString, kind: EntryKind) -> Self {
        Self {
            name: CompactString::new(file_name.to_string_lossy()),
            file_name,
            kind,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<CompactString>) -> Self {
        Self::new(name, EntryKind::File)
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<CompactString>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// Create an entry that is neither a file nor a directory.
    pub fn other(name: impl Into<CompactString>) -> Self {
        Self::new(name, EntryKind::Other)
    }
}
