//! Error types for scanning operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ScanConfigBuilderError;

/// Errors that abort a scan.
///
/// There are no partial results: any of these, raised anywhere in the
/// tree, fails the whole top-level call.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A path that was listed is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error while listing a directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The type of an entry could not be determined.
    #[error("Cannot read metadata of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Operation was interrupted.
    #[error("Operation interrupted")]
    Interrupted,
}

impl ScanError {
    /// Create a listing error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a metadata error for an entry.
    pub fn metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::Io { path, .. }
            | Self::Metadata { path, .. } => Some(path.as_path()),
            Self::InvalidConfig { .. } | Self::Interrupted => None,
        }
    }
}

impl From<ScanConfigBuilderError> for ScanError {
    fn from(err: ScanConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io("/test/path", Error::new(ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io("/test/path", Error::new(ErrorKind::NotFound, "missing"));
        assert!(matches!(err, ScanError::NotFound { .. }));

        let err = ScanError::io("/test/path", Error::new(ErrorKind::NotADirectory, "file"));
        assert!(matches!(err, ScanError::NotADirectory { .. }));

        let err = ScanError::io("/test/path", Error::other("boom"));
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn test_error_path() {
        let err = ScanError::metadata("/a/b", Error::other("gone"));
        assert_eq!(err.path(), Some(std::path::Path::new("/a/b")));
        assert!(ScanError::Interrupted.path().is_none());
    }

    #[test]
    fn test_builder_error_conversion() {
        let err: ScanError = crate::ScanConfig::builder().build().unwrap_err().into();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
        assert!(err.to_string().contains("Root path is required"));
    }
}
