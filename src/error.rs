//! Cache Error Types
//!
//! Structured errors for file cache operations. Every variant leaves the
//! cache population untouched.

use std::io;
use std::path::PathBuf;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// File cache error types
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot resolve path '{}': {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// A `NotFound` kind means the file vanished between the existence
    /// check and the metadata or content query.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => CacheError::NotFound { path },
            _ => CacheError::ReadFailure { path, source },
        }
    }

    /// Whether this error means the file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classification() {
        let gone = CacheError::from_io(
            PathBuf::from("/tmp/a.txt"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(gone.is_not_found());

        let denied = CacheError::from_io(
            PathBuf::from("/tmp/a.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(denied, CacheError::ReadFailure { .. }));
        assert!(!denied.is_not_found());
    }

    #[test]
    fn test_display_includes_path() {
        let err = CacheError::NotFound {
            path: PathBuf::from("/data/missing.txt"),
        };
        assert_eq!(err.to_string(), "File not found: /data/missing.txt");
    }
}
