//! Path resolution for cache keys
//!
//! Equivalent relative and absolute spellings of one file must land on
//! the same key, including for files that no longer exist.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to the absolute form used as a cache key
///
/// Relative paths are joined to the current directory and `.`/`..`
/// components are folded lexically. Symlinks are not followed.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping past the root leaves the root in place
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
