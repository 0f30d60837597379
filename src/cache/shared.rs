//! Thread-safe wrapper around [`FileCache`]
//!
//! `read_file` reads and conditionally writes the entry map, so the whole
//! cache sits behind one mutex held for the duration of each call.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, FileCache};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::fs::{FileSystem, OsFileSystem};

/// File cache shareable between threads (e.g. behind an `Arc`)
pub struct SharedFileCache<F = OsFileSystem, C = SystemClock> {
    inner: Mutex<FileCache<F, C>>,
}

impl<F: FileSystem, C: Clock> SharedFileCache<F, C> {
    pub fn new(cache: FileCache<F, C>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    // A panic mid-operation cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, FileCache<F, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`FileCache::read_file`]; the returned text is an owned copy
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        self.lock().read_file(path)
    }

    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.lock().invalidate(path)
    }

    pub fn invalidate_all(&self) {
        self.lock().invalidate_all()
    }

    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        self.lock().is_cached(path)
    }

    pub fn cached_files_count(&self) -> usize {
        self.lock().cached_files_count()
    }

    pub fn cache_size_in_memory(&self) -> u64 {
        self.lock().cache_size_in_memory()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Unwrap back into a single-owner cache
    pub fn into_inner(self) -> FileCache<F, C> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: FileSystem, C: Clock> From<FileCache<F, C>> for SharedFileCache<F, C> {
    fn from(cache: FileCache<F, C>) -> Self {
        Self::new(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_concurrent_readers_respect_capacity() {
        let temp = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..6)
            .map(|i| {
                let path = temp.path().join(format!("{}.txt", i));
                fs::write(&path, format!("file {}", i)).unwrap();
                path
            })
            .collect();

        let cache = Arc::new(SharedFileCache::new(FileCache::with_capacity(3).unwrap()));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                let paths = paths.clone();
                thread::spawn(move || {
                    for round in 0..20 {
                        let idx = (worker + round) % paths.len();
                        let content = cache.read_file(&paths[idx]).unwrap();
                        assert_eq!(content, format!("file {}\n", idx));
                        assert!(cache.cached_files_count() <= 3);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.hits + stats.misses, 80);
    }

    #[test]
    fn test_invalidate_through_wrapper() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "A").unwrap();

        let cache: SharedFileCache = FileCache::new().into();
        assert_eq!(cache.read_file(&path).unwrap(), "A\n");
        assert!(cache.is_cached(&path));
        assert_eq!(cache.cache_size_in_memory(), 4);

        assert!(cache.invalidate(&path));
        assert!(!cache.is_cached(&path));

        cache.read_file(&path).unwrap();
        cache.invalidate_all();

        let inner = cache.into_inner();
        assert_eq!(inner.cached_files_count(), 0);
    }
}
