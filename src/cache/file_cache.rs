//! Text File Cache
//!
//! Keeps decoded file contents in memory, keyed by resolved path, to avoid
//! re-reading unchanged files. An entry is served only while the file's
//! modification time still equals the one captured with the content.
//! When full, the entry read least recently is evicted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info, trace};

use crate::cache::stats::{CacheStats, EntryStats};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};
use crate::fs::{resolve_path, FileSystem, OsFileSystem};

/// Bytes charged per UTF-16 code unit by the memory estimate
const BYTES_PER_CHAR: u64 = 2;

/// Cached content of one file
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Decoded text as of the last (re)read
    content: String,
    /// Last hit or refresh; ranks entries for eviction
    last_read: SystemTime,
    /// File mtime observed when `content` was captured
    captured_mtime: SystemTime,
}

impl CacheEntry {
    fn approx_bytes(&self) -> u64 {
        self.content.encode_utf16().count() as u64 * BYTES_PER_CHAR
    }
}

/// Bounded in-memory cache of text file contents
///
/// Single owner: every mutating operation takes `&mut self`. Wrap it in
/// [`SharedFileCache`](crate::cache::SharedFileCache) to share it between
/// threads.
pub struct FileCache<F = OsFileSystem, C = SystemClock> {
    /// Entries by resolved absolute path
    entries: HashMap<PathBuf, CacheEntry>,
    /// Maximum number of entries
    capacity: usize,
    fs: F,
    clock: C,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl FileCache {
    /// Create a cache with the default capacity (100 files) over the local
    /// filesystem and wall clock
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY, OsFileSystem, SystemClock)
    }

    /// Create a cache holding at most `capacity` files
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_parts(capacity, OsFileSystem, SystemClock)
    }

    /// Create a cache from a configuration
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        Self::with_capacity(config.capacity)
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem, C: Clock> FileCache<F, C> {
    /// Create a cache with injected collaborators
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of cached files, at least 1
    /// * `fs` - Source of existence, mtime and content
    /// * `clock` - Source of read timestamps
    pub fn with_parts(capacity: usize, fs: F, clock: C) -> Result<Self> {
        CacheConfig::default().with_capacity(capacity).validate()?;
        Ok(Self::build(capacity, fs, clock))
    }

    fn build(capacity: usize, fs: F, clock: C) -> Self {
        info!(capacity = capacity, "File cache initialized");
        Self {
            entries: HashMap::new(),
            capacity,
            fs,
            clock,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Read a file's text, serving it from the cache while it is unchanged
    ///
    /// # Errors
    /// * `NotFound` if the file does not exist; the cache is not touched
    /// * `ReadFailure` if the mtime or content cannot be read; no entry is
    ///   evicted or replaced
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let key = resolve_path(path).map_err(|source| CacheError::InvalidPath {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.fs.exists(&key) {
            return Err(CacheError::NotFound { path: key });
        }

        let current_mtime = self
            .fs
            .modified(&key)
            .map_err(|e| CacheError::from_io(key.clone(), e))?;

        if let Some(entry) = self.entries.get_mut(&key) {
            if entry.captured_mtime == current_mtime {
                entry.last_read = self.clock.now();
                self.hits += 1;
                trace!(path = %key.display(), "File cache HIT");
                return Ok(entry.content.clone());
            }
            debug!(path = %key.display(), "Cached content is stale, refreshing");
        } else {
            debug!(path = %key.display(), "File cache MISS");
        }

        self.refresh(key, current_mtime)
    }

    /// Re-read a file and store it, evicting if a new slot is needed
    fn refresh(&mut self, key: PathBuf, current_mtime: SystemTime) -> Result<String> {
        // Content is read before any eviction so a failed read leaves the
        // population as it was.
        let content = self
            .fs
            .read_all_text(&key)
            .map_err(|e| CacheError::from_io(key.clone(), e))?;
        self.misses += 1;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.remove_oldest_entry();
        }

        debug!(
            path = %key.display(),
            chars = content.chars().count(),
            "Stored file in cache"
        );

        self.entries.insert(
            key,
            CacheEntry {
                content: content.clone(),
                last_read: self.clock.now(),
                captured_mtime: current_mtime,
            },
        );

        Ok(content)
    }

    /// Evict the entry with the oldest read time
    ///
    /// Linear scan; ties go to whichever entry the map yields first.
    fn remove_oldest_entry(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_read)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.evictions += 1;
            debug!(path = %key.display(), "Evicted least recently read file");
        }
    }

    /// Drop the entry for `path`; returns whether one was present
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        let Ok(key) = resolve_path(path.as_ref()) else {
            return false;
        };
        let removed = self.entries.remove(&key).is_some();
        debug!(path = %key.display(), removed = removed, "Invalidated cached file");
        removed
    }

    /// Drop every entry. Hit/miss counters are kept.
    pub fn invalidate_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        debug!(dropped = dropped, "Cleared file cache");
    }

    /// Whether an entry exists for `path`, without checking it against disk
    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        resolve_path(path.as_ref())
            .map(|key| self.entries.contains_key(&key))
            .unwrap_or(false)
    }

    pub fn cached_files_count(&self) -> usize {
        self.entries.len()
    }

    /// Approximate memory held by cached text: 2 bytes per UTF-16 code unit
    pub fn cache_size_in_memory(&self) -> u64 {
        self.entries.values().map(CacheEntry::approx_bytes).sum()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the cache population and traffic counters
    pub fn stats(&self) -> CacheStats {
        let mut entries: Vec<EntryStats> = self
            .entries
            .iter()
            .map(|(path, entry)| EntryStats::new(path, entry.approx_bytes(), entry.last_read))
            .collect();
        entries.sort_by(|a, b| {
            a.last_read
                .cmp(&b.last_read)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        CacheStats {
            file_count: self.entries.len(),
            memory_bytes: self.cache_size_in_memory(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries,
        }
    }

    /// Log current cache metrics
    pub fn log_metrics(&self) {
        let stats = self.stats();
        debug!(
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = format!("{:.1}%", stats.hit_rate()),
            evictions = stats.evictions,
            files = stats.file_count,
            memory_bytes = stats.memory_bytes,
            "File cache metrics"
        );
    }
}
