//! Cache statistics snapshot

use std::fmt;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Display format for read timestamps
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One cached file as seen by diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct EntryStats {
    /// Base name of the cached file
    pub file_name: String,
    /// Approximate size of the cached text
    pub approx_bytes: u64,
    /// Last hit or refresh
    pub last_read: DateTime<Local>,
}

impl EntryStats {
    pub(crate) fn new(path: &Path, approx_bytes: u64, last_read: SystemTime) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            file_name,
            approx_bytes,
            last_read: DateTime::<Local>::from(last_read),
        }
    }
}

/// Point-in-time view of a file cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub file_count: usize,
    /// Sum of `approx_bytes` over all entries
    pub memory_bytes: u64,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Ordered by last read, oldest first
    pub entries: Vec<EntryStats>,
}

impl CacheStats {
    /// Hit rate as a percentage (0.0 when nothing has been read)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache statistics:")?;
        writeln!(f, "Files cached: {}", self.file_count)?;
        writeln!(f, "Memory size: {} bytes", self.memory_bytes)?;
        writeln!(f, "Maximum size: {} files", self.capacity)?;
        writeln!(
            f,
            "Hits: {}, misses: {}, evictions: {} ({:.1}% hit rate)",
            self.hits,
            self.misses,
            self.evictions,
            self.hit_rate()
        )?;
        writeln!(f, "Cached files:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {} - {} bytes, read: {}",
                entry.file_name,
                entry.approx_bytes,
                entry.last_read.format(TIME_FORMAT)
            )?;
        }
        Ok(())
    }
}
