//! File content cache
//!
//! Bounded in-memory cache of text files with mtime-based staleness
//! detection and least-recently-read eviction.

pub mod file_cache;
pub mod shared;
pub mod stats;

pub use file_cache::FileCache;
pub use shared::SharedFileCache;
pub use stats::{CacheStats, EntryStats};
