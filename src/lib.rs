//! filecache - bounded in-process cache of text file contents
//!
//! Files are keyed by resolved absolute path and served from memory while
//! their modification time is unchanged. When the cache is full, the file
//! read least recently is evicted.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod fs;

pub use cache::{CacheStats, EntryStats, FileCache, SharedFileCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use fs::{FileSystem, OsFileSystem};
