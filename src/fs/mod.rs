//! Filesystem collaborator used by the cache

pub mod paths;
pub mod source;

pub use paths::resolve_path;
pub use source::{FileSystem, OsFileSystem};
