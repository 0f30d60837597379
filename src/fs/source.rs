//! File content source
//!
//! The cache only needs three questions answered about a file: does it
//! exist, when was it last modified, and what text does it hold.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

/// Read buffer size for content decoding
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Filesystem operations consumed by the cache
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Current modification timestamp of the file
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Full text of the file, one `\n` appended after every line
    fn read_all_text(&self, path: &Path) -> io::Result<String>;
}

/// Local disk via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    /// Line-based decode: `\n`, `\r\n` and a lone `\r` all end a line and
    /// come back as `\n`; a final line without a terminator still gets one.
    fn read_all_text(&self, path: &Path) -> io::Result<String> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        Ok(terminate_lines(&raw))
    }
}

/// Rebuild `text` with every line ended by a single `\n`
fn terminate_lines(text: &str) -> String {
    let mut content = String::with_capacity(text.len() + 1);
    let mut chars = text.chars().peekable();
    let mut open_line = false;

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                content.push('\n');
                open_line = false;
            }
            '\r' => {
                chars.next_if_eq(&'\n');
                content.push('\n');
                open_line = false;
            }
            other => {
                content.push(other);
                open_line = true;
            }
        }
    }

    if open_line {
        content.push('\n');
    }
    content
}
