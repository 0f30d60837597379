//! filecache demo driver
//!
//! Drives the file cache from the outside: reads files, prints cache
//! statistics and invalidates entries.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use filecache::{CacheConfig, FileCache};

/// Capacity used by the built-in demo so that the third file evicts
const DEMO_CAPACITY: usize = 2;

/// CLI command
#[derive(Debug, PartialEq)]
enum Command {
    /// Run the scripted demo over sample files (default)
    Demo,
    /// Read the given files through one cache
    Read { files: Vec<PathBuf>, json: bool },
    /// Show help
    Help,
}

fn print_help() {
    eprintln!(
        r#"filecache-demo - Exercise the in-memory text file cache

USAGE:
    filecache-demo                        # Run the scripted demo (default)
    filecache-demo read [--json] <file>...
    filecache-demo help

COMMANDS:
    (none)  Create 1.txt, 2.txt, 3.txt in a scratch directory and run
            read/evict/invalidate steps against a cache of 2 files
    read    Read each file through the cache, then print statistics
    help    Show this help message

OPTIONS:
    --json  Print statistics as JSON (read command only)

ENVIRONMENT:
    FILECACHE_CAPACITY   Maximum number of cached files (default 100)
    RUST_LOG             Log filter (trace, debug, info, warn, error)
"#
    );
}

fn parse_command(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Demo);
    };

    match command.as_str() {
        "demo" => Ok(Command::Demo),
        "read" => {
            let mut json = false;
            let mut files = Vec::new();
            for arg in &args[1..] {
                match arg.as_str() {
                    "--json" => json = true,
                    _ => files.push(PathBuf::from(arg)),
                }
            }
            if files.is_empty() {
                return Err(anyhow!("Usage: filecache-demo read [--json] <file>..."));
            }
            Ok(Command::Read { files, json })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => {
            eprintln!("Unknown command: {}", other);
            Ok(Command::Help)
        }
    }
}

fn run_demo(out: &mut impl Write) -> Result<()> {
    // Sample files live only as long as this guard
    let dir = tempfile::tempdir().context("Failed to create scratch directory")?;
    let samples = [
        ("1.txt", "first file\nline two"),
        ("2.txt", "second file"),
        ("3.txt", "third file\nwith\nthree lines"),
    ];
    for (name, body) in samples {
        let path = dir.path().join(name);
        fs::write(&path, body).with_context(|| format!("Failed to write {:?}", path))?;
    }
    let sample = |name: &str| dir.path().join(name);

    let mut cache = FileCache::with_capacity(DEMO_CAPACITY)?;
    info!(dir = %dir.path().display(), "Running file cache demo");

    writeln!(out, "{}", cache.read_file(sample("1.txt"))?)?;
    writeln!(out, "{}", cache.read_file(sample("2.txt"))?)?;
    writeln!(out, "{}", cache.stats())?;

    writeln!(out, "{}", cache.read_file(sample("3.txt"))?)?;
    writeln!(out, "{}", cache.stats())?;

    cache.invalidate(sample("2.txt"));
    writeln!(out, "{}", cache.stats())?;

    cache.invalidate_all();
    writeln!(out, "{}", cache.stats())?;

    cache.log_metrics();
    Ok(())
}

fn run_read(files: &[PathBuf], json: bool) -> Result<()> {
    let config = CacheConfig::from_env()?;
    let mut cache = FileCache::with_config(&config)?;

    let mut failures = 0;
    for file in files {
        match cache.read_file(file) {
            Ok(content) => print!("{}", content),
            Err(e) => {
                error!(path = %file.display(), error = %e, "Failed to read file");
                failures += 1;
            }
        }
    }

    let stats = cache.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats);
    }
    cache.log_metrics();

    if failures > 0 {
        return Err(anyhow!("{} of {} files could not be read", failures, files.len()));
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    match command {
        Command::Demo => run_demo(&mut io::stdout().lock()),
        Command::Read { files, json } => run_read(&files, json),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_demo() {
        assert_eq!(parse_command(&[]).unwrap(), Command::Demo);
        assert_eq!(parse_command(&args(&["demo"])).unwrap(), Command::Demo);
    }

    #[test]
    fn test_read_command() {
        let cmd = parse_command(&args(&["read", "a.txt", "--json", "b.txt"])).unwrap();
        assert_eq!(
            cmd,
            Command::Read {
                files: vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
                json: true,
            }
        );
    }

    #[test]
    fn test_read_requires_files() {
        assert!(parse_command(&args(&["read", "--json"])).is_err());
    }

    #[test]
    fn test_unknown_command_shows_help() {
        assert_eq!(parse_command(&args(&["mount"])).unwrap(), Command::Help);
        assert_eq!(parse_command(&args(&["-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        run_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Each read is followed by a blank line
        assert!(text.starts_with("first file\nline two\n\nsecond file\n\nCache statistics:\n"));
        assert!(text.contains("third file\nwith\nthree lines\n\n"));
        assert!(text.contains("Files cached: 2\n"));
        assert!(text.ends_with("Files cached: 0\nMemory size: 0 bytes\nMaximum size: 2 files\nHits: 0, misses: 3, evictions: 1 (0.0% hit rate)\nCached files:\n\n"));
    }
}
