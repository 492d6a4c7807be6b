//! Log file setup.
//!
//! The TUI owns the terminal, so logs go to `<data dir>/pomotick.log`
//! instead of stderr.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use pomotick_core::storage::{data_dir, LogConfig};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "pomotick.log";

/// Filter for the pomotick crates at `level`. `RUST_LOG` takes precedence.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = config.level.trim();
    EnvFilter::try_new(format!("pomotick_core={level},pomotick_cli={level}"))
        .unwrap_or_else(|_| EnvFilter::new("pomotick_core=info,pomotick_cli=info"))
}

fn open_log_file(dir: &Path) -> Option<File> {
    let path = dir.join(LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {e}", path.display());
            None
        }
    }
}

/// Install the global subscriber. Logging is disabled if the file cannot be
/// opened; that is never fatal.
pub fn init(config: &LogConfig) {
    let file = match data_dir() {
        Ok(dir) => open_log_file(&dir),
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    };

    let result = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(build_filter(config))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: logging unavailable: {e}");
    }
}
