//! Diagnostics via `tracing`.
//!
//! The CLI logs to stderr. The TUI owns the terminal, so it logs to a file
//! in the data directory, and only when `TASKLIST_LOG` asks for it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (e.g. `debug`)
pub const LOG_ENV: &str = "TASKLIST_LOG";

/// Log file written by the TUI
pub const LOG_FILE: &str = "tasklist.log";

const DEFAULT_DIRECTIVE: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Install the stderr subscriber used by CLI commands
pub fn init_for_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install the file subscriber used by the TUI. Without `TASKLIST_LOG`
/// nothing is installed and events are dropped.
pub fn init_for_tui(data_dir: &Path) {
    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
