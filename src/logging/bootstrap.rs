//! Startup logging bootstrap
//!
//! Assembles the console sink, the optional dated file sink and the panic
//! reporter, then purges stale log files. Called once near process start;
//! the file handle lives inside the global subscriber for the process
//! lifetime.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::format::{ConsoleFormat, FileFormat};
use super::panic_hook;
use super::retention;
use crate::config::{self, LoggingConfig};

/// Name of the subdirectory holding log files under the configured home
pub const LOGS_SUBDIR: &str = "Logs";

/// Generate today's log file path from the local calendar date
pub fn today_log_file_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(format!("{}.log", Local::now().format("%Y-%m-%d")))
}

/// A writer sharing the open log file handle
struct FileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(buf);
            let _ = file.flush();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.flush()
        } else {
            Ok(())
        }
    }
}

/// Writer factory for tracing-subscriber
struct FileWriterMaker {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for FileWriterMaker {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Initialize process-wide logging
///
/// Attaches a stderr sink (debug-and-above when `verbose`, warning-and-above
/// otherwise; `RUST_LOG` overrides either), installs the panic reporter, and
/// when `home` is given sets up `<home>/Logs/<YYYY-MM-DD>.log` with stale-file
/// purging. Returns `false` only when the logs directory cannot be created;
/// every other failure degrades to console-only logging after a warning.
/// Never panics and never propagates an error to the caller.
pub fn initialize(home: Option<&Path>, verbose: bool) -> bool {
    initialize_with(home, verbose, config::file_logging_enabled())
}

/// Initialize from a [`LoggingConfig`]
pub fn init_with_config(config: &LoggingConfig) -> bool {
    initialize(config.home.as_deref(), config.verbose)
}

/// Console severity floor when `RUST_LOG` is not set
fn fallback_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn initialize_with(home: Option<&Path>, verbose: bool, write_logs: bool) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose)));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    // The subscriber is installed in one shot, so the file sink is assembled
    // first and the outcome reported once the sinks are live.
    let mut failed_dir: Option<PathBuf> = None;
    let mut open_failure: Option<anyhow::Error> = None;
    let mut active_logs_dir: Option<PathBuf> = None;

    let file_layer = match home {
        Some(home) if write_logs => {
            let logs_dir = home.join(LOGS_SUBDIR);
            if fs::create_dir_all(&logs_dir).is_err() {
                failed_dir = Some(logs_dir);
                None
            } else {
                // The purge runs whenever the directory exists, even if
                // today's file cannot be opened
                active_logs_dir = Some(logs_dir.clone());
                match open_log_file(&logs_dir) {
                    Ok(file) => {
                        let writer = FileWriterMaker {
                            file: Arc::new(Mutex::new(file)),
                        };
                        Some(
                            tracing_subscriber::fmt::layer()
                                .event_format(FileFormat)
                                .with_writer(writer)
                                .with_ansi(false),
                        )
                    }
                    Err(e) => {
                        // Console-only logging; not the directory-creation
                        // failure the boolean contract reports
                        open_failure = Some(e);
                        None
                    }
                }
            }
        }
        _ => None,
    };

    // Keep whatever subscriber a second call finds already installed
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    panic_hook::install();

    if let Some(logs_dir) = failed_dir {
        warn!("Cannot create output directory: {}", logs_dir.display());
        return false;
    }

    if let Some(e) = open_failure {
        warn!("{:#}", e);
    }

    if let Some(logs_dir) = active_logs_dir {
        if let Err(e) = retention::purge_old_logs(&logs_dir) {
            warn!("Cannot purge old logfiles in {}: {:#}", logs_dir.display(), e);
        }
    }

    debug!("==== application starts up ====");
    true
}

/// Open today's log file in append mode, creating it if missing
fn open_log_file(logs_dir: &Path) -> Result<File> {
    let path = today_log_file_path(logs_dir);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Cannot open log file: {}", path.display()))
}
