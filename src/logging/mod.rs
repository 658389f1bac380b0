//! Logging bootstrap
//!
//! Provides console and file-based logging with retention, plus a panic
//! reporter that logs uncaught panics before the default handler runs.

mod bootstrap;
mod format;
mod panic_hook;
mod retention;

pub use bootstrap::{init_with_config, initialize, today_log_file_path, LOGS_SUBDIR};
pub use retention::{purge_old_logs, purge_old_logs_with_retention, LOG_KEEP_DAYS};
