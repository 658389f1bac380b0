//! Logkeeper - startup logging bootstrap for desktop applications
//!
//! Configures a console sink and an optional dated file sink, installs a
//! panic reporter that logs before deferring to the default handler, and
//! purges stale log files on startup.

pub mod config;
pub mod logging;

pub use config::LoggingConfig;
pub use logging::{init_with_config, initialize, purge_old_logs};
