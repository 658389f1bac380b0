//! Log file retention management
//!
//! Purges dated log files from the logs directory once they outlive the
//! retention window.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use globset::Glob;
use tracing::{info, warn};

/// Retention window in days; older log files are purged at startup
pub const LOG_KEEP_DAYS: u64 = 5;

/// Pattern selecting log files eligible for purge.
///
/// Deliberately loose: it matches any stem with two hyphens, not only the
/// `YYYY-MM-DD` names this crate produces. Tightening it would change which
/// files get deleted.
const PURGE_PATTERN: &str = "*-*-*.log";

/// Purge log files older than the default retention window
///
/// Returns the number of files deleted.
pub fn purge_old_logs(logs_dir: &Path) -> Result<usize> {
    purge_old_logs_with_retention(logs_dir, Duration::from_secs(LOG_KEEP_DAYS * 24 * 3600))
}

/// Purge log files older than `max_age`
///
/// A nonexistent directory is not an error. Deletion failures are logged and
/// the sweep continues; only a failure to scan the directory itself is
/// reported to the caller.
pub fn purge_old_logs_with_retention(logs_dir: &Path, max_age: Duration) -> Result<usize> {
    if !logs_dir.is_dir() {
        return Ok(0);
    }

    let matcher = Glob::new(PURGE_PATTERN)
        .context("Failed to compile purge pattern")?
        .compile_matcher();
    let now = SystemTime::now();

    let mut deleted = 0;
    for entry in fs::read_dir(logs_dir).context("Failed to scan logs directory")? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read logs directory entry: {}", e);
                continue;
            }
        };

        // Match on the file name only, like a shell glob over the directory
        if !matcher.is_match(Path::new(&entry.file_name())) {
            continue;
        }

        let path = entry.path();
        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!("Cannot stat logfile {}: {}", path.display(), e);
                continue;
            }
        };

        // Files with a future mtime count as fresh
        let age = now.duration_since(modified).unwrap_or_default();
        if age > max_age {
            info!("Purging old logfile: {}", path.display());
            match fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!("Cannot purge logfile {}: {}", path.display(), e),
            }
        }
    }

    Ok(deleted)
}
