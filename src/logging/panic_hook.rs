//! Panic reporting
//!
//! Wraps the currently installed panic hook so uncaught panics are logged at
//! error level before the previous hook (usually the runtime default) runs.
//! Termination semantics stay whatever they were.

use std::backtrace::Backtrace;
use std::panic;

use tracing::error;

/// Install the chained panic reporter
pub fn install() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::force_capture();
        error!("Uncaught exception: {}\n{}", info, backtrace);
        previous(info);
    }));
}
