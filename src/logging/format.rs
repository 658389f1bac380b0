//! Record formats for the console and file sinks
//!
//! Both sinks emit one line per record as `<timestamp> [<target>] <LEVEL>: <message>`;
//! they differ only in the timestamp: the console uses fractional epoch
//! seconds, the file a local calendar timestamp.

use std::fmt::{self, Write as _};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Console record format with a high-resolution epoch timestamp
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        let meta = event.metadata();
        write!(writer, "{:.6} [{}] {}: ", created, meta.target(), meta.level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// File record format with a local calendar timestamp
pub struct FileFormat;

impl<S, N> FormatEvent<S, N> for FileFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} [{}] {}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    /// Collects formatted output for assertions
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Capture {
            self.clone()
        }
    }

    fn capture_with<F>(format: F, emit: impl FnOnce()) -> String
    where
        F: FormatEvent<tracing_subscriber::Registry, tracing_subscriber::fmt::format::DefaultFields>
            + Send
            + Sync
            + 'static,
    {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(capture.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, emit);
        capture.contents()
    }

    #[test]
    fn test_console_format_shape() {
        let out = capture_with(ConsoleFormat, || {
            tracing::info!(target: "app.core", "starting up");
        });
        assert!(out.contains("[app.core] INFO: starting up"), "got: {out}");
        // Leading token is fractional epoch seconds
        let ts = out.split_whitespace().next().unwrap();
        assert!(ts.contains('.'));
        assert!(ts.parse::<f64>().is_ok(), "timestamp not numeric: {ts}");
    }

    #[test]
    fn test_file_format_shape() {
        let out = capture_with(FileFormat, || {
            tracing::warn!(target: "app.sync", "disk nearly full");
        });
        assert!(out.contains("[app.sync] WARN: disk nearly full"), "got: {out}");
        // Leading token is a local calendar date
        let date = out.split_whitespace().next().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_level_rendering_is_uppercase() {
        let out = capture_with(ConsoleFormat, || {
            tracing::error!(target: "app", "boom");
        });
        assert!(out.contains("ERROR: boom"));
    }
}
