//! Tracing configuration for the topbar-demo binary.
//!
//! Sets up the tracing subscriber with a formatter that drops messages
//! matching the configured suppressed patterns (noisy webview events).
//! Events go to the configured log file, falling back to stderr when the
//! file cannot be created.
//!
//! Must be initialized BEFORE Dioxus launch to prevent dioxus-logger from
//! setting its own subscriber.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use topbar_dioxus::config::LoggingConfig;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Event formatter that drops messages containing a suppressed pattern.
struct FilteringFormatter {
    inner: fmt::format::Format,
    suppressed_patterns: Vec<String>,
}

impl FilteringFormatter {
    fn new(suppressed_patterns: Vec<String>) -> Self {
        Self {
            inner: fmt::format::Format::default(),
            suppressed_patterns,
        }
    }

    fn is_suppressed(&self, message: &str) -> bool {
        self.suppressed_patterns
            .iter()
            .any(|pattern| message.contains(pattern.as_str()))
    }
}

impl<S, N> FormatEvent<S, N> for FilteringFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut message_buf = String::new();
        self.inner
            .format_event(ctx, Writer::new(&mut message_buf), event)?;

        if self.is_suppressed(&message_buf) {
            Ok(())
        } else {
            write!(writer, "{message_buf}")
        }
    }
}

/// Where formatted events end up.
#[derive(Debug)]
enum LogOutput {
    File(PathBuf, File),
    Stderr,
}

impl LogOutput {
    /// The configured log file, or stderr when none is set or it cannot be created.
    fn from_config(config: &LoggingConfig) -> Self {
        config
            .log_file
            .as_ref()
            .and_then(|path| open_log_file(path).map(|file| Self::File(path.clone(), file)))
            .unwrap_or(Self::Stderr)
    }

    fn uses_stderr(&self) -> bool {
        matches!(self, Self::Stderr)
    }

    fn into_writer(self) -> BoxMakeWriter {
        match self {
            Self::File(_, file) => BoxMakeWriter::new(Mutex::new(file)),
            Self::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: cannot write log file {}: {err}", path.display());
            None
        }
    }
}

/// Initialize the tracing subscriber from `LoggingConfig`.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let output = LogOutput::from_config(config);
    let log_path = match &output {
        LogOutput::File(path, _) => Some(path.clone()),
        LogOutput::Stderr => None,
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(output.uses_stderr())
        .with_writer(output.into_writer())
        .event_format(FilteringFormatter::new(config.suppressed_patterns.clone()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    if let Some(path) = log_path {
        eprintln!("Logging to {}", path.display());
    }
}
