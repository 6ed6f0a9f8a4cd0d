//! Tracing subscriber setup for the userdata binary and for embedders.
//!
//! The subscriber is layered:
//! 1. **Base Layer**: `EnvFilter`, so `RUST_LOG` overrides the configured level
//! 2. **Format Layer**: `CompactLevelFormatter`, writing to stdout or stderr
//! 3. **Counter Layer**: `DiagnosticCounter`, returned to the caller
//!
//! ## Output Destination
//!
//! `process` prints JSON on stdout, so the binary defaults to stderr. Choose
//! stdout only when nothing machine-readable is written there.
//!
//! ```rust,no_run
//! use userdata_processor::{init_logging, config::LoggingConfig};
//!
//! let counter = init_logging(&LoggingConfig::default()).expect("subscriber already set");
//! tracing::info!("ready");
//! assert!(counter.total_count() >= 1);
//! ```

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::log_checker::DiagnosticCounter;

/// Omits the INFO prefix and adds target plus file:line for ERROR and WARN
pub struct CompactLevelFormatter;

impl<S, N> FormatEvent<S, N> for CompactLevelFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = metadata.level();

        if *level != Level::INFO {
            write!(writer, "{}", level)?;

            if matches!(*level, Level::ERROR | Level::WARN) {
                write!(writer, " {}", metadata.target())?;
                if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                    write!(writer, " {}:{}", file, line)?;
                }
            }

            write!(writer, ": ")?;
        }

        if let Some(scope) = ctx.event_scope() {
            let names: Vec<_> = scope.from_root().map(|span| span.name()).collect();
            if !names.is_empty() {
                write!(writer, "{} ", names.join(":"))?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Build the env filter, falling back to `default_level` when RUST_LOG is unset or invalid
pub fn create_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn make_writer(output: &str) -> BoxMakeWriter {
    match output {
        "stdout" => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    }
}

/// Install the global subscriber and return a handle to its event counter
pub fn init_logging(config: &LoggingConfig) -> Result<DiagnosticCounter> {
    let counter = DiagnosticCounter::new();

    tracing_subscriber::registry()
        .with(create_env_filter(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer(&config.output))
                .event_format(CompactLevelFormatter),
        )
        .with(counter.clone())
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(counter)
}
