//! crates/logging-sink/src/tracing_bridge.rs
//! Bridge from the process-wide sink into the `tracing` ecosystem.
//!
//! [`TracingBackend`] forwards every record as a `tracing` event under the
//! [`TARGET`] target, so applications that already run a `tracing`
//! subscriber receive facade records alongside their own spans and events.
//!
//! | Record | `tracing` level |
//! |---|---|
//! | error | `ERROR` |
//! | warning | `WARN` |
//! | info | `INFO` |
//! | debug | `DEBUG` |
//! | trace, all | `TRACE` |
//!
//! The record's logger name, caller and fields travel as the `logger`,
//! `caller` and `fields` event fields; `fields` is rendered as `key=value`
//! pairs in wire order.

use std::fmt;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;

use crate::backend::Backend;
use crate::fields::Field;
use crate::global::{Sink, install_sink};
use crate::record::Record;
use crate::value::Value;
use crate::verbosity::{Level, Severity, Verbosity};

/// Target of every forwarded event.
pub const TARGET: &str = "convlog";

/// Backend that re-emits records as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingBackend;

impl TracingBackend {
    const fn tracing_level(verbosity: Verbosity) -> tracing::Level {
        match Severity::for_verbosity(verbosity) {
            Severity::Error => tracing::Level::ERROR,
            Severity::Warning => tracing::Level::WARN,
            Severity::Info => tracing::Level::INFO,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Trace | Severity::All => tracing::Level::TRACE,
        }
    }
}

impl Backend for TracingBackend {
    fn enabled(&self, verbosity: Verbosity) -> bool {
        verbosity == Verbosity::WARNING || Self::tracing_level(verbosity) <= LevelFilter::current()
    }

    fn write(&self, record: &Record<'_>) {
        let logger = record.logger.unwrap_or_default();
        let caller = record.caller;
        let message = record.message;
        let fields = RenderedFields(record);

        macro_rules! forward {
            ($level:expr) => {
                tracing::event!(
                    target: TARGET,
                    $level,
                    logger,
                    caller = %caller,
                    fields = %fields,
                    "{message}"
                )
            };
        }

        match record.severity {
            Severity::Error => forward!(tracing::Level::ERROR),
            Severity::Warning => forward!(tracing::Level::WARN),
            Severity::Info => forward!(tracing::Level::INFO),
            Severity::Debug => forward!(tracing::Level::DEBUG),
            Severity::Trace | Severity::All => forward!(tracing::Level::TRACE),
        }
    }

    fn flush(&self) {}
}

struct RenderedFields<'r, 'a>(&'r Record<'a>);

impl fmt::Display for RenderedFields<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.0.all_fields().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write_field(f, field)?;
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &Field) -> fmt::Result {
    match field.value() {
        Value::Str(_) | Value::Display(_) | Value::Debug(_) => {
            write!(f, "{}={:?}", field.key(), field.value().render())
        }
        value => write!(f, "{}={}", field.key(), value.render()),
    }
}

/// Routes the process-wide sink into `tracing`.
pub fn install_tracing() {
    install_sink(Sink::new(Arc::new(TracingBackend)));
}

/// Installs a `tracing-subscriber` fmt subscriber at `level` and routes the
/// process-wide sink into it.
///
/// A global subscriber that is already installed is kept.
pub fn init_tracing(level: Level) {
    let max_level = match level {
        Level::Warning => LevelFilter::WARN,
        Level::Info => LevelFilter::INFO,
        Level::Debug => LevelFilter::DEBUG,
        Level::Trace | Level::All => LevelFilter::TRACE,
    };
    // Err only means another subscriber won the race; events still flow to it.
    let _ = tracing_subscriber::fmt().with_max_level(max_level).try_init();
    install_tracing();
}
