//! crates/logging-sink/src/raw.rs
//! The leveled logger the facade replays its decorations against.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::backend::Backend;
use crate::caller::{CallSite, CallerResolver};
use crate::fields::Fields;
use crate::global::Sink;
use crate::record::Record;
use crate::value::Value;
use crate::verbosity::{Severity, Verbosity};

/// Key under which errors are written.
pub const ERROR_KEY: &str = "error";

/// A leveled logger bound to one backend and caller resolver.
///
/// Values are cheap to clone and derive: [`with_fields`](Self::with_fields)
/// and [`with_name`](Self::with_name) return new loggers and leave the
/// receiver untouched.
#[derive(Clone)]
pub struct RawLogger {
    backend: Arc<dyn Backend>,
    resolver: Arc<dyn CallerResolver>,
    name: Option<String>,
    context: Fields,
}

impl RawLogger {
    /// Creates a logger with no name and no fields.
    pub fn new(backend: Arc<dyn Backend>, resolver: Arc<dyn CallerResolver>) -> Self {
        Self {
            backend,
            resolver,
            name: None,
            context: Fields::new(),
        }
    }

    /// Creates a logger writing to `sink`.
    #[must_use]
    pub fn from_sink(sink: &Sink) -> Self {
        Self::new(Arc::clone(&sink.backend), Arc::clone(&sink.resolver))
    }

    /// Returns a logger that writes `fields` after the ones already accumulated.
    #[must_use]
    pub fn with_fields(mut self, fields: &Fields) -> Self {
        self.context.extend(fields.clone());
        self
    }

    /// Returns a logger whose name has `name` appended, joined with `.`.
    ///
    /// An empty `name` leaves the logger unchanged.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        if name.is_empty() {
            return self;
        }
        self.name = Some(match self.name.take() {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_owned(),
        });
        self
    }

    /// The dotted name, when any name was added.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields accumulated through [`with_fields`](Self::with_fields).
    #[must_use]
    pub const fn context(&self) -> &Fields {
        &self.context
    }

    /// Returns `true` when records at `verbosity` are written.
    #[must_use]
    pub fn enabled(&self, verbosity: Verbosity) -> bool {
        self.backend.enabled(verbosity)
    }

    /// Writes a gated record. Nothing happens when `verbosity` is disabled.
    pub fn emit(&self, verbosity: Verbosity, site: &CallSite, message: &str, fields: Fields) {
        self.emit_as(
            verbosity,
            Severity::for_verbosity(verbosity),
            site,
            message,
            fields,
        );
    }

    /// Like [`emit`](Self::emit), recording `severity` instead of the one
    /// derived from `verbosity`.
    pub fn emit_as(
        &self,
        verbosity: Verbosity,
        severity: Severity,
        site: &CallSite,
        message: &str,
        fields: Fields,
    ) {
        if !self.enabled(verbosity) {
            return;
        }
        self.write(severity, site, message, &fields);
    }

    /// Writes an error record unconditionally, with `error` after every other field.
    pub fn emit_error(
        &self,
        site: &CallSite,
        err: Option<&dyn Error>,
        message: &str,
        mut fields: Fields,
    ) {
        fields.push(ERROR_KEY, Value::from_error(err));
        self.write(Severity::Error, site, message, &fields);
    }

    /// Flushes the backend.
    pub fn flush(&self) {
        self.backend.flush();
    }

    fn write(&self, severity: Severity, site: &CallSite, message: &str, fields: &Fields) {
        let caller = self.resolver.resolve(site);
        self.backend.write(&Record {
            severity,
            logger: self.name.as_deref(),
            caller: &caller,
            message,
            context: &self.context,
            fields,
        });
    }
}

impl fmt::Debug for RawLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawLogger")
            .field("name", &self.name)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
