//! crates/logging-sink/src/global.rs
//! Process-wide sink state.
//!
//! A single [`Sink`] may be installed for the whole process. Until one is,
//! [`handle`] hands out loggers writing JSON to standard error at
//! [`Level::Warning`](crate::Level::Warning). Every call to [`handle`] reads
//! the state afresh, so installing a sink affects loggers that were created
//! before the installation.

use std::fmt;
use std::io;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::backend::{Backend, WriterBackend};
use crate::caller::{BacktraceResolver, CallerResolver};
use crate::config::SinkConfig;
use crate::error::SinkError;
use crate::raw::RawLogger;

/// A backend paired with the resolver used for its records.
#[derive(Clone)]
pub struct Sink {
    /// Record destination.
    pub backend: Arc<dyn Backend>,
    /// Caller resolution strategy.
    pub resolver: Arc<dyn CallerResolver>,
}

impl Sink {
    /// Pairs `backend` with a [`BacktraceResolver`].
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            resolver: Arc::new(BacktraceResolver),
        }
    }

    /// Replaces the resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builds a sink from configuration.
    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        Ok(Self::new(Arc::new(config.build()?)))
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

static INSTALLED: RwLock<Option<Sink>> = RwLock::new(None);

static FALLBACK: LazyLock<Sink> =
    LazyLock::new(|| Sink::new(Arc::new(WriterBackend::new(io::stderr()))));

/// Builds a sink from `config` and installs it.
pub fn install(config: &SinkConfig) -> Result<(), SinkError> {
    install_sink(Sink::from_config(config)?);
    Ok(())
}

/// Installs `sink`, flushing and returning the previously installed one.
pub fn install_sink(sink: Sink) -> Option<Sink> {
    let previous = INSTALLED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(sink);
    if let Some(previous) = &previous {
        previous.backend.flush();
    }
    previous
}

/// Installs `backend` with the default resolver.
pub fn install_backend(backend: Arc<dyn Backend>) -> Option<Sink> {
    install_sink(Sink::new(backend))
}

/// Removes the installed sink, flushing and returning it.
pub fn uninstall() -> Option<Sink> {
    let previous = INSTALLED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(previous) = &previous {
        previous.backend.flush();
    }
    previous
}

/// The installed sink, or the standard error fallback.
#[must_use]
pub fn current() -> Sink {
    INSTALLED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(|| FALLBACK.clone())
}

/// A fresh raw logger reflecting the current configuration.
#[must_use]
pub fn handle() -> RawLogger {
    RawLogger::from_sink(&current())
}

/// Flushes the current sink.
pub fn flush() {
    current().backend.flush();
}
