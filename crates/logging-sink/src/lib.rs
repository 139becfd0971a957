#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` is the structured logging backend behind the `logging`
//! facade. It owns everything below the facade's level convention: typed
//! field values, the verbosity numbering, caller resolution, line encoders,
//! output destinations and the process-wide sink that every facade logger
//! obtains its [`RawLogger`] from.
//!
//! # Design
//!
//! - [`Fields`] is an ordered list of typed key/value pairs. Order is kept
//!   and duplicate keys are never merged.
//! - A [`RawLogger`] accumulates context fields and a dotted name, and
//!   writes [`Record`]s to a [`Backend`]. Gated writes check
//!   [`RawLogger::enabled`]; [`RawLogger::emit_error`] is unconditional.
//! - Records carry a [`CallSite`] captured with `#[track_caller]`; a
//!   [`CallerResolver`] turns it into the [`Caller`] written on the wire.
//! - [`handle`] reads the installed [`Sink`] on every call, so loggers pick up
//!   configuration changes made after they were created.
//!
//! # Invariants
//!
//! - Writing a record never returns an error to the caller.
//! - Verbosity numbers are `warning = 0`, `info = 2`, `debug = 3`,
//!   `trace = 4`, `all = 5`; warning and info share the `info` wire level.
//! - Wire order is `level`, `timestamp`, `logger`, `caller`, `message`,
//!   context fields, call fields.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging_sink::{CallSite, Level, RawLogger, SharedBuffer, TrackedResolver, Verbosity, WriterBackend, kv};
//!
//! let buffer = SharedBuffer::new();
//! let backend = WriterBackend::new(buffer.clone()).with_level(Level::Info);
//! let logger = RawLogger::new(Arc::new(backend), Arc::new(TrackedResolver))
//!     .with_name("db")
//!     .with_fields(&kv!["shard" => 3]);
//!
//! logger.emit(Verbosity::INFO, &CallSite::here(1, 1), "connected", kv!["attempt" => 1]);
//! logger.emit(Verbosity::DEBUG, &CallSite::here(1, 1), "handshake", kv![]);
//!
//! let lines = buffer.lines();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].contains(r#""logger":"db""#));
//! assert!(lines[0].ends_with(r#""message":"connected","shard":3,"attempt":1}"#));
//! ```
//!
//! # See also
//!
//! - `logging` crate for the level convention and caller-depth arithmetic.

mod backend;
mod caller;
mod clock;
mod config;
mod encode;
mod error;
mod fields;
mod global;
mod memory;
mod output;
mod raw;
mod record;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod value;
mod verbosity;

pub use backend::{Backend, WriterBackend};
pub use caller::{BacktraceResolver, CallSite, Caller, CallerResolver, TrackedResolver};
pub use clock::{Clock, FixedClock, SystemClock, format_timestamp};
pub use config::{FORMAT_VAR, LEVEL_VAR, OUTPUT_VAR, SinkConfig};
pub use encode::{Format, ParseFormatError};
pub use error::SinkError;
pub use fields::{Field, Fields};
pub use global::{Sink, current, flush, handle, install, install_backend, install_sink, uninstall};
pub use memory::{CapturedRecord, MemoryBackend, MemoryEvent};
pub use output::{Output, SharedBuffer};
pub use raw::{ERROR_KEY, RawLogger};
pub use record::Record;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{TARGET, TracingBackend, init_tracing, install_tracing};
pub use value::{UNRENDERABLE, Value};
pub use verbosity::{Level, ParseLevelError, Severity, Verbosity};
