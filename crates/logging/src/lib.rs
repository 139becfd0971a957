#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a convention-enforcing facade over the structured records of
//! [`logging_sink`]. Records always carry a constant message plus typed
//! key/value [`Fields`]; there are no formatted messages. The facade fixes a
//! small set of levels and what each is for:
//!
//! | Level | Use for | Written |
//! |---|---|---|
//! | error | failures the caller could not handle | always |
//! | warning | suspicious conditions worth a look | always |
//! | info | "nice to know" events, safe in production | at `info` and up |
//! | debug | developer oriented details | at `debug` and up |
//! | trace | timing and internal state | at `trace` and up |
//! | all | everything, including sensitive request data | at `all` |
//! | always | unconditional informational output | always |
//!
//! # Design
//!
//! A [`Logger`] is an immutable value holding a list of [`Decoration`]s and a
//! frame depth. Nothing is cached: every emit obtains a fresh raw logger from
//! the process-wide sink and replays the decorations on it, so a sink
//! installed after a handle was created is still honoured.
//!
//! Every logging method and package-level function is `#[track_caller]`, so
//! records are attributed to the application code that called them however
//! many facade layers sit in between. The depth a handle carries tells the
//! sink how many further frames belong to the facade or to wrappers; a
//! wrapper that is itself `#[track_caller]` is skipped automatically.
//!
//! # Invariants
//!
//! - Wire order is `level`, `timestamp`, `logger`, `caller`, `message`,
//!   accumulated fields, auto fields (`warning`, `error`), call fields; for
//!   [`Logger::error`] the `error` field comes last.
//! - Duplicate keys are written as many times as they were added.
//! - A gated call that is disabled builds nothing and renders no value.
//! - [`fatal`] writes one error record, flushes the sink, then exits.
//!
//! # Examples
//!
//! ```
//! use logging::testing::{scrub_lines, test_logger};
//! use logging::{SharedBuffer, kv};
//!
//! let buffer = SharedBuffer::new();
//! let logger = test_logger(&buffer).with_values(kv!["hi" => 42]);
//! logger.warning("w", kv!["panda" => 2]);
//!
//! let line = scrub_lines(&buffer.contents());
//! assert!(line.trim_end().ends_with(r#""message":"w","hi":42,"warning":true,"panda":2}"#));
//! ```
//!
//! Package-level functions log through the process-wide default logger:
//!
//! ```no_run
//! use logging::kv;
//!
//! logging::install(&logging::SinkConfig::from_env()?)?;
//! logging::info("server started", kv!["port" => 8080]);
//! logging::flush();
//! # Ok::<(), logging::SinkError>(())
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for backends, encoders and sink configuration.
//! - [`testing`] for loggers bound to in-memory buffers.

mod decoration;
mod global;
mod logger;
pub mod testing;

pub use decoration::Decoration;
pub use global::{
    FATAL_EXIT_CODE, FATAL_MESSAGE, all, always, debug, debug_err, default_logger, error, fatal,
    info, info_err, set_exit_hook, trace, trace_err, warning, warning_err, with_name, with_values,
};
pub use logger::{Logger, WARNING_KEY};

pub use logging_sink::{
    Field, Fields, Format, Level, MemoryBackend, Output, SharedBuffer, SinkConfig, SinkError,
    Value, flush, install, install_backend, install_sink, kv, uninstall,
};
#[cfg(feature = "tracing")]
pub use logging_sink::{init_tracing, install_tracing};
