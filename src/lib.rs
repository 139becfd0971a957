#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `convlog` bundles the two workspace crates behind one dependency:
//!
//! - [`logging`] is the facade applications call: [`Logger`] handles, the
//!   package-level functions and [`fatal`].
//! - [`logging_sink`] holds everything below it: values and fields, caller
//!   resolution, encoders, backends and the process-wide sink.
//!
//! # Examples
//!
//! ```
//! use convlog::{SharedBuffer, kv, testing::test_logger};
//!
//! let buffer = SharedBuffer::new();
//! test_logger(&buffer).with_name("db").info("connected", kv!["pool" => 4]);
//! assert!(buffer.contents().contains(r#""logger":"db""#));
//! ```

pub use logging;
pub use logging_sink;

pub use logging::{
    Decoration, FATAL_EXIT_CODE, FATAL_MESSAGE, Field, Fields, Format, Level, Logger,
    MemoryBackend, Output, SharedBuffer, SinkConfig, SinkError, Value, WARNING_KEY, all, always,
    debug, debug_err, default_logger, error, fatal, flush, info, info_err, install,
    install_backend, install_sink, kv, set_exit_hook, testing, trace, trace_err, uninstall,
    warning, warning_err, with_name, with_values,
};
#[cfg(feature = "tracing")]
pub use logging::{init_tracing, install_tracing};
