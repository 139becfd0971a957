//! crates/logging/src/logger.rs
//! The depth-tracked logger value.

use std::error::Error;
use std::sync::Arc;

use logging_sink::{CallSite, Fields, Severity, Verbosity};

use crate::decoration::{Decoration, replay, root};

/// Key of the marker field prepended to warning records.
pub const WARNING_KEY: &str = "warning";

/// Immutable logger handle enforcing the level convention.
///
/// Every method attributes its record to the code that called it. The
/// methods are `#[track_caller]`, so an application helper that wraps them
/// only needs `#[track_caller]` itself to be skipped as well.
///
/// Derivations ([`with_values`](Self::with_values),
/// [`with_name`](Self::with_name)) return new handles; a handle never changes
/// after construction and can be shared freely between threads.
///
/// | Method | Written when | Added fields |
/// |---|---|---|
/// | [`error`](Self::error) | always | `error` after the call fields |
/// | [`warning`](Self::warning) | always | `warning=true` first |
/// | [`warning_err`](Self::warning_err) | always | `warning=true`, `error` first |
/// | [`info`](Self::info) | level info and up | |
/// | [`info_err`](Self::info_err) | level info and up | `error` first |
/// | [`debug`](Self::debug) | level debug and up | |
/// | [`debug_err`](Self::debug_err) | level debug and up | `error` first |
/// | [`trace`](Self::trace) | level trace and up | |
/// | [`trace_err`](Self::trace_err) | level trace and up | `error` first |
/// | [`all`](Self::all) | level all | |
/// | [`always`](Self::always) | always | |
#[derive(Clone, Debug, Default)]
pub struct Logger {
    decorations: Arc<Vec<Decoration>>,
    depth: i32,
    tracked: i32,
}

impl Logger {
    /// Creates a logger with no decorations writing to the process-wide sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` untracked frames between the emit and the call site.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn with_depth(&self, delta: i32) -> Self {
        Self {
            decorations: Arc::clone(&self.decorations),
            depth: self.depth + delta,
            tracked: self.tracked,
        }
    }

    /// Adds `delta` frames that are `#[track_caller]` and therefore already
    /// folded into the captured location.
    pub(crate) fn with_tracked_depth(&self, delta: i32) -> Self {
        Self {
            decorations: Arc::clone(&self.decorations),
            depth: self.depth + delta,
            tracked: self.tracked + delta,
        }
    }

    pub(crate) fn with_decoration(&self, decoration: Decoration) -> Self {
        let mut decorations = Vec::with_capacity(self.decorations.len() + 1);
        decorations.extend(self.decorations.iter().cloned());
        decorations.push(decoration);
        Self {
            decorations: Arc::new(decorations),
            depth: self.depth,
            tracked: self.tracked,
        }
    }

    /// Returns a logger that writes `fields` on every record.
    ///
    /// Fields from earlier calls come first; call fields always come after
    /// all accumulated ones. Duplicate keys are kept. Empty `fields` return
    /// an equivalent handle.
    #[must_use]
    pub fn with_values(&self, fields: Fields) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        self.with_decoration(Decoration::Fields(fields))
    }

    /// Returns a logger with `name` appended to its name, joined with `.`.
    ///
    /// An empty `name` returns an equivalent handle.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.with_decoration(Decoration::Name(name.to_owned()))
    }

    /// The dotted name records are written with, if any.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        let mut start = 0;
        let mut name: Option<String> = None;
        for (index, decoration) in self.decorations.iter().enumerate().rev() {
            if let Decoration::Replace(raw) = decoration {
                start = index + 1;
                name = raw.name().map(str::to_owned);
                break;
            }
        }
        for decoration in &self.decorations[start..] {
            if let Decoration::Name(segment) = decoration {
                name = Some(match name {
                    Some(prefix) => format!("{prefix}.{segment}"),
                    None => segment.clone(),
                });
            }
        }
        name
    }

    /// Frames between the emit and the call site, not counting the method itself.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// The recorded derivation steps, oldest first.
    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Logs an error. Always written, with `error` after every other field.
    ///
    /// An absent `err` is written as `null`.
    #[track_caller]
    pub fn error(&self, message: &str, err: Option<&dyn Error>, fields: Fields) {
        let site = self.call_site();
        let (raw, rest) = root(&self.decorations);
        replay(raw, rest).emit_error(&site, err, message, fields);
    }

    /// Logs a warning. Always written, at the `info` wire level, with
    /// `warning=true` first.
    #[track_caller]
    pub fn warning(&self, message: &str, fields: Fields) {
        self.gated_as(Verbosity::WARNING, Severity::Warning, message, fields, |call| {
            call.push(WARNING_KEY, true);
        });
    }

    /// Logs a warning carrying an error, as `warning=true, error=..` first.
    #[track_caller]
    pub fn warning_err(&self, message: &str, err: Option<&dyn Error>, fields: Fields) {
        self.gated_as(Verbosity::WARNING, Severity::Warning, message, fields, |call| {
            call.push(WARNING_KEY, true);
            push_error(call, err);
        });
    }

    /// Logs "nice to know" information.
    #[track_caller]
    pub fn info(&self, message: &str, fields: Fields) {
        self.gated(Verbosity::INFO, message, fields, |_| {});
    }

    /// Logs information carrying an error, as `error=..` first.
    #[track_caller]
    pub fn info_err(&self, message: &str, err: Option<&dyn Error>, fields: Fields) {
        self.gated(Verbosity::INFO, message, fields, |call| push_error(call, err));
    }

    /// Logs developer oriented details.
    #[track_caller]
    pub fn debug(&self, message: &str, fields: Fields) {
        self.gated(Verbosity::DEBUG, message, fields, |_| {});
    }

    /// Logs details carrying an error, as `error=..` first.
    #[track_caller]
    pub fn debug_err(&self, message: &str, err: Option<&dyn Error>, fields: Fields) {
        self.gated(Verbosity::DEBUG, message, fields, |call| push_error(call, err));
    }

    /// Logs timing and internal state.
    #[track_caller]
    pub fn trace(&self, message: &str, fields: Fields) {
        self.gated(Verbosity::TRACE, message, fields, |_| {});
    }

    /// Logs internal state carrying an error, as `error=..` first.
    #[track_caller]
    pub fn trace_err(&self, message: &str, err: Option<&dyn Error>, fields: Fields) {
        self.gated(Verbosity::TRACE, message, fields, |call| push_error(call, err));
    }

    /// Logs everything, including security sensitive request data.
    #[track_caller]
    pub fn all(&self, message: &str, fields: Fields) {
        self.gated(Verbosity::ALL, message, fields, |_| {});
    }

    /// Logs unconditionally at the `info` wire level, without a warning marker.
    #[track_caller]
    pub fn always(&self, message: &str, fields: Fields) {
        self.gated(Verbosity::WARNING, message, fields, |_| {});
    }

    #[track_caller]
    fn gated<F>(&self, verbosity: Verbosity, message: &str, fields: Fields, prefix: F)
    where
        F: FnOnce(&mut Fields),
    {
        let severity = Severity::for_verbosity(verbosity);
        self.gated_as(verbosity, severity, message, fields, prefix);
    }

    #[track_caller]
    fn gated_as<F>(
        &self,
        verbosity: Verbosity,
        severity: Severity,
        message: &str,
        fields: Fields,
        prefix: F,
    ) where
        F: FnOnce(&mut Fields),
    {
        let site = self.call_site();
        let (raw, rest) = root(&self.decorations);
        if !raw.enabled(verbosity) {
            return;
        }
        let mut call = Fields::with_capacity(fields.len() + 2);
        prefix(&mut call);
        call.extend(fields);
        replay(raw, rest).emit_as(verbosity, severity, &site, message, call);
    }

    /// The method the application called is one more frame.
    #[track_caller]
    fn call_site(&self) -> CallSite {
        CallSite::here(self.depth + 1, self.tracked + 1)
    }
}

fn push_error(call: &mut Fields, err: Option<&dyn Error>) {
    call.push(logging_sink::ERROR_KEY, logging_sink::Value::from_error(err));
}
