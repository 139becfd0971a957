//! crates/logging/src/global.rs
//! Process-wide default logger and the package-level functions.

use std::error::Error;
use std::sync::{LazyLock, PoisonError, RwLock};

use logging_sink::Fields;

use crate::logger::Logger;

/// Message of the record written by [`fatal`].
pub const FATAL_MESSAGE: &str = "unrecoverable error encountered";

/// Exit code passed to the exit hook by [`fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// The package-level functions are one tracked frame above the handle's methods.
static DEFAULT: LazyLock<Logger> = LazyLock::new(|| Logger::new().with_tracked_depth(1));

static EXIT_HOOK: RwLock<fn(i32) -> !> = RwLock::new(std::process::exit as fn(i32) -> !);

/// The process-wide logger behind the package-level functions.
///
/// Its depth accounts for the package-level function in between; call
/// [`with_values`] or [`with_name`] to derive a handle for direct use.
#[must_use]
pub fn default_logger() -> &'static Logger {
    &DEFAULT
}

/// Replaces the function [`fatal`] terminates the process with, returning the
/// previous one. Defaults to [`std::process::exit`].
pub fn set_exit_hook(hook: fn(i32) -> !) -> fn(i32) -> ! {
    let mut slot = EXIT_HOOK.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, hook)
}

/// Logs an error through the default logger. See [`Logger::error`].
#[track_caller]
pub fn error(message: &str, err: Option<&dyn Error>, fields: Fields) {
    DEFAULT.error(message, err, fields);
}

/// See [`Logger::warning`].
#[track_caller]
pub fn warning(message: &str, fields: Fields) {
    DEFAULT.warning(message, fields);
}

/// See [`Logger::warning_err`].
#[track_caller]
pub fn warning_err(message: &str, err: Option<&dyn Error>, fields: Fields) {
    DEFAULT.warning_err(message, err, fields);
}

/// See [`Logger::info`].
#[track_caller]
pub fn info(message: &str, fields: Fields) {
    DEFAULT.info(message, fields);
}

/// See [`Logger::info_err`].
#[track_caller]
pub fn info_err(message: &str, err: Option<&dyn Error>, fields: Fields) {
    DEFAULT.info_err(message, err, fields);
}

/// See [`Logger::debug`].
#[track_caller]
pub fn debug(message: &str, fields: Fields) {
    DEFAULT.debug(message, fields);
}

/// See [`Logger::debug_err`].
#[track_caller]
pub fn debug_err(message: &str, err: Option<&dyn Error>, fields: Fields) {
    DEFAULT.debug_err(message, err, fields);
}

/// See [`Logger::trace`].
#[track_caller]
pub fn trace(message: &str, fields: Fields) {
    DEFAULT.trace(message, fields);
}

/// See [`Logger::trace_err`].
#[track_caller]
pub fn trace_err(message: &str, err: Option<&dyn Error>, fields: Fields) {
    DEFAULT.trace_err(message, err, fields);
}

/// See [`Logger::all`].
#[track_caller]
pub fn all(message: &str, fields: Fields) {
    DEFAULT.all(message, fields);
}

/// See [`Logger::always`].
#[track_caller]
pub fn always(message: &str, fields: Fields) {
    DEFAULT.always(message, fields);
}

/// Derives a handle from the default logger with `fields` attached.
///
/// The returned handle is used directly by the caller, so the depth the
/// default logger reserves for package-level functions is removed first.
#[must_use]
pub fn with_values(fields: Fields) -> Logger {
    DEFAULT.with_tracked_depth(-1).with_values(fields)
}

/// Derives a named handle from the default logger. See [`with_values`].
#[must_use]
pub fn with_name(name: &str) -> Logger {
    DEFAULT.with_tracked_depth(-1).with_name(name)
}

/// Logs `err` at error severity with [`FATAL_MESSAGE`], flushes the sink and
/// terminates the process with exit code 1.
#[track_caller]
pub fn fatal(err: Option<&dyn Error>, fields: Fields) -> ! {
    DEFAULT.error(FATAL_MESSAGE, err, fields);
    logging_sink::flush();
    let exit = *EXIT_HOOK.read().unwrap_or_else(PoisonError::into_inner);
    exit(FATAL_EXIT_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_logger_reserves_one_tracked_frame() {
        assert_eq!(default_logger().depth(), 1);
        assert!(default_logger().decorations().is_empty());
    }

    #[test]
    fn package_level_derivations_are_at_depth_zero() {
        assert_eq!(with_values(logging_sink::kv!["hi" => 42]).depth(), 0);
        assert_eq!(with_name("svc").depth(), 0);
        assert_eq!(with_name("svc").name().as_deref(), Some("svc"));
    }

    #[test]
    fn empty_derivations_still_drop_the_package_frame() {
        assert_eq!(with_values(Fields::new()).depth(), 0);
        assert_eq!(with_name("").depth(), 0);
    }
}
