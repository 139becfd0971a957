//! crates/logging/src/testing.rs
//! Loggers for asserting on emitted records.
//!
//! The loggers built here go through exactly the same depth arithmetic and
//! level gating as production handles; only the raw logger differs. They are
//! bound to their own backend and never touch the process-wide sink, so tests
//! using them can run in parallel.

use std::sync::Arc;

use logging_sink::{
    BacktraceResolver, FixedClock, Level, MemoryBackend, RawLogger, SharedBuffer, WriterBackend,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::decoration::Decoration;
use crate::logger::Logger;

/// Instant stamped on every record written by [`test_logger`].
pub const TEST_TIME: OffsetDateTime = datetime!(2099-08-08 13:57:36.123456 UTC);

/// A logger writing JSON lines into `buffer` at [`Level::All`], stamped with [`TEST_TIME`].
///
/// ```
/// use logging::testing::{scrub_lines, test_logger};
/// use logging::{SharedBuffer, kv};
///
/// let buffer = SharedBuffer::new();
/// test_logger(&buffer).with_name("yoyo").trace("t", kv!["panda" => 2]);
///
/// assert!(scrub_lines(&buffer.contents()).starts_with(
///     r#"{"level":"trace","timestamp":"2099-08-08T13:57:36.123456Z","logger":"yoyo","caller":"#
/// ));
/// ```
#[must_use]
pub fn test_logger(buffer: &SharedBuffer) -> Logger {
    test_logger_at(buffer, Level::All)
}

/// Like [`test_logger`], gated at `level`.
#[must_use]
pub fn test_logger_at(buffer: &SharedBuffer, level: Level) -> Logger {
    let backend = WriterBackend::new(buffer.clone())
        .with_level(level)
        .with_clock(FixedClock::new(TEST_TIME));
    bound_to(RawLogger::new(Arc::new(backend), Arc::new(BacktraceResolver)))
}

/// A logger capturing records into `backend`, gated by the backend's level.
#[must_use]
pub fn memory_logger(backend: &Arc<MemoryBackend>) -> Logger {
    bound_to(RawLogger::new(backend.clone(), Arc::new(BacktraceResolver)))
}

fn bound_to(raw: RawLogger) -> Logger {
    Logger::new().with_decoration(Decoration::Replace(raw))
}

/// Replaces every `.rs:<digits>` with `.rs:<line>`, so fixtures survive edits
/// above the logging calls.
#[must_use]
pub fn scrub_lines(output: &str) -> String {
    const MARKER: &str = ".rs:";

    let mut scrubbed = String::with_capacity(output.len());
    let mut rest = output;
    while let Some(index) = rest.find(MARKER) {
        let (head, tail) = rest.split_at(index + MARKER.len());
        scrubbed.push_str(head);
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            scrubbed.push_str("<line>");
        }
        rest = &tail[digits..];
    }
    scrubbed.push_str(rest);
    scrubbed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_replaces_only_line_numbers() {
        assert_eq!(
            scrub_lines(r#""caller":"logger/tests.rs:120$x","n":"a.rs:b""#),
            r#""caller":"logger/tests.rs:<line>$x","n":"a.rs:b""#
        );
        assert_eq!(scrub_lines("no callers"), "no callers");
        assert_eq!(scrub_lines("a.rs:1 b.rs:22\n"), "a.rs:<line> b.rs:<line>\n");
    }

    #[test]
    fn test_loggers_are_unnamed_and_at_depth_zero() {
        let buffer = SharedBuffer::new();
        let logger = test_logger(&buffer);
        assert_eq!(logger.depth(), 0);
        assert_eq!(logger.name(), None);
        assert_eq!(logger.decorations().len(), 1);
    }
}
