//! crates/logging-sink/src/backend.rs
//! Record destinations.

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::clock::{Clock, SystemClock, format_timestamp};
use crate::encode::Format;
use crate::record::Record;
use crate::verbosity::{Level, Verbosity};

/// Destination for records.
///
/// Implementations never report failures back to the caller: a record that
/// cannot be written is dropped.
pub trait Backend: Send + Sync {
    /// Returns `true` when gated records at `verbosity` should be built and written.
    fn enabled(&self, verbosity: Verbosity) -> bool;

    /// Writes one record. Called for gated records that passed
    /// [`enabled`](Self::enabled) and for unconditional records.
    fn write(&self, record: &Record<'_>);

    /// Flushes buffered output.
    fn flush(&self);
}

/// Backend that encodes records onto an [`io::Write`](std::io::Write) target.
pub struct WriterBackend {
    level: Level,
    format: Format,
    clock: Box<dyn Clock>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl WriterBackend {
    /// Creates a JSON backend at [`Level::Warning`] stamping records with the system clock.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    /// Like [`new`](Self::new) for an already boxed writer.
    #[must_use]
    pub fn from_boxed(writer: Box<dyn Write + Send>) -> Self {
        Self {
            level: Level::default(),
            format: Format::default(),
            clock: Box::new(SystemClock),
            writer: Mutex::new(writer),
        }
    }

    /// Sets the minimum level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the encoding.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Replaces the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The configured minimum level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The configured encoding.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }
}

impl fmt::Debug for WriterBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterBackend")
            .field("level", &self.level)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Backend for WriterBackend {
    fn enabled(&self, verbosity: Verbosity) -> bool {
        self.level.enables(verbosity)
    }

    fn write(&self, record: &Record<'_>) {
        let timestamp = format_timestamp(self.clock.now());
        let mut line = Vec::with_capacity(256);
        if self.format.encode(record, &timestamp, &mut line).is_err() {
            return;
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // Best effort: a full disk or closed pipe must not reach the caller.
        let _ = writer.write_all(&line);
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}
