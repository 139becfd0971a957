//! crates/logging-sink/src/memory.rs
//! In-memory backend for assertions in tests.

use std::sync::{Mutex, PoisonError};

use crate::backend::Backend;
use crate::caller::Caller;
use crate::fields::Fields;
use crate::record::Record;
use crate::value::Value;
use crate::verbosity::{Level, Severity, Verbosity};

/// Owned copy of a record captured by [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    /// Severity written on the wire.
    pub severity: Severity,
    /// Dotted logger name.
    pub logger: Option<String>,
    /// Resolved call site.
    pub caller: Caller,
    /// Constant message.
    pub message: String,
    /// Context fields followed by call fields, in wire order.
    pub fields: Fields,
}

impl CapturedRecord {
    /// First value stored under `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.key() == key)
            .map(|field| field.value())
    }

    /// Keys in wire order, duplicates included.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().collect()
    }
}

impl From<&Record<'_>> for CapturedRecord {
    fn from(record: &Record<'_>) -> Self {
        Self {
            severity: record.severity,
            logger: record.logger.map(str::to_owned),
            caller: record.caller.clone(),
            message: record.message.to_owned(),
            fields: record.all_fields().cloned().collect(),
        }
    }
}

/// A call observed by [`MemoryBackend`], in arrival order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemoryEvent {
    /// A record was written.
    Write,
    /// The backend was flushed.
    Flush,
}

/// Backend that keeps every record in memory.
///
/// Lazy values are captured unrendered; rendering them is up to the test.
/// Writes and flushes are also logged in order, so tests can check that a
/// flush followed the records it was meant to cover.
#[derive(Debug)]
pub struct MemoryBackend {
    level: Level,
    records: Mutex<Vec<CapturedRecord>>,
    events: Mutex<Vec<MemoryEvent>>,
}

impl MemoryBackend {
    /// Creates a backend that lets every level through.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(Level::All)
    }

    /// Creates a backend gated at `level`.
    #[must_use]
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the captured records.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the captured records.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Every write and flush seen so far, oldest first. Not cleared by
    /// [`take`](Self::take).
    #[must_use]
    pub fn events(&self) -> Vec<MemoryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of [`flush`](Backend::flush) calls observed.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == MemoryEvent::Flush)
            .count()
    }

    fn log(&self, event: MemoryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn enabled(&self, verbosity: Verbosity) -> bool {
        self.level.enables(verbosity)
    }

    fn write(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRecord::from(record));
        self.log(MemoryEvent::Write);
    }

    fn flush(&self) {
        self.log(MemoryEvent::Flush);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;

    #[test]
    fn captures_fields_in_wire_order() {
        let backend = MemoryBackend::new();
        let caller = Caller::new("src/lib.rs", 9, None);
        let context = kv!["hi" => 42];
        let fields = kv!["panda" => 2];
        backend.write(&Record {
            severity: Severity::Info,
            logger: Some("svc"),
            caller: &caller,
            message: "m",
            context: &context,
            fields: &fields,
        });

        let records = backend.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keys(), ["hi", "panda"]);
        assert_eq!(records[0].field("panda"), Some(&Value::I64(2)));
        assert_eq!(records[0].logger.as_deref(), Some("svc"));
        assert!(backend.records().is_empty());
    }

    #[test]
    fn counts_flushes() {
        let backend = MemoryBackend::with_level(Level::Info);
        assert!(backend.enabled(Verbosity::INFO));
        assert!(!backend.enabled(Verbosity::DEBUG));
        backend.flush();
        backend.flush();
        assert_eq!(backend.flush_count(), 2);
    }

    #[test]
    fn logs_writes_and_flushes_in_order() {
        let backend = MemoryBackend::new();
        let caller = Caller::new("src/lib.rs", 1, None);
        let empty = Fields::new();
        let record = Record {
            severity: Severity::Error,
            logger: None,
            caller: &caller,
            message: "m",
            context: &empty,
            fields: &empty,
        };
        backend.flush();
        backend.write(&record);
        backend.flush();
        backend.take();

        assert_eq!(
            backend.events(),
            [MemoryEvent::Flush, MemoryEvent::Write, MemoryEvent::Flush]
        );
    }
}
