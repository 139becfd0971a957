//! crates/logging-sink/src/record.rs
//! Borrowed view of one log record as handed to a [`Backend`](crate::Backend).

use crate::caller::Caller;
use crate::fields::{Field, Fields};
use crate::verbosity::Severity;

/// A single record on its way to a backend.
///
/// Fields are split in two groups that are always written in this order:
/// `context` holds everything accumulated through `with_fields` on the raw
/// logger, `fields` holds the call-specific pairs (auto fields first).
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// Severity written on the wire.
    pub severity: Severity,
    /// Dotted logger name, when any name was added.
    pub logger: Option<&'a str>,
    /// Resolved call site.
    pub caller: &'a Caller,
    /// Constant message.
    pub message: &'a str,
    /// Accumulated fields.
    pub context: &'a Fields,
    /// Call-specific fields.
    pub fields: &'a Fields,
}

impl<'a> Record<'a> {
    /// Iterates over context fields followed by call fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &'a Field> + 'a {
        self.context.iter().chain(self.fields.iter())
    }
}
