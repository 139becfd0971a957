//! crates/logging-sink/src/clock.rs
//! Time sources for record timestamps.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// RFC 3339 UTC timestamp with microsecond precision.
pub(crate) const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero]T[hour padding:zero]:[minute padding:zero]:[second padding:zero].[subsecond digits:6]Z"
);

/// Supplies the instant stamped onto each record.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a single instant, for reproducible output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Formats `instant` in UTC as `2099-08-08T13:57:36.123456Z`.
#[must_use]
pub fn format_timestamp(instant: OffsetDateTime) -> String {
    let utc = instant.to_offset(UtcOffset::UTC);
    utc.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn timestamp_has_microseconds_and_zulu_suffix() {
        let instant = datetime!(2099-08-08 13:57:36.123456 UTC);
        assert_eq!(format_timestamp(instant), "2099-08-08T13:57:36.123456Z");
    }

    #[test]
    fn timestamp_is_normalised_to_utc() {
        let instant = datetime!(2024-01-02 03:04:05.5 +02:00);
        assert_eq!(format_timestamp(instant), "2024-01-02T01:04:05.500000Z");
    }

    #[test]
    fn fixed_clock_never_moves() {
        let instant = datetime!(2099-08-08 13:57:36.123456 UTC);
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn system_clock_reports_utc() {
        assert_eq!(SystemClock.now().offset(), UtcOffset::UTC);
    }
}
