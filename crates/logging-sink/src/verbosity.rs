//! crates/logging-sink/src/verbosity.rs
//! Verbosity numbering, wire severities and configured levels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Numeric verbosity threshold of a record.
///
/// A gated record is written only when its verbosity is less than or equal
/// to the maximum verbosity of the configured [`Level`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Verbosity(u8);

impl Verbosity {
    /// Warnings share the ordinary output path and can never be disabled.
    pub const WARNING: Self = Self(0);
    /// "Nice to know" information, safe to run in production.
    pub const INFO: Self = Self(2);
    /// Developer oriented details.
    pub const DEBUG: Self = Self(3);
    /// Timing and internal state.
    pub const TRACE: Self = Self(4);
    /// Everything, including security sensitive request data.
    pub const ALL: Self = Self(5);

    /// Creates a verbosity from its raw number.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Level written on the wire for a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Severity {
    /// Unconditional error records.
    Error,
    /// Warning records. Written as `info`, like every non-error record
    /// that is always enabled.
    Warning,
    /// Info and always records.
    Info,
    /// Debug records.
    Debug,
    /// Trace records.
    Trace,
    /// Records emitted at the highest verbosity.
    All,
}

impl Severity {
    /// Maps a verbosity threshold onto the severity written for it.
    #[must_use]
    pub const fn for_verbosity(verbosity: Verbosity) -> Self {
        if verbosity.0 >= Verbosity::ALL.0 {
            Self::All
        } else if verbosity.0 >= Verbosity::TRACE.0 {
            Self::Trace
        } else if verbosity.0 >= Verbosity::DEBUG.0 {
            Self::Debug
        } else {
            Self::Info
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning | Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum level a sink is configured to write.
///
/// Error and warning records are always written; each further level enables
/// one more verbosity threshold.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Only errors, warnings and always records.
    #[default]
    Warning,
    /// Adds info records.
    Info,
    /// Adds debug records.
    Debug,
    /// Adds trace records.
    Trace,
    /// Adds all records.
    All,
}

impl Level {
    /// All levels in increasing verbosity order.
    pub const ALL_LEVELS: [Self; 5] = [Self::Warning, Self::Info, Self::Debug, Self::Trace, Self::All];

    /// Highest verbosity this level lets through.
    #[must_use]
    pub const fn max_verbosity(self) -> Verbosity {
        match self {
            Self::Warning => Verbosity::WARNING,
            Self::Info => Verbosity::INFO,
            Self::Debug => Verbosity::DEBUG,
            Self::Trace => Verbosity::TRACE,
            Self::All => Verbosity::ALL,
        }
    }

    /// Returns `true` when records at `verbosity` are written at this level.
    #[must_use]
    pub const fn enables(self, verbosity: Verbosity) -> bool {
        verbosity.0 <= self.max_verbosity().0
    }

    /// Lowercase configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log level '{0}' (expected warning, info, debug, trace or all)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL_LEVELS
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(trimmed.to_owned()))
    }
}
