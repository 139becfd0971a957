//! crates/logging/src/decoration.rs
//! Derivation steps replayed against a raw logger at every emit.

use logging_sink::{Fields, RawLogger};

/// One derivation step recorded on a [`Logger`](crate::Logger).
///
/// Decorations are replayed in order on every emit. The last
/// [`Replace`](Decoration::Replace) wins: it supplies the raw logger the
/// following decorations are applied to, and everything recorded before it
/// is ignored. Without a replacement the process-wide sink supplies the raw
/// logger.
#[derive(Clone, Debug)]
pub enum Decoration {
    /// Appends fields after the ones already accumulated.
    Fields(Fields),
    /// Appends a name segment, joined with `.`.
    Name(String),
    /// Uses a fixed raw logger instead of the process-wide sink.
    Replace(RawLogger),
}

impl Decoration {
    pub(crate) fn apply(&self, raw: RawLogger) -> RawLogger {
        match self {
            Self::Fields(fields) => raw.with_fields(fields),
            Self::Name(name) => raw.with_name(name),
            Self::Replace(replacement) => replacement.clone(),
        }
    }
}

/// Splits `decorations` at the last replacement.
///
/// Returns the raw logger to start from and the decorations still to replay.
pub(crate) fn root(decorations: &[Decoration]) -> (RawLogger, &[Decoration]) {
    for (index, decoration) in decorations.iter().enumerate().rev() {
        if let Decoration::Replace(raw) = decoration {
            return (raw.clone(), &decorations[index + 1..]);
        }
    }
    (logging_sink::handle(), decorations)
}

pub(crate) fn replay(raw: RawLogger, decorations: &[Decoration]) -> RawLogger {
    decorations
        .iter()
        .fold(raw, |raw, decoration| decoration.apply(raw))
}
