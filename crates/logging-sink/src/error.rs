//! crates/logging-sink/src/error.rs
//! Errors raised while configuring or installing a sink.
//!
//! Emitting records never fails; only building a backend from configuration
//! can.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::encode::ParseFormatError;
use crate::verbosity::ParseLevelError;

/// Failure to configure or install a sink.
#[derive(Clone, Debug, Error)]
pub enum SinkError {
    /// The output file could not be opened.
    #[error("failed to open log output '{}': {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The configured level is not recognised.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    /// The configured format is not recognised.
    #[error(transparent)]
    Format(#[from] ParseFormatError),
    /// The configured output is empty or malformed.
    #[error("invalid log output '{0}'")]
    Output(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn open_error_exposes_source() {
        let err = SinkError::Open {
            path: PathBuf::from("/nope/app.log"),
            source: Arc::new(io::Error::from(io::ErrorKind::NotFound)),
        };
        assert!(err.to_string().starts_with("failed to open log output '/nope/app.log'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn parse_errors_convert() {
        let err: SinkError = ParseLevelError("loud".to_owned()).into();
        assert_eq!(
            err.to_string(),
            "unknown log level 'loud' (expected warning, info, debug, trace or all)"
        );
        let err: SinkError = ParseFormatError("xml".to_owned()).into();
        assert!(matches!(err, SinkError::Format(_)));
    }
}
