//! crates/logging-sink/src/config.rs
//! Process-wide sink configuration.

use crate::backend::WriterBackend;
use crate::encode::Format;
use crate::error::SinkError;
use crate::output::Output;
use crate::verbosity::Level;

/// Environment variable holding the minimum level.
pub const LEVEL_VAR: &str = "LOG_LEVEL";
/// Environment variable holding the output format.
pub const FORMAT_VAR: &str = "LOG_FORMAT";
/// Environment variable holding the output destination.
pub const OUTPUT_VAR: &str = "LOG_OUTPUT";

/// Encoding, destination and minimum level of the process-wide sink.
///
/// # Examples
///
/// ```
/// use logging_sink::{Format, Level, Output, SinkConfig};
///
/// let config = SinkConfig::from_lookup(|key| match key {
///     "LOG_LEVEL" => Some("debug".to_owned()),
///     "LOG_FORMAT" => Some("text".to_owned()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(config.level, Level::Debug);
/// assert_eq!(config.format, Format::Text);
/// assert_eq!(config.output, Output::Stderr);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkConfig {
    /// Minimum level written.
    pub level: Level,
    /// Line encoding.
    pub format: Format,
    /// Destination.
    pub output: Output,
}

impl SinkConfig {
    /// Reads `LOG_LEVEL`, `LOG_FORMAT` and `LOG_OUTPUT` from the process environment.
    pub fn from_env() -> Result<Self, SinkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; absent or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(level) = read(LEVEL_VAR) {
            config.level = level.parse()?;
        }
        if let Some(format) = read(FORMAT_VAR) {
            config.format = format.parse()?;
        }
        if let Some(output) = read(OUTPUT_VAR) {
            config.output = output.parse()?;
        }
        Ok(config)
    }

    /// Sets the minimum level.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the encoding.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the destination.
    #[must_use]
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Opens the output and builds the backend.
    pub fn build(&self) -> Result<WriterBackend, SinkError> {
        let writer = self.output.open()?;
        Ok(WriterBackend::from_boxed(writer)
            .with_level(self.level)
            .with_format(self.format))
    }
}
