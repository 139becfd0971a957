//! crates/logging-sink/src/encode.rs
//! Line encoders for [`WriterBackend`](crate::WriterBackend).
//!
//! Both encoders write one record per line with keys in wire order:
//! `level`, `timestamp`, `logger` (when named), `caller`, `message`, then the
//! record fields. Duplicate keys are written verbatim; nothing is merged.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::record::Record;
use crate::value::Value;

/// Output encoding of a writer backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human readable `key=value` lines.
    Text,
}

impl Format {
    /// Lowercase configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    /// Appends the encoded record, newline included, to `out`.
    pub fn encode(self, record: &Record<'_>, timestamp: &str, out: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Self::Json => encode_json(record, timestamp, out),
            Self::Text => encode_text(record, timestamp, out),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a format name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log format '{0}' (expected json or text)")]
pub struct ParseFormatError(pub String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if trimmed.eq_ignore_ascii_case("text") || trimmed.eq_ignore_ascii_case("console") {
            Ok(Self::Text)
        } else {
            Err(ParseFormatError(trimmed.to_owned()))
        }
    }
}

fn encode_json(record: &Record<'_>, timestamp: &str, out: &mut Vec<u8>) -> io::Result<()> {
    out.push(b'{');
    json_key(out, "level")?;
    json_str(out, record.severity.as_str())?;
    out.push(b',');
    json_key(out, "timestamp")?;
    json_str(out, timestamp)?;
    if let Some(logger) = record.logger {
        out.push(b',');
        json_key(out, "logger")?;
        json_str(out, logger)?;
    }
    out.push(b',');
    json_key(out, "caller")?;
    json_str(out, &record.caller.to_string())?;
    out.push(b',');
    json_key(out, "message")?;
    json_str(out, record.message)?;
    for field in record.all_fields() {
        out.push(b',');
        json_key(out, field.key())?;
        json_value(out, field.value())?;
    }
    out.extend_from_slice(b"}\n");
    Ok(())
}

fn json_key(out: &mut Vec<u8>, key: &str) -> io::Result<()> {
    json_str(out, key)?;
    out.push(b':');
    Ok(())
}

fn json_str(out: &mut Vec<u8>, value: &str) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value).map_err(io::Error::from)
}

fn json_value(out: &mut Vec<u8>, value: &Value) -> io::Result<()> {
    let written = match value {
        Value::Null => serde_json::to_writer(&mut *out, &()),
        Value::Bool(value) => serde_json::to_writer(&mut *out, value),
        Value::I64(value) => serde_json::to_writer(&mut *out, value),
        Value::U64(value) => serde_json::to_writer(&mut *out, value),
        Value::F64(value) => serde_json::to_writer(&mut *out, value),
        Value::Str(value) => serde_json::to_writer(&mut *out, value.as_ref()),
        Value::Display(_) | Value::Debug(_) => {
            serde_json::to_writer(&mut *out, &*value.render())
        }
    };
    written.map_err(io::Error::from)
}

fn encode_text(record: &Record<'_>, timestamp: &str, out: &mut Vec<u8>) -> io::Result<()> {
    write!(
        out,
        "{timestamp} {}",
        record.severity.as_str().to_ascii_uppercase()
    )?;
    if let Some(logger) = record.logger {
        write!(out, " [{logger}]")?;
    }
    write!(out, " {} {}", record.caller, record.message)?;
    for field in record.all_fields() {
        write!(out, " {}=", field.key())?;
        text_value(out, field.value())?;
    }
    out.push(b'\n');
    Ok(())
}

fn text_value(out: &mut Vec<u8>, value: &Value) -> io::Result<()> {
    let rendered = value.render();
    let quoted = matches!(value, Value::Str(_) | Value::Display(_) | Value::Debug(_))
        && needs_quotes(&rendered);
    if quoted {
        json_str(out, &rendered)
    } else {
        out.extend_from_slice(rendered.as_bytes());
        Ok(())
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}
