//! crates/logging-sink/src/value.rs
//! Structured values attached to record fields.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;

/// Text written in place of a value whose formatting impl returned an error.
pub const UNRENDERABLE: &str = "<unrenderable>";

/// A single structured value carried by a [`Field`](crate::Field).
///
/// Scalar variants are stored eagerly. The [`Display`](Value::Display) and
/// [`Debug`](Value::Debug) variants hold the original value behind an [`Arc`]
/// and are only formatted when a backend encodes the record, so a record that
/// is gated off never pays for (or observes) their rendering.
#[derive(Clone)]
pub enum Value {
    /// Absent value, encoded as JSON `null`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Floating point number.
    F64(f64),
    /// String value.
    Str(Cow<'static, str>),
    /// Lazily rendered through [`fmt::Display`].
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// Lazily rendered through [`fmt::Debug`].
    Debug(Arc<dyn fmt::Debug + Send + Sync>),
}

impl Value {
    /// Wraps a value that is rendered with its [`fmt::Display`] impl at encode time.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Display(Arc::new(value))
    }

    /// Wraps a value that is rendered with its [`fmt::Debug`] impl at encode time.
    pub fn debug<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self::Debug(Arc::new(value))
    }

    /// Converts an optional error into its message, or [`Value::Null`] when absent.
    ///
    /// An error whose `Display` impl fails is written as [`UNRENDERABLE`].
    pub fn from_error(err: Option<&dyn Error>) -> Self {
        err.map_or(Self::Null, |err| Self::Str(render_with(|out| write!(out, "{err}"))))
    }

    /// Renders the value as text.
    ///
    /// Never panics: a lazy value whose formatting impl returns an error
    /// renders as [`UNRENDERABLE`].
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Str(value) => Cow::Borrowed(&**value),
            value => render_with(|out| write!(out, "{value}")),
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn render_with<'a, F>(format: F) -> Cow<'a, str>
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut rendered = String::new();
    match format(&mut rendered) {
        Ok(()) => Cow::Owned(rendered),
        Err(fmt::Error) => Cow::Borrowed(UNRENDERABLE),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::I64(value) => write!(f, "{value}"),
            Self::U64(value) => write!(f, "{value}"),
            Self::F64(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::Display(value) => write!(f, "{value}"),
            Self::Debug(value) => write!(f, "{value:?}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::I64(value) => f.debug_tuple("I64").field(value).finish(),
            Self::U64(value) => f.debug_tuple("U64").field(value).finish(),
            Self::F64(value) => f.debug_tuple("F64").field(value).finish(),
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            // Lazy variants stay unrendered so debugging a record never triggers them.
            Self::Display(_) => f.write_str("Display(..)"),
            Self::Debug(_) => f.write_str("Debug(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Display(a), Self::Display(b)) => Arc::ptr_eq(a, b),
            (Self::Debug(a), Self::Debug(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! signed_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::I64(i64::from(value))
            }
        })*
    };
}

macro_rules! unsigned_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::U64(u64::from(value))
            }
        })*
    };
}

signed_from!(i8, i16, i32, i64);
unsigned_from!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::I64(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::U64(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::F64(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(Cow::Owned(value.clone()))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Str(Cow::Owned(format!("{value:?}")))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn integers_keep_their_signedness() {
        assert_eq!(Value::from(-3_i32), Value::I64(-3));
        assert_eq!(Value::from(7_u16), Value::U64(7));
        assert_eq!(Value::from(9_usize), Value::U64(9));
    }

    #[test]
    fn none_becomes_null() {
        let value: Value = None::<u32>.into();
        assert!(value.is_null());
        assert_eq!(Value::from(Some("x")), Value::Str(Cow::Borrowed("x")));
    }

    #[test]
    fn duration_renders_as_debug_text() {
        assert_eq!(
            Value::from(Duration::from_secs(3600)).to_string(),
            "3600s"
        );
    }

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl fmt::Debug for Broken {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[derive(Debug)]
    struct BrokenError;

    impl fmt::Display for BrokenError {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl Error for BrokenError {}

    #[test]
    fn failing_formatters_render_a_placeholder() {
        assert_eq!(Value::display(Broken).render(), UNRENDERABLE);
        assert_eq!(Value::debug(Broken).render(), UNRENDERABLE);
        assert_eq!(Value::from_error(Some(&BrokenError)).render(), UNRENDERABLE);
    }

    #[test]
    fn render_matches_display_for_well_behaved_values() {
        assert_eq!(Value::from("plain").render(), "plain");
        assert_eq!(Value::from(-4_i64).render(), "-4");
        assert_eq!(Value::Null.render(), "null");
        assert_eq!(Value::debug("quoted").render(), r#""quoted""#);
    }

    #[test]
    fn errors_render_their_message() {
        let err = io::Error::other("some err");
        assert_eq!(Value::from_error(Some(&err)).to_string(), "some err");
        assert!(Value::from_error(None).is_null());
    }

    #[test]
    fn debug_does_not_render_lazy_values() {
        let value = Value::display(42);
        assert_eq!(format!("{value:?}"), "Display(..)");
        assert_eq!(value.to_string(), "42");
    }

    #[test]
    fn lazy_values_compare_by_identity() {
        let value = Value::debug(vec![1, 2]);
        assert_eq!(value, value.clone());
        assert_ne!(value, Value::debug(vec![1, 2]));
    }
}
