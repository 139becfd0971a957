//! crates/logging-sink/src/fields.rs
//! Ordered key/value metadata attached to records.

use std::borrow::Cow;

use crate::value::Value;

/// A single key/value pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    /// Creates a field from a key and anything convertible into a [`Value`].
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the field key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered sequence of [`Field`]s.
///
/// Insertion order is preserved exactly and duplicate keys are kept: two
/// fields named `panda` are both written, in the order they were added.
///
/// # Examples
///
/// ```
/// use logging_sink::{Fields, kv};
///
/// let built = Fields::new().field("panda", 2).field("hi", 42);
/// let literal = kv!["panda" => 2, "hi" => 42];
/// assert_eq!(built, literal);
/// assert_eq!(built.keys().collect::<Vec<_>>(), ["panda", "hi"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    entries: Vec<Field>,
}

impl Fields {
    /// Creates an empty set of fields.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty set with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field and returns `self`, for builder-style chaining.
    #[must_use]
    pub fn field(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) {
        self.entries.push(Field::new(key, value));
    }

    /// Appends every field of `other`, keeping its order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Number of fields, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no field has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.entries.iter()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Field::key)
    }

    /// Borrows the fields as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        &self.entries
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Field>> for Fields {
    fn from(entries: Vec<Field>) -> Self {
        Self { entries }
    }
}

/// Builds [`Fields`] from `key => value` pairs.
///
/// ```
/// use logging_sink::kv;
///
/// let fields = kv!["user" => "ada", "attempt" => 3];
/// assert_eq!(fields.len(), 2);
/// assert!(kv![].is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.push($key, $value);)+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn duplicate_keys_are_kept_in_order() {
        let fields = kv!["panda" => false, "panda" => 2];
        let values: Vec<_> = fields.iter().map(|f| f.value().clone()).collect();
        assert_eq!(values, [Value::Bool(false), Value::I64(2)]);
    }

    #[test]
    fn extend_appends_after_existing() {
        let mut fields = kv!["hi" => 42];
        fields.extend(kv!["panda" => 2]);
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["hi", "panda"]);
    }

    #[test]
    fn empty_macro_is_empty() {
        let fields = kv![];
        assert!(fields.is_empty());
        assert_eq!(fields.len(), 0);
    }

    proptest! {
        #[test]
        fn insertion_order_is_preserved(keys in proptest::collection::vec("[a-z]{1,4}", 0..16)) {
            let fields: Fields = keys
                .iter()
                .enumerate()
                .map(|(index, key)| Field::new(key.clone(), index))
                .collect();

            prop_assert_eq!(fields.len(), keys.len());
            let seen: Vec<String> = fields.keys().map(str::to_owned).collect();
            prop_assert_eq!(seen, keys);
        }
    }
}
