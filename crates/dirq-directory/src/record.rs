//! Directory record model.
//!
//! A [`Record`] is one directory entry (a user or a group) represented as an
//! ordered attribute map. Values are explicitly typed via [`AttrValue`] so
//! the filter evaluator can apply a single set of coercion rules instead of
//! inspecting shapes ad hoc at every comparison site.
//!
//! Attribute names are matched case-insensitively everywhere, but the
//! spelling and order in which attributes were stored are preserved for
//! display and serialization.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single attribute value.
///
/// Records are heterogeneous: most attributes are plain strings, numeric
/// attributes (`uidNumber`, `userAccountControl`, ...) carry integers, and
/// multi-valued attributes such as group membership carry ordered lists of
/// strings. Timestamp-like attributes (`accountExpires`) stay textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A plain string value.
    Text(String),
    /// An integer value.
    Number(i64),
    /// A multi-valued attribute (one string per value).
    List(Vec<String>),
}

impl AttrValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        AttrValue::Text(value.into())
    }

    /// Returns true when the value carries no content: an empty string or an
    /// empty list. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Text(s) => s.is_empty(),
            AttrValue::Number(_) => false,
            AttrValue::List(values) => values.is_empty(),
        }
    }

    /// Numeric view of the value, when one exists.
    ///
    /// Numbers return themselves; text coerces when it parses as an `i64`;
    /// lists never coerce.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().parse().ok(),
            AttrValue::List(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::List(values) => write!(f, "{}", values.join("; ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        AttrValue::List(values)
    }
}

/// One directory entry as an ordered attribute-value map.
///
/// Lookup is case-insensitive; insertion order and original key spelling are
/// preserved. Records serialize to (and deserialize from) JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    attrs: Vec<(String, AttrValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes on the record.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns true when the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Looks up an attribute by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        let name_lower = name.to_lowercase();
        self.attrs
            .iter()
            .find(|(key, _)| key.to_lowercase() == name_lower)
            .map(|(_, value)| value)
    }

    /// Returns true when an attribute with the given name exists, regardless
    /// of whether its value is empty.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets an attribute, replacing any existing value under a
    /// case-insensitively equal name (the stored spelling is kept from the
    /// first write).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        let name_lower = name.to_lowercase();
        match self
            .attrs
            .iter_mut()
            .find(|(key, _)| key.to_lowercase() == name_lower)
        {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Iterates attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, AttrValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, AttrValue)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attrs.len()))?;
        for (key, value) in &self.attrs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = access.next_entry::<String, AttrValue>()? {
                    record.set(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
