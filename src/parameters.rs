//! Ordered key-value parameter records and the typed access protocol.
//!
//! One record in a SchDoc container is a flat run of `KEY=VALUE` pairs
//! produced by an external tokenizer. This module layers typed access over
//! that run: lookups never fail, malformed or absent values coerce to
//! caller-supplied defaults, and first-insertion order is preserved so a
//! record can be written back deterministically.

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;

/// The cell handed out for keys that are not present in a record.
static EMPTY_VALUE: ParameterValue = ParameterValue { raw: None };

/// Tokens read as boolean true, compared case-insensitively. Real files
/// predominantly carry "T"; the rest are tolerated per the best-effort
/// reading contract. Export always writes "T"/"F".
const TRUE_TOKENS: [&str; 3] = ["T", "TRUE", "1"];

/// A single raw text cell from a record, with typed coercion helpers.
///
/// Coercion never fails: absence of the underlying key and malformed text
/// both resolve to the caller-supplied default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterValue {
    raw: Option<String>,
}

impl ParameterValue {
    pub fn new(raw: impl Into<String>) -> Self {
        ParameterValue {
            raw: Some(raw.into()),
        }
    }

    /// True when this cell came from a missing key.
    pub fn is_absent(&self) -> bool {
        self.raw.is_none()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// True iff the raw text matches a truthy token; absent reads as false.
    pub fn as_bool(&self) -> bool {
        match &self.raw {
            Some(s) => TRUE_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)),
            None => false,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        self.raw.as_deref().and_then(|s| s.trim().parse::<i32>().ok())
    }

    /// Integer value, or `default` when the key was absent or unparseable.
    pub fn as_int_or(&self, default: i32) -> i32 {
        self.as_int().unwrap_or(default)
    }

    /// Raw text, or `default` when the key was absent.
    pub fn as_string_or(&self, default: &str) -> String {
        match &self.raw {
            Some(s) => s.clone(),
            None => default.to_string(),
        }
    }

    /// Color decoded from a BGR-packed integer, or `default` on
    /// absence/garbage.
    pub fn as_color_or(&self, default: Color) -> Color {
        self.as_int().map(Color::from_coloref).unwrap_or(default)
    }
}

/// Any value kind `ParameterCollection::add` can encode canonically.
///
/// The textual forms must match what the tokenizer-side parser expects:
/// booleans as "T"/"F", integers and colors as decimal.
pub trait ToParameterValue {
    fn encode(&self) -> String;
}

impl ToParameterValue for bool {
    fn encode(&self) -> String {
        if *self { "T" } else { "F" }.to_string()
    }
}

impl ToParameterValue for i32 {
    fn encode(&self) -> String {
        self.to_string()
    }
}

impl ToParameterValue for &str {
    fn encode(&self) -> String {
        (*self).to_string()
    }
}

impl ToParameterValue for String {
    fn encode(&self) -> String {
        self.clone()
    }
}

impl ToParameterValue for Color {
    fn encode(&self) -> String {
        self.to_coloref().to_string()
    }
}

/// An ordered mapping of uppercase key to [`ParameterValue`].
///
/// Keys are case-insensitive-unique (stored normalized upper-case) and keep
/// their first-insertion position, so two exports of the same primitive
/// produce byte-identical key runs. Looking up a missing key yields an empty
/// cell rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterCollection {
    entries: Vec<(String, ParameterValue)>,
    index: HashMap<String, usize>,
}

impl ParameterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from tokenizer output. Later duplicates of a key
    /// overwrite the earlier value in place.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut collection = Self::new();
        for (key, value) in pairs {
            collection.insert(key.into().to_ascii_uppercase(), ParameterValue::new(value));
        }
        collection
    }

    fn insert(&mut self, key: String, value: ParameterValue) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Append or overwrite `key` with the canonical encoding of `value`,
    /// preserving the key's first-insertion position.
    pub fn add<V: ToParameterValue>(&mut self, key: impl Into<String>, value: V) {
        let key = key.into().to_ascii_uppercase();
        self.insert(key, ParameterValue::new(value.encode()));
    }

    /// Lookup that never fails: an absent key reads as an empty cell.
    pub fn get(&self, key: &str) -> &ParameterValue {
        let key = key.to_ascii_uppercase();
        match self.index.get(&key) {
            Some(&i) => &self.entries[i].1,
            None => &EMPTY_VALUE,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_ascii_uppercase())
    }

    /// The RECORD discriminator of this record, 0 when missing.
    pub fn record_id(&self) -> i32 {
        self.get("RECORD").as_int_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order, for the external serializer.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for ParameterCollection {
    /// Pipe-delimited `|KEY=VALUE` form, as seen in ASCII schematic dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, "|{}={}", key, value.raw().unwrap_or(""))?;
        }
        Ok(())
    }
}
