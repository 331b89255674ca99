//! Structured key/value fields attached to log entries
//!
//! This module provides:
//! - `FieldValue`: a single field value
//! - `ErrorValue`: an error captured as a field value
//! - `Fields`: the unordered key/value map carried by entries
//! - `Fielder`: the capability of exposing `Fields`

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::hash_map;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Error(ErrorValue),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// The captured error, if this value holds one.
    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            FieldValue::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ErrorValue> for FieldValue {
    fn from(e: ErrorValue) -> Self {
        FieldValue::Error(e)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// An error captured for logging.
///
/// Holds the error's display message plus the messages of its `source()`
/// chain, outermost first. The chain is captured when the error is attached,
/// so records own their error context independently of the original value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
    chain: Vec<String>,
}

impl ErrorValue {
    pub fn new<E: Error + ?Sized>(err: &E) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            chain,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Messages of the underlying causes, outermost first.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

/// Capability of exposing structured fields.
///
/// Implemented by `Fields` itself and by any type, typically an error, that
/// wants to attach its own context to a record.
pub trait Fielder {
    fn fields(&self) -> Fields;
}

/// Unordered key/value map of entry-level data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    fields: HashMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field (builder form)
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field, replacing any previous value under `key`
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Key/value pairs sorted by key. Computed on every call.
    pub fn sorted(&self) -> Vec<(&str, &FieldValue)> {
        let mut pairs: Vec<(&str, &FieldValue)> =
            self.fields.iter().map(|(k, v)| (k.as_str(), v)).collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    /// Copy every field of `other` into `self`; `other` wins on collision.
    pub fn merge(&mut self, other: &Fields) {
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    /// Format fields as sorted key=value pairs
    pub fn format_fields(&self) -> String {
        self.sorted()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Fielder for Fields {
    fn fields(&self) -> Fields {
        self.clone()
    }
}

impl Fielder for HashMap<String, FieldValue> {
    fn fields(&self) -> Fields {
        Fields::from(self.clone())
    }
}

impl From<HashMap<String, FieldValue>> for Fields {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted = self.sorted();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (key, value) in sorted {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
