//! Caller-owned payload attached to trie nodes.
//!
//! Nothing in the trie reads or computes these values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar metadata value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    /// Only holds integers above `i64::MAX`; smaller ones are `Int`.
    UInt(u64),
    Float(f64),
    Str(String),
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Int(value)
    }
}

impl From<u64> for Primitive {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Primitive::Int(v),
            Err(_) => Primitive::UInt(value),
        }
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::Str(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::Str(value)
    }
}

/// Default node payload: a flat map of named scalar fields.
///
/// A fresh value carries `visits`, `bottiness` and `count` at zero. Every
/// field, these three included, holds whatever value was last set.
///
/// # Examples
///
/// ```
/// use qgraph::{Metadata, Primitive};
///
/// let mut meta = Metadata::default();
/// assert_eq!(meta.get("visits"), Some(&Primitive::Int(0)));
///
/// meta.set("first_name", "Ava");
/// meta.set("visits", 3u64);
///
/// assert_eq!(meta.get("visits"), Some(&Primitive::Int(3)));
/// assert_eq!(meta.get("first_name"), Some(&Primitive::from("Ava")));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, Primitive>,
}

impl Default for Metadata {
    fn default() -> Self {
        let fields = BTreeMap::from([
            ("visits".to_string(), Primitive::Int(0)),
            ("bottiness".to_string(), Primitive::Float(0.0)),
            ("count".to_string(), Primitive::Int(0)),
        ]);
        Metadata { fields }
    }
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&Primitive> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Primitive> {
        self.fields.get_mut(key)
    }

    /// Writes a field by name, returning the value it replaces.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Primitive>,
    ) -> Option<Primitive> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Primitive> {
        self.fields.remove(key)
    }

    /// Applies every pair with [`set`](Self::set).
    pub fn update<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<Primitive>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in pairs {
            self.set(k, v);
        }
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
