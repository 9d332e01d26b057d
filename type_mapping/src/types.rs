//! Parameter value definitions
//!
//! This module provides the value and map types used to describe
//! request parameters, together with conversions from Rust types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single request parameter value.
///
/// There is no top-level null: an absent (`None`) parameter is simply not present
/// in a [`ParamMap`]. `Null` only appears nested inside lists and objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Render the value for use in a query string or cache key.
    ///
    /// Primitives render bare. Lists and objects render as compact JSON with
    /// sorted object keys, so structurally different nested values never
    /// collide. Text is not escaped here.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Null => "null".to_string(),
            ParamValue::Boolean(b) => b.to_string(),
            ParamValue::Integer(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::Text(s) => s.clone(),
            nested => serde_json::to_string(nested).unwrap_or_default(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl From<String> for ParamValue {
    fn from(val: String) -> Self {
        ParamValue::Text(val)
    }
}

impl From<&str> for ParamValue {
    fn from(val: &str) -> Self {
        ParamValue::Text(val.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(val: i32) -> Self {
        ParamValue::Integer(i64::from(val))
    }
}

impl From<i64> for ParamValue {
    fn from(val: i64) -> Self {
        ParamValue::Integer(val)
    }
}

impl From<u32> for ParamValue {
    fn from(val: u32) -> Self {
        ParamValue::Integer(i64::from(val))
    }
}

impl From<f64> for ParamValue {
    fn from(val: f64) -> Self {
        ParamValue::Float(val)
    }
}

impl From<bool> for ParamValue {
    fn from(val: bool) -> Self {
        ParamValue::Boolean(val)
    }
}

impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(val: Vec<T>) -> Self {
        ParamValue::List(val.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ParamValue::Text(s),
            serde_json::Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from).collect())
            }
            serde_json::Value::Object(map) => ParamValue::Object(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, ParamValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Sorted map of request parameters. Absent values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, ParamValue>);

impl ParamMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a parameter. Inserting `Null` removes the key instead.
    pub fn insert<V: Into<ParamValue>>(&mut self, key: &str, value: V) -> &mut Self {
        let value = value.into();
        if value.is_null() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    /// Insert a parameter only when it is present
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        match value {
            Some(v) => self.insert(key, v),
            None => {
                self.0.remove(key);
                self
            }
        }
    }

    pub fn with<V: Into<ParamValue>>(mut self, key: &str, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// `(key, rendered value)` pairs in key order, ready for a query string
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.render()))
            .collect()
    }

    /// Compact JSON with sorted keys
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            let key: String = k.into();
            map.insert(&key, v);
        }
        map
    }
}
