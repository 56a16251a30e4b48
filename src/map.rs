//! Ordered parameter map.
//!
//! This module provides [`ParamMap`], a wrapper around [`IndexMap`] holding the result of a
//! validation run. After a successful run it contains exactly the declared fields, in
//! specification order, each holding a coerced value, a default, an empty list or the
//! [`Value::Absent`](crate::Value::Absent) marker.
//!
//! ## Why IndexMap?
//!
//! - **Deterministic output**: the same specification and input always serialize to the
//!   same bytes
//! - **Iteration order**: fields are iterated in the order they were declared
//!
//! ## Examples
//!
//! ```rust
//! use argspec::{argspec, validate};
//!
//! let spec = argspec!({ "name": {}, "age": { type: "int" } });
//! let params = validate(&spec, "name=Alice age=30").unwrap();
//!
//! assert_eq!(params.get_str("name"), Some("Alice"));
//! assert_eq!(params.get_i64("age"), Some(30));
//! assert_eq!(params.keys().collect::<Vec<_>>(), vec!["name", "age"]);
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// An ordered map of field names to typed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamMap(IndexMap<String, crate::Value>);

impl ParamMap {
    /// Creates an empty `ParamMap`.
    #[must_use]
    pub fn new() -> Self {
        ParamMap(IndexMap::new())
    }

    /// Creates an empty `ParamMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ParamMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key if any.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the field is present in the map (even when absent-marked).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if the field was declared but ended up without a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::{argspec, validate};
    ///
    /// let spec = argspec!({ "name": {}, "nick": {} });
    /// let params = validate(&spec, "name=Alice").unwrap();
    ///
    /// assert!(params.contains_key("nick"));
    /// assert!(params.is_absent("nick"));
    /// assert!(!params.is_absent("name"));
    /// ```
    #[must_use]
    pub fn is_absent(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(crate::Value::Absent))
    }

    /// Returns the field as a string slice, if it holds text.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(crate::Value::as_str)
    }

    /// Returns the field as a boolean, if it holds one.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(crate::Value::as_bool)
    }

    /// Returns the field as an integer, if it holds a whole number.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(crate::Value::as_i64)
    }

    /// Returns the field as a float, if it holds a number.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(crate::Value::as_f64)
    }

    /// Returns the field as a list of strings, if it holds one.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key).and_then(crate::Value::as_str_list)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Serialize for ParamMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        ParamMap(IndexMap::from_iter(iter))
    }
}
