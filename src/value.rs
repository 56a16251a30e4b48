//! Typed parameter values.
//!
//! This module provides the [`Value`] enum stored in a [`ParamMap`](crate::ParamMap) after
//! validation, and the [`Number`] type produced by `int` and `float` coercion.
//!
//! ## The absent marker
//!
//! A declared field that was not supplied, has no default and is not a list ends up as
//! [`Value::Absent`]. It is distinct from every real value, including the empty string,
//! zero and `false`, so callers can tell "declared but unsupplied" apart from "supplied".
//! It serializes as JSON `null`.
//!
//! ```rust
//! use argspec::Value;
//!
//! assert!(Value::Absent.is_absent());
//! assert!(!Value::from("").is_absent());
//! assert_ne!(Value::Absent, Value::from(0));
//! ```
//!
//! ## Extracting values
//!
//! ```rust
//! use argspec::{Value, Number};
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.as_f64(), Some(42.0));
//! assert_eq!(value.as_str(), None);
//! ```

use crate::ParamMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A typed parameter value.
///
/// `int` fields hold [`Number::Integer`], `float` fields hold [`Number::Float`], `bool`
/// fields hold [`Value::Bool`], `list` fields hold a [`Value::List`] of strings, and every
/// other type keeps its (possibly trimmed) text in [`Value::String`]. Defaults taken from a
/// specification may be any shape, including [`Value::Object`].
///
/// # Examples
///
/// ```rust
/// use argspec::Value;
///
/// let tags = Value::from(vec!["a", "b"]);
/// assert!(tags.is_list());
/// assert_eq!(tags.as_str_list(), Some(vec!["a", "b"]));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Object(ParamMap),
}

/// A coerced numeric value.
///
/// Only `int` and `float` fields produce numbers; `number` fields validate numeric text
/// but keep it as a string so that decimal representations are not rounded.
///
/// # Examples
///
/// ```rust
/// use argspec::Number;
///
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(2.5).as_i64(), None);
/// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Value {
    /// Returns `true` for the absent marker.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_bool(), Some(true));
    /// assert_eq!(Value::from("yes").as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a list, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a list made only of strings, returns them in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::Value;
    ///
    /// assert_eq!(Value::List(vec![]).as_str_list(), Some(vec![]));
    /// assert_eq!(Value::List(vec![Value::from(1)]).as_str_list(), None);
    /// ```
    #[must_use]
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        self.as_list()?.iter().map(Value::as_str).collect()
    }

    /// If the value is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ParamMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "<absent>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => write!(
                f,
                "[{}]",
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
            Value::Object(_) => write!(f, "{{object}}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Absent => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => obj.serialize(serializer),
        }
    }
}

/// JSON `null` maps to [`Value::Absent`]; a specification default of `null` therefore
/// behaves as "no default".
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::Integer(i)),
                None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::List(value.into_iter().map(Value::from).collect())
    }
}

impl From<ParamMap> for Value {
    fn from(value: ParamMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_is_distinct() {
        assert!(Value::Absent.is_absent());
        assert!(!Value::from("").is_absent());
        assert!(!Value::from(0).is_absent());
        assert!(!Value::from(false).is_absent());
        assert!(!Value::List(vec![]).is_absent());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(json!(null)), Value::Absent);
        assert_eq!(Value::from(json!(3)), Value::Number(Number::Integer(3)));
        assert_eq!(Value::from(json!(2.5)), Value::Number(Number::Float(2.5)));
        assert_eq!(Value::from(json!(["a", "b"])), Value::from(vec!["a", "b"]));

        let obj = Value::from(json!({"x": 1}));
        assert_eq!(obj.as_object().and_then(|o| o.get_i64("x")), Some(1));
    }

    #[test]
    fn test_serialize_to_json() {
        let list = Value::from(vec!["a", "b"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);
        assert_eq!(serde_json::to_string(&Value::Absent).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::from(30)).unwrap(), "30");
        assert_eq!(serde_json::to_string(&Value::from(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Absent);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a,b]");
        assert_eq!(Value::Absent.to_string(), "<absent>");
        assert_eq!(Value::from(7).to_string(), "7");
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_absent(v: &Value) -> bool {
            v.is_absent()
        }

        assert!(check_absent(&Value::Absent));
        assert!(Value::from(true).is_bool());
        assert!(Value::from(1).is_number());
        assert!(Value::from("x").is_string());
    }
}
