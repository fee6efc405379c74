//! Nested request parameter values.
//!
//! Request data arrives as string-keyed maps whose values are either plain
//! strings or further maps (`a[b][c]=1` style keys). [`ParamValue`] makes the
//! two cases explicit so traversals have a typed base case.

use std::collections::BTreeMap;

/// A string-keyed map of request parameters.
///
/// Keys are kept sorted so that every traversal, and every record built from
/// one, is deterministic.
///
/// The order is by string, not by number, and not the order of the request.
/// A list built from eleven `a[]` pairs iterates as `0, 1, 10, 2, ...`.
/// Callers that need list order should sort the numeric keys themselves.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A single request parameter value.
///
/// # Examples
///
/// ```
/// use request_guard::{ParamMap, ParamValue};
///
/// let mut inner = ParamMap::new();
/// inner.insert("c".to_string(), ParamValue::from("2"));
///
/// let value = ParamValue::Nested(inner);
/// assert!(value.is_nested());
/// assert_eq!(value.get("c").and_then(ParamValue::as_str), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A leaf value.
    Scalar(String),
    /// A nested parameter set.
    Nested(ParamMap),
}

impl ParamValue {
    /// Returns the string if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::Nested(_) => None,
        }
    }

    /// Returns the inner map if this is a nested set.
    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::Nested(map) => Some(map),
        }
    }

    /// Returns the inner map mutably if this is a nested set.
    pub fn as_map_mut(&mut self) -> Option<&mut ParamMap> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::Nested(map) => Some(map),
        }
    }

    /// Returns `true` for [`ParamValue::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, ParamValue::Scalar(_))
    }

    /// Returns `true` for [`ParamValue::Nested`].
    pub fn is_nested(&self) -> bool {
        matches!(self, ParamValue::Nested(_))
    }

    /// Looks up a direct child key. Scalars have no children.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Nested(map)
    }
}
