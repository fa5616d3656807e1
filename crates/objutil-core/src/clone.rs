//! Structural cloning.
//!
//! `Value` owns all of its children, so a clone never shares storage with the
//! original: nested arrays and objects are rebuilt element by element, and
//! dates and patterns are reconstructed as equivalent instances.

use crate::Value;

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Undefined => Self::Undefined,
            Self::Null => Self::Null,
            Self::Bool(b) => Self::Bool(*b),
            Self::Number(n) => Self::Number(*n),
            Self::String(s) => Self::String(s.clone()),
            Self::Array(values) => Self::Array(values.iter().map(Clone::clone).collect()),
            Self::Object(map) => {
                Self::Object(map.iter().map(|(key, value)| (key.clone(), value.clone())).collect())
            }
            Self::Date(date) => Self::Date(*date),
            Self::Pattern(pattern) => Self::Pattern(pattern.clone()),
        }
    }
}

/// Produces a deep, independent copy of `value`.
///
/// ```
/// # use objutil_core::{clone_value, deep_equals, Value};
/// let src = Value::from_json_str("{\"foo\":{\"some\":\"bar\"}}")?;
/// let copy = clone_value(&src);
/// assert!(deep_equals(&copy, &src));
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn clone_value(value: &Value) -> Value {
    tracing::trace!(kind = %value.kind(), "cloning value");
    value.clone()
}
