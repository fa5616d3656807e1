use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Structural category of a [`Value`], deciding how recursive operations treat it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Absence of a value.
    Undefined,
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A finite number.
    Number,
    /// A string.
    String,
    /// An ordered sequence.
    Array,
    /// A string-keyed mapping.
    Object,
    /// A date-time instant. Opaque leaf.
    Date,
    /// A regular expression. Opaque leaf.
    #[serde(rename = "regex")]
    Pattern,
}

impl Kind {
    /// Containers are traversed by path operations; everything else is a leaf.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

/// Classifies a value.
///
/// ```
/// # use objutil_core::{classify, Kind, Value};
/// assert_eq!(classify(&Value::Null), Kind::Null);
/// assert_eq!(classify(&Value::from(vec![Value::from(1)])), Kind::Array);
/// assert_eq!(classify(&Value::from("text")), Kind::String);
/// ```
#[must_use]
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Array(_) => Kind::Array,
        Value::Pattern(_) => Kind::Pattern,
        Value::Date(_) => Kind::Date,
        Value::Object(_) => Kind::Object,
        Value::Number(_) => Kind::Number,
        Value::String(_) => Kind::String,
        Value::Bool(_) => Kind::Boolean,
        Value::Undefined => Kind::Undefined,
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
            Self::Pattern => "regex",
        };
        f.write_str(name)
    }
}
