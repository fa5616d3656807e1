use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{
    access, equal, keys, merge, AccessError, CanonicalizeError, Kind, Number, Path, Pattern,
};

/// The dynamically typed tree every operation in this crate works on.
///
/// Objects are keyed by `String` in a [`BTreeMap`], so key order never affects
/// equality and iteration is deterministic. Dates and patterns are opaque
/// leaves: they are compared and cloned, never traversed.
#[derive(Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Undefined,
    /// `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Finite double precision number.
    Number(Number),
    /// String.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// String-keyed mapping.
    Object(BTreeMap<String, Value>),
    /// Date-time instant.
    Date(DateTime<Utc>),
    /// Regular expression.
    Pattern(Pattern),
}

impl Value {
    /// Parses a JSON string into a value.
    ///
    /// Whitespace-only input yields [`Value::Undefined`].
    ///
    /// ```
    /// # use objutil_core::Value;
    /// let value = Value::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(value, Value::Object(_)));
    /// assert_eq!(Value::from_json_str("  ")?, Value::Undefined);
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Undefined);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into a value.
    ///
    /// ```
    /// # use objutil_core::Value;
    /// let value = Value::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(value, Value::Object(_)));
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Undefined);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value into a [`Value`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let text = num.to_string();
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::NumberOutOfRange { value: text });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, CanonicalizeError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                let value = num
                    .as_f64()
                    .ok_or_else(|| CanonicalizeError::NumberOutOfRange { value: num.to_string() })?;
                Ok(Self::Number(Number::new(value)?))
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::Array(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = BTreeMap::new();
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(CanonicalizeError::NonStringYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Object(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(CanonicalizeError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Converts the value into a serde JSON value.
    ///
    /// Returns `None` only when the value itself is [`Value::Undefined`].
    /// Nested undefined entries are dropped from objects and become `null`
    /// inside arrays. Dates become ISO-8601 strings in UTC with millisecond
    /// precision; patterns become empty objects.
    ///
    /// ```
    /// # use objutil_core::Value;
    /// let value = Value::from_json_str("{\"a\":[1,null]}")?;
    /// assert_eq!(value.to_json_value(), Some(serde_json::json!({"a": [1, null]})));
    /// assert_eq!(Value::Undefined.to_json_value(), None);
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn to_json_value(&self) -> Option<JsonValue> {
        match self {
            Self::Undefined => None,
            Self::Null => Some(JsonValue::Null),
            Self::Bool(v) => Some(JsonValue::Bool(*v)),
            Self::Number(n) => Some(JsonValue::Number(n.to_json_number())),
            Self::String(s) => Some(JsonValue::String(s.clone())),
            Self::Array(values) => Some(JsonValue::Array(
                values.iter().map(|value| value.to_json_value().unwrap_or(JsonValue::Null)).collect(),
            )),
            Self::Object(map) => {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    if let Some(json) = value.to_json_value() {
                        object.insert(key.clone(), json);
                    }
                }
                Some(JsonValue::Object(object))
            }
            Self::Date(date) => {
                Some(JsonValue::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)))
            }
            Self::Pattern(_) => Some(JsonValue::Object(serde_json::Map::new())),
        }
    }

    /// Returns the structural category of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        crate::classify(self)
    }

    /// Truthiness as loosely typed callers expect it.
    ///
    /// `undefined`, `null`, `false`, `0` and the empty string are falsy.
    /// Everything else, including empty arrays and objects, is truthy.
    ///
    /// ```
    /// # use objutil_core::Value;
    /// assert!(!Value::from(0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::Array(vec![]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => !n.is_zero(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Date(_) | Self::Pattern(_) => true,
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns the mapping when this value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements when this value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the text when this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number when this value is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.get()),
            _ => None,
        }
    }

    /// Builds an object from key/value pairs.
    ///
    /// ```
    /// # use objutil_core::Value;
    /// let value = Value::object([("foo", Value::from("bar"))]);
    /// assert_eq!(value, Value::from_json_str("{\"foo\":\"bar\"}")?);
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Resolves `path` inside this value. See [`access::get`].
    ///
    /// ```
    /// # use objutil_core::{Path, Value};
    /// let src = Value::from_json_str("{\"foo\":{\"bar\":\"none\"}}")?;
    /// assert_eq!(src.get(&Path::parse("foo.bar")), Some(&Value::from("none")));
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Value> {
        access::get(path, self)
    }

    /// Resolves `path`, falling back to `default` when nothing is there.
    #[must_use]
    pub fn get_or<'a>(&'a self, path: &Path, default: &'a Value) -> &'a Value {
        access::get_or(path, self, default)
    }

    /// Returns a copy with `value` installed at `path`. See [`access::set`].
    ///
    /// ```
    /// # use objutil_core::{Path, Value};
    /// let src = Value::from_json_str("{\"foo\":\"bar\"}")?;
    /// let out = src.set(&Path::parse("test.child"), Value::from("value"))?;
    /// assert_eq!(out, Value::from_json_str("{\"foo\":\"bar\",\"test\":{\"child\":\"value\"}}")?);
    /// assert_eq!(src, Value::from_json_str("{\"foo\":\"bar\"}")?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn set(&self, path: &Path, value: Value) -> Result<Value, AccessError> {
        access::set(path, self, value)
    }

    /// Returns a copy with the value at `path` removed. See [`access::remove`].
    #[must_use]
    pub fn remove(&self, path: &Path) -> Value {
        access::remove(path, self)
    }

    /// Deep-merges `other` into a copy of this value. See [`merge::merge`].
    #[must_use]
    pub fn merge(&self, other: &Value) -> Value {
        merge::merge([self, other])
    }

    /// Depth-capped structural equality. See [`equal::deep_equals`].
    #[must_use]
    pub fn deep_equals(&self, other: &Value) -> bool {
        equal::deep_equals(self, other)
    }

    /// Returns a copy with every object key rewritten. See [`keys::transform_keys`].
    #[must_use]
    pub fn transform_keys<F>(&self, key_fn: F) -> Value
    where
        F: Fn(&str) -> String,
    {
        keys::transform_keys(self, key_fn)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().unwrap_or(JsonValue::Null).serialize(serializer)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = CanonicalizeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Pattern> for Value {
    fn from(value: Pattern) -> Self {
        Self::Pattern(value)
    }
}

impl TryFrom<f64> for Value {
    type Error = CanonicalizeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Ok(Self::Number(Number::new(value)?))
    }
}
