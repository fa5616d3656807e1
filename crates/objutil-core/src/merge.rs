//! Deep merge of any number of values.
//!
//! The fold is type driven rather than schema driven: arrays concatenate,
//! objects union their keys recursively, and a later scalar replaces an
//! earlier one. When an object meets a scalar the lenient mode keeps both in a
//! two-element array, while the strict mode reports the collision.

use std::collections::BTreeMap;

use crate::{Kind, MergeError, MergeMode, MergeOptions, Path, Value};

/// Merges `sources` left to right into a new value.
///
/// The first source is cloned, never modified. No sources yield an empty
/// object.
///
/// ```
/// # use objutil_core::{merge, Value};
/// let a = Value::from_json_str("{\"foo\":{\"bar\":\"none\"}}")?;
/// let b = Value::from_json_str("{\"foo\":{\"some\":\"value\"}}")?;
/// let out = merge([&a, &b]);
/// assert_eq!(out, Value::from_json_str("{\"foo\":{\"bar\":\"none\",\"some\":\"value\"}}")?);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn merge<'a, I>(sources: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    merge_with(sources, &MergeOptions::default())
        .expect("lenient merge never reports kind conflicts")
}

/// Merges `sources` left to right according to `options`.
///
/// # Errors
///
/// In [`MergeMode::Strict`], returns [`MergeError::KindConflict`] where an
/// object meets a scalar, date or pattern.
///
/// ```
/// # use objutil_core::{merge_with, MergeOptions, Value};
/// let a = Value::from_json_str("{\"port\":{\"http\":80}}")?;
/// let b = Value::from_json_str("{\"port\":8080}")?;
/// let err = merge_with([&a, &b], &MergeOptions::strict()).unwrap_err();
/// assert_eq!(err.to_string(), "cannot merge number into object at [port]");
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
pub fn merge_with<'a, I>(sources: I, options: &MergeOptions) -> Result<Value, MergeError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut sources = sources.into_iter();
    let Some(first) = sources.next() else {
        return Ok(Value::Object(BTreeMap::new()));
    };
    let mut acc = first.clone();
    for source in sources {
        acc = merge_pair(acc, source, &Path::new(), options.mode())?;
    }
    Ok(acc)
}

fn merge_pair(acc: Value, source: &Value, path: &Path, mode: MergeMode) -> Result<Value, MergeError> {
    if !acc.is_truthy() {
        return Ok(source.clone());
    }

    match (acc, source) {
        (Value::Array(mut items), Value::Array(more)) => {
            items.extend(more.iter().cloned());
            Ok(Value::Array(items))
        }
        (Value::Array(mut items), other) => {
            items.push(other.clone());
            Ok(Value::Array(items))
        }
        (acc, Value::Array(more)) => {
            let mut items = Vec::with_capacity(more.len() + 1);
            items.push(acc);
            items.extend(more.iter().cloned());
            Ok(Value::Array(items))
        }
        (Value::Object(mut map), Value::Object(incoming)) => {
            for (key, value) in incoming {
                let existing = map.remove(key).unwrap_or_default();
                let child_path = path.clone().with_segment(key.as_str());
                let merged = merge_pair(existing, value, &child_path, mode)?;
                map.insert(key.clone(), merged);
            }
            Ok(Value::Object(map))
        }
        (Value::Object(map), other) => match mode {
            MergeMode::Lenient => {
                tracing::debug!(%path, incoming = %other.kind(), "pairing object with scalar");
                Ok(Value::Array(vec![Value::Object(map), other.clone()]))
            }
            MergeMode::Strict => Err(MergeError::KindConflict {
                path: path.clone(),
                existing: Kind::Object,
                incoming: other.kind(),
            }),
        },
        (_, other) => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(text: &str) -> Value {
        Value::from_json_str(text).unwrap()
    }

    #[test]
    fn single_source_is_a_copy() {
        let src = json("{\"foo\":\"bar\"}");
        assert_eq!(merge([&src]), src);
    }

    #[test]
    fn no_sources_is_an_empty_object() {
        assert_eq!(merge(std::iter::empty()), json("{}"));
    }

    #[test]
    fn merges_two_and_three_objects() {
        let src = json("{\"foo\":\"bar\"}");
        let b = json("{\"bar\":\"none\"}");
        let c = json("{\"some\":\"value\"}");
        assert_eq!(merge([&src, &b]), json("{\"foo\":\"bar\",\"bar\":\"none\"}"));
        assert_eq!(merge([&src, &b, &c]), json("{\"foo\":\"bar\",\"bar\":\"none\",\"some\":\"value\"}"));
        assert_eq!(src, json("{\"foo\":\"bar\"}"));
    }

    #[test]
    fn falsy_accumulator_takes_the_source() {
        assert_eq!(merge([&Value::Null, &json("{\"a\":1}")]), json("{\"a\":1}"));
        assert_eq!(merge([&Value::from(0), &Value::from("x")]), Value::from("x"));
    }

    #[test]
    fn arrays_concatenate() {
        assert_eq!(merge([&json("[1,2]"), &json("[3]")]), json("[1,2,3]"));
        assert_eq!(merge([&json("[1]"), &json("{\"a\":1}")]), json("[1,{\"a\":1}]"));
        assert_eq!(merge([&json("{\"a\":1}"), &json("[2,3]")]), json("[{\"a\":1},2,3]"));
    }

    #[test]
    fn scalar_accumulator_is_replaced() {
        assert_eq!(merge([&Value::from("old"), &Value::from("new")]), Value::from("new"));
        assert_eq!(merge([&Value::from(1), &json("{\"a\":1}")]), json("{\"a\":1}"));
    }

    #[test]
    fn object_meeting_scalar_is_paired_in_lenient_mode() {
        let out = merge([&json("{\"a\":{\"b\":1}}"), &json("{\"a\":2}")]);
        assert_eq!(out, json("{\"a\":[{\"b\":1},2]}"));
    }

    #[test]
    fn object_meeting_scalar_fails_in_strict_mode() {
        let a = json("{\"a\":{\"b\":{\"c\":1}}}");
        let b = json("{\"a\":{\"b\":\"flat\"}}");
        let err = merge_with([&a, &b], &MergeOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            MergeError::KindConflict {
                path: Path::from(["a", "b"]),
                existing: Kind::Object,
                incoming: Kind::String,
            }
        );
    }

    #[test]
    fn strict_mode_still_merges_compatible_values() {
        let a = json("{\"a\":{\"b\":1},\"list\":[1]}");
        let b = json("{\"a\":{\"c\":2},\"list\":[2]}");
        let out = merge_with([&a, &b], &MergeOptions::strict()).unwrap();
        assert_eq!(out, json("{\"a\":{\"b\":1,\"c\":2},\"list\":[1,2]}"));
    }

    #[test]
    fn dates_are_opaque_leaves() {
        let date = Value::Date(chrono::DateTime::from_timestamp(10, 0).unwrap());
        assert_eq!(merge([&date, &json("{\"a\":1}")]), json("{\"a\":1}"));
        let paired = merge([&json("{\"a\":1}"), &date]);
        assert_eq!(paired, Value::Array(vec![json("{\"a\":1}"), date]));
    }
}
