//! Path-based reads and copy-on-write updates.
//!
//! All three operations walk the same way: empty segments are skipped, keys
//! address object entries, and canonical decimal segments address array
//! elements. Writes never touch the source; they rebuild the spine of the tree
//! along the path and clone everything else.

use std::collections::BTreeMap;

use crate::{AccessError, Path, PathSegment, Value};

/// Resolves `path` inside `source`.
///
/// Navigation stops with `None` as soon as it has to descend from a falsy
/// node, from a leaf, through a missing key, or past the end of an array. A
/// resolved [`Value::Undefined`] is reported as `None` as well.
///
/// ```
/// # use objutil_core::{get, Path, Value};
/// let src = Value::from_json_str("{\"foo\":[0,1,2,3]}")?;
/// assert_eq!(get(&Path::from(["foo", "2"]), &src), Some(&Value::from(2)));
/// assert_eq!(get(&Path::from(["foo", "9"]), &src), None);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn get<'a>(path: &Path, source: &'a Value) -> Option<&'a Value> {
    let mut current = source;
    for segment in path.effective() {
        if !current.is_truthy() {
            tracing::trace!(%path, %segment, "stopped at falsy node");
            return None;
        }
        current = child(current, segment)?;
    }
    if current.is_undefined() {
        None
    } else {
        Some(current)
    }
}

/// Resolves `path` inside `source`, returning `default` when [`get`] finds nothing.
///
/// ```
/// # use objutil_core::{get_or, Path, Value};
/// let src = Value::from_json_str("{\"count\":0}")?;
/// let fallback = Value::from("n/a");
/// assert_eq!(get_or(&Path::parse("count"), &src, &fallback), &Value::from(0));
/// assert_eq!(get_or(&Path::parse("count.inner"), &src, &fallback), &fallback);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn get_or<'a>(path: &Path, source: &'a Value, default: &'a Value) -> &'a Value {
    get(path, source).unwrap_or(default)
}

fn child<'a>(node: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment.as_str()),
        Value::Array(values) => segment.as_index().and_then(|index| values.get(index)),
        _ => None,
    }
}

/// Most [`Value::Undefined`] holes a single [`set`] may add when writing past the end of an array.
pub const MAX_ARRAY_GAP: usize = 10_000;

/// Returns a copy of `source` with `value` installed at `path`.
///
/// Missing intermediate entries are created as empty objects. A node that
/// cannot hold children (a falsy value, a scalar, a date or a pattern) is
/// replaced by an empty object. Writing past the end of an array extends it,
/// filling the gap with [`Value::Undefined`], at most [`MAX_ARRAY_GAP`] holes.
///
/// # Errors
///
/// [`AccessError::EmptyPath`] when the path has no non-empty segment,
/// [`AccessError::NotAnIndex`] when an array is addressed by a key, and
/// [`AccessError::IndexOutOfRange`] when an index lies further past the end
/// of an array than [`MAX_ARRAY_GAP`] allows.
///
/// ```
/// # use objutil_core::{set, Path, Value};
/// let src = Value::from_json_str("{\"foo\":\"bar\",\"test\":[0,1,2]}")?;
/// let out = set(&Path::from(["test", "1"]), &src, Value::from("value"))?;
/// assert_eq!(out, Value::from_json_str("{\"foo\":\"bar\",\"test\":[0,\"value\",2]}")?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn set(path: &Path, source: &Value, value: Value) -> Result<Value, AccessError> {
    let segments = path.effective();
    if segments.is_empty() {
        return Err(AccessError::EmptyPath);
    }
    tracing::debug!(%path, "setting value");
    set_element(source.clone(), Path::new(), &segments, value)
}

fn set_element(
    node: Value,
    path_behind: Path,
    path_ahead: &[&PathSegment],
    value: Value,
) -> Result<Value, AccessError> {
    let Some((segment, rest)) = path_ahead.split_first() else {
        return Ok(value);
    };

    match node {
        Value::Object(mut map) => {
            let existing = map.remove(segment.as_str()).unwrap_or_default();
            let new_path = path_behind.with_segment((*segment).clone());
            let patched = set_element(existing, new_path, rest, value)?;
            map.insert(segment.as_str().to_owned(), patched);
            Ok(Value::Object(map))
        }
        Value::Array(mut values) => {
            let Some(index) = segment.as_index() else {
                return Err(AccessError::NotAnIndex {
                    segment: segment.to_string(),
                    path: path_behind,
                });
            };
            if index >= values.len() {
                let len = values.len();
                let out_of_range = || AccessError::IndexOutOfRange { index, len, path: path_behind.clone() };
                if index - len > MAX_ARRAY_GAP {
                    return Err(out_of_range());
                }
                values.try_reserve(index - len + 1).map_err(|_| out_of_range())?;
                tracing::trace!(path = %path_behind, index, len, "extending array");
                values.resize(index + 1, Value::Undefined);
            }
            let existing = std::mem::take(&mut values[index]);
            let new_path = path_behind.with_segment((*segment).clone());
            values[index] = set_element(existing, new_path, rest, value)?;
            Ok(Value::Array(values))
        }
        other => {
            if other.is_truthy() {
                tracing::trace!(path = %path_behind, kind = %other.kind(), "replacing leaf with object");
            }
            set_element(Value::Object(BTreeMap::new()), path_behind, path_ahead, value)
        }
    }
}

/// Returns a copy of `source` with the value at `path` excised.
///
/// Array elements are spliced out, so later elements shift down by one.
/// Paths that lead nowhere, and sources that are leaves, yield a plain copy.
///
/// ```
/// # use objutil_core::{remove, Path, Value};
/// let src = Value::from_json_str("{\"foo\":{\"bar\":[0,1,2]}}")?;
/// let out = remove(&Path::from(["foo", "bar", "1"]), &src);
/// assert_eq!(out, Value::from_json_str("{\"foo\":{\"bar\":[0,2]}}")?);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn remove(path: &Path, source: &Value) -> Value {
    tracing::debug!(%path, "removing value");
    remove_element(source, &path.effective())
}

fn remove_element(node: &Value, path_ahead: &[&PathSegment]) -> Value {
    let Some((segment, rest)) = path_ahead.split_first() else {
        return node.clone();
    };

    match node {
        Value::Array(values) => {
            let Some(target) = segment.as_index().filter(|index| *index < values.len()) else {
                return node.clone();
            };
            let mut list = Vec::with_capacity(values.len());
            for (index, item) in values.iter().enumerate() {
                if index != target {
                    list.push(item.clone());
                } else if !rest.is_empty() {
                    list.push(remove_element(item, rest));
                }
            }
            Value::Array(list)
        }
        Value::Object(map) => {
            let mut object = BTreeMap::new();
            for (key, child) in map {
                if key != segment.as_str() {
                    object.insert(key.clone(), child.clone());
                } else if !rest.is_empty() {
                    object.insert(key.clone(), remove_element(child, rest));
                }
            }
            Value::Object(object)
        }
        leaf => leaf.clone(),
    }
}
