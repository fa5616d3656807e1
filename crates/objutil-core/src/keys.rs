//! Key renaming: case conversion helpers and the recursive walk that applies them.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::Value;

fn upper_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.?([A-Z]+)").expect("valid upper-run pattern"))
}

fn camel_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z])|[\s\-_]+([A-Za-z0-9_])").expect("valid camel-boundary pattern")
    })
}

/// Converts an identifier to `UPPER_SNAKE_CASE`.
///
/// Every run of capitals starts a new word (a `.` right before the run is
/// dropped), a single leading underscore is stripped and doubled underscores
/// collapse.
///
/// ```
/// # use objutil_core::to_upper_snake;
/// assert_eq!(to_upper_snake("aB"), "A_B");
/// assert_eq!(to_upper_snake("aBBBB"), "A_BBBB");
/// assert_eq!(to_upper_snake("aBCdEF"), "A_BCD_EF");
/// assert_eq!(to_upper_snake("a_bcd_ef"), "A_BCD_EF");
/// assert_eq!(to_upper_snake("A_BCD_EF"), "A_BCD_EF");
/// ```
#[must_use]
pub fn to_upper_snake(key: &str) -> String {
    let split = upper_run().replace_all(key, |caps: &Captures<'_>| format!("_{}", caps[1].to_lowercase()));
    let trimmed = split.strip_prefix('_').unwrap_or(&split);
    trimmed.replace("__", "_").to_uppercase()
}

/// Converts an identifier to `camelCase`.
///
/// Input that is entirely upper case is lower-cased first. Runs of
/// whitespace, `-` and `_` are removed and the character after them is
/// capitalized; a leading capital is lower-cased.
///
/// ```
/// # use objutil_core::to_camel;
/// assert_eq!(to_camel("FOO_BAR2"), "fooBar2");
/// assert_eq!(to_camel("foo bar none"), "fooBarNone");
/// assert_eq!(to_camel("FOO BAR NONE"), "fooBarNone");
/// assert_eq!(to_camel("fooBar"), "fooBar");
/// ```
#[must_use]
pub fn to_camel(key: &str) -> String {
    let lowered;
    let source = if key.to_uppercase() == key {
        lowered = key.to_lowercase();
        lowered.as_str()
    } else {
        key
    };
    camel_boundary()
        .replace_all(source, |caps: &Captures<'_>| match caps.get(2) {
            Some(next) => next.as_str().to_uppercase(),
            None => caps[1].to_lowercase(),
        })
        .into_owned()
}

/// Returns a copy of `value` with every object key passed through `key_fn`.
///
/// Arrays are walked element by element. Dates, patterns and scalars are
/// copied as they are. When two keys of one object map to the same new key,
/// the one that sorts last wins.
///
/// ```
/// # use objutil_core::{transform_keys, Value};
/// let src = Value::from_json_str("{\"a\":{\"b\":[{\"c\":1}]}}")?;
/// let out = transform_keys(&src, |key: &str| key.to_uppercase());
/// assert_eq!(out, Value::from_json_str("{\"A\":{\"B\":[{\"C\":1}]}}")?);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn transform_keys<F>(value: &Value, key_fn: F) -> Value
where
    F: Fn(&str) -> String,
{
    walk(value, &key_fn)
}

fn walk<F>(value: &Value, key_fn: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::Array(values) => Value::Array(values.iter().map(|item| walk(item, key_fn)).collect()),
        Value::Object(map) => {
            let mut object = BTreeMap::new();
            for (key, child) in map {
                let renamed = key_fn(key);
                if object.contains_key(&renamed) {
                    tracing::debug!(%key, %renamed, "renamed key collides with an earlier key");
                }
                object.insert(renamed, walk(child, key_fn));
            }
            Value::Object(object)
        }
        leaf => leaf.clone(),
    }
}

/// Rewrites every key of `value` with [`to_camel`].
///
/// ```
/// # use objutil_core::{camel_keys, Value};
/// let src = Value::from_json_str("{\"fooBar\":\"\",\"FOO_BAR2\":\"\"}")?;
/// assert_eq!(camel_keys(&src), Value::from_json_str("{\"fooBar\":\"\",\"fooBar2\":\"\"}")?);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn camel_keys(value: &Value) -> Value {
    transform_keys(value, to_camel)
}

/// Rewrites every key of `value` with [`to_upper_snake`].
#[must_use]
pub fn underscore_keys(value: &Value) -> Value {
    transform_keys(value, to_upper_snake)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pattern;
    use proptest::{prelude::*, string::string_regex};

    fn json(text: &str) -> Value {
        Value::from_json_str(text).unwrap()
    }

    #[test]
    fn camel_case_handles_separators() {
        assert_eq!(to_camel("foo-bar_none"), "fooBarNone");
        assert_eq!(to_camel("FOO -_BAR_NONE"), "fooBarNone");
        assert_eq!(to_camel("Foo"), "foo");
    }

    #[test]
    fn upper_snake_drops_dot_before_capitals() {
        assert_eq!(to_upper_snake("a.Bc"), "A_BC");
        assert_eq!(to_upper_snake("fooBar"), "FOO_BAR");
    }

    #[test]
    fn camel_keys_recurse_into_objects_and_arrays() {
        let src = json("{\"fooBar\":{\"FOO_BAR2\":\"\"}}");
        assert_eq!(camel_keys(&src), json("{\"fooBar\":{\"fooBar2\":\"\"}}"));

        let src = json("{\"fooBar\":[{\"FOO_BAR2\":\"\"},1,\"str\",true]}");
        assert_eq!(camel_keys(&src), json("{\"fooBar\":[{\"fooBar2\":\"\"},1,\"str\",true]}"));
    }

    #[test]
    fn underscore_keys_recurse_into_objects_and_arrays() {
        let src = json("{\"fooBar\":\"\",\"FOO_BAR2\":\"\"}");
        assert_eq!(underscore_keys(&src), json("{\"FOO_BAR\":\"\",\"FOO_BAR2\":\"\"}"));

        let src = json("{\"fooBar\":{\"FOO_BAR2\":\"\"}}");
        assert_eq!(underscore_keys(&src), json("{\"FOO_BAR\":{\"FOO_BAR2\":\"\"}}"));

        let src = json("{\"FOO_BAR\":[{\"FOO_BAR2\":\"\"},1,\"str\",true]}");
        assert_eq!(underscore_keys(&src), src);
    }

    #[test]
    fn opaque_leaves_are_left_alone() {
        let pattern = Value::Pattern(Pattern::new("x", "g").unwrap());
        let date = Value::Date(chrono::DateTime::from_timestamp(0, 0).unwrap());
        let src = Value::object([("someRe", pattern.clone()), ("someDate", date.clone())]);
        let out = underscore_keys(&src);
        assert_eq!(out, Value::object([("SOME_RE", pattern), ("SOME_DATE", date)]));
    }

    #[test]
    fn transform_leaves_source_untouched() {
        let src = json("{\"aB\":{\"cD\":1}}");
        let snapshot = src.clone();
        let _ = underscore_keys(&src);
        assert_eq!(src, snapshot);
    }

    proptest! {
        #[test]
        fn camel_survives_upper_snake_round_trip(key in string_regex("[a-z]{1,6}([A-Z][a-z]{1,6}){0,3}").unwrap()) {
            let camel = to_camel(&key);
            prop_assert_eq!(to_camel(&to_upper_snake(&camel)), camel);
        }
    }
}
