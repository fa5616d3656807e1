//! Fuzzing harnesses for `objutil-core`.
//!
//! Each public function accepts raw bytes, builds values and paths from them
//! and drives one area of the library. Recoverable errors are swallowed so
//! fuzzers can keep exploring; broken invariants panic.
//!
//! # Examples
//!
//! Run the canonicalization harness on a JSON snippet:
//!
//! ```
//! objutil_fuzz::fuzz_canonicalization(b"{\"a\":1}");
//! ```
//!
//! Drive get/set/remove with deterministic input:
//!
//! ```
//! objutil_fuzz::fuzz_path_ops(&[1, 2, 3, 4]);
//! ```
//!
//! Merge and compare values built from arbitrary bytes:
//!
//! ```
//! objutil_fuzz::fuzz_merge(b"example");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use objutil_core::{
    clone_value, deep_equals, get, merge, merge_with, remove, set, stringify, underscore_keys, MergeOptions,
    Path, PathSegment, Value,
};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;
const MAX_PATH_LEN: u8 = 5;
const MAX_INDEX: u8 = 8;
const KEY_ALPHABET: &[u8] = b"abcAB_.";

/// Feeds arbitrary bytes through JSON and YAML canonicalization and back out.
///
/// ```
/// objutil_fuzz::fuzz_canonicalization(b"{\"key\":\"value\"}");
/// ```
pub fn fuzz_canonicalization(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for value in [Value::from_json_str(text), Value::from_yaml_str(text)].into_iter().flatten() {
        let Some(rendered) = stringify(&value, None, None) else {
            assert!(value.is_undefined(), "only undefined renders to nothing");
            continue;
        };
        let reparsed = Value::from_json_str(&rendered).expect("rendered JSON parses");
        assert_eq!(stringify(&reparsed, None, Some(2)), stringify(&value, None, Some(2)));
    }
}

/// Drives get, set and remove with generated values and paths.
///
/// ```
/// objutil_fuzz::fuzz_path_ops(b"seed");
/// ```
pub fn fuzz_path_ops(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(source) = random_value(&mut unstructured) else {
        return;
    };
    let Ok(path) = random_path(&mut unstructured) else {
        return;
    };
    let snapshot = clone_value(&source);

    let _ = get(&path, &source);
    if let Ok(updated) = set(&path, &source, Value::from("fuzz")) {
        assert_eq!(get(&path, &updated), Some(&Value::from("fuzz")));
        let _ = remove(&path, &updated);
    }
    let _ = remove(&path, &source);

    assert_eq!(source, snapshot, "source must not change");
}

/// Merges generated values in both modes and checks equality invariants.
///
/// ```
/// objutil_fuzz::fuzz_merge(b"merge fuzz");
/// ```
pub fn fuzz_merge(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let (Some(lhs), Some(rhs)) = (random_value(&mut unstructured), random_value(&mut unstructured)) else {
        return;
    };

    let merged = merge([&lhs, &rhs]);
    if let Ok(strict) = merge_with([&lhs, &rhs], &MergeOptions::strict()) {
        assert_eq!(strict, merged, "strict merge agrees when it succeeds");
    }
    assert!(deep_equals(&merge([&lhs]), &lhs));
    let _ = underscore_keys(&merged);
}

fn random_value(unstructured: &mut Unstructured<'_>) -> Option<Value> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Value::from_json_value(value).ok()
}

fn random_path(unstructured: &mut Unstructured<'_>) -> Result<Path, arbitrary::Error> {
    let len = unstructured.int_in_range::<u8>(0..=MAX_PATH_LEN)?;
    let mut path = Path::new();
    for _ in 0..len {
        let segment = if unstructured.arbitrary()? {
            PathSegment::index(usize::from(unstructured.int_in_range::<u8>(0..=MAX_INDEX)?))
        } else {
            PathSegment::key(random_key(unstructured)?)
        };
        path.push(segment);
    }
    Ok(path)
}

fn random_key(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=3)?);
    let mut key = String::with_capacity(len);
    for _ in 0..len {
        key.push(char::from(*unstructured.choose(KEY_ALPHABET)?));
    }
    Ok(key)
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_key(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        Ok(JsonNumber::from(unstructured.arbitrary::<i32>()?))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}
