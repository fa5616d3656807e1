use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{deep_equals, DecodeError, Value};

/// Encodes the UTF-8 bytes of `text` as padded standard base64.
///
/// ```
/// # use objutil_core::encode64;
/// assert_eq!(encode64("hello"), "aGVsbG8=");
/// ```
#[must_use]
pub fn encode64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decodes padded standard base64 into text.
///
/// Byte sequences that are not valid UTF-8 are replaced with U+FFFD.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] when `encoded` is not valid base64.
///
/// ```
/// # use objutil_core::decode64;
/// assert_eq!(decode64("aGVsbG8=")?, "hello");
/// assert!(decode64("not base64!").is_err());
/// # Ok::<(), objutil_core::DecodeError>(())
/// ```
pub fn decode64(encoded: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Returns `true` when `name` ends in `.htm` or `.html`.
///
/// ```
/// # use objutil_core::is_html_page;
/// assert!(is_html_page("index.html"));
/// assert!(is_html_page("docs/page.htm"));
/// assert!(!is_html_page("index.html.bak"));
/// ```
#[must_use]
pub fn is_html_page(name: &str) -> bool {
    name.ends_with(".html") || name.ends_with(".htm")
}

/// Returns the values with structural duplicates removed, keeping first occurrences.
///
/// ```
/// # use objutil_core::{unique, Value};
/// let values = [Value::from(1), Value::from("1"), Value::from(1)];
/// assert_eq!(unique(&values), vec![Value::from(1), Value::from("1")]);
/// ```
#[must_use]
pub fn unique(values: &[Value]) -> Vec<Value> {
    let mut kept: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !kept.iter().any(|seen| deep_equals(seen, value)) {
            kept.push(value.clone());
        }
    }
    kept
}

/// Returns a copy of an object without the listed keys.
///
/// Non-object values are returned as plain copies.
///
/// ```
/// # use objutil_core::{exclude, Value};
/// let value = Value::from_json_str("{\"a\":1,\"b\":2,\"c\":3}")?;
/// assert_eq!(exclude(&value, ["a", "c"]), Value::from_json_str("{\"b\":2}")?);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn exclude<I, K>(value: &Value, keys: I) -> Value
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let Value::Object(map) = value else {
        return value.clone();
    };
    let mut object: BTreeMap<String, Value> = map.clone();
    for key in keys {
        object.remove(key.as_ref());
    }
    Value::Object(object)
}
