use serde::{ser::Error as _, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer, Value as JsonValue};

use crate::Value;

/// Callback consulted for every entry while stringifying.
///
/// It receives the entry key (`""` for the root, the decimal index inside
/// arrays) and the current value, and returns the value to write instead.
pub type Replacer<'a> = &'a dyn Fn(&str, &Value) -> Value;

const MAX_INDENT: usize = 10;

/// Renders `value` as JSON text.
///
/// The replacer, when given, runs top-down: the value it returns is what gets
/// written and descended into. Returning [`Value::Undefined`] drops an object
/// entry and turns an array item into `null`. `indent` pretty-prints with that
/// many spaces (capped at ten); `None` or `Some(0)` writes compact output.
///
/// Returns `None` only when the root is, or is replaced by, `Undefined`.
///
/// ```
/// # use objutil_core::{stringify, Value};
/// let value = Value::from_json_str("{\"user\":\"ann\",\"password\":\"hunter2\"}")?;
/// let redact = |key: &str, value: &Value| {
///     if key == "password" { Value::from("***") } else { value.clone() }
/// };
/// assert_eq!(
///     stringify(&value, Some(&redact), None).as_deref(),
///     Some("{\"password\":\"***\",\"user\":\"ann\"}")
/// );
/// assert_eq!(stringify(&Value::from_json_str("[1]")?, None, Some(2)).as_deref(), Some("[\n  1\n]"));
/// assert_eq!(stringify(&Value::Undefined, None, None), None);
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn stringify(value: &Value, replacer: Option<Replacer<'_>>, indent: Option<usize>) -> Option<String> {
    let json = to_json("", value, replacer)?;
    match render(&json, indent) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(error = %err, "failed to render JSON text");
            None
        }
    }
}

fn to_json(key: &str, value: &Value, replacer: Option<Replacer<'_>>) -> Option<JsonValue> {
    let replaced;
    let value = match replacer {
        Some(replace) => {
            replaced = replace(key, value);
            &replaced
        }
        None => value,
    };

    match value {
        Value::Array(items) => Some(JsonValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| to_json(&idx.to_string(), item, replacer).unwrap_or(JsonValue::Null))
                .collect(),
        )),
        Value::Object(map) => {
            let mut object = serde_json::Map::new();
            for (key, child) in map {
                if let Some(json) = to_json(key, child, replacer) {
                    object.insert(key.clone(), json);
                }
            }
            Some(JsonValue::Object(object))
        }
        leaf => leaf.to_json_value(),
    }
}

fn render(json: &JsonValue, indent: Option<usize>) -> Result<String, serde_json::Error> {
    let width = indent.unwrap_or(0).min(MAX_INDENT);
    if width == 0 {
        return serde_json::to_string(json);
    }
    let pad = " ".repeat(width);
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(pad.as_bytes()));
    json.serialize(&mut ser)?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}
