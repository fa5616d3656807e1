//! Classifiers and coercions for loosely typed scalar input.
//!
//! Configuration sources such as environment variables and query strings
//! deliver everything as text. These helpers decide what a piece of text
//! most likely means and convert it, trying numbers first, then booleans,
//! then ISO-8601 date-times.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::{Number, Value};

fn iso_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]{1,9})?(?:Z|[+-]([0-9]{2}):([0-9]{2}))$",
        )
        .expect("valid ISO-8601 shape pattern")
    })
}

/// Returns `true` for finite numbers and for strings holding one.
///
/// Only decimal text counts. Prefixed integer literals such as `"0x10"`,
/// `"0b1"` and `"0o7"` are rejected, where loosely typed scripting runtimes
/// would read them as numbers.
///
/// ```
/// # use objutil_core::{is_numeric, Value};
/// assert!(is_numeric(&Value::from(123)));
/// assert!(is_numeric(&Value::from("123.456")));
/// assert!(is_numeric(&Value::from("-1")));
/// assert!(!is_numeric(&Value::from("test")));
/// assert!(!is_numeric(&Value::from(true)));
/// ```
#[must_use]
pub fn is_numeric(value: &Value) -> bool {
    as_number(value).is_some()
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => Number::parse(s),
        _ => None,
    }
}

/// Returns `true` for `true` and for the string `"true"` in any letter case.
///
/// ```
/// # use objutil_core::{is_true_like, Value};
/// assert!(is_true_like(&Value::from(true)));
/// assert!(is_true_like(&Value::from("TRUE")));
/// assert!(!is_true_like(&Value::from("yes")));
/// ```
#[must_use]
pub fn is_true_like(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Returns `true` for `false` and for the string `"false"` in any letter case.
///
/// ```
/// # use objutil_core::{is_false_like, Value};
/// assert!(is_false_like(&Value::from(false)));
/// assert!(is_false_like(&Value::from("False")));
/// assert!(!is_false_like(&Value::Null));
/// ```
#[must_use]
pub fn is_false_like(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !*b,
        Value::String(s) => s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Returns `true` for strings holding a complete ISO-8601 date-time with a zone.
///
/// ```
/// # use objutil_core::{is_iso_date_time, Value};
/// assert!(is_iso_date_time(&Value::from("2020-02-29T12:30:00.123Z")));
/// assert!(!is_iso_date_time(&Value::from("2021-02-29T12:30:00Z")));
/// assert!(!is_iso_date_time(&Value::from("2020-02-29")));
/// ```
#[must_use]
pub fn is_iso_date_time(value: &Value) -> bool {
    value.as_str().and_then(parse_iso_date_time).is_some()
}

/// Parses `YYYY-MM-DDThh:mm:ss[.fraction](Z|±hh:mm)` into a UTC instant.
///
/// Years run from 1000 to 9999, days are checked against the month (leap
/// years included) and offsets are limited to `±19:59`. Anything else is
/// rejected.
///
/// ```
/// # use objutil_core::parse_iso_date_time;
/// let instant = parse_iso_date_time("2020-01-01T01:00:00+01:00").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2020-01-01T00:00:00+00:00");
/// assert!(parse_iso_date_time("2020-13-01T00:00:00Z").is_none());
/// ```
#[must_use]
pub fn parse_iso_date_time(text: &str) -> Option<DateTime<Utc>> {
    let caps = iso_shape().captures(text)?;
    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = field(1)?;
    let month = field(2)?;
    let day = field(3)?;
    if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    if day == 0 || day > days_in_month(year, month) {
        return None;
    }
    if field(4)? > 23 || field(5)? > 59 || field(6)? > 59 {
        return None;
    }
    if caps.get(7).is_some() && (field(7)? > 19 || field(8)? > 59) {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(text).ok()?;
    Some(parsed.with_timezone(&Utc))
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Converts loosely typed input to the value it most likely denotes.
///
/// Numeric input becomes a number, true-like and false-like input become
/// booleans and ISO-8601 date-times become dates. Everything else is returned
/// unchanged.
///
/// ```
/// # use objutil_core::{typed_value_from, Value};
/// assert_eq!(typed_value_from(&Value::from("123")), Value::from(123));
/// assert_eq!(typed_value_from(&Value::from("true")), Value::from(true));
/// assert_eq!(typed_value_from(&Value::from("FALSE")), Value::from(false));
/// assert_eq!(typed_value_from(&Value::from("test")), Value::from("test"));
/// ```
#[must_use]
pub fn typed_value_from(value: &Value) -> Value {
    if let Some(number) = as_number(value) {
        return Value::Number(number);
    }
    if is_true_like(value) {
        return Value::Bool(true);
    }
    if is_false_like(value) {
        return Value::Bool(false);
    }
    if let Some(date) = value.as_str().and_then(parse_iso_date_time) {
        return Value::Date(date);
    }
    tracing::trace!(kind = %value.kind(), "value left untyped");
    value.clone()
}
