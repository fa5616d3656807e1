//! Depth-capped structural equality.

use crate::{options::DEFAULT_MAX_DEPTH, EqualityOptions, Value};

/// Compares two values structurally, descending at most 100 levels.
///
/// Comparisons that would need to descend further report `false`.
///
/// ```
/// # use objutil_core::{deep_equals, Value};
/// let a = Value::from_json_str("{\"a\":[1,2]}")?;
/// let b = Value::from_json_str("{\"a\":[1,2]}")?;
/// assert!(deep_equals(&a, &b));
/// let c = Value::from_json_str("{\"a\":1}")?;
/// let d = Value::from_json_str("{\"a\":\"1\"}")?;
/// assert!(!deep_equals(&c, &d));
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    deep_equals_with_depth(a, b, DEFAULT_MAX_DEPTH)
}

/// Compares two values structurally with the depth budget from `options`.
#[must_use]
pub fn deep_equals_with(a: &Value, b: &Value, options: &EqualityOptions) -> bool {
    deep_equals_with_depth(a, b, options.max_depth())
}

/// Compares two values structurally, descending at most `max_depth` levels.
///
/// ```
/// # use objutil_core::{deep_equals_with_depth, Value};
/// let a = Value::from_json_str("[[[1]]]")?;
/// assert!(deep_equals_with_depth(&a, &a.clone(), 3));
/// assert!(!deep_equals_with_depth(&a, &a.clone(), 2));
/// # Ok::<(), objutil_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn deep_equals_with_depth(a: &Value, b: &Value, max_depth: usize) -> bool {
    let budget = i64::try_from(max_depth).unwrap_or(i64::MAX);
    let equal = equals(a, b, budget);
    tracing::trace!(equal, max_depth, "compared values");
    equal
}

fn equals(a: &Value, b: &Value, depth: i64) -> bool {
    if depth < 0 {
        return false;
    }
    if std::ptr::eq(a, b) {
        return true;
    }
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| equals(l, r, depth - 1))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.keys().eq(y.keys())
                && x.iter().zip(y.values()).all(|((_, l), r)| equals(l, r, depth - 1))
        }
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Pattern(x), Value::Pattern(y)) => x.to_string() == y.to_string(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pattern;

    fn json(text: &str) -> Value {
        Value::from_json_str(text).unwrap()
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from(1), |inner, _| Value::object([("n", inner)]))
    }

    #[test]
    fn key_order_is_irrelevant() {
        assert!(deep_equals(&json("{\"a\":1,\"b\":2}"), &json("{\"b\":2,\"a\":1}")));
    }

    #[test]
    fn kinds_must_match() {
        assert!(!deep_equals(&Value::Null, &Value::Undefined));
        assert!(!deep_equals(&json("[]"), &json("{}")));
        assert!(!deep_equals(&json("{\"a\":1}"), &json("{\"a\":1,\"b\":2}")));
        assert!(!deep_equals(&json("[1,2]"), &json("[1]")));
    }

    #[test]
    fn dates_compare_by_instant() {
        let a = chrono::DateTime::parse_from_rfc3339("2020-01-01T01:00:00+01:00").unwrap();
        let b = chrono::DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap();
        let a = Value::Date(a.with_timezone(&chrono::Utc));
        let b = Value::Date(b.with_timezone(&chrono::Utc));
        assert!(deep_equals(&a, &b));
    }

    #[test]
    fn patterns_compare_by_canonical_form() {
        let a = Value::Pattern(Pattern::new("a+b", "i").unwrap());
        let b = Value::Pattern(Pattern::new("a+b", "i").unwrap());
        let c = Value::Pattern(Pattern::new("a+b", "").unwrap());
        assert!(deep_equals(&a, &b));
        assert!(!deep_equals(&a, &c));
    }

    #[test]
    fn depth_budget_is_enforced() {
        let shallow = nested(DEFAULT_MAX_DEPTH);
        assert!(deep_equals(&shallow, &shallow.clone()));
        let deep = nested(DEFAULT_MAX_DEPTH + 1);
        assert!(!deep_equals(&deep, &deep.clone()));
        assert!(deep_equals_with(&deep, &deep.clone(), &EqualityOptions::default().with_max_depth(200)));
    }

    #[test]
    fn identical_reference_short_circuits_within_budget() {
        let deep = nested(10);
        assert!(deep_equals_with_depth(&deep, &deep, 0));
    }

    #[test]
    fn zero_budget_still_compares_scalars_and_empty_containers() {
        assert!(deep_equals_with_depth(&Value::from(1), &Value::from(1), 0));
        assert!(deep_equals_with_depth(&json("[]"), &json("[]"), 0));
        assert!(!deep_equals_with_depth(&json("[1]"), &json("[1]"), 0));
    }
}
