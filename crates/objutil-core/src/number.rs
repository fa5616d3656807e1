use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number as JsonNumber;

use crate::CanonicalizeError;

/// A finite IEEE-754 double, the only numeric representation in [`Value`](crate::Value).
#[derive(Clone, Copy, Debug, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use objutil_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), objutil_core::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Parses numeric text the way loosely typed configuration sources write it.
    ///
    /// Surrounding whitespace is ignored. The text must start like a decimal
    /// number (a digit, a sign or a dot) and must denote a finite value, so
    /// `"Infinity"`, `"NaN"` and `""` are rejected.
    ///
    /// ```
    /// # use objutil_core::Number;
    /// assert_eq!(Number::parse(" 123.456 ").map(Number::get), Some(123.456));
    /// assert_eq!(Number::parse("1e3").map(Number::get), Some(1000.0));
    /// assert!(Number::parse("test").is_none());
    /// assert!(Number::parse("inf").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let first = trimmed.chars().next()?;
        if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
            return None;
        }
        let digits = trimmed.trim_start_matches(['+', '-']);
        if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let value: f64 = trimmed.parse().ok()?;
        Self::new(value).ok()
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Returns `true` for positive and negative zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Converts the number into a `serde_json::Number` using minimal integer representation when possible.
    ///
    /// ```
    /// # use objutil_core::Number;
    /// assert_eq!(Number::from(5).to_json_number().to_string(), "5");
    /// ```
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        if self.0.fract() == 0.0 && !(self.0 == 0.0 && self.0.is_sign_negative()) {
            if (i64::MIN as f64) <= self.0 && self.0 <= (i64::MAX as f64) {
                return JsonNumber::from(self.0 as i64);
            }
            if self.0 >= 0.0 && self.0 <= (u64::MAX as f64) {
                return JsonNumber::from(self.0 as u64);
            }
        }
        // Finite by construction, so `from_f64` cannot reject it.
        JsonNumber::from_f64(self.0).unwrap_or_else(|| JsonNumber::from(0))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e21 {
            write!(f, "{}", self.0 as i128)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl TryFrom<f64> for Number {
    type Error = CanonicalizeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
