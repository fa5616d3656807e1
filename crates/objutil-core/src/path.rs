use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn default_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[./]").expect("valid delimiter pattern"))
}

/// A single step of a [`Path`]: an object key, or an array index written in decimal.
///
/// ```
/// # use objutil_core::PathSegment;
/// assert_eq!(PathSegment::index(2).as_index(), Some(2));
/// assert_eq!(PathSegment::key("02").as_index(), None);
/// assert_eq!(PathSegment::key("name").as_str(), "name");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment(String);

impl PathSegment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self(value.to_string())
    }

    /// The segment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty segments are skipped during traversal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the segment as an array index.
    ///
    /// Only canonical non-negative decimal integers qualify: `"0"` and `"12"`
    /// do, `"01"`, `"-1"` and `"1.0"` do not.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let text = self.0.as_str();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if text.len() > 1 && text.starts_with('0') {
            return None;
        }
        text.parse().ok()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::key(value)
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::index(value)
    }
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PathSegment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = PathSegment;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string key or non-negative integer index")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PathSegment::key(v))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PathSegment(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PathSegment(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let index = u64::try_from(v).map_err(|_| E::custom("index must not be negative"))?;
                self.visit_u64(index)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// An ordered, immutable address of a location inside a nested [`Value`](crate::Value).
///
/// Paths are usually parsed from a delimited key such as `"foo.bar/0"`:
///
/// ```
/// # use objutil_core::Path;
/// let path = Path::parse("this.and/that");
/// let parts: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
/// assert_eq!(parts, ["this", "and", "that"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `key` on `.` or `/`.
    ///
    /// Empty pieces are kept; traversal skips them.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        Self::parse_with(key, default_delimiter())
    }

    /// Splits `key` on every match of `delimiter`.
    ///
    /// ```
    /// # use objutil_core::Path;
    /// let delimiter = regex::Regex::new("[:;]").unwrap();
    /// assert_eq!(Path::parse_with("this;and:that", &delimiter), Path::from(["this", "and", "that"]));
    /// ```
    #[must_use]
    pub fn parse_with(key: &str, delimiter: &Regex) -> Self {
        Self(delimiter.split(key).map(PathSegment::key).collect())
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<PathSegment>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Iterates over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }

    /// Returns the number of segments, empty ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path has no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments that traversal actually follows.
    pub(crate) fn effective(&self) -> Vec<&PathSegment> {
        self.0.iter().filter(|segment| !segment.is_empty()).collect()
    }

    /// Pushes a new segment in-place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<&str>> for Path {
    fn from(value: Vec<&str>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Vec<String>> for Path {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(value: [&str; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<S> FromIterator<S> for Path
where
    S: Into<PathSegment>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Splits `key` into a [`Path`], on `delimiter` when given and on `.` or `/` otherwise.
///
/// ```
/// # use objutil_core::{to_path, Path};
/// assert_eq!(to_path("a/b.c", None), Path::from(["a", "b", "c"]));
/// ```
#[must_use]
pub fn to_path(key: &str, delimiter: Option<&Regex>) -> Path {
    match delimiter {
        Some(delimiter) => Path::parse_with(key, delimiter),
        None => Path::parse(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_empty_pieces() {
        let path = Path::parse("a..b/");
        assert_eq!(path, Path::from(["a", "", "b", ""]));
        assert_eq!(path.effective().len(), 2);
    }

    #[test]
    fn serde_accepts_integer_segments() {
        let path: Path = serde_json::from_str("[\"foo\",\"bar\",1]").unwrap();
        assert_eq!(path, Path::from(["foo", "bar", "1"]));
        assert_eq!(serde_json::to_string(&path).unwrap(), "[\"foo\",\"bar\",\"1\"]");
        assert!(serde_json::from_str::<Path>("[-1]").is_err());
    }

    #[test]
    fn index_segments_are_canonical() {
        assert_eq!(PathSegment::key("0").as_index(), Some(0));
        assert_eq!(PathSegment::key("10").as_index(), Some(10));
        for text in ["", "01", "-1", "1.0", "a", " 1"] {
            assert_eq!(PathSegment::key(text).as_index(), None, "{text:?}");
        }
    }

    #[test]
    fn display_lists_segments() {
        let path = Path::new().with_segment("foo").with_segment(3usize);
        assert_eq!(path.to_string(), "[foo 3]");
    }
}
