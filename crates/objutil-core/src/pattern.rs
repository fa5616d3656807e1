use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::PatternError;

/// A compiled regular expression carried as a value.
///
/// A pattern remembers the source and flags it was built from. Two patterns
/// are equal when their canonical `/source/flags` forms are equal, regardless
/// of whether they share the compiled program.
///
/// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot matches
/// newline), `x` (ignore whitespace). The flags `g`, `u` and `y` are accepted
/// and preserved but do not change matching.
///
/// ```
/// # use objutil_core::Pattern;
/// let pattern = Pattern::new("^foo", "i")?;
/// assert!(pattern.is_match("FOOBAR"));
/// assert_eq!(pattern.to_string(), "/^foo/i");
/// # Ok::<(), objutil_core::PatternError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern from its source and flags.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let flags = flags.into();
        let mut builder = RegexBuilder::new(&source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'g' | 'u' | 'y' => {}
                other => return Err(PatternError::UnsupportedFlag { flag: other }),
            }
        }
        let regex = builder.build()?;
        Ok(Self { source, flags, regex })
    }

    /// The pattern source without delimiters.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flags the pattern was built with.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Returns `true` when the pattern matches somewhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_uses_canonical_form() {
        let a = Pattern::new("a+", "g").unwrap();
        let b = Pattern::new("a+", "g").unwrap();
        let c = Pattern::new("a+", "i").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Pattern::new("a", "q").unwrap_err();
        assert_eq!(err, PatternError::UnsupportedFlag { flag: 'q' });
    }

    #[test]
    fn invalid_source_is_rejected() {
        assert!(matches!(Pattern::new("(", ""), Err(PatternError::Regex(_))));
    }
}
