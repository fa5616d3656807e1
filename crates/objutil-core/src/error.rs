use thiserror::Error;

use crate::{Kind, Path};

/// Errors that can occur while canonicalizing external data into [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML maps may only contain string keys.
    #[error("unsupported YAML key type: {found}")]
    NonStringYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags have no counterpart in the value model.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors emitted by [`Value::set`](crate::Value::set).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The path had no non-empty segment, so there is nowhere to write.
    #[error("cannot set a value at an empty path")]
    EmptyPath,
    /// An array was addressed with a segment that is not an array index.
    #[error("segment {segment:?} at {path} is not an array index")]
    NotAnIndex {
        /// The offending segment.
        segment: String,
        /// The path of the array that was addressed.
        path: Path,
    },
    /// An index lay too far past the end of an array to pad up to it.
    #[error("index {index} at {path} is too far past the end of an array of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the array that was addressed.
        len: usize,
        /// The path of the array that was addressed.
        path: Path,
    },
}

/// Errors emitted by [`merge_with`](crate::merge_with) in strict mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// An object met a scalar of another kind at the same location.
    #[error("cannot merge {incoming} into {existing} at {path}")]
    KindConflict {
        /// Location of the collision.
        path: Path,
        /// Kind of the accumulated value.
        existing: Kind,
        /// Kind of the value being merged in.
        incoming: Kind,
    },
}

/// Errors emitted when building a [`Pattern`](crate::Pattern).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatternError {
    /// The pattern source failed to compile.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    /// The flag is not understood by the pattern engine.
    #[error("unsupported pattern flag: {flag}")]
    UnsupportedFlag {
        /// The offending flag character.
        flag: char,
    },
}

/// Errors emitted by [`decode64`](crate::decode64).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input was not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
