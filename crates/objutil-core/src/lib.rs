//! Path-addressed structural operations over nested, dynamically typed values.
//!
//! `objutil-core` works on a single closed [`Value`] tree: objects, arrays,
//! scalars, dates and patterns. Every operation borrows its input and returns
//! a new tree, so callers never observe a value changing underneath them.
//!
//! ```
//! use objutil_core::{deep_equals, merge, Path, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let defaults = Value::from_json_str("{\"server\":{\"port\":80,\"tags\":[\"a\"]}}")?;
//!     let overrides = Value::from_json_str("{\"server\":{\"host\":\"example.org\",\"tags\":[\"b\"]}}")?;
//!
//!     let config = merge([&defaults, &overrides]);
//!     assert_eq!(config.get(&Path::parse("server.host")), Some(&Value::from("example.org")));
//!     assert_eq!(config.get(&Path::parse("server/tags/1")), Some(&Value::from("b")));
//!
//!     let moved = config.set(&Path::parse("server.port"), Value::from(8080))?;
//!     assert!(!deep_equals(&moved, &config));
//!     assert_eq!(config.get(&Path::parse("server.port")), Some(&Value::from(80)));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
mod clone;
pub mod equal;
mod error;
pub mod keys;
mod kind;
pub mod merge;
mod number;
mod options;
mod path;
mod pattern;
pub mod scalar;
mod stringify;
mod util;
mod value;

pub use access::{get, get_or, remove, set, MAX_ARRAY_GAP};
pub use clone::clone_value;
pub use equal::{deep_equals, deep_equals_with, deep_equals_with_depth};
pub use error::{AccessError, CanonicalizeError, DecodeError, MergeError, PatternError};
pub use keys::{camel_keys, to_camel, to_upper_snake, transform_keys, underscore_keys};
pub use kind::{classify, Kind};
pub use merge::{merge, merge_with};
pub use number::Number;
pub use options::{EqualityOptions, MergeMode, MergeOptions, DEFAULT_MAX_DEPTH};
pub use path::{to_path, Path, PathSegment};
pub use pattern::Pattern;
pub use scalar::{
    is_false_like, is_iso_date_time, is_numeric, is_true_like, parse_iso_date_time, typed_value_from,
};
pub use stringify::{stringify, Replacer};
pub use util::{decode64, encode64, exclude, is_html_page, unique};
pub use value::Value;

/// Returns the semantic version of the `objutil-core` crate.
///
/// ```
/// assert!(!objutil_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
