use std::fmt;

use serde::{Deserialize, Serialize};

/// Depth budget used by [`deep_equals`](crate::deep_equals).
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Controls what a deep merge does when an object meets a scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeMode {
    /// Pair the two values up in a two-element array (default).
    #[default]
    Lenient,
    /// Fail with [`MergeError::KindConflict`](crate::MergeError::KindConflict).
    Strict,
}

/// Configuration passed to [`merge_with`](crate::merge_with).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    mode: MergeMode,
}

impl MergeOptions {
    /// Returns the configured collision mode.
    ///
    /// ```
    /// # use objutil_core::{MergeMode, MergeOptions};
    /// assert_eq!(MergeOptions::default().mode(), MergeMode::Lenient);
    /// ```
    #[must_use]
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Sets the collision mode.
    ///
    /// ```
    /// # use objutil_core::{MergeMode, MergeOptions};
    /// let opts = MergeOptions::default().with_mode(MergeMode::Strict);
    /// assert_eq!(opts.mode(), MergeMode::Strict);
    /// ```
    #[must_use]
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for strict mode.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_mode(MergeMode::Strict)
    }
}

/// Configuration passed to [`deep_equals_with`](crate::deep_equals_with).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualityOptions {
    max_depth: usize,
}

impl Default for EqualityOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl EqualityOptions {
    /// Returns how many levels of nesting a comparison may descend.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sets the depth budget.
    ///
    /// ```
    /// # use objutil_core::EqualityOptions;
    /// let opts = EqualityOptions::default().with_max_depth(3);
    /// assert_eq!(opts.max_depth(), 3);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Lenient => f.write_str("lenient"),
            MergeMode::Strict => f.write_str("strict"),
        }
    }
}
