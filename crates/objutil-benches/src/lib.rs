//! Synthetic corpora for the `objutil` Criterion benchmarks.
//!
//! Each [`Corpus`] describes the shape of a generated tree. Building it yields
//! a [`Dataset`]: a base value, a smaller overlay to merge into it, and a target
//! path that reaches the deepest leaf.
//!
//! # Examples
//!
//! ```
//! let corpus = objutil_benches::available_corpora()
//!     .iter()
//!     .find(|c| c.name() == "wide")
//!     .expect("registered corpus");
//! let dataset = corpus.build();
//! assert!(dataset.base().get(dataset.target()).is_some());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;

use objutil_core::{Path, Value};

/// Shape of a generated benchmark tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
    name: &'static str,
    width: usize,
    depth: usize,
}

static CORPORA: [Corpus; 3] = [
    Corpus { name: "wide", width: 48, depth: 2 },
    Corpus { name: "deep", width: 2, depth: 12 },
    Corpus { name: "config", width: 8, depth: 4 },
];

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Identifier used as the benchmark parameter.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entries per object.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Levels of nesting above the leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Generates the dataset. The output is deterministic.
    #[must_use]
    pub fn build(&self) -> Dataset {
        let base = tree(self.width, self.depth, 0);
        let overlay = tree(self.width.div_ceil(2), self.depth, 1);
        let target = (0..self.depth).map(|_| key(0)).collect();
        Dataset { base, overlay, target }
    }
}

/// Values generated from a [`Corpus`].
#[derive(Clone, Debug)]
pub struct Dataset {
    base: Value,
    overlay: Value,
    target: Path,
}

impl Dataset {
    /// The full tree.
    #[must_use]
    pub fn base(&self) -> &Value {
        &self.base
    }

    /// A narrower tree sharing keys with [`Dataset::base`].
    #[must_use]
    pub fn overlay(&self) -> &Value {
        &self.overlay
    }

    /// Path of the first leaf at the bottom of the base tree.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Number of values in the base tree, containers included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        count(&self.base)
    }
}

fn key(index: usize) -> String {
    format!("node{index}Value")
}

fn tree(width: usize, depth: usize, seed: usize) -> Value {
    if depth == 0 {
        return leaf(seed);
    }
    let mut object = BTreeMap::new();
    for index in 0..width {
        let child = if index % 3 == 2 {
            Value::Array((0..width.min(4)).map(|item| leaf(seed + item)).collect())
        } else {
            tree(width, depth - 1, seed + index)
        };
        object.insert(key(index), child);
    }
    Value::Object(object)
}

fn leaf(seed: usize) -> Value {
    match seed % 3 {
        0 => Value::from(i32::try_from(seed % 1000).unwrap_or_default()),
        1 => Value::from(format!("value-{seed}")),
        _ => Value::from(seed % 2 == 0),
    }
}

fn count(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(count).sum::<usize>(),
        Value::Object(map) => 1 + map.values().map(count).sum::<usize>(),
        _ => 1,
    }
}
