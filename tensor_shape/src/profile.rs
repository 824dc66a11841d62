//! Dimensional profile of nested arrays
//!
//! The profile is measured by walking the first element of every nesting
//! level. Siblings are not inspected here; equal sibling lengths are enforced
//! by request validation before a payload is trusted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Per-axis lengths of a nested array, outermost axis first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeProfile(Vec<usize>);

impl ShapeProfile {
    /// Create a profile from explicit axis lengths
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// Number of axes (nesting depth)
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Axis lengths, outermost first
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Length of the given axis, if the profile reaches that deep
    pub fn axis(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    /// True when the walk stopped at an empty array.
    ///
    /// Callers treat such a profile as an error condition, never as a valid shape.
    pub fn has_empty_axis(&self) -> bool {
        self.0.last() == Some(&0)
    }
}

impl fmt::Display for ShapeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for ShapeProfile {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

/// Compute the shape profile of an arbitrary JSON value.
///
/// Total over every input: scalars, objects and `null` yield the empty
/// (rank 0) profile, and an empty array terminates the walk with a 0 axis.
pub fn inspect(value: &Value) -> ShapeProfile {
    let mut dims = Vec::new();
    let mut current = value;

    while let Value::Array(items) = current {
        dims.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }

    ShapeProfile(dims)
}
