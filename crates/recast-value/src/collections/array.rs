//! Array type for recast-value
//!
//! Ordered sequence of values backed by a persistent vector (`im::Vector`),
//! so the identity fast path can clone arrays cheaply via structural
//! sharing.

use std::fmt;
use std::ops::Index;

use im::Vector;

use crate::core::Value;

/// Persistent array with efficient structural sharing
#[derive(Debug, Clone)]
pub struct Array {
    inner: Vector<Value>,
}

impl Array {
    /// Create an empty array
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Vector::new(),
        }
    }

    /// Create from a Vec
    #[must_use]
    pub fn from_vec(vec: Vec<Value>) -> Self {
        Self {
            inner: Vector::from(vec),
        }
    }

    /// Get the length
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get element at index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.inner.get(index)
    }

    /// Get first element
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.inner.front()
    }

    /// Get last element
    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.inner.back()
    }

    /// Push an element (returns new Array, original unchanged)
    #[must_use = "immutable methods return a new instance"]
    pub fn push(&self, value: impl Into<Value>) -> Self {
        let mut new_vec = self.inner.clone();
        new_vec.push_back(value.into());
        Self { inner: new_vec }
    }

    /// Check if array contains a value
    pub fn contains(&self, value: &Value) -> bool {
        self.inner.iter().any(|v| v == value)
    }

    /// Create iterator
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.inner.iter()
    }

    /// Convert to Vec (allocates)
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.iter().cloned().collect()
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.len())
    }
}

impl From<Vec<Value>> for Array {
    fn from(vec: Vec<Value>) -> Self {
        Self::from_vec(vec)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = im::vector::ConsumingIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = im::vector::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
