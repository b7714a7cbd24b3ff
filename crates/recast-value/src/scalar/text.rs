//! Text (UTF-8 string) type for recast-value
//!
//! This module provides a Text type that:
//! - Guarantees UTF-8 validity
//! - Efficient cloning via Arc<str>
//! - Zero-copy conversions where possible

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// UTF-8 text string with efficient cloning
///
/// Uses `Arc<str>` internally for cheap cloning. The identity fast path in
/// the decode registry clones source values, so cloning has to stay cheap
/// even for large strings.
#[derive(Debug, Clone)]
pub struct Text {
    inner: Arc<str>,
}

impl Text {
    /// Create a new Text from a String or &str
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Arc::from(s.into().into_boxed_str()),
        }
    }

    /// Get the string as &str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the byte length
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

    /// Trim whitespace from both ends
    #[must_use]
    pub fn trim(&self) -> Text {
        Text::new(self.inner.trim())
    }

    /// Get underlying Arc for zero-copy cloning
    #[must_use]
    pub fn into_arc(self) -> Arc<str> {
        self.inner
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_ref() == other.inner.as_ref()
    }
}

impl Eq for Text {}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.as_ref().cmp(other.inner.as_ref())
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.as_ref().hash(state);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Arc<str>> for Text {
    fn from(arc: Arc<str>) -> Self {
        Self { inner: arc }
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.inner.to_string()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new("hello");
        assert_eq!(text.as_str(), "hello");
        assert_eq!(text.len(), 5);
        assert!(!text.is_empty());
    }

    #[test]
    fn test_text_trim() {
        let text = Text::new("  spaced  ");
        assert_eq!(text.trim().as_str(), "spaced");
    }

    #[test]
    fn test_text_equality_and_ordering() {
        assert_eq!(Text::new("a"), Text::new("a"));
        assert_ne!(Text::new("a"), Text::new("b"));
        assert!(Text::new("apple") < Text::new("banana"));
    }

    #[test]
    fn test_text_clone_shares_storage() {
        let a = Text::new("hello");
        let b = a.clone();
        assert_eq!(Arc::strong_count(&a.inner), Arc::strong_count(&b.inner));
        assert_eq!(a, b);
    }
}
