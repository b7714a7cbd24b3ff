//! Field-level coercion hints.
//!
//! Hints are plain configuration attached to a [`crate::TargetInfo`]: a
//! date pattern, a number pattern, separator characters for delimited
//! strings, null/default fallback literals, and the strictness knobs for
//! the two deliberately-lossy policies (boolean coercion and malformed
//! container items).

/// Separator characters for delimited-string containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    /// Separates items of a list and entries of a map.
    pub list: char,
    /// Separates key from value inside one map entry.
    pub map: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            list: ',',
            map: ':',
        }
    }
}

/// How boolean targets treat unrecognized sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolPolicy {
    /// Anything outside the recognized true-set coerces to `false`.
    #[default]
    Permissive,
    /// Unrecognized strings and numbers other than 0/1 are parse errors.
    Strict,
}

/// How container decoders treat items that fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPolicy {
    /// Drop the item and keep the rest (partial-success containers).
    #[default]
    Skip,
    /// Fail the whole container on the first bad item.
    Fail,
}

/// Per-field coercion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hints {
    /// chrono format string for parsing and rendering temporal values.
    pub date_pattern: Option<String>,
    /// Decimal-format-style pattern for rendering numbers.
    pub number_pattern: Option<String>,
    /// Separators for delimited-string lists and maps.
    pub separators: Separators,
    /// Literal decoded in place of a null source.
    pub null_substitute: Option<String>,
    /// Literal decoded when the source is null and no substitute is set.
    pub default_value: Option<String>,
    /// Boolean coercion strictness.
    pub bool_policy: BoolPolicy,
    /// Malformed container item strictness.
    pub item_policy: ItemPolicy,
}

impl Hints {
    /// Create default hints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date pattern.
    #[must_use]
    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = Some(pattern.into());
        self
    }

    /// Set the number pattern.
    #[must_use]
    pub fn with_number_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.number_pattern = Some(pattern.into());
        self
    }

    /// Set the list and map separators.
    #[must_use]
    pub fn with_separators(mut self, list: char, map: char) -> Self {
        self.separators = Separators { list, map };
        self
    }

    /// Set the null-substitute literal.
    #[must_use]
    pub fn with_null_substitute(mut self, literal: impl Into<String>) -> Self {
        self.null_substitute = Some(literal.into());
        self
    }

    /// Set the default-value literal.
    #[must_use]
    pub fn with_default_value(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }

    /// Switch boolean coercion to the strict policy.
    #[must_use]
    pub fn strict_bools(mut self) -> Self {
        self.bool_policy = BoolPolicy::Strict;
        self
    }

    /// Fail container decodes on the first malformed item.
    #[must_use]
    pub fn fail_on_malformed(mut self) -> Self {
        self.item_policy = ItemPolicy::Fail;
        self
    }

    /// The list separator in effect.
    #[inline]
    #[must_use]
    pub fn list_separator(&self) -> char {
        self.separators.list
    }

    /// The key-value separator in effect.
    #[inline]
    #[must_use]
    pub fn map_separator(&self) -> char {
        self.separators.map
    }
}
