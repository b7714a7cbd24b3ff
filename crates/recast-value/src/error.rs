//! Error types for value coercion.
//!
//! All decode and encode operations surface failures through [`ValueError`].
//! Container decoders may recover from [`ValueError::MalformedElement`]
//! locally when the item policy allows it; every other variant aborts the
//! field being decoded.

use thiserror::Error;

/// Result alias used across the crate.
pub type ValueResult<T> = Result<T, ValueError>;

/// Coercion errors.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// No registered decoder accepts the (target, source) pair.
    #[error("no converter found: {source_kind} -> {target}, value: {value}")]
    NoConverterFound {
        target: String,
        source_kind: String,
        value: String,
    },

    /// A string did not match the expected grammar for its target type.
    #[error("cannot parse {input:?} as {target}")]
    ParseFailure { target: String, input: String },

    /// An individual container item failed its own parse or arity check.
    #[error("malformed element at index {index}: {detail}")]
    MalformedElement { index: usize, detail: String },

    /// A decoder accepted the pair but the concrete value shape is unusable.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A container target was built without its element or key/value types.
    #[error("target {target} is missing its type argument(s)")]
    MissingTypeArgument { target: String },

    /// The null-substitute/default-value fallback chain recursed too deep.
    #[error("null-fallback recursion limit reached for {target}")]
    RecursionLimit { target: String },

    /// A row cursor could not be materialized.
    #[error("row cursor error: {message}")]
    Cursor { message: String },
}

impl ValueError {
    /// Create a no-converter error.
    pub fn no_converter(
        target: impl Into<String>,
        source_kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::NoConverterFound {
            target: target.into(),
            source_kind: source_kind.into(),
            value: value.into(),
        }
    }

    /// Create a parse failure.
    pub fn parse_failure(target: impl Into<String>, input: impl Into<String>) -> Self {
        Self::ParseFailure {
            target: target.into(),
            input: input.into(),
        }
    }

    /// Create a malformed-element error.
    pub fn malformed_element(index: usize, detail: impl Into<String>) -> Self {
        Self::MalformedElement {
            index,
            detail: detail.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a missing-type-argument error.
    pub fn missing_type_argument(target: impl Into<String>) -> Self {
        Self::MissingTypeArgument {
            target: target.into(),
        }
    }

    /// Create a recursion-limit error.
    pub fn recursion_limit(target: impl Into<String>) -> Self {
        Self::RecursionLimit {
            target: target.into(),
        }
    }

    /// Create a cursor error.
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValueError::no_converter("integer", "array", "[3]");
        assert_eq!(
            err.to_string(),
            "no converter found: array -> integer, value: [3]"
        );

        let err = ValueError::parse_failure("integer", "abc");
        assert_eq!(err.to_string(), "cannot parse \"abc\" as integer");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            ValueError::malformed_element(2, "bad"),
            ValueError::MalformedElement { index: 2, .. }
        ));
        assert!(matches!(
            ValueError::missing_type_argument("list"),
            ValueError::MissingTypeArgument { .. }
        ));
    }
}
