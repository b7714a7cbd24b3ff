//! Value kinds.
//!
//! `ValueKind` is the lightweight classification of a [`crate::Value`],
//! used by the dispatch registries to select a converter without looking
//! at the payload.

use std::fmt::{Display, Formatter};

/// Represents the kind/type of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Decimal,
    Char,
    String,
    Bytes,
    Uuid,
    Url,
    Date,
    Time,
    DateTime,
    Timestamp,
    Array,
    Object,
    Rows,
}

impl ValueKind {
    /// Get all kinds
    pub const fn all() -> [Self; 17] {
        [
            Self::Null,
            Self::Boolean,
            Self::Integer,
            Self::Float,
            Self::Decimal,
            Self::Char,
            Self::String,
            Self::Bytes,
            Self::Uuid,
            Self::Url,
            Self::Date,
            Self::Time,
            Self::DateTime,
            Self::Timestamp,
            Self::Array,
            Self::Object,
            Self::Rows,
        ]
    }

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }

    /// Check if this kind is a collection
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    /// Check if this kind is temporal (date/time-related)
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::DateTime | Self::Timestamp
        )
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uuid => "uuid",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Array => "array",
            Self::Object => "object",
            Self::Rows => "rows",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
