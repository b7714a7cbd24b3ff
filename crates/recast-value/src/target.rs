//! Target descriptions.
//!
//! A decode call site names its destination with a [`TargetType`]: a tag
//! from the closed [`TargetKind`] set plus nested type arguments for
//! container kinds. [`TargetInfo`] pairs a type with the field's
//! [`Hints`]. These descriptions are cheap to build per call site and
//! immutable afterwards.

use std::fmt::{Display, Formatter};

use crate::core::ValueKind;
use crate::error::{ValueError, ValueResult};
use crate::hints::Hints;

/// Closed set of decode destinations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TargetKind {
    Boolean,
    /// i64
    Integer,
    /// 32-bit integer (narrowing)
    Int32,
    /// 16-bit integer (narrowing)
    Int16,
    /// 8-bit integer (narrowing)
    Int8,
    /// f64
    Float,
    /// 32-bit float (narrowing)
    Float32,
    Decimal,
    Char,
    String,
    Bytes,
    Uuid,
    Url,
    /// A JSON tree parsed from text
    Json,
    Date,
    Time,
    DateTime,
    /// Epoch milliseconds
    Timestamp,
    /// Ordered container, one type argument
    List,
    /// Deduplicated ordered container, one type argument
    Set,
    /// Homogeneous container, one type argument, null items dropped
    Array,
    /// Key-value container, two type arguments
    Map,
}

impl TargetKind {
    /// Get all kinds
    pub const fn all() -> [Self; 22] {
        [
            Self::Boolean,
            Self::Integer,
            Self::Int32,
            Self::Int16,
            Self::Int8,
            Self::Float,
            Self::Float32,
            Self::Decimal,
            Self::Char,
            Self::String,
            Self::Bytes,
            Self::Uuid,
            Self::Url,
            Self::Json,
            Self::Date,
            Self::Time,
            Self::DateTime,
            Self::Timestamp,
            Self::List,
            Self::Set,
            Self::Array,
            Self::Map,
        ]
    }

    /// Check if this kind takes type arguments
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Array | Self::Map)
    }

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Int32
                | Self::Int16
                | Self::Int8
                | Self::Float
                | Self::Float32
                | Self::Decimal
        )
    }

    /// Check if this kind is temporal
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::DateTime | Self::Timestamp
        )
    }

    /// The value kind a successful decode produces, when it is fixed
    pub const fn result_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Boolean => Some(ValueKind::Boolean),
            Self::Integer | Self::Int32 | Self::Int16 | Self::Int8 => Some(ValueKind::Integer),
            Self::Float | Self::Float32 => Some(ValueKind::Float),
            Self::Decimal => Some(ValueKind::Decimal),
            Self::Char => Some(ValueKind::Char),
            Self::String => Some(ValueKind::String),
            Self::Bytes => Some(ValueKind::Bytes),
            Self::Uuid => Some(ValueKind::Uuid),
            Self::Url => Some(ValueKind::Url),
            Self::Date => Some(ValueKind::Date),
            Self::Time => Some(ValueKind::Time),
            Self::DateTime => Some(ValueKind::DateTime),
            Self::Timestamp => Some(ValueKind::Timestamp),
            Self::List | Self::Set | Self::Array => Some(ValueKind::Array),
            Self::Map => Some(ValueKind::Object),
            // A JSON tree can decode to any value kind.
            Self::Json => None,
        }
    }

    /// The source kind a value may pass through unconverted, if any
    ///
    /// Narrowing kinds return None: an i64 aimed at an Int32 target still
    /// has to go through the number decoder for the narrowing cast.
    pub const fn identity_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Int32 | Self::Int16 | Self::Int8 | Self::Float32 => None,
            Self::List | Self::Set | Self::Array | Self::Map | Self::Json => None,
            other => other.result_kind(),
        }
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Int32 => "int32",
            Self::Int16 => "int16",
            Self::Int8 => "int8",
            Self::Float => "float",
            Self::Float32 => "float32",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uuid => "uuid",
            Self::Url => "url",
            Self::Json => "json",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Set => "set",
            Self::Array => "array",
            Self::Map => "map",
        }
    }
}

impl Display for TargetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A destination type: kind plus nested type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType {
    pub kind: TargetKind,
    pub args: Vec<TargetType>,
}

impl TargetType {
    /// A scalar (argument-free) type.
    #[must_use]
    pub fn scalar(kind: TargetKind) -> Self {
        Self { kind, args: vec![] }
    }

    /// A list of `element`.
    #[must_use]
    pub fn list_of(element: TargetType) -> Self {
        Self {
            kind: TargetKind::List,
            args: vec![element],
        }
    }

    /// A set of `element`.
    #[must_use]
    pub fn set_of(element: TargetType) -> Self {
        Self {
            kind: TargetKind::Set,
            args: vec![element],
        }
    }

    /// An array of `element`.
    #[must_use]
    pub fn array_of(element: TargetType) -> Self {
        Self {
            kind: TargetKind::Array,
            args: vec![element],
        }
    }

    /// A map from `key` to `value`.
    #[must_use]
    pub fn map_of(key: TargetType, value: TargetType) -> Self {
        Self {
            kind: TargetKind::Map,
            args: vec![key, value],
        }
    }

    /// First type argument, or a missing-argument error.
    pub fn element(&self) -> ValueResult<&TargetType> {
        self.args
            .first()
            .ok_or_else(|| ValueError::missing_type_argument(self.to_string()))
    }

    /// Key and value type arguments, or a missing-argument error.
    pub fn key_value(&self) -> ValueResult<(&TargetType, &TargetType)> {
        match self.args.as_slice() {
            [key, value] => Ok((key, value)),
            _ => Err(ValueError::missing_type_argument(self.to_string())),
        }
    }
}

impl From<TargetKind> for TargetType {
    fn from(kind: TargetKind) -> Self {
        Self::scalar(kind)
    }
}

impl Display for TargetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl Default for TargetType {
    fn default() -> Self {
        Self::scalar(TargetKind::String)
    }
}

/// A decode destination: type plus the field's hints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetInfo {
    pub ty: TargetType,
    pub hints: Hints,
}

impl TargetInfo {
    /// Describe a destination type with default hints.
    #[must_use]
    pub fn new(ty: impl Into<TargetType>) -> Self {
        Self {
            ty: ty.into(),
            hints: Hints::default(),
        }
    }

    /// Attach hints.
    #[must_use]
    pub fn with_hints(mut self, hints: Hints) -> Self {
        self.hints = hints;
        self
    }

    /// The destination kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.ty.kind
    }

    /// Build the description a nested type argument decodes under.
    ///
    /// Type arguments inherit the enclosing field's hints, the same way a
    /// field annotation applies to the elements of the field's collection.
    #[must_use]
    pub fn nested(&self, ty: &TargetType) -> TargetInfo {
        TargetInfo {
            ty: ty.clone(),
            hints: self.hints.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_type_display() {
        let t = TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            TargetType::list_of(TargetType::scalar(TargetKind::Integer)),
        );
        assert_eq!(t.to_string(), "map<string, list<integer>>");
    }

    #[test]
    fn test_element_access() {
        let list = TargetType::list_of(TargetType::scalar(TargetKind::Integer));
        assert_eq!(list.element().unwrap().kind, TargetKind::Integer);

        let bare = TargetType::scalar(TargetKind::List);
        assert!(matches!(
            bare.element(),
            Err(ValueError::MissingTypeArgument { .. })
        ));
    }

    #[test]
    fn test_key_value_requires_two_args() {
        let bare = TargetType::scalar(TargetKind::Map);
        assert!(bare.key_value().is_err());

        let map = TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            TargetType::scalar(TargetKind::Integer),
        );
        let (k, v) = map.key_value().unwrap();
        assert_eq!(k.kind, TargetKind::String);
        assert_eq!(v.kind, TargetKind::Integer);
    }

    #[test]
    fn test_identity_kind_excludes_narrowing() {
        assert_eq!(
            TargetKind::Integer.identity_kind(),
            Some(ValueKind::Integer)
        );
        assert_eq!(TargetKind::Int32.identity_kind(), None);
        assert_eq!(TargetKind::Float32.identity_kind(), None);
        assert_eq!(TargetKind::List.identity_kind(), None);
    }

    #[test]
    fn test_nested_inherits_hints() {
        let info = TargetInfo::new(TargetType::list_of(TargetType::scalar(
            TargetKind::Integer,
        )))
        .with_hints(Hints::new().with_separators(';', '='));
        let elem = info.nested(info.ty.element().unwrap());
        assert_eq!(elem.hints.list_separator(), ';');
        assert_eq!(elem.kind(), TargetKind::Integer);
    }
}
