//! Unified Value enum covering every source and result shape
//!
//! This is the central type of the crate: the dynamically-typed side of a
//! coercion. Decoders consume it, encoders render it, and decode results
//! come back as it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::collections::{Array, Object};
use crate::core::kind::ValueKind;
use crate::error::ValueError;
use crate::rows::Rows;
use crate::scalar::{Bytes, Text};

/// A dynamically-typed value
///
/// Covers scalars, temporals, collections, and the cursor-like [`Rows`]
/// handle. Cloning is cheap for every variant: large payloads sit behind
/// shared storage (`Arc<str>` text, persistent arrays, shared byte
/// buffers).
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null/None value
    #[default]
    Null,

    /// Boolean value
    Boolean(bool),

    /// Integer number (i64)
    Integer(i64),

    /// Floating point number (f64)
    Float(f64),

    /// Arbitrary precision decimal
    Decimal(Decimal),

    /// Single character
    Char(char),

    /// UTF-8 text string
    Text(Text),

    /// Binary data
    Bytes(Bytes),

    /// UUID
    Uuid(Uuid),

    /// Absolute URL
    Url(Url),

    /// Calendar date (no time, no zone)
    Date(NaiveDate),

    /// Wall-clock time (no date, no zone)
    Time(NaiveTime),

    /// Date and time (no zone)
    DateTime(NaiveDateTime),

    /// Epoch milliseconds (UTC instant)
    Timestamp(i64),

    /// Array of values
    Array(Array),

    /// Object (insertion-ordered key-value map)
    Object(Object),

    /// Unconsumed cursor over a sequence of values
    Rows(Rows),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a boolean value
    pub const fn boolean(v: bool) -> Self {
        Self::Boolean(v)
    }

    /// Create an integer value
    pub const fn integer(v: i64) -> Self {
        Self::Integer(v)
    }

    /// Create a float value
    pub const fn float(v: f64) -> Self {
        Self::Float(v)
    }

    /// Create a decimal value
    pub const fn decimal(v: Decimal) -> Self {
        Self::Decimal(v)
    }

    /// Create a char value
    pub const fn character(v: char) -> Self {
        Self::Char(v)
    }

    /// Create a text value from String or &str
    pub fn text(v: impl Into<String>) -> Self {
        Self::Text(Text::new(v))
    }

    /// Create a bytes value
    pub fn bytes(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::new(v))
    }

    /// Create a date value
    pub const fn date(v: NaiveDate) -> Self {
        Self::Date(v)
    }

    /// Create a time value
    pub const fn time(v: NaiveTime) -> Self {
        Self::Time(v)
    }

    /// Create a datetime value
    pub const fn datetime(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }

    /// Create a timestamp value from epoch milliseconds
    pub const fn timestamp(millis: i64) -> Self {
        Self::Timestamp(millis)
    }

    /// Create an empty array value
    pub fn array_empty() -> Self {
        Self::Array(Array::new())
    }

    /// Create an empty object value
    pub fn object_empty() -> Self {
        Self::Object(Object::new())
    }

    /// Wrap a row cursor
    pub fn rows(rows: Rows) -> Self {
        Self::Rows(rows)
    }

    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Char(_) => ValueKind::Char,
            Self::Text(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Url(_) => ValueKind::Url,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Rows(_) => ValueKind::Rows,
        }
    }

    /// Check if this is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is numeric (integer, float, or decimal)
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_) | Self::Decimal(_))
    }

    /// Check if this is text
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Check if this is an array
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Check if this is an object
    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if this is temporal
    #[inline]
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        self.kind().is_temporal()
    }

    // ==================== Accessors (as_*) ====================

    /// Try to get as boolean
    #[inline]
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as decimal
    #[inline]
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get as char
    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Try to get as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Try to get as bytes reference
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as uuid
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get as url reference
    #[inline]
    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get as date
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get as time
    #[inline]
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to get as datetime
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Try to get as epoch milliseconds
    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Self::Timestamp(ms) => Some(*ms),
            _ => None,
        }
    }

    /// Try to get as array reference
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get as rows handle
    #[inline]
    #[must_use]
    pub fn as_rows(&self) -> Option<&Rows> {
        match self {
            Self::Rows(r) => Some(r),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Url(a), Self::Url(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Rows(a), Self::Rows(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// Natural string form, consistent with the default encoder
    ///
    /// Null renders as `null`; everything else renders exactly as
    /// [`crate::encode::encode_value`] would with default hints.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match crate::encode::encode_value(self, &crate::hints::Hints::default()) {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "null"),
        }
    }
}

impl std::str::FromStr for Value {
    type Err = ValueError;

    /// Parse a Value from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ParseFailure`] if the string is not valid
    /// JSON.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Value>(s)
            .map(Value::from)
            .map_err(|_| ValueError::parse_failure("json", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_null() {
        let val = Value::null();
        assert!(val.is_null());
        assert_eq!(val.kind(), ValueKind::Null);
    }

    #[test]
    fn test_value_boolean() {
        let val = Value::boolean(true);
        assert_eq!(val.as_boolean(), Some(true));
        assert_eq!(val.kind(), ValueKind::Boolean);
    }

    #[test]
    fn test_value_integer() {
        let val = Value::integer(42);
        assert!(val.is_numeric());
        assert_eq!(val.as_integer(), Some(42));
        assert_eq!(val.kind(), ValueKind::Integer);
    }

    #[test]
    fn test_value_text() {
        let val = Value::text("hello");
        assert!(val.is_text());
        assert_eq!(val.as_str(), Some("hello"));
        assert_eq!(val.kind(), ValueKind::String);
    }

    #[test]
    fn test_value_temporal_kinds() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(Value::date(d).kind(), ValueKind::Date);
        assert!(Value::date(d).is_temporal());
        assert_eq!(Value::timestamp(0).kind(), ValueKind::Timestamp);
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::integer(42), Value::integer(42));
        assert_ne!(Value::integer(42), Value::integer(99));
        assert_ne!(Value::integer(42), Value::float(42.0));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::null().to_string(), "null");
        assert_eq!(Value::boolean(true).to_string(), "true");
        assert_eq!(Value::integer(42).to_string(), "42");
        assert_eq!(Value::text("hello").to_string(), "hello");
    }

    #[test]
    fn test_value_from_str() {
        use std::str::FromStr;

        assert_eq!(Value::from_str("null").unwrap(), Value::Null);
        assert_eq!(Value::from_str("true").unwrap(), Value::boolean(true));
        assert_eq!(Value::from_str("42").unwrap(), Value::integer(42));
        assert_eq!(Value::from_str("3.25").unwrap(), Value::float(3.25));
        assert_eq!(Value::from_str("\"hi\"").unwrap(), Value::text("hi"));

        let arr: Value = "[1, 2, 3]".parse().unwrap();
        assert!(arr.is_array());

        let obj: Value = r#"{"key": "value"}"#.parse().unwrap();
        assert!(obj.is_object());

        assert!(Value::from_str("not json").is_err());
    }
}
