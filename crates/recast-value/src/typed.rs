//! Typed extraction on top of the dynamic decode layer.
//!
//! [`FromValue`] ties a native Rust type to the [`TargetType`] it decodes
//! under and to the extraction out of the decoded [`Value`]. The element
//! type of a `Vec<T>` is resolved at the call site from `T`, which is how
//! a typed, homogeneous array gets built out of a dynamically-typed
//! source.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::core::Value;
use crate::error::{ValueError, ValueResult};
use crate::hints::Hints;
use crate::target::{TargetInfo, TargetKind, TargetType};

/// A native type with a decode description.
pub trait FromValue: Sized {
    /// The target description this type decodes under.
    fn target_type() -> TargetType;

    /// Extract the native value out of a decoded [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] when handed a value the decode
    /// contract for [`Self::target_type`] cannot produce.
    fn from_value(value: Value) -> ValueResult<Self>;
}

/// Decode `source` and extract `T`, using default hints.
///
/// A null result (null source without fallback hints, or an empty
/// temporal string) comes back as None.
///
/// # Errors
///
/// See [`crate::decode::Registry::decode`] and [`FromValue::from_value`].
pub fn decode_as<T: FromValue>(source: &Value) -> ValueResult<Option<T>> {
    decode_as_with(source, Hints::default())
}

/// Decode `source` and extract `T` under the given hints.
///
/// # Errors
///
/// See [`decode_as`].
pub fn decode_as_with<T: FromValue>(source: &Value, hints: Hints) -> ValueResult<Option<T>> {
    let target = TargetInfo::new(T::target_type()).with_hints(hints);
    let decoded = crate::decode::decode_value(&target, source)?;
    if decoded.is_null() {
        return Ok(None);
    }
    T::from_value(decoded).map(Some)
}

fn mismatch<T>(expected: &str, value: &Value) -> ValueResult<T> {
    Err(ValueError::type_mismatch(expected, value.kind().name()))
}

impl FromValue for bool {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Boolean)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => mismatch("boolean", &other),
        }
    }
}

impl FromValue for i64 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Integer)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => mismatch("integer", &other),
        }
    }
}

impl FromValue for i32 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Int32)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Integer(i) => i32::try_from(i)
                .map_err(|_| ValueError::type_mismatch("int32", "integer out of range")),
            other => mismatch("int32", &other),
        }
    }
}

impl FromValue for i16 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Int16)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Integer(i) => i16::try_from(i)
                .map_err(|_| ValueError::type_mismatch("int16", "integer out of range")),
            other => mismatch("int16", &other),
        }
    }
}

impl FromValue for i8 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Int8)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Integer(i) => i8::try_from(i)
                .map_err(|_| ValueError::type_mismatch("int8", "integer out of range")),
            other => mismatch("int8", &other),
        }
    }
}

impl FromValue for f64 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Float)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Float(f) => Ok(f),
            other => mismatch("float", &other),
        }
    }
}

impl FromValue for f32 {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Float32)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Float(f) => Ok(f as f32),
            other => mismatch("float32", &other),
        }
    }
}

impl FromValue for String {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::String)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Text(t) => Ok(t.as_str().to_owned()),
            other => mismatch("string", &other),
        }
    }
}

impl FromValue for char {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Char)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Char(c) => Ok(c),
            other => mismatch("char", &other),
        }
    }
}

impl FromValue for Decimal {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Decimal)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Decimal(d) => Ok(d),
            other => mismatch("decimal", &other),
        }
    }
}

impl FromValue for Uuid {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Uuid)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Uuid(u) => Ok(u),
            other => mismatch("uuid", &other),
        }
    }
}

impl FromValue for Url {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Url)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Url(u) => Ok(u),
            other => mismatch("url", &other),
        }
    }
}

impl FromValue for NaiveDate {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Date)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Date(d) => Ok(d),
            other => mismatch("date", &other),
        }
    }
}

impl FromValue for NaiveTime {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::Time)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Time(t) => Ok(t),
            other => mismatch("time", &other),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn target_type() -> TargetType {
        TargetType::scalar(TargetKind::DateTime)
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => mismatch("datetime", &other),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn target_type() -> TargetType {
        TargetType::array_of(T::target_type())
    }

    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Array(array) => array.into_iter().map(T::from_value).collect(),
            other => mismatch("array", &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::Hints;

    #[test]
    fn test_scalar_extraction() {
        assert_eq!(decode_as::<i64>(&Value::text("42")).unwrap(), Some(42));
        assert_eq!(decode_as::<f64>(&Value::integer(2)).unwrap(), Some(2.0));
        assert_eq!(
            decode_as::<String>(&Value::integer(7)).unwrap(),
            Some("7".to_owned())
        );
        assert_eq!(decode_as::<bool>(&Value::text("yes")).unwrap(), Some(true));
    }

    #[test]
    fn test_null_extracts_to_none() {
        assert_eq!(decode_as::<i64>(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_default_hint_fills_null() {
        let out =
            decode_as_with::<i64>(&Value::Null, Hints::new().with_default_value("7")).unwrap();
        assert_eq!(out, Some(7));
    }

    #[test]
    fn test_vec_is_typed_at_the_call_site() {
        let out = decode_as::<Vec<i32>>(&Value::text("1,2,3")).unwrap();
        assert_eq!(out, Some(vec![1, 2, 3]));

        // malformed items vanish before extraction under the skip policy
        let out = decode_as::<Vec<i32>>(&Value::text("1,x,3")).unwrap();
        assert_eq!(out, Some(vec![1, 3]));
    }

    #[test]
    fn test_temporal_extraction() {
        let d = decode_as::<NaiveDate>(&Value::text("2024-3-5")).unwrap().unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }
}
