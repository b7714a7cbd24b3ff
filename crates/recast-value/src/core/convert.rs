//! Conversions between Value, native Rust types, and JSON trees.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::collections::{Array, Object};
use crate::core::value::Value;
use crate::hints::Hints;
use crate::scalar::{Bytes, Text};

// ==================== From<native> for Value ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::float(f64::from(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::character(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::text(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::decimal(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<Url> for Value {
    fn from(v: Url) -> Self {
        Self::Url(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Self::Text(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(Array::from_vec(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ==================== JSON tree conversions ====================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::text(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    /// Lossy projection onto a JSON tree
    ///
    /// Temporal, uuid, url, char, and decimal values render as strings
    /// (the same form the default encoder produces); bytes render as an
    /// array of numbers; an unconsumed rows handle renders as null.
    fn from(v: &Value) -> Self {
        match v {
            Value::Null | Value::Rows(_) => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::Text(t) => serde_json::Value::String(t.as_str().to_owned()),
            Value::Bytes(b) => {
                serde_json::Value::Array(b.iter().map(serde_json::Value::from).collect())
            }
            Value::Array(a) => {
                serde_json::Value::Array(a.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(o) => serde_json::Value::Object(
                o.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
            other => serde_json::Value::String(
                crate::encode::encode_value(other, &Hints::default())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(42i64), Value::integer(42));
        assert_eq!(Value::from(42i32), Value::integer(42));
        assert_eq!(Value::from(2.5f64), Value::float(2.5));
        assert_eq!(Value::from("hi"), Value::text("hi"));
        assert_eq!(Value::from(true), Value::boolean(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::integer(7));
    }

    #[test]
    fn test_json_round_trip() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": [true, "x"], "c": null}"#).unwrap();
        let value = Value::from(json.clone());

        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::integer(1)));
        assert_eq!(obj.get("c"), Some(&Value::Null));

        let back = serde_json::Value::from(&value);
        assert_eq!(back, json);
    }

    #[test]
    fn test_json_preserves_key_order() {
        let value: Value = r#"{"z": 1, "a": 2}"#.parse().unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn test_temporal_to_json_string() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let json = serde_json::Value::from(&Value::date(d));
        assert_eq!(json, serde_json::Value::String("2024-03-05".into()));
    }
}
