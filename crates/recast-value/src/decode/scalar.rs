//! Scalar decoders: numbers, booleans, chars, strings, uuids, urls,
//! bytes, and JSON trees.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::core::{Value, ValueKind};
use crate::decode::registry::{Decoder, Registry};
use crate::error::{ValueError, ValueResult};
use crate::hints::{BoolPolicy, ItemPolicy};
use crate::target::{TargetInfo, TargetKind, TargetType};
use crate::temporal;

/// Source kinds the number family converts from.
const NUMERIC_SOURCES: &[ValueKind] = &[
    ValueKind::Integer,
    ValueKind::Float,
    ValueKind::Decimal,
    ValueKind::Boolean,
    ValueKind::String,
    ValueKind::Date,
    ValueKind::Time,
    ValueKind::DateTime,
    ValueKind::Timestamp,
];

/// Decoder for every numeric target kind.
///
/// Numeric sources widen or narrow, numeric strings parse strictly,
/// booleans map to 0/1, and temporal sources yield their epoch
/// milliseconds.
pub struct NumberDecoder;

impl NumberDecoder {
    fn as_i64(source: &Value, target: &str) -> ValueResult<i64> {
        match source {
            Value::Integer(i) => Ok(*i),
            Value::Boolean(b) => Ok(i64::from(*b)),
            Value::Float(f) => {
                if f.is_finite() {
                    Ok(*f as i64)
                } else {
                    Err(ValueError::type_mismatch(target, "non-finite float"))
                }
            }
            Value::Decimal(d) => d
                .to_i64()
                .ok_or_else(|| ValueError::type_mismatch(target, "decimal out of range")),
            Value::Text(t) => t
                .as_str()
                .trim()
                .parse::<i64>()
                .map_err(|_| ValueError::parse_failure(target, t.as_str())),
            Value::Date(d) => Ok(temporal::to_epoch_millis(temporal::at_midnight(*d))),
            Value::Time(t) => Ok(temporal::to_epoch_millis(temporal::at_epoch_date(*t))),
            Value::DateTime(dt) => Ok(temporal::to_epoch_millis(*dt)),
            Value::Timestamp(ms) => Ok(*ms),
            other => Err(ValueError::type_mismatch(target, other.kind().name())),
        }
    }

    fn as_f64(source: &Value, target: &str) -> ValueResult<f64> {
        match source {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Decimal(d) => d
                .to_f64()
                .ok_or_else(|| ValueError::type_mismatch(target, "decimal out of range")),
            Value::Text(t) => t
                .as_str()
                .trim()
                .parse::<f64>()
                .map_err(|_| ValueError::parse_failure(target, t.as_str())),
            temporal_like if temporal_like.is_temporal() => {
                Self::as_i64(temporal_like, target).map(|ms| ms as f64)
            }
            other => Err(ValueError::type_mismatch(target, other.kind().name())),
        }
    }
}

impl Decoder for NumberDecoder {
    fn name(&self) -> &'static str {
        "number"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind.is_numeric() && NUMERIC_SOURCES.contains(&source)
    }

    fn decode(
        &self,
        _registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        match target.kind() {
            TargetKind::Integer => Self::as_i64(source, "integer").map(Value::integer),
            TargetKind::Int32 => match source {
                Value::Text(t) => t
                    .as_str()
                    .trim()
                    .parse::<i32>()
                    .map(|v| Value::integer(i64::from(v)))
                    .map_err(|_| ValueError::parse_failure("int32", t.as_str())),
                _ => Self::as_i64(source, "int32").map(|v| Value::integer(i64::from(v as i32))),
            },
            TargetKind::Int16 => match source {
                Value::Text(t) => t
                    .as_str()
                    .trim()
                    .parse::<i16>()
                    .map(|v| Value::integer(i64::from(v)))
                    .map_err(|_| ValueError::parse_failure("int16", t.as_str())),
                _ => Self::as_i64(source, "int16").map(|v| Value::integer(i64::from(v as i16))),
            },
            TargetKind::Int8 => match source {
                Value::Text(t) => t
                    .as_str()
                    .trim()
                    .parse::<i8>()
                    .map(|v| Value::integer(i64::from(v)))
                    .map_err(|_| ValueError::parse_failure("int8", t.as_str())),
                _ => Self::as_i64(source, "int8").map(|v| Value::integer(i64::from(v as i8))),
            },
            TargetKind::Float => Self::as_f64(source, "float").map(Value::float),
            TargetKind::Float32 => {
                Self::as_f64(source, "float32").map(|v| Value::float(f64::from(v as f32)))
            }
            TargetKind::Decimal => match source {
                Value::Decimal(d) => Ok(Value::decimal(*d)),
                Value::Integer(i) => Ok(Value::decimal(Decimal::from(*i))),
                Value::Boolean(b) => Ok(Value::decimal(Decimal::from(i64::from(*b)))),
                Value::Float(f) => Decimal::try_from(*f)
                    .map(Value::decimal)
                    .map_err(|_| ValueError::type_mismatch("decimal", "non-finite float")),
                Value::Text(t) => t
                    .as_str()
                    .trim()
                    .parse::<Decimal>()
                    .map(Value::decimal)
                    .map_err(|_| ValueError::parse_failure("decimal", t.as_str())),
                temporal_like if temporal_like.is_temporal() => {
                    Self::as_i64(temporal_like, "decimal").map(|ms| Value::decimal(Decimal::from(ms)))
                }
                other => Err(ValueError::type_mismatch("decimal", other.kind().name())),
            },
            other => Err(ValueError::type_mismatch("numeric target", other.name())),
        }
    }
}

/// The catch-all decoder for string targets.
///
/// Every non-null value has a string form; it is produced by the encode
/// registry so that decoding to a string and encoding a value agree.
pub struct StringDecoder;

impl Decoder for StringDecoder {
    fn name(&self) -> &'static str {
        "string"
    }

    fn accepts(&self, target: &TargetType, _source: ValueKind) -> bool {
        target.kind == TargetKind::String
    }

    fn decode(
        &self,
        _registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        crate::encode::encode_value(source, &target.hints)
            .map(Value::text)
            .ok_or_else(|| ValueError::type_mismatch("string", source.kind().name()))
    }
}

/// True-set for the permissive boolean policy.
const TRUE_WORDS: &[&str] = &["1", "true", "on", "yes"];
/// False-set consulted by the strict boolean policy.
const FALSE_WORDS: &[&str] = &["0", "false", "off", "no"];

/// Boolean decoder.
///
/// Permissive policy: sources matching the true-set coerce to `true`,
/// everything else coerces to `false`. Strict policy: a source outside
/// both word sets is a parse failure.
pub struct BoolDecoder;

impl BoolDecoder {
    fn is_truthy(source: &Value) -> bool {
        match source {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i == 1,
            Value::Text(t) => {
                let s = t.as_str().trim();
                TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(s))
            }
            _ => false,
        }
    }

    fn strict(source: &Value) -> ValueResult<bool> {
        match source {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(1) => Ok(true),
            Value::Integer(0) => Ok(false),
            Value::Integer(i) => Err(ValueError::parse_failure("boolean", i.to_string())),
            Value::Float(f) if *f == 1.0 => Ok(true),
            Value::Float(f) if *f == 0.0 => Ok(false),
            Value::Float(f) => Err(ValueError::parse_failure("boolean", f.to_string())),
            Value::Text(t) => {
                let s = t.as_str().trim();
                if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(s)) {
                    Ok(true)
                } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(s)) {
                    Ok(false)
                } else {
                    Err(ValueError::parse_failure("boolean", s))
                }
            }
            other => Err(ValueError::type_mismatch("boolean", other.kind().name())),
        }
    }
}

impl Decoder for BoolDecoder {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn accepts(&self, target: &TargetType, _source: ValueKind) -> bool {
        target.kind == TargetKind::Boolean
    }

    fn decode(
        &self,
        _registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        match target.hints.bool_policy {
            BoolPolicy::Permissive => Ok(Value::boolean(Self::is_truthy(source))),
            BoolPolicy::Strict => Self::strict(source).map(Value::boolean),
        }
    }
}

/// Char decoder: single-character strings only.
pub struct CharDecoder;

impl Decoder for CharDecoder {
    fn name(&self) -> &'static str {
        "char"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Char && source == ValueKind::String
    }

    fn decode(
        &self,
        _registry: &Registry,
        _target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let s = source
            .as_str()
            .ok_or_else(|| ValueError::type_mismatch("char", source.kind().name()))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::character(c)),
            _ => Err(ValueError::parse_failure("char", s)),
        }
    }
}

/// UUID decoder.
pub struct UuidDecoder;

impl Decoder for UuidDecoder {
    fn name(&self) -> &'static str {
        "uuid"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Uuid && source == ValueKind::String
    }

    fn decode(
        &self,
        _registry: &Registry,
        _target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let s = source
            .as_str()
            .ok_or_else(|| ValueError::type_mismatch("uuid", source.kind().name()))?;
        uuid::Uuid::parse_str(s.trim())
            .map(Value::Uuid)
            .map_err(|_| ValueError::parse_failure("uuid", s))
    }
}

/// URL decoder.
pub struct UrlDecoder;

impl Decoder for UrlDecoder {
    fn name(&self) -> &'static str {
        "url"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Url && source == ValueKind::String
    }

    fn decode(
        &self,
        _registry: &Registry,
        _target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let s = source
            .as_str()
            .ok_or_else(|| ValueError::type_mismatch("url", source.kind().name()))?;
        url::Url::parse(s.trim())
            .map(Value::Url)
            .map_err(|_| ValueError::parse_failure("url", s))
    }
}

/// Bytes decoder: delimited numeric strings or arrays of small integers.
pub struct BytesDecoder;

impl BytesDecoder {
    fn byte_of(value: &Value) -> ValueResult<u8> {
        match value {
            Value::Integer(i) if (-128..=255).contains(i) => Ok(*i as u8),
            Value::Integer(i) => Err(ValueError::parse_failure("byte", i.to_string())),
            Value::Text(t) => t
                .as_str()
                .trim()
                .parse::<u8>()
                .map_err(|_| ValueError::parse_failure("byte", t.as_str())),
            other => Err(ValueError::type_mismatch("byte", other.kind().name())),
        }
    }
}

impl Decoder for BytesDecoder {
    fn name(&self) -> &'static str {
        "bytes"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Bytes
            && matches!(source, ValueKind::String | ValueKind::Array)
    }

    fn decode(
        &self,
        _registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let items: Vec<Value> = match source {
            Value::Text(t) => t
                .as_str()
                .split(target.hints.list_separator())
                .map(|piece| Value::text(piece.trim()))
                .collect(),
            Value::Array(a) => a.to_vec(),
            other => {
                return Err(ValueError::type_mismatch("bytes", other.kind().name()));
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match Self::byte_of(item) {
                Ok(b) => out.push(b),
                Err(err) => match target.hints.item_policy {
                    ItemPolicy::Skip => {
                        debug!(index, %err, "skipping malformed byte");
                    }
                    ItemPolicy::Fail => {
                        return Err(ValueError::malformed_element(index, err.to_string()));
                    }
                },
            }
        }
        Ok(Value::bytes(out))
    }
}

/// JSON decoder: parse a JSON document into a value tree.
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Json && source == ValueKind::String
    }

    fn decode(
        &self,
        _registry: &Registry,
        _target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let s = source
            .as_str()
            .ok_or_else(|| ValueError::type_mismatch("json", source.kind().name()))?;
        s.parse()
    }
}
