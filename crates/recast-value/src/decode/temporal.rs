//! The date/time family decoder.

use crate::core::{Value, ValueKind};
use crate::decode::registry::{Decoder, Registry};
use crate::error::{ValueError, ValueResult};
use crate::target::{TargetInfo, TargetKind, TargetType};
use crate::temporal;

/// Source kinds the temporal family converts from.
const TEMPORAL_SOURCES: &[ValueKind] = &[
    ValueKind::Date,
    ValueKind::Time,
    ValueKind::DateTime,
    ValueKind::Timestamp,
    ValueKind::Integer,
    ValueKind::String,
];

/// One decoder for all four temporal target kinds.
///
/// Every source shape is normalized onto a canonical `NaiveDateTime` and
/// the result is projected onto the requested shape, so each source shape
/// is handled once instead of once per target kind.
///
/// Strings parse strictly against the `date_pattern` hint when present; a
/// mismatch is fatal. Without a hint the shared fallback pattern lists
/// are tried. An empty string decodes to null, matching how blank form
/// fields and blank columns arrive.
pub struct TemporalDecoder;

impl TemporalDecoder {
    fn canonicalize(target: &TargetInfo, source: &Value) -> ValueResult<Option<chrono::NaiveDateTime>> {
        let dt = match source {
            Value::Date(d) => temporal::at_midnight(*d),
            Value::Time(t) => temporal::at_epoch_date(*t),
            Value::DateTime(dt) => *dt,
            Value::Timestamp(ms) => temporal::from_epoch_millis(*ms)?,
            Value::Integer(ms) => temporal::from_epoch_millis(*ms)?,
            Value::Text(t) => {
                let s = t.as_str();
                if s.is_empty() {
                    return Ok(None);
                }
                match target.hints.date_pattern.as_deref() {
                    Some(pattern) => temporal::parse_with_pattern(s, pattern)?,
                    None => temporal::parse_fallback(s)?,
                }
            }
            other => {
                return Err(ValueError::type_mismatch(
                    target.ty.to_string(),
                    other.kind().name(),
                ));
            }
        };
        Ok(Some(dt))
    }
}

impl Decoder for TemporalDecoder {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind.is_temporal() && TEMPORAL_SOURCES.contains(&source)
    }

    fn decode(
        &self,
        _registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let Some(dt) = Self::canonicalize(target, source)? else {
            return Ok(Value::Null);
        };
        Ok(match target.kind() {
            TargetKind::Date => Value::date(dt.date()),
            TargetKind::Time => Value::time(dt.time()),
            TargetKind::DateTime => Value::datetime(dt),
            TargetKind::Timestamp => Value::timestamp(temporal::to_epoch_millis(dt)),
            // accepts() limits us to the four temporal kinds
            other => {
                return Err(ValueError::type_mismatch("temporal target", other.name()));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::decode::decode_value;
    use crate::hints::Hints;

    fn decode(kind: TargetKind, source: Value) -> ValueResult<Value> {
        decode_value(&TargetInfo::new(TargetType::scalar(kind)), &source)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_from_fallback_patterns() {
        assert_eq!(
            decode(TargetKind::Date, Value::text("2024-03-05")).unwrap(),
            Value::date(ymd(2024, 3, 5))
        );
        // single-digit month and day still parse
        assert_eq!(
            decode(TargetKind::Date, Value::text("2024-3-5")).unwrap(),
            Value::date(ymd(2024, 3, 5))
        );
    }

    #[test]
    fn test_datetime_projection_between_shapes() {
        // date source widens to midnight
        assert_eq!(
            decode(TargetKind::DateTime, Value::date(ymd(2024, 3, 5))).unwrap(),
            Value::datetime(temporal::at_midnight(ymd(2024, 3, 5)))
        );
        // datetime source narrows to its date part
        let dt = ymd(2024, 3, 5).and_hms_opt(10, 20, 30).unwrap();
        assert_eq!(
            decode(TargetKind::Date, Value::datetime(dt)).unwrap(),
            Value::date(ymd(2024, 3, 5))
        );
        assert_eq!(
            decode(TargetKind::Time, Value::datetime(dt)).unwrap(),
            Value::time(NaiveTime::from_hms_opt(10, 20, 30).unwrap())
        );
    }

    #[test]
    fn test_epoch_millis_sources() {
        let out = decode(TargetKind::DateTime, Value::integer(0)).unwrap();
        assert_eq!(
            out,
            Value::datetime(temporal::at_midnight(ymd(1970, 1, 1)))
        );
        assert_eq!(
            decode(TargetKind::Timestamp, Value::text("1970-01-01 00:00:10")).unwrap(),
            Value::timestamp(10_000)
        );
    }

    #[test]
    fn test_pattern_hint_is_strict() {
        let target = TargetInfo::new(TargetType::scalar(TargetKind::Date))
            .with_hints(Hints::new().with_date_pattern("%d/%m/%Y"));
        assert_eq!(
            decode_value(&target, &Value::text("05/03/2024")).unwrap(),
            Value::date(ymd(2024, 3, 5))
        );
        // the fallback lists are not consulted when a hint is present
        assert!(matches!(
            decode_value(&target, &Value::text("2024-03-05")),
            Err(ValueError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_empty_string_decodes_to_null() {
        assert_eq!(decode(TargetKind::Date, Value::text("")).unwrap(), Value::Null);
    }

    #[test]
    fn test_unparseable_string_is_fatal() {
        assert!(matches!(
            decode(TargetKind::DateTime, Value::text("not a date")),
            Err(ValueError::ParseFailure { .. })
        ));
    }
}
