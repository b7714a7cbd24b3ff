//! Property tests for scalar decode/encode round trips.

use proptest::prelude::*;
use recast_value::{
    Hints, TargetInfo, TargetKind, TargetType, Value, decode_value, encode_value,
};

fn decode_text(kind: TargetKind, text: String) -> Value {
    decode_value(
        &TargetInfo::new(TargetType::scalar(kind)),
        &Value::text(text),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn integer_survives_encode_then_decode(n in any::<i64>()) {
        let encoded = encode_value(&Value::integer(n), &Hints::default()).unwrap();
        prop_assert_eq!(decode_text(TargetKind::Integer, encoded), Value::integer(n));
    }

    #[test]
    fn finite_float_survives_encode_then_decode(f in proptest::num::f64::NORMAL) {
        let encoded = encode_value(&Value::float(f), &Hints::default()).unwrap();
        prop_assert_eq!(decode_text(TargetKind::Float, encoded), Value::float(f));
    }

    #[test]
    fn integer_strings_parse_exactly(n in any::<i64>()) {
        prop_assert_eq!(
            decode_text(TargetKind::Integer, n.to_string()),
            Value::integer(n)
        );
    }

    #[test]
    fn identity_holds_for_any_integer(n in any::<i64>()) {
        let v = Value::integer(n);
        let out = decode_value(
            &TargetInfo::new(TargetType::scalar(TargetKind::Integer)),
            &v,
        )
        .unwrap();
        prop_assert_eq!(out, v);
    }

    #[test]
    fn epoch_millis_round_trip_through_timestamp(
        // one million days around the epoch, in milliseconds
        ms in -86_400_000_000_000i64..86_400_000_000_000i64,
    ) {
        let target = TargetInfo::new(TargetType::scalar(TargetKind::Timestamp));
        let decoded = decode_value(&target, &Value::integer(ms)).unwrap();
        prop_assert_eq!(decoded, Value::timestamp(ms));

        let back = decode_value(&target, &Value::timestamp(ms)).unwrap();
        prop_assert_eq!(back, Value::timestamp(ms));
    }
}
