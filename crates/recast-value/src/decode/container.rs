//! Container decoders: lists, sets, arrays, and maps.
//!
//! All of them share one item-gathering step that flattens whatever the
//! source is (an array, a delimited string, a byte buffer, an unconsumed
//! row cursor) into a plain sequence, then decode each item against the
//! target's element type through the registry.

use tracing::debug;

use crate::collections::{Array, Object};
use crate::core::{Value, ValueKind};
use crate::decode::registry::{Decoder, Registry};
use crate::error::{ValueError, ValueResult};
use crate::hints::{Hints, ItemPolicy};
use crate::target::{TargetInfo, TargetKind, TargetType};

/// Source kinds that can be flattened into an item sequence.
const SEQUENCE_SOURCES: &[ValueKind] = &[
    ValueKind::Array,
    ValueKind::String,
    ValueKind::Bytes,
    ValueKind::Rows,
];

/// Normalize a source into an ordered sequence of raw items.
///
/// A delimited string splits on the list separator with each piece
/// trimmed. A rows cursor is materialized here, exactly once, and is
/// released before this function returns regardless of outcome.
fn gather_items(source: &Value, hints: &Hints) -> ValueResult<Vec<Value>> {
    match source {
        Value::Array(a) => Ok(a.to_vec()),
        Value::Text(t) => Ok(t
            .as_str()
            .split(hints.list_separator())
            .map(|piece| Value::text(piece.trim()))
            .collect()),
        Value::Bytes(b) => Ok(b.iter().map(|byte| Value::integer(i64::from(byte))).collect()),
        Value::Rows(rows) => rows.materialize(),
        other => Err(ValueError::type_mismatch("sequence", other.kind().name())),
    }
}

/// Decode every gathered item against the element description.
///
/// Under [`ItemPolicy::Skip`] a failing item is dropped and the rest of
/// the container still decodes; under [`ItemPolicy::Fail`] the first
/// failure aborts with its item index.
fn decode_items(
    registry: &Registry,
    element: &TargetInfo,
    items: &[Value],
    policy: ItemPolicy,
) -> ValueResult<Vec<Value>> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match registry.decode(element, item) {
            Ok(value) => out.push(value),
            Err(err) => match policy {
                ItemPolicy::Skip => {
                    debug!(index, %err, "skipping malformed item");
                }
                ItemPolicy::Fail => {
                    return Err(ValueError::malformed_element(index, err.to_string()));
                }
            },
        }
    }
    Ok(out)
}

fn accepts_sequence(target: &TargetType, kind: TargetKind, source: ValueKind) -> bool {
    target.kind == kind && SEQUENCE_SOURCES.contains(&source)
}

/// List decoder: ordered container, decoded items kept as they come.
pub struct ListDecoder;

impl Decoder for ListDecoder {
    fn name(&self) -> &'static str {
        "list"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        accepts_sequence(target, TargetKind::List, source)
    }

    fn decode(
        &self,
        registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let element = target.nested(target.ty.element()?);
        let items = gather_items(source, &target.hints)?;
        let values = decode_items(registry, &element, &items, target.hints.item_policy)?;
        Ok(Value::Array(Array::from_vec(values)))
    }
}

/// Set decoder: like a list, but duplicates are dropped while insertion
/// order is kept.
pub struct SetDecoder;

impl Decoder for SetDecoder {
    fn name(&self) -> &'static str {
        "set"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        accepts_sequence(target, TargetKind::Set, source)
    }

    fn decode(
        &self,
        registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let element = target.nested(target.ty.element()?);
        let items = gather_items(source, &target.hints)?;
        let values = decode_items(registry, &element, &items, target.hints.item_policy)?;

        let mut unique: Vec<Value> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Ok(Value::Array(Array::from_vec(unique)))
    }
}

/// Array decoder: homogeneous container. Null items are dropped so every
/// remaining element carries the element type's value kind.
pub struct ArrayDecoder;

impl Decoder for ArrayDecoder {
    fn name(&self) -> &'static str {
        "array"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        accepts_sequence(target, TargetKind::Array, source)
    }

    fn decode(
        &self,
        registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let element = target.nested(target.ty.element()?);
        let items = gather_items(source, &target.hints)?;
        let values = decode_items(registry, &element, &items, target.hints.item_policy)?;
        let values: Vec<Value> = values.into_iter().filter(|v| !v.is_null()).collect();
        Ok(Value::Array(Array::from_vec(values)))
    }
}

/// Map decoder: requires key and value type arguments.
///
/// Accepts a native object (values decoded, keys passed through) or a
/// delimited string of `key:value` entries. Entries with the wrong arity
/// and entries whose key or value decodes to null follow the item policy.
pub struct MapDecoder;

impl Decoder for MapDecoder {
    fn name(&self) -> &'static str {
        "map"
    }

    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool {
        target.kind == TargetKind::Map
            && matches!(source, ValueKind::Object | ValueKind::String)
    }

    fn decode(
        &self,
        registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value> {
        let (key_ty, value_ty) = target.ty.key_value()?;
        let key_info = target.nested(key_ty);
        let value_info = target.nested(value_ty);
        let policy = target.hints.item_policy;

        let mut out = Object::new();
        match source {
            Value::Object(object) => {
                for (index, (key, value)) in object.iter().enumerate() {
                    match registry.decode(&value_info, value) {
                        Ok(decoded) => out.insert(key.clone(), decoded),
                        Err(err) => match policy {
                            ItemPolicy::Skip => {
                                debug!(index, key = %key, %err, "skipping malformed map value");
                            }
                            ItemPolicy::Fail => {
                                return Err(ValueError::malformed_element(
                                    index,
                                    err.to_string(),
                                ));
                            }
                        },
                    }
                }
            }
            Value::Text(text) => {
                let list_sep = target.hints.list_separator();
                let map_sep = target.hints.map_separator();
                for (index, entry) in text.as_str().split(list_sep).enumerate() {
                    match decode_entry(registry, &key_info, &value_info, entry, map_sep) {
                        Ok(Some((key, value))) => out.insert(key, value),
                        // a null key or null value drops the entry
                        Ok(None) => {}
                        Err(err) => match policy {
                            ItemPolicy::Skip => {
                                debug!(index, entry, %err, "skipping malformed map entry");
                            }
                            ItemPolicy::Fail => {
                                return Err(ValueError::malformed_element(
                                    index,
                                    err.to_string(),
                                ));
                            }
                        },
                    }
                }
            }
            other => {
                return Err(ValueError::type_mismatch("map", other.kind().name()));
            }
        }
        Ok(Value::Object(out))
    }
}

/// Decode one `key<sep>value` entry.
///
/// The decoded key is stored under its canonical string form, which for a
/// string key is the key itself.
fn decode_entry(
    registry: &Registry,
    key_info: &TargetInfo,
    value_info: &TargetInfo,
    entry: &str,
    map_sep: char,
) -> ValueResult<Option<(String, Value)>> {
    let parts: Vec<&str> = entry.split(map_sep).collect();
    let [raw_key, raw_value] = parts.as_slice() else {
        return Err(ValueError::parse_failure("map entry", entry));
    };

    let key = registry.decode(key_info, &Value::text(raw_key.trim()))?;
    if key.is_null() {
        return Ok(None);
    }
    let value = registry.decode(value_info, &Value::text(raw_value.trim()))?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some((key.to_string(), value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_value;
    use crate::rows::{Rows, VecRows};

    fn int_ty() -> TargetType {
        TargetType::scalar(TargetKind::Integer)
    }

    fn decode(target: TargetInfo, source: Value) -> ValueResult<Value> {
        decode_value(&target, &source)
    }

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::integer).collect())
    }

    #[test]
    fn test_list_from_delimited_string() {
        let target = TargetInfo::new(TargetType::list_of(int_ty()));
        assert_eq!(
            decode(target, Value::text("1, 2, 3")).unwrap(),
            ints(&[1, 2, 3])
        );
    }

    #[test]
    fn test_list_custom_separator_skips_malformed() {
        let target = TargetInfo::new(TargetType::list_of(int_ty()))
            .with_hints(Hints::new().with_separators(';', ':'));
        assert_eq!(
            decode(target, Value::text("1;2;x;4")).unwrap(),
            ints(&[1, 2, 4])
        );
    }

    #[test]
    fn test_list_fail_policy_reports_index() {
        let target = TargetInfo::new(TargetType::list_of(int_ty())).with_hints(
            Hints::new()
                .with_separators(';', ':')
                .fail_on_malformed(),
        );
        assert!(matches!(
            decode(target, Value::text("1;2;x;4")),
            Err(ValueError::MalformedElement { index: 2, .. })
        ));
    }

    #[test]
    fn test_list_without_type_argument() {
        let target = TargetInfo::new(TargetType::scalar(TargetKind::List));
        assert!(matches!(
            decode(target, Value::text("1,2")),
            Err(ValueError::MissingTypeArgument { .. })
        ));
    }

    #[test]
    fn test_list_from_array_coerces_elements() {
        let target = TargetInfo::new(TargetType::list_of(int_ty()));
        let source = Value::Array(
            vec![Value::text("1"), Value::integer(2), Value::float(3.0)]
                .into_iter()
                .collect(),
        );
        assert_eq!(decode(target, source).unwrap(), ints(&[1, 2, 3]));
    }

    #[test]
    fn test_list_from_rows_cursor() {
        let target = TargetInfo::new(TargetType::list_of(int_ty()));
        let rows = Rows::new(VecRows::new(vec![Value::text("5"), Value::integer(6)]));
        let source = Value::rows(rows.clone());
        assert_eq!(decode(target, source).unwrap(), ints(&[5, 6]));
        assert!(rows.is_consumed());
    }

    #[test]
    fn test_set_dedups_in_order() {
        let target = TargetInfo::new(TargetType::set_of(int_ty()));
        assert_eq!(
            decode(target, Value::text("3,1,3,2,1")).unwrap(),
            ints(&[3, 1, 2])
        );
    }

    #[test]
    fn test_array_elements_share_the_element_kind() {
        let target = TargetInfo::new(TargetType::array_of(int_ty()));
        let out = decode(target, Value::text("1,2,3")).unwrap();
        let arr = out.as_array().unwrap();
        assert!(arr.iter().all(|v| v.kind() == ValueKind::Integer));
        assert_eq!(out, ints(&[1, 2, 3]));
    }

    #[test]
    fn test_nested_list_of_list() {
        // inner lists split on the map separator position is not a thing;
        // nested containers decode from already-structured sources
        let target = TargetInfo::new(TargetType::list_of(TargetType::list_of(int_ty())));
        let source = Value::Array(
            vec![ints(&[1, 2]), Value::text("3,4")].into_iter().collect(),
        );
        let out = decode(target, source).unwrap();
        assert_eq!(
            out,
            Value::Array(vec![ints(&[1, 2]), ints(&[3, 4])].into_iter().collect())
        );
    }

    #[test]
    fn test_map_from_string_insertion_order() {
        let target = TargetInfo::new(TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            int_ty(),
        ));
        let out = decode(target, Value::text("a:1, b:2")).unwrap();
        let obj = out.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::integer(1)));
        assert_eq!(obj.get("b"), Some(&Value::integer(2)));
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_map_skips_malformed_pairs() {
        let target = TargetInfo::new(TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            int_ty(),
        ));
        let out = decode(target, Value::text("a:1,broken,b:2,c:x")).unwrap();
        let obj = out.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_map_fail_policy() {
        let target = TargetInfo::new(TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            int_ty(),
        ))
        .with_hints(Hints::new().fail_on_malformed());
        assert!(matches!(
            decode(target, Value::text("a:1,broken")),
            Err(ValueError::MalformedElement { index: 1, .. })
        ));
    }

    #[test]
    fn test_map_integer_keys_store_canonical_form() {
        let target = TargetInfo::new(TargetType::map_of(
            int_ty(),
            TargetType::scalar(TargetKind::String),
        ));
        let out = decode(target, Value::text("01:x, 2:y")).unwrap();
        let obj = out.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["1", "2"]);
    }

    #[test]
    fn test_map_from_object_passes_keys_through() {
        let mut source = Object::new();
        source.insert("a", Value::text("1"));
        source.insert("b", Value::text("2"));
        let target = TargetInfo::new(TargetType::map_of(
            TargetType::scalar(TargetKind::String),
            int_ty(),
        ));
        let out = decode(target, Value::Object(source)).unwrap();
        let obj = out.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::integer(1)));
        assert_eq!(obj.get("b"), Some(&Value::integer(2)));
    }

    #[test]
    fn test_map_requires_two_arguments() {
        let target = TargetInfo::new(TargetType {
            kind: TargetKind::Map,
            args: vec![int_ty()],
        });
        assert!(matches!(
            decode(target, Value::text("a:1")),
            Err(ValueError::MissingTypeArgument { .. })
        ));
    }

    #[test]
    fn test_scalar_source_is_not_a_sequence() {
        let target = TargetInfo::new(TargetType::list_of(int_ty()));
        assert!(matches!(
            decode(target, Value::integer(5)),
            Err(ValueError::NoConverterFound { .. })
        ));
    }
}
