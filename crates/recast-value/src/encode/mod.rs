//! Encoding: values back to their string representation.
//!
//! The mirror image of the decode registry: an ordered table of
//! [`Encoder`]s scanned first-match-wins, with an exact-kind table ahead
//! of the structural matchers and a natural-form fallback behind both.
//! [`EncodeRegistry::encode_to_string`] returns None only for null input;
//! inside container joins that None makes the element disappear from the
//! joined output.

pub mod pattern;

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::core::Value;
use crate::hints::Hints;
use crate::temporal;

/// A unit of rendering ownership, mirroring the decode side.
pub trait Encoder: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Does this encoder own the value?
    fn accepts(&self, value: &Value) -> bool;

    /// Render the value. None marks it unencodable in this context.
    fn encode(&self, registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String>;
}

/// Ordered encoder table.
pub struct EncodeRegistry {
    encoders: Vec<Arc<dyn Encoder>>,
}

impl EncodeRegistry {
    /// The standard encoder stack.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            encoders: vec![
                Arc::new(NumberEncoder),
                Arc::new(TemporalEncoder),
                Arc::new(BytesEncoder),
                Arc::new(ArrayEncoder),
                Arc::new(ObjectEncoder),
            ],
        }
    }

    /// An empty registry, for fully custom stacks.
    #[must_use]
    pub fn empty() -> Self {
        Self { encoders: vec![] }
    }

    /// Prepend an encoder. It takes priority over everything registered
    /// so far.
    pub fn push(&mut self, encoder: impl Encoder + 'static) {
        self.encoders.insert(0, Arc::new(encoder));
    }

    /// Append an encoder behind everything registered so far.
    pub fn add(&mut self, encoder: impl Encoder + 'static) {
        self.encoders.push(Arc::new(encoder));
    }

    /// Render a value to its string form.
    ///
    /// Returns None only for null input. Strings pass through untouched;
    /// anything without a dedicated encoder gets its natural form.
    #[must_use]
    pub fn encode_to_string(&self, value: &Value, hints: &Hints) -> Option<String> {
        match value {
            Value::Null => None,
            Value::Text(t) => Some(t.as_str().to_owned()),
            other => {
                for encoder in &self.encoders {
                    if encoder.accepts(other) {
                        trace!(encoder = encoder.name(), kind = %other.kind(), "encode");
                        return encoder.encode(self, other, hints);
                    }
                }
                Some(natural_form(other))
            }
        }
    }
}

impl Default for EncodeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Natural string form of scalars without a dedicated encoder.
fn natural_form(value: &Value) -> String {
    match value {
        Value::Boolean(b) => b.to_string(),
        Value::Char(c) => c.to_string(),
        Value::Uuid(u) => u.to_string(),
        Value::Url(u) => u.to_string(),
        Value::Rows(_) => "<rows>".to_owned(),
        // the scalar table ahead of this fallback covers the rest
        other => format!("{:?}", other.kind()),
    }
}

/// Numbers, with an optional pattern hint.
struct NumberEncoder;

impl Encoder for NumberEncoder {
    fn name(&self) -> &'static str {
        "number"
    }

    fn accepts(&self, value: &Value) -> bool {
        value.is_numeric()
    }

    fn encode(&self, _registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String> {
        let rendered = match (value, hints.number_pattern.as_deref()) {
            (Value::Integer(i), Some(p)) => pattern::format_i64(p, *i),
            (Value::Integer(i), None) => i.to_string(),
            (Value::Float(f), Some(p)) => pattern::format_f64(p, *f),
            (Value::Float(f), None) => f.to_string(),
            (Value::Decimal(d), Some(p)) => pattern::format_decimal(p, d),
            (Value::Decimal(d), None) => d.to_string(),
            _ => return None,
        };
        Some(rendered)
    }
}

/// Temporal values, with an optional date pattern hint and per-kind
/// default patterns.
struct TemporalEncoder;

impl Encoder for TemporalEncoder {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn accepts(&self, value: &Value) -> bool {
        value.is_temporal()
    }

    fn encode(&self, _registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String> {
        let hint = hints.date_pattern.as_deref();
        match value {
            Value::Date(d) => hint
                .and_then(|p| temporal::format_date(*d, p))
                .or_else(|| temporal::format_date(*d, temporal::FORMAT_DATE)),
            Value::Time(t) => hint
                .and_then(|p| temporal::format_time(*t, p))
                .or_else(|| temporal::format_time(*t, temporal::FORMAT_TIME)),
            Value::DateTime(dt) => hint
                .and_then(|p| temporal::format_datetime(*dt, p))
                .or_else(|| temporal::format_datetime(*dt, temporal::FORMAT_DATE_TIME)),
            Value::Timestamp(ms) => {
                let dt = temporal::from_epoch_millis(*ms).ok()?;
                hint.and_then(|p| temporal::format_datetime(dt, p))
                    .or_else(|| temporal::format_datetime(dt, temporal::FORMAT_DATE_TIME))
            }
            _ => None,
        }
    }
}

/// Byte buffers join as numbers on the list separator.
struct BytesEncoder;

impl Encoder for BytesEncoder {
    fn name(&self) -> &'static str {
        "bytes"
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(value, Value::Bytes(_))
    }

    fn encode(&self, _registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String> {
        let bytes = value.as_bytes()?;
        let sep = hints.list_separator().to_string();
        Some(
            bytes
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(&sep),
        )
    }
}

/// Arrays join their encoded elements on the list separator; elements
/// that encode to None (nulls) are skipped.
struct ArrayEncoder;

impl Encoder for ArrayEncoder {
    fn name(&self) -> &'static str {
        "array"
    }

    fn accepts(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn encode(&self, registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String> {
        let array = value.as_array()?;
        let sep = hints.list_separator().to_string();
        let parts: Vec<String> = array
            .iter()
            .filter_map(|item| registry.encode_to_string(item, hints))
            .collect();
        Some(parts.join(&sep))
    }
}

/// Objects join `key<map-sep>value` entries on the list separator;
/// entries whose value encodes to None are skipped.
struct ObjectEncoder;

impl Encoder for ObjectEncoder {
    fn name(&self) -> &'static str {
        "object"
    }

    fn accepts(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn encode(&self, registry: &EncodeRegistry, value: &Value, hints: &Hints) -> Option<String> {
        let object = value.as_object()?;
        let list_sep = hints.list_separator().to_string();
        let map_sep = hints.map_separator();
        let parts: Vec<String> = object
            .iter()
            .filter_map(|(key, item)| {
                registry
                    .encode_to_string(item, hints)
                    .map(|rendered| format!("{key}{map_sep}{rendered}"))
            })
            .collect();
        Some(parts.join(&list_sep))
    }
}

static DEFAULT_ENCODE_REGISTRY: Lazy<EncodeRegistry> = Lazy::new(EncodeRegistry::standard);

/// The shared process-wide encode registry with the standard stack.
#[must_use]
pub fn default_encode_registry() -> &'static EncodeRegistry {
    &DEFAULT_ENCODE_REGISTRY
}

/// Encode through the default registry.
#[must_use]
pub fn encode_value(value: &Value, hints: &Hints) -> Option<String> {
    default_encode_registry().encode_to_string(value, hints)
}
