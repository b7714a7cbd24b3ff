//! The decode dispatch registry.
//!
//! An ordered sequence of [`Decoder`]s. Decoding scans the sequence in
//! registration order and delegates to the first decoder whose `accepts`
//! predicate matches the (target kind, source kind) pair: first match
//! wins, so overlap between decoders is resolved deterministically by
//! registration order. [`Registry::ambiguities`] reports such overlaps so
//! callers can assert a clean table at construction time.
//!
//! A registry is built once (or extended right after construction) and is
//! read-only afterwards; decoding takes `&self` and keeps no per-call
//! state, so one registry can serve any number of threads.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::core::{Value, ValueKind};
use crate::decode::{container, scalar, temporal};
use crate::error::{ValueError, ValueResult};
use crate::target::{TargetInfo, TargetKind, TargetType};

/// How many times a null fallback may re-enter the registry.
///
/// A null-substitute or default-value literal is itself decoded; one extra
/// level is the normal case, the cap only exists to stop a pathological
/// hint set from looping.
const NULL_FALLBACK_LIMIT: usize = 4;

/// A unit of conversion ownership.
///
/// A decoder claims (target, source) pairs via [`Decoder::accepts`] and
/// converts via [`Decoder::decode`]. Container decoders call back into the
/// registry they are handed for their element conversions.
pub trait Decoder: Send + Sync {
    /// Stable name used in logs and ambiguity reports.
    fn name(&self) -> &'static str;

    /// Does this decoder own the (target, source) pair?
    fn accepts(&self, target: &TargetType, source: ValueKind) -> bool;

    /// Convert `source` into the described target.
    ///
    /// `source` is never null and never kind-identical to an identity
    /// target; the registry short-circuits both cases first.
    fn decode(
        &self,
        registry: &Registry,
        target: &TargetInfo,
        source: &Value,
    ) -> ValueResult<Value>;
}

/// A detected overlap between two decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub target: TargetKind,
    pub source: ValueKind,
    pub first: &'static str,
    pub second: &'static str,
}

/// Ordered decoder table.
pub struct Registry {
    decoders: Vec<Arc<dyn Decoder>>,
}

impl Registry {
    /// The standard decoder stack.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            decoders: vec![
                Arc::new(scalar::NumberDecoder),
                Arc::new(scalar::StringDecoder),
                Arc::new(scalar::BoolDecoder),
                Arc::new(scalar::CharDecoder),
                Arc::new(container::ListDecoder),
                Arc::new(container::SetDecoder),
                Arc::new(container::MapDecoder),
                Arc::new(container::ArrayDecoder),
                Arc::new(temporal::TemporalDecoder),
                Arc::new(scalar::UuidDecoder),
                Arc::new(scalar::UrlDecoder),
                Arc::new(scalar::BytesDecoder),
                Arc::new(scalar::JsonDecoder),
            ],
        }
    }

    /// An empty registry, for fully custom stacks.
    #[must_use]
    pub fn empty() -> Self {
        Self { decoders: vec![] }
    }

    /// Prepend a decoder. It takes priority over everything registered so
    /// far.
    pub fn push(&mut self, decoder: impl Decoder + 'static) {
        self.decoders.insert(0, Arc::new(decoder));
    }

    /// Append a decoder behind everything registered so far.
    pub fn add(&mut self, decoder: impl Decoder + 'static) {
        self.decoders.push(Arc::new(decoder));
    }

    /// Decode `source` into the described target.
    ///
    /// Null handling comes first: a null source decodes the
    /// null-substitute hint if present, else the default-value hint, else
    /// yields null. A non-null source whose kind already is the target's
    /// identity kind passes through unchanged. Everything else goes to the
    /// first accepting decoder.
    ///
    /// # Errors
    ///
    /// [`ValueError::NoConverterFound`] when no decoder accepts the pair;
    /// otherwise whatever the owning decoder reports.
    pub fn decode(&self, target: &TargetInfo, source: &Value) -> ValueResult<Value> {
        self.decode_with_depth(target, source, 0)
    }

    fn decode_with_depth(
        &self,
        target: &TargetInfo,
        source: &Value,
        fallback_depth: usize,
    ) -> ValueResult<Value> {
        if source.is_null() {
            return self.decode_null(target, fallback_depth);
        }

        if identity_applies(&target.ty, source) {
            trace!(to = %target.ty, from = %source.kind(), "identity fast path");
            return Ok(source.clone());
        }

        let source_kind = source.kind();
        for decoder in &self.decoders {
            if decoder.accepts(&target.ty, source_kind) {
                trace!(
                    decoder = decoder.name(),
                    to = %target.ty,
                    from = %source_kind,
                    "dispatch"
                );
                return decoder.decode(self, target, source);
            }
        }

        Err(ValueError::no_converter(
            target.ty.to_string(),
            source_kind.name(),
            source.to_string(),
        ))
    }

    fn decode_null(&self, target: &TargetInfo, fallback_depth: usize) -> ValueResult<Value> {
        let literal = target
            .hints
            .null_substitute
            .as_deref()
            .or(target.hints.default_value.as_deref())
            .filter(|s| !s.is_empty());

        let Some(literal) = literal else {
            return Ok(Value::Null);
        };
        if fallback_depth >= NULL_FALLBACK_LIMIT {
            return Err(ValueError::recursion_limit(target.ty.to_string()));
        }
        self.decode_with_depth(target, &Value::text(literal), fallback_depth + 1)
    }

    /// Report every (target, source) pair claimed by more than one
    /// decoder.
    ///
    /// First-registered still wins at decode time; this exists so a custom
    /// stack can assert at construction that no accidental overlap crept
    /// in.
    #[must_use]
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();
        for target_kind in TargetKind::all() {
            let probe = TargetType::scalar(target_kind);
            for source_kind in ValueKind::all() {
                let mut owners = self
                    .decoders
                    .iter()
                    .filter(|d| d.accepts(&probe, source_kind))
                    .map(|d| d.name());
                if let (Some(first), Some(second)) = (owners.next(), owners.next()) {
                    found.push(Ambiguity {
                        target: target_kind,
                        source: source_kind,
                        first,
                        second,
                    });
                }
            }
        }
        found
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Does the source already have the target's shape?
fn identity_applies(target: &TargetType, source: &Value) -> bool {
    match target.kind {
        // An already-parsed JSON tree passes through.
        TargetKind::Json => matches!(source.kind(), ValueKind::Array | ValueKind::Object),
        kind => kind
            .identity_kind()
            .is_some_and(|identity| identity == source.kind()),
    }
}

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::standard);

/// The shared process-wide registry with the standard stack.
#[must_use]
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Decode through the default registry.
///
/// # Errors
///
/// See [`Registry::decode`].
pub fn decode_value(target: &TargetInfo, source: &Value) -> ValueResult<Value> {
    default_registry().decode(target, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::Hints;

    fn info(kind: TargetKind) -> TargetInfo {
        TargetInfo::new(TargetType::scalar(kind))
    }

    #[test]
    fn test_identity_fast_path() {
        let registry = Registry::standard();
        let v = Value::text("untouched");
        assert_eq!(registry.decode(&info(TargetKind::String), &v).unwrap(), v);

        let v = Value::integer(9);
        assert_eq!(registry.decode(&info(TargetKind::Integer), &v).unwrap(), v);
    }

    #[test]
    fn test_null_without_fallback_is_null() {
        let registry = Registry::standard();
        let out = registry
            .decode(&info(TargetKind::Integer), &Value::Null)
            .unwrap();
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_null_substitute_wins_over_default() {
        let registry = Registry::standard();
        let target = info(TargetKind::Integer).with_hints(
            Hints::new()
                .with_null_substitute("3")
                .with_default_value("7"),
        );
        let out = registry.decode(&target, &Value::Null).unwrap();
        assert_eq!(out, Value::integer(3));
    }

    #[test]
    fn test_no_converter_diagnostics() {
        let registry = Registry::standard();
        let err = registry
            .decode(&info(TargetKind::Uuid), &Value::integer(5))
            .unwrap_err();
        match err {
            ValueError::NoConverterFound {
                target,
                source_kind,
                value,
            } => {
                assert_eq!(target, "uuid");
                assert_eq!(source_kind, "integer");
                assert_eq!(value, "5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_standard_stack_has_no_ambiguities() {
        assert_eq!(Registry::standard().ambiguities(), vec![]);
    }

    #[test]
    fn test_overlapping_custom_decoder_is_reported() {
        struct Shadow;
        impl Decoder for Shadow {
            fn name(&self) -> &'static str {
                "shadow"
            }
            fn accepts(&self, target: &TargetType, _source: ValueKind) -> bool {
                target.kind == TargetKind::Boolean
            }
            fn decode(
                &self,
                _registry: &Registry,
                _target: &TargetInfo,
                _source: &Value,
            ) -> ValueResult<Value> {
                Ok(Value::boolean(true))
            }
        }

        let mut registry = Registry::standard();
        registry.push(Shadow);
        let ambiguities = registry.ambiguities();
        assert!(
            ambiguities
                .iter()
                .any(|a| a.target == TargetKind::Boolean && a.first == "shadow")
        );

        // push() put it in front, so it wins the scan.
        let out = registry
            .decode(
                &TargetInfo::new(TargetType::scalar(TargetKind::Boolean)),
                &Value::text("whatever"),
            )
            .unwrap();
        assert_eq!(out, Value::boolean(true));
    }
}
