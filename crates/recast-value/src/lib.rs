#![allow(missing_docs)]
#![warn(clippy::all)]
//! Hint-driven runtime coercion between dynamic values and typed targets.
//!
//! A caller describes its destination with a [`TargetInfo`] (a tag from
//! the closed [`TargetKind`] set, nested type arguments for containers,
//! and per-field [`Hints`]) and hands the decode registry a dynamically
//! typed [`Value`]. The registry picks the first registered decoder that
//! accepts the (target, source) pair and delegates; container decoders
//! recurse through the same registry for their elements. The encode
//! registry runs the same dispatch in the opposite direction, back to
//! strings.

pub mod collections;
pub mod core;
pub mod decode;
pub mod encode;
pub mod error;
pub mod hints;
pub mod rows;
pub mod scalar;
pub mod target;
pub mod temporal;
pub mod typed;

// Re-export core types
pub use crate::core::{Value, ValueKind};
pub use collections::{Array, Object};
pub use decode::{Ambiguity, Decoder, Registry, decode_value, default_registry};
pub use encode::{EncodeRegistry, Encoder, default_encode_registry, encode_value};
pub use error::{ValueError, ValueResult};
pub use hints::{BoolPolicy, Hints, ItemPolicy, Separators};
pub use rows::{RowSource, Rows, VecRows};
pub use scalar::{Bytes, Text};
pub use target::{TargetInfo, TargetKind, TargetType};
pub use typed::{FromValue, decode_as, decode_as_with};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Hints, TargetInfo, TargetKind, TargetType, Value, ValueError, ValueKind, ValueResult,
        decode_as, decode_value, encode_value,
    };
}
