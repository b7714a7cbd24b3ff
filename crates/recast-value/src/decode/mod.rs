//! Decoding: dynamic values into described targets.

pub mod container;
pub mod registry;
pub mod scalar;
pub mod temporal;

pub use registry::{Ambiguity, Decoder, Registry, decode_value, default_registry};
