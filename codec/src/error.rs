//! Error types for serializer operations.

use thiserror::Error;

/// Error type for serializer operations.
///
/// Each variant carries the short name of the codec that raised it (the same
/// name its description starts with), so a failure deep inside a nested
/// combinator still points at the layer that gave up.
#[derive(Error, Debug)]
pub enum Error {
    /// Zero bytes remained where the codec required at least one. Kept apart
    /// from [`Error::NotEnoughBytes`] so callers can treat fully drained
    /// buffers differently from truncated ones.
    #[error("{0}: cannot deserialize from an empty buffer")]
    EmptyBuffer(&'static str),
    #[error("{codec}: not enough bytes, expected {expected} but found {actual}")]
    NotEnoughBytes {
        codec: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A fixed-count collection was asked to encode the wrong number of items.
    #[error("{codec}: expected {expected} items but got {actual}")]
    InvalidItemCount {
        codec: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A count or flag did not fit the wire width it was declared with.
    #[error("{codec}: value {value} out of range, expected between {min} and {max}")]
    NumberOutOfRange {
        codec: &'static str,
        value: u128,
        min: u128,
        max: u128,
    },
    /// An enum was asked to encode a value outside its declared variants.
    #[error("{codec}: invalid variant {variant}, expected one of [{options}]")]
    InvalidVariant {
        codec: &'static str,
        variant: String,
        options: String,
    },
    /// A decoded discriminator pointed past the declared variants.
    #[error("{codec}: discriminator {discriminator} out of range, expected between 0 and {max}")]
    InvalidDiscriminator {
        codec: &'static str,
        discriminator: usize,
        max: usize,
    },
    /// A construction that only works over fixed-size codecs was given a
    /// variable-size one.
    #[error("{0}: expected a fixed-size serializer")]
    ExpectedFixedSize(&'static str),
    /// The decoded value cannot be represented on this target.
    #[error("{0}: operation not supported on this target")]
    UnsupportedOperation(&'static str),
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, String), // context, message
}
