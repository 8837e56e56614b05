//! Construction-time wire configuration.

use crate::serializer::Serializer;
use std::fmt;

/// Byte order for multi-byte numbers.
///
/// The wire default is little-endian; numeric codecs accept either at
/// construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Little => f.write_str("le"),
            Endian::Big => f.write_str("be"),
        }
    }
}

/// Element-count strategy shared by the sequence combinators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Count<P> {
    /// The count is written before the elements using the given codec.
    Prefixed(P),
    /// Exactly this many elements; nothing on the wire.
    Fixed(usize),
    /// As many whole elements as the buffer holds; nothing on the wire.
    Remainder,
}

impl<P: Serializer> Count<P> {
    pub(crate) fn describe(&self) -> String {
        match self {
            Count::Prefixed(prefix) => prefix.description(),
            Count::Fixed(size) => size.to_string(),
            Count::Remainder => "remainder".into(),
        }
    }
}

/// Content-length strategy shared by the byte and string codecs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Length<P> {
    /// The length is written before the content using the given codec.
    Prefixed(P),
    /// Exactly this many content bytes, zero-padded or truncated on encode.
    Fixed(usize),
    /// The content spans the rest of the buffer.
    Variable,
}

impl<P: Serializer> Length<P> {
    pub(crate) fn describe(&self) -> String {
        match self {
            Length::Prefixed(prefix) => prefix.description(),
            Length::Fixed(size) => size.to_string(),
            Length::Variable => "variable".into(),
        }
    }
}
