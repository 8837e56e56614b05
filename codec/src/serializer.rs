//! Core serializer traits.

use crate::{
    adapters::{Described, Fixed, Mapped, Reverse},
    error::Error,
};
use bytes::{Bytes, BytesMut};

/// A value that converts between a typed representation and bytes.
///
/// Serializers are plain immutable values: building one never touches a
/// buffer, and every call on one is independent of every other. Composite
/// serializers own their children, so a fully nested codec is a single value
/// that can be stored, shared, and reused.
///
/// The two associated types loosen the encode side without weakening the
/// decode side: `Input` is what [`Serializer::serialize`] accepts and
/// `Output` is the canonical type [`Serializer::deserialize`] produces. For
/// most codecs they coincide; adapters such as [`SerializerExt::map`] split
/// them apart.
pub trait Serializer {
    /// The type accepted when encoding.
    type Input;
    /// The type produced when decoding.
    type Output;

    /// A human-readable summary of the wire format, e.g. `array(u8(le); u32(le))`.
    fn description(&self) -> String;

    /// The exact encoded size in bytes, or `None` if it varies by value.
    fn fixed_size(&self) -> Option<usize>;

    /// An upper bound on the encoded size, or `None` if unbounded.
    fn max_size(&self) -> Option<usize>;

    /// Encodes `value` by appending to `buf`.
    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error>;

    /// Decodes one value from `bytes` starting at `offset`.
    ///
    /// Returns the value together with the offset of the first byte after it.
    /// Implementations never read past the returned offset, so callers can
    /// chain reads through a shared buffer.
    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error>;

    /// Encodes `value` into a fresh buffer.
    fn serialize(&self, value: &Self::Input) -> Result<Bytes, Error> {
        let mut buf = BytesMut::with_capacity(self.fixed_size().unwrap_or(0));
        self.write(value, &mut buf)?;
        if let Some(size) = self.fixed_size() {
            debug_assert_eq!(buf.len(), size, "write() did not write expected bytes");
        }
        Ok(buf.freeze())
    }

    /// Decodes one value from the start of `bytes`.
    ///
    /// Trailing bytes are left alone; the returned offset tells the caller
    /// how many were consumed.
    fn deserialize(&self, bytes: &[u8]) -> Result<(Self::Output, usize), Error> {
        self.read_at(bytes, 0)
    }
}

/// Unsigned number serializers that can carry a `usize` on the wire.
///
/// Collection counts, presence flags, and enum discriminators are all plain
/// unsigned numbers underneath; this trait lets any such codec stand in for
/// the default one.
pub trait Prefix: Serializer {
    /// Range-checks `value` against this codec's width and writes it.
    fn write_usize(&self, value: usize, buf: &mut BytesMut) -> Result<(), Error>;

    /// Reads a value and converts it to `usize`.
    fn read_usize(&self, bytes: &[u8], offset: usize) -> Result<(usize, usize), Error>;
}

/// Combinator methods available on every serializer.
pub trait SerializerExt: Serializer + Sized {
    /// Adapts this serializer to another pair of types.
    ///
    /// `unmap` converts an outer value into this serializer's input before
    /// encoding; `map` converts this serializer's output into the outer type
    /// after decoding. Sizes and description pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wireform_codec::{Codecs, Serializer, SerializerExt};
    ///
    /// let ascii = Codecs::new().u8().map(
    ///     |c: &char| *c as u8,
    ///     |b| b as char,
    /// );
    /// let bytes = ascii.serialize(&'A')?;
    /// assert_eq!(bytes.as_ref(), &[0x41]);
    /// # Ok::<(), wireform_codec::Error>(())
    /// ```
    fn map<I, O, F, G>(self, unmap: F, map: G) -> Mapped<Self, F, G, I, O>
    where
        F: Fn(&I) -> Self::Input,
        G: Fn(Self::Output) -> O,
    {
        Mapped::new(self, unmap, map)
    }

    /// Forces the encoded form to exactly `size` bytes, zero-padding short
    /// encodings and truncating long ones.
    fn fixed(self, size: usize) -> Fixed<Self> {
        Fixed::new(self, size)
    }

    /// Reverses the encoded bytes, converting between endiannesses of a
    /// fixed-size codec. Fails if this serializer has no fixed size.
    fn reversed(self) -> Result<Reverse<Self>, Error> {
        Reverse::new(self)
    }

    /// Overrides [`Serializer::description`].
    fn described(self, description: impl Into<String>) -> Described<Self> {
        Described::new(self, description)
    }
}

impl<S: Serializer> SerializerExt for S {}

/// Returns how many bytes remain at `offset`.
#[inline]
pub(crate) fn remaining(bytes: &[u8], offset: usize) -> usize {
    bytes.len().saturating_sub(offset)
}

/// Ensures at least `needed` bytes remain at `offset`.
///
/// A fully drained buffer reports [`Error::EmptyBuffer`] so the tolerance
/// policy can recognize it; a short one reports [`Error::NotEnoughBytes`].
#[inline]
pub(crate) fn at_least(
    codec: &'static str,
    bytes: &[u8],
    offset: usize,
    needed: usize,
) -> Result<(), Error> {
    if needed == 0 {
        return Ok(());
    }
    let actual = remaining(bytes, offset);
    if actual == 0 {
        return Err(Error::EmptyBuffer(codec));
    }
    if actual < needed {
        return Err(Error::NotEnoughBytes {
            codec,
            expected: needed,
            actual,
        });
    }
    Ok(())
}

/// Slices exactly `needed` bytes at `offset`.
#[inline]
pub(crate) fn slice_exact<'a>(
    codec: &'static str,
    bytes: &'a [u8],
    offset: usize,
    needed: usize,
) -> Result<&'a [u8], Error> {
    if needed == 0 {
        return Ok(&[]);
    }
    at_least(codec, bytes, offset, needed)?;
    Ok(&bytes[offset..offset + needed])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_empty() {
        assert!(matches!(
            at_least("u32", &[], 0, 4),
            Err(Error::EmptyBuffer("u32"))
        ));
        assert!(matches!(
            at_least("u32", &[1, 2], 2, 4),
            Err(Error::EmptyBuffer("u32"))
        ));
    }

    #[test]
    fn test_at_least_short() {
        assert!(matches!(
            at_least("u32", &[1, 2], 0, 4),
            Err(Error::NotEnoughBytes {
                codec: "u32",
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_at_least_zero() {
        // Zero-byte reads never touch the buffer.
        assert!(at_least("unit", &[], 0, 0).is_ok());
        assert!(at_least("unit", &[], 9, 0).is_ok());
    }

    #[test]
    fn test_slice_exact() {
        let bytes = [1u8, 2, 3, 4];
        assert_eq!(slice_exact("bytes", &bytes, 1, 2).unwrap(), &[2, 3]);
        assert_eq!(slice_exact("bytes", &bytes, 9, 0).unwrap(), &[]);
        assert!(slice_exact("bytes", &bytes, 3, 2).is_err());
    }
}
