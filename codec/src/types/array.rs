//! Codec for homogeneous sequences.

use crate::{
    config::Count,
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::numbers::U32,
};
use bytes::BytesMut;

/// Codec for [`Vec`] values, all items sharing one codec.
///
/// The [`Count`] mode determines how the item count travels:
/// - `Prefixed` writes the count ahead of the items.
/// - `Fixed` writes nothing and expects exactly that many items.
/// - `Remainder` writes nothing and decodes as many whole items as the rest
///   of the buffer holds. Requires a fixed-size item codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Array<C, P = U32> {
    item: C,
    size: Count<P>,
    tolerant: bool,
}

impl<C: Serializer> Array<C> {
    /// Items preceded by their count as a little-endian `u32`.
    pub const fn new(item: C) -> Self {
        Self {
            item,
            size: Count::Prefixed(U32::le()),
            tolerant: true,
        }
    }

    /// Exactly `size` items, no count on the wire.
    pub const fn fixed(item: C, size: usize) -> Self {
        Self {
            item,
            size: Count::Fixed(size),
            tolerant: true,
        }
    }

    /// As many items as the rest of the buffer holds.
    pub fn remainder(item: C) -> Result<Self, Error> {
        if item.fixed_size().is_none() {
            return Err(Error::ExpectedFixedSize("array"));
        }
        Ok(Self {
            item,
            size: Count::Remainder,
            tolerant: true,
        })
    }
}

impl<C: Serializer, P: Prefix> Array<C, P> {
    /// Items preceded by their count, carried by `prefix`.
    pub const fn prefixed(item: C, prefix: P) -> Self {
        Self {
            item,
            size: Count::Prefixed(prefix),
            tolerant: true,
        }
    }

    /// When `false`, decoding from a fully drained buffer fails instead of
    /// producing an empty sequence.
    pub fn tolerate_empty(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    fn item_size(&self) -> Result<usize, Error> {
        self.item.fixed_size().ok_or(Error::ExpectedFixedSize("array"))
    }
}

impl<C: Serializer, P: Prefix> Serializer for Array<C, P> {
    type Input = Vec<C::Input>;
    type Output = Vec<C::Output>;

    fn description(&self) -> String {
        format!("array({}; {})", self.item.description(), self.size.describe())
    }

    fn fixed_size(&self) -> Option<usize> {
        match self.size {
            Count::Fixed(0) => Some(0),
            Count::Fixed(size) => size.checked_mul(self.item.fixed_size()?),
            _ => None,
        }
    }

    fn max_size(&self) -> Option<usize> {
        match self.size {
            Count::Fixed(0) => Some(0),
            Count::Fixed(size) => size.checked_mul(self.item.max_size()?),
            _ => None,
        }
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        match &self.size {
            Count::Prefixed(prefix) => prefix.write_usize(value.len(), buf)?,
            Count::Fixed(size) => {
                if value.len() != *size {
                    return Err(Error::InvalidItemCount {
                        codec: "array",
                        expected: *size,
                        actual: value.len(),
                    });
                }
            }
            Count::Remainder => {}
        }
        for item in value {
            self.item.write(item, buf)?;
        }
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        // A zero-count sequence needs nothing from the buffer.
        if matches!(self.size, Count::Fixed(0)) {
            return Ok((Vec::new(), offset));
        }
        if remaining(bytes, offset) == 0 {
            if self.tolerant {
                return Ok((Vec::new(), offset));
            }
            return Err(Error::EmptyBuffer("array"));
        }
        let (count, mut offset) = match &self.size {
            Count::Prefixed(prefix) => prefix.read_usize(bytes, offset)?,
            Count::Fixed(size) => (*size, offset),
            Count::Remainder => {
                let item_size = self.item_size()?;
                if item_size == 0 {
                    return Ok((Vec::new(), offset));
                }
                (remaining(bytes, offset) / item_size, offset)
            }
        };
        // Cap the allocation hint by what the buffer could possibly hold.
        let mut items = Vec::with_capacity(count.min(remaining(bytes, offset)));
        for _ in 0..count {
            let (item, next) = self.item.read_at(bytes, offset)?;
            items.push(item);
            offset = next;
        }
        Ok((items, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        bytes::RawBytes,
        numbers::{U16, U8},
    };

    #[test]
    fn test_prefixed() {
        let codec = Array::new(U8::le());
        let value = vec![1, 2, 3];
        let encoded = codec.serialize(&value).unwrap();
        assert_eq!(encoded.as_ref(), [0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (value, 7));
        assert_eq!(codec.description(), "array(u8(le); u32(le))");
        assert_eq!(codec.fixed_size(), None);
    }

    #[test]
    fn test_fixed() {
        let codec = Array::fixed(U8::le(), 3);
        let encoded = codec.serialize(&vec![1, 2, 3]).unwrap();
        assert_eq!(encoded.as_ref(), [0x01, 0x02, 0x03]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (vec![1, 2, 3], 3));
        assert_eq!(codec.fixed_size(), Some(3));
        assert_eq!(codec.description(), "array(u8(le); 3)");

        // The wrong item count is rejected before anything is written.
        assert!(matches!(
            codec.serialize(&vec![1, 2, 3, 4]),
            Err(Error::InvalidItemCount {
                codec: "array",
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_fixed_zero() {
        // Zero items decode without touching the buffer, tolerant or not.
        let codec = Array::fixed(U8::le(), 0).tolerate_empty(false);
        assert_eq!(codec.deserialize(&[]).unwrap(), (Vec::new(), 0));
        assert_eq!(codec.fixed_size(), Some(0));
    }

    #[test]
    fn test_remainder() {
        let codec = Array::remainder(U16::le()).unwrap();
        let encoded = codec.serialize(&vec![1, 2]).unwrap();
        assert_eq!(encoded.as_ref(), [0x01, 0x00, 0x02, 0x00]);

        // Only whole items decode; a trailing half item stays unread.
        let (value, offset) = codec.deserialize(&[0x01, 0x00, 0x02, 0x00, 0x03]).unwrap();
        assert_eq!(value, vec![1, 2]);
        assert_eq!(offset, 4);
        assert_eq!(codec.description(), "array(u16(le); remainder)");
    }

    #[test]
    fn test_remainder_requires_fixed_item() {
        assert!(matches!(
            Array::remainder(RawBytes::prefixed()),
            Err(Error::ExpectedFixedSize("array"))
        ));
    }

    #[test]
    fn test_empty() {
        let codec = Array::new(U8::le());
        assert_eq!(codec.deserialize(&[]).unwrap(), (Vec::new(), 0));
        assert!(matches!(
            codec.tolerate_empty(false).deserialize(&[]),
            Err(Error::EmptyBuffer("array"))
        ));
    }

    #[test]
    fn test_nested() {
        let codec = Array::prefixed(Array::prefixed(U8::le(), U8::le()), U8::le());
        let value = vec![vec![1], vec![2, 3]];
        let encoded = codec.serialize(&value).unwrap();
        assert_eq!(encoded.as_ref(), [0x02, 0x01, 0x01, 0x02, 0x02, 0x03]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (value, 6));
    }
}
