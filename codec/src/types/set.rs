//! Codec for ordered unique collections.

use crate::{
    config::Count,
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::numbers::U32,
};
use bytes::BytesMut;
use std::collections::BTreeSet;

/// Codec for [`BTreeSet`] values.
///
/// Items encode in ascending order. The [`Count`] modes match
/// [`Array`](crate::types::array::Array). Duplicate items in the buffer
/// collapse on decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Set<C, P = U32> {
    item: C,
    size: Count<P>,
    tolerant: bool,
}

impl<C: Serializer> Set<C> {
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
            return Err(Error::ExpectedFixedSize("set"));
        }
        Ok(Self {
            item,
            size: Count::Remainder,
            tolerant: true,
        })
    }
}

impl<C: Serializer, P: Prefix> Set<C, P> {
    /// Items preceded by their count, carried by `prefix`.
    pub const fn prefixed(item: C, prefix: P) -> Self {
        Self {
            item,
            size: Count::Prefixed(prefix),
            tolerant: true,
        }
    }

    /// When `false`, decoding from a fully drained buffer fails instead of
    /// producing an empty set.
    pub fn tolerate_empty(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    fn item_size(&self) -> Result<usize, Error> {
        self.item.fixed_size().ok_or(Error::ExpectedFixedSize("set"))
    }
}

impl<C, P> Serializer for Set<C, P>
where
    C: Serializer,
    P: Prefix,
    C::Input: Ord,
    C::Output: Ord,
{
    type Input = BTreeSet<C::Input>;
    type Output = BTreeSet<C::Output>;

    fn description(&self) -> String {
        format!("set({}; {})", self.item.description(), self.size.describe())
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
                        codec: "set",
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
        if matches!(self.size, Count::Fixed(0)) {
            return Ok((BTreeSet::new(), offset));
        }
        if remaining(bytes, offset) == 0 {
            if self.tolerant {
                return Ok((BTreeSet::new(), offset));
            }
            return Err(Error::EmptyBuffer("set"));
        }
        let (count, mut offset) = match &self.size {
            Count::Prefixed(prefix) => prefix.read_usize(bytes, offset)?,
            Count::Fixed(size) => (*size, offset),
            Count::Remainder => {
                let item_size = self.item_size()?;
                if item_size == 0 {
                    return Ok((BTreeSet::new(), offset));
                }
                (remaining(bytes, offset) / item_size, offset)
            }
        };
        let mut items = BTreeSet::new();
        for _ in 0..count {
            let (item, next) = self.item.read_at(bytes, offset)?;
            items.insert(item);
            offset = next;
        }
        Ok((items, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::numbers::{U16, U8};

    #[test]
    fn test_prefixed() {
        let codec = Set::new(U8::le());
        let value = BTreeSet::from([3, 1, 2]);
        let encoded = codec.serialize(&value).unwrap();

        // Items come out in ascending order.
        assert_eq!(encoded.as_ref(), [0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (value, 7));
        assert_eq!(codec.description(), "set(u8(le); u32(le))");
    }

    #[test]
    fn test_duplicates_collapse() {
        let codec = Set::new(U8::le());
        let (value, offset) = codec
            .deserialize(&[0x03, 0x00, 0x00, 0x00, 0x07, 0x07, 0x07])
            .unwrap();
        assert_eq!(value, BTreeSet::from([7]));
        assert_eq!(offset, 7);
    }

    #[test]
    fn test_fixed() {
        let codec = Set::fixed(U16::le(), 2);
        let encoded = codec.serialize(&BTreeSet::from([1, 2])).unwrap();
        assert_eq!(encoded.as_ref(), [0x01, 0x00, 0x02, 0x00]);
        assert_eq!(codec.fixed_size(), Some(4));
        assert!(matches!(
            codec.serialize(&BTreeSet::from([1])),
            Err(Error::InvalidItemCount {
                codec: "set",
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_remainder() {
        let codec = Set::remainder(U8::le()).unwrap();
        let (value, offset) = codec.deserialize(&[0x02, 0x01]).unwrap();
        assert_eq!(value, BTreeSet::from([1, 2]));
        assert_eq!(offset, 2);
    }

    #[test]
    fn test_empty() {
        let codec = Set::new(U8::le());
        assert_eq!(codec.deserialize(&[]).unwrap(), (BTreeSet::new(), 0));
        assert!(matches!(
            codec.tolerate_empty(false).deserialize(&[]),
            Err(Error::EmptyBuffer("set"))
        ));
    }
}
