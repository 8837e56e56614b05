//! Adapters that wrap one serializer in another behavior.
//!
//! Usually reached through [`SerializerExt`](crate::serializer::SerializerExt)
//! rather than constructed directly.

use crate::{
    error::Error,
    serializer::{slice_exact, Serializer},
};
use bytes::{BufMut, BytesMut};
use std::marker::PhantomData;

/// Adapts a serializer to another pair of input and output types.
///
/// Built by [`SerializerExt::map`](crate::serializer::SerializerExt::map).
pub struct Mapped<S, F, G, I, O> {
    inner: S,
    unmap: F,
    map: G,
    _types: PhantomData<fn(&I) -> O>,
}

impl<S, F, G, I, O> Mapped<S, F, G, I, O>
where
    S: Serializer,
    F: Fn(&I) -> S::Input,
    G: Fn(S::Output) -> O,
{
    pub fn new(inner: S, unmap: F, map: G) -> Self {
        Self {
            inner,
            unmap,
            map,
            _types: PhantomData,
        }
    }
}

impl<S, F, G, I, O> Serializer for Mapped<S, F, G, I, O>
where
    S: Serializer,
    F: Fn(&I) -> S::Input,
    G: Fn(S::Output) -> O,
{
    type Input = I;
    type Output = O;

    fn description(&self) -> String {
        self.inner.description()
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        self.inner.max_size()
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        let input = (self.unmap)(value);
        self.inner.write(&input, buf)
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        let (output, offset) = self.inner.read_at(bytes, offset)?;
        Ok(((self.map)(output), offset))
    }
}

/// Forces an encoding to exactly `size` bytes.
///
/// Short encodings are zero-padded; long ones are truncated. Decoding hands
/// the inner serializer exactly the sized window, then advances past it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixed<S> {
    inner: S,
    size: usize,
}

impl<S: Serializer> Fixed<S> {
    pub const fn new(inner: S, size: usize) -> Self {
        Self { inner, size }
    }
}

impl<S: Serializer> Serializer for Fixed<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn description(&self) -> String {
        format!("fixed({}, {})", self.size, self.inner.description())
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        Some(self.size)
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        Some(self.size)
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        let mut window = BytesMut::with_capacity(self.size);
        self.inner.write(value, &mut window)?;
        window.resize(self.size, 0);
        buf.put_slice(&window);
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        let window = slice_exact("fixed", bytes, offset, self.size)?;
        let (value, _) = self.inner.read_at(window, 0)?;
        Ok((value, offset + self.size))
    }
}

/// Reverses the encoded bytes of a fixed-size serializer.
///
/// Flips between little- and big-endian renderings of the same content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reverse<S> {
    inner: S,
    size: usize,
}

impl<S: Serializer> Reverse<S> {
    pub fn new(inner: S) -> Result<Self, Error> {
        let size = inner
            .fixed_size()
            .ok_or(Error::ExpectedFixedSize("reversed"))?;
        Ok(Self { inner, size })
    }
}

impl<S: Serializer> Serializer for Reverse<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn description(&self) -> String {
        format!("reversed({})", self.inner.description())
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        Some(self.size)
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        Some(self.size)
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        let mut window = BytesMut::with_capacity(self.size);
        self.inner.write(value, &mut window)?;
        window.reverse();
        buf.put_slice(&window);
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        let window = slice_exact("reversed", bytes, offset, self.size)?;
        let mut reversed = window.to_vec();
        reversed.reverse();
        let (value, _) = self.inner.read_at(&reversed, 0)?;
        Ok((value, offset + self.size))
    }
}

/// Replaces a serializer's description, leaving the wire format alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Described<S> {
    inner: S,
    description: String,
}

impl<S: Serializer> Described<S> {
    pub fn new(inner: S, description: impl Into<String>) -> Self {
        Self {
            inner,
            description: description.into(),
        }
    }
}

impl<S: Serializer> Serializer for Described<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn description(&self) -> String {
        self.description.clone()
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        self.inner.max_size()
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        self.inner.write(value, buf)
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        self.inner.read_at(bytes, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        serializer::SerializerExt,
        types::{
            bytes::RawBytes,
            numbers::{U16, U32},
        },
    };

    #[test]
    fn test_mapped() {
        let ascii = U16::le().map(|c: &char| *c as u16, |n| {
            char::from_u32(n as u32).unwrap_or('\u{fffd}')
        });
        let encoded = ascii.serialize(&'A').unwrap();
        assert_eq!(encoded.as_ref(), [0x41, 0x00]);
        assert_eq!(ascii.deserialize(&encoded).unwrap(), ('A', 2));

        // The wrapper is transparent to sizing and description.
        assert_eq!(ascii.fixed_size(), Some(2));
        assert_eq!(ascii.description(), "u16(le)");
    }

    #[test]
    fn test_fixed_pads() {
        let codec = U16::le().fixed(4);
        let encoded = codec.serialize(&0x0102).unwrap();
        assert_eq!(encoded.as_ref(), [0x02, 0x01, 0x00, 0x00]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (0x0102, 4));
        assert_eq!(codec.description(), "fixed(4, u16(le))");
        assert_eq!(codec.fixed_size(), Some(4));
    }

    #[test]
    fn test_fixed_truncates() {
        let codec = U32::le().fixed(2);
        assert_eq!(codec.serialize(&0x01020304).unwrap().as_ref(), [0x04, 0x03]);
    }

    #[test]
    fn test_reversed() {
        let codec = U32::le().reversed().unwrap();
        let encoded = codec.serialize(&0x01020304).unwrap();

        // Reversed little-endian reads as big-endian.
        assert_eq!(encoded.as_ref(), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (0x01020304, 4));
        assert_eq!(codec.description(), "reversed(u32(le))");
    }

    #[test]
    fn test_reversed_requires_fixed() {
        assert!(matches!(
            RawBytes::prefixed().reversed(),
            Err(Error::ExpectedFixedSize("reversed"))
        ));
    }

    #[test]
    fn test_described() {
        let codec = U32::le().described("epoch");
        assert_eq!(codec.description(), "epoch");
        assert_eq!(codec.serialize(&7).unwrap().as_ref(), [0x07, 0x00, 0x00, 0x00]);
    }
}
