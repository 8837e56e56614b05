//! Zero-width codec for `()`.

use crate::{
    error::Error,
    serializer::{remaining, Serializer},
};
use bytes::BytesMut;

/// Codec for `()`. Writes nothing and reads nothing.
///
/// Useful as the payload of data enum variants that carry no fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    tolerant: bool,
}

impl Unit {
    pub const fn new() -> Self {
        Self { tolerant: true }
    }

    /// When `false`, decoding from a fully drained buffer fails instead of
    /// producing `()`.
    pub const fn tolerate_empty(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for Unit {
    type Input = ();
    type Output = ();

    fn description(&self) -> String {
        "unit".into()
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        Some(0)
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        Some(0)
    }

    #[inline]
    fn write(&self, _value: &Self::Input, _buf: &mut BytesMut) -> Result<(), Error> {
        Ok(())
    }

    #[inline]
    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if !self.tolerant && remaining(bytes, offset) == 0 {
            return Err(Error::EmptyBuffer("unit"));
        }
        Ok(((), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        let codec = Unit::new();
        assert_eq!(codec.serialize(&()).unwrap().len(), 0);
        assert_eq!(codec.deserialize(&[]).unwrap(), ((), 0));
        assert_eq!(codec.read_at(&[0x01, 0x02], 1).unwrap(), ((), 1));
        assert_eq!(codec.fixed_size(), Some(0));
        assert_eq!(codec.description(), "unit");
    }

    #[test]
    fn test_intolerant() {
        let codec = Unit::new().tolerate_empty(false);
        assert!(matches!(
            codec.deserialize(&[]),
            Err(Error::EmptyBuffer("unit"))
        ));
        assert_eq!(codec.read_at(&[0x01, 0x02], 1).unwrap(), ((), 1));
    }
}
