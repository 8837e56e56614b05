//! Codec for `bool` values.

use crate::{
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::numbers::U8,
};
use bytes::BytesMut;

/// Codec for `bool` values, carried by a numeric codec.
///
/// `true` encodes as 1 and `false` as 0. Decoding compares the carrier value
/// to 1, so any other value reads back as `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bool<N = U8> {
    number: N,
}

impl Bool {
    pub const fn new() -> Self {
        Self { number: U8::le() }
    }
}

impl Default for Bool {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Prefix> Bool<N> {
    /// Carries the flag in `number` instead of a single byte.
    pub const fn with_number(number: N) -> Self {
        Self { number }
    }
}

impl<N: Prefix> Serializer for Bool<N> {
    type Input = bool;
    type Output = bool;

    fn description(&self) -> String {
        format!("bool({})", self.number.description())
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.number.fixed_size()
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        self.number.max_size()
    }

    #[inline]
    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        self.number.write_usize(usize::from(*value), buf)
    }

    #[inline]
    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if remaining(bytes, offset) == 0 {
            return Err(Error::EmptyBuffer("bool"));
        }
        let (value, offset) = self.number.read_usize(bytes, offset)?;
        Ok((value == 1, offset))
    }
}
