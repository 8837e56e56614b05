//! Codec for raw byte payloads.

use crate::{
    config::Length,
    error::Error,
    serializer::{remaining, slice_exact, Prefix, Serializer},
    types::numbers::U32,
};
use bytes::{BufMut, Bytes, BytesMut};

/// Codec for [`Bytes`] payloads.
///
/// Three size modes:
/// - [`RawBytes::variable`] writes the content alone and reads everything
///   left in the buffer. Decoding an exhausted buffer yields empty content.
/// - [`RawBytes::fixed`] always occupies the given width, zero-padding short
///   content and truncating long content.
/// - [`RawBytes::prefixed`] writes the content length first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawBytes<P = U32> {
    size: Length<P>,
}

impl RawBytes {
    /// Content with no framing at all.
    pub const fn variable() -> Self {
        Self {
            size: Length::Variable,
        }
    }

    /// Content padded or truncated to exactly `size` bytes.
    pub const fn fixed(size: usize) -> Self {
        Self {
            size: Length::Fixed(size),
        }
    }

    /// Content preceded by its length as a little-endian `u32`.
    pub const fn prefixed() -> Self {
        Self {
            size: Length::Prefixed(U32::le()),
        }
    }
}

impl Default for RawBytes {
    fn default() -> Self {
        Self::variable()
    }
}

impl<P: Prefix> RawBytes<P> {
    /// Content preceded by its length, carried by `prefix`.
    pub const fn with_prefix(prefix: P) -> Self {
        Self {
            size: Length::Prefixed(prefix),
        }
    }
}

impl<P: Prefix> Serializer for RawBytes<P> {
    type Input = Bytes;
    type Output = Bytes;

    fn description(&self) -> String {
        format!("bytes({})", self.size.describe())
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        match self.size {
            Length::Fixed(size) => Some(size),
            _ => None,
        }
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        match self.size {
            Length::Fixed(size) => Some(size),
            _ => None,
        }
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        match &self.size {
            Length::Variable => buf.put_slice(value),
            Length::Fixed(size) => {
                if value.len() >= *size {
                    buf.put_slice(&value[..*size]);
                } else {
                    buf.put_slice(value);
                    buf.put_bytes(0, size - value.len());
                }
            }
            Length::Prefixed(prefix) => {
                prefix.write_usize(value.len(), buf)?;
                buf.put_slice(value);
            }
        }
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        match &self.size {
            Length::Variable => {
                let content = bytes.get(offset..).unwrap_or(&[]);
                Ok((Bytes::copy_from_slice(content), offset.max(bytes.len())))
            }
            Length::Fixed(size) => {
                let content = slice_exact("bytes", bytes, offset, *size)?;
                Ok((Bytes::copy_from_slice(content), offset + size))
            }
            Length::Prefixed(prefix) => {
                if remaining(bytes, offset) == 0 {
                    return Err(Error::EmptyBuffer("bytes"));
                }
                let (len, offset) = prefix.read_usize(bytes, offset)?;
                let content = slice_exact("bytes", bytes, offset, len)?;
                Ok((Bytes::copy_from_slice(content), offset + len))
            }
        }
    }
}
