//! Codec for strings.

use crate::{
    config::Length,
    encoding::Encoding,
    error::Error,
    serializer::{remaining, slice_exact, Prefix, Serializer},
    types::numbers::U32,
};
use bytes::{BufMut, BytesMut};

/// Codec for [`String`] values.
///
/// The [`Encoding`] maps text to content bytes and back; the [`Length`] mode
/// frames the content the same way [`RawBytes`](crate::types::bytes::RawBytes)
/// does. With a fixed width, short content is zero-padded (and the padding
/// stripped again on decode for [`Encoding::Utf8`]) while long content is
/// truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Text<P = U32> {
    size: Length<P>,
    encoding: Encoding,
}

impl Text {
    /// Content with no framing at all.
    pub const fn variable() -> Self {
        Self {
            size: Length::Variable,
            encoding: Encoding::Utf8,
        }
    }

    /// Content padded or truncated to exactly `size` bytes.
    pub const fn fixed(size: usize) -> Self {
        Self {
            size: Length::Fixed(size),
            encoding: Encoding::Utf8,
        }
    }

    /// Content preceded by its length as a little-endian `u32`.
    pub const fn prefixed() -> Self {
        Self {
            size: Length::Prefixed(U32::le()),
            encoding: Encoding::Utf8,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::prefixed()
    }
}

impl<P: Prefix> Text<P> {
    /// Content preceded by its length, carried by `prefix`.
    pub const fn with_prefix(prefix: P) -> Self {
        Self {
            size: Length::Prefixed(prefix),
            encoding: Encoding::Utf8,
        }
    }

    /// Replaces the text encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl<P: Prefix> Serializer for Text<P> {
    type Input = String;
    type Output = String;

    fn description(&self) -> String {
        format!("string({}; {})", self.encoding.label(), self.size.describe())
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
        let content = self.encoding.encode(value)?;
        match &self.size {
            Length::Variable => buf.put_slice(&content),
            Length::Fixed(size) => {
                if content.len() >= *size {
                    buf.put_slice(&content[..*size]);
                } else {
                    buf.put_slice(&content);
                    buf.put_bytes(0, size - content.len());
                }
            }
            Length::Prefixed(prefix) => {
                prefix.write_usize(content.len(), buf)?;
                buf.put_slice(&content);
            }
        }
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        match &self.size {
            Length::Variable => {
                let content = bytes.get(offset..).unwrap_or(&[]);
                Ok((self.encoding.decode(content), offset.max(bytes.len())))
            }
            Length::Fixed(size) => {
                let content = slice_exact("string", bytes, offset, *size)?;
                Ok((self.encoding.decode(content), offset + size))
            }
            Length::Prefixed(prefix) => {
                if remaining(bytes, offset) == 0 {
                    return Err(Error::EmptyBuffer("string"));
                }
                let (len, offset) = prefix.read_usize(bytes, offset)?;
                let content = slice_exact("string", bytes, offset, len)?;
                Ok((self.encoding.decode(content), offset + len))
            }
        }
    }
}
