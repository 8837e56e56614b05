//! Codecs for optional values.

use crate::{
    error::Error,
    serializer::{remaining, slice_exact, Prefix, Serializer},
    types::numbers::U8,
};
use bytes::{BufMut, BytesMut};

/// Codec for [`Option`] values.
///
/// A presence flag precedes the item: zero means absent, anything else means
/// present. In the default mode an absent value occupies only the flag. In
/// fixed mode ([`Optional::fixed`]) the item slot is always written, zeroed
/// when absent, so the whole encoding has a constant width.
///
/// The nullable constructors produce the same wire format under a different
/// [`Serializer::description`], for layouts that distinguish "no value" from
/// "explicitly null".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Optional<C, P = U8> {
    item: C,
    prefix: P,
    nullable: bool,
    fixed: bool,
    tolerant: bool,
}

impl<C: Serializer> Optional<C> {
    /// Optional value flagged by a single byte.
    pub const fn new(item: C) -> Self {
        Self {
            item,
            prefix: U8::le(),
            nullable: false,
            fixed: false,
            tolerant: true,
        }
    }

    /// Nullable value flagged by a single byte.
    pub const fn nullable(item: C) -> Self {
        Self {
            item,
            prefix: U8::le(),
            nullable: true,
            fixed: false,
            tolerant: true,
        }
    }
}

impl<C: Serializer, P: Prefix> Optional<C, P> {
    /// Optional value flagged by `prefix`.
    pub const fn prefixed(item: C, prefix: P) -> Self {
        Self {
            item,
            prefix,
            nullable: false,
            fixed: false,
            tolerant: true,
        }
    }

    /// Nullable value flagged by `prefix`.
    pub const fn nullable_prefixed(item: C, prefix: P) -> Self {
        Self {
            item,
            prefix,
            nullable: true,
            fixed: false,
            tolerant: true,
        }
    }

    /// Always writes the item slot, zero-filled when the value is absent.
    /// Requires a fixed-size item codec.
    pub fn fixed(mut self) -> Result<Self, Error> {
        if self.item.fixed_size().is_none() {
            return Err(Error::ExpectedFixedSize(self.label()));
        }
        self.fixed = true;
        Ok(self)
    }

    /// When `false`, decoding from a fully drained buffer fails instead of
    /// producing `None`.
    pub fn tolerate_empty(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    fn label(&self) -> &'static str {
        match (self.nullable, self.fixed) {
            (false, false) => "option",
            (false, true) => "fixedOption",
            (true, false) => "nullable",
            (true, true) => "fixedNullable",
        }
    }

    fn width(&self) -> Result<usize, Error> {
        self.item
            .fixed_size()
            .ok_or(Error::ExpectedFixedSize(self.label()))
    }
}

impl<C: Serializer, P: Prefix> Serializer for Optional<C, P> {
    type Input = Option<C::Input>;
    type Output = Option<C::Output>;

    fn description(&self) -> String {
        format!(
            "{}({}; {})",
            self.label(),
            self.item.description(),
            self.prefix.description(),
        )
    }

    fn fixed_size(&self) -> Option<usize> {
        if !self.fixed {
            return None;
        }
        self.prefix.fixed_size()?.checked_add(self.item.fixed_size()?)
    }

    fn max_size(&self) -> Option<usize> {
        self.prefix.max_size()?.checked_add(self.item.max_size()?)
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        match value {
            None => {
                self.prefix.write_usize(0, buf)?;
                if self.fixed {
                    buf.put_bytes(0, self.width()?);
                }
            }
            Some(item) => {
                self.prefix.write_usize(1, buf)?;
                if self.fixed {
                    // The slot is exactly the item width, padded or cut.
                    let width = self.width()?;
                    let mut slot = BytesMut::with_capacity(width);
                    self.item.write(item, &mut slot)?;
                    slot.resize(width, 0);
                    buf.put_slice(&slot);
                } else {
                    self.item.write(item, buf)?;
                }
            }
        }
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if remaining(bytes, offset) == 0 {
            if self.tolerant {
                return Ok((None, offset));
            }
            return Err(Error::EmptyBuffer(self.label()));
        }
        let (flag, offset) = self.prefix.read_usize(bytes, offset)?;
        if self.fixed {
            let width = self.width()?;
            let content = slice_exact(self.label(), bytes, offset, width)?;
            let value = if flag == 0 {
                None
            } else {
                let (item, _) = self.item.read_at(content, 0)?;
                Some(item)
            };
            return Ok((value, offset + width));
        }
        if flag == 0 {
            return Ok((None, offset));
        }
        let (item, offset) = self.item.read_at(bytes, offset)?;
        Ok((Some(item), offset))
    }
}
