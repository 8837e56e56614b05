//! Codec for key-value collections.

use crate::{
    config::Count,
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::numbers::U32,
};
use bytes::BytesMut;
use std::collections::BTreeMap;

/// Codec for [`BTreeMap`] values.
///
/// Entries encode as alternating key and value, ordered by key. The [`Count`]
/// modes match [`Array`](crate::types::array::Array); `Remainder` requires
/// both the key and value codecs to be fixed-size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Map<K, V, P = U32> {
    key: K,
    value: V,
    size: Count<P>,
    tolerant: bool,
}

impl<K: Serializer, V: Serializer> Map<K, V> {
    /// Entries preceded by their count as a little-endian `u32`.
    pub const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            size: Count::Prefixed(U32::le()),
            tolerant: true,
        }
    }

    /// Exactly `size` entries, no count on the wire.
    pub const fn fixed(key: K, value: V, size: usize) -> Self {
        Self {
            key,
            value,
            size: Count::Fixed(size),
            tolerant: true,
        }
    }

    /// As many entries as the rest of the buffer holds.
    pub fn remainder(key: K, value: V) -> Result<Self, Error> {
        if key.fixed_size().is_none() || value.fixed_size().is_none() {
            return Err(Error::ExpectedFixedSize("map"));
        }
        Ok(Self {
            key,
            value,
            size: Count::Remainder,
            tolerant: true,
        })
    }
}

impl<K: Serializer, V: Serializer, P: Prefix> Map<K, V, P> {
    /// Entries preceded by their count, carried by `prefix`.
    pub const fn prefixed(key: K, value: V, prefix: P) -> Self {
        Self {
            key,
            value,
            size: Count::Prefixed(prefix),
            tolerant: true,
        }
    }

    /// When `false`, decoding from a fully drained buffer fails instead of
    /// producing an empty map.
    pub fn tolerate_empty(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    fn entry_size(&self) -> Result<usize, Error> {
        let key = self.key.fixed_size().ok_or(Error::ExpectedFixedSize("map"))?;
        let value = self
            .value
            .fixed_size()
            .ok_or(Error::ExpectedFixedSize("map"))?;
        key.checked_add(value).ok_or(Error::ExpectedFixedSize("map"))
    }
}

impl<K, V, P> Serializer for Map<K, V, P>
where
    K: Serializer,
    V: Serializer,
    P: Prefix,
    K::Input: Ord,
    K::Output: Ord,
{
    type Input = BTreeMap<K::Input, V::Input>;
    type Output = BTreeMap<K::Output, V::Output>;

    fn description(&self) -> String {
        format!(
            "map({}, {}; {})",
            self.key.description(),
            self.value.description(),
            self.size.describe(),
        )
    }

    fn fixed_size(&self) -> Option<usize> {
        match self.size {
            Count::Fixed(0) => Some(0),
            Count::Fixed(size) => {
                let entry = self.key.fixed_size()?.checked_add(self.value.fixed_size()?)?;
                size.checked_mul(entry)
            }
            _ => None,
        }
    }

    fn max_size(&self) -> Option<usize> {
        match self.size {
            Count::Fixed(0) => Some(0),
            Count::Fixed(size) => {
                let entry = self.key.max_size()?.checked_add(self.value.max_size()?)?;
                size.checked_mul(entry)
            }
            _ => None,
        }
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        match &self.size {
            Count::Prefixed(prefix) => prefix.write_usize(value.len(), buf)?,
            Count::Fixed(size) => {
                if value.len() != *size {
                    return Err(Error::InvalidItemCount {
                        codec: "map",
                        expected: *size,
                        actual: value.len(),
                    });
                }
            }
            Count::Remainder => {}
        }
        for (k, v) in value {
            self.key.write(k, buf)?;
            self.value.write(v, buf)?;
        }
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if matches!(self.size, Count::Fixed(0)) {
            return Ok((BTreeMap::new(), offset));
        }
        if remaining(bytes, offset) == 0 {
            if self.tolerant {
                return Ok((BTreeMap::new(), offset));
            }
            return Err(Error::EmptyBuffer("map"));
        }
        let (count, mut offset) = match &self.size {
            Count::Prefixed(prefix) => prefix.read_usize(bytes, offset)?,
            Count::Fixed(size) => (*size, offset),
            Count::Remainder => {
                let entry_size = self.entry_size()?;
                if entry_size == 0 {
                    return Ok((BTreeMap::new(), offset));
                }
                (remaining(bytes, offset) / entry_size, offset)
            }
        };
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let (key, next) = self.key.read_at(bytes, offset)?;
            let (value, next) = self.value.read_at(bytes, next)?;
            entries.insert(key, value);
            offset = next;
        }
        Ok((entries, offset))
    }
}
