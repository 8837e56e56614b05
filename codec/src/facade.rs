//! One-stop constructors for every codec in the crate.
//!
//! [`Codecs`] carries the defaults that individual constructors would
//! otherwise repeat: the byte order for numbers and length prefixes, and
//! whether decoding composite values from a fully drained buffer yields
//! their empty identity or an error.
//!
//! ```
//! use wireform_codec::{Codecs, Serializer};
//!
//! let codecs = Codecs::new();
//! let point = codecs.struct_((("x", codecs.u32()), ("y", codecs.u32())));
//! let bytes = point.serialize(&(1, 2))?;
//! assert_eq!(bytes.len(), 8);
//! let ((x, y), _) = point.deserialize(&bytes)?;
//! assert_eq!((x, y), (1, 2));
//! # Ok::<(), wireform_codec::Error>(())
//! ```

use crate::{
    adapters::Fixed,
    config::Endian,
    error::Error,
    serializer::{Prefix, Serializer},
    types::{
        array::Array,
        boolean::Bool,
        bytes::RawBytes,
        data_enum::{DataEnum, DataVariant},
        map::Map,
        numbers::{F32, F64, I128, I16, I32, I64, I8, U128, U16, U32, U64, U8},
        option::Optional,
        pubkey::PublicKey,
        scalar_enum::ScalarEnum,
        set::Set,
        structure::Struct,
        text::Text,
        tuple::Tuple,
        unit::Unit,
    },
};

/// Factory for codecs sharing an endianness and an empty-buffer policy.
///
/// The defaults are little-endian numbers, `u32` length prefixes, single-byte
/// flags and discriminators, and tolerant decoding of composite values from
/// drained buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codecs {
    endian: Endian,
    tolerant: bool,
}

impl Codecs {
    pub const fn new() -> Self {
        Self {
            endian: Endian::Little,
            tolerant: true,
        }
    }

    /// Uses `endian` for all numbers, prefixes, and discriminators.
    pub const fn with_endian(endian: Endian) -> Self {
        Self {
            endian,
            tolerant: true,
        }
    }

    /// Big-endian rendition of the defaults.
    pub const fn be() -> Self {
        Self::with_endian(Endian::Big)
    }

    /// Makes composite codecs fail on a fully drained buffer instead of
    /// producing their empty identity.
    pub const fn intolerant(mut self) -> Self {
        self.tolerant = false;
        self
    }
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

// Numbers.
impl Codecs {
    pub const fn u8(&self) -> U8 {
        U8::new(self.endian)
    }

    pub const fn u16(&self) -> U16 {
        U16::new(self.endian)
    }

    pub const fn u32(&self) -> U32 {
        U32::new(self.endian)
    }

    pub const fn u64(&self) -> U64 {
        U64::new(self.endian)
    }

    pub const fn u128(&self) -> U128 {
        U128::new(self.endian)
    }

    pub const fn i8(&self) -> I8 {
        I8::new(self.endian)
    }

    pub const fn i16(&self) -> I16 {
        I16::new(self.endian)
    }

    pub const fn i32(&self) -> I32 {
        I32::new(self.endian)
    }

    pub const fn i64(&self) -> I64 {
        I64::new(self.endian)
    }

    pub const fn i128(&self) -> I128 {
        I128::new(self.endian)
    }

    pub const fn f32(&self) -> F32 {
        F32::new(self.endian)
    }

    pub const fn f64(&self) -> F64 {
        F64::new(self.endian)
    }

    pub const fn bool(&self) -> Bool {
        Bool::with_number(U8::new(self.endian))
    }

    pub fn unit(&self) -> Unit {
        Unit::new().tolerate_empty(self.tolerant)
    }
}

// Bytes and strings.
impl Codecs {
    /// Raw content with no framing; reads whatever the buffer still holds.
    pub const fn bytes(&self) -> RawBytes {
        RawBytes::variable()
    }

    /// Raw content padded or truncated to exactly `size` bytes.
    pub const fn bytes_fixed(&self, size: usize) -> RawBytes {
        RawBytes::fixed(size)
    }

    /// Raw content preceded by its length, carried by `prefix`.
    pub const fn bytes_prefixed<P: Prefix>(&self, prefix: P) -> RawBytes<P> {
        RawBytes::with_prefix(prefix)
    }

    /// UTF-8 text preceded by its byte length as a `u32`.
    ///
    /// Use [`Text::encoding`] on the result for base16, base58, or base64
    /// text.
    pub const fn string(&self) -> Text {
        Text::with_prefix(U32::new(self.endian))
    }

    /// UTF-8 text padded or truncated to exactly `size` bytes.
    pub const fn fixed_string(&self, size: usize) -> Text {
        Text::fixed(size)
    }

    /// UTF-8 text with no framing; reads whatever the buffer still holds.
    pub const fn variable_string(&self) -> Text {
        Text::variable()
    }

    /// UTF-8 text preceded by its byte length, carried by `prefix`.
    pub const fn string_prefixed<P: Prefix>(&self, prefix: P) -> Text<P> {
        Text::with_prefix(prefix)
    }
}

// Composites.
impl Codecs {
    pub const fn tuple<T>(&self, items: T) -> Tuple<T> {
        Tuple::new(items)
    }

    /// A record of `(name, codec)` fields encoding back to back.
    pub const fn struct_<F>(&self, fields: F) -> Struct<F> {
        Struct::new(fields)
    }

    /// Items preceded by their count as a `u32`.
    pub fn array<C: Serializer>(&self, item: C) -> Array<C> {
        Array::prefixed(item, U32::new(self.endian)).tolerate_empty(self.tolerant)
    }

    /// Exactly `size` items, no count on the wire.
    pub fn array_fixed<C: Serializer>(&self, item: C, size: usize) -> Array<C> {
        Array::fixed(item, size).tolerate_empty(self.tolerant)
    }

    /// As many items as the rest of the buffer holds.
    pub fn array_remainder<C: Serializer>(&self, item: C) -> Result<Array<C>, Error> {
        Ok(Array::remainder(item)?.tolerate_empty(self.tolerant))
    }

    /// Items preceded by their count, carried by `prefix`.
    pub fn array_prefixed<C: Serializer, P: Prefix>(&self, item: C, prefix: P) -> Array<C, P> {
        Array::prefixed(item, prefix).tolerate_empty(self.tolerant)
    }

    /// Entries preceded by their count as a `u32`.
    pub fn map<K: Serializer, V: Serializer>(&self, key: K, value: V) -> Map<K, V> {
        Map::prefixed(key, value, U32::new(self.endian)).tolerate_empty(self.tolerant)
    }

    /// Exactly `size` entries, no count on the wire.
    pub fn map_fixed<K: Serializer, V: Serializer>(
        &self,
        key: K,
        value: V,
        size: usize,
    ) -> Map<K, V> {
        Map::fixed(key, value, size).tolerate_empty(self.tolerant)
    }

    /// As many entries as the rest of the buffer holds.
    pub fn map_remainder<K: Serializer, V: Serializer>(
        &self,
        key: K,
        value: V,
    ) -> Result<Map<K, V>, Error> {
        Ok(Map::remainder(key, value)?.tolerate_empty(self.tolerant))
    }

    /// Entries preceded by their count, carried by `prefix`.
    pub fn map_prefixed<K: Serializer, V: Serializer, P: Prefix>(
        &self,
        key: K,
        value: V,
        prefix: P,
    ) -> Map<K, V, P> {
        Map::prefixed(key, value, prefix).tolerate_empty(self.tolerant)
    }

    /// Items preceded by their count as a `u32`.
    pub fn set<C: Serializer>(&self, item: C) -> Set<C> {
        Set::prefixed(item, U32::new(self.endian)).tolerate_empty(self.tolerant)
    }

    /// Exactly `size` items, no count on the wire.
    pub fn set_fixed<C: Serializer>(&self, item: C, size: usize) -> Set<C> {
        Set::fixed(item, size).tolerate_empty(self.tolerant)
    }

    /// As many items as the rest of the buffer holds.
    pub fn set_remainder<C: Serializer>(&self, item: C) -> Result<Set<C>, Error> {
        Ok(Set::remainder(item)?.tolerate_empty(self.tolerant))
    }

    /// Items preceded by their count, carried by `prefix`.
    pub fn set_prefixed<C: Serializer, P: Prefix>(&self, item: C, prefix: P) -> Set<C, P> {
        Set::prefixed(item, prefix).tolerate_empty(self.tolerant)
    }
}

// Sum types and adapters.
impl Codecs {
    /// Optional value behind a single-byte presence flag.
    pub fn option<C: Serializer>(&self, item: C) -> Optional<C> {
        Optional::prefixed(item, U8::new(self.endian)).tolerate_empty(self.tolerant)
    }

    /// Optional value behind a presence flag carried by `prefix`.
    pub fn option_prefixed<C: Serializer, P: Prefix>(&self, item: C, prefix: P) -> Optional<C, P> {
        Optional::prefixed(item, prefix).tolerate_empty(self.tolerant)
    }

    /// Optional value whose item slot is always written, zeroed when absent.
    pub fn fixed_option<C: Serializer>(&self, item: C) -> Result<Optional<C>, Error> {
        Optional::prefixed(item, U8::new(self.endian))
            .tolerate_empty(self.tolerant)
            .fixed()
    }

    /// Like [`Codecs::option`] under a nullable description.
    pub fn nullable<C: Serializer>(&self, item: C) -> Optional<C> {
        Optional::nullable_prefixed(item, U8::new(self.endian)).tolerate_empty(self.tolerant)
    }

    /// Like [`Codecs::fixed_option`] under a nullable description.
    pub fn fixed_nullable<C: Serializer>(&self, item: C) -> Result<Optional<C>, Error> {
        Optional::nullable_prefixed(item, U8::new(self.endian))
            .tolerate_empty(self.tolerant)
            .fixed()
    }

    /// A closed set of named values, encoded by position.
    pub fn enum_<T, N: Into<String>>(&self, variants: Vec<(N, T)>) -> ScalarEnum<T> {
        ScalarEnum::prefixed(variants, U8::new(self.endian))
    }

    /// A closed set of named values, discriminated by `prefix`.
    pub fn enum_prefixed<T, N: Into<String>, P: Prefix>(
        &self,
        variants: Vec<(N, T)>,
        prefix: P,
    ) -> ScalarEnum<T, P> {
        ScalarEnum::prefixed(variants, prefix)
    }

    /// An enum whose variants carry data, discriminated by a single byte.
    pub fn data_enum<E>(&self, variants: Vec<DataVariant<E>>) -> DataEnum<E> {
        DataEnum::prefixed(variants, U8::new(self.endian))
    }

    /// An enum whose variants carry data, discriminated by `prefix`.
    pub fn data_enum_prefixed<E, P: Prefix>(
        &self,
        variants: Vec<DataVariant<E>>,
        prefix: P,
    ) -> DataEnum<E, P> {
        DataEnum::prefixed(variants, prefix)
    }

    /// Forces `inner` to exactly `size` bytes.
    pub const fn fixed<S: Serializer>(&self, inner: S, size: usize) -> Fixed<S> {
        Fixed::new(inner, size)
    }

    /// The raw 32 bytes of a public key.
    pub const fn public_key(&self) -> PublicKey {
        PublicKey::new()
    }
}
