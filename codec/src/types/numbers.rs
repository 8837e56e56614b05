//! Codecs for fixed-width integers and floats.
//!
//! Each codec carries its own [`Endian`], so mixed-endianness layouts compose
//! without global state. The unsigned codecs also implement [`Prefix`] and can
//! size-prefix variable-length codecs like collections and strings.

use crate::{
    config::Endian,
    error::Error,
    serializer::{at_least, Prefix, Serializer},
};
use bytes::{Buf, BufMut, BytesMut};
use std::mem::size_of;

macro_rules! impl_number {
    ($name:ident, $type:ty, $label:literal, $put_le:ident, $put_be:ident, $get_le:ident, $get_be:ident) => {
        #[doc = concat!("Codec for `", stringify!($type), "` values.")]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            endian: Endian,
        }

        impl $name {
            /// Little-endian codec.
            pub const fn le() -> Self {
                Self {
                    endian: Endian::Little,
                }
            }

            /// Big-endian codec.
            pub const fn be() -> Self {
                Self { endian: Endian::Big }
            }

            pub const fn new(endian: Endian) -> Self {
                Self { endian }
            }
        }

        impl Serializer for $name {
            type Input = $type;
            type Output = $type;

            fn description(&self) -> String {
                format!("{}({})", $label, self.endian)
            }

            #[inline]
            fn fixed_size(&self) -> Option<usize> {
                Some(size_of::<$type>())
            }

            #[inline]
            fn max_size(&self) -> Option<usize> {
                Some(size_of::<$type>())
            }

            #[inline]
            fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
                match self.endian {
                    Endian::Little => buf.$put_le(*value),
                    Endian::Big => buf.$put_be(*value),
                }
                Ok(())
            }

            #[inline]
            fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
                let size = size_of::<$type>();
                at_least($label, bytes, offset, size)?;
                let mut slice = &bytes[offset..];
                let value = match self.endian {
                    Endian::Little => slice.$get_le(),
                    Endian::Big => slice.$get_be(),
                };
                Ok((value, offset + size))
            }
        }
    };
}

// Single-byte codecs have no endianness to speak of but keep the field so the
// description stays uniform.
impl_number!(U8, u8, "u8", put_u8, put_u8, get_u8, get_u8);
impl_number!(U16, u16, "u16", put_u16_le, put_u16, get_u16_le, get_u16);
impl_number!(U32, u32, "u32", put_u32_le, put_u32, get_u32_le, get_u32);
impl_number!(U64, u64, "u64", put_u64_le, put_u64, get_u64_le, get_u64);
impl_number!(U128, u128, "u128", put_u128_le, put_u128, get_u128_le, get_u128);
impl_number!(I8, i8, "i8", put_i8, put_i8, get_i8, get_i8);
impl_number!(I16, i16, "i16", put_i16_le, put_i16, get_i16_le, get_i16);
impl_number!(I32, i32, "i32", put_i32_le, put_i32, get_i32_le, get_i32);
impl_number!(I64, i64, "i64", put_i64_le, put_i64, get_i64_le, get_i64);
impl_number!(I128, i128, "i128", put_i128_le, put_i128, get_i128_le, get_i128);
impl_number!(F32, f32, "f32", put_f32_le, put_f32, get_f32_le, get_f32);
impl_number!(F64, f64, "f64", put_f64_le, put_f64, get_f64_le, get_f64);

macro_rules! impl_prefix {
    ($name:ident, $type:ty, $label:literal) => {
        impl Prefix for $name {
            fn write_usize(&self, value: usize, buf: &mut BytesMut) -> Result<(), Error> {
                let narrowed = <$type>::try_from(value).map_err(|_| Error::NumberOutOfRange {
                    codec: $label,
                    value: value as u128,
                    min: 0,
                    max: <$type>::MAX as u128,
                })?;
                self.write(&narrowed, buf)
            }

            fn read_usize(&self, bytes: &[u8], offset: usize) -> Result<(usize, usize), Error> {
                let (value, offset) = self.read_at(bytes, offset)?;
                let value =
                    usize::try_from(value).map_err(|_| Error::UnsupportedOperation($label))?;
                Ok((value, offset))
            }
        }
    };
}

impl_prefix!(U8, u8, "u8");
impl_prefix!(U16, u16, "u16");
impl_prefix!(U32, u32, "u32");
impl_prefix!(U64, u64, "u64");
impl_prefix!(U128, u128, "u128");
