//! Codec for named-field records.

use crate::{error::Error, serializer::Serializer};
use bytes::BytesMut;
use paste::paste;

/// Codec for records of up to twelve named fields.
///
/// Fields are `(name, codec)` pairs. The names only surface in
/// [`Serializer::description`]; on the wire a record is identical to a
/// [`Tuple`](crate::types::tuple::Tuple) of its field codecs, and values move
/// in and out as tuples in field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Struct<F> {
    fields: F,
}

impl<F> Struct<F> {
    pub const fn new(fields: F) -> Self {
        Self { fields }
    }
}

macro_rules! impl_struct {
    ($($index:literal),+) => {
        paste! {
            impl<$([<C $index>]: Serializer),+> Serializer
                for Struct<($((&'static str, [<C $index>]),)+)>
            {
                type Input = ($([<C $index>]::Input,)+);
                type Output = ($([<C $index>]::Output,)+);

                fn description(&self) -> String {
                    let fields = [$(format!(
                        "{}: {}",
                        self.fields.$index.0,
                        self.fields.$index.1.description(),
                    )),+];
                    format!("struct({})", fields.join(", "))
                }

                fn fixed_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $(total = total.checked_add(self.fields.$index.1.fixed_size()?)?;)+
                    Some(total)
                }

                fn max_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $(total = total.checked_add(self.fields.$index.1.max_size()?)?;)+
                    Some(total)
                }

                fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
                    $(self.fields.$index.1.write(&value.$index, buf)?;)+
                    Ok(())
                }

                fn read_at(
                    &self,
                    bytes: &[u8],
                    offset: usize,
                ) -> Result<(Self::Output, usize), Error> {
                    $(let ([<v $index>], offset) = self.fields.$index.1.read_at(bytes, offset)?;)+
                    Ok((($([<v $index>],)+), offset))
                }
            }
        }
    };
}

impl_struct!(0);
impl_struct!(0, 1);
impl_struct!(0, 1, 2);
impl_struct!(0, 1, 2, 3);
impl_struct!(0, 1, 2, 3, 4);
impl_struct!(0, 1, 2, 3, 4, 5);
impl_struct!(0, 1, 2, 3, 4, 5, 6);
impl_struct!(0, 1, 2, 3, 4, 5, 6, 7);
impl_struct!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_struct!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_struct!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_struct!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        numbers::{U8, U32},
        text::Text,
    };

    #[test]
    fn test_person() {
        let codec = Struct::new((("name", Text::prefixed()), ("age", U8::le())));
        let encoded = codec.serialize(&("Ada".into(), 36)).unwrap();
        assert_eq!(
            encoded.as_ref(),
            [0x03, 0x00, 0x00, 0x00, 0x41, 0x64, 0x61, 0x24]
        );
        assert_eq!(codec.deserialize(&encoded).unwrap(), (("Ada".into(), 36), 8));
        assert_eq!(
            codec.description(),
            "struct(name: string(utf8; u32(le)), age: u8(le))"
        );
        assert_eq!(codec.fixed_size(), None);
    }

    #[test]
    fn test_fixed_size() {
        let codec = Struct::new((("x", U32::le()), ("y", U32::le())));
        assert_eq!(codec.fixed_size(), Some(8));
        assert_eq!(codec.max_size(), Some(8));

        let encoded = codec.serialize(&(1, 2)).unwrap();
        assert_eq!(
            encoded.as_ref(),
            [0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]
        );
        let (value, offset) = codec.read_at(&encoded, 0).unwrap();
        assert_eq!(value, (1, 2));
        assert_eq!(offset, 8);
    }

    #[test]
    fn test_field_error() {
        let codec = Struct::new((("x", U32::le()), ("y", U32::le())));
        assert!(matches!(
            codec.deserialize(&[0x01, 0x00, 0x00, 0x00, 0x02]),
            Err(Error::NotEnoughBytes {
                codec: "u32",
                expected: 4,
                actual: 1
            })
        ));
    }
}
