//! Codec for heterogeneous tuples.

use crate::{error::Error, serializer::Serializer};
use bytes::BytesMut;
use paste::paste;

/// Codec for tuples of up to twelve members, each with its own codec.
///
/// Members encode back to back with no framing. Decoding threads the offset
/// through the members in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuple<T> {
    items: T,
}

impl<T> Tuple<T> {
    pub const fn new(items: T) -> Self {
        Self { items }
    }
}

macro_rules! impl_tuple {
    ($($index:literal),+) => {
        paste! {
            impl<$([<C $index>]: Serializer),+> Serializer for Tuple<($([<C $index>],)+)> {
                type Input = ($([<C $index>]::Input,)+);
                type Output = ($([<C $index>]::Output,)+);

                fn description(&self) -> String {
                    let items = [$(self.items.$index.description()),+];
                    format!("tuple({})", items.join(", "))
                }

                fn fixed_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $(total = total.checked_add(self.items.$index.fixed_size()?)?;)+
                    Some(total)
                }

                fn max_size(&self) -> Option<usize> {
                    let mut total = 0usize;
                    $(total = total.checked_add(self.items.$index.max_size()?)?;)+
                    Some(total)
                }

                fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
                    $(self.items.$index.write(&value.$index, buf)?;)+
                    Ok(())
                }

                fn read_at(
                    &self,
                    bytes: &[u8],
                    offset: usize,
                ) -> Result<(Self::Output, usize), Error> {
                    $(let ([<v $index>], offset) = self.items.$index.read_at(bytes, offset)?;)+
                    Ok((($([<v $index>],)+), offset))
                }
            }
        }
    };
}

impl_tuple!(0);
impl_tuple!(0, 1);
impl_tuple!(0, 1, 2);
impl_tuple!(0, 1, 2, 3);
impl_tuple!(0, 1, 2, 3, 4);
impl_tuple!(0, 1, 2, 3, 4, 5);
impl_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
