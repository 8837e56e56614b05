//! Codec for tagged unions with per-variant payloads.

use crate::{
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::{numbers::U8, unit::Unit},
};
use bytes::BytesMut;
use std::fmt::Debug;

/// Object-safe face of one variant's payload codec.
///
/// `try_write` reports whether the variant claimed the value, letting
/// [`DataEnum`] probe variants in order without knowing payload types.
trait VariantPayload<E>: Send + Sync {
    fn description(&self) -> String;
    fn fixed_size(&self) -> Option<usize>;
    fn max_size(&self) -> Option<usize>;
    fn try_write(&self, value: &E, buf: &mut BytesMut) -> Result<bool, Error>;
    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(E, usize), Error>;
}

struct Payload<C, S, B> {
    codec: C,
    select: S,
    build: B,
}

impl<E, C, S, B> VariantPayload<E> for Payload<C, S, B>
where
    C: Serializer + Send + Sync,
    S: Fn(&E) -> Option<C::Input> + Send + Sync,
    B: Fn(C::Output) -> E + Send + Sync,
{
    fn description(&self) -> String {
        self.codec.description()
    }

    fn fixed_size(&self) -> Option<usize> {
        self.codec.fixed_size()
    }

    fn max_size(&self) -> Option<usize> {
        self.codec.max_size()
    }

    fn try_write(&self, value: &E, buf: &mut BytesMut) -> Result<bool, Error> {
        match (self.select)(value) {
            Some(input) => {
                self.codec.write(&input, buf)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(E, usize), Error> {
        let (output, offset) = self.codec.read_at(bytes, offset)?;
        Ok(((self.build)(output), offset))
    }
}

/// One variant of a [`DataEnum`]: a name, a payload codec, and the two
/// closures that bridge the enum type and the payload type.
pub struct DataVariant<E> {
    name: String,
    payload: Box<dyn VariantPayload<E>>,
}

impl<E> DataVariant<E> {
    /// A variant whose payload is encoded by `codec`.
    ///
    /// `select` returns the payload input when the value belongs to this
    /// variant and `None` otherwise; `build` reassembles the enum value from
    /// a decoded payload.
    pub fn new<C, S, B>(name: impl Into<String>, codec: C, select: S, build: B) -> Self
    where
        C: Serializer + Send + Sync + 'static,
        S: Fn(&E) -> Option<C::Input> + Send + Sync + 'static,
        B: Fn(C::Output) -> E + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            payload: Box::new(Payload {
                codec,
                select,
                build,
            }),
        }
    }

    /// A variant that carries no payload at all.
    pub fn unit(name: impl Into<String>, value: E) -> Self
    where
        E: Clone + PartialEq + Send + Sync + 'static,
    {
        let probe = value.clone();
        Self::new(
            name,
            Unit::new(),
            move |candidate: &E| (*candidate == probe).then_some(()),
            move |()| value.clone(),
        )
    }
}

/// Codec for enums whose variants carry data.
///
/// The wire format is the variant's position followed by its payload.
/// Encoding probes the variants in order and uses the first whose `select`
/// claims the value; decoding dispatches on the position.
pub struct DataEnum<E, P = U8> {
    variants: Vec<DataVariant<E>>,
    prefix: P,
}

impl<E> DataEnum<E> {
    /// Variants discriminated by a single byte.
    pub fn new(variants: Vec<DataVariant<E>>) -> Self {
        Self::prefixed(variants, U8::le())
    }
}

impl<E, P> DataEnum<E, P> {
    /// Variants discriminated by `prefix`.
    pub fn prefixed(variants: Vec<DataVariant<E>>, prefix: P) -> Self {
        Self { variants, prefix }
    }

    fn options(&self) -> String {
        let names: Vec<&str> = self.variants.iter().map(|v| v.name.as_str()).collect();
        names.join(", ")
    }
}

impl<E: Debug, P: Prefix> Serializer for DataEnum<E, P> {
    type Input = E;
    type Output = E;

    fn description(&self) -> String {
        let variants: Vec<String> = self
            .variants
            .iter()
            .map(|v| format!("{}: {}", v.name, v.payload.description()))
            .collect();
        format!(
            "dataEnum({}; {})",
            variants.join(", "),
            self.prefix.description(),
        )
    }

    fn fixed_size(&self) -> Option<usize> {
        // Only a constant payload width across all variants is fixed.
        let mut sizes = self.variants.iter().map(|v| v.payload.fixed_size());
        let first = sizes.next()??;
        for size in sizes {
            if size? != first {
                return None;
            }
        }
        self.prefix.fixed_size()?.checked_add(first)
    }

    fn max_size(&self) -> Option<usize> {
        if self.variants.is_empty() {
            return None;
        }
        let mut largest = 0usize;
        for variant in &self.variants {
            largest = largest.max(variant.payload.max_size()?);
        }
        self.prefix.max_size()?.checked_add(largest)
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        for (index, variant) in self.variants.iter().enumerate() {
            let mark = buf.len();
            self.prefix.write_usize(index, buf)?;
            if variant.payload.try_write(value, buf)? {
                return Ok(());
            }
            // Not this variant; drop the discriminator again.
            buf.truncate(mark);
        }
        Err(Error::InvalidVariant {
            codec: "dataEnum",
            variant: format!("{value:?}"),
            options: self.options(),
        })
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if remaining(bytes, offset) == 0 {
            return Err(Error::EmptyBuffer("dataEnum"));
        }
        let (index, offset) = self.prefix.read_usize(bytes, offset)?;
        let variant = self
            .variants
            .get(index)
            .ok_or(Error::InvalidDiscriminator {
                codec: "dataEnum",
                discriminator: index,
                max: self.variants.len().saturating_sub(1),
            })?;
        variant.payload.read_at(bytes, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{numbers::U64, structure::Struct, text::Text};

    #[derive(Clone, Debug, PartialEq)]
    enum Message {
        Quit,
        Move { value: u64 },
        Say(String),
    }

    fn codec() -> DataEnum<Message> {
        DataEnum::new(vec![
            DataVariant::unit("Quit", Message::Quit),
            DataVariant::new(
                "Move",
                Struct::new((("value", U64::le()),)),
                |message: &Message| match message {
                    Message::Move { value } => Some((*value,)),
                    _ => None,
                },
                |(value,)| Message::Move { value },
            ),
            DataVariant::new(
                "Say",
                Text::prefixed(),
                |message: &Message| match message {
                    Message::Say(text) => Some(text.clone()),
                    _ => None,
                },
                Message::Say,
            ),
        ])
    }

    #[test]
    fn test_unit_variant() {
        let codec = codec();
        assert_eq!(codec.serialize(&Message::Quit).unwrap().as_ref(), [0x00]);
        assert_eq!(codec.deserialize(&[0x00]).unwrap(), (Message::Quit, 1));
    }

    #[test]
    fn test_payload_variant() {
        let codec = codec();
        let encoded = codec.serialize(&Message::Move { value: 2 }).unwrap();
        assert_eq!(
            encoded.as_ref(),
            [0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            codec.deserialize(&encoded).unwrap(),
            (Message::Move { value: 2 }, 9)
        );

        let encoded = codec.serialize(&Message::Say("hi".into())).unwrap();
        assert_eq!(
            encoded.as_ref(),
            [0x02, 0x02, 0x00, 0x00, 0x00, 0x68, 0x69]
        );
        assert_eq!(
            codec.deserialize(&encoded).unwrap(),
            (Message::Say("hi".into()), 7)
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(
            codec().description(),
            "dataEnum(Quit: unit, Move: struct(value: u64(le)), \
             Say: string(utf8; u32(le)); u8(le))"
        );
    }

    #[test]
    fn test_unclaimed_value() {
        // A codec that only knows Quit cannot encode Move.
        let partial = DataEnum::new(vec![DataVariant::unit("Quit", Message::Quit)]);
        let err = partial.serialize(&Message::Move { value: 1 }).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant { codec: "dataEnum", .. }));
    }

    #[test]
    fn test_unknown_discriminator() {
        assert!(matches!(
            codec().deserialize(&[0x09]),
            Err(Error::InvalidDiscriminator {
                codec: "dataEnum",
                discriminator: 9,
                max: 2
            })
        ));
    }

    #[test]
    fn test_sizes() {
        // Mixed payload widths leave the overall size open.
        assert_eq!(codec().fixed_size(), None);
        assert_eq!(codec().max_size(), None);

        let flags = DataEnum::new(vec![
            DataVariant::unit("On", true),
            DataVariant::unit("Off", false),
        ]);
        assert_eq!(flags.fixed_size(), Some(1));
        assert_eq!(flags.max_size(), Some(1));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            codec().deserialize(&[]),
            Err(Error::EmptyBuffer("dataEnum"))
        ));
    }
}
