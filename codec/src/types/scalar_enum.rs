//! Codec for closed sets of named scalar values.

use crate::{
    error::Error,
    serializer::{remaining, Prefix, Serializer},
    types::numbers::U8,
};
use bytes::BytesMut;
use std::fmt::Debug;

/// Selects which variant of a [`ScalarEnum`] to encode.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant<T> {
    /// By the variant's value.
    Value(T),
    /// By the variant's name.
    Name(String),
    /// By the variant's position.
    Index(usize),
}

/// Codec for a closed set of named values, encoded as the position of the
/// value in the set.
///
/// Encoding accepts a [`Variant`] so callers can pick by value, name, or
/// index. Decoding always yields the value itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarEnum<T, P = U8> {
    variants: Vec<(String, T)>,
    prefix: P,
}

impl<T> ScalarEnum<T> {
    /// Variants discriminated by a single byte.
    pub fn new<N: Into<String>>(variants: Vec<(N, T)>) -> Self {
        Self::prefixed(variants, U8::le())
    }
}

impl<T, P> ScalarEnum<T, P> {
    /// Variants discriminated by `prefix`.
    pub fn prefixed<N: Into<String>>(variants: Vec<(N, T)>, prefix: P) -> Self {
        Self {
            variants: variants
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            prefix,
        }
    }

    fn options(&self) -> String {
        let names: Vec<&str> = self.variants.iter().map(|(name, _)| name.as_str()).collect();
        names.join(", ")
    }
}

impl<T: PartialEq + Debug, P> ScalarEnum<T, P> {
    fn resolve(&self, variant: &Variant<T>) -> Result<usize, Error> {
        let position = match variant {
            Variant::Value(value) => self
                .variants
                .iter()
                .position(|(_, candidate)| candidate == value),
            Variant::Name(name) => self
                .variants
                .iter()
                .position(|(candidate, _)| candidate == name),
            Variant::Index(index) => (*index < self.variants.len()).then_some(*index),
        };
        position.ok_or_else(|| Error::InvalidVariant {
            codec: "enum",
            variant: format!("{variant:?}"),
            options: self.options(),
        })
    }
}

impl<T, P> Serializer for ScalarEnum<T, P>
where
    T: Clone + PartialEq + Debug,
    P: Prefix,
{
    type Input = Variant<T>;
    type Output = T;

    fn description(&self) -> String {
        format!("enum({}; {})", self.options(), self.prefix.description())
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        self.prefix.fixed_size()
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        self.prefix.max_size()
    }

    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        let index = self.resolve(value)?;
        self.prefix.write_usize(index, buf)
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        if remaining(bytes, offset) == 0 {
            return Err(Error::EmptyBuffer("enum"));
        }
        let (index, offset) = self.prefix.read_usize(bytes, offset)?;
        let (_, value) = self
            .variants
            .get(index)
            .ok_or(Error::InvalidDiscriminator {
                codec: "enum",
                discriminator: index,
                max: self.variants.len().saturating_sub(1),
            })?;
        Ok((value.clone(), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::numbers::U16;

    fn colors() -> ScalarEnum<u32> {
        ScalarEnum::new(vec![
            ("red", 0xff0000),
            ("green", 0x00ff00),
            ("blue", 0x0000ff),
        ])
    }

    #[test]
    fn test_select_by_value_name_index() {
        let codec = colors();
        assert_eq!(
            codec.serialize(&Variant::Value(0x00ff00)).unwrap().as_ref(),
            [0x01]
        );
        assert_eq!(
            codec.serialize(&Variant::Name("blue".into())).unwrap().as_ref(),
            [0x02]
        );
        assert_eq!(codec.serialize(&Variant::Index(0)).unwrap().as_ref(), [0x00]);
    }

    #[test]
    fn test_decode_yields_value() {
        let codec = colors();
        assert_eq!(codec.deserialize(&[0x02]).unwrap(), (0x0000ff, 1));
    }

    #[test]
    fn test_description() {
        assert_eq!(colors().description(), "enum(red, green, blue; u8(le))");
        assert_eq!(colors().fixed_size(), Some(1));
    }

    #[test]
    fn test_unknown_variant() {
        let codec = colors();
        let err = codec.serialize(&Variant::Value(0x123456)).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant { codec: "enum", .. }));
        assert!(err.to_string().contains("red, green, blue"));

        let err = codec.serialize(&Variant::Name("purple".into())).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant { codec: "enum", .. }));

        let err = codec.serialize(&Variant::Index(3)).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant { codec: "enum", .. }));
    }

    #[test]
    fn test_unknown_discriminator() {
        assert!(matches!(
            colors().deserialize(&[0x05]),
            Err(Error::InvalidDiscriminator {
                codec: "enum",
                discriminator: 5,
                max: 2
            })
        ));
    }

    #[test]
    fn test_wide_prefix() {
        let codec = ScalarEnum::prefixed(vec![("a", 1u8), ("b", 2)], U16::be());
        assert_eq!(
            codec.serialize(&Variant::Value(2)).unwrap().as_ref(),
            [0x00, 0x01]
        );
        assert_eq!(codec.deserialize(&[0x00, 0x01]).unwrap(), (2, 2));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            colors().deserialize(&[]),
            Err(Error::EmptyBuffer("enum"))
        ));
    }
}
