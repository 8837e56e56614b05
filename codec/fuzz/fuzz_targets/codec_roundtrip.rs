#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, BTreeSet};
use wireform_codec::{Codecs, DataEnum, DataVariant, Endian, Serializer};

fn facade(big_endian: bool) -> Codecs {
    if big_endian {
        Codecs::with_endian(Endian::Big)
    } else {
        Codecs::new()
    }
}

fn roundtrip<S>(codec: &S, value: S::Input)
where
    S: Serializer,
    S::Input: PartialEq<S::Output> + std::fmt::Debug,
    S::Output: std::fmt::Debug,
{
    let encoded = codec.serialize(&value).expect("failed to encode input");
    if let Some(size) = codec.fixed_size() {
        assert_eq!(encoded.len(), size);
    }
    if let Some(max) = codec.max_size() {
        assert!(encoded.len() <= max);
    }
    let (decoded, offset) = codec
        .deserialize(&encoded)
        .expect("failed to decode a successfully encoded input");
    assert_eq!(value, decoded);
    assert_eq!(offset, encoded.len());
}

/// Decoding arbitrary bytes must either fail cleanly or report an offset
/// inside the buffer. It must never panic.
fn decode_arbitrary(bytes: &[u8], offset: usize) {
    let codecs = facade(offset % 2 == 0);
    let nested = codecs.struct_((
        ("id", codecs.u64()),
        ("tags", codecs.array(codecs.string())),
        ("weight", codecs.option(codecs.f64())),
        ("flags", codecs.map(codecs.u8(), codecs.bool())),
    ));
    let offset = offset.min(bytes.len());
    if let Ok((_, next)) = nested.read_at(bytes, offset) {
        assert!(next >= offset);
        assert!(next <= bytes.len());
    }
}

#[derive(Clone, Debug, PartialEq, Arbitrary)]
enum Shape {
    Dot,
    Circle { radius: u64 },
    Label(String),
}

fn shape_codec(codecs: Codecs) -> DataEnum<Shape> {
    codecs.data_enum(vec![
        DataVariant::unit("Dot", Shape::Dot),
        DataVariant::new(
            "Circle",
            codecs.struct_((("radius", codecs.u64()),)),
            |shape: &Shape| match shape {
                Shape::Circle { radius } => Some((*radius,)),
                _ => None,
            },
            |(radius,)| Shape::Circle { radius },
        ),
        DataVariant::new(
            "Label",
            codecs.string(),
            |shape: &Shape| match shape {
                Shape::Label(text) => Some(text.clone()),
                _ => None,
            },
            Shape::Label,
        ),
    ])
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Decode { bytes: &'a [u8], offset: usize },
    Unsigned { value: u128, big_endian: bool },
    Signed { value: i128, big_endian: bool },
    Float(f64),
    Text(String),
    Bytes(&'a [u8]),
    Array(Vec<u16>),
    Map(BTreeMap<u8, u64>),
    Set(BTreeSet<u32>),
    Optional(Option<u32>),
    Enum(Shape),
    Key([u8; 32]),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Decode { bytes, offset } => decode_arbitrary(bytes, offset),
        FuzzInput::Unsigned { value, big_endian } => {
            let codecs = facade(big_endian);
            roundtrip(&codecs.u8(), value as u8);
            roundtrip(&codecs.u16(), value as u16);
            roundtrip(&codecs.u32(), value as u32);
            roundtrip(&codecs.u64(), value as u64);
            roundtrip(&codecs.u128(), value);
        }
        FuzzInput::Signed { value, big_endian } => {
            let codecs = facade(big_endian);
            roundtrip(&codecs.i8(), value as i8);
            roundtrip(&codecs.i16(), value as i16);
            roundtrip(&codecs.i32(), value as i32);
            roundtrip(&codecs.i64(), value as i64);
            roundtrip(&codecs.i128(), value);
        }
        FuzzInput::Float(value) => {
            if !value.is_nan() {
                let codecs = Codecs::new();
                roundtrip(&codecs.f64(), value);
            }
        }
        FuzzInput::Text(value) => {
            // NUL bytes are indistinguishable from padding, so skip them.
            if !value.contains('\0') {
                let codecs = Codecs::new();
                roundtrip(&codecs.string(), value);
            }
        }
        FuzzInput::Bytes(value) => {
            let codecs = Codecs::new();
            let codec = codecs.bytes_prefixed(codecs.u32());
            roundtrip(&codec, bytes::Bytes::copy_from_slice(value));
        }
        FuzzInput::Array(value) => {
            let codecs = Codecs::new();
            roundtrip(&codecs.array(codecs.u16()), value);
        }
        FuzzInput::Map(value) => {
            let codecs = Codecs::new();
            roundtrip(&codecs.map(codecs.u8(), codecs.u64()), value);
        }
        FuzzInput::Set(value) => {
            let codecs = Codecs::new();
            roundtrip(&codecs.set(codecs.u32()), value);
        }
        FuzzInput::Optional(value) => {
            let codecs = Codecs::new();
            roundtrip(&codecs.option(codecs.u32()), value);
            let fixed = codecs
                .fixed_option(codecs.u32())
                .expect("u32 has a fixed size");
            roundtrip(&fixed, value);
        }
        FuzzInput::Enum(value) => {
            let codec = shape_codec(Codecs::new());
            if let Shape::Label(text) = &value {
                if text.contains('\0') {
                    return;
                }
            }
            roundtrip(&codec, value);
        }
        FuzzInput::Key(raw) => {
            let codecs = Codecs::new();
            roundtrip(&codecs.public_key(), wireform_codec::Pubkey::new(raw));
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
