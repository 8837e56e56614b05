use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use wireform_codec::{Codecs, DataEnum, DataVariant, Serializer};

fn bench_u64(c: &mut Criterion) {
    let codec = Codecs::new().u64();
    c.bench_function("u64_roundtrip", |b| {
        b.iter(|| {
            let bytes = codec.serialize(black_box(&0x0102030405060708)).unwrap();
            codec.deserialize(&bytes).unwrap()
        })
    });
}

fn bench_array(c: &mut Criterion) {
    let codecs = Codecs::new();
    let codec = codecs.array(codecs.u8());
    let value: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
    c.bench_function("array_1k_roundtrip", |b| {
        b.iter(|| {
            let bytes = codec.serialize(black_box(&value)).unwrap();
            codec.deserialize(&bytes).unwrap()
        })
    });
}

fn bench_record(c: &mut Criterion) {
    let codecs = Codecs::new();
    let codec = codecs.struct_((
        ("name", codecs.string()),
        ("score", codecs.u64()),
        ("ratio", codecs.option(codecs.f64())),
    ));
    let value = ("a-reasonably-long-name".to_string(), 42u64, Some(0.25));
    c.bench_function("record_roundtrip", |b| {
        b.iter(|| {
            let bytes = codec.serialize(black_box(&value)).unwrap();
            codec.deserialize(&bytes).unwrap()
        })
    });
}

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Ping,
    Store { key: u64, payload: String },
}

fn bench_data_enum(c: &mut Criterion) {
    let codecs = Codecs::new();
    let codec: DataEnum<Command> = codecs.data_enum(vec![
        DataVariant::unit("Ping", Command::Ping),
        DataVariant::new(
            "Store",
            codecs.struct_((("key", codecs.u64()), ("payload", codecs.string()))),
            |command: &Command| match command {
                Command::Store { key, payload } => Some((*key, payload.clone())),
                _ => None,
            },
            |(key, payload)| Command::Store { key, payload },
        ),
    ]);
    let value = Command::Store {
        key: 7,
        payload: "payload".into(),
    };
    c.bench_function("data_enum_roundtrip", |b| {
        b.iter(|| {
            let bytes = codec.serialize(black_box(&value)).unwrap();
            codec.deserialize(&bytes).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_u64,
    bench_array,
    bench_record,
    bench_data_enum
);
criterion_main!(benches);
