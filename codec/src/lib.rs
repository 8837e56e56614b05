//! Composable binary serializers.
//!
//! # Overview
//!
//! A binary serialization library built from small codec values that compose:
//! - Numbers, booleans, strings, and raw bytes with explicit endianness and
//!   framing
//! - Tuples, records, sequences, maps, sets, options, and enums
//! - Adapters that remap types, force widths, or reverse byte order
//!
//! Every codec implements [`Serializer`], which pairs an encoder with a
//! decoder and reports the encoded size bounds. Decoding starts at a caller
//! chosen offset, never reads past the bytes it consumes, and returns the next
//! offset, so codecs chain over a single buffer.
//!
//! The defaults mirror the most common on-chain account layouts:
//! little-endian numbers, `u32` length prefixes, and single-byte flags and
//! discriminators.
//!
//! # Example
//!
//! ```
//! use wireform_codec::{Codecs, Serializer};
//!
//! let codec = Codecs::new().u32();
//! let bytes = codec.serialize(&66)?;
//! assert_eq!(bytes.as_ref(), &[0x42, 0x00, 0x00, 0x00]);
//!
//! let (value, read) = codec.deserialize(&bytes)?;
//! assert_eq!(value, 66);
//! assert_eq!(read, 4);
//! # Ok::<(), wireform_codec::Error>(())
//! ```
//!
//! # Example (Records)
//!
//! ```
//! use wireform_codec::{Codecs, Serializer};
//!
//! let codecs = Codecs::new();
//! let person = codecs.struct_((
//!     ("name", codecs.string()),
//!     ("age", codecs.u8()),
//! ));
//!
//! let bytes = person.serialize(&("Ada".into(), 36))?;
//! let ((name, age), _) = person.deserialize(&bytes)?;
//! assert_eq!(name, "Ada");
//! assert_eq!(age, 36);
//! # Ok::<(), wireform_codec::Error>(())
//! ```

pub mod adapters;
pub mod config;
pub mod encoding;
pub mod error;
pub mod facade;
pub mod serializer;
pub mod types;

// Re-export main types and traits
pub use adapters::{Described, Fixed, Mapped, Reverse};
pub use config::{Count, Endian, Length};
pub use encoding::Encoding;
pub use error::Error;
pub use facade::Codecs;
pub use serializer::{Prefix, Serializer, SerializerExt};
pub use types::{
    array::Array,
    boolean::Bool,
    bytes::RawBytes,
    data_enum::{DataEnum, DataVariant},
    map::Map,
    numbers::{F32, F64, I128, I16, I32, I64, I8, U128, U16, U32, U64, U8},
    option::Optional,
    pubkey::{PublicKey, Pubkey, PUBKEY_LEN},
    scalar_enum::{ScalarEnum, Variant},
    set::Set,
    structure::Struct,
    text::Text,
    tuple::Tuple,
    unit::Unit,
};
