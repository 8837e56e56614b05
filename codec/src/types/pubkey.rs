//! Codec for 32-byte public keys.

use crate::{
    encoding::Encoding,
    error::Error,
    serializer::{slice_exact, Serializer},
};
use bytes::{BufMut, BytesMut};
use std::{fmt, str::FromStr};

/// Width of a public key on the wire.
pub const PUBKEY_LEN: usize = 32;

/// A 32-byte public key, rendered as base58 text.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pubkey([u8; PUBKEY_LEN]);

impl Pubkey {
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_LEN]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Pubkey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; PUBKEY_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidData(
                "publicKey",
                format!("expected {} bytes, got {}", PUBKEY_LEN, bytes.len()),
            )
        })?;
        Ok(Self(raw))
    }
}

impl FromStr for Pubkey {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let bytes = Encoding::Base58.encode(text)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Encoding::Base58.decode(&self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

/// Codec for [`Pubkey`] values: the raw 32 bytes, nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublicKey;

impl PublicKey {
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer for PublicKey {
    type Input = Pubkey;
    type Output = Pubkey;

    fn description(&self) -> String {
        "publicKey".into()
    }

    #[inline]
    fn fixed_size(&self) -> Option<usize> {
        Some(PUBKEY_LEN)
    }

    #[inline]
    fn max_size(&self) -> Option<usize> {
        Some(PUBKEY_LEN)
    }

    #[inline]
    fn write(&self, value: &Self::Input, buf: &mut BytesMut) -> Result<(), Error> {
        buf.put_slice(value.as_bytes());
        Ok(())
    }

    fn read_at(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        let content = slice_exact("publicKey", bytes, offset, PUBKEY_LEN)?;
        let mut raw = [0u8; PUBKEY_LEN];
        raw.copy_from_slice(content);
        Ok((Pubkey::new(raw), offset + PUBKEY_LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pubkey {
        let mut raw = [0u8; PUBKEY_LEN];
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Pubkey::new(raw)
    }

    #[test]
    fn test_roundtrip() {
        let codec = PublicKey::new();
        let key = sample();
        let encoded = codec.serialize(&key).unwrap();
        assert_eq!(encoded.len(), PUBKEY_LEN);
        assert_eq!(codec.deserialize(&encoded).unwrap(), (key, PUBKEY_LEN));
        assert_eq!(codec.description(), "publicKey");
        assert_eq!(codec.fixed_size(), Some(PUBKEY_LEN));
    }

    #[test]
    fn test_text() {
        // The zero key renders as one '1' per byte.
        let zero = Pubkey::new([0u8; PUBKEY_LEN]);
        assert_eq!(zero.to_string(), "1".repeat(PUBKEY_LEN));

        let key = sample();
        let parsed: Pubkey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
        assert!(Pubkey::from_str("not-base58!").is_err());
        assert!(Pubkey::from_str("22").is_err());
    }

    #[test]
    fn test_try_from() {
        assert!(Pubkey::try_from([0u8; PUBKEY_LEN].as_slice()).is_ok());
        assert!(matches!(
            Pubkey::try_from([0u8; 4].as_slice()),
            Err(Error::InvalidData("publicKey", _))
        ));
    }

    #[test]
    fn test_short_buffer() {
        let codec = PublicKey::new();
        assert!(matches!(
            codec.deserialize(&[]),
            Err(Error::EmptyBuffer("publicKey"))
        ));
        assert!(matches!(
            codec.deserialize(&[0x01, 0x02]),
            Err(Error::NotEnoughBytes {
                codec: "publicKey",
                expected: PUBKEY_LEN,
                actual: 2
            })
        ));
    }
}
