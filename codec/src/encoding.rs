//! Text encodings for string codecs.

use crate::error::Error;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Bitcoin alphabet, also used for account addresses.
const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// How a string codec maps text to content bytes.
///
/// `Utf8` treats the text itself as the payload. The base alphabets treat the
/// text as a rendering of the payload: encoding parses the text into bytes,
/// decoding formats bytes back into text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Base16,
    Base58,
    Base64,
}

impl Encoding {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Base16 => "base16",
            Encoding::Base58 => "base58",
            Encoding::Base64 => "base64",
        }
    }

    /// Converts text into content bytes.
    ///
    /// Fails if the text contains characters outside the alphabet.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Base16 => from_base16(text),
            Encoding::Base58 => from_base58(text),
            Encoding::Base64 => BASE64
                .decode(text)
                .map_err(|err| Error::InvalidData("base64", err.to_string())),
        }
    }

    /// Converts content bytes back into text.
    ///
    /// `Utf8` replaces invalid sequences and strips NUL bytes, so content
    /// recovered from zero-padded fixed-width fields reads back clean. The
    /// base alphabets always succeed.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).replace('\0', ""),
            Encoding::Base16 => to_base16(bytes),
            Encoding::Base58 => to_base58(bytes),
            Encoding::Base64 => BASE64.encode(bytes),
        }
    }
}

/// Converts bytes to a hexadecimal string.
fn to_base16(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
fn from_base16(text: &str) -> Result<Vec<u8>, Error> {
    if !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(Error::InvalidData(
            "base16",
            "expected ascii hex digits".into(),
        ));
    }
    if text.len() % 2 != 0 {
        return Err(Error::InvalidData(
            "base16",
            format!("odd length {}", text.len()),
        ));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .map_err(|_| Error::InvalidData("base16", format!("invalid digits at {i}")))
        })
        .collect()
}

/// Converts bytes to a base58 string.
fn to_base58(bytes: &[u8]) -> String {
    // Leading zero bytes map to '1' one-for-one.
    let zeros = bytes.iter().take_while(|byte| **byte == 0).count();

    // Digits accumulate least-significant first.
    let mut digits: Vec<u8> = Vec::new();
    for &byte in &bytes[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut text = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        text.push('1');
    }
    for &digit in digits.iter().rev() {
        text.push(BASE58_ALPHABET[digit as usize] as char);
    }
    text
}

/// Converts a base58 string to bytes.
fn from_base58(text: &str) -> Result<Vec<u8>, Error> {
    let mut zeros = 0usize;
    let mut seen_nonzero = false;

    // Bytes accumulate least-significant first.
    let mut bytes: Vec<u8> = Vec::new();
    for ch in text.chars() {
        let index = BASE58_ALPHABET
            .iter()
            .position(|candidate| *candidate as char == ch)
            .ok_or_else(|| Error::InvalidData("base58", format!("invalid character {ch:?}")))?;
        if index == 0 && !seen_nonzero {
            zeros += 1;
            continue;
        }
        seen_nonzero = true;
        let mut carry = index as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        assert_eq!(Encoding::Utf8.encode("Hi").unwrap(), b"Hi");
        assert_eq!(Encoding::Utf8.decode(b"Hi"), "Hi");

        // NUL padding is stripped on the way back.
        assert_eq!(Encoding::Utf8.decode(b"Hi\0\0\0"), "Hi");

        // Invalid sequences decode lossily rather than failing.
        assert_eq!(Encoding::Utf8.decode(&[0xff]), "\u{fffd}");
    }

    #[test]
    fn test_base16() {
        assert_eq!(Encoding::Base16.encode("").unwrap(), Vec::<u8>::new());
        assert_eq!(Encoding::Base16.encode("ff01").unwrap(), vec![0xff, 0x01]);
        assert_eq!(Encoding::Base16.decode(&[0xff, 0x01]), "ff01");
        assert!(Encoding::Base16.encode("f").is_err());
        assert!(Encoding::Base16.encode("fg").is_err());
        assert!(Encoding::Base16.encode("éé").is_err());
    }

    #[test]
    fn test_base58() {
        // Vectors from the reference alphabet.
        assert_eq!(Encoding::Base58.encode("").unwrap(), Vec::<u8>::new());
        assert_eq!(Encoding::Base58.encode("1").unwrap(), vec![0x00]);
        assert_eq!(Encoding::Base58.encode("2g").unwrap(), vec![0x61]);
        assert_eq!(
            Encoding::Base58.encode("11233QC4").unwrap(),
            vec![0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd]
        );
        assert_eq!(Encoding::Base58.decode(&[0x61]), "2g");
        assert_eq!(Encoding::Base58.decode(&[0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd]), "11233QC4");
        assert!(Encoding::Base58.encode("0").is_err());
        assert!(Encoding::Base58.encode("l").is_err());
    }

    #[test]
    fn test_base58_roundtrip() {
        let values: [&[u8]; 4] = [&[], &[0x00], &[0x00, 0x01, 0x02], &[0xff; 32]];
        for value in values {
            let text = Encoding::Base58.decode(value);
            assert_eq!(Encoding::Base58.encode(&text).unwrap(), value);
        }
    }

    #[test]
    fn test_base64() {
        assert_eq!(Encoding::Base64.decode(b"Hi"), "SGk=");
        assert_eq!(Encoding::Base64.encode("SGk=").unwrap(), b"Hi");
        assert!(Encoding::Base64.encode("not base64!").is_err());
    }
}
