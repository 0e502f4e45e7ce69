//! Byte sequence helpers: hex decoding/encoding and chunk concatenation.

use crate::error::{Error, Result};
use std::fmt::Write;

/// Decode a hexadecimal string into bytes.
///
/// Digits are case-insensitive; `"FF0A1B"` decodes to `[255, 10, 27]`.
///
/// # Errors
/// - [`Error::MissingInput`] if `hex` is empty.
/// - [`Error::Malformed`] if the length is odd or a pair is not a hex number.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    if hex.is_empty() {
        return Err(Error::missing("hex"));
    }
    if hex.len() % 2 != 0 {
        return Err(Error::malformed(
            "hex string",
            "input must have an even number of characters",
        ));
    }

    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            pair.iter()
                .all(u8::is_ascii_hexdigit)
                .then(|| std::str::from_utf8(pair).ok())
                .flatten()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| {
                    Error::malformed(
                        "hex string",
                        format!("'{}' is not a hex byte", String::from_utf8_lossy(pair)),
                    )
                })
        })
        .collect()
}

/// Encode bytes as an uppercase hexadecimal string.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
    out
}

/// Concatenate byte sequences in order into a single buffer.
#[must_use]
pub fn concat_chunks<I, B>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend_from_slice(chunk.as_ref());
    }
    out
}

/// Flatten a jagged array whose outer array or elements may be absent.
///
/// # Errors
/// [`Error::MissingInput`] if `chunks` is `None` or any element is `None`.
/// Nothing is concatenated in that case.
pub fn concat_optional_chunks(chunks: Option<&[Option<&[u8]>]>) -> Result<Vec<u8>> {
    let chunks = chunks.ok_or(Error::missing("chunks"))?;
    let present: Vec<&[u8]> = chunks
        .iter()
        .map(|c| c.ok_or(Error::missing("chunks")))
        .collect::<Result<_>>()?;

    let mut out = Vec::with_capacity(present.iter().map(|c| c.len()).sum());
    for chunk in present {
        out.extend_from_slice(chunk);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("FF0A1B").unwrap(), vec![255, 10, 27]);
        assert_eq!(hex_to_bytes("ff0a1b").unwrap(), vec![255, 10, 27]);
        assert_eq!(hex_to_bytes("00").unwrap(), vec![0]);
    }

    #[test]
    fn test_hex_to_bytes_odd_length() {
        let err = hex_to_bytes("ABC").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("even number of characters"));
    }

    #[test]
    fn test_hex_to_bytes_empty() {
        assert!(hex_to_bytes("").unwrap_err().is_missing_input());
    }

    #[test]
    fn test_hex_to_bytes_invalid_digit() {
        assert!(hex_to_bytes("0G").unwrap_err().is_malformed());
        assert!(hex_to_bytes("+1").unwrap_err().is_malformed());
        assert!(hex_to_bytes("éA1").unwrap_err().is_malformed());
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[255, 10, 27]), "FF0A1B");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn test_concat_chunks() {
        let parts: [&[u8]; 3] = [b"ab", b"", b"cde"];
        let flat = concat_chunks(parts);
        assert_eq!(flat.len(), 5);
        assert_eq!(flat, b"abcde");

        let owned = vec![vec![1u8, 2], vec![3]];
        assert_eq!(concat_chunks(&owned), vec![1, 2, 3]);
    }

    #[test]
    fn test_concat_optional_chunks() {
        let parts: [Option<&[u8]>; 2] = [Some(b"xy"), Some(b"z")];
        assert_eq!(concat_optional_chunks(Some(&parts)).unwrap(), b"xyz");
        assert!(concat_optional_chunks(Some(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_concat_optional_chunks_missing() {
        assert!(concat_optional_chunks(None).unwrap_err().is_missing_input());

        let parts: [Option<&[u8]>; 2] = [Some(b"xy"), None];
        assert!(concat_optional_chunks(Some(&parts))
            .unwrap_err()
            .is_missing_input());
    }
}
