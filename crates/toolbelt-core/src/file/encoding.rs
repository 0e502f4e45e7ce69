use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const REPLACEMENT: char = '\u{FFFD}';

/// Character encoding for text reads and writes. Always passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
    #[serde(rename = "latin1")]
    Latin1,
}

impl TextEncoding {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "latin1",
        }
    }

    /// Encode text. Latin-1 replaces characters above U+00FF with `?`.
    /// No byte order mark is written.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Decode a complete buffer, replacing invalid sequences with U+FFFD.
    ///
    /// A leading byte order mark for this encoding is skipped.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        let mut decoder = TextDecoder::new(self);
        let mut text = decoder.decode_chunk(bytes);
        text.push_str(&decoder.finish());
        text
    }

    fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Latin1 => &[],
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf-16" | "utf16le" | "utf16" => Ok(Self::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            "" => Err(Error::missing("encoding")),
            other => Err(Error::malformed(
                "encoding",
                format!("unsupported encoding '{other}'"),
            )),
        }
    }
}

/// Incremental decoder for text that arrives in arbitrary byte chunks.
///
/// A multi-byte sequence cut by a chunk boundary is held back and completed by
/// the next chunk.
#[derive(Debug, Clone)]
pub struct TextDecoder {
    encoding: TextEncoding,
    pending: Vec<u8>,
    at_start: bool,
}

impl TextDecoder {
    #[must_use]
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
            at_start: true,
        }
    }

    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Decode the next chunk; incomplete trailing bytes are kept for later.
    pub fn decode_chunk(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        if self.at_start {
            let bom = self.encoding.bom();
            if self.pending.len() < bom.len() && bom.starts_with(&self.pending) {
                return String::new();
            }
            if !bom.is_empty() && self.pending.starts_with(bom) {
                self.pending.drain(..bom.len());
            }
            self.at_start = false;
        }

        let (text, consumed) = match self.encoding {
            TextEncoding::Utf8 => decode_utf8(&self.pending),
            TextEncoding::Utf16Le => decode_utf16(&self.pending, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(&self.pending, u16::from_be_bytes),
            TextEncoding::Latin1 => (
                self.pending.iter().map(|&b| char::from(b)).collect(),
                self.pending.len(),
            ),
        };
        self.pending.drain(..consumed);
        text
    }

    /// Flush whatever is still held back, as replacement characters.
    pub fn finish(&mut self) -> String {
        self.at_start = false;
        if self.pending.is_empty() {
            return String::new();
        }
        self.pending.clear();
        REPLACEMENT.to_string()
    }
}

/// Decode as much UTF-8 as possible. Returns the text and the bytes consumed;
/// only an incomplete sequence at the very end is left unconsumed.
fn decode_utf8(bytes: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                return (text, bytes.len());
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                text.push_str(&String::from_utf8_lossy(valid));
                match e.error_len() {
                    Some(len) => {
                        text.push(REPLACEMENT);
                        rest = &after[len..];
                    }
                    None => return (text, bytes.len() - after.len()),
                }
            }
        }
    }
}

/// Decode UTF-16 code units, holding back an odd byte or a trailing high surrogate.
fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> (String, usize) {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();

    let mut consumed = units.len() * 2;
    if units
        .last()
        .is_some_and(|&u| (0xD800..=0xDBFF).contains(&u))
    {
        units.pop();
        consumed -= 2;
    }

    let text = char::decode_utf16(units)
        .map(|r| r.unwrap_or(REPLACEMENT))
        .collect();
    (text, consumed)
}
