use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Character encodings accepted by file ingestion.
///
/// The engine tries them in the configured order and keeps the first
/// successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "utf-16le", alias = "utf16le")]
    Utf16Le,
    #[serde(rename = "utf-16be", alias = "utf16be")]
    Utf16Be,
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "ascii", alias = "us-ascii")]
    Ascii,
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

impl Encoding {
    /// The default fallback chain: UTF-8 first, then Latin-1.
    pub fn default_chain() -> Vec<Encoding> {
        vec![Encoding::Utf8, Encoding::Latin1]
    }

    /// Canonical lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Latin1 => "latin-1",
            Encoding::Ascii => "ascii",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Encoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Encoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            // every byte is a code point in U+0000..=U+00FF
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Ascii => {
                if bytes.is_ascii() {
                    Some(bytes.iter().map(|&b| b as char).collect())
                } else {
                    None
                }
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }
    String::from_utf16(&units).ok()
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-16le" | "utf16le" => Ok(Encoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Encoding::Utf16Be),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_rejects_invalid_and_strips_bom() {
        assert_eq!(Encoding::Utf8.decode(&[0xFF, 0xFE, 0x41]), None);
        assert_eq!(
            Encoding::Utf8.decode(b"\xEF\xBB\xBFhello").as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn latin1_always_decodes() {
        assert_eq!(Encoding::Latin1.decode(&[0x63, 0x61, 0x66, 0xE9]).as_deref(), Some("café"));
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(Encoding::Ascii.decode(b"plain").as_deref(), Some("plain"));
        assert_eq!(Encoding::Ascii.decode(&[0x61, 0x80]), None);
    }

    #[test]
    fn utf16_both_endians() {
        let le: Vec<u8> = "hi".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let be: Vec<u8> = "hi".encode_utf16().flat_map(u16::to_be_bytes).collect();
        assert_eq!(Encoding::Utf16Le.decode(&le).as_deref(), Some("hi"));
        assert_eq!(Encoding::Utf16Be.decode(&be).as_deref(), Some("hi"));
        assert_eq!(Encoding::Utf16Le.decode(&[0x68]), None);
    }

    #[test]
    fn parse_and_display_labels() {
        for enc in [Encoding::Utf8, Encoding::Utf16Le, Encoding::Utf16Be, Encoding::Latin1, Encoding::Ascii] {
            assert_eq!(enc.label().parse::<Encoding>(), Ok(enc));
        }
        assert_eq!("ISO-8859-1".parse::<Encoding>(), Ok(Encoding::Latin1));
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
