//! PDF text string decoding and encoding.
//!
//! Text strings are either UTF-16BE with a `FE FF` byte order mark or
//! single-byte PDFDocEncoding. Single-byte strings that are valid UTF-8 are
//! read as UTF-8, since many producers write it unmarked.

use encoding_rs::UTF_16BE;
use lopdf::{Object, StringFormat};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// PDFDocEncoding for 0x18..=0x1F (spacing diacritics).
const DIACRITICS: [char; 8] = [
    '\u{02d8}', '\u{02c7}', '\u{02c6}', '\u{02d9}', '\u{02dd}', '\u{02db}', '\u{02da}', '\u{02dc}',
];

/// PDFDocEncoding for 0x80..=0xA0. 0x9F is undefined.
const HIGH: [Option<char>; 33] = [
    Some('\u{2022}'), Some('\u{2020}'), Some('\u{2021}'), Some('\u{2026}'),
    Some('\u{2014}'), Some('\u{2013}'), Some('\u{0192}'), Some('\u{2044}'),
    Some('\u{2039}'), Some('\u{203a}'), Some('\u{2212}'), Some('\u{2030}'),
    Some('\u{201e}'), Some('\u{201c}'), Some('\u{201d}'), Some('\u{2018}'),
    Some('\u{2019}'), Some('\u{201a}'), Some('\u{2122}'), Some('\u{fb01}'),
    Some('\u{fb02}'), Some('\u{0141}'), Some('\u{0152}'), Some('\u{0160}'),
    Some('\u{0178}'), Some('\u{017d}'), Some('\u{0131}'), Some('\u{0142}'),
    Some('\u{0153}'), Some('\u{0161}'), Some('\u{017e}'), None,
    Some('\u{20ac}'),
];

/// The character a PDFDocEncoding byte stands for.
fn pdf_doc_char(byte: u8) -> Option<char> {
    match byte {
        0x18..=0x1F => Some(DIACRITICS[usize::from(byte - 0x18)]),
        0x7F | 0xAD => None,
        0x80..=0xA0 => HIGH[usize::from(byte - 0x80)],
        _ => Some(char::from(byte)),
    }
}

/// The PDFDocEncoding byte for a character, if it has one.
fn pdf_doc_byte(c: char) -> Option<u8> {
    let code = u32::from(c);
    match code {
        0x00..=0x17 | 0x20..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF => u8::try_from(code).ok(),
        _ => {
            if let Some(i) = DIACRITICS.iter().position(|&d| d == c) {
                return u8::try_from(0x18 + i).ok();
            }
            HIGH.iter()
                .position(|&h| h == Some(c))
                .and_then(|i| u8::try_from(0x80 + i).ok())
        }
    }
}

/// Decode the bytes of a PDF text string.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BOM) {
        let (text, _) = UTF_16BE.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes
            .iter()
            .map(|&b| pdf_doc_char(b).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
    }
}

/// Encode text as a PDF string object.
///
/// Produces a literal PDFDocEncoding string when every character has a
/// single-byte code and the bytes decode back to the same text, and a hex
/// UTF-16BE string with byte order mark otherwise.
pub fn encode_pdf_string(text: &str) -> Object {
    let single: Option<Vec<u8>> = text.chars().map(pdf_doc_byte).collect();
    if let Some(bytes) = single {
        if decode_pdf_string(&bytes) == text {
            return Object::String(bytes, StringFormat::Literal);
        }
    }
    let mut utf16 = UTF16_BOM.to_vec();
    for unit in text.encode_utf16() {
        utf16.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(utf16, StringFormat::Hexadecimal)
}

/// Decode a name or string object as text.
pub(crate) fn object_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}
