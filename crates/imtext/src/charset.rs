//! Byte transcoding for [`Text`](crate::Text).
//!
//! Only the byte-oriented constructors and [`Text::get_bytes`] touch this
//! module; searching and the integer codec never do. Decoding is lossy:
//! malformed input becomes U+FFFD. Encoding replaces anything the charset
//! cannot represent, including unpaired surrogates, with `?`.
//!
//! [`Text::get_bytes`]: crate::Text::get_bytes

use alloc::vec::Vec;
use core::fmt;

use crate::error::TextError;

const REPLACEMENT_UNIT: u16 = 0xFFFD;
const REPLACEMENT_BYTE: u8 = b'?';

/// A character set that converts between bytes and UTF-16 code units.
pub trait Charset: Sync {
    /// Canonical name.
    fn name(&self) -> &'static str;

    /// Bytes to code units.
    fn decode(&self, bytes: &[u8]) -> Vec<u16>;

    /// Code units to bytes.
    fn encode(&self, units: &[u16]) -> Vec<u8>;
}

impl fmt::Debug for dyn Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

/// ISO-8859-1: each byte is the code point of the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

/// US-ASCII.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascii;

/// UTF-16, big endian, no byte order mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16Be;

/// UTF-16, little endian, no byte order mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16Le;

/// Charset used when none is named.
pub static DEFAULT: &dyn Charset = &Utf8;

/// Replaces each scalar value with `map(c)` or `?`, and each unpaired
/// surrogate with `?`.
fn encode_scalars(units: &[u16], mut map: impl FnMut(char, &mut Vec<u8>) -> bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len());
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) if map(c, &mut out) => {}
            _ => out.push(REPLACEMENT_BYTE),
        }
    }
    out
}

impl Charset for Utf8 {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    fn decode(&self, bytes: &[u8]) -> Vec<u16> {
        let mut out = Vec::with_capacity(bytes.len());
        let mut rest = bytes;
        while !rest.is_empty() {
            let (ch, len) = bstr::decode_utf8(rest);
            match ch {
                Some(c) => {
                    let mut buf = [0u16; 2];
                    out.extend_from_slice(c.encode_utf16(&mut buf));
                }
                None => out.push(REPLACEMENT_UNIT),
            }
            rest = &rest[len.max(1)..];
        }
        out
    }

    fn encode(&self, units: &[u16]) -> Vec<u8> {
        encode_scalars(units, |c, out| {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            true
        })
    }
}

impl Charset for Latin1 {
    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn decode(&self, bytes: &[u8]) -> Vec<u16> {
        bytes.iter().map(|&b| u16::from(b)).collect()
    }

    fn encode(&self, units: &[u16]) -> Vec<u8> {
        encode_scalars(units, |c, out| match u8::try_from(c) {
            Ok(b) => {
                out.push(b);
                true
            }
            Err(_) => false,
        })
    }
}

impl Charset for Ascii {
    fn name(&self) -> &'static str {
        "US-ASCII"
    }

    fn decode(&self, bytes: &[u8]) -> Vec<u16> {
        bytes
            .iter()
            .map(|&b| if b.is_ascii() { u16::from(b) } else { REPLACEMENT_UNIT })
            .collect()
    }

    fn encode(&self, units: &[u16]) -> Vec<u8> {
        encode_scalars(units, |c, out| {
            if c.is_ascii() {
                out.push(c as u8);
                true
            } else {
                false
            }
        })
    }
}

macro_rules! utf16_charset {
    ($ty:ident, $name:literal, $from:ident, $to:ident) => {
        impl Charset for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn decode(&self, bytes: &[u8]) -> Vec<u16> {
                let chunks = bytes.chunks_exact(2);
                let odd = !chunks.remainder().is_empty();
                let mut out: Vec<u16> = chunks.map(|pair| u16::$from([pair[0], pair[1]])).collect();
                if odd {
                    out.push(REPLACEMENT_UNIT);
                }
                out
            }

            fn encode(&self, units: &[u16]) -> Vec<u8> {
                units.iter().flat_map(|u| u.$to()).collect()
            }
        }
    };
}

utf16_charset!(Utf16Be, "UTF-16BE", from_be_bytes, to_be_bytes);
utf16_charset!(Utf16Le, "UTF-16LE", from_le_bytes, to_le_bytes);

const REGISTRY: &[(&[&str], &dyn Charset)] = &[
    (&["UTF-8", "UTF8"], &Utf8),
    (
        &["ISO-8859-1", "ISO8859-1", "ISO8859_1", "LATIN1", "L1"],
        &Latin1,
    ),
    (&["US-ASCII", "ASCII", "ASCII7"], &Ascii),
    (&["UTF-16BE", "UTF_16BE", "UNICODEBIGUNMARKED"], &Utf16Be),
    (&["UTF-16LE", "UTF_16LE", "UNICODELITTLEUNMARKED"], &Utf16Le),
];

/// Looks a charset up by name or alias, ignoring ASCII case.
///
/// # Errors
///
/// [`TextError::UnsupportedCharset`] when no charset answers to `name`.
pub fn for_name(name: &str) -> Result<&'static dyn Charset, TextError> {
    REGISTRY
        .iter()
        .find(|(aliases, _)| aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .map(|&(_, charset)| charset)
        .ok_or_else(|| {
            tracing::debug!(charset = name, "unsupported charset");
            TextError::UnsupportedCharset(name.into())
        })
}
