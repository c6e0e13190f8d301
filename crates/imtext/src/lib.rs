//! Immutable UTF-16 text and a radix codec for 32-bit integers.
//!
//! [`Text`] is an immutable, cheaply sliced sequence of UTF-16 code units
//! with substring search, region matching, splitting and transcoding. The
//! [`int`] module formats and parses `i32` values in any radix from 2 to
//! 36, signed or as their unsigned bit pattern.
//!
//! ```rust
//! use imtext::{Text, int};
//!
//! let hex = int::to_hex_string(-1);
//! assert_eq!(hex, "ffffffff");
//! assert_eq!(int::parse_unsigned_int(hex.as_str(), 16), Ok(-1));
//!
//! let text = Text::from(int::to_string_radix(255, 2));
//! assert_eq!(text.last_index_of(&Text::from("11"), text.len()), Some(6));
//! assert_eq!(int::parse_int(&text, 2), Ok(255));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chars;
pub mod charset;
mod error;
pub mod int;
mod options;
pub mod pattern;
pub mod radix;
pub mod text;

#[cfg(test)]
mod tests;

pub use chars::{CharClass, StdCharClass};
pub use error::{Bounds, ParseIntError, TextError};
pub use options::{CaseSensitivity, SplitLimit};
pub use radix::Radix;
pub use text::{CASE_INSENSITIVE_ORDER, CodePointIndex, Text};
