//! Integer to text.
//!
//! # Radix policy
//!
//! Every formatter here accepts any `u32` radix and **silently formats in
//! radix 10** when it falls outside `2..=36`. The parsers in
//! [`parse`](super::parse) reject the same radix with
//! [`ParseIntError::InvalidRadix`](crate::ParseIntError::InvalidRadix).
//! The asymmetry is intentional; do not "fix" one side to match the other.
//!
//! # Examples
//!
//! ```rust
//! use imtext::int::format;
//!
//! assert_eq!(format::to_string_radix(-255, 16), "-ff");
//! assert_eq!(format::to_string_radix(255, 99), "255");
//! assert_eq!(format::to_hex_string(-1), "ffffffff");
//! assert_eq!(format::to_unsigned_string(-1), "4294967295");
//! ```

#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use alloc::string::String;

use super::bits;
use crate::radix::{self, DIGIT_ONES, DIGIT_TENS, Radix};

/// Upper bounds of the decimal magnitudes with 1, 2, … 10 digits.
const SIZE_TABLE: [i32; 10] = [
    9,
    99,
    999,
    9_999,
    99_999,
    999_999,
    9_999_999,
    99_999_999,
    999_999_999,
    i32::MAX,
];

const MIN_VALUE_DECIMAL: &[u8] = b"-2147483648";

/// Long enough for a signed 64-bit value in radix 2.
const CAPACITY: usize = 65;

/// ASCII digits produced by one formatting call, stored inline.
#[derive(Clone)]
pub(crate) struct DigitBuf {
    buf: [u8; CAPACITY],
    start: usize,
    end: usize,
}

impl DigitBuf {
    fn new() -> Self {
        Self {
            buf: [0; CAPACITY],
            start: 0,
            end: 0,
        }
    }

    fn from_literal(bytes: &[u8]) -> Self {
        let mut out = Self::new();
        out.buf[..bytes.len()].copy_from_slice(bytes);
        out.end = bytes.len();
        out
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    pub(crate) fn units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_bytes().iter().map(|&b| u16::from(b))
    }

    pub(crate) fn into_string(self) -> String {
        self.as_bytes().iter().map(|&b| char::from(b)).collect()
    }
}

/// Decimal digit count of a non-negative `x`.
fn string_size(x: i32) -> usize {
    debug_assert!(x >= 0);
    let mut i = 0;
    while x > SIZE_TABLE[i] {
        i += 1;
    }
    i + 1
}

/// Length of the decimal rendering of `i`, sign included.
#[must_use]
pub fn decimal_len(i: i32) -> usize {
    if i == i32::MIN {
        MIN_VALUE_DECIMAL.len()
    } else if i < 0 {
        string_size(-i) + 1
    } else {
        string_size(i)
    }
}

/// Writes the decimal digits of `i` so that they end just before
/// `buf[index]`. `i` must not be `i32::MIN`.
fn get_chars(i: i32, index: usize, buf: &mut [u8]) {
    debug_assert!(i != i32::MIN);
    let mut pos = index;
    let negative = i < 0;
    let mut i = if negative { -i } else { i };

    // Two digits per round while the product below could overflow.
    while i >= 65_536 {
        let q = i / 100;
        // r = i - q * 100
        let r = (i - ((q << 6) + (q << 5) + (q << 2))) as usize;
        i = q;
        pos -= 1;
        buf[pos] = DIGIT_ONES[r];
        pos -= 1;
        buf[pos] = DIGIT_TENS[r];
    }

    // i < 65536, so i * 52429 fits in 32 unsigned bits and
    // (i * 52429) >> 19 == i / 10 exactly.
    loop {
        let q = ((i as u32 * 52_429) >> 19) as i32;
        let r = i - ((q << 3) + (q << 1));
        pos -= 1;
        buf[pos] = radix::symbol(r as u32);
        i = q;
        if i == 0 {
            break;
        }
    }

    if negative {
        pos -= 1;
        buf[pos] = b'-';
    }
}

fn format_decimal(i: i32) -> DigitBuf {
    if i == i32::MIN {
        return DigitBuf::from_literal(MIN_VALUE_DECIMAL);
    }
    let size = decimal_len(i);
    let mut out = DigitBuf::new();
    get_chars(i, size, &mut out.buf);
    out.end = size;
    out
}

/// Repeated division in negative space, so `MIN` needs no special case.
macro_rules! format_negative_space {
    ($name:ident, $ty:ty) => {
        fn $name(i: $ty, radix: Radix) -> DigitBuf {
            let mut out = DigitBuf::new();
            let base = <$ty>::from(radix.get() as u8);
            let negative = i < 0;
            let mut i = if negative { i } else { -i };
            let mut pos = CAPACITY;

            while i <= -base {
                pos -= 1;
                out.buf[pos] = radix::symbol((-(i % base)) as u32);
                i /= base;
            }
            pos -= 1;
            out.buf[pos] = radix::symbol((-i) as u32);

            if negative {
                pos -= 1;
                out.buf[pos] = b'-';
            }
            out.start = pos;
            out.end = CAPACITY;
            out
        }
    };
}

format_negative_space!(format_negative_i32, i32);
format_negative_space!(format_negative_i64, i64);

pub(crate) fn format_radix(i: i32, radix: u32) -> DigitBuf {
    let radix = Radix::or_decimal(radix);
    if radix == Radix::DECIMAL {
        format_decimal(i)
    } else {
        format_negative_i32(i, radix)
    }
}

pub(crate) fn format_unsigned_radix(i: i32, radix: u32) -> DigitBuf {
    format_negative_i64(super::to_unsigned_long(i), Radix::or_decimal(radix))
}

/// Formats the bit pattern of `i` in radix `1 << shift`.
pub(crate) fn format_power_of_two(i: i32, shift: u32) -> DigitBuf {
    debug_assert!((1..=5).contains(&shift));
    let magnitude = super::SIZE - bits::leading_zeros(i);
    let chars = magnitude.div_ceil(shift).max(1) as usize;
    let mut out = DigitBuf::new();
    format_unsigned(i as u32, shift, &mut out.buf[..chars]);
    out.end = chars;
    out
}

/// Fills `buf` from the back with the digits of `val`.
fn format_unsigned(mut val: u32, shift: u32, buf: &mut [u8]) {
    let mask = (1 << shift) - 1;
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = radix::symbol(val & mask);
        val >>= shift;
        if val == 0 || pos == 0 {
            break;
        }
    }
}

/// Decimal rendering of `i`.
#[must_use]
pub fn to_string(i: i32) -> String {
    format_decimal(i).into_string()
}

/// Rendering of `i` in `radix`, with a leading `-` when negative.
///
/// A `radix` outside `2..=36` is treated as 10; this never fails.
#[must_use]
pub fn to_string_radix(i: i32, radix: u32) -> String {
    format_radix(i, radix).into_string()
}

/// Decimal rendering of the bit pattern of `i` read as unsigned.
#[must_use]
pub fn to_unsigned_string(i: i32) -> String {
    format_unsigned_radix(i, 10).into_string()
}

/// Rendering of the bit pattern of `i` read as unsigned, in `radix`.
///
/// A `radix` outside `2..=36` is treated as 10; this never fails.
#[must_use]
pub fn to_unsigned_string_radix(i: i32, radix: u32) -> String {
    format_unsigned_radix(i, radix).into_string()
}

/// Unsigned hexadecimal rendering, lower case, no prefix.
#[must_use]
pub fn to_hex_string(i: i32) -> String {
    format_power_of_two(i, 4).into_string()
}

/// Unsigned octal rendering, no prefix.
#[must_use]
pub fn to_octal_string(i: i32) -> String {
    format_power_of_two(i, 3).into_string()
}

/// Unsigned binary rendering, no prefix.
#[must_use]
pub fn to_binary_string(i: i32) -> String {
    format_power_of_two(i, 1).into_string()
}
