//! The 32-bit integer codec.
//!
//! - [`format`]: integer to text in any radix, plus unsigned and
//!   power-of-two renderings. Lenient: a bad radix becomes 10.
//! - [`parse`]: text to integer. Strict: a bad radix is an error.
//! - [`bits`]: bit counting, rotation and reversal.
//!
//! The free functions below cover the remaining arithmetic on the
//! unsigned view of an `i32`.

#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

pub mod bits;
pub mod format;
pub mod parse;

use core::cmp::Ordering;

pub use bits::{
    bit_count, highest_one_bit, leading_zeros, lowest_one_bit, reverse, reverse_bytes,
    rotate_left, rotate_right, signum, trailing_zeros,
};
pub use format::{
    to_binary_string, to_hex_string, to_octal_string, to_string, to_string_radix,
    to_unsigned_string, to_unsigned_string_radix,
};
pub use parse::{IntSource, decode, parse_int, parse_unsigned_int};

/// Smallest `i32`. Its magnitude has no positive counterpart.
pub const MIN_VALUE: i32 = i32::MIN;
/// Largest `i32`.
pub const MAX_VALUE: i32 = i32::MAX;
/// Width in bits.
pub const SIZE: u32 = 32;
/// Width in bytes.
pub const BYTES: u32 = SIZE / 8;

/// Signed comparison.
#[must_use]
pub fn compare(x: i32, y: i32) -> Ordering {
    x.cmp(&y)
}

/// Compares the unsigned views of `x` and `y` by shifting both into signed
/// order.
#[must_use]
pub fn compare_unsigned(x: i32, y: i32) -> Ordering {
    compare(x.wrapping_add(MIN_VALUE), y.wrapping_add(MIN_VALUE))
}

/// Zero-extends the bit pattern of `x`.
#[must_use]
pub const fn to_unsigned_long(x: i32) -> i64 {
    (x as i64) & 0xffff_ffff
}

/// Unsigned quotient, or `None` when `divisor` is zero.
#[must_use]
pub const fn divide_unsigned(dividend: i32, divisor: i32) -> Option<i32> {
    if divisor == 0 {
        return None;
    }
    Some((to_unsigned_long(dividend) / to_unsigned_long(divisor)) as i32)
}

/// Unsigned remainder, or `None` when `divisor` is zero.
#[must_use]
pub const fn remainder_unsigned(dividend: i32, divisor: i32) -> Option<i32> {
    if divisor == 0 {
        return None;
    }
    Some((to_unsigned_long(dividend) % to_unsigned_long(divisor)) as i32)
}

/// Wrapping sum.
#[must_use]
pub const fn sum(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// The larger of `a` and `b`.
#[must_use]
pub fn max(a: i32, b: i32) -> i32 {
    a.max(b)
}

/// The smaller of `a` and `b`.
#[must_use]
pub fn min(a: i32, b: i32) -> i32 {
    a.min(b)
}

/// Hash of an integer value: the value itself.
#[must_use]
pub const fn hash_code(value: i32) -> i32 {
    value
}
