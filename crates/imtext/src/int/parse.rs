//! Text to integer.
//!
//! Parsing is strict about the radix: anything outside `2..=36` is
//! [`ParseIntError::InvalidRadix`], whereas the formatters in
//! [`format`](super::format) quietly fall back to radix 10.
//!
//! All accumulation happens in negative space (`result = result * radix -
//! digit`) so that `i32::MIN`, whose magnitude has no positive
//! counterpart, goes through the same path as every other value. Overflow
//! is detected before it happens, never after.
//!
//! ```rust
//! use imtext::{ParseIntError, int::parse};
//!
//! assert_eq!(parse::parse_int("-2147483648", 10), Ok(i32::MIN));
//! assert!(matches!(
//!     parse::parse_int("2147483648", 10),
//!     Err(ParseIntError::MalformedInput { .. })
//! ));
//! assert_eq!(parse::parse_unsigned_int("4294967295", 10), Ok(-1));
//! assert_eq!(parse::decode("-0x80000000"), Ok(i32::MIN));
//! ```

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use alloc::{borrow::ToOwned, string::String};

use crate::{
    chars::{CharClass, StdCharClass},
    error::ParseIntError,
    radix::Radix,
};

/// A sequence of code units that an integer can be parsed from.
///
/// Implemented for `str` and `[u8]` (byte units) and `[u16]` (UTF-16 code
/// units). Units outside ASCII are never digits.
pub trait IntSource {
    /// Number of units.
    fn unit_len(&self) -> usize;
    /// The unit at `index`, widened.
    fn unit_at(&self, index: usize) -> u32;
    /// Lossy rendering used in error values.
    fn render(&self) -> String;
}

impl IntSource for str {
    fn unit_len(&self) -> usize {
        self.len()
    }

    fn unit_at(&self, index: usize) -> u32 {
        u32::from(self.as_bytes()[index])
    }

    fn render(&self) -> String {
        self.to_owned()
    }
}

impl IntSource for [u8] {
    fn unit_len(&self) -> usize {
        self.len()
    }

    fn unit_at(&self, index: usize) -> u32 {
        u32::from(self[index])
    }

    fn render(&self) -> String {
        bstr::ByteSlice::to_str_lossy(self).into_owned()
    }
}

impl IntSource for [u16] {
    fn unit_len(&self) -> usize {
        self.len()
    }

    fn unit_at(&self, index: usize) -> u32 {
        u32::from(self[index])
    }

    fn render(&self) -> String {
        String::from_utf16_lossy(self)
    }
}

/// Why digit accumulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reject {
    Digit,
    Overflow,
}

macro_rules! accumulate_negative {
    ($name:ident, $ty:ty) => {
        /// Parses the digits of `s[from..]`, all of which must be valid in
        /// `radix`. `negative` selects the limit: `MIN` or `-MAX`.
        fn $name<S: IntSource + ?Sized>(
            s: &S,
            from: usize,
            radix: Radix,
            negative: bool,
        ) -> Result<$ty, Reject> {
            let len = s.unit_len();
            if from >= len {
                return Err(Reject::Digit);
            }
            let base = <$ty>::from(radix.get() as u8);
            let limit = if negative { <$ty>::MIN } else { -<$ty>::MAX };
            let multmin = limit / base;
            let mut result: $ty = 0;

            for i in from..len {
                let Some(digit) = StdCharClass.digit_value(s.unit_at(i), radix) else {
                    return Err(Reject::Digit);
                };
                let digit = <$ty>::from(digit as u8);
                if result < multmin {
                    return Err(Reject::Overflow);
                }
                result *= base;
                if result < limit + digit {
                    return Err(Reject::Overflow);
                }
                result -= digit;
            }

            Ok(if negative { result } else { -result })
        }
    };
}

accumulate_negative!(accumulate_i32, i32);
accumulate_negative!(accumulate_i64, i64);

fn check_radix(radix: u32) -> Result<Radix, ParseIntError> {
    Radix::new(radix).ok_or(ParseIntError::InvalidRadix(radix))
}

fn malformed<S: IntSource + ?Sized>(s: &S) -> ParseIntError {
    let input = s.render();
    tracing::trace!(%input, "rejected integer text");
    ParseIntError::malformed(input)
}

/// Reads an optional leading `+` or `-`, returning `(negative, digits_from)`.
/// A sign with nothing after it is malformed.
fn read_sign<S: IntSource + ?Sized>(s: &S) -> Result<(bool, usize), ParseIntError> {
    match s.unit_at(0) {
        0x2d | 0x2b if s.unit_len() == 1 => Err(malformed(s)),
        0x2d => Ok((true, 1)),
        0x2b => Ok((false, 1)),
        _ => Ok((false, 0)),
    }
}

/// Parses a signed integer in `radix`.
///
/// # Errors
///
/// - [`ParseIntError::InvalidRadix`] when `radix` is outside `2..=36`.
/// - [`ParseIntError::EmptyInput`] when `s` is empty.
/// - [`ParseIntError::MalformedInput`] for a lone sign, a unit that is not a
///   digit of `radix`, or a value outside `i32`.
pub fn parse_int<S: IntSource + ?Sized>(s: &S, radix: u32) -> Result<i32, ParseIntError> {
    let radix = check_radix(radix)?;
    if s.unit_len() == 0 {
        return Err(ParseIntError::EmptyInput);
    }
    let (negative, from) = read_sign(s)?;
    accumulate_i32(s, from, radix, negative).map_err(|_| malformed(s))
}

/// Parses an unsigned integer in `radix`, returning its bit pattern as
/// `i32`. Values above `i32::MAX` come back negative.
///
/// # Errors
///
/// - [`ParseIntError::InvalidRadix`] when `radix` is outside `2..=36`.
/// - [`ParseIntError::EmptyInput`] when `s` is empty.
/// - [`ParseIntError::IllegalSign`] when `s` starts with `-`.
/// - [`ParseIntError::RangeExceeded`] when the value needs more than 32 bits.
/// - [`ParseIntError::MalformedInput`] for any other bad digit or sign.
pub fn parse_unsigned_int<S: IntSource + ?Sized>(
    s: &S,
    radix: u32,
) -> Result<i32, ParseIntError> {
    let checked = check_radix(radix)?;
    let len = s.unit_len();
    if len == 0 {
        return Err(ParseIntError::EmptyInput);
    }
    if s.unit_at(0) == 0x2d {
        return Err(ParseIntError::IllegalSign { input: s.render() });
    }

    // Five base-36 digits or nine decimal digits always fit in i32.
    if len <= 5 || (checked == Radix::DECIMAL && len <= 9) {
        return parse_int(s, radix);
    }

    let (_, from) = read_sign(s)?;
    match accumulate_i64(s, from, checked, false) {
        Ok(value) if value as u64 & 0xffff_ffff_0000_0000 == 0 => Ok(value as i32),
        Ok(_) | Err(Reject::Overflow) => {
            Err(ParseIntError::RangeExceeded { input: s.render() })
        }
        Err(Reject::Digit) => Err(malformed(s)),
    }
}

/// Decodes a decimal, hexadecimal (`0x`, `0X`, `#`) or octal (leading `0`)
/// literal with an optional sign in front of the prefix.
///
/// # Errors
///
/// - [`ParseIntError::EmptyInput`] when `s` is empty.
/// - [`ParseIntError::MalformedInput`] for a sign after the prefix, a
///   missing or bad digit, or a value outside `i32`.
pub fn decode<S: IntSource + ?Sized>(s: &S) -> Result<i32, ParseIntError> {
    let len = s.unit_len();
    if len == 0 {
        return Err(ParseIntError::EmptyInput);
    }

    let at = |i: usize| (i < len).then(|| s.unit_at(i));
    let mut index = 0;
    let negative = match at(0) {
        Some(0x2d) => {
            index += 1;
            true
        }
        Some(0x2b) => {
            index += 1;
            false
        }
        _ => false,
    };

    let radix = match (at(index), at(index + 1)) {
        (Some(0x30), Some(0x78 | 0x58)) => {
            index += 2;
            Radix::HEX
        }
        (Some(0x23), _) => {
            index += 1;
            Radix::HEX
        }
        (Some(0x30), Some(_)) => {
            index += 1;
            Radix::OCTAL
        }
        _ => Radix::DECIMAL,
    };

    if matches!(at(index), Some(0x2d | 0x2b)) {
        tracing::trace!(input = %s.render(), "sign character in wrong position");
        return Err(ParseIntError::malformed(s.render()));
    }

    accumulate_i32(s, index, radix, negative).map_err(|_| malformed(s))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck::QuickCheck;
    use rstest::rstest;

    use super::*;
    use crate::int::format;

    #[rstest]
    #[case("0", 10, 0)]
    #[case("-0", 10, 0)]
    #[case("+42", 10, 42)]
    #[case("-FF", 16, -255)]
    #[case("1100110", 2, 102)]
    #[case("2147483647", 10, i32::MAX)]
    #[case("-2147483648", 10, i32::MIN)]
    #[case("-80000000", 16, i32::MIN)]
    #[case("Kona", 27, 411_787)]
    #[case("zik0zj", 36, i32::MAX)]
    fn accepts(#[case] s: &str, #[case] radix: u32, #[case] expected: i32) {
        assert_eq!(parse_int(s, radix), Ok(expected));
    }

    #[rstest]
    #[case("2147483648", 10)]
    #[case("-2147483649", 10)]
    #[case("99", 8)]
    #[case("Kona", 10)]
    #[case("-", 10)]
    #[case("+", 10)]
    #[case("--1", 10)]
    #[case("1-", 10)]
    #[case(" 1", 10)]
    #[case("80000000", 16)]
    fn rejects(#[case] s: &str, #[case] radix: u32) {
        assert_eq!(
            parse_int(s, radix),
            Err(ParseIntError::MalformedInput { input: s.into() })
        );
    }

    #[test]
    fn strict_radix_and_empty() {
        assert_eq!(parse_int("1", 1), Err(ParseIntError::InvalidRadix(1)));
        assert_eq!(parse_int("1", 37), Err(ParseIntError::InvalidRadix(37)));
        assert_eq!(parse_int("", 10), Err(ParseIntError::EmptyInput));
        assert_eq!(parse_unsigned_int("", 10), Err(ParseIntError::EmptyInput));
        assert_eq!(
            parse_unsigned_int("1", 0),
            Err(ParseIntError::InvalidRadix(0))
        );
    }

    #[test]
    fn non_ascii_units_are_not_digits() {
        let arabic_indic: Vec<u16> = "\u{0661}".encode_utf16().collect();
        assert!(parse_int(arabic_indic.as_slice(), 10).is_err());
        let units: Vec<u16> = "-123".encode_utf16().collect();
        assert_eq!(parse_int(units.as_slice(), 10), Ok(-123));
        assert_eq!(parse_int(b"777".as_slice(), 8), Ok(511));
    }

    #[rstest]
    #[case("0", 10, 0)]
    #[case("4294967295", 10, -1)]
    #[case("2147483648", 10, i32::MIN)]
    #[case("+4294967295", 10, -1)]
    #[case("ffffffff", 16, -1)]
    #[case("1z141z3", 36, -1)]
    #[case("123456789", 10, 123_456_789)]
    fn unsigned_accepts(#[case] s: &str, #[case] radix: u32, #[case] expected: i32) {
        assert_eq!(parse_unsigned_int(s, radix), Ok(expected));
    }

    #[test]
    fn unsigned_rejects() {
        assert_eq!(
            parse_unsigned_int("4294967296", 10),
            Err(ParseIntError::RangeExceeded {
                input: "4294967296".into()
            })
        );
        assert_eq!(
            parse_unsigned_int("100000000", 16),
            Err(ParseIntError::RangeExceeded {
                input: "100000000".into()
            })
        );
        assert_eq!(
            parse_unsigned_int("99999999999999999999999", 10),
            Err(ParseIntError::RangeExceeded {
                input: "99999999999999999999999".into()
            })
        );
        assert_eq!(
            parse_unsigned_int("-1", 10),
            Err(ParseIntError::IllegalSign { input: "-1".into() })
        );
        assert!(matches!(
            parse_unsigned_int("42949x7295", 10),
            Err(ParseIntError::MalformedInput { .. })
        ));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("00", 0)]
    #[case("10", 10)]
    #[case("-10", -10)]
    #[case("010", 8)]
    #[case("-010", -8)]
    #[case("0x1F", 31)]
    #[case("0X1f", 31)]
    #[case("#ff", 255)]
    #[case("+#ff", 255)]
    #[case("-0x80000000", i32::MIN)]
    #[case("0x7fffffff", i32::MAX)]
    #[case("-020000000000", i32::MIN)]
    fn decodes(#[case] s: &str, #[case] expected: i32) {
        assert_eq!(decode(s), Ok(expected));
    }

    #[rstest]
    #[case("0x80000000")]
    #[case("0x-5")]
    #[case("#+5")]
    #[case("0-5")]
    #[case("08")]
    #[case("0x")]
    #[case("-")]
    #[case("#")]
    fn decode_rejects(#[case] s: &str) {
        assert!(
            matches!(decode(s), Err(ParseIntError::MalformedInput { .. })),
            "{s:?} should be malformed"
        );
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode(""), Err(ParseIntError::EmptyInput));
    }

    #[test]
    fn roundtrip_quickcheck() {
        fn prop(value: i32, radix: u8) -> bool {
            let radix = 2 + u32::from(radix) % 35;
            let signed = format::to_string_radix(value, radix);
            let unsigned = format::to_unsigned_string_radix(value, radix);
            parse_int(signed.as_str(), radix) == Ok(value)
                && parse_unsigned_int(unsigned.as_str(), radix) == Ok(value)
        }

        #[cfg(not(miri))]
        let tests = if is_ci::cached() { 100_000 } else { 10_000 };
        #[cfg(miri)]
        let tests = 10;

        QuickCheck::new()
            .tests(tests)
            .quickcheck(prop as fn(i32, u8) -> bool);
    }
}
