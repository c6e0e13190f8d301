//! Character classification.
//!
//! [`CharClass`] is the narrow interface the text and codec code consult
//! for surrogate arithmetic, simple case mapping and digit values.
//! [`StdCharClass`] answers from the `core::char` tables.
//!
//! Case mapping is one unit to one unit. Mappings that expand (`ß` to
//! `SS`) or leave the basic plane leave the unit unchanged, so this is
//! not full Unicode case folding.

#![allow(clippy::cast_possible_truncation)]

use crate::radix::{self, Radix};

/// First high (leading) surrogate.
pub const MIN_HIGH_SURROGATE: u16 = 0xD800;
/// Last high (leading) surrogate.
pub const MAX_HIGH_SURROGATE: u16 = 0xDBFF;
/// First low (trailing) surrogate.
pub const MIN_LOW_SURROGATE: u16 = 0xDC00;
/// Last low (trailing) surrogate.
pub const MAX_LOW_SURROGATE: u16 = 0xDFFF;
/// First code point outside the basic plane.
pub const MIN_SUPPLEMENTARY_CODE_POINT: u32 = 0x1_0000;
/// Largest code point.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Character classification consumed by [`Text`](crate::Text) and the
/// integer parser.
pub trait CharClass {
    /// Whether `cp` fits in a single code unit.
    fn is_bmp_code_point(&self, cp: u32) -> bool {
        cp >> 16 == 0
    }

    /// Whether `cp` is at most `U+10FFFF`.
    fn is_valid_code_point(&self, cp: u32) -> bool {
        cp <= MAX_CODE_POINT
    }

    /// Whether `unit` is a leading surrogate.
    fn is_high_surrogate(&self, unit: u16) -> bool {
        (MIN_HIGH_SURROGATE..=MAX_HIGH_SURROGATE).contains(&unit)
    }

    /// Whether `unit` is a trailing surrogate.
    fn is_low_surrogate(&self, unit: u16) -> bool {
        (MIN_LOW_SURROGATE..=MAX_LOW_SURROGATE).contains(&unit)
    }

    /// Leading surrogate of a supplementary code point.
    fn high_surrogate(&self, cp: u32) -> u16 {
        ((cp >> 10) + (u32::from(MIN_HIGH_SURROGATE) - (MIN_SUPPLEMENTARY_CODE_POINT >> 10)))
            as u16
    }

    /// Trailing surrogate of a supplementary code point.
    fn low_surrogate(&self, cp: u32) -> u16 {
        ((cp & 0x3ff) + u32::from(MIN_LOW_SURROGATE)) as u16
    }

    /// Code point of a surrogate pair.
    fn to_code_point(&self, high: u16, low: u16) -> u32 {
        ((u32::from(high) - u32::from(MIN_HIGH_SURROGATE)) << 10)
            + (u32::from(low) - u32::from(MIN_LOW_SURROGATE))
            + MIN_SUPPLEMENTARY_CODE_POINT
    }

    /// Simple upper-case mapping of one unit.
    fn to_upper_case(&self, unit: u16) -> u16;

    /// Simple lower-case mapping of one unit.
    fn to_lower_case(&self, unit: u16) -> u16;

    /// Value of `unit` as a digit of `radix`.
    fn digit_value(&self, unit: u32, radix: Radix) -> Option<u32>;
}

/// [`CharClass`] backed by `core::char`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdCharClass;

/// Applies a `core::char` case mapping when it yields exactly one
/// basic-plane character.
fn map_single(unit: u16, mut mapping: impl Iterator<Item = char>) -> u16 {
    match (mapping.next(), mapping.next()) {
        (Some(c), None) => u16::try_from(u32::from(c)).unwrap_or(unit),
        _ => unit,
    }
}

impl CharClass for StdCharClass {
    fn to_upper_case(&self, unit: u16) -> u16 {
        if unit < 0x80 {
            return u16::from((unit as u8).to_ascii_uppercase());
        }
        match char::from_u32(u32::from(unit)) {
            Some(c) => map_single(unit, c.to_uppercase()),
            None => unit,
        }
    }

    fn to_lower_case(&self, unit: u16) -> u16 {
        if unit < 0x80 {
            return u16::from((unit as u8).to_ascii_lowercase());
        }
        match char::from_u32(u32::from(unit)) {
            Some(c) => map_single(unit, c.to_lowercase()),
            None => unit,
        }
    }

    fn digit_value(&self, unit: u32, radix: Radix) -> Option<u32> {
        radix::digit(unit, radix)
    }
}

/// Code point starting at `units[index]`, pairing with `units[index + 1]`
/// when both halves are present before `limit`.
pub(crate) fn code_point_at<C: CharClass + ?Sized>(
    class: &C,
    units: &[u16],
    index: usize,
    limit: usize,
) -> u32 {
    let high = units[index];
    if class.is_high_surrogate(high) && index + 1 < limit {
        let low = units[index + 1];
        if class.is_low_surrogate(low) {
            return class.to_code_point(high, low);
        }
    }
    u32::from(high)
}

/// Code point ending just before `units[index]`, pairing with
/// `units[index - 2]` when it is at or after `start`.
pub(crate) fn code_point_before<C: CharClass + ?Sized>(
    class: &C,
    units: &[u16],
    index: usize,
    start: usize,
) -> u32 {
    let low = units[index - 1];
    if class.is_low_surrogate(low) && index > start + 1 {
        let high = units[index - 2];
        if class.is_high_surrogate(high) {
            return class.to_code_point(high, low);
        }
    }
    u32::from(low)
}

/// Number of code points in `units`; an unpaired surrogate counts as one.
pub(crate) fn code_point_count<C: CharClass + ?Sized>(class: &C, units: &[u16]) -> usize {
    let mut n = units.len();
    let mut i = 0;
    while i + 1 < units.len() {
        if class.is_high_surrogate(units[i]) && class.is_low_surrogate(units[i + 1]) {
            n -= 1;
            i += 1;
        }
        i += 1;
    }
    n
}
