//! Searching and matching over raw code-unit slices.
//!
//! Every function here works on plain `&[u16]` windows and code-unit
//! indices; [`Text`](super::Text) hands in its own window. Absence is
//! `None`, never an error.
//!
//! The substring search is a first-unit skip search: find the next
//! occurrence of the target's first unit, then verify the rest unit by
//! unit, resuming one past the candidate on a mismatch. Worst case is
//! `O(n * m)`; in practice most positions are rejected by the first
//! comparison. [`last_index_of`] is the mirror image, anchored on the
//! target's last unit.

#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use crate::{CaseSensitivity, chars::CharClass};

/// First index at or after `from` where `target` occurs in `source`.
///
/// An empty target matches at `from`, or at `source.len()` when `from` is
/// past the end.
#[must_use]
pub fn index_of(source: &[u16], target: &[u16], from: usize) -> Option<usize> {
    let source_count = source.len();
    let target_count = target.len();
    if from >= source_count {
        return (target_count == 0).then_some(source_count);
    }
    if target_count == 0 {
        return Some(from);
    }
    if target_count > source_count {
        return None;
    }

    let first = target[0];
    let max = source_count - target_count;
    let mut i = from;
    while i <= max {
        if source[i] != first {
            i += 1;
            while i <= max && source[i] != first {
                i += 1;
            }
        }

        if i <= max {
            let mut j = i + 1;
            let end = j + target_count - 1;
            let mut k = 1;
            while j < end && source[j] == target[k] {
                j += 1;
                k += 1;
            }
            if j == end {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Last index at or before `from` where `target` occurs in `source`.
///
/// `from` is clamped to the last position a match could start at. An
/// empty target matches at the clamped `from`.
#[must_use]
pub fn last_index_of(source: &[u16], target: &[u16], from: usize) -> Option<usize> {
    let target_count = target.len();
    let right_index = source.len().checked_sub(target_count)?;
    let from = from.min(right_index);
    if target_count == 0 {
        return Some(from);
    }

    let str_last_index = target_count - 1;
    let str_last_unit = target[str_last_index];
    // Signed: `start` below may reach -1 for a match at index 0.
    let min = str_last_index as isize;
    let mut i = min + from as isize;

    'search_for_last_unit: loop {
        while i >= min && source[i as usize] != str_last_unit {
            i -= 1;
        }
        if i < min {
            return None;
        }
        let mut j = i - 1;
        let start = j - (target_count as isize - 1);
        let mut k = str_last_index as isize - 1;

        while j > start {
            if source[j as usize] != target[k as usize] {
                i -= 1;
                continue 'search_for_last_unit;
            }
            j -= 1;
            k -= 1;
        }
        return Some((start + 1) as usize);
    }
}

/// First index at or after `from` holding `code_point`. Supplementary code
/// points are matched as a surrogate pair.
#[must_use]
pub fn index_of_code_point<C: CharClass + ?Sized>(
    class: &C,
    source: &[u16],
    code_point: u32,
    from: usize,
) -> Option<usize> {
    if from >= source.len() {
        return None;
    }
    if class.is_bmp_code_point(code_point) {
        let unit = u16::try_from(code_point).ok()?;
        return source[from..]
            .iter()
            .position(|&u| u == unit)
            .map(|p| p + from);
    }
    if !class.is_valid_code_point(code_point) {
        return None;
    }
    let (hi, lo) = (
        class.high_surrogate(code_point),
        class.low_surrogate(code_point),
    );
    source[from..]
        .windows(2)
        .position(|w| w[0] == hi && w[1] == lo)
        .map(|p| p + from)
}

/// Last index at or before `from` holding `code_point`.
#[must_use]
pub fn last_index_of_code_point<C: CharClass + ?Sized>(
    class: &C,
    source: &[u16],
    code_point: u32,
    from: usize,
) -> Option<usize> {
    if class.is_bmp_code_point(code_point) {
        let unit = u16::try_from(code_point).ok()?;
        let end = from.saturating_add(1).min(source.len());
        return source[..end].iter().rposition(|&u| u == unit);
    }
    if !class.is_valid_code_point(code_point) {
        return None;
    }
    let (hi, lo) = (
        class.high_surrogate(code_point),
        class.low_surrogate(code_point),
    );
    let end = from.saturating_add(2).min(source.len());
    source[..end]
        .windows(2)
        .rposition(|w| w[0] == hi && w[1] == lo)
}

/// Whether `len` units of `this` starting at `this_offset` match `len`
/// units of `other` starting at `other_offset`.
///
/// A region that does not fit inside either slice is simply `false`.
#[must_use]
pub fn region_matches<C: CharClass + ?Sized>(
    class: &C,
    case: CaseSensitivity,
    this: &[u16],
    this_offset: usize,
    other: &[u16],
    other_offset: usize,
    len: usize,
) -> bool {
    let fits = |offset: usize, units: &[u16]| {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= units.len())
    };
    if !fits(this_offset, this) || !fits(other_offset, other) {
        return false;
    }

    let ta = &this[this_offset..this_offset + len];
    let pa = &other[other_offset..other_offset + len];
    ta.iter().zip(pa).all(|(&c1, &c2)| {
        if c1 == c2 {
            return true;
        }
        if case == CaseSensitivity::Sensitive {
            return false;
        }
        let u1 = class.to_upper_case(c1);
        let u2 = class.to_upper_case(c2);
        // Upper case alone is not enough for every script; compare the
        // lower case of the upper case as well.
        u1 == u2 || class.to_lower_case(u1) == class.to_lower_case(u2)
    })
}

/// Whether `prefix` occurs in `source` at `offset`.
#[must_use]
pub fn starts_with(source: &[u16], prefix: &[u16], offset: usize) -> bool {
    offset
        .checked_add(prefix.len())
        .and_then(|end| source.get(offset..end))
        .is_some_and(|region| region == prefix)
}

/// Whether `source` ends with `suffix`.
#[must_use]
pub fn ends_with(source: &[u16], suffix: &[u16]) -> bool {
    source
        .len()
        .checked_sub(suffix.len())
        .is_some_and(|offset| starts_with(source, suffix, offset))
}

/// Case-insensitive three-way comparison by unit, then by length.
///
/// Each differing pair is compared first by upper case, then by the lower
/// case of that, and the result is the difference of the final forms.
pub(crate) fn compare_ignore_case<C: CharClass + ?Sized>(
    class: &C,
    a: &[u16],
    b: &[u16],
) -> i32 {
    for (&c1, &c2) in a.iter().zip(b) {
        if c1 == c2 {
            continue;
        }
        let (u1, u2) = (class.to_upper_case(c1), class.to_upper_case(c2));
        if u1 == u2 {
            continue;
        }
        let (l1, l2) = (class.to_lower_case(u1), class.to_lower_case(u2));
        if l1 != l2 {
            return i32::from(l1) - i32::from(l2);
        }
    }
    length_difference(a.len(), b.len())
}

/// Case-sensitive three-way comparison by unit, then by length.
pub(crate) fn compare(a: &[u16], b: &[u16]) -> i32 {
    a.iter()
        .zip(b)
        .find(|(c1, c2)| c1 != c2)
        .map_or_else(
            || length_difference(a.len(), b.len()),
            |(&c1, &c2)| i32::from(c1) - i32::from(c2),
        )
}

fn length_difference(a: usize, b: usize) -> i32 {
    // Buffers are far below i32::MAX units in practice; saturate anyway.
    let a = i64::try_from(a).unwrap_or(i64::MAX);
    let b = i64::try_from(b).unwrap_or(i64::MAX);
    i32::try_from(a - b).unwrap_or(if a > b { i32::MAX } else { i32::MIN })
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck::QuickCheck;
    use rstest::rstest;

    use super::*;
    use crate::chars::StdCharClass;

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[rstest]
    #[case("abcabc", "bc", 0, Some(1))]
    #[case("abcabc", "bc", 2, Some(4))]
    #[case("abcabc", "bc", 5, None)]
    #[case("abcabc", "", 0, Some(0))]
    #[case("abcabc", "", 3, Some(3))]
    #[case("abcabc", "", 6, Some(6))]
    #[case("abcabc", "", 99, Some(6))]
    #[case("abcabc", "x", 99, None)]
    #[case("", "", 0, Some(0))]
    #[case("", "a", 0, None)]
    #[case("aaab", "aab", 0, Some(1))]
    #[case("ab", "abc", 0, None)]
    #[case("abcabc", "abcabc", 0, Some(0))]
    fn forward(
        #[case] source: &str,
        #[case] target: &str,
        #[case] from: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(index_of(&u(source), &u(target), from), expected);
    }

    #[rstest]
    #[case("abcabc", "bc", 6, Some(4))]
    #[case("abcabc", "bc", 3, Some(1))]
    #[case("abcabc", "bc", 0, None)]
    #[case("abcabc", "abc", 99, Some(3))]
    #[case("abcabc", "", 99, Some(6))]
    #[case("abcabc", "", 2, Some(2))]
    #[case("aaab", "aab", 9, Some(1))]
    #[case("ab", "abc", 9, None)]
    #[case("a", "a", 0, Some(0))]
    fn backward(
        #[case] source: &str,
        #[case] target: &str,
        #[case] from: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(last_index_of(&u(source), &u(target), from), expected);
    }

    #[test]
    fn code_points() {
        let c = StdCharClass;
        let s = u("a😀b😀");
        assert_eq!(index_of_code_point(&c, &s, 0x1F600, 0), Some(1));
        assert_eq!(index_of_code_point(&c, &s, 0x1F600, 2), Some(4));
        assert_eq!(last_index_of_code_point(&c, &s, 0x1F600, 99), Some(4));
        assert_eq!(last_index_of_code_point(&c, &s, 0x1F600, 3), Some(1));
        assert_eq!(index_of_code_point(&c, &s, u32::from('b'), 0), Some(3));
        assert_eq!(last_index_of_code_point(&c, &s, u32::from('a'), 0), Some(0));
        assert_eq!(index_of_code_point(&c, &s, 0x11_0000, 0), None);
        assert_eq!(index_of_code_point(&c, &s, u32::from('a'), 9), None);
    }

    #[rstest]
    #[case(CaseSensitivity::Sensitive, "Hello", 0, "hello", 0, 5, false)]
    #[case(CaseSensitivity::Insensitive, "Hello", 0, "hello", 0, 5, true)]
    #[case(CaseSensitivity::Insensitive, "MÜNCHEN", 0, "münchen", 0, 7, true)]
    #[case(CaseSensitivity::Sensitive, "xabc", 1, "abcx", 0, 3, true)]
    #[case(CaseSensitivity::Sensitive, "abc", 1, "abc", 0, 3, false)]
    #[case(CaseSensitivity::Sensitive, "abc", 0, "abc", 4, 0, false)]
    #[case(CaseSensitivity::Sensitive, "abc", 3, "abc", 3, 0, true)]
    #[case(CaseSensitivity::Sensitive, "abc", usize::MAX, "abc", 0, 1, false)]
    #[case(CaseSensitivity::Insensitive, "\u{212A}", 0, "k", 0, 1, true)]
    #[case(CaseSensitivity::Insensitive, "\u{212A}", 0, "K", 0, 1, true)]
    #[case(CaseSensitivity::Sensitive, "\u{212A}", 0, "K", 0, 1, false)]
    fn regions(
        #[case] case: CaseSensitivity,
        #[case] this: &str,
        #[case] this_offset: usize,
        #[case] other: &str,
        #[case] other_offset: usize,
        #[case] len: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(
            region_matches(
                &StdCharClass,
                case,
                &u(this),
                this_offset,
                &u(other),
                other_offset,
                len
            ),
            expected
        );
    }

    #[test]
    fn kelvin_needs_lower_case_fallback() {
        let c = StdCharClass;
        // Upper case keeps them apart ...
        assert_ne!(c.to_upper_case(0x212A), c.to_upper_case(u16::from(b'k')));
        // ... lower case of upper case brings them together.
        assert_eq!(
            c.to_lower_case(c.to_upper_case(0x212A)),
            c.to_lower_case(c.to_upper_case(u16::from(b'k')))
        );
    }

    #[test]
    fn anchors() {
        let s = u("prefix-body-suffix");
        assert!(starts_with(&s, &u("prefix"), 0));
        assert!(starts_with(&s, &u("body"), 7));
        assert!(!starts_with(&s, &u("body"), 99));
        assert!(starts_with(&s, &u(""), 18));
        assert!(!starts_with(&s, &u(""), 19));
        assert!(ends_with(&s, &u("suffix")));
        assert!(ends_with(&s, &u("")));
        assert!(!ends_with(&u("fix"), &u("suffix")));
    }

    #[test]
    fn comparisons() {
        assert_eq!(compare(&u("apple"), &u("apricot")), i32::from(b'p') - i32::from(b'r'));
        assert_eq!(compare(&u("app"), &u("apple")), -2);
        assert_eq!(compare(&u("same"), &u("same")), 0);
        assert_eq!(compare_ignore_case(&StdCharClass, &u("HELLO"), &u("hello")), 0);
        assert!(compare_ignore_case(&StdCharClass, &u("a"), &u("B")) < 0);
    }

    #[test]
    fn searches_agree_quickcheck() {
        // Small alphabet so matches are frequent.
        fn prop(source: Vec<u8>, target: Vec<u8>) -> bool {
            let source: Vec<u16> = source.iter().map(|b| u16::from(b % 3)).collect();
            let target: Vec<u16> = target.iter().take(3).map(|b| u16::from(b % 3)).collect();

            let naive: Vec<usize> = (0..=source.len())
                .filter(|&i| source[i..].starts_with(&target))
                .collect();
            let first = index_of(&source, &target, 0);
            let last = last_index_of(&source, &target, source.len());
            first == naive.first().copied() && last == naive.last().copied()
        }

        #[cfg(not(miri))]
        let tests = if is_ci::cached() { 10_000 } else { 1_000 };
        #[cfg(miri)]
        let tests = 10;

        QuickCheck::new()
            .tests(tests)
            .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
    }
}
