//! The immutable UTF-16 text value.
//!
//! A [`Text`] is a window (`offset`, `len`) onto a reference-counted block
//! of code units. The block is never written after construction, so
//! slicing shares it instead of copying, and any number of threads can
//! read the same block at once. Constructors that take a borrowed slice
//! always copy it.
//!
//! Two coordinate systems are in play. Plain `usize` indices count code
//! units; [`CodePointIndex`] counts code points, where a surrogate pair is
//! one code point and an unpaired surrogate is one as well. Conversions go
//! through [`Text::unit_index`] and [`Text::code_point_index`].

pub mod search;
mod transform;

use alloc::{string::String, sync::Arc, vec::Vec};
use core::{
    cmp::Ordering,
    fmt::{self, Write as _},
    hash::{Hash, Hasher},
    sync::atomic::{AtomicI32, Ordering as AtomicOrdering},
};

use crate::{
    CaseSensitivity,
    chars::{self, CharClass, StdCharClass},
    charset::{self, Charset},
    error::TextError,
    int::{format, parse::IntSource},
};

/// A position measured in code points rather than code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointIndex(pub usize);

impl From<usize> for CodePointIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// An immutable sequence of UTF-16 code units.
///
/// Equality, ordering and [`Hash`] look only at the units, never at how
/// they are stored.
///
/// ```rust
/// use imtext::Text;
///
/// let text = Text::from("hello, world");
/// let world = text.substring(7).unwrap();
/// assert_eq!(world, "world");
/// assert!(world.shares_buffer(&text));
/// assert_eq!(text.index_of(&Text::from("o"), 5), Some(8));
/// ```
pub struct Text {
    buf: Arc<[u16]>,
    offset: usize,
    len: usize,
    /// `0` until first computed. A text whose hash really is zero just
    /// recomputes it.
    hash: AtomicI32,
}

/// Orders two texts by [`Text::compare_to_ignore_case`].
pub const CASE_INSENSITIVE_ORDER: fn(&Text, &Text) -> Ordering = case_insensitive_order;

fn case_insensitive_order(a: &Text, b: &Text) -> Ordering {
    a.compare_to_ignore_case(b).cmp(&0)
}

fn fold_hash(units: &[u16]) -> i32 {
    units
        .iter()
        .fold(0, |h: i32, &u| h.wrapping_mul(31).wrapping_add(i32::from(u)))
}

impl Text {
    /// The empty text.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    fn from_vec(units: Vec<u16>) -> Self {
        let len = units.len();
        Self {
            buf: Arc::from(units),
            offset: 0,
            len,
            hash: AtomicI32::new(0),
        }
    }

    /// A view of `begin..end` of this text's block. The caller has
    /// already checked the range.
    fn window(&self, begin: usize, end: usize) -> Self {
        Self {
            buf: Arc::clone(&self.buf),
            offset: self.offset + begin,
            len: end - begin,
            hash: AtomicI32::new(0),
        }
    }

    /// Copies `units`.
    #[must_use]
    pub fn from_units(units: &[u16]) -> Self {
        Self::from_vec(units.to_vec())
    }

    /// Copies `count` units of `units` starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when the range runs past the end of
    /// `units`.
    pub fn from_units_range(
        units: &[u16],
        offset: usize,
        count: usize,
    ) -> Result<Self, TextError> {
        offset
            .checked_add(count)
            .and_then(|end| units.get(offset..end))
            .map(Self::from_units)
            .ok_or_else(|| TextError::range(offset, offset.saturating_add(count), units.len()))
    }

    /// Builds a text from code points, writing each supplementary code
    /// point as a surrogate pair. Surrogate values pass through as single
    /// units.
    ///
    /// # Errors
    ///
    /// [`TextError::InvalidCodePoint`] for a value above `U+10FFFF`.
    pub fn from_code_points(code_points: &[u32]) -> Result<Self, TextError> {
        let class = StdCharClass;
        let mut n = 0;
        for &cp in code_points {
            if class.is_bmp_code_point(cp) {
                n += 1;
            } else if class.is_valid_code_point(cp) {
                n += 2;
            } else {
                return Err(TextError::InvalidCodePoint(cp));
            }
        }
        let mut units = Vec::with_capacity(n);
        for &cp in code_points {
            match u16::try_from(cp) {
                Ok(unit) => units.push(unit),
                Err(_) => {
                    units.push(class.high_surrogate(cp));
                    units.push(class.low_surrogate(cp));
                }
            }
        }
        Ok(Self::from_vec(units))
    }

    /// [`from_code_points`](Self::from_code_points) over `count` code
    /// points of `code_points` starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when the range runs past the end of
    /// `code_points`, checked before any code point is validated.
    pub fn from_code_points_range(
        code_points: &[u32],
        offset: usize,
        count: usize,
    ) -> Result<Self, TextError> {
        let end = offset.saturating_add(count);
        let range = code_points
            .get(offset..end)
            .ok_or_else(|| TextError::range(offset, end, code_points.len()))?;
        Self::from_code_points(range)
    }

    /// Decodes `bytes` with `charset`. Malformed input becomes U+FFFD.
    #[must_use]
    pub fn from_bytes<C: Charset + ?Sized>(bytes: &[u8], charset: &C) -> Self {
        Self::from_vec(charset.decode(bytes))
    }

    /// Decodes `bytes` with the charset registered as `charset_name`.
    ///
    /// # Errors
    ///
    /// [`TextError::UnsupportedCharset`] for an unknown name.
    pub fn from_bytes_named(bytes: &[u8], charset_name: &str) -> Result<Self, TextError> {
        Ok(Self::from_bytes(bytes, charset::for_name(charset_name)?))
    }

    /// Builds each unit from `hibyte` as the high byte and one byte of
    /// `ascii` as the low byte.
    #[must_use]
    pub fn from_ascii_hibyte(ascii: &[u8], hibyte: u8) -> Self {
        let high = u16::from(hibyte) << 8;
        Self::from_vec(ascii.iter().map(|&b| high | u16::from(b)).collect())
    }

    /// Decimal rendering of `value`.
    #[must_use]
    pub fn value_of(value: i32) -> Self {
        Self::from_vec(format::format_radix(value, 10).units().collect())
    }

    /// Number of code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code units.
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Whether `self` and `other` are windows onto the same block.
    #[must_use]
    pub fn shares_buffer(&self, other: &Text) -> bool {
        Arc::ptr_eq(&self.buf, &other.buf)
    }

    fn index_error(&self, index: usize) -> TextError {
        TextError::index(index, self.len)
    }

    /// The code unit at `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `index >= len()`.
    pub fn char_at(&self, index: usize) -> Result<u16, TextError> {
        self.as_units()
            .get(index)
            .copied()
            .ok_or_else(|| self.index_error(index))
    }

    /// The code point starting at `index`. A leading surrogate followed by
    /// a trailing one yields the pair's code point; any other surrogate
    /// yields its own value.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `index >= len()`.
    pub fn code_point_at(&self, index: usize) -> Result<u32, TextError> {
        self.code_point_at_with(&StdCharClass, index)
    }

    /// [`code_point_at`](Self::code_point_at) with surrogates recognized by
    /// `class`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `index >= len()`.
    pub fn code_point_at_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        index: usize,
    ) -> Result<u32, TextError> {
        if index >= self.len {
            return Err(self.index_error(index));
        }
        Ok(chars::code_point_at(class, self.as_units(), index, self.len))
    }

    /// The code point ending just before `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] unless `1 <= index <= len()`.
    pub fn code_point_before(&self, index: usize) -> Result<u32, TextError> {
        self.code_point_before_with(&StdCharClass, index)
    }

    /// [`code_point_before`](Self::code_point_before) with surrogates
    /// recognized by `class`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] unless `1 <= index <= len()`.
    pub fn code_point_before_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        index: usize,
    ) -> Result<u32, TextError> {
        if index == 0 || index > self.len {
            return Err(self.index_error(index));
        }
        Ok(chars::code_point_before(class, self.as_units(), index, 0))
    }

    /// Number of code points in the unit range `begin..end`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] for a reversed or overlong range.
    pub fn code_point_count(&self, begin: usize, end: usize) -> Result<usize, TextError> {
        TextError::check_range(begin, end, self.len)?;
        Ok(chars::code_point_count(
            &StdCharClass,
            &self.as_units()[begin..end],
        ))
    }

    /// Steps forward `count` code points from unit index `from`.
    fn advance(&self, from: usize, count: usize) -> Option<usize> {
        let class = StdCharClass;
        let units = self.as_units();
        let mut x = from;
        for _ in 0..count {
            if x >= units.len() {
                return None;
            }
            let unit = units[x];
            x += 1;
            if class.is_high_surrogate(unit) && x < units.len() && class.is_low_surrogate(units[x])
            {
                x += 1;
            }
        }
        Some(x)
    }

    /// Steps backward `count` code points from unit index `from`.
    fn retreat(&self, from: usize, count: usize) -> Option<usize> {
        let class = StdCharClass;
        let units = self.as_units();
        let mut x = from;
        for _ in 0..count {
            x = x.checked_sub(1)?;
            if class.is_low_surrogate(units[x]) && x > 0 && class.is_high_surrogate(units[x - 1]) {
                x -= 1;
            }
        }
        Some(x)
    }

    /// The unit index `code_point_offset` code points away from `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `index > len()` or the walk runs
    /// off either end.
    pub fn offset_by_code_points(
        &self,
        index: usize,
        code_point_offset: isize,
    ) -> Result<usize, TextError> {
        if index > self.len {
            return Err(self.index_error(index));
        }
        let count = code_point_offset.unsigned_abs();
        let moved = if code_point_offset >= 0 {
            self.advance(index, count)
        } else {
            self.retreat(index, count)
        };
        moved.ok_or_else(|| self.index_error(index))
    }

    /// Unit index where code point number `index` starts. `index` may equal
    /// the code point count, giving `len()`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] past the last code point.
    pub fn unit_index(&self, index: CodePointIndex) -> Result<usize, TextError> {
        self.advance(0, index.0)
            .ok_or_else(|| self.index_error(index.0))
    }

    /// Number of code points before unit index `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `index > len()`.
    pub fn code_point_index(&self, index: usize) -> Result<CodePointIndex, TextError> {
        self.code_point_count(0, index).map(CodePointIndex)
    }

    /// The code point at code-point position `index`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] past the last code point.
    pub fn nth_code_point(&self, index: CodePointIndex) -> Result<u32, TextError> {
        self.code_point_at(self.unit_index(index)?)
    }

    /// Copies units `src_begin..src_end` into `dst` starting at
    /// `dst_begin`.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] for a bad source range, or when
    /// `dst` is too short.
    pub fn get_chars(
        &self,
        src_begin: usize,
        src_end: usize,
        dst: &mut [u16],
        dst_begin: usize,
    ) -> Result<(), TextError> {
        TextError::check_range(src_begin, src_end, self.len)?;
        let dst_end = dst_begin.saturating_add(src_end - src_begin);
        let length = dst.len();
        let target = dst
            .get_mut(dst_begin..dst_end)
            .ok_or_else(|| TextError::range(dst_begin, dst_end, length))?;
        target.copy_from_slice(&self.as_units()[src_begin..src_end]);
        Ok(())
    }

    /// Copies the low byte of units `src_begin..src_end` into `dst`
    /// starting at `dst_begin`. The inverse of
    /// [`from_ascii_hibyte`](Self::from_ascii_hibyte) for a zero high byte.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] for a bad source range, or when
    /// `dst` is too short.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_low_bytes(
        &self,
        src_begin: usize,
        src_end: usize,
        dst: &mut [u8],
        dst_begin: usize,
    ) -> Result<(), TextError> {
        TextError::check_range(src_begin, src_end, self.len)?;
        let dst_end = dst_begin.saturating_add(src_end - src_begin);
        let length = dst.len();
        let target = dst
            .get_mut(dst_begin..dst_end)
            .ok_or_else(|| TextError::range(dst_begin, dst_end, length))?;
        for (byte, &unit) in target.iter_mut().zip(&self.as_units()[src_begin..src_end]) {
            *byte = unit as u8;
        }
        Ok(())
    }

    /// Units from `begin` to the end.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] when `begin > len()`.
    pub fn substring(&self, begin: usize) -> Result<Self, TextError> {
        self.substring_range(begin, self.len)
    }

    /// Units `begin..end`, sharing this text's block. The full range gives
    /// back a clone.
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] for a reversed or overlong range.
    pub fn substring_range(&self, begin: usize, end: usize) -> Result<Self, TextError> {
        TextError::check_range(begin, end, self.len)?;
        if begin == 0 && end == self.len {
            return Ok(self.clone());
        }
        Ok(self.window(begin, end))
    }

    /// Same as [`substring_range`](Self::substring_range).
    ///
    /// # Errors
    ///
    /// [`TextError::IndexOutOfRange`] for a reversed or overlong range.
    pub fn sub_sequence(&self, begin: usize, end: usize) -> Result<Self, TextError> {
        self.substring_range(begin, end)
    }

    /// Panics if the window or the cached hash is inconsistent.
    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        assert!(
            self.offset + self.len <= self.buf.len(),
            "window {}+{} past block of {}",
            self.offset,
            self.len,
            self.buf.len()
        );
        let cached = self.hash.load(AtomicOrdering::Relaxed);
        if cached != 0 {
            assert_eq!(cached, fold_hash(self.as_units()), "stale cached hash");
        }
    }

    /// `31 * h + unit` folded over the units with wrapping arithmetic.
    /// Computed on first call and cached.
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        let cached = self.hash.load(AtomicOrdering::Relaxed);
        if cached != 0 || self.len == 0 {
            return cached;
        }
        let h = fold_hash(self.as_units());
        self.hash.store(h, AtomicOrdering::Relaxed);
        h
    }

    /// Difference of the first differing units, or of the lengths when
    /// one text is a prefix of the other.
    #[must_use]
    pub fn compare_to(&self, other: &Text) -> i32 {
        search::compare(self.as_units(), other.as_units())
    }

    /// [`compare_to`](Self::compare_to) after simple case mapping of each
    /// differing pair.
    #[must_use]
    pub fn compare_to_ignore_case(&self, other: &Text) -> i32 {
        self.compare_to_ignore_case_with(&StdCharClass, other)
    }

    /// [`compare_to_ignore_case`](Self::compare_to_ignore_case) with the
    /// case mapping of `class`.
    #[must_use]
    pub fn compare_to_ignore_case_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        other: &Text,
    ) -> i32 {
        search::compare_ignore_case(class, self.as_units(), other.as_units())
    }

    /// Same length, and every unit pair equal up to simple case mapping.
    #[must_use]
    pub fn equals_ignore_case(&self, other: &Text) -> bool {
        self.equals_ignore_case_with(&StdCharClass, other)
    }

    /// [`equals_ignore_case`](Self::equals_ignore_case) with the case
    /// mapping of `class`.
    #[must_use]
    pub fn equals_ignore_case_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        other: &Text,
    ) -> bool {
        self.len == other.len
            && self.region_matches_with(
                class,
                CaseSensitivity::Insensitive,
                0,
                other,
                0,
                self.len,
            )
    }

    /// Whether the units equal those of `other`. Compare with a `&str`
    /// through `==`.
    #[must_use]
    pub fn content_equals<T: AsRef<[u16]> + ?Sized>(&self, other: &T) -> bool {
        self.as_units() == other.as_ref()
    }

    /// First index at or after `from` where `target` occurs.
    #[must_use]
    pub fn index_of<T: AsRef<[u16]> + ?Sized>(&self, target: &T, from: usize) -> Option<usize> {
        search::index_of(self.as_units(), target.as_ref(), from)
    }

    /// Last index at or before `from` where `target` occurs. Pass `len()`
    /// to search the whole text.
    #[must_use]
    pub fn last_index_of<T: AsRef<[u16]> + ?Sized>(
        &self,
        target: &T,
        from: usize,
    ) -> Option<usize> {
        search::last_index_of(self.as_units(), target.as_ref(), from)
    }

    /// First index at or after `from` holding `code_point`.
    #[must_use]
    pub fn index_of_char(&self, code_point: u32, from: usize) -> Option<usize> {
        self.index_of_char_with(&StdCharClass, code_point, from)
    }

    /// [`index_of_char`](Self::index_of_char) with surrogate pairs built by
    /// `class`.
    #[must_use]
    pub fn index_of_char_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        code_point: u32,
        from: usize,
    ) -> Option<usize> {
        search::index_of_code_point(class, self.as_units(), code_point, from)
    }

    /// Last index at or before `from` holding `code_point`.
    #[must_use]
    pub fn last_index_of_char(&self, code_point: u32, from: usize) -> Option<usize> {
        self.last_index_of_char_with(&StdCharClass, code_point, from)
    }

    /// [`last_index_of_char`](Self::last_index_of_char) with surrogate
    /// pairs built by `class`.
    #[must_use]
    pub fn last_index_of_char_with<C: CharClass + ?Sized>(
        &self,
        class: &C,
        code_point: u32,
        from: usize,
    ) -> Option<usize> {
        search::last_index_of_code_point(class, self.as_units(), code_point, from)
    }

    /// Whether `target` occurs anywhere.
    #[must_use]
    pub fn contains<T: AsRef<[u16]> + ?Sized>(&self, target: &T) -> bool {
        self.index_of(target, 0).is_some()
    }

    /// Whether `len` units at `this_offset` match `len` units of `other`
    /// at `other_offset`. Regions that do not fit are `false`.
    #[must_use]
    pub fn region_matches<T: AsRef<[u16]> + ?Sized>(
        &self,
        case: CaseSensitivity,
        this_offset: usize,
        other: &T,
        other_offset: usize,
        len: usize,
    ) -> bool {
        self.region_matches_with(&StdCharClass, case, this_offset, other, other_offset, len)
    }

    /// [`region_matches`](Self::region_matches) with the case mapping of
    /// `class`.
    #[must_use]
    pub fn region_matches_with<C: CharClass + ?Sized, T: AsRef<[u16]> + ?Sized>(
        &self,
        class: &C,
        case: CaseSensitivity,
        this_offset: usize,
        other: &T,
        other_offset: usize,
        len: usize,
    ) -> bool {
        search::region_matches(
            class,
            case,
            self.as_units(),
            this_offset,
            other.as_ref(),
            other_offset,
            len,
        )
    }

    /// Whether the text begins with `prefix`.
    #[must_use]
    pub fn starts_with<T: AsRef<[u16]> + ?Sized>(&self, prefix: &T) -> bool {
        self.starts_with_at(prefix, 0)
    }

    /// Whether `prefix` occurs at `offset`.
    #[must_use]
    pub fn starts_with_at<T: AsRef<[u16]> + ?Sized>(&self, prefix: &T, offset: usize) -> bool {
        search::starts_with(self.as_units(), prefix.as_ref(), offset)
    }

    /// Whether the text ends with `suffix`.
    #[must_use]
    pub fn ends_with<T: AsRef<[u16]> + ?Sized>(&self, suffix: &T) -> bool {
        search::ends_with(self.as_units(), suffix.as_ref())
    }

    /// The code units in order.
    pub fn chars(&self) -> impl DoubleEndedIterator<Item = u16> + ExactSizeIterator + '_ {
        self.as_units().iter().copied()
    }

    /// The code points in order. Unpaired surrogates come through as their
    /// own values.
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        char::decode_utf16(self.chars())
            .map(|r| r.map_or_else(|e| u32::from(e.unpaired_surrogate()), u32::from))
    }

    /// UTF-8 rendering with U+FFFD for unpaired surrogates.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }

    /// Encodes with `charset`. Unmappable characters become `?`.
    #[must_use]
    pub fn get_bytes<C: Charset + ?Sized>(&self, charset: &C) -> Vec<u8> {
        charset.encode(self.as_units())
    }

    /// Encodes with the charset registered as `charset_name`.
    ///
    /// # Errors
    ///
    /// [`TextError::UnsupportedCharset`] for an unknown name.
    pub fn get_bytes_named(&self, charset_name: &str) -> Result<Vec<u8>, TextError> {
        Ok(self.get_bytes(charset::for_name(charset_name)?))
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Text {
    fn clone(&self) -> Self {
        Self {
            buf: Arc::clone(&self.buf),
            offset: self.offset,
            len: self.len,
            hash: AtomicI32::new(self.hash.load(AtomicOrdering::Relaxed)),
        }
    }
}

impl AsRef<[u16]> for Text {
    fn as_ref(&self) -> &[u16] {
        self.as_units()
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::from_vec(s.encode_utf16().collect())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&[u16]> for Text {
    fn from(units: &[u16]) -> Self {
        Self::from_units(units)
    }
}

impl From<Vec<u16>> for Text {
    fn from(units: Vec<u16>) -> Self {
        Self::from_vec(units)
    }
}

impl From<i32> for Text {
    fn from(value: i32) -> Self {
        Self::value_of(value)
    }
}

impl FromIterator<u16> for Text {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        (self.shares_buffer(other) && self.offset == other.offset)
            || self.as_units() == other.as_units()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_units().hash(state);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.chars()) {
            f.write_char(c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl IntSource for Text {
    fn unit_len(&self) -> usize {
        self.len
    }

    fn unit_at(&self, index: usize) -> u32 {
        u32::from(self.as_units()[index])
    }

    fn render(&self) -> String {
        self.to_string_lossy()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Text {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Text {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <String as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use rstest::rstest;

    use super::*;
    use crate::Bounds;

    fn t(s: &str) -> Text {
        Text::from(s)
    }

    const SMILE: [u16; 2] = [0xD83D, 0xDE00];

    #[test]
    fn construction_copies_and_checks_bounds() {
        let units = [0x61, 0x62, 0x63, 0x64];
        assert_eq!(Text::from_units_range(&units, 1, 2).unwrap(), "bc");
        assert_eq!(Text::from_units_range(&units, 4, 0).unwrap(), "");
        assert_eq!(
            Text::from_units_range(&units, 3, 2),
            Err(TextError::range(3, 5, 4))
        );
        assert!(Text::from_units_range(&units, usize::MAX, 2).is_err());
        assert!(Text::new().is_empty());
        assert_eq!(Text::default(), "");
    }

    #[test]
    fn code_points_expand_to_pairs() {
        let text = Text::from_code_points(&[0x61, 0x1F600, 0xDC00]).unwrap();
        assert_eq!(text.as_units(), [0x61, 0xD83D, 0xDE00, 0xDC00]);
        assert_eq!(
            Text::from_code_points(&[0x11_0000]),
            Err(TextError::InvalidCodePoint(0x11_0000))
        );
        assert_eq!(
            text.code_points().collect::<Vec<_>>(),
            [0x61, 0x1F600, 0xDC00]
        );
    }

    #[test]
    fn code_point_ranges_check_bounds_first() {
        let cps = [0x61, 0x1F600, 0x11_0000, 0x62];
        assert_eq!(
            Text::from_code_points_range(&cps, 0, 2).unwrap().as_units(),
            [0x61, SMILE[0], SMILE[1]]
        );
        assert_eq!(Text::from_code_points_range(&cps, 3, 1).unwrap(), "b");
        assert_eq!(Text::from_code_points_range(&cps, 4, 0).unwrap(), "");
        assert_eq!(
            Text::from_code_points_range(&cps, 1, 2),
            Err(TextError::InvalidCodePoint(0x11_0000))
        );
        assert_eq!(
            Text::from_code_points_range(&cps, 2, 3),
            Err(TextError::range(2, 5, 4))
        );
        assert!(Text::from_code_points_range(&cps, usize::MAX, 1).is_err());
    }

    #[test]
    fn low_bytes_copy_out() {
        let text = Text::from_units(&[0x41, 0x0142, 0xE9, 0x44]);
        let mut dst = [0u8; 5];
        text.get_low_bytes(0, 4, &mut dst, 1).unwrap();
        assert_eq!(dst, [0, 0x41, 0x42, 0xE9, 0x44]);
        assert_eq!(
            text.get_low_bytes(0, 4, &mut dst, 2),
            Err(TextError::range(2, 6, 5))
        );
        assert_eq!(
            text.get_low_bytes(3, 2, &mut dst, 0),
            Err(TextError::IndexOutOfRange {
                at: Bounds::Range { begin: 3, end: 2 },
                length: 4
            })
        );
        let mut back = [0u8; 2];
        Text::from_ascii_hibyte(b"hi", 0)
            .get_low_bytes(0, 2, &mut back, 0)
            .unwrap();
        assert_eq!(&back, b"hi");
    }

    /// Case mapping for ASCII letters only.
    struct AsciiCase;

    impl CharClass for AsciiCase {
        fn to_upper_case(&self, unit: u16) -> u16 {
            u8::try_from(unit).map_or(unit, |b| u16::from(b.to_ascii_uppercase()))
        }

        fn to_lower_case(&self, unit: u16) -> u16 {
            u8::try_from(unit).map_or(unit, |b| u16::from(b.to_ascii_lowercase()))
        }

        fn digit_value(&self, unit: u32, radix: crate::Radix) -> Option<u32> {
            crate::radix::digit(unit, radix)
        }
    }

    #[test]
    fn case_operations_take_any_char_class() {
        let upper = t("ÉCOLE");
        let lower = t("école");
        assert!(upper.equals_ignore_case(&lower));
        assert!(!upper.equals_ignore_case_with(&AsciiCase, &lower));
        assert!(t("ECOLE").equals_ignore_case_with(&AsciiCase, &t("ecole")));

        assert_eq!(upper.compare_to_ignore_case(&lower), 0);
        assert_ne!(upper.compare_to_ignore_case_with(&AsciiCase, &lower), 0);

        let insensitive = CaseSensitivity::Insensitive;
        assert!(upper.region_matches_with(&AsciiCase, insensitive, 1, &lower, 1, 4));
        assert!(!upper.region_matches_with(&AsciiCase, insensitive, 0, &lower, 0, 5));
    }

    #[test]
    fn code_point_operations_take_any_char_class() {
        let text = Text::from_units(&[0x61, SMILE[0], SMILE[1], 0x61]);
        assert_eq!(text.code_point_at_with(&AsciiCase, 1), Ok(0x1F600));
        assert_eq!(text.code_point_before_with(&AsciiCase, 3), Ok(0x1F600));
        assert_eq!(text.index_of_char_with(&AsciiCase, 0x1F600, 0), Some(1));
        assert_eq!(text.last_index_of_char_with(&AsciiCase, 0x61, 4), Some(3));
        assert!(text.code_point_at_with(&AsciiCase, 4).is_err());
    }

    #[test]
    fn ascii_hibyte() {
        let text = Text::from_ascii_hibyte(b"AB", 0x01);
        assert_eq!(text.as_units(), [0x0141, 0x0142]);
        assert_eq!(Text::from_ascii_hibyte(b"AB", 0), "AB");
    }

    #[test]
    fn unit_and_code_point_access() {
        let text = Text::from_units(&[0x61, SMILE[0], SMILE[1], 0x62]);
        assert_eq!(text.char_at(1), Ok(0xD83D));
        assert_eq!(
            text.char_at(4),
            Err(TextError::IndexOutOfRange {
                at: Bounds::Index(4),
                length: 4
            })
        );
        assert_eq!(text.code_point_at(1), Ok(0x1F600));
        assert_eq!(text.code_point_at(2), Ok(0xDE00));
        assert_eq!(text.code_point_before(3), Ok(0x1F600));
        assert!(text.code_point_before(0).is_err());
        assert_eq!(text.code_point_count(0, 4), Ok(3));
        assert_eq!(text.code_point_count(2, 4), Ok(2));
        assert!(text.code_point_count(3, 2).is_err());
    }

    #[test]
    fn code_point_window_stops_at_slice_edge() {
        let text = Text::from_units(&[0x61, SMILE[0], SMILE[1]]);
        let head = text.substring_range(0, 2).unwrap();
        assert_eq!(head.code_point_at(1), Ok(0xD83D));
        let tail = text.substring(2).unwrap();
        assert_eq!(tail.code_point_before(1), Ok(0xDE00));
    }

    #[rstest]
    #[case(0, 1, Some(1))]
    #[case(0, 2, Some(3))]
    #[case(0, 3, Some(4))]
    #[case(0, 4, None)]
    #[case(4, -1, Some(3))]
    #[case(3, -1, Some(1))]
    #[case(4, -3, Some(0))]
    #[case(4, -4, None)]
    #[case(1, 0, Some(1))]
    #[case(5, 0, None)]
    fn offsets_by_code_points(
        #[case] index: usize,
        #[case] by: isize,
        #[case] expected: Option<usize>,
    ) {
        let text = Text::from_units(&[0x61, SMILE[0], SMILE[1], 0x62]);
        assert_eq!(text.offset_by_code_points(index, by).ok(), expected);
    }

    #[test]
    fn code_point_coordinates() {
        let text = Text::from_units(&[0x61, SMILE[0], SMILE[1], 0x62]);
        assert_eq!(text.unit_index(CodePointIndex(2)), Ok(3));
        assert_eq!(text.unit_index(CodePointIndex(3)), Ok(4));
        assert!(text.unit_index(CodePointIndex(4)).is_err());
        assert_eq!(text.code_point_index(3), Ok(CodePointIndex(2)));
        assert_eq!(text.nth_code_point(CodePointIndex(1)), Ok(0x1F600));
        assert!(text.nth_code_point(CodePointIndex(3)).is_err());
    }

    #[test]
    fn get_chars_copies_into_destination() {
        let text = t("hello");
        let mut dst = [0u16; 4];
        text.get_chars(1, 4, &mut dst, 1).unwrap();
        assert_eq!(dst, [0, 0x65, 0x6C, 0x6C]);
        assert_eq!(
            text.get_chars(0, 4, &mut dst, 1),
            Err(TextError::range(1, 5, 4))
        );
        assert!(text.get_chars(4, 6, &mut dst, 0).is_err());
    }

    #[test]
    fn full_substring_shares_storage() {
        let text = t("hello");
        let same = text.substring_range(0, 5).unwrap();
        assert_eq!(same, text);
        assert!(same.shares_buffer(&text));

        let inner = text.substring_range(1, 4).unwrap();
        assert_eq!(inner, "ell");
        assert!(inner.shares_buffer(&text));
        assert_eq!(inner.substring(1).unwrap(), "ll");
        assert_eq!(text.substring(5).unwrap(), "");
        assert_eq!(
            text.substring_range(2, 1),
            Err(TextError::IndexOutOfRange {
                at: Bounds::Range { begin: 2, end: 1 },
                length: 5
            })
        );
        assert!(text.sub_sequence(0, 6).is_err());
    }

    #[test]
    fn hash_matches_fold_and_is_cached() {
        assert_eq!(t("").hash_code(), 0);
        assert_eq!(t("a").hash_code(), 97);
        assert_eq!(t("ab").hash_code(), 97 * 31 + 98);
        assert_eq!(t("hello").hash_code(), 99_162_322);
        let long = t("the quick brown fox jumps over the lazy dog");
        let h = long.hash_code();
        assert_eq!(long.hash_code(), h);
        assert_eq!(long.clone().hash_code(), h);
        // A window hashes its own units, not its block's.
        let window = t("xhello").substring(1).unwrap();
        assert_eq!(window.hash_code(), t("hello").hash_code());
        window.assert_invariants();
    }

    #[test]
    fn structural_equality_and_order() {
        let a = t("apple");
        let b = t("xapple").substring(1).unwrap();
        assert_eq!(a, b);
        assert_ne!(t("app"), a);
        assert_eq!(t("apple").compare_to(&t("apply")), i32::from(b'e') - i32::from(b'y'));
        assert_eq!(t("app").compare_to(&t("apple")), -2);
        assert_eq!(a.cmp(&t("b")), Ordering::Less);
        let mut v = vec![t("b"), t("A"), t("a")];
        v.sort();
        assert_eq!(v, [t("A"), t("a"), t("b")]);
        v.sort_by(CASE_INSENSITIVE_ORDER);
        assert!(v[0].equals_ignore_case(&v[1]));
    }

    #[test]
    fn case_insensitive_comparisons() {
        assert!(t("MÜNCHEN").equals_ignore_case(&t("münchen")));
        assert!(!t("MÜNCHEN").equals_ignore_case(&t("münche")));
        assert_eq!(t("ABC").compare_to_ignore_case(&t("abd")), -1);
        assert_eq!(t("abc").compare_to_ignore_case(&t("ABC")), 0);
        assert!(t("hello").content_equals(&[0x68, 0x65, 0x6C, 0x6C, 0x6F]));
    }

    #[test]
    fn searches_through_windows() {
        let text = t("__abcabc").substring(2).unwrap();
        assert_eq!(text.index_of(&t("bc"), 2), Some(4));
        assert_eq!(text.index_of(&t(""), 0), Some(0));
        assert_eq!(text.last_index_of(&t("abc"), text.len()), Some(3));
        assert_eq!(text.index_of_char(u32::from(b'c'), 3), Some(5));
        assert_eq!(text.last_index_of_char(u32::from(b'a'), 2), Some(0));
        assert!(text.contains(&t("ca")));
        assert!(text.starts_with(&t("abc")));
        assert!(text.starts_with_at(&t("cab"), 2));
        assert!(text.ends_with(&t("bc")));
        assert!(!text.ends_with(&t("_abcabc")));
    }

    #[test]
    fn renders_and_encodes() {
        let text = Text::from_units(&[0x68, 0x69, 0xD800]);
        assert_eq!(text.to_string_lossy(), "hi\u{FFFD}");
        assert_eq!(format!("{text}"), "hi\u{FFFD}");
        assert_eq!(format!("{:?}", t("a\"b")), r#""a\"b""#);
        assert_eq!(text.get_bytes(&charset::Utf8), b"hi?");
        assert_eq!(t("é").get_bytes_named("latin1").unwrap(), [0xE9]);
        assert!(t("x").get_bytes_named("klingon").is_err());
        assert_eq!(
            Text::from_bytes_named(&[0xE9], "ISO-8859-1").unwrap(),
            "é"
        );
    }

    #[test]
    fn integers_render_as_text() {
        assert_eq!(Text::value_of(-42), "-42");
        assert_eq!(Text::from(i32::MIN), "-2147483648");
        assert_eq!(crate::int::parse_int(&t("-2147483648"), 10), Ok(i32::MIN));
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Text>();

        let text = t("shared");
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let text = text.clone();
                std::thread::spawn(move || text.hash_code())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), text.hash_code());
        }
    }
}
