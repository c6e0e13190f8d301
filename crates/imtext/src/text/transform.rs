//! Operations that build new texts: concatenation, replacement, splitting
//! and joining, literal or through a [`PatternMatcher`].

use alloc::{string::String, vec, vec::Vec};

use super::{Text, search};
use crate::{
    options::SplitLimit,
    pattern::{self, PatternMatcher},
};

impl Text {
    /// `self` followed by `other`. Concatenating an empty text returns a
    /// clone.
    #[must_use]
    pub fn concat<T: AsRef<[u16]> + ?Sized>(&self, other: &T) -> Text {
        let other = other.as_ref();
        if other.is_empty() {
            return self.clone();
        }
        let mut units = Vec::with_capacity(self.len + other.len());
        units.extend_from_slice(self.as_units());
        units.extend_from_slice(other);
        Text::from_vec(units)
    }

    /// Replaces every `old` unit with `new`. Returns a clone when nothing
    /// changes.
    #[must_use]
    pub fn replace_char(&self, old: u16, new: u16) -> Text {
        if old == new || !self.as_units().contains(&old) {
            return self.clone();
        }
        self.chars()
            .map(|u| if u == old { new } else { u })
            .collect()
    }

    /// Replaces every occurrence of `target`, left to right, with
    /// `replacement`. An empty target matches before every unit and at the
    /// end.
    #[must_use]
    pub fn replace<T, R>(&self, target: &T, replacement: &R) -> Text
    where
        T: AsRef<[u16]> + ?Sized,
        R: AsRef<[u16]> + ?Sized,
    {
        let source = self.as_units();
        let (target, replacement) = (target.as_ref(), replacement.as_ref());
        let mut next = search::index_of(source, target, 0);
        if next.is_none() {
            return self.clone();
        }
        let mut units = Vec::with_capacity(source.len());
        let mut last = 0;
        while let Some(at) = next {
            units.extend_from_slice(&source[last..at]);
            units.extend_from_slice(replacement);
            last = at + target.len();
            if target.is_empty() {
                let Some(&unit) = source.get(at) else {
                    break;
                };
                units.push(unit);
                last += 1;
            }
            next = search::index_of(source, target, last);
        }
        units.extend_from_slice(&source[last..]);
        Text::from_vec(units)
    }

    /// Where the next delimiter starts and ends, searching from `from`.
    fn next_delimiter(&self, delimiter: &[u16], from: usize) -> Option<(usize, usize)> {
        let units = self.as_units();
        match *delimiter {
            [] => (from < units.len()).then_some((from + 1, from + 1)),
            [unit] => units
                .get(from..)?
                .iter()
                .position(|&u| u == unit)
                .map(|p| (from + p, from + p + 1)),
            _ => search::index_of(units, delimiter, from).map(|at| (at, at + delimiter.len())),
        }
    }

    /// Splits around every literal occurrence of `delimiter`.
    ///
    /// The pieces share this text's block. Text without a delimiter comes
    /// back whole. An empty delimiter splits between every unit.
    ///
    /// ```rust
    /// use imtext::{SplitLimit, Text};
    ///
    /// let text = Text::from("boo:and:foo");
    /// let pieces = text.split(&Text::from(":"), SplitLimit::AtMost(2));
    /// assert_eq!(pieces, [Text::from("boo"), Text::from("and:foo")]);
    /// ```
    #[must_use]
    pub fn split<T>(&self, delimiter: &T, limit: SplitLimit) -> Vec<Text>
    where
        T: AsRef<[u16]> + ?Sized,
    {
        let delimiter = delimiter.as_ref();
        let max = limit.max_pieces();
        let mut pieces = Vec::new();
        let mut start = 0;
        while let Some((at, end)) = self.next_delimiter(delimiter, start) {
            if max.is_some_and(|n| pieces.len() + 1 == n) {
                break;
            }
            pieces.push(self.window(start, at));
            start = end;
        }
        if pieces.is_empty() {
            return vec![self.clone()];
        }
        pieces.push(self.window(start, self.len));
        if limit.strips_trailing() {
            while pieces.last().is_some_and(Text::is_empty) {
                pieces.pop();
            }
        }
        pieces
    }

    /// `elements` with `delimiter` between each pair.
    #[must_use]
    pub fn join<D, I>(delimiter: &D, elements: I) -> Text
    where
        D: AsRef<[u16]> + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<[u16]>,
    {
        let delimiter = delimiter.as_ref();
        let mut units = Vec::new();
        for (i, element) in elements.into_iter().enumerate() {
            if i > 0 {
                units.extend_from_slice(delimiter);
            }
            units.extend_from_slice(element.as_ref());
        }
        Text::from_vec(units)
    }

    /// The rendering handed to a pattern engine.
    fn pattern_input(&self) -> String {
        let rendered = self.to_string_lossy();
        if rendered.contains(char::REPLACEMENT_CHARACTER) && !self.contains(&[0xFFFD]) {
            tracing::debug!(
                len = self.len,
                "unpaired surrogate replaced before pattern match"
            );
        }
        rendered
    }

    /// Whether the whole text matches `pattern`.
    #[must_use]
    pub fn matches<P: PatternMatcher + ?Sized>(&self, pattern: &P) -> bool {
        pattern.is_match(&self.pattern_input())
    }

    /// Replaces the first match of `pattern`.
    #[must_use]
    pub fn replace_first<P>(&self, pattern: &P, replacement: &str) -> Text
    where
        P: PatternMatcher + ?Sized,
    {
        Text::from(pattern.replace(&self.pattern_input(), replacement, 1))
    }

    /// Replaces every match of `pattern`.
    #[must_use]
    pub fn replace_all<P: PatternMatcher + ?Sized>(&self, pattern: &P, replacement: &str) -> Text {
        Text::from(pattern.replace(&self.pattern_input(), replacement, 0))
    }

    /// Splits around the matches of `pattern`, with the same `limit` rules
    /// as [`split`](Self::split).
    #[must_use]
    pub fn split_regex<P>(&self, pattern: &P, limit: SplitLimit) -> Vec<Text>
    where
        P: PatternMatcher + ?Sized,
    {
        pattern::split(pattern, &self.pattern_input(), limit)
            .into_iter()
            .map(Text::from)
            .collect()
    }
}
