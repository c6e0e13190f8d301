//! Pattern matching over [`Text`](crate::Text).
//!
//! Patterns run over the lossy UTF-8 rendering of a text: an unpaired
//! surrogate is seen as U+FFFD. The crate ships [`RegexMatcher`] behind the
//! `regex` feature; any other engine can be plugged in through
//! [`PatternMatcher`].

use alloc::{string::String, vec, vec::Vec};
use core::ops::Range;

use crate::options::SplitLimit;

/// A compiled pattern.
pub trait PatternMatcher {
    /// Whether the whole of `input` matches.
    fn is_match(&self, input: &str) -> bool;

    /// Byte ranges of successive non-overlapping matches, left to right.
    fn find_ranges(&self, input: &str) -> Vec<Range<usize>>;

    /// Replaces the first `limit` matches, or every match when `limit` is
    /// zero. Group references in `replacement` follow the engine's syntax.
    fn replace(&self, input: &str, replacement: &str, limit: usize) -> String;
}

/// Splits `input` around the matches of `matcher`.
///
/// A zero-width match at the very start never produces a leading empty
/// piece. Input without any match comes back as a single piece.
pub fn split<'h, P: PatternMatcher + ?Sized>(
    matcher: &P,
    input: &'h str,
    limit: SplitLimit,
) -> Vec<&'h str> {
    let max = limit.max_pieces();
    let mut pieces = Vec::new();
    let mut start = 0;
    for found in matcher.find_ranges(input) {
        if found.end == 0 {
            continue;
        }
        if max.is_some_and(|n| pieces.len() + 1 == n) {
            break;
        }
        pieces.push(&input[start..found.start]);
        start = found.end;
    }
    if pieces.is_empty() {
        return vec![input];
    }
    pieces.push(&input[start..]);
    if limit.strips_trailing() {
        while pieces.last().is_some_and(|p| p.is_empty()) {
            pieces.pop();
        }
    }
    pieces
}

#[cfg(feature = "regex")]
pub use self::regex_matcher::RegexMatcher;

#[cfg(feature = "regex")]
mod regex_matcher {
    use alloc::{
        format,
        string::{String, ToString},
        vec::Vec,
    };
    use core::ops::Range;

    use regex::Regex;

    use super::PatternMatcher;
    use crate::error::TextError;

    /// [`PatternMatcher`] backed by the `regex` crate.
    #[derive(Debug, Clone)]
    pub struct RegexMatcher {
        find: Regex,
        whole: Regex,
    }

    impl RegexMatcher {
        /// Compiles `pattern`.
        ///
        /// # Errors
        ///
        /// [`TextError::Pattern`] when the pattern does not compile.
        pub fn new(pattern: &str) -> Result<Self, TextError> {
            let compile = |source: &str| {
                Regex::new(source).map_err(|e| {
                    tracing::debug!(pattern, error = %e, "pattern rejected");
                    TextError::Pattern(e.to_string())
                })
            };
            Ok(Self {
                find: compile(pattern)?,
                whole: compile(&format!(r"\A(?:{pattern})\z"))?,
            })
        }

        /// The pattern as written.
        #[must_use]
        pub fn as_str(&self) -> &str {
            self.find.as_str()
        }
    }

    impl PatternMatcher for RegexMatcher {
        fn is_match(&self, input: &str) -> bool {
            self.whole.is_match(input)
        }

        fn find_ranges(&self, input: &str) -> Vec<Range<usize>> {
            self.find.find_iter(input).map(|m| m.range()).collect()
        }

        fn replace(&self, input: &str, replacement: &str, limit: usize) -> String {
            self.find.replacen(input, limit, replacement).into_owned()
        }
    }
}
