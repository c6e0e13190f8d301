/// How [`Text::region_matches`](crate::Text::region_matches) and friends
/// compare code units.
///
/// # Examples
///
/// ```rust
/// use imtext::{CaseSensitivity, Text};
///
/// let a = Text::from("Straße");
/// let b = Text::from("STRAßE");
/// assert!(!a.region_matches(CaseSensitivity::Sensitive, 0, &b, 0, 6));
/// assert!(a.region_matches(CaseSensitivity::Insensitive, 0, &b, 0, 6));
/// ```
///
/// # Default
///
/// `Sensitive`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    /// Units must be identical.
    #[default]
    Sensitive,
    /// Units match when their upper-case forms are equal, or failing that
    /// when the lower-case forms of those upper-case forms are equal.
    ///
    /// The second comparison exists for scripts such as Georgian whose
    /// case pairs do not round-trip through upper case. It is a best-effort
    /// one-unit mapping, not Unicode case folding.
    Insensitive,
}

impl CaseSensitivity {
    /// `Insensitive` when `ignore_case` is set.
    #[must_use]
    pub fn ignoring_case(ignore_case: bool) -> Self {
        if ignore_case {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }
}

/// How many pieces [`Text::split`](crate::Text::split) may produce and
/// what happens to trailing empty pieces.
///
/// # Default
///
/// `StripTrailing`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SplitLimit {
    /// Split at every delimiter, then drop empty pieces from the end.
    #[default]
    StripTrailing,
    /// Split at every delimiter and keep every piece.
    Unlimited,
    /// Produce at most this many pieces; the last one holds the unsplit
    /// remainder. Trailing empty pieces are kept. `0` behaves like
    /// `StripTrailing`.
    AtMost(usize),
}

impl SplitLimit {
    /// Maps a signed limit the conventional way: positive caps the count,
    /// zero strips trailing empties, negative keeps everything.
    #[must_use]
    pub fn from_signed(limit: i32) -> Self {
        match limit {
            0 => Self::StripTrailing,
            n if n < 0 => Self::Unlimited,
            n => Self::AtMost(n.unsigned_abs() as usize),
        }
    }

    pub(crate) fn max_pieces(self) -> Option<usize> {
        match self {
            Self::AtMost(n) if n > 0 => Some(n),
            _ => None,
        }
    }

    pub(crate) fn strips_trailing(self) -> bool {
        matches!(self, Self::StripTrailing | Self::AtMost(0))
    }
}
