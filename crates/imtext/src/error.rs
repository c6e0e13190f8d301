use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Errors produced while parsing an integer from text.
///
/// Formatting never fails: an out-of-range radix handed to a formatter is
/// silently replaced by 10. Parsing is strict and reports it as
/// [`ParseIntError::InvalidRadix`]. Keep the two policies apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIntError {
    /// The radix is outside `2..=36`.
    #[error("radix {0} out of range [2, 36]")]
    InvalidRadix(u32),
    /// The input had no characters at all.
    #[error("empty input")]
    EmptyInput,
    /// A stray sign, a digit outside the radix alphabet, or a signed
    /// overflow.
    #[error("for input string: \"{input}\"")]
    MalformedInput {
        /// The rejected input, lossily rendered.
        input: String,
    },
    /// An unsigned parse saw a leading `-`.
    #[error("illegal leading minus sign on unsigned string \"{input}\"")]
    IllegalSign {
        /// The rejected input, lossily rendered.
        input: String,
    },
    /// An unsigned value does not fit in 32 bits.
    #[error("string value \"{input}\" exceeds range of unsigned int")]
    RangeExceeded {
        /// The rejected input, lossily rendered.
        input: String,
    },
}

impl ParseIntError {
    pub(crate) fn malformed(input: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.into(),
        }
    }
}

/// The coordinates a [`TextError::IndexOutOfRange`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// A single code-unit index.
    Index(usize),
    /// A `begin..end` range, reversed or running past the end.
    Range {
        /// Start of the requested range.
        begin: usize,
        /// End of the requested range.
        end: usize,
    },
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Range { begin, end } => write!(f, "range {begin}..{end}"),
        }
    }
}

/// Errors produced by [`Text`](crate::Text) construction and access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    /// An access or slice outside the valid coordinates.
    #[error("{at} out of range for length {length}")]
    IndexOutOfRange {
        /// The offending index or range.
        at: Bounds,
        /// The length of the text or slice that was indexed.
        length: usize,
    },
    /// A value above `U+10FFFF`.
    #[error("invalid code point 0x{0:X}")]
    InvalidCodePoint(u32),
    /// No charset is registered under the given name.
    #[error("unsupported charset \"{0}\"")]
    UnsupportedCharset(String),
    /// The pattern collaborator rejected a pattern.
    #[error("pattern error: {0}")]
    Pattern(String),
}

impl TextError {
    pub(crate) const fn index(index: usize, length: usize) -> Self {
        Self::IndexOutOfRange {
            at: Bounds::Index(index),
            length,
        }
    }

    pub(crate) const fn range(begin: usize, end: usize, length: usize) -> Self {
        Self::IndexOutOfRange {
            at: Bounds::Range { begin, end },
            length,
        }
    }

    pub(crate) fn check_range(begin: usize, end: usize, length: usize) -> Result<(), Self> {
        if begin > end || end > length {
            return Err(Self::range(begin, end, length));
        }
        Ok(())
    }
}
