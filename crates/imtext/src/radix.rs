//! Digit symbols shared by the integer formatter and parser.
//!
//! [`DIGITS`] maps a digit value to its lower-case ASCII symbol and
//! [`digit`] maps a symbol back to its value. The two-digit tables
//! [`DIGIT_TENS`] and [`DIGIT_ONES`] let the decimal formatter emit a pair
//! of digits per division by 100.

/// Smallest radix accepted by the codec.
pub const MIN_RADIX: u32 = 2;
/// Largest radix accepted by the codec.
pub const MAX_RADIX: u32 = 36;

/// Digit symbols for every value a radix-36 digit can take.
pub const DIGITS: [u8; 36] = *b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Tens digit of every value in `0..100`.
pub const DIGIT_TENS: [u8; 100] = {
    let mut table = [0u8; 100];
    let mut i = 0;
    while i < 100 {
        table[i] = b'0' + (i / 10) as u8;
        i += 1;
    }
    table
};

/// Ones digit of every value in `0..100`.
pub const DIGIT_ONES: [u8; 100] = {
    let mut table = [0u8; 100];
    let mut i = 0;
    while i < 100 {
        table[i] = b'0' + (i % 10) as u8;
        i += 1;
    }
    table
};

const NO_DIGIT: u8 = u8::MAX;

/// Inverse of [`DIGITS`] over ASCII, accepting both letter cases.
const DIGIT_VALUES: [u8; 128] = {
    let mut table = [NO_DIGIT; 128];
    let mut i = 0;
    while i < 36 {
        let sym = DIGITS[i];
        table[sym as usize] = i as u8;
        if sym.is_ascii_lowercase() {
            table[sym.to_ascii_uppercase() as usize] = i as u8;
        }
        i += 1;
    }
    table
};

/// A radix known to lie in `MIN_RADIX..=MAX_RADIX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Radix(u32);

impl Radix {
    /// Radix 2.
    pub const BINARY: Radix = Radix(2);
    /// Radix 8.
    pub const OCTAL: Radix = Radix(8);
    /// Radix 10.
    pub const DECIMAL: Radix = Radix(10);
    /// Radix 16.
    pub const HEX: Radix = Radix(16);

    /// Returns `None` when `radix` is outside `2..=36`.
    #[must_use]
    pub const fn new(radix: u32) -> Option<Self> {
        if radix < MIN_RADIX || radix > MAX_RADIX {
            None
        } else {
            Some(Radix(radix))
        }
    }

    /// The formatter's policy: anything outside `2..=36` becomes 10.
    #[must_use]
    pub const fn or_decimal(radix: u32) -> Self {
        match Self::new(radix) {
            Some(r) => r,
            None => Self::DECIMAL,
        }
    }

    /// The numeric value of this radix.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<Radix> for u32 {
    fn from(radix: Radix) -> Self {
        radix.0
    }
}

/// Value of the symbol `unit` in `radix`, or `None` if it is not a digit
/// of that radix.
#[inline]
#[must_use]
pub fn digit(unit: u32, radix: Radix) -> Option<u32> {
    let value = *DIGIT_VALUES.get(usize::try_from(unit).ok()?)?;
    if value == NO_DIGIT || u32::from(value) >= radix.get() {
        None
    } else {
        Some(u32::from(value))
    }
}

/// Symbol for `value`, which must be below 36.
#[inline]
pub(crate) fn symbol(value: u32) -> u8 {
    DIGITS[value as usize]
}
