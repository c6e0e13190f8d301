//! Bit-level operations on the 32-bit two's-complement pattern.
//!
//! These are the branch-light formulations rather than calls into the
//! `core` intrinsics; the tests check them against the intrinsics.

#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

/// Number of zero bits above the highest one bit; 32 for `0`.
#[must_use]
pub const fn leading_zeros(i: i32) -> u32 {
    if i == 0 {
        return 32;
    }
    let mut i = i as u32;
    let mut n = 1;
    if i >> 16 == 0 {
        n += 16;
        i <<= 16;
    }
    if i >> 24 == 0 {
        n += 8;
        i <<= 8;
    }
    if i >> 28 == 0 {
        n += 4;
        i <<= 4;
    }
    if i >> 30 == 0 {
        n += 2;
        i <<= 2;
    }
    n - (i >> 31)
}

/// Number of zero bits below the lowest one bit; 32 for `0`.
#[must_use]
pub const fn trailing_zeros(i: i32) -> u32 {
    if i == 0 {
        return 32;
    }
    let mut i = i as u32;
    let mut n = 31;
    let mut y = i << 16;
    if y != 0 {
        n -= 16;
        i = y;
    }
    y = i << 8;
    if y != 0 {
        n -= 8;
        i = y;
    }
    y = i << 4;
    if y != 0 {
        n -= 4;
        i = y;
    }
    y = i << 2;
    if y != 0 {
        n -= 2;
        i = y;
    }
    n - ((i << 1) >> 31)
}

/// Population count.
#[must_use]
pub const fn bit_count(i: i32) -> u32 {
    let mut i = i as u32;
    i = i - ((i >> 1) & 0x5555_5555);
    i = (i & 0x3333_3333) + ((i >> 2) & 0x3333_3333);
    i = (i + (i >> 4)) & 0x0f0f_0f0f;
    i += i >> 8;
    i += i >> 16;
    i & 0x3f
}

/// Rotates left by `distance`, which may be negative or at least 32; only
/// its low five bits matter.
#[must_use]
pub const fn rotate_left(i: i32, distance: i32) -> i32 {
    let u = i as u32;
    (u.wrapping_shl(distance as u32) | u.wrapping_shr(distance.wrapping_neg() as u32)) as i32
}

/// Rotates right by `distance`; see [`rotate_left`].
#[must_use]
pub const fn rotate_right(i: i32, distance: i32) -> i32 {
    let u = i as u32;
    (u.wrapping_shr(distance as u32) | u.wrapping_shl(distance.wrapping_neg() as u32)) as i32
}

/// Reverses the order of all 32 bits.
#[must_use]
pub const fn reverse(i: i32) -> i32 {
    let mut i = i as u32;
    i = (i & 0x5555_5555) << 1 | (i >> 1) & 0x5555_5555;
    i = (i & 0x3333_3333) << 2 | (i >> 2) & 0x3333_3333;
    i = (i & 0x0f0f_0f0f) << 4 | (i >> 4) & 0x0f0f_0f0f;
    reverse_bytes(i as i32)
}

/// Reverses the order of the four bytes.
#[must_use]
pub const fn reverse_bytes(i: i32) -> i32 {
    let i = i as u32;
    ((i >> 24) | ((i >> 8) & 0xff00) | ((i << 8) & 0x00ff_0000) | (i << 24)) as i32
}

/// `-1`, `0` or `1` according to the sign of `i`.
#[must_use]
pub const fn signum(i: i32) -> i32 {
    (i >> 31) | ((i.wrapping_neg() as u32) >> 31) as i32
}

/// `i` with every bit cleared except its highest one bit.
#[must_use]
pub const fn highest_one_bit(i: i32) -> i32 {
    let mut i = i as u32;
    i |= i >> 1;
    i |= i >> 2;
    i |= i >> 4;
    i |= i >> 8;
    i |= i >> 16;
    (i - (i >> 1)) as i32
}

/// `i` with every bit cleared except its lowest one bit.
#[must_use]
pub const fn lowest_one_bit(i: i32) -> i32 {
    i & i.wrapping_neg()
}
