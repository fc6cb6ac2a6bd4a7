// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-width bit and nibble operations.
//!
//! A pattern of `width` bits is held in the low bits of a `u128`; the most
//! significant of those bits is the first character of its binary string.
//! All functions expect `width` to be a multiple of 4 in `4..=124` and
//! their input to be already masked to `width` bits.

use num_bigint::BigInt;
use num_traits::Signed;

/// All-ones mask covering `width` bits.
pub fn width_mask(width: u32) -> u128 {
    (1u128 << width) - 1
}

/// The low `width` bits of `seed`, in two's complement for negative seeds.
///
/// Wider seeds are truncated, not rejected.
pub fn low_bits(seed: &BigInt, width: u32) -> u128 {
    let fill = if seed.is_negative() { 0xff } else { 0x00 };
    let mut buf = [fill; 16];
    for (dst, src) in buf.iter_mut().zip(seed.to_signed_bytes_le()) {
        *dst = src;
    }
    u128::from_le_bytes(buf) & width_mask(width)
}

/// Move the leading bit to the end.
pub fn rotate_left(bits: u128, width: u32) -> u128 {
    ((bits << 1) | (bits >> (width - 1))) & width_mask(width)
}

/// Reverse the bit order.
pub fn reverse(bits: u128, width: u32) -> u128 {
    bits.reverse_bits() >> (128 - width)
}

/// Complement every bit.
pub fn invert(bits: u128, width: u32) -> u128 {
    !bits & width_mask(width)
}

/// Repeat nibble `n` across `width / 4` digits.
fn nibble_pattern(n: u128, width: u32) -> u128 {
    (0..width / 4).fold(0, |acc, _| (acc << 4) | n)
}

/// Replace every hex digit `d` by `(d + 1) mod 16`, with no carries between digits.
///
/// The low three bits of each digit are incremented (they never overflow
/// into the next digit), and the top bit is then toggled back in.
pub fn step_nibbles(hex: u128, width: u32) -> u128 {
    let high = hex & nibble_pattern(0x8, width);
    let low = hex & nibble_pattern(0x7, width);
    (low + nibble_pattern(0x1, width)) ^ high
}
