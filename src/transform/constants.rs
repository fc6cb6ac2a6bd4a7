// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for the candidate transformation.
//!
//! The width `BIT_WIDTH` is fixed; every seed is reinterpreted as a
//! `BIT_WIDTH`-bit pattern regardless of the keyspace it came from.

/// Number of bits taken from each seed.
pub const BIT_WIDTH: u32 = 72;

/// Number of hex digits in a payload (`BIT_WIDTH / 4`).
pub const HEX_WIDTH: u32 = BIT_WIDTH / 4;

/// Nibble prepended to every payload, so candidates lie in `[16^H, 2 * 16^H)`.
pub const LEADING_NIBBLE: u128 = 1;

/// Passes of the outermost (complement) stage.
pub const INVERT_PASSES: u32 = 2;

/// Passes of the reversal stage.
pub const REVERSE_PASSES: u32 = 2;

/// Passes of the innermost stage; one full cycle of the hex alphabet.
pub const NIBBLE_STEPS: u32 = 16;

/// Widest supported payload: the leading nibble must still fit in a `u128`.
pub const MAX_BIT_WIDTH: u32 = 124;

/// Length of the candidate stream for a given width.
pub const fn candidates_for_width(width: u32) -> usize {
    (INVERT_PASSES * REVERSE_PASSES * width * NIBBLE_STEPS) as usize
}

/// Length of every default-width candidate stream (4608).
pub const CANDIDATES_PER_SEED: usize = candidates_for_width(BIT_WIDTH);
