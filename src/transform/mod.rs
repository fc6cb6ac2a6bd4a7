// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate transformation engine.
//!
//! From one seed, a [`CandidateStream`] yields `4 * W * 16` candidate scalars
//! by walking four nested stages, outermost first:
//!
//! 1. **Invert** (2 passes): after each pass, complement the bit pattern.
//! 2. **Reverse** (2 passes): after each pass, reverse the bit pattern.
//! 3. **Rotate** (W passes): at the start of a pass the pattern is copied as
//!    the hex payload; after the pass the pattern is rotated left by one.
//! 4. **Nibble** (16 passes): emit `1 || payload` as a hex number, then step
//!    every hex digit of the payload to its cyclic successor.
//!
//! The nesting is kept as an explicit state machine rather than loops, so a
//! consumer can stop after any candidate and the stream can be suspended and
//! resumed. Streams hold no shared state: generating twice from the same seed
//! yields the same sequence.
//!
//! # Examples
//!
//! ```
//! use keyspace_explorer::transform::{generate, CANDIDATES_PER_SEED};
//! use num_bigint::{BigInt, BigUint};
//!
//! let mut stream = generate(&BigInt::from(0));
//! assert_eq!(stream.len(), CANDIDATES_PER_SEED);
//! assert_eq!(stream.next(), Some(BigUint::from(1u8) << 72));
//! ```
//!
//! # Limitations
//!
//! Only the low `W` bits of a seed take part. Seeds wider than `W` bits are
//! silently truncated; callers that need the whole seed must check its width
//! before generating.

pub mod bits;
pub mod constants;

pub use bits::step_nibbles;
pub use constants::*;

use num_bigint::{BigInt, BigUint};
use std::iter::FusedIterator;

/// Where in the nested traversal the next candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CandidatePosition {
    pub invert: u32,
    pub reverse: u32,
    pub rotate: u32,
    pub nibble: u32,
}

/// Lazy, finite, ordered stream of candidate scalars for one seed.
#[derive(Debug, Clone)]
pub struct CandidateStream {
    width: u32,
    /// Current bit pattern (advanced by the rotate, reverse and invert stages).
    bits: u128,
    /// Current hex payload (advanced by the nibble stage).
    payload: u128,
    position: CandidatePosition,
    emitted: usize,
}

/// The candidate stream for `seed` at the default width.
pub fn generate(seed: &BigInt) -> CandidateStream {
    CandidateStream::new(seed)
}

impl CandidateStream {
    pub fn new(seed: &BigInt) -> Self {
        Self::with_width(seed, BIT_WIDTH)
    }

    /// Build a stream over `width`-bit patterns.
    ///
    /// # Panics
    ///
    /// Panics unless `width` is a multiple of 4 in `4..=124`.
    pub fn with_width(seed: &BigInt, width: u32) -> Self {
        assert!(
            width >= 4 && width <= MAX_BIT_WIDTH && width % 4 == 0,
            "unsupported transformation width {}",
            width
        );
        let bits = bits::low_bits(seed, width);
        Self {
            width,
            bits,
            payload: bits,
            position: CandidatePosition::default(),
            emitted: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Total number of candidates the stream produces from the start.
    pub fn total(&self) -> usize {
        candidates_for_width(self.width)
    }

    /// Number of candidates already produced.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Stage counters of the next candidate.
    pub fn stage(&self) -> CandidatePosition {
        self.position
    }

    /// The current bit pattern, as a binary string of `width` characters.
    pub fn bit_string(&self) -> String {
        format!("{:0width$b}", self.bits, width = self.width as usize)
    }

    fn is_finished(&self) -> bool {
        self.position.invert >= INVERT_PASSES
    }

    /// Advance the state machine past the candidate just emitted.
    fn advance(&mut self) {
        let width = self.width;
        let pos = &mut self.position;

        pos.nibble += 1;
        if pos.nibble < NIBBLE_STEPS {
            self.payload = bits::step_nibbles(self.payload, width);
            return;
        }
        pos.nibble = 0;

        self.bits = bits::rotate_left(self.bits, width);
        pos.rotate += 1;
        if pos.rotate == width {
            pos.rotate = 0;
            self.bits = bits::reverse(self.bits, width);
            pos.reverse += 1;
            if pos.reverse == REVERSE_PASSES {
                pos.reverse = 0;
                self.bits = bits::invert(self.bits, width);
                pos.invert += 1;
            }
        }
        self.payload = self.bits;
    }
}

impl Iterator for CandidateStream {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        if self.is_finished() {
            return None;
        }
        let candidate = (LEADING_NIBBLE << self.width) | self.payload;
        self.advance();
        self.emitted += 1;
        Some(BigUint::from(candidate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.emitted;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CandidateStream {}

impl FusedIterator for CandidateStream {}
