// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pixel <-> value mapping for a [`Viewport`].
//!
//! Every value is recomputed from `start` and `end` directly; nothing is
//! accumulated between calls, so repeated lookups cannot drift.
//!
//! Pixels are clamped into `[0, canvas_width]`. The right edge is included so
//! that `value_at(canvas_width)` is the end of the viewport.

use super::Viewport;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

/// Round to the nearest integer, ties towards positive infinity.
pub fn round_half_up(value: &BigRational) -> BigInt {
    (value + BigRational::new(1.into(), 2.into()))
        .floor()
        .to_integer()
}

/// A labelled tick along the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleMarker {
    pub pixel: i64,
    pub value: BigInt,
}

impl ScaleMarker {
    /// Hex label, shortened to six digits and `..` when longer than eight.
    pub fn label(&self) -> String {
        let hex = format!("{:x}", self.value);
        if hex.len() > 8 {
            format!("{}..", &hex[..6])
        } else {
            hex
        }
    }
}

impl Viewport {
    pub fn clamp_pixel(&self, pixel: i64) -> i64 {
        pixel.clamp(0, i64::from(self.canvas_width))
    }

    /// Position of `pixel` across the canvas as an exact fraction in `[0, 1]`.
    pub fn fraction(&self, pixel: i64) -> BigRational {
        BigRational::new(self.clamp_pixel(pixel).into(), self.canvas_width.into())
    }

    /// The unrounded value under `pixel`.
    pub fn exact_value_at(&self, pixel: i64) -> BigRational {
        &self.start + self.fraction(pixel) * self.span()
    }

    /// The integer under `pixel`: rounded half up, then clamped into the range.
    pub fn value_at(&self, pixel: i64) -> BigInt {
        self.range.clamp(round_half_up(&self.exact_value_at(pixel)))
    }

    /// The pixel nearest to `value`, clamped onto the canvas.
    pub fn pixel_of(&self, value: &BigInt) -> i64 {
        let width = i64::from(self.canvas_width);
        let offset = BigRational::from_integer(value.clone()) - &self.start;
        let scaled = offset / self.span() * BigRational::from_integer(width.into());
        let pixel = round_half_up(&scaled);
        if pixel.is_negative() {
            0
        } else {
            pixel.to_i64().map_or(width, |p| p.min(width))
        }
    }

    /// `count + 1` evenly spaced ticks from the left edge to the right edge.
    ///
    /// Tick values are truncated towards zero rather than rounded.
    pub fn scale_markers(&self, count: u32) -> Vec<ScaleMarker> {
        if count == 0 {
            return Vec::new();
        }
        let span = self.span();
        (0..=count)
            .map(|i| {
                let pixel = u64::from(i) * u64::from(self.canvas_width) / u64::from(count);
                let position = BigRational::new(i.into(), count.into());
                let value = (&self.start + position * &span).to_integer();
                ScaleMarker {
                    pixel: pixel as i64,
                    value,
                }
            })
            .collect()
    }
}
