// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Precision viewport over the keyspace.
//!
//! The visible interval `[start, end]` is tracked as exact rationals, so pan
//! and zoom can be repeated indefinitely without drift. The keyspace is far
//! wider than an `f64` mantissa, and at full zoom-out adjacent integers still
//! have to resolve to distinct values.
//!
//! Invariants, maintained by every operation:
//! - `low <= start <= end <= high`
//! - `end - start >= 1`
//!
//! Boundary violations are corrected by translation, never by clamping each
//! end independently, so pan never changes the span.
//!
//! # Examples
//!
//! ```
//! use keyspace_explorer::keyspace::ExactRange;
//! use keyspace_explorer::viewport::Viewport;
//!
//! let mut viewport = Viewport::new(ExactRange::default(), 800).unwrap();
//! let before = viewport.value_at(200);
//! viewport.zoom_in(200);
//! assert_eq!(viewport.value_at(200), before);
//! ```

pub mod info;
pub mod mapper;

pub use info::ZoomInfo;
pub use mapper::{round_half_up, ScaleMarker};

use crate::keyspace::ExactRange;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};
use thiserror::Error;
use tracing::{debug, trace};

/// Wheel zoom-in step (`0.8` as an exact ratio).
pub const ZOOM_IN_RATIO: (i64, i64) = (4, 5);

/// Wheel zoom-out step (`1.25` as an exact ratio).
pub const ZOOM_OUT_RATIO: (i64, i64) = (5, 4);

/// Exact zoom-in factor for one wheel step.
pub fn zoom_in_factor() -> BigRational {
    BigRational::new(ZOOM_IN_RATIO.0.into(), ZOOM_IN_RATIO.1.into())
}

/// Exact zoom-out factor for one wheel step.
pub fn zoom_out_factor() -> BigRational {
    BigRational::new(ZOOM_OUT_RATIO.0.into(), ZOOM_OUT_RATIO.1.into())
}

/// Errors raised when a viewport cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewportError {
    /// The range is narrower than one unit, so `end - start >= 1` cannot hold.
    #[error("range {0} spans less than one unit")]
    EmptySpan(ExactRange),

    #[error("canvas width must be at least one pixel")]
    ZeroWidth,
}

/// The visible sub-interval of a keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    range: ExactRange,
    canvas_width: u32,
    start: BigRational,
    end: BigRational,
}

impl Viewport {
    /// Create a viewport showing the whole of `range` across `canvas_width` pixels.
    pub fn new(range: ExactRange, canvas_width: u32) -> Result<Self, ViewportError> {
        if canvas_width == 0 {
            return Err(ViewportError::ZeroWidth);
        }
        if range.span() < BigInt::one() {
            return Err(ViewportError::EmptySpan(range));
        }
        let start = BigRational::from_integer(range.low().clone());
        let end = BigRational::from_integer(range.high().clone());
        Ok(Self {
            range,
            canvas_width,
            start,
            end,
        })
    }

    pub fn range(&self) -> &ExactRange {
        &self.range
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn start(&self) -> &BigRational {
        &self.start
    }

    pub fn end(&self) -> &BigRational {
        &self.end
    }

    /// Exact width of the visible interval, `end - start`.
    pub fn span(&self) -> BigRational {
        &self.end - &self.start
    }

    /// Shift the viewport by `delta_pixels` screen pixels.
    ///
    /// Positive deltas move towards `high`. The span is preserved; at a range
    /// boundary the interval is translated back inside.
    pub fn pan(&mut self, delta_pixels: i64) {
        if delta_pixels == 0 {
            return;
        }
        let offset = BigRational::new(delta_pixels.into(), self.canvas_width.into()) * self.span();
        let start = &self.start + &offset;
        let end = &self.end + &offset;
        self.settle(start, end);
    }

    /// Scale the viewport by `factor` around the pixel `anchor_pixel`.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. The new span is clamped
    /// to `[1, high - low]`. Unless the result touches a range boundary, the
    /// value under the anchor pixel is the same before and after.
    pub fn zoom(&mut self, factor: &BigRational, anchor_pixel: i64) {
        if !factor.is_positive() {
            debug!(%factor, "ignoring non-positive zoom factor");
            return;
        }
        let one = BigRational::one();
        let old_size = self.span();
        if factor < &one && old_size <= one {
            return;
        }

        let anchor = BigRational::from_integer(self.value_at(anchor_pixel));
        let max_size = BigRational::from_integer(self.range.span());
        let mut new_size = old_size * factor;
        if new_size < one {
            new_size = one;
        } else if new_size > max_size {
            new_size = max_size;
        }

        let new_start = anchor - self.fraction(anchor_pixel) * &new_size;
        let new_end = &new_start + &new_size;
        self.settle(new_start, new_end);
    }

    /// One wheel step in, anchored at `anchor_pixel`.
    pub fn zoom_in(&mut self, anchor_pixel: i64) {
        self.zoom(&zoom_in_factor(), anchor_pixel);
    }

    /// One wheel step out, anchored at `anchor_pixel`.
    pub fn zoom_out(&mut self, anchor_pixel: i64) {
        self.zoom(&zoom_out_factor(), anchor_pixel);
    }

    /// Install `[start, end]`, translating it back inside the range if needed.
    ///
    /// Callers guarantee `end - start <= high - low`.
    fn settle(&mut self, start: BigRational, end: BigRational) {
        let low = BigRational::from_integer(self.range.low().clone());
        let high = BigRational::from_integer(self.range.high().clone());
        let (start, end) = if start < low {
            let shift = &low - &start;
            (low, end + shift)
        } else if end > high {
            let shift = &end - &high;
            (start - shift, high)
        } else {
            (start, end)
        };
        trace!(start = %start, end = %end, "viewport moved");
        self.start = start;
        self.end = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_viewport() -> Viewport {
        let range = ExactRange::new(BigInt::from(0), BigInt::from(1000)).unwrap();
        Viewport::new(range, 100).unwrap()
    }

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    #[test]
    fn test_new_spans_full_range() {
        let viewport = small_viewport();
        assert_eq!(viewport.start(), &q(0));
        assert_eq!(viewport.end(), &q(1000));
    }

    #[test]
    fn test_new_rejects_degenerate_inputs() {
        let point = ExactRange::new(BigInt::from(5), BigInt::from(5)).unwrap();
        assert!(matches!(
            Viewport::new(point, 100),
            Err(ViewportError::EmptySpan(_))
        ));
        assert_eq!(
            Viewport::new(ExactRange::default(), 0),
            Err(ViewportError::ZeroWidth)
        );
    }

    #[test]
    fn test_pan_at_full_zoom_is_pinned() {
        let mut viewport = small_viewport();
        viewport.pan(30);
        assert_eq!(viewport.start(), &q(0));
        assert_eq!(viewport.end(), &q(1000));
        viewport.pan(-30);
        assert_eq!(viewport.start(), &q(0));
        assert_eq!(viewport.end(), &q(1000));
    }

    #[test]
    fn test_pan_translates_and_clamps() {
        let mut viewport = small_viewport();
        // Zoom to span 500 centred on 500.
        viewport.zoom(&BigRational::new(1.into(), 2.into()), 50);
        assert_eq!(viewport.start(), &q(250));
        assert_eq!(viewport.end(), &q(750));

        // 10 pixels is 50 units at this zoom.
        viewport.pan(10);
        assert_eq!(viewport.start(), &q(300));
        assert_eq!(viewport.end(), &q(800));

        // Overshoot the top: translated back, span kept.
        viewport.pan(100);
        assert_eq!(viewport.start(), &q(500));
        assert_eq!(viewport.end(), &q(1000));

        viewport.pan(-1000);
        assert_eq!(viewport.start(), &q(0));
        assert_eq!(viewport.end(), &q(500));
    }

    #[test]
    fn test_zoom_keeps_anchor_value() {
        let mut viewport = small_viewport();
        let anchor_value = viewport.value_at(37);
        viewport.zoom_in(37);
        assert_eq!(viewport.value_at(37), anchor_value);
        assert_eq!(viewport.span(), q(800));
    }

    #[test]
    fn test_zoom_out_is_capped_at_full_span() {
        let mut viewport = small_viewport();
        viewport.zoom_in(80);
        for _ in 0..10 {
            viewport.zoom_out(80);
        }
        assert_eq!(viewport.start(), &q(0));
        assert_eq!(viewport.end(), &q(1000));
    }

    #[test]
    fn test_zoom_floor_is_one_unit() {
        let mut viewport = small_viewport();
        for _ in 0..200 {
            viewport.zoom_in(50);
        }
        assert_eq!(viewport.span(), q(1));
        let settled = viewport.clone();
        viewport.zoom_in(3);
        assert_eq!(viewport, settled);
    }

    #[test]
    fn test_non_positive_factor_ignored() {
        let mut viewport = small_viewport();
        let before = viewport.clone();
        viewport.zoom(&q(0), 10);
        viewport.zoom(&q(-2), 10);
        assert_eq!(viewport, before);
    }
}
