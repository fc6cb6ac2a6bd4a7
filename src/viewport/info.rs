// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Zoom summary for status displays.

use super::Viewport;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};
use std::fmt;

/// Exact description of how far a viewport is zoomed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomInfo {
    /// `(high - low) / span`; 1 at full zoom-out.
    pub zoom_level: BigRational,
    /// `span / canvas_width`.
    pub values_per_pixel: BigRational,
    pub visible_start: BigInt,
    pub visible_end: BigInt,
}

impl ZoomInfo {
    pub fn zoom_level_f64(&self) -> f64 {
        approximate(&self.zoom_level)
    }

    pub fn values_per_pixel_f64(&self) -> f64 {
        approximate(&self.values_per_pixel)
    }

    /// True once a single pixel covers at most one value.
    pub fn is_sub_pixel(&self) -> bool {
        self.values_per_pixel <= BigRational::one()
    }

    /// Short density description, e.g. `1.18e18 values per pixel`.
    pub fn density(&self) -> String {
        if self.is_sub_pixel() {
            return String::from("Sub-pixel precision");
        }
        let vpp = self.values_per_pixel_f64();
        if vpp > 1000.0 {
            format!("{:.2e} values per pixel", vpp)
        } else {
            format!("{:.2} values per pixel", vpp)
        }
    }
}

impl fmt::Display for ZoomInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Visible: {:#x} - {:#x}",
            self.zoom_level_f64(),
            self.visible_start,
            self.visible_end
        )
    }
}

/// Display-only conversion; never feed the result back into the viewport.
fn approximate(value: &BigRational) -> f64 {
    let numer = value.numer().to_f64().unwrap_or(f64::NAN);
    let denom = value.denom().to_f64().unwrap_or(f64::NAN);
    numer / denom
}

impl Viewport {
    pub fn zoom_info(&self) -> ZoomInfo {
        let span = self.span();
        let full = BigRational::from_integer(self.range.span());
        ZoomInfo {
            zoom_level: full / &span,
            values_per_pixel: &span / BigRational::from_integer(self.canvas_width.into()),
            visible_start: self.start.to_integer(),
            visible_end: self.end.to_integer(),
        }
    }
}
