//! Density-independent pixels.
//!
//! A [`Dp`] length stays visually consistent across screen densities. The
//! conversion to physical pixels goes through a process-wide scale factor
//! that the embedder sets once during startup; until then the factor is 1.0
//! (one dp equals one physical pixel).

use std::ops::{Add, Div, Mul, Sub};
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::px::Px;

/// Global scale factor cell used for dp-to-pixel conversion.
///
/// Holds how many physical pixels correspond to one dp unit. Initialized
/// lazily to 1.0; the embedder may update it when the display density is
/// known or changes.
static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Reads the current dp-to-pixel scale factor.
pub fn scale_factor() -> f64 {
    *SCALE_FACTOR.get_or_init(|| RwLock::new(1.0)).read()
}

/// Replaces the dp-to-pixel scale factor.
///
/// Non-finite or non-positive values are ignored; the previous factor stays
/// in effect.
pub fn set_scale_factor(factor: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        return;
    }
    *SCALE_FACTOR.get_or_init(|| RwLock::new(1.0)).write() = factor;
}

/// A density-independent length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new dp value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts to physical pixels using the current scale factor, rounding
    /// to the nearest pixel.
    pub fn to_px(self) -> Px {
        Px::from_dp(self)
    }

    /// Converts to a fractional physical pixel count.
    pub fn to_pixels_f64(self) -> f64 {
        self.0 * scale_factor()
    }

    /// Creates a dp value from a physical pixel count.
    pub fn from_px(px: Px) -> Self {
        px.to_dp()
    }
}

impl Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Self) -> Self::Output {
        Dp(self.0 + rhs.0)
    }
}

impl Sub for Dp {
    type Output = Dp;

    fn sub(self, rhs: Self) -> Self::Output {
        Dp(self.0 - rhs.0)
    }
}

impl Mul<f64> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f64) -> Self::Output {
        Dp(self.0 * rhs)
    }
}

impl Div<f64> for Dp {
    type Output = Dp;

    fn div(self, rhs: f64) -> Self::Output {
        Dp(self.0 / rhs)
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp(value)
    }
}
