// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (viewport sizes, paddings, tick density).

use serde::{Deserialize, Serialize};

/// Default nominal viewport width in pixels.
pub const WIDTH: f64 = 1024.0;
/// Default nominal viewport height in pixels.
pub const HEIGHT: f64 = 480.0;

/// Horizontal pixels per requested time tick.
pub const X_TICK_SPACING_PX: f64 = 180.0;
/// Vertical pixels per requested value tick.
pub const Y_TICK_SPACING_PX: f64 = 64.0;

/// Length of the x axis tick marks below the axis line.
pub const TICK_SIZE: f64 = 4.0;
/// Radius of the per-series hover marker.
pub const MARKER_RADIUS: f64 = 6.0;

/// Padding around the plottable band, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Same padding on every side.
    pub const fn uniform(px: f64) -> Self {
        Self::new(px, px, px, px)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(48.0)
    }
}
