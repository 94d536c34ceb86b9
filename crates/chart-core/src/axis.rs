// File: crates/chart-core/src/axis.rs
// Summary: Axis tick placement, horizontal gridlines and the x axis line.

use serde::Serialize;

use crate::geometry::PlotArea;
use crate::interaction::HoverBand;
use crate::scale::{ScaleTransform, TimeScale, ValueScale};
use crate::types::{X_TICK_SPACING_PX, Y_TICK_SPACING_PX};

/// A straight segment in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// A labelled tick. `x`/`y` locate the label; x ticks also carry a short tick mark.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTick {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub tick_line: Option<Line>,
}

/// Requested time tick count for a viewport width.
pub fn x_tick_count(width: f64) -> f64 { width / X_TICK_SPACING_PX }

/// Requested value tick count for a viewport height.
pub fn y_tick_count(height: f64) -> f64 { height / Y_TICK_SPACING_PX }

fn place<S, F>(scale: &S, count: f64, mut at: F) -> Vec<AxisTick>
where
    S: ScaleTransform,
    S::Domain: Copy,
    F: FnMut(f64, String) -> AxisTick,
{
    scale
        .ticks(count)
        .into_iter()
        .map(|v| at(scale.to_px(v), scale.tick_label(v)))
        .collect()
}

/// Time ticks: label centred under the tick at `label_y`, tick mark hanging
/// `tick_size` below the plot bottom.
pub fn x_ticks(scale: &TimeScale, count: f64, plot: &PlotArea, label_y: f64, tick_size: f64) -> Vec<AxisTick> {
    place(scale, count, |x, label| AxisTick {
        label,
        x,
        y: label_y,
        tick_line: Some(Line::new(x, plot.bottom, x, plot.bottom + tick_size)),
    })
}

/// Value ticks: label at the left edge of the viewport.
pub fn y_ticks(scale: &ValueScale, count: f64) -> Vec<AxisTick> {
    place(scale, count, |y, label| AxisTick { label, x: 0.0, y, tick_line: None })
}

/// One horizontal gridline per value tick, spanning the hover band.
pub fn grid_lines(scale: &ValueScale, count: f64, band: &HoverBand) -> Vec<Line> {
    scale
        .ticks(count)
        .into_iter()
        .map(|v| {
            let y = scale.to_px(v);
            Line::new(band.min_x, y, band.max_x, y)
        })
        .collect()
}

/// The x axis along the plot bottom.
pub fn axis_line(band: &HoverBand, plot: &PlotArea) -> Line {
    Line::new(band.min_x, plot.bottom, band.max_x, plot.bottom)
}
