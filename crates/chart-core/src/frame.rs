// File: crates/chart-core/src/frame.rs
// Summary: Declarative chart description handed to the render layer, and its composition from state.
// Notes:
// - Everything here is plain data; renderers decide how to draw it.
// - Series order in the frame follows the input series list, not the registry.

use serde::Serialize;

use crate::axis::{axis_line, grid_lines, x_tick_count, x_ticks, y_tick_count, y_ticks, AxisTick, Line};
use crate::chart::ChartOptions;
use crate::error::Result;
use crate::format::tooltip_date;
use crate::geometry::{PlotArea, Point};
use crate::path::{area_path, build_path};
use crate::scale::ScaleTransform;
use crate::series::{ChartColor, TimeSeries, TimeSeriesItem};
use crate::view::ChartState;

/// Base color of the single-series area gradient.
pub const AREA_BASE_COLOR: &str = "var(--color-chart-base-100, #307fe2)";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPath {
    pub name: String,
    /// Zero-based position, used for per-series color classes.
    pub index: usize,
    pub d: String,
    pub animate: bool,
    pub color: Option<ChartColor>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Percent along the vertical gradient.
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaPath {
    pub d: String,
    pub animate: bool,
    pub gradient: Vec<GradientStop>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub hidden: bool,
    pub left: f64,
    pub top: f64,
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub name: String,
    pub value: String,
    pub color: Option<ChartColor>,
}

/// Everything needed to draw one chart frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub grid_lines: Vec<Line>,
    pub axis_line: Line,
    pub paths: Vec<SeriesPath>,
    pub area: Option<AreaPath>,
    pub markers: Vec<Marker>,
    pub mouse_line: Option<Line>,
    pub tooltip: Tooltip,
    pub legend: Vec<LegendItem>,
}

/// Pixel positions of `data` under the current scales.
pub fn pixel_points(state: &ChartState, data: &[TimeSeriesItem]) -> Vec<Point> {
    data.iter()
        .map(|item| Point::new(state.time_scale.to_px(item.timestamp), state.value_scale.to_px(item.close)))
        .collect()
}

/// Tooltip date at the current hover position, `None` when idle or when no
/// series has a usable item there.
pub fn tooltip_text(state: &ChartState) -> Option<String> {
    let x = state.hover().x()?;
    let t = state.time_scale.from_px(x);
    state.registry.tooltip_item(t).map(|item| tooltip_date(item.timestamp))
}

/// One legend entry per series, showing its own active item through `formatter`.
pub fn legend_items(
    state: &ChartState,
    series: &[TimeSeries],
    formatter: &dyn Fn(f64) -> String,
) -> Result<Vec<LegendItem>> {
    series
        .iter()
        .map(|s| {
            let item = state.registry.active_item(&s.name)?;
            Ok(LegendItem { name: s.name.clone(), value: formatter(item.close), color: s.color.clone() })
        })
        .collect()
}

impl ChartFrame {
    pub fn compose(
        state: &ChartState,
        series: &[TimeSeries],
        options: &ChartOptions,
        formatter: &dyn Fn(f64) -> String,
    ) -> Result<Self> {
        let plot = state.plot;
        let band = state.band;

        let paths: Vec<SeriesPath> = series
            .iter()
            .enumerate()
            .map(|(index, s)| SeriesPath {
                name: s.name.clone(),
                index,
                d: build_path(&pixel_points(state, &s.data), options.smoothing),
                animate: options.animate,
                color: s.color.clone(),
            })
            .collect();

        let area = match paths.as_slice() {
            [only] => Some(AreaPath {
                d: area_path(&only.d, band.min_x, band.max_x, plot.bottom),
                animate: options.animate,
                gradient: vec![
                    GradientStop { offset: 0.0, color: AREA_BASE_COLOR.to_string(), opacity: 0.38 },
                    GradientStop { offset: 90.0, color: AREA_BASE_COLOR.to_string(), opacity: 0.0 },
                ],
            }),
            _ => None,
        };

        let markers = series
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let item = state.registry.active_item(&s.name)?;
                Ok(Marker {
                    name: s.name.clone(),
                    index,
                    cx: state.time_scale.to_px(item.timestamp),
                    cy: state.value_scale.to_px(item.close),
                    r: options.marker_radius,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let hover_x = state.hover().x();
        let y_count = y_tick_count(options.height);

        Ok(Self {
            width: options.width,
            height: options.height,
            plot,
            x_ticks: x_ticks(
                &state.time_scale,
                x_tick_count(options.width),
                &plot,
                options.height - options.insets.bottom / 2.0,
                options.tick_size,
            ),
            y_ticks: y_ticks(&state.value_scale, y_count),
            grid_lines: grid_lines(&state.value_scale, y_count, &band),
            axis_line: axis_line(&band, &plot),
            paths,
            area,
            markers,
            mouse_line: hover_x.map(|x| Line::new(x, plot.top, x, plot.bottom)),
            tooltip: Tooltip {
                hidden: hover_x.is_none(),
                left: hover_x.unwrap_or(0.0),
                top: options.insets.top,
                date: tooltip_text(state),
            },
            legend: legend_items(state, series, formatter)?,
        })
    }
}
