// File: crates/chart-core/src/chart.rs
// Summary: LineChart component: host-facing inputs, lifecycle (attach/detach/resize), pointer handlers
// and frame production.

use crate::error::Result;
use crate::format::{default_legend_formatter, LegendFormatter};
use crate::frame::{legend_items, tooltip_text, ChartFrame, LegendItem};
use crate::interaction::{HoverState, PointerEvent};
use crate::series::{validate_series, TimeSeries};
use crate::types::{Insets, HEIGHT, MARKER_RADIUS, TICK_SIZE, WIDTH};
use crate::view::{ChartInputs, ChartState, Changed};

/// Host-settable viewport and display flags.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub tick_size: f64,
    pub marker_radius: f64,
    /// Draw series as Catmull-Rom curves instead of straight segments.
    pub smoothing: bool,
    /// Ask the render layer to animate shape changes.
    pub animate: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            tick_size: TICK_SIZE,
            marker_radius: MARKER_RADIUS,
            smoothing: false,
            animate: false,
        }
    }
}

pub struct LineChart {
    options: ChartOptions,
    series: Vec<TimeSeries>,
    legend_formatter: LegendFormatter,
    state: Option<ChartState>,
    resize_subscribed: bool,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineChart")
            .field("options", &self.options)
            .field("series", &self.series.len())
            .field("hover", &self.hover())
            .field("resize_subscribed", &self.resize_subscribed)
            .finish()
    }
}

impl LineChart {
    pub fn new() -> Self {
        Self::with_options(ChartOptions::default())
    }

    pub fn with_options(options: ChartOptions) -> Self {
        Self {
            options,
            series: Vec::new(),
            legend_formatter: default_legend_formatter(),
            state: None,
            resize_subscribed: false,
        }
    }

    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn series(&self) -> &[TimeSeries] { &self.series }
    pub fn state(&self) -> Option<&ChartState> { self.state.as_ref() }
    pub fn is_populated(&self) -> bool { !self.series.is_empty() }
    pub fn is_attached(&self) -> bool { self.resize_subscribed }

    /// Replace the input series. Invalid input is rejected and the previous
    /// series and state stay in place.
    pub fn set_series(&mut self, series: Vec<TimeSeries>) -> Result<()> {
        if let Err(err) = validate_series(&series) {
            tracing::warn!(%err, "rejected series input");
            return Err(err);
        }
        self.series = series;
        self.invalidate(Changed::SERIES);
        Ok(())
    }

    /// Non-finite widths are ignored.
    pub fn set_width(&mut self, width: f64) {
        if !width.is_finite() {
            tracing::warn!(width, "ignoring non-finite width");
            return;
        }
        if self.options.width != width {
            self.options.width = width;
            self.invalidate(Changed::WIDTH);
        }
    }

    /// Non-finite heights are ignored.
    pub fn set_height(&mut self, height: f64) {
        if !height.is_finite() {
            tracing::warn!(height, "ignoring non-finite height");
            return;
        }
        if self.options.height != height {
            self.options.height = height;
            self.invalidate(Changed::HEIGHT);
        }
    }

    pub fn set_smoothing(&mut self, smoothing: bool) {
        if self.options.smoothing != smoothing {
            self.options.smoothing = smoothing;
            self.invalidate(Changed::SMOOTHING);
        }
    }

    pub fn set_animate(&mut self, animate: bool) {
        if self.options.animate != animate {
            self.options.animate = animate;
            self.invalidate(Changed::ANIMATE);
        }
    }

    pub fn set_legend_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.legend_formatter = Box::new(formatter);
    }

    /// Component mounted: subscribe to viewport resizes, but only when there is
    /// something to draw.
    pub fn attach(&mut self) {
        if !self.is_populated() {
            return;
        }
        self.resize_subscribed = true;
        tracing::debug!("attached; listening for resizes");
    }

    /// Component unmounted: drop the resize subscription.
    pub fn detach(&mut self) {
        if self.resize_subscribed {
            tracing::debug!("detached; resize listener removed");
        }
        self.resize_subscribed = false;
    }

    /// Adopt the measured container width after the first layout.
    pub fn first_layout(&mut self, measured_width: f64) {
        if self.is_populated() {
            self.set_width(measured_width);
        }
    }

    /// Viewport resize notification. Returns `false` when ignored (detached,
    /// empty, or a non-finite width).
    pub fn handle_resize(&mut self, measured_width: f64) -> bool {
        if !self.resize_subscribed || !self.is_populated() || !measured_width.is_finite() {
            return false;
        }
        self.set_width(measured_width);
        true
    }

    pub fn pointer_move(&mut self, x: f64) -> HoverState {
        self.handle_pointer(PointerEvent::Move { x })
    }

    pub fn pointer_leave(&mut self) -> HoverState {
        self.handle_pointer(PointerEvent::Leave)
    }

    pub fn handle_pointer(&mut self, evt: PointerEvent) -> HoverState {
        match self.state.as_mut() {
            Some(state) => state.handle_pointer(evt),
            None => HoverState::Idle,
        }
    }

    pub fn hover(&self) -> HoverState {
        self.state.as_ref().map(ChartState::hover).unwrap_or_default()
    }

    /// Legend payload; empty when there are no series.
    pub fn legend(&self) -> Result<Vec<LegendItem>> {
        match &self.state {
            Some(state) => legend_items(state, &self.series, &*self.legend_formatter),
            None => Ok(Vec::new()),
        }
    }

    pub fn tooltip_date(&self) -> Option<String> {
        self.state.as_ref().and_then(tooltip_text)
    }

    /// The frame to draw, or `None` for an intentionally empty render.
    pub fn frame(&self) -> Result<Option<ChartFrame>> {
        let Some(state) = &self.state else { return Ok(None) };
        ChartFrame::compose(state, &self.series, &self.options, &*self.legend_formatter).map(Some)
    }

    fn invalidate(&mut self, changed: Changed) {
        if self.series.is_empty() {
            self.state = None;
            return;
        }
        let inputs = ChartInputs { series: &self.series, options: &self.options };
        match self.state.as_mut() {
            Some(state) => state.recompute(inputs, changed),
            None => self.state = ChartState::build(inputs),
        }
    }
}
