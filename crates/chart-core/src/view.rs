// File: crates/chart-core/src/view.rs
// Summary: Derived chart state: plot area, both scales, hover band, series registry and hover state.
// Notes:
// - Recomputed from the authoritative inputs whenever one of them changes.

use bitflags::bitflags;

use crate::chart::ChartOptions;
use crate::geometry::PlotArea;
use crate::interaction::{HoverBand, HoverState, InteractionController, PointerEvent};
use crate::registry::SeriesRegistry;
use crate::scale::{build_time_scale, build_value_scale, TimeScale, ValueScale};
use crate::series::TimeSeries;

bitflags! {
    /// Inputs that changed since the last recompute.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Changed: u8 {
        const WIDTH = 1 << 0;
        const HEIGHT = 1 << 1;
        const SERIES = 1 << 2;
        const SMOOTHING = 1 << 3;
        const ANIMATE = 1 << 4;
    }
}

impl Changed {
    /// Changes that alter the shape of every series.
    pub const SHAPE: Changed = Changed::SERIES.union(Changed::SMOOTHING).union(Changed::ANIMATE);
}

/// Borrowed view of everything the derived state is computed from.
#[derive(Clone, Copy)]
pub struct ChartInputs<'a> {
    pub series: &'a [TimeSeries],
    pub options: &'a ChartOptions,
}

impl ChartInputs<'_> {
    fn plot_area(&self) -> PlotArea {
        PlotArea::from_viewport(self.options.width, self.options.height, &self.options.insets)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    pub plot: PlotArea,
    pub time_scale: TimeScale,
    pub value_scale: ValueScale,
    pub band: HoverBand,
    pub registry: SeriesRegistry,
    pub interaction: InteractionController,
}

impl ChartState {
    /// Full build; `None` when there is nothing to chart.
    pub fn build(inputs: ChartInputs<'_>) -> Option<Self> {
        if inputs.series.is_empty() {
            return None;
        }
        let plot = inputs.plot_area();
        let time_scale = build_time_scale(inputs.series, plot.left, plot.right);
        let value_scale = build_value_scale(inputs.series, plot.bottom, plot.top);
        let band = HoverBand::from_series(inputs.series, &time_scale)?;
        tracing::debug!(series = inputs.series.len(), ?plot, "built chart state");
        Some(Self {
            plot,
            time_scale,
            value_scale,
            band,
            registry: SeriesRegistry::initialize(inputs.series),
            interaction: InteractionController::new(),
        })
    }

    /// Rebuild whatever depends on `changed`. Width rebuilds the time scale,
    /// height the value scale, shape changes both; every change rebuilds the
    /// registry and drops any hover position.
    pub fn recompute(&mut self, inputs: ChartInputs<'_>, changed: Changed) {
        if changed.is_empty() {
            return;
        }
        self.plot = inputs.plot_area();
        if changed.intersects(Changed::WIDTH | Changed::SHAPE) {
            self.time_scale = build_time_scale(inputs.series, self.plot.left, self.plot.right);
            if let Some(band) = HoverBand::from_series(inputs.series, &self.time_scale) {
                self.band = band;
            }
        }
        if changed.intersects(Changed::HEIGHT | Changed::SHAPE) {
            self.value_scale = build_value_scale(inputs.series, self.plot.bottom, self.plot.top);
        }
        self.registry = SeriesRegistry::initialize(inputs.series);
        self.interaction.forget();
        tracing::debug!(?changed, "recomputed chart state");
    }

    pub fn hover(&self) -> HoverState {
        self.interaction.state()
    }

    pub fn handle_pointer(&mut self, evt: PointerEvent) -> HoverState {
        self.interaction.handle(evt, &self.band, &self.time_scale, &mut self.registry)
    }
}
