// File: crates/chart-core/src/interaction.rs
// Summary: Pointer handling for hover: strict bounds check, hit testing and registry updates.

use crate::registry::SeriesRegistry;
use crate::scale::{ScaleTransform, TimeScale};
use crate::series::TimeSeries;

/// Pointer input in pixel space (x relative to the chart's left edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f64 },
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { x: f64 },
}

impl HoverState {
    pub fn x(&self) -> Option<f64> {
        match *self {
            HoverState::Hovering { x } => Some(x),
            HoverState::Idle => None,
        }
    }

    pub fn is_hovering(&self) -> bool { matches!(self, HoverState::Hovering { .. }) }
}

/// Horizontal pixel band in which hovering is allowed: from the earliest first
/// point to the latest last point across all series, both ends excluded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverBand {
    pub min_x: f64,
    pub max_x: f64,
}

impl HoverBand {
    pub fn from_series(series: &[TimeSeries], scale: &TimeScale) -> Option<Self> {
        let earliest = series.iter().filter_map(|s| s.first()).map(|i| i.timestamp).min()?;
        let latest = series.iter().filter_map(|s| s.last()).map(|i| i.timestamp).max()?;
        Some(Self { min_x: scale.to_px(earliest), max_x: scale.to_px(latest) })
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x > self.min_x && x < self.max_x
    }
}

/// Idle/Hovering state machine. Every transition completes synchronously and
/// leaves the registry consistent with the new state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionController {
    state: HoverState,
}

impl InteractionController {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> HoverState { self.state }

    pub fn handle(
        &mut self,
        evt: PointerEvent,
        band: &HoverBand,
        scale: &TimeScale,
        registry: &mut SeriesRegistry,
    ) -> HoverState {
        match evt {
            PointerEvent::Move { x } => self.pointer_move(x, band, scale, registry),
            PointerEvent::Leave => self.pointer_leave(registry),
        }
    }

    pub fn pointer_move(
        &mut self,
        x: f64,
        band: &HoverBand,
        scale: &TimeScale,
        registry: &mut SeriesRegistry,
    ) -> HoverState {
        if !band.contains(x) {
            tracing::trace!(x, min_x = band.min_x, max_x = band.max_x, "pointer outside hover band");
            return self.clear(registry);
        }
        let t = scale.from_px(x);
        registry.hover_at(t);
        self.state = HoverState::Hovering { x };
        tracing::trace!(x, timestamp = %t, "hovering");
        self.state
    }

    pub fn pointer_leave(&mut self, registry: &mut SeriesRegistry) -> HoverState {
        tracing::trace!("pointer left chart");
        self.clear(registry)
    }

    /// Drop the hover position without touching the registry; used when the
    /// registry has just been rebuilt.
    pub(crate) fn forget(&mut self) {
        self.state = HoverState::Idle;
    }

    fn clear(&mut self, registry: &mut SeriesRegistry) -> HoverState {
        self.state = HoverState::Idle;
        registry.reset();
        self.state
    }
}
