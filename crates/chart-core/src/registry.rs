// File: crates/chart-core/src/registry.rs
// Summary: Per-series registry of active (hovered or default-last) items and the timestamp hit tester.
// Notes:
// - Entries keep registration order, so "first series that matches" is stable.
// - The active item is stored as an index into the entry's own data; it can
//   never point at a foreign item.
// - Two lookups exist on purpose: `locate` clamps to the last item (markers and
//   legend), `tooltip_item` uses the raw bisection index and skips series where
//   it falls on the first item or past the end.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{ChartError, Result};
use crate::series::{TimeSeries, TimeSeriesItem};

/// Insertion point after every item with `timestamp <= t`.
pub fn bisect_right(data: &[TimeSeriesItem], t: DateTime<Utc>) -> usize {
    data.partition_point(|item| item.timestamp <= t)
}

/// Right-biased bisection clamped to the last valid index.
pub fn locate(data: &[TimeSeriesItem], t: DateTime<Utc>) -> usize {
    bisect_right(data, t).min(data.len().saturating_sub(1))
}

/// Item selected by [`locate`], `None` only for empty data.
pub fn locate_item(data: &[TimeSeriesItem], t: DateTime<Utc>) -> Option<&TimeSeriesItem> {
    data.get(locate(data, t))
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegistryEntry {
    series: TimeSeries,
    active: usize,
}

impl RegistryEntry {
    fn new(series: TimeSeries) -> Self {
        let active = series.data.len().saturating_sub(1);
        Self { series, active }
    }

    pub fn name(&self) -> &str { &self.series.name }
    pub fn series(&self) -> &TimeSeries { &self.series }
    pub fn data(&self) -> &[TimeSeriesItem] { &self.series.data }
    pub fn active_index(&self) -> usize { self.active }

    pub fn active_item(&self) -> Option<&TimeSeriesItem> {
        self.series.data.get(self.active)
    }

    fn reset(&mut self) {
        self.active = self.series.data.len().saturating_sub(1);
    }

    /// The series with `hovered_item` set to the current active item.
    pub fn to_series(&self) -> TimeSeries {
        TimeSeries { hovered_item: self.active_item().cloned(), ..self.series.clone() }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl SeriesRegistry {
    /// One entry per series, each pointing at its chronologically last item.
    pub fn initialize(series: &[TimeSeries]) -> Self {
        let entries = series
            .iter()
            .map(|s| (s.name.clone(), RegistryEntry::new(s.clone())))
            .collect();
        Self { entries }
    }

    /// Point every entry back at its last item. Idempotent.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.reset();
        }
    }

    /// Move every entry's active item to the point located at `t`.
    pub fn hover_at(&mut self, t: DateTime<Utc>) {
        for entry in self.entries.values_mut() {
            entry.active = locate(entry.data(), t);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Active item for `name`. An unknown name means the registry is out of
    /// sync with the series list and is reported as an error.
    pub fn active_item(&self, name: &str) -> Result<&TimeSeriesItem> {
        let entry = self.entries.get(name).ok_or_else(|| ChartError::UnknownSeries(name.to_string()))?;
        entry.active_item().ok_or_else(|| ChartError::EmptySeries(name.to_string()))
    }

    /// Item whose date labels the tooltip at `t`: the first entry (in
    /// registration order) whose raw bisection index is neither 0 nor past the end.
    pub fn tooltip_item(&self, t: DateTime<Utc>) -> Option<&TimeSeriesItem> {
        self.entries.values().find_map(|entry| {
            let data = entry.data();
            match bisect_right(data, t) {
                0 => None,
                i => data.get(i),
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
