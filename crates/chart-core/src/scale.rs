// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms derived from the union extent of all series.
// Notes:
// - Scales are rebuilt from the current inputs on every shape-relevant change;
//   nothing here is patched incrementally.
// - A zero-width domain maps every value to the middle of the pixel range so
//   single-point charts still produce finite coordinates.

use chrono::{DateTime, Utc};

use crate::calendar::{format_tick, time_ticks};
use crate::format::format_number;
use crate::grid::{nice, ticks};
use crate::series::TimeSeries;

/// Count used when extending the value domain to round numbers.
pub const NICE_COUNT: f64 = 10.0;

/// Forward (`to_px`) and inverse (`from_px`) mapping between a data domain and pixels.
pub trait ScaleTransform {
    type Domain;
    fn to_px(&self, v: Self::Domain) -> f64;
    fn from_px(&self, px: f64) -> Self::Domain;
    fn ticks(&self, count: f64) -> Vec<Self::Domain>;
    fn tick_label(&self, v: Self::Domain) -> String;
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Horizontal time scale: epoch milliseconds mapped linearly onto `[range_start, range_end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub range_start: f64,
    pub range_end: f64,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range_start: f64, range_end: f64) -> Self {
        Self { start, end, range_start, range_end }
    }

    fn domain_ms(&self) -> (f64, f64) {
        (self.start.timestamp_millis() as f64, self.end.timestamp_millis() as f64)
    }
}

impl ScaleTransform for TimeScale {
    type Domain = DateTime<Utc>;

    fn to_px(&self, t: DateTime<Utc>) -> f64 {
        let (d0, d1) = self.domain_ms();
        if d1 == d0 {
            return lerp(self.range_start, self.range_end, 0.5);
        }
        let frac = (t.timestamp_millis() as f64 - d0) / (d1 - d0);
        lerp(self.range_start, self.range_end, frac)
    }

    /// Inverse mapping, truncated to whole milliseconds.
    fn from_px(&self, px: f64) -> DateTime<Utc> {
        let (d0, d1) = self.domain_ms();
        let span = self.range_end - self.range_start;
        let ms = if span == 0.0 { lerp(d0, d1, 0.5) } else { lerp(d0, d1, (px - self.range_start) / span) };
        let lo = DateTime::<Utc>::MIN_UTC.timestamp_millis() as f64;
        let hi = DateTime::<Utc>::MAX_UTC.timestamp_millis() as f64;
        DateTime::from_timestamp_millis(ms.trunc().clamp(lo, hi) as i64).unwrap_or(self.start)
    }

    fn ticks(&self, count: f64) -> Vec<DateTime<Utc>> {
        time_ticks(self.start, self.end, count)
    }

    fn tick_label(&self, t: DateTime<Utc>) -> String {
        format_tick(t)
    }
}

/// Vertical value scale mapping `[vmin, vmax]` onto `[range_start, range_end]`
/// (bottom pixel first, so larger values sit higher).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub vmin: f64,
    pub vmax: f64,
    pub range_start: f64,
    pub range_end: f64,
}

impl ValueScale {
    pub fn new_linear(vmin: f64, vmax: f64, range_start: f64, range_end: f64) -> Self {
        Self { vmin, vmax, range_start, range_end }
    }

    /// Extend the domain outward to round values.
    pub fn nice(mut self, count: f64) -> Self {
        let (lo, hi) = nice(self.vmin, self.vmax, count);
        self.vmin = lo;
        self.vmax = hi;
        self
    }
}

impl ScaleTransform for ValueScale {
    type Domain = f64;

    fn to_px(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return lerp(self.range_start, self.range_end, 0.5);
        }
        lerp(self.range_start, self.range_end, (v - self.vmin) / span)
    }

    fn from_px(&self, px: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return lerp(self.vmin, self.vmax, 0.5);
        }
        lerp(self.vmin, self.vmax, (px - self.range_start) / span)
    }

    fn ticks(&self, count: f64) -> Vec<f64> {
        ticks(self.vmin, self.vmax, count)
    }

    fn tick_label(&self, v: f64) -> String {
        format_number(v)
    }
}

/// Earliest and latest timestamp across every series.
pub fn time_extent(series: &[TimeSeries]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    series.iter().flat_map(|s| s.data.iter()).fold(None, |acc, item| match acc {
        None => Some((item.timestamp, item.timestamp)),
        Some((lo, hi)) => Some((lo.min(item.timestamp), hi.max(item.timestamp))),
    })
}

/// Smallest and largest close across every series.
pub fn value_extent(series: &[TimeSeries]) -> Option<(f64, f64)> {
    series.iter().flat_map(|s| s.data.iter()).fold(None, |acc, item| match acc {
        None => Some((item.close, item.close)),
        Some((lo, hi)) => Some((lo.min(item.close), hi.max(item.close))),
    })
}

/// Time scale over the union extent. No points yields a zero-width domain at the epoch.
pub fn build_time_scale(series: &[TimeSeries], range_start: f64, range_end: f64) -> TimeScale {
    let (start, end) = time_extent(series).unwrap_or((DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::UNIX_EPOCH));
    TimeScale::new(start, end, range_start, range_end)
}

/// Niced value scale over the union extent. No points yields a zero-width domain at 0.
pub fn build_value_scale(series: &[TimeSeries], range_start: f64, range_end: f64) -> ValueScale {
    let (vmin, vmax) = value_extent(series).unwrap_or((0.0, 0.0));
    ValueScale::new_linear(vmin, vmax, range_start, range_end).nice(NICE_COUNT)
}
