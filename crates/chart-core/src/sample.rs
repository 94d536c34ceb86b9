// File: crates/chart-core/src/sample.rs
// Summary: Random-walk monthly series for demos and benches.

use chrono::{DateTime, Months, Utc};
use rand::Rng;

use crate::series::{TimeSeries, TimeSeriesItem};

/// Points per generated series: 24 years of monthly closes.
pub const SAMPLE_POINTS: usize = 24 * 12;

/// Shift `t` by a signed number of calendar months. Out-of-range shifts leave `t` unchanged.
fn shift_months(t: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let shifted = if months >= 0 {
        t.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        t.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(t)
}

/// Monthly random walk starting at `start`: integer closes, first in `0..100`,
/// each step moving up or down by `0..5`.
pub fn random_walk<R: Rng + ?Sized>(name: &str, start: DateTime<Utc>, rng: &mut R) -> TimeSeries {
    let mut timestamp = start;
    let mut close: i64 = rng.random_range(0..100);
    let mut data = Vec::with_capacity(SAMPLE_POINTS);
    for _ in 0..SAMPLE_POINTS {
        data.push(TimeSeriesItem::new(timestamp, close as f64));
        let step: i64 = rng.random_range(0..5);
        close = if rng.random_bool(0.5) { close + step } else { close - step };
        timestamp = shift_months(timestamp, 1);
    }
    TimeSeries::new(name, data)
}

/// Random walk starting now, shifted by `month_offset` months.
pub fn generate_series<R: Rng + ?Sized>(name: &str, month_offset: i32, rng: &mut R) -> TimeSeries {
    random_walk(name, shift_months(Utc::now(), month_offset), rng)
}
