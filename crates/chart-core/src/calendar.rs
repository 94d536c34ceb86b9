// File: crates/chart-core/src/calendar.rs
// Summary: Calendar-aware tick generation and multi-scale tick labels for the time axis (UTC).
// Notes:
// - Interval choice mirrors the usual time-axis table: 1/5/15/30 seconds,
//   1/5/15/30 minutes, 1/3/6/12 hours, 1/2 days, Sunday weeks, 1/3 months,
//   then multi-year steps; spans shorter than a second fall back to milliseconds.
// - Stepped intervals are filtered by calendar field (day-of-month, month, ...),
//   so "every 2 days" restarts on the 1st of each month.

use chrono::{DateTime, Datelike, Months, TimeZone, Timelike, Utc};

use crate::grid::tick_step;

const MS_SECOND: i64 = 1_000;
const MS_MINUTE: i64 = 60 * MS_SECOND;
const MS_HOUR: i64 = 60 * MS_MINUTE;
const MS_DAY: i64 = 24 * MS_HOUR;
const MS_WEEK: i64 = 7 * MS_DAY;
const MS_MONTH: i64 = 30 * MS_DAY;
const MS_YEAR: i64 = 365 * MS_DAY;

// Hard stop for pathological spans; a sane tick range walks far fewer units.
const MAX_WALK: usize = 200_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, MS_SECOND),
    (TimeUnit::Second, 5, 5 * MS_SECOND),
    (TimeUnit::Second, 15, 15 * MS_SECOND),
    (TimeUnit::Second, 30, 30 * MS_SECOND),
    (TimeUnit::Minute, 1, MS_MINUTE),
    (TimeUnit::Minute, 5, 5 * MS_MINUTE),
    (TimeUnit::Minute, 15, 15 * MS_MINUTE),
    (TimeUnit::Minute, 30, 30 * MS_MINUTE),
    (TimeUnit::Hour, 1, MS_HOUR),
    (TimeUnit::Hour, 3, 3 * MS_HOUR),
    (TimeUnit::Hour, 6, 6 * MS_HOUR),
    (TimeUnit::Hour, 12, 12 * MS_HOUR),
    (TimeUnit::Day, 1, MS_DAY),
    (TimeUnit::Day, 2, 2 * MS_DAY),
    (TimeUnit::Week, 1, MS_WEEK),
    (TimeUnit::Month, 1, MS_MONTH),
    (TimeUnit::Month, 3, 3 * MS_MONTH),
    (TimeUnit::Year, 1, MS_YEAR),
];

fn at_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

impl TimeUnit {
    fn fixed_ms(self) -> Option<i64> {
        match self {
            TimeUnit::Millisecond => Some(1),
            TimeUnit::Second => Some(MS_SECOND),
            TimeUnit::Minute => Some(MS_MINUTE),
            TimeUnit::Hour => Some(MS_HOUR),
            TimeUnit::Day => Some(MS_DAY),
            TimeUnit::Week | TimeUnit::Month | TimeUnit::Year => None,
        }
    }

    /// Start of the unit containing `t`.
    pub fn floor(self, t: DateTime<Utc>) -> DateTime<Utc> {
        let ms = t.timestamp_millis();
        let floored = match self {
            TimeUnit::Week => {
                // 1970-01-01 was a Thursday, four days after a Sunday.
                let day = ms.div_euclid(MS_DAY);
                let since_sunday = (day + 4).rem_euclid(7);
                at_millis((day - since_sunday) * MS_DAY)
            }
            TimeUnit::Month => Utc.with_ymd_and_hms(t.year(), t.month(), 1, 0, 0, 0).single(),
            TimeUnit::Year => Utc.with_ymd_and_hms(t.year(), 1, 1, 0, 0, 0).single(),
            fixed => fixed.fixed_ms().and_then(|unit| at_millis(ms.div_euclid(unit) * unit)),
        };
        floored.unwrap_or(t)
    }

    /// First unit boundary at or after `t`.
    pub fn ceil(self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(t);
        if floored < t { self.offset(floored, 1) } else { Some(floored) }
    }

    /// Advance `t` by `n` whole units.
    pub fn offset(self, t: DateTime<Utc>, n: u32) -> Option<DateTime<Utc>> {
        match self {
            TimeUnit::Month => t.checked_add_months(Months::new(n)),
            TimeUnit::Year => t.checked_add_months(Months::new(n.checked_mul(12)?)),
            TimeUnit::Week => at_millis(t.timestamp_millis().checked_add(MS_WEEK * i64::from(n))?),
            fixed => {
                let unit = fixed.fixed_ms()?;
                at_millis(t.timestamp_millis().checked_add(unit * i64::from(n))?)
            }
        }
    }

    /// Calendar field used to thin a unit down to every n-th boundary.
    fn field(self, t: DateTime<Utc>) -> i64 {
        match self {
            TimeUnit::Millisecond => t.timestamp_millis(),
            TimeUnit::Second => i64::from(t.second()),
            TimeUnit::Minute => i64::from(t.minute()),
            TimeUnit::Hour => i64::from(t.hour()),
            TimeUnit::Day => i64::from(t.day0()),
            TimeUnit::Week => t.timestamp_millis().div_euclid(MS_WEEK),
            TimeUnit::Month => i64::from(t.month0()),
            TimeUnit::Year => i64::from(t.year()),
        }
    }
}

/// A unit thinned to every `step`-th boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: i64,
}

impl TimeInterval {
    /// `None` when `step` floors to something non-positive or non-finite.
    pub fn every(unit: TimeUnit, step: f64) -> Option<Self> {
        let step = step.floor();
        if !step.is_finite() || step < 1.0 {
            return None;
        }
        Some(Self { unit, step: step as i64 })
    }

    fn matches(&self, t: DateTime<Utc>) -> bool {
        self.step <= 1 || self.unit.field(t).rem_euclid(self.step) == 0
    }

    /// Boundaries `t` with `start <= t < stop`.
    pub fn range(&self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let Some(mut t) = self.unit.ceil(start) else { return out };

        if self.unit == TimeUnit::Millisecond {
            // Align straight to the first multiple instead of walking every millisecond.
            let ms = t.timestamp_millis();
            let aligned = ms + (self.step - ms.rem_euclid(self.step)) % self.step;
            let Some(first) = at_millis(aligned) else { return out };
            t = first;
            while t < stop && out.len() < MAX_WALK {
                out.push(t);
                match at_millis(t.timestamp_millis() + self.step) {
                    Some(next) => t = next,
                    None => break,
                }
            }
            return out;
        }

        let mut walked = 0;
        while t < stop && walked < MAX_WALK {
            if self.matches(t) {
                out.push(t);
            }
            match self.unit.offset(t, 1) {
                Some(next) => t = next,
                None => break,
            }
            walked += 1;
        }
        out
    }
}

/// Pick the tick interval that best approximates `count` ticks over the span.
pub fn tick_interval(start: DateTime<Utc>, stop: DateTime<Utc>, count: f64) -> Option<TimeInterval> {
    let (start_ms, stop_ms) = (start.timestamp_millis() as f64, stop.timestamp_millis() as f64);
    let target = (stop_ms - start_ms).abs() / count;
    let i = TICK_INTERVALS.partition_point(|&(_, _, duration)| (duration as f64) <= target);

    if i == TICK_INTERVALS.len() {
        let years = tick_step(start_ms / MS_YEAR as f64, stop_ms / MS_YEAR as f64, count);
        return TimeInterval::every(TimeUnit::Year, years);
    }
    if i == 0 {
        return TimeInterval::every(TimeUnit::Millisecond, tick_step(start_ms, stop_ms, count).max(1.0));
    }
    let (_, _, lower) = TICK_INTERVALS[i - 1];
    let (_, _, upper) = TICK_INTERVALS[i];
    let pick = if target / (lower as f64) < (upper as f64) / target { i - 1 } else { i };
    let (unit, step, _) = TICK_INTERVALS[pick];
    TimeInterval::every(unit, step as f64)
}

/// Roughly `count` calendar-aligned ticks in `[start, stop]`, both ends inclusive.
/// A zero-width span yields that single instant.
pub fn time_ticks(start: DateTime<Utc>, stop: DateTime<Utc>, count: f64) -> Vec<DateTime<Utc>> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some(interval) = tick_interval(lo, hi, count) else { return Vec::new() };
    let Some(end) = at_millis(hi.timestamp_millis().saturating_add(1)) else { return Vec::new() };
    let mut out = interval.range(lo, end);
    if reverse {
        out.reverse();
    }
    out
}

/// Label a tick with the coarsest format that still distinguishes it:
/// `.123`, `:05`, `03:30`, `03 PM`, `Mon 05`, `Jan 07`, `February`, `2024`.
pub fn format_tick(t: DateTime<Utc>) -> String {
    let pattern = if TimeUnit::Second.floor(t) < t {
        "%.3f"
    } else if TimeUnit::Minute.floor(t) < t {
        ":%S"
    } else if TimeUnit::Hour.floor(t) < t {
        "%I:%M"
    } else if TimeUnit::Day.floor(t) < t {
        "%I %p"
    } else if TimeUnit::Month.floor(t) < t {
        if TimeUnit::Week.floor(t) < t { "%a %d" } else { "%b %d" }
    } else if TimeUnit::Year.floor(t) < t {
        "%B"
    } else {
        "%Y"
    };
    t.format(pattern).to_string()
}
