// File: crates/chart-core/tests/registry.rs
// Purpose: Hit-testing (right-biased bisection) and active-item bookkeeping.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tschart_core::registry::{bisect_right, locate, locate_item};
use tschart_core::{ChartError, SeriesRegistry, TimeSeries, TimeSeriesItem};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn monthly(name: &str, months: &[u32], base: f64) -> TimeSeries {
    let data = months
        .iter()
        .enumerate()
        .map(|(i, &m)| TimeSeriesItem::new(day(2024, m, 1), base + 10.0 * i as f64))
        .collect();
    TimeSeries::new(name, data)
}

#[test]
fn locate_is_right_biased_and_clamped() {
    let s = monthly("A", &[1, 2, 3], 10.0);
    assert_eq!(locate(&s.data, day(2023, 12, 1)), 0);
    assert_eq!(locate(&s.data, day(2024, 1, 15)), 1);
    // An exact hit selects the next item.
    assert_eq!(locate(&s.data, day(2024, 2, 1)), 2);
    assert_eq!(locate(&s.data, day(2024, 2, 15)), 2);
    assert_eq!(locate(&s.data, day(2025, 1, 1)), 2);
    assert_eq!(locate_item(&s.data, day(2024, 2, 15)).map(|i| i.close), Some(30.0));
    assert_eq!(locate_item(&[], day(2024, 2, 15)), None);
}

#[test]
fn locate_is_monotonic() {
    let s = monthly("A", &[1, 2, 3, 4, 5, 6], 0.0);
    let mut prev = 0;
    let mut t = day(2023, 12, 1);
    while t < day(2024, 7, 1) {
        let i = locate(&s.data, t);
        assert!(i >= prev, "locate went backwards at {t}");
        assert!(i < s.data.len());
        prev = i;
        t += Duration::hours(37);
    }
}

#[test]
fn initialize_points_at_last_items() {
    let reg = SeriesRegistry::initialize(&[monthly("A", &[1, 2, 3], 10.0), monthly("B", &[4, 5], 0.0)]);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.active_item("A").map(|i| i.close), Ok(30.0));
    assert_eq!(reg.active_item("B").map(|i| i.timestamp), Ok(day(2024, 5, 1)));
    assert_eq!(reg.active_item("C"), Err(ChartError::UnknownSeries("C".into())));
    let names: Vec<&str> = reg.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn hover_then_reset_is_idempotent() {
    let mut reg = SeriesRegistry::initialize(&[monthly("A", &[1, 2, 3], 10.0)]);
    reg.hover_at(day(2024, 1, 15));
    assert_eq!(reg.get("A").map(|e| e.active_index()), Some(1));
    assert_eq!(reg.get("A").map(|e| e.to_series().hovered_item), Some(Some(TimeSeriesItem::new(day(2024, 2, 1), 20.0))));
    reg.reset();
    let once = reg.clone();
    reg.reset();
    assert_eq!(reg, once);
    assert_eq!(reg.get("A").map(|e| e.active_index()), Some(2));
}

#[test]
fn each_series_hit_tests_against_its_own_data() {
    let mut reg = SeriesRegistry::initialize(&[monthly("A", &[1, 2, 3], 10.0), monthly("B", &[4, 5, 6], 100.0)]);
    reg.hover_at(day(2024, 2, 15));
    assert_eq!(reg.active_item("A").map(|i| i.timestamp), Ok(day(2024, 3, 1)));
    assert_eq!(reg.active_item("B").map(|i| i.timestamp), Ok(day(2024, 4, 1)));
}

#[test]
fn tooltip_lookup_skips_first_and_past_end() {
    let s = monthly("A", &[1, 2, 3], 10.0);
    assert_eq!(bisect_right(&s.data, day(2025, 1, 1)), 3);
    let reg = SeriesRegistry::initialize(&[s]);
    // Past the last item the marker clamps but the tooltip lookup finds nothing.
    assert_eq!(reg.tooltip_item(day(2025, 1, 1)), None);
    // Before the first item the raw index is 0 and is skipped.
    assert_eq!(reg.tooltip_item(day(2023, 12, 1)), None);
    assert_eq!(reg.tooltip_item(day(2024, 2, 15)).map(|i| i.timestamp), Some(day(2024, 3, 1)));
}

#[test]
fn tooltip_lookup_takes_first_matching_series() {
    let reg = SeriesRegistry::initialize(&[monthly("A", &[1, 2, 3], 10.0), monthly("B", &[3, 4, 5], 0.0)]);
    assert_eq!(reg.tooltip_item(day(2024, 2, 15)).map(|i| i.timestamp), Some(day(2024, 3, 1)));
    // A is past its end here, so B answers.
    assert_eq!(reg.tooltip_item(day(2024, 4, 15)).map(|i| i.timestamp), Some(day(2024, 5, 1)));
}

#[test]
fn equal_timestamps_bisect_past_every_duplicate() {
    let data = vec![
        TimeSeriesItem::new(day(2024, 1, 1), 1.0),
        TimeSeriesItem::new(day(2024, 2, 1), 2.0),
        TimeSeriesItem::new(day(2024, 2, 1), 3.0),
        TimeSeriesItem::new(day(2024, 3, 1), 4.0),
    ];
    assert_eq!(bisect_right(&data, day(2024, 2, 1)), 3);
    assert_eq!(locate(&data, day(2024, 2, 1)), 3);
    let reg = SeriesRegistry::initialize(&[TimeSeries::new("A", data)]);
    assert_eq!(reg.tooltip_item(day(2024, 2, 1)), Some(&TimeSeriesItem::new(day(2024, 3, 1), 4.0)));

    // Duplicates at the end: the raw index runs past them and `locate` clamps.
    let tail = vec![
        TimeSeriesItem::new(day(2024, 1, 1), 1.0),
        TimeSeriesItem::new(day(2024, 2, 1), 2.0),
        TimeSeriesItem::new(day(2024, 2, 1), 3.0),
    ];
    assert_eq!(bisect_right(&tail, day(2024, 2, 1)), 3);
    assert_eq!(locate(&tail, day(2024, 2, 1)), 2);
    assert_eq!(locate_item(&tail, day(2024, 2, 1)).map(|i| i.close), Some(3.0));
    let reg = SeriesRegistry::initialize(&[TimeSeries::new("T", tail)]);
    assert_eq!(reg.tooltip_item(day(2024, 2, 1)), None);
}
