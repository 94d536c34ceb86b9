// File: crates/chart-core/tests/scale.rs
// Purpose: Scale mapping, union extents, nice domains and tick generation.

use chrono::{DateTime, TimeZone, Utc};
use tschart_core::calendar::{format_tick, time_ticks};
use tschart_core::grid::{nice, tick_step, ticks};
use tschart_core::scale::{build_time_scale, build_value_scale, time_extent, value_extent};
use tschart_core::{ScaleTransform, TimeSeries, TimeSeriesItem};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn two_series() -> Vec<TimeSeries> {
    vec![
        TimeSeries::new("A", vec![TimeSeriesItem::new(day(2024, 1, 1), 10.0), TimeSeriesItem::new(day(2024, 3, 1), 30.0)]),
        TimeSeries::new("B", vec![TimeSeriesItem::new(day(2024, 2, 1), 3.0), TimeSeriesItem::new(day(2024, 4, 1), 97.0)]),
    ]
}

#[test]
fn extents_cover_every_series() {
    let series = two_series();
    assert_eq!(time_extent(&series), Some((day(2024, 1, 1), day(2024, 4, 1))));
    assert_eq!(value_extent(&series), Some((3.0, 97.0)));
    assert_eq!(time_extent(&[]), None);
}

#[test]
fn time_scale_maps_domain_ends_to_range_ends() {
    let scale = build_time_scale(&two_series(), 48.0, 976.0);
    assert_eq!(scale.to_px(day(2024, 1, 1)), 48.0);
    assert_eq!(scale.to_px(day(2024, 4, 1)), 976.0);
    assert_eq!(scale.from_px(48.0), day(2024, 1, 1));
    assert_eq!(scale.from_px(976.0), day(2024, 4, 1));

    let mid = day(2024, 2, 15);
    let back = scale.from_px(scale.to_px(mid));
    assert!((back - mid).num_milliseconds().abs() <= 1);
}

#[test]
fn value_scale_is_niced_and_inverted() {
    let scale = build_value_scale(&two_series(), 432.0, 48.0);
    assert_eq!((scale.vmin, scale.vmax), (0.0, 100.0));
    assert_eq!(scale.to_px(0.0), 432.0);
    assert_eq!(scale.to_px(100.0), 48.0);
    assert_eq!(scale.from_px(240.0), 50.0);
    assert!(scale.to_px(97.0) < scale.to_px(3.0));
}

#[test]
fn single_point_maps_to_range_midpoint() {
    let series = vec![TimeSeries::new("solo", vec![TimeSeriesItem::new(day(2024, 1, 1), 42.0)])];
    let ts = build_time_scale(&series, 48.0, 976.0);
    let vs = build_value_scale(&series, 432.0, 48.0);
    assert_eq!(ts.to_px(day(2024, 1, 1)), 512.0);
    assert_eq!(vs.to_px(42.0), 240.0);
    assert!(ts.from_px(300.0) == day(2024, 1, 1));
    assert_eq!(ts.ticks(5.0), vec![day(2024, 1, 1)]);
    assert_eq!(vs.ticks(5.0), vec![42.0]);
}

#[test]
fn linear_ticks_use_round_steps() {
    assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(ticks(10.0, 0.0, 5.0), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    assert_eq!(ticks(5.0, 5.0, 3.0), vec![5.0]);
    assert!(ticks(0.0, 1.0, 0.0).is_empty());
    assert_eq!(tick_step(0.0, 10.0, 5.0), 2.0);
    assert_eq!(tick_step(10.0, 0.0, 5.0), -2.0);
}

#[test]
fn nice_extends_outward() {
    assert_eq!(nice(3.0, 97.0, 10.0), (0.0, 100.0));
    assert_eq!(nice(5.0, 50.0, 10.0), (5.0, 50.0));
    assert_eq!(nice(0.13, 0.87, 10.0), (0.1, 0.9));
    assert_eq!(nice(7.0, 7.0, 10.0), (7.0, 7.0));
}

#[test]
fn quarterly_ticks_over_a_year() {
    let got = time_ticks(day(2024, 1, 1), day(2025, 1, 1), 4.0);
    assert_eq!(got, vec![day(2024, 1, 1), day(2024, 4, 1), day(2024, 7, 1), day(2024, 10, 1), day(2025, 1, 1)]);
    let labels: Vec<String> = got.into_iter().map(format_tick).collect();
    assert_eq!(labels, ["2024", "April", "July", "October", "2025"]);
}

#[test]
fn multi_year_ticks_align_to_year_multiples() {
    let got = time_ticks(day(2000, 1, 1), day(2024, 1, 1), 5.0);
    assert_eq!(got, vec![day(2000, 1, 1), day(2005, 1, 1), day(2010, 1, 1), day(2015, 1, 1), day(2020, 1, 1)]);
}

#[test]
fn sub_second_spans_fall_back_to_milliseconds() {
    let start = DateTime::from_timestamp_millis(0).unwrap();
    let stop = DateTime::from_timestamp_millis(10).unwrap();
    let got: Vec<i64> = time_ticks(start, stop, 5.0).iter().map(|t| t.timestamp_millis()).collect();
    assert_eq!(got, vec![0, 2, 4, 6, 8, 10]);
}

#[test]
fn tick_labels_pick_coarsest_distinguishing_format() {
    let base = day(2024, 2, 15);
    assert_eq!(format_tick(base), "Thu 15");
    assert_eq!(format_tick(day(2024, 2, 4)), "Feb 04");
    assert_eq!(format_tick(day(2024, 2, 1)), "February");
    assert_eq!(format_tick(Utc.with_ymd_and_hms(2024, 2, 15, 13, 0, 0).unwrap()), "01 PM");
    assert_eq!(format_tick(Utc.with_ymd_and_hms(2024, 2, 15, 13, 30, 0).unwrap()), "01:30");
    assert_eq!(format_tick(Utc.with_ymd_and_hms(2024, 2, 15, 13, 30, 5).unwrap()), ":05");
    let ms = DateTime::from_timestamp_millis(base.timestamp_millis() + 123).unwrap();
    assert_eq!(format_tick(ms), ".123");
}
