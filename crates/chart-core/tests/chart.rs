// File: crates/chart-core/tests/chart.rs
// Purpose: LineChart lifecycle, input validation and frame composition.

use chrono::{DateTime, TimeZone, Utc};
use tschart_core::{
    format_currency, ChartError, ChartOptions, Insets, LineChart, PlotArea, ScaleTransform, TimeSeries,
    TimeSeriesItem,
};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn series(name: &str, months: &[u32], closes: &[f64]) -> TimeSeries {
    let data = months.iter().zip(closes).map(|(&m, &c)| TimeSeriesItem::new(day(2024, m, 1), c)).collect();
    TimeSeries::new(name, data)
}

fn populated(list: Vec<TimeSeries>) -> LineChart {
    let mut chart = LineChart::new();
    chart.set_series(list).expect("valid series");
    chart
}

#[test]
fn empty_chart_renders_nothing() {
    let chart = LineChart::new();
    assert!(!chart.is_populated());
    assert!(chart.state().is_none());
    assert_eq!(chart.frame(), Ok(None));
    assert_eq!(chart.legend(), Ok(Vec::new()));
}

#[test]
fn clearing_series_drops_state() {
    let mut chart = populated(vec![series("A", &[1, 2], &[1.0, 2.0])]);
    assert!(chart.state().is_some());
    chart.set_series(Vec::new()).unwrap();
    assert!(chart.state().is_none());
    assert_eq!(chart.frame(), Ok(None));
}

#[test]
fn invalid_series_are_rejected_without_side_effects() {
    let mut chart = populated(vec![series("A", &[1, 2], &[1.0, 2.0])]);
    let before = chart.state().cloned();

    let dup = vec![series("A", &[1], &[1.0]), series("A", &[2], &[2.0])];
    assert_eq!(chart.set_series(dup), Err(ChartError::DuplicateSeries("A".into())));

    let unordered = vec![series("B", &[3, 1], &[1.0, 2.0])];
    assert_eq!(chart.set_series(unordered), Err(ChartError::Unordered { name: "B".into(), index: 1 }));

    assert_eq!(chart.set_series(vec![TimeSeries::new("E", vec![])]), Err(ChartError::EmptySeries("E".into())));

    let nan = vec![series("N", &[1, 2], &[1.0, f64::NAN])];
    assert_eq!(chart.set_series(nan), Err(ChartError::NonFiniteClose { name: "N".into(), index: 1 }));

    let mut foreign = series("F", &[1, 2], &[1.0, 2.0]);
    foreign.hovered_item = Some(TimeSeriesItem::new(day(2020, 1, 1), 9.0));
    assert_eq!(chart.set_series(vec![foreign]), Err(ChartError::ForeignHoveredItem("F".into())));

    assert_eq!(chart.series()[0].name, "A");
    assert_eq!(chart.state().cloned(), before);
}

#[test]
fn hovered_item_input_is_accepted_but_not_adopted() {
    let mut s = series("A", &[1, 2, 3], &[1.0, 2.0, 3.0]);
    s.hovered_item = Some(s.data[0].clone());
    let chart = populated(vec![s]);
    assert_eq!(chart.state().unwrap().registry.active_item("A").map(|i| i.close), Ok(3.0));
}

#[test]
fn resize_requires_attach_and_data() {
    let mut chart = LineChart::new();
    chart.attach();
    assert!(!chart.is_attached());
    assert!(!chart.handle_resize(600.0));
    chart.first_layout(600.0);
    assert_eq!(chart.options().width, 1024.0);

    chart.set_series(vec![series("A", &[1, 2], &[1.0, 2.0])]).unwrap();
    assert!(!chart.handle_resize(600.0));
    chart.first_layout(900.0);
    assert_eq!(chart.options().width, 900.0);

    chart.attach();
    assert!(chart.handle_resize(800.0));
    let frame = chart.frame().unwrap().unwrap();
    assert_eq!(frame.width, 800.0);
    assert_eq!(frame.plot.right, 752.0);

    chart.detach();
    assert!(!chart.handle_resize(500.0));
    assert_eq!(chart.options().width, 800.0);
}

#[test]
fn legend_values_follow_each_series() {
    let mut chart = populated(vec![
        series("A", &[1, 2, 3], &[10.0, 20.0, 30.0]),
        series("B", &[4, 5, 6], &[7.0, 8.0, 9.0]),
    ]);
    let values: Vec<String> = chart.legend().unwrap().into_iter().map(|l| l.value).collect();
    assert_eq!(values, ["30", "9"]);

    let x = chart.state().unwrap().time_scale.to_px(day(2024, 1, 15));
    chart.pointer_move(x);
    let values: Vec<String> = chart.legend().unwrap().into_iter().map(|l| l.value).collect();
    assert_eq!(values, ["20", "7"]);

    chart.set_legend_formatter(format_currency);
    let values: Vec<String> = chart.legend().unwrap().into_iter().map(|l| l.value).collect();
    assert_eq!(values, ["$20.00", "$7.00"]);
}

#[test]
fn area_only_for_a_single_series() {
    let one = populated(vec![series("A", &[1, 2, 3], &[10.0, 20.0, 30.0])]);
    let frame = one.frame().unwrap().unwrap();
    let area = frame.area.expect("single series has an area");
    assert!(area.d.starts_with(&frame.paths[0].d));
    assert!(area.d.ends_with(" L 48 432 Z"));
    assert_eq!(area.gradient.len(), 2);
    assert_eq!((area.gradient[0].offset, area.gradient[0].opacity), (0.0, 0.38));
    assert_eq!((area.gradient[1].offset, area.gradient[1].opacity), (90.0, 0.0));

    let two = populated(vec![series("A", &[1, 2], &[1.0, 2.0]), series("B", &[2, 3], &[3.0, 4.0])]);
    assert!(two.frame().unwrap().unwrap().area.is_none());
}

#[test]
fn frame_tracks_hover() {
    let mut chart = populated(vec![series("A", &[1, 2, 3], &[10.0, 20.0, 30.0])]);
    let idle = chart.frame().unwrap().unwrap();
    assert!(idle.mouse_line.is_none());
    assert!(idle.tooltip.hidden);
    assert_eq!(idle.tooltip.date, None);
    assert_eq!(idle.markers.len(), 1);
    assert_eq!(idle.markers[0].cx, 976.0);
    assert_eq!(idle.markers[0].r, 6.0);

    chart.pointer_move(500.0);
    let hovering = chart.frame().unwrap().unwrap();
    let line = hovering.mouse_line.expect("mouse line while hovering");
    assert_eq!((line.x1, line.y1, line.x2, line.y2), (500.0, 48.0, 500.0, 432.0));
    assert!(!hovering.tooltip.hidden);
    assert_eq!(hovering.tooltip.left, 500.0);
    assert!(hovering.tooltip.date.is_some());
    assert!(hovering.markers[0].cx <= 976.0);
}

#[test]
fn frame_carries_axes_and_options() {
    let mut chart = LineChart::with_options(ChartOptions { animate: true, ..ChartOptions::default() });
    chart.set_series(vec![series("A", &[1, 2, 3, 4, 5, 6], &[3.0, 40.0, 12.0, 97.0, 55.0, 60.0])]).unwrap();
    let frame = chart.frame().unwrap().unwrap();

    assert!(!frame.x_ticks.is_empty());
    for tick in &frame.x_ticks {
        assert_eq!(tick.y, 480.0 - 24.0);
        let mark = tick.tick_line.expect("x ticks carry a mark");
        assert_eq!((mark.y1, mark.y2), (432.0, 436.0));
        assert!(tick.x >= 48.0 && tick.x <= 976.0);
    }
    let labels: Vec<&str> = frame.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"0"));
    assert_eq!(labels.last(), Some(&"100"));
    assert_eq!(frame.grid_lines.len(), frame.y_ticks.len());
    assert_eq!((frame.axis_line.x1, frame.axis_line.x2, frame.axis_line.y1), (48.0, 976.0, 432.0));
    assert!(frame.paths.iter().all(|p| p.animate));
    assert!(frame.paths[0].d.starts_with("M 48 "));

    chart.set_smoothing(true);
    let smooth = chart.frame().unwrap().unwrap();
    assert!(smooth.paths[0].d.starts_with("M 48,"));
    assert_eq!(smooth.paths[0].d.matches(" C ").count(), 5);
}

#[test]
fn unchanged_inputs_do_not_recompute() {
    let mut chart = populated(vec![series("A", &[1, 2, 3], &[10.0, 20.0, 30.0])]);
    chart.pointer_move(500.0);
    chart.set_width(1024.0);
    chart.set_smoothing(false);
    chart.set_animate(false);
    assert!(chart.hover().is_hovering());
}

#[test]
fn non_finite_sizes_are_ignored() {
    let mut chart = populated(vec![series("A", &[1, 2, 3], &[10.0, 20.0, 30.0])]);
    chart.attach();
    chart.pointer_move(500.0);

    chart.set_width(f64::NAN);
    chart.set_height(f64::INFINITY);
    assert!(!chart.handle_resize(f64::NEG_INFINITY));
    chart.first_layout(f64::NAN);

    assert_eq!((chart.options().width, chart.options().height), (1024.0, 480.0));
    // Nothing was recomputed, so the hover survives.
    assert!(chart.hover().is_hovering());
    let frame = chart.frame().unwrap().unwrap();
    assert!(!frame.paths[0].d.contains("NaN"));
}

#[test]
fn plot_area_honours_each_inset() {
    let options = ChartOptions { insets: Insets::new(60.0, 20.0, 10.0, 30.0), ..ChartOptions::default() };
    let mut chart = LineChart::with_options(options);
    chart.set_series(vec![series("A", &[1, 2], &[1.0, 2.0])]).unwrap();
    let frame = chart.frame().unwrap().unwrap();
    assert_eq!(frame.plot, PlotArea::from_ltrb(60.0, 10.0, 1004.0, 450.0));
    assert_eq!((frame.plot.width(), frame.plot.height()), (944.0, 440.0));
    assert_eq!((frame.axis_line.x1, frame.axis_line.x2, frame.axis_line.y1), (60.0, 1004.0, 450.0));
    assert_eq!(frame.x_ticks[0].y, 480.0 - 15.0);
}
