// File: crates/chart-core/src/path.rs
// Summary: SVG path command strings for series lines (straight or Catmull-Rom smoothed) and area fills.

use std::fmt::Write as _;

use crate::geometry::Point;

/// Straight segments: `M x y L x y ...`, in input order.
pub fn linear_path(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(out, "{cmd} {} {}", p.x, p.y);
    }
    out
}

/// Convert a Catmull-Rom spline through `points` into cubic Bézier segments.
///
/// Segment `i` spans `points[i]..points[i + 1]`; its neighbours are clamped to
/// the ends, so the first and last segments reuse the endpoint. Each entry is
/// `[c1, c2, end]`.
pub fn catmull_rom_to_bezier(points: &[Point]) -> Vec<[Point; 3]> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n - 1)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(n - 1)];
            // Rows of the Catmull-Rom -> Bézier basis change:
            //    0     1     0     0
            //  -1/6    1    1/6    0
            //    0    1/6    1   -1/6
            //    0     0     1     0
            [
                Point::new((-p0.x + 6.0 * p1.x + p2.x) / 6.0, (-p0.y + 6.0 * p1.y + p2.y) / 6.0),
                Point::new((p1.x + 6.0 * p2.x - p3.x) / 6.0, (p1.y + 6.0 * p2.y - p3.y) / 6.0),
                p2,
            ]
        })
        .collect()
}

/// Smoothed path: `M x,y` followed by one `C` command per segment.
pub fn smoothed_path(points: &[Point]) -> String {
    let Some(first) = points.first() else { return String::new() };
    let mut out = format!("M {},{}", first.x, first.y);
    for [c1, c2, end] in catmull_rom_to_bezier(points) {
        let _ = write!(out, " C {},{} {},{} {},{}", c1.x, c1.y, c2.x, c2.y, end.x, end.y);
    }
    out
}

/// Line path in the requested mode.
pub fn build_path(points: &[Point], smoothing: bool) -> String {
    if smoothing { smoothed_path(points) } else { linear_path(points) }
}

/// Close a line path down to `baseline` between `min_x` and `max_x` for an area fill.
pub fn area_path(line: &str, min_x: f64, max_x: f64, baseline: f64) -> String {
    if line.is_empty() {
        return String::new();
    }
    format!("{line} L {max_x} {baseline} L {min_x} {baseline} Z")
}
