// File: crates/chart-render-svg/src/lib.rs
// Summary: SVG renderer; draws a ChartFrame as a standalone SVG document.
// Notes:
// - Draw order: axis, gridlines, mouse line, series paths, y ticks, x ticks,
//   area, markers, then legend and tooltip overlays.
// - Styling hooks are class names (`path color-N`, `marker marker-N`, ...);
//   only the gradient and per-series color hints are inlined.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tschart_core::{AxisTick, ChartColor, ChartFrame, Line};

/// Width reserved per legend entry when laying out the legend row.
const LEGEND_ITEM_PX: f64 = 160.0;

/// Escape text for element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn color_attr(name: &str, color: Option<&ChartColor>) -> String {
    match color {
        Some(c) => format!(r#" {name}="var({}, {})""#, escape(&c.var), escape(&c.fallback)),
        None => String::new(),
    }
}

fn line(out: &mut String, l: &Line, class: Option<&str>) {
    let class = class.map(|c| format!(r#" class="{c}""#)).unwrap_or_default();
    let _ = writeln!(out, r#"<line{class} x1="{}" y1="{}" x2="{}" y2="{}"/>"#, l.x1, l.y1, l.x2, l.y2);
}

fn x_tick(out: &mut String, t: &AxisTick) {
    out.push_str("<g>\n");
    let _ = writeln!(out, r#"<text text-anchor="middle" x="{}" y="{}">{}</text>"#, t.x, t.y, escape(&t.label));
    if let Some(mark) = &t.tick_line {
        line(out, mark, Some("tick-line"));
    }
    out.push_str("</g>\n");
}

fn y_tick(out: &mut String, t: &AxisTick) {
    let _ = writeln!(out, r#"<g><text x="{}" y="{}">{}</text></g>"#, t.x, t.y, escape(&t.label));
}

/// Render `frame` as SVG markup.
pub fn render_svg(frame: &ChartFrame) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="container__svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height
    );

    out.push_str("<g class=\"axes\">\n");
    line(&mut out, &frame.axis_line, None);
    out.push_str("</g>\n");

    out.push_str("<g class=\"grid-lines\">\n");
    for l in &frame.grid_lines {
        line(&mut out, l, None);
    }
    out.push_str("</g>\n");

    if let Some(mouse) = &frame.mouse_line {
        out.push_str("<g class=\"mouse-line\">\n");
        line(&mut out, mouse, None);
        out.push_str("</g>\n");
    }

    for p in &frame.paths {
        let anim = if p.animate { r#" data-animate="true""# } else { "" };
        let _ = writeln!(
            out,
            r#"<g class="path color-{}"><path d="{}" fill="none"{}{anim}/></g>"#,
            p.index,
            escape(&p.d),
            color_attr("stroke", p.color.as_ref())
        );
    }

    out.push_str("<g class=\"ticks y\">\n");
    for t in &frame.y_ticks {
        y_tick(&mut out, t);
    }
    out.push_str("</g>\n");

    out.push_str("<g class=\"ticks x\">\n");
    for t in &frame.x_ticks {
        x_tick(&mut out, t);
    }
    out.push_str("</g>\n");

    if let Some(area) = &frame.area {
        out.push_str("<defs><linearGradient id=\"grad\" x1=\"0%\" x2=\"0%\" y1=\"0%\" y2=\"100%\">");
        for stop in &area.gradient {
            let _ = write!(
                out,
                r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
                stop.offset,
                escape(&stop.color),
                stop.opacity
            );
        }
        out.push_str("</linearGradient></defs>\n");
        let anim = if area.animate { r#" data-animate="true""# } else { "" };
        let _ = writeln!(out, r#"<path class="area" d="{}" fill="url(#grad)" stroke="none"{anim}/>"#, escape(&area.d));
    }

    for m in &frame.markers {
        let _ = writeln!(
            out,
            r#"<g class="marker marker-{}"><circle r="{}" cx="{}" cy="{}"/></g>"#,
            m.index, m.r, m.cx, m.cy
        );
    }

    out.push_str("<g class=\"legend\">\n");
    for (i, item) in frame.legend.iter().enumerate() {
        let x = frame.plot.left + i as f64 * LEGEND_ITEM_PX;
        let y = frame.plot.top / 2.0;
        let _ = writeln!(
            out,
            r#"<g class="legend-item color-{i}"><circle r="4" cx="{x}" cy="{y}"{}/><text x="{}" y="{y}">{} {}</text></g>"#,
            color_attr("fill", item.color.as_ref()),
            x + 10.0,
            escape(&item.name),
            escape(&item.value)
        );
    }
    out.push_str("</g>\n");

    if !frame.tooltip.hidden {
        let _ = writeln!(
            out,
            r#"<g class="tooltip-container" transform="translate({} {})"><text class="tooltip__date">{}</text></g>"#,
            frame.tooltip.left,
            frame.tooltip.top,
            escape(frame.tooltip.date.as_deref().unwrap_or_default())
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Render `frame` and write it to `path`, creating parent directories.
pub fn write_svg(frame: &ChartFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let svg = render_svg(frame);
    std::fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "wrote svg");
    Ok(())
}
