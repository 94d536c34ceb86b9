// File: crates/demo/src/main.rs
// Summary: Demo loads `name,timestamp,close` CSV rows (or generates random walks), optionally
// simulates a hover, and writes the chart as SVG and/or a JSON frame dump.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tschart_core::sample::generate_series;
use tschart_core::{format_currency, ChartOptions, LineChart, TimeSeries, TimeSeriesItem};

#[derive(Parser, Debug)]
#[command(name = "tschart-demo", version, about = "Render a time-series line chart to SVG")]
struct Cli {
    /// CSV file with `name,timestamp,close` rows. Rows are grouped by name.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Number of random-walk series to generate when no input is given.
    #[arg(short, long, default_value_t = 1)]
    generate: usize,
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1024.0)]
    width: f64,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 480.0)]
    height: f64,
    /// Draw Catmull-Rom smoothed lines.
    #[arg(long, default_value_t = false)]
    smooth: bool,
    /// Mark paths for animation in the output.
    #[arg(long, default_value_t = false)]
    animate: bool,
    /// Simulate the pointer at this x pixel before rendering.
    #[arg(long)]
    hover_x: Option<f64>,
    /// Format legend values as US dollars.
    #[arg(long, default_value_t = false)]
    currency: bool,
    /// Output SVG path.
    #[arg(short, long, default_value = "target/out/chart.svg")]
    out: PathBuf,
    /// Also dump the composed frame as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    timestamp: String,
    close: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let series = match &cli.input {
        Some(raw) => {
            let path = resolve_path(raw)?;
            tracing::info!(path = %path.display(), "using input file");
            load_series_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            let mut rng = rand::rng();
            (0..cli.generate.max(1))
                .map(|i| generate_series(&format!("Series {}", i + 1), -(i as i32) * 6, &mut rng))
                .collect()
        }
    };
    tracing::info!(series = series.len(), points = series.iter().map(|s| s.data.len()).sum::<usize>(), "loaded");

    let mut chart = LineChart::with_options(ChartOptions {
        width: cli.width,
        height: cli.height,
        smoothing: cli.smooth,
        animate: cli.animate,
        ..ChartOptions::default()
    });
    if cli.currency {
        chart.set_legend_formatter(format_currency);
    }
    chart.set_series(series).context("invalid series input")?;
    chart.attach();

    if let Some(x) = cli.hover_x {
        let state = chart.pointer_move(x);
        tracing::info!(x, ?state, tooltip = ?chart.tooltip_date(), "simulated hover");
    }

    let Some(frame) = chart.frame()? else {
        anyhow::bail!("nothing to render: no series");
    };

    for item in &frame.legend {
        println!("{:<16} {}", item.name, item.value);
    }

    tschart_render_svg::write_svg(&frame, &cli.out)?;
    println!("Wrote {}", cli.out.display());

    if let Some(json_path) = &cli.json {
        let text = serde_json::to_string_pretty(&frame).context("serializing frame")?;
        if let Some(parent) = json_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(json_path, text).with_context(|| format!("writing {}", json_path.display()))?;
        println!("Wrote {}", json_path.display());
    }

    Ok(())
}

/// Resolve path, trying the .csv/.cvs swap if needed.
fn resolve_path(raw: &Path) -> Result<PathBuf> {
    if raw.exists() {
        return Ok(raw.to_path_buf());
    }
    if let Some(alt) = swap_ext(raw) {
        if alt.exists() {
            tracing::warn!(path = %alt.display(), "extension swapped between .csv/.cvs");
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", raw.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    let mut alt = p.to_path_buf();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Group rows into series by name, keeping first-seen order. Each series is
/// sorted by timestamp (stable, so equal instants keep file order).
fn load_series_csv(path: &Path) -> Result<Vec<TimeSeries>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut grouped: IndexMap<String, Vec<TimeSeriesItem>> = IndexMap::new();
    for (line, rec) in rdr.deserialize::<Row>().enumerate() {
        let row = rec.with_context(|| format!("reading row {}", line + 1))?;
        let item = TimeSeriesItem::parse(&row.timestamp, row.close)
            .with_context(|| format!("row {} of series '{}'", line + 1, row.name))?;
        grouped.entry(row.name).or_default().push(item);
    }

    Ok(grouped
        .into_iter()
        .map(|(name, mut data)| {
            data.sort_by_key(|item| item.timestamp);
            TimeSeries::new(name, data)
        })
        .collect())
}
