// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; scales, path building, hover hit-testing and the chart frame.

pub mod axis;
pub mod calendar;
pub mod chart;
pub mod error;
pub mod format;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod path;
pub mod registry;
pub mod scale;
pub mod series;
pub mod types;
pub mod view;
#[cfg(feature = "sample")]
pub mod sample;

pub use axis::{AxisTick, Line};
pub use chart::{ChartOptions, LineChart};
pub use error::{ChartError, Result};
pub use format::{format_currency, format_number, tooltip_date, LegendFormatter};
pub use frame::{AreaPath, ChartFrame, GradientStop, LegendItem, Marker, SeriesPath, Tooltip};
pub use geometry::{PlotArea, Point};
pub use interaction::{HoverBand, HoverState, InteractionController, PointerEvent};
pub use path::{area_path, build_path, catmull_rom_to_bezier};
pub use registry::{locate, SeriesRegistry};
pub use scale::{ScaleTransform, TimeScale, ValueScale};
pub use series::{ChartColor, TimeSeries, TimeSeriesItem};
pub use types::Insets;
pub use view::{Changed, ChartInputs, ChartState};
