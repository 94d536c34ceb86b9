// File: crates/chart-core/src/error.rs
// Summary: Error type for series ingestion and registry lookups.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("timestamp {0}ms is outside the representable range")]
    TimestampOutOfRange(i64),

    #[error("series `{0}` has no data points")]
    EmptySeries(String),

    #[error("series `{name}` is not in ascending timestamp order at index {index}")]
    Unordered { name: String, index: usize },

    #[error("series `{name}` has a non-finite close value at index {index}")]
    NonFiniteClose { name: String, index: usize },

    #[error("duplicate series name `{0}`")]
    DuplicateSeries(String),

    #[error("hovered item of series `{0}` is not one of its data points")]
    ForeignHoveredItem(String),

    /// The registry and the series list disagree; always a programming error.
    #[error("series `{0}` is not registered")]
    UnknownSeries(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
