// File: crates/chart-core/src/series.rs
// Summary: Time-series data model (items, named series, color hints) and input validation.
// Notes:
// - Timestamps arrive either as strings or as epoch milliseconds and are
//   normalized to `DateTime<Utc>` on ingestion. Everything downstream compares
//   instants, never strings.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, Result};

/// One observation: a close value at an instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesItem {
    #[serde(deserialize_with = "de_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl TimeSeriesItem {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }

    /// Build an item from a textual timestamp (see [`parse_timestamp`]).
    pub fn parse(timestamp: &str, close: f64) -> Result<Self> {
        Ok(Self::new(parse_timestamp(timestamp)?, close))
    }

    /// Build an item from epoch milliseconds.
    pub fn from_millis(millis: i64, close: f64) -> Result<Self> {
        Ok(Self::new(from_epoch_millis(millis)?, close))
    }
}

/// Display hint forwarded to the render layer: a CSS variable and its fallback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartColor {
    pub var: String,
    pub fallback: String,
}

/// A named, chronologically ascending sequence of items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub name: String,
    pub data: Vec<TimeSeriesItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovered_item: Option<TimeSeriesItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ChartColor>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, data: Vec<TimeSeriesItem>) -> Self {
        Self { name: name.into(), data, hovered_item: None, color: None }
    }

    pub fn with_color(mut self, var: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.color = Some(ChartColor { var: var.into(), fallback: fallback.into() });
        self
    }

    pub fn first(&self) -> Option<&TimeSeriesItem> { self.data.first() }
    pub fn last(&self) -> Option<&TimeSeriesItem> { self.data.last() }

    /// Check the per-series invariants: non-empty, ascending timestamps,
    /// finite closes, and a hovered item (if any) taken from `data`.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(ChartError::EmptySeries(self.name.clone()));
        }
        for (index, item) in self.data.iter().enumerate() {
            if !item.close.is_finite() {
                return Err(ChartError::NonFiniteClose { name: self.name.clone(), index });
            }
            if index > 0 && item.timestamp < self.data[index - 1].timestamp {
                return Err(ChartError::Unordered { name: self.name.clone(), index });
            }
        }
        if let Some(hovered) = &self.hovered_item {
            if !self.data.contains(hovered) {
                return Err(ChartError::ForeignHoveredItem(self.name.clone()));
            }
        }
        Ok(())
    }
}

/// Validate a whole input list, including name uniqueness.
pub fn validate_series(series: &[TimeSeries]) -> Result<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for s in series {
        s.validate()?;
        if !seen.insert(s.name.as_str()) {
            return Err(ChartError::DuplicateSeries(s.name.clone()));
        }
    }
    Ok(())
}

/// Parse a textual timestamp.
///
/// Accepted forms: RFC 3339 (`2024-01-01T12:00:00+02:00`), a naive date-time
/// (`2024-01-01T12:00:00`, `2024-01-01 12:00:00`, optional fraction) and a bare
/// date (`2024-01-01`). Anything without an offset is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = s.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()).and_utc());
    }
    Err(ChartError::InvalidTimestamp(raw.to_string()))
}

/// Convert epoch milliseconds to an instant.
pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(ChartError::TimestampOutOfRange(millis))
}

/// Serde helper: accept a timestamp as a string or as epoch milliseconds.
fn de_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a date string or a number of epoch milliseconds")
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            from_epoch_millis(v).map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = i64::try_from(v).map_err(E::custom)?;
            self.visit_i64(v)
        }

        fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !v.is_finite() {
                return Err(E::custom("non-finite epoch milliseconds"));
            }
            // Fractional milliseconds truncate toward zero.
            self.visit_i64(v.trunc() as i64)
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_timestamp(s).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}
