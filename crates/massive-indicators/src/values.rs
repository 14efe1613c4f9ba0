//! Indicator responses and their DataFrame form.

use massive_core::{Agg, Error, Result, impl_paginated};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Bars the indicator was computed from, present with `expand_underlying`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Underlying {
    /// Aggregates URL that reproduces the bars.
    pub url: Option<String>,
    /// The bars.
    #[serde(default)]
    pub aggregates: Vec<Agg>,
}

/// One value of a single-line indicator (SMA, EMA, RSI).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    /// Window start, Unix milliseconds.
    pub timestamp: i64,
    /// Indicator value.
    pub value: f64,
}

/// One MACD value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    /// Window start, Unix milliseconds.
    pub timestamp: i64,
    /// MACD line.
    pub value: f64,
    /// Signal line.
    pub signal: f64,
    /// MACD minus signal.
    pub histogram: f64,
}

/// The `results` object of an indicator response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResults<V> {
    /// Underlying bars.
    pub underlying: Option<Underlying>,
    /// Indicator values.
    #[serde(default = "Vec::new")]
    pub values: Vec<V>,
}

/// Response of an indicator endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResponse<V> {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Values and optional underlying bars.
    pub results: IndicatorResults<V>,
    /// URL of the next page, if any.
    pub next_url: Option<String>,
}

impl_paginated!(IndicatorResponse<IndicatorValue>, IndicatorResponse<MacdValue>);

impl IndicatorResponse<IndicatorValue> {
    /// Converts the values into a DataFrame sorted by timestamp.
    ///
    /// Columns: timestamp (millisecond datetime), value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFrame`] if the frame cannot be built.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let values = &self.results.values;
        let df = DataFrame::new(vec![
            Column::new(
                "timestamp".into(),
                values.iter().map(|v| v.timestamp).collect::<Vec<_>>(),
            ),
            Column::new(
                "value".into(),
                values.iter().map(|v| v.value).collect::<Vec<_>>(),
            ),
        ])
        .map_err(|e| Error::DataFrame(e.to_string()))?;

        sort_by_timestamp(df)
    }
}

impl IndicatorResponse<MacdValue> {
    /// Converts the values into a DataFrame sorted by timestamp.
    ///
    /// Columns: timestamp (millisecond datetime), value, signal, histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFrame`] if the frame cannot be built.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let values = &self.results.values;
        let df = DataFrame::new(vec![
            Column::new(
                "timestamp".into(),
                values.iter().map(|v| v.timestamp).collect::<Vec<_>>(),
            ),
            Column::new(
                "value".into(),
                values.iter().map(|v| v.value).collect::<Vec<_>>(),
            ),
            Column::new(
                "signal".into(),
                values.iter().map(|v| v.signal).collect::<Vec<_>>(),
            ),
            Column::new(
                "histogram".into(),
                values.iter().map(|v| v.histogram).collect::<Vec<_>>(),
            ),
        ])
        .map_err(|e| Error::DataFrame(e.to_string()))?;

        sort_by_timestamp(df)
    }
}

fn sort_by_timestamp(df: DataFrame) -> Result<DataFrame> {
    df.lazy()
        .with_column(col("timestamp").cast(DataType::Datetime(TimeUnit::Milliseconds, None)))
        .sort(["timestamp"], Default::default())
        .collect()
        .map_err(|e| Error::DataFrame(e.to_string()))
}
