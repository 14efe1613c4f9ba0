//! Parameters shared by every indicator endpoint.

use massive_core::{Order, QueryParams, RangeFilter, Timespan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price field the indicator is computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    /// Open price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Close price.
    #[default]
    Close,
}

impl SeriesType {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options common to SMA, EMA, RSI, and MACD requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorParams {
    /// Filter on value timestamp (`YYYY-MM-DD` or Unix milliseconds).
    pub timestamp: RangeFilter,
    /// Size of the aggregate window the indicator is computed over.
    pub timespan: Option<Timespan>,
    /// Whether the underlying bars are split adjusted.
    pub adjusted: Option<bool>,
    /// Price field to compute from.
    pub series_type: Option<SeriesType>,
    /// Include the underlying aggregates in the response.
    pub expand_underlying: Option<bool>,
    /// Ordering by timestamp (provider default: desc).
    pub order: Option<Order>,
    /// Number of values (max 5000).
    pub limit: Option<u32>,
}

impl IndicatorParams {
    pub(crate) fn write(&self, query: &mut QueryParams) {
        query
            .set_opt("timespan", self.timespan)
            .set_opt("adjusted", self.adjusted)
            .set_opt("series_type", self.series_type)
            .set_opt("expand_underlying", self.expand_underlying)
            .set_opt("order", self.order)
            .set_opt("limit", self.limit);
        self.timestamp.apply("timestamp", query);
    }
}
