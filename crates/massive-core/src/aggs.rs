//! Aggregate bars, shared by stocks, options, and forex.
//!
//! The same endpoint serves every asset class; the ticker prefix (`O:`, `C:`)
//! selects the market.

use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    impl_paginated,
    params::{Order, Timespan},
    query::QueryParams,
    request::Request,
    time::from_unix_millis,
    types::{RangeBound, Ticker},
};

/// Parameters for `/v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatesRequest {
    /// Instrument ticker.
    pub ticker: Ticker,
    /// Number of timespans per bar.
    pub multiplier: u32,
    /// Size of each window.
    pub timespan: Timespan,
    /// Start of the range (inclusive).
    pub from: RangeBound,
    /// End of the range (inclusive).
    pub to: RangeBound,
    /// Whether results are adjusted for splits (provider default: true).
    pub adjusted: Option<bool>,
    /// Sort by timestamp.
    pub sort: Option<Order>,
    /// Maximum number of base aggregates queried (max 50000).
    pub limit: Option<u32>,
}

impl AggregatesRequest {
    /// Creates a request for `multiplier` x `timespan` bars between `from` and `to`.
    #[must_use]
    pub fn new(
        ticker: impl Into<Ticker>,
        multiplier: u32,
        timespan: Timespan,
        from: impl Into<RangeBound>,
        to: impl Into<RangeBound>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            multiplier,
            timespan,
            from: from.into(),
            to: to.into(),
            adjusted: None,
            sort: None,
            limit: None,
        }
    }

    /// Sets whether results are split adjusted.
    #[must_use]
    pub const fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sort(mut self, sort: Order) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for AggregatesRequest {
    type Response = Aggregates;

    fn path(&self) -> String {
        format!(
            "/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.ticker, self.multiplier, self.timespan, self.from, self.to
        )
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("adjusted", self.adjusted)
            .with_opt("sort", self.sort)
            .with_opt("limit", self.limit)
    }
}

/// One aggregate bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agg {
    /// Open price.
    #[serde(rename = "o")]
    pub open: f64,
    /// Highest price.
    #[serde(rename = "h")]
    pub high: f64,
    /// Lowest price.
    #[serde(rename = "l")]
    pub low: f64,
    /// Close price.
    #[serde(rename = "c")]
    pub close: f64,
    /// Trading volume.
    #[serde(rename = "v", default)]
    pub volume: f64,
    /// Volume weighted average price.
    #[serde(rename = "vw")]
    pub vwap: Option<f64>,
    /// Start of the window, Unix milliseconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    /// Number of transactions in the window.
    #[serde(rename = "n")]
    pub transactions: Option<u64>,
    /// Whether the instrument traded over the counter.
    pub otc: Option<bool>,
}

impl Agg {
    /// Returns the window start as a UTC datetime.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        from_unix_millis(self.timestamp)
    }
}

/// Response of the aggregates endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Requested ticker.
    #[serde(default)]
    pub ticker: String,
    /// Response status (`OK`, `DELAYED`).
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Whether results are split adjusted.
    pub adjusted: Option<bool>,
    /// Number of base aggregates queried.
    #[serde(rename = "queryCount")]
    pub query_count: Option<u64>,
    /// Number of bars returned.
    #[serde(rename = "resultsCount")]
    pub results_count: Option<u64>,
    /// Bars in this page.
    #[serde(default)]
    pub results: Vec<Agg>,
    /// URL of the next page, if any.
    pub next_url: Option<String>,
}

impl_paginated!(Aggregates);

impl Aggregates {
    /// Converts the bars into a DataFrame.
    ///
    /// See [`bars_to_dataframe`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFrame`] if the frame cannot be built.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        bars_to_dataframe(&self.results)
    }
}

/// Converts bars into a DataFrame sorted by timestamp.
///
/// Columns: timestamp (millisecond datetime), open, high, low, close, volume,
/// vwap, transactions.
///
/// # Errors
///
/// Returns [`Error::DataFrame`] if the frame cannot be built.
pub fn bars_to_dataframe(bars: &[Agg]) -> Result<DataFrame> {
    let timestamps: Vec<i64> = bars.iter().map(|b| b.timestamp).collect();
    let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let vwaps: Vec<Option<f64>> = bars.iter().map(|b| b.vwap).collect();
    let transactions: Vec<Option<u64>> = bars.iter().map(|b| b.transactions).collect();

    let df = DataFrame::new(vec![
        Column::new("timestamp".into(), timestamps),
        Column::new("open".into(), opens),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("close".into(), closes),
        Column::new("volume".into(), volumes),
        Column::new("vwap".into(), vwaps),
        Column::new("transactions".into(), transactions),
    ])
    .map_err(|e| Error::DataFrame(e.to_string()))?;

    sort_by_timestamp(df)
}

/// Casts the `timestamp` column to a millisecond datetime and sorts on it.
fn sort_by_timestamp(df: DataFrame) -> Result<DataFrame> {
    df.lazy()
        .with_column(col("timestamp").cast(DataType::Datetime(TimeUnit::Milliseconds, None)))
        .sort(["timestamp"], Default::default())
        .collect()
        .map_err(|e| Error::DataFrame(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockServer;
    use crate::Paginated;
    use chrono::NaiveDate;

    const BODY: &str = r#"{
        "ticker": "AAPL",
        "queryCount": 2,
        "resultsCount": 2,
        "adjusted": true,
        "results": [
            {"v": 55000000, "vw": 244.9, "o": 244.31, "c": 245.0, "h": 247.33, "l": 243.2, "t": 1736139600000, "n": 600000},
            {"v": 40000000, "o": 242.98, "c": 243.36, "h": 245.15, "l": 241.82, "t": 1736053200000}
        ],
        "status": "OK",
        "request_id": "6a7e466379af0a71039d60cc78e72282",
        "next_url": "https://api.massive.com/v2/aggs/ticker/AAPL/range/1/day/1736053200000/1736139600000?cursor=bGltaXQ9Mg"
    }"#;

    fn request() -> AggregatesRequest {
        AggregatesRequest::new(
            "aapl",
            1,
            Timespan::Day,
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        )
    }

    #[test]
    fn test_path_and_query() {
        let req = request().adjusted(true).sort(Order::Desc);
        assert_eq!(req.path(), "/v2/aggs/ticker/AAPL/range/1/day/2025-01-03/2025-01-06");

        let query = req.query();
        assert_eq!(query.get("adjusted"), Some("true"));
        assert_eq!(query.get("sort"), Some("desc"));
        assert!(!query.contains("limit"));
    }

    #[test]
    fn test_millisecond_bounds() {
        let req = AggregatesRequest::new(
            "C:EURUSD",
            5,
            Timespan::Minute,
            1_736_053_200_000,
            1_736_139_600_000,
        );
        assert_eq!(
            req.path(),
            "/v2/aggs/ticker/C:EURUSD/range/5/minute/1736053200000/1736139600000"
        );
    }

    #[test]
    fn test_decode_and_dataframe() {
        let aggs: Aggregates = serde_json::from_str(BODY).unwrap();
        assert_eq!(aggs.results.len(), 2);
        assert_eq!(aggs.results_count, Some(2));
        assert_eq!(aggs.results[1].vwap, None);
        assert_eq!(aggs.results[1].transactions, None);
        assert!(aggs.has_next_page());
        assert_eq!(aggs.next_cursor(), Some("bGltaXQ9Mg".to_string()));

        let df = aggs.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["timestamp", "open", "high", "low", "close", "volume", "vwap", "transactions"]
        );

        // Sorted ascending, so the 2025-01-03 bar comes first.
        let closes = df.column("close").unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(closes.get(0), Some(243.36));
        assert_eq!(closes.get(1), Some(245.0));
    }

    #[test]
    fn test_bar_time() {
        let aggs: Aggregates = serde_json::from_str(BODY).unwrap();
        let time = aggs.results[0].time().unwrap();
        assert_eq!(time.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    }

    #[tokio::test]
    async fn test_aggregates_round_trip() {
        let server = MockServer::start(200, BODY).await;
        let aggs = server.client().send(&request().limit(2)).await.unwrap();
        assert_eq!(aggs.ticker, "AAPL");
        assert_eq!(aggs.results[0].open, 244.31);

        let recorded = server.last_request().unwrap();
        assert_eq!(
            recorded.path,
            "/v2/aggs/ticker/AAPL/range/1/day/2025-01-03/2025-01-06"
        );
        assert_eq!(recorded.query_value("limit"), Some("2"));
        assert!(recorded.query_value("adjusted").is_none());
    }
}
