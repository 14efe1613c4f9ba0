//! Daily bars: grouped daily, daily open/close, previous close.

use chrono::NaiveDate;
use massive_core::{Agg, QueryParams, Request, Ticker};
use serde::{Deserialize, Serialize};

/// Parameters for `/v2/aggs/grouped/locale/us/market/stocks/{date}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupedDailyRequest {
    /// Trading day.
    pub date: NaiveDate,
    /// Whether results are split adjusted.
    pub adjusted: Option<bool>,
    /// Whether to include OTC securities.
    pub include_otc: Option<bool>,
}

impl GroupedDailyRequest {
    /// Creates a request for every US stock's bar on `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            adjusted: None,
            include_otc: None,
        }
    }

    /// Sets whether results are split adjusted.
    #[must_use]
    pub const fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }

    /// Sets whether to include OTC securities.
    #[must_use]
    pub const fn include_otc(mut self, include_otc: bool) -> Self {
        self.include_otc = Some(include_otc);
        self
    }
}

impl Request for GroupedDailyRequest {
    type Response = TickerBars;

    fn path(&self) -> String {
        format!(
            "/v2/aggs/grouped/locale/us/market/stocks/{}",
            self.date.format("%Y-%m-%d")
        )
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("adjusted", self.adjusted)
            .with_opt("include_otc", self.include_otc)
    }
}

/// Parameters for `/v2/aggs/ticker/{ticker}/prev`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviousCloseRequest {
    /// Stock ticker.
    pub ticker: Ticker,
    /// Whether results are split adjusted.
    pub adjusted: Option<bool>,
}

impl PreviousCloseRequest {
    /// Creates a request for the previous trading day's bar of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            adjusted: None,
        }
    }

    /// Sets whether results are split adjusted.
    #[must_use]
    pub fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }
}

impl Request for PreviousCloseRequest {
    type Response = TickerBars;

    fn path(&self) -> String {
        format!("/v2/aggs/ticker/{}/prev", self.ticker)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with_opt("adjusted", self.adjusted)
    }
}

/// A bar tagged with its ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickerBar {
    /// Ticker of the bar.
    #[serde(rename = "T")]
    pub ticker: String,
    /// The bar itself.
    #[serde(flatten)]
    pub bar: Agg,
}

/// Response of the grouped daily and previous close endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerBars {
    /// Requested ticker, for previous close.
    pub ticker: Option<String>,
    /// Response status.
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
    /// The bars.
    #[serde(default)]
    pub results: Vec<TickerBar>,
}

impl TickerBars {
    /// Returns the bar for `ticker`, if present.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&Agg> {
        self.results
            .iter()
            .find(|r| r.ticker == ticker)
            .map(|r| &r.bar)
    }
}

/// Parameters for `/v1/open-close/{ticker}/{date}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyOpenCloseRequest {
    /// Stock ticker.
    pub ticker: Ticker,
    /// Trading day.
    pub date: NaiveDate,
    /// Whether results are split adjusted.
    pub adjusted: Option<bool>,
}

impl DailyOpenCloseRequest {
    /// Creates a request for the open, close, and extended-hours prices of `ticker` on `date`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>, date: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            adjusted: None,
        }
    }

    /// Sets whether results are split adjusted.
    #[must_use]
    pub fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = Some(adjusted);
        self
    }
}

impl Request for DailyOpenCloseRequest {
    type Response = DailyOpenClose;

    fn path(&self) -> String {
        format!(
            "/v1/open-close/{}/{}",
            self.ticker,
            self.date.format("%Y-%m-%d")
        )
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with_opt("adjusted", self.adjusted)
    }
}

/// Open, close, and extended-hours prices for one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOpenClose {
    /// Response status.
    pub status: String,
    /// Trading day, `YYYY-MM-DD`.
    #[serde(default)]
    pub from: String,
    /// Ticker.
    #[serde(default)]
    pub symbol: String,
    /// Open price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Trading volume.
    #[serde(default)]
    pub volume: f64,
    /// Close of the after-hours session.
    pub after_hours: Option<f64>,
    /// Open of the pre-market session.
    pub pre_market: Option<f64>,
    /// Whether the instrument traded over the counter.
    pub otc: Option<bool>,
}
