//! Market-wide and single-ticker snapshots.

use massive_core::{QueryParams, Request, Ticker, join_tickers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters for `/v2/snapshot/locale/us/markets/stocks/tickers`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotAllRequest {
    /// Restrict to these tickers; empty means all.
    pub tickers: Vec<Ticker>,
    /// Whether to include OTC securities.
    pub include_otc: Option<bool>,
}

impl SnapshotAllRequest {
    /// Creates a request for every ticker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the snapshot to `tickers`.
    #[must_use]
    pub fn tickers<T: Into<Ticker>>(mut self, tickers: impl IntoIterator<Item = T>) -> Self {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether to include OTC securities.
    #[must_use]
    pub fn include_otc(mut self, include_otc: bool) -> Self {
        self.include_otc = Some(include_otc);
        self
    }
}

impl Request for SnapshotAllRequest {
    type Response = Snapshots;

    fn path(&self) -> String {
        "/v2/snapshot/locale/us/markets/stocks/tickers".to_string()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("tickers", join_tickers(&self.tickers))
            .with_opt("include_otc", self.include_otc)
    }
}

/// Parameters for `/v2/snapshot/locale/us/markets/stocks/tickers/{ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotTickerRequest {
    /// Stock ticker.
    pub ticker: Ticker,
}

impl SnapshotTickerRequest {
    /// Creates a request for the snapshot of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

impl Request for SnapshotTickerRequest {
    type Response = SnapshotResponse;

    fn path(&self) -> String {
        format!(
            "/v2/snapshot/locale/us/markets/stocks/tickers/{}",
            self.ticker
        )
    }
}

/// Direction for the movers snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Top gainers.
    #[default]
    Gainers,
    /// Top losers.
    Losers,
}

impl Direction {
    /// Returns the path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gainers => "gainers",
            Self::Losers => "losers",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `/v2/snapshot/locale/us/markets/stocks/{direction}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoversRequest {
    /// Gainers or losers.
    pub direction: Direction,
    /// Whether to include OTC securities.
    pub include_otc: Option<bool>,
}

impl MoversRequest {
    /// Creates a request for the top 20 movers in `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            include_otc: None,
        }
    }

    /// Sets whether to include OTC securities.
    #[must_use]
    pub const fn include_otc(mut self, include_otc: bool) -> Self {
        self.include_otc = Some(include_otc);
        self
    }
}

impl Request for MoversRequest {
    type Response = Snapshots;

    fn path(&self) -> String {
        format!("/v2/snapshot/locale/us/markets/stocks/{}", self.direction)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with_opt("include_otc", self.include_otc)
    }
}

/// A bar inside a snapshot (day, previous day, or latest minute).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBar {
    /// Open price.
    #[serde(rename = "o", default)]
    pub open: f64,
    /// Highest price.
    #[serde(rename = "h", default)]
    pub high: f64,
    /// Lowest price.
    #[serde(rename = "l", default)]
    pub low: f64,
    /// Close price.
    #[serde(rename = "c", default)]
    pub close: f64,
    /// Trading volume.
    #[serde(rename = "v", default)]
    pub volume: f64,
    /// Volume weighted average price.
    #[serde(rename = "vw")]
    pub vwap: Option<f64>,
    /// Accumulated volume for the day (minute bar only).
    #[serde(rename = "av")]
    pub accumulated_volume: Option<f64>,
    /// Number of transactions (minute bar only).
    #[serde(rename = "n")]
    pub transactions: Option<u64>,
    /// Window start, Unix milliseconds (minute bar only).
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

/// Latest quote inside a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotQuote {
    /// Ask price.
    #[serde(rename = "P", default)]
    pub ask_price: f64,
    /// Ask size in round lots.
    #[serde(rename = "S", default)]
    pub ask_size: f64,
    /// Bid price.
    #[serde(rename = "p", default)]
    pub bid_price: f64,
    /// Bid size in round lots.
    #[serde(rename = "s", default)]
    pub bid_size: f64,
    /// Quote timestamp, Unix nanoseconds.
    #[serde(rename = "t", default)]
    pub timestamp: i64,
}

/// Latest trade inside a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTrade {
    /// Trade condition codes.
    #[serde(rename = "c", default)]
    pub conditions: Vec<i32>,
    /// Trade id.
    #[serde(rename = "i", default)]
    pub id: String,
    /// Trade price.
    #[serde(rename = "p", default)]
    pub price: f64,
    /// Trade size.
    #[serde(rename = "s", default)]
    pub size: f64,
    /// Trade timestamp, Unix nanoseconds.
    #[serde(rename = "t", default)]
    pub timestamp: i64,
    /// Exchange id.
    #[serde(rename = "x", default)]
    pub exchange: i32,
}

/// Snapshot of one ticker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    /// Ticker.
    pub ticker: String,
    /// Current day's bar.
    pub day: Option<SnapshotBar>,
    /// Latest quote.
    pub last_quote: Option<SnapshotQuote>,
    /// Latest trade.
    pub last_trade: Option<SnapshotTrade>,
    /// Latest minute bar.
    pub min: Option<SnapshotBar>,
    /// Previous day's bar.
    pub prev_day: Option<SnapshotBar>,
    /// Change since previous close.
    #[serde(default)]
    pub todays_change: f64,
    /// Percent change since previous close.
    #[serde(default)]
    pub todays_change_perc: f64,
    /// Last update, Unix nanoseconds.
    #[serde(default)]
    pub updated: i64,
    /// Fair market value (business plans only).
    pub fmv: Option<f64>,
}

/// Response of the snapshot-all and movers endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshots {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Number of tickers.
    pub count: Option<u64>,
    /// Ticker snapshots.
    #[serde(default)]
    pub tickers: Vec<TickerSnapshot>,
}

/// Response of the single-ticker snapshot endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// The snapshot.
    pub ticker: TickerSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;

    const SNAPSHOT: &str = r#"{
        "day": {"c": 245.0, "h": 247.33, "l": 243.2, "o": 244.31, "v": 45045571, "vw": 245.3},
        "lastQuote": {"P": 245.05, "S": 4, "p": 245.01, "s": 2, "t": 1736197200000000000},
        "lastTrade": {"c": [14, 41], "i": "71675577320245", "p": 245.03, "s": 100, "t": 1736197199000000000, "x": 4},
        "min": {"av": 45045571, "c": 245.0, "h": 245.1, "l": 244.9, "n": 310, "o": 245.0, "t": 1736197140000, "v": 21000, "vw": 245.0},
        "prevDay": {"c": 243.36, "h": 245.15, "l": 241.82, "o": 242.98, "v": 40000000, "vw": 243.5},
        "ticker": "AAPL",
        "todaysChange": 1.64,
        "todaysChangePerc": 0.674,
        "updated": 1736197200000000000
    }"#;

    #[test]
    fn test_paths_and_queries() {
        let all = SnapshotAllRequest::new().tickers(["aapl", "msft"]);
        assert_eq!(all.path(), "/v2/snapshot/locale/us/markets/stocks/tickers");
        assert_eq!(all.query().get("tickers"), Some("AAPL,MSFT"));

        assert!(SnapshotAllRequest::new().query().is_empty());

        assert_eq!(
            SnapshotTickerRequest::new("aapl").path(),
            "/v2/snapshot/locale/us/markets/stocks/tickers/AAPL"
        );
        assert_eq!(
            MoversRequest::new(Direction::Losers).path(),
            "/v2/snapshot/locale/us/markets/stocks/losers"
        );
    }

    #[test]
    fn test_decode_snapshot() {
        let body = format!(r#"{{"status":"OK","request_id":"1","ticker":{SNAPSHOT}}}"#);
        let response: SnapshotResponse = serde_json::from_str(&body).unwrap();
        let snapshot = response.ticker;
        assert_eq!(snapshot.ticker, "AAPL");
        assert_eq!(snapshot.day.unwrap().close, 245.0);
        assert_eq!(snapshot.last_quote.unwrap().ask_size, 4.0);
        assert_eq!(snapshot.min.unwrap().accumulated_volume, Some(45_045_571.0));
        assert_eq!(snapshot.prev_day.unwrap().vwap, Some(243.5));
        assert_eq!(snapshot.fmv, None);
    }

    #[tokio::test]
    async fn test_movers_round_trip() {
        let body = format!(r#"{{"status":"OK","tickers":[{SNAPSHOT}]}}"#);
        let server = MockServer::start(200, body).await;

        let movers = server
            .client()
            .send(&MoversRequest::new(Direction::Gainers).include_otc(false))
            .await
            .unwrap();
        assert_eq!(movers.tickers.len(), 1);
        assert_eq!(movers.tickers[0].todays_change, 1.64);

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/v2/snapshot/locale/us/markets/stocks/gainers");
        assert_eq!(recorded.query_value("include_otc"), Some("false"));
    }
}
