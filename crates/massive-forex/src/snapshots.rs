//! Forex snapshots.

use massive_core::{QueryParams, Request, Ticker, join_tickers};
use serde::{Deserialize, Serialize};

/// Parameters for `/v2/snapshot/locale/global/markets/forex/tickers`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForexSnapshotAllRequest {
    /// Restrict to these `C:` tickers; empty means all.
    pub tickers: Vec<Ticker>,
}

impl ForexSnapshotAllRequest {
    /// Creates a request for every currency pair.
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
}

impl Request for ForexSnapshotAllRequest {
    type Response = ForexSnapshots;

    fn path(&self) -> String {
        "/v2/snapshot/locale/global/markets/forex/tickers".to_string()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with("tickers", join_tickers(&self.tickers))
    }
}

/// Parameters for `/v2/snapshot/locale/global/markets/forex/tickers/{ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForexSnapshotTickerRequest {
    /// Currency pair ticker, `C:` prefixed.
    pub ticker: Ticker,
}

impl ForexSnapshotTickerRequest {
    /// Creates a request for the snapshot of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

impl Request for ForexSnapshotTickerRequest {
    type Response = ForexSnapshotResponse;

    fn path(&self) -> String {
        format!(
            "/v2/snapshot/locale/global/markets/forex/tickers/{}",
            self.ticker
        )
    }
}

/// A bar inside a forex snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForexBar {
    /// Open rate.
    #[serde(rename = "o")]
    pub open: f64,
    /// Highest rate.
    #[serde(rename = "h")]
    pub high: f64,
    /// Lowest rate.
    #[serde(rename = "l")]
    pub low: f64,
    /// Close rate.
    #[serde(rename = "c")]
    pub close: f64,
    /// Number of quotes.
    #[serde(rename = "v")]
    pub volume: f64,
    /// Volume weighted average rate.
    #[serde(rename = "vw")]
    pub vwap: Option<f64>,
    /// Window start, Unix milliseconds (minute bar only).
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

/// Latest quote inside a forex snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForexQuote {
    /// Ask rate.
    #[serde(rename = "a")]
    pub ask: f64,
    /// Bid rate.
    #[serde(rename = "b")]
    pub bid: f64,
    /// Quote time, Unix milliseconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    /// Exchange id.
    #[serde(rename = "x")]
    pub exchange: i32,
}

/// Snapshot of one currency pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexSnapshot {
    /// Pair ticker, e.g. `C:EURUSD`.
    pub ticker: String,
    /// Current day's bar.
    pub day: Option<ForexBar>,
    /// Latest quote.
    pub last_quote: Option<ForexQuote>,
    /// Latest minute bar.
    pub min: Option<ForexBar>,
    /// Previous day's bar.
    pub prev_day: Option<ForexBar>,
    /// Change since previous close.
    #[serde(default)]
    pub todays_change: f64,
    /// Percent change since previous close.
    #[serde(default)]
    pub todays_change_perc: f64,
    /// Last update, Unix nanoseconds.
    #[serde(default)]
    pub updated: i64,
}

/// Response of the forex snapshot-all endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForexSnapshots {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Pair snapshots.
    #[serde(default)]
    pub tickers: Vec<ForexSnapshot>,
}

/// Response of the single-pair forex snapshot endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForexSnapshotResponse {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// The snapshot.
    pub ticker: ForexSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;

    const SNAPSHOT: &str = r#"{
        "day": {"c": 1.0421, "h": 1.0436, "l": 1.0302, "o": 1.0305, "v": 209041},
        "lastQuote": {"a": 1.0422, "b": 1.0421, "t": 1736197200000, "x": 48},
        "min": {"c": 1.0421, "h": 1.0423, "l": 1.042, "o": 1.0421, "t": 1736197140000, "v": 120},
        "prevDay": {"c": 1.0308, "h": 1.0346, "l": 1.0282, "o": 1.0338, "v": 180000, "vw": 1.0312},
        "ticker": "C:EURUSD",
        "todaysChange": 0.0113,
        "todaysChangePerc": 1.096,
        "updated": 1736197200000000000
    }"#;

    #[test]
    fn test_paths_and_queries() {
        let all = ForexSnapshotAllRequest::new().tickers(["c:eurusd", "c:gbpusd"]);
        assert_eq!(all.query().get("tickers"), Some("C:EURUSD,C:GBPUSD"));
        assert!(ForexSnapshotAllRequest::new().query().is_empty());
        assert_eq!(
            ForexSnapshotTickerRequest::new("C:EURUSD").path(),
            "/v2/snapshot/locale/global/markets/forex/tickers/C:EURUSD"
        );
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let body = format!(r#"{{"status":"OK","request_id":"1","ticker":{SNAPSHOT}}}"#);
        let server = MockServer::start(200, body).await;

        let response = server
            .client()
            .send(&ForexSnapshotTickerRequest::new("C:EURUSD"))
            .await
            .unwrap();
        let snapshot = response.ticker;
        assert_eq!(snapshot.last_quote.unwrap().ask, 1.0422);
        assert_eq!(snapshot.day.unwrap().vwap, None);
        assert_eq!(snapshot.prev_day.unwrap().vwap, Some(1.0312));

        let recorded = server.last_request().unwrap();
        assert_eq!(
            recorded.path,
            "/v2/snapshot/locale/global/markets/forex/tickers/C:EURUSD"
        );
    }
}
