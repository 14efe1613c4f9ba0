#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Stock market and reference data endpoints.
//!
//! This crate adds two extension traits to [`MassiveClient`]:
//!
//! - [`StocksApi`] - Bars, trades, quotes, and snapshots
//! - [`ReferenceApi`] - Tickers, exchanges, market status, dividends, and splits
//!
//! Every method is a thin wrapper over [`MassiveClient::send`] with the
//! matching request struct, so the request structs can also be sent directly.

use async_trait::async_trait;
use massive_core::{
    Aggregates, AggregatesRequest, ItemResponse, ListResponse, MassiveClient, Result,
};

/// Grouped daily, daily open/close, and previous close.
pub mod market;
/// Reference data endpoints.
pub mod reference;
/// Snapshot endpoints.
pub mod snapshots;
/// Trades and quotes.
pub mod trades;

pub use market::{
    DailyOpenClose, DailyOpenCloseRequest, GroupedDailyRequest, PreviousCloseRequest, TickerBar,
    TickerBars,
};
pub use reference::{
    Address, Branding, Dividend, DividendsRequest, Exchange, ExchangesRequest, MarketHoliday,
    MarketHolidaysRequest, MarketStatus, MarketStatusRequest, Split, SplitsRequest,
    TickerDetails, TickerDetailsRequest, TickerInfo, TickerType, TickerTypesRequest,
    TickersRequest,
};
pub use snapshots::{
    Direction, MoversRequest, SnapshotAllRequest, SnapshotBar, SnapshotQuote, SnapshotResponse,
    SnapshotTickerRequest, SnapshotTrade, Snapshots, TickerSnapshot,
};
pub use trades::{
    LastQuote, LastQuoteRequest, LastTrade, LastTradeRequest, Quote, QuotesRequest, TickFilter,
    Trade, TradesRequest,
};

/// Stock market data.
#[async_trait]
pub trait StocksApi {
    /// Aggregate bars over a date range.
    async fn aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates>;

    /// Daily bars for every US stock on one day.
    async fn grouped_daily(&self, request: &GroupedDailyRequest) -> Result<TickerBars>;

    /// Open, close, and extended-hours prices for one ticker on one day.
    async fn daily_open_close(&self, request: &DailyOpenCloseRequest) -> Result<DailyOpenClose>;

    /// The previous trading day's bar.
    async fn previous_close(&self, request: &PreviousCloseRequest) -> Result<TickerBars>;

    /// One page of tick-level trades.
    async fn trades(&self, request: &TradesRequest) -> Result<ListResponse<Trade>>;

    /// The most recent trade.
    async fn last_trade(&self, request: &LastTradeRequest) -> Result<ItemResponse<LastTrade>>;

    /// One page of NBBO quotes.
    async fn quotes(&self, request: &QuotesRequest) -> Result<ListResponse<Quote>>;

    /// The most recent NBBO quote.
    async fn last_quote(&self, request: &LastQuoteRequest) -> Result<ItemResponse<LastQuote>>;

    /// Snapshots of all (or selected) tickers.
    async fn snapshot_all(&self, request: &SnapshotAllRequest) -> Result<Snapshots>;

    /// Snapshot of a single ticker.
    async fn snapshot_ticker(&self, request: &SnapshotTickerRequest) -> Result<SnapshotResponse>;

    /// Top 20 gainers or losers.
    async fn snapshot_movers(&self, request: &MoversRequest) -> Result<Snapshots>;
}

#[async_trait]
impl StocksApi for MassiveClient {
    async fn aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates> {
        self.send(request).await
    }

    async fn grouped_daily(&self, request: &GroupedDailyRequest) -> Result<TickerBars> {
        self.send(request).await
    }

    async fn daily_open_close(&self, request: &DailyOpenCloseRequest) -> Result<DailyOpenClose> {
        self.send(request).await
    }

    async fn previous_close(&self, request: &PreviousCloseRequest) -> Result<TickerBars> {
        self.send(request).await
    }

    async fn trades(&self, request: &TradesRequest) -> Result<ListResponse<Trade>> {
        self.send(request).await
    }

    async fn last_trade(&self, request: &LastTradeRequest) -> Result<ItemResponse<LastTrade>> {
        self.send(request).await
    }

    async fn quotes(&self, request: &QuotesRequest) -> Result<ListResponse<Quote>> {
        self.send(request).await
    }

    async fn last_quote(&self, request: &LastQuoteRequest) -> Result<ItemResponse<LastQuote>> {
        self.send(request).await
    }

    async fn snapshot_all(&self, request: &SnapshotAllRequest) -> Result<Snapshots> {
        self.send(request).await
    }

    async fn snapshot_ticker(&self, request: &SnapshotTickerRequest) -> Result<SnapshotResponse> {
        self.send(request).await
    }

    async fn snapshot_movers(&self, request: &MoversRequest) -> Result<Snapshots> {
        self.send(request).await
    }
}

/// Reference data.
#[async_trait]
pub trait ReferenceApi {
    /// One page of the ticker list.
    async fn tickers(&self, request: &TickersRequest) -> Result<ListResponse<TickerInfo>>;

    /// Details of one ticker.
    async fn ticker_details(
        &self,
        request: &TickerDetailsRequest,
    ) -> Result<ItemResponse<TickerDetails>>;

    /// Ticker type codes.
    async fn ticker_types(&self, request: &TickerTypesRequest) -> Result<ListResponse<TickerType>>;

    /// Current market status.
    async fn market_status(&self) -> Result<MarketStatus>;

    /// Upcoming holidays and early closes.
    async fn market_holidays(&self) -> Result<Vec<MarketHoliday>>;

    /// Exchanges and reporting facilities.
    async fn exchanges(&self, request: &ExchangesRequest) -> Result<ListResponse<Exchange>>;

    /// One page of cash dividends.
    async fn dividends(&self, request: &DividendsRequest) -> Result<ListResponse<Dividend>>;

    /// One page of stock splits.
    async fn splits(&self, request: &SplitsRequest) -> Result<ListResponse<Split>>;
}

#[async_trait]
impl ReferenceApi for MassiveClient {
    async fn tickers(&self, request: &TickersRequest) -> Result<ListResponse<TickerInfo>> {
        self.send(request).await
    }

    async fn ticker_details(
        &self,
        request: &TickerDetailsRequest,
    ) -> Result<ItemResponse<TickerDetails>> {
        self.send(request).await
    }

    async fn ticker_types(&self, request: &TickerTypesRequest) -> Result<ListResponse<TickerType>> {
        self.send(request).await
    }

    async fn market_status(&self) -> Result<MarketStatus> {
        self.send(&MarketStatusRequest).await
    }

    async fn market_holidays(&self) -> Result<Vec<MarketHoliday>> {
        self.send(&MarketHolidaysRequest).await
    }

    async fn exchanges(&self, request: &ExchangesRequest) -> Result<ListResponse<Exchange>> {
        self.send(request).await
    }

    async fn dividends(&self, request: &DividendsRequest) -> Result<ListResponse<Dividend>> {
        self.send(request).await
    }

    async fn splits(&self, request: &SplitsRequest) -> Result<ListResponse<Split>> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use massive_core::testing::{MockServer, TEST_API_KEY};
    use massive_core::{Error, Order, Timespan};

    #[tokio::test]
    async fn test_aggregates_through_trait() {
        let body = r#"{
            "ticker": "AAPL",
            "adjusted": true,
            "queryCount": 1,
            "resultsCount": 1,
            "status": "OK",
            "request_id": "6a7e466379af0a71039d60cc78e72282",
            "results": [{"v": 70790813, "vw": 131.6292, "o": 130.465, "c": 130.15, "h": 133.41, "l": 129.89, "t": 1673240400000, "n": 645365}]
        }"#;
        let server = MockServer::start(200, body).await;
        let client = server.client();

        let request = AggregatesRequest::new(
            "aapl",
            1,
            Timespan::Day,
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
        )
        .sort(Order::Asc);
        let bars = client.aggregates(&request).await.unwrap();
        assert_eq!(bars.results.len(), 1);
        assert_eq!(bars.results[0].close, 130.15);

        let recorded = server.last_request().unwrap();
        assert_eq!(
            recorded.path,
            "/v2/aggs/ticker/AAPL/range/1/day/2023-01-09/2023-01-09"
        );
        assert_eq!(recorded.query_value("sort"), Some("asc"));
        assert_eq!(recorded.query_value("apiKey"), Some(TEST_API_KEY));
    }

    #[tokio::test]
    async fn test_market_status_through_trait() {
        let body = r#"{"market":"open","serverTime":"2025-01-06T10:00:00-05:00","earlyHours":false,"afterHours":false,"exchanges":{"nasdaq":"open","nyse":"open"}}"#;
        let server = MockServer::start(200, body).await;

        let status = server.client().market_status().await.unwrap();
        assert!(status.is_open());

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/v1/marketstatus/now");
        assert_eq!(recorded.query, vec![("apiKey".to_string(), TEST_API_KEY.to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_api_error() {
        let body = r#"{"status":"NOT_FOUND","request_id":"1","message":"Ticker not found."}"#;
        let server = MockServer::start(404, body).await;

        let err = server
            .client()
            .ticker_details(&TickerDetailsRequest::new("NOPE"))
            .await
            .unwrap_err();
        match err {
            Error::Api { status, body: raw } => {
                assert_eq!(status, 404);
                assert_eq!(raw, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
