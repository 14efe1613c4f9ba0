#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Technical indicator endpoints.
//!
//! Indicators are computed server-side over aggregate bars of any asset
//! class. Responses convert to a polars `DataFrame` with
//! [`IndicatorResponse::to_dataframe`].

use async_trait::async_trait;
use massive_core::{MassiveClient, Result};

/// Shared indicator parameters.
pub mod params;
/// Indicator requests.
pub mod requests;
/// Indicator responses.
pub mod values;

pub use params::{IndicatorParams, SeriesType};
pub use requests::{EmaRequest, MacdRequest, RsiRequest, SmaRequest};
pub use values::{IndicatorResponse, IndicatorResults, IndicatorValue, MacdValue, Underlying};

/// Technical indicators.
#[async_trait]
pub trait IndicatorsApi {
    /// Simple moving average.
    async fn sma(&self, request: &SmaRequest) -> Result<IndicatorResponse<IndicatorValue>>;

    /// Exponential moving average.
    async fn ema(&self, request: &EmaRequest) -> Result<IndicatorResponse<IndicatorValue>>;

    /// Relative strength index.
    async fn rsi(&self, request: &RsiRequest) -> Result<IndicatorResponse<IndicatorValue>>;

    /// Moving average convergence/divergence.
    async fn macd(&self, request: &MacdRequest) -> Result<IndicatorResponse<MacdValue>>;
}

#[async_trait]
impl IndicatorsApi for MassiveClient {
    async fn sma(&self, request: &SmaRequest) -> Result<IndicatorResponse<IndicatorValue>> {
        self.send(request).await
    }

    async fn ema(&self, request: &EmaRequest) -> Result<IndicatorResponse<IndicatorValue>> {
        self.send(request).await
    }

    async fn rsi(&self, request: &RsiRequest) -> Result<IndicatorResponse<IndicatorValue>> {
        self.send(request).await
    }

    async fn macd(&self, request: &MacdRequest) -> Result<IndicatorResponse<MacdValue>> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;
    use massive_core::{RangeFilter, Timespan};

    #[tokio::test]
    async fn test_sma_with_underlying() {
        let body = r#"{
            "status": "OK",
            "request_id": "a47d1beb8c11b6ae897ab76cdbbf35a3",
            "results": {
                "underlying": {
                    "url": "https://api.massive.com/v2/aggs/ticker/AAPL/range/1/day/1735707600000/1736197200000",
                    "aggregates": [
                        {"v": 45045571, "vw": 245.3, "o": 244.31, "c": 245.0, "h": 247.33, "l": 243.2, "t": 1736139600000, "n": 548911}
                    ]
                },
                "values": [{"timestamp": 1736139600000, "value": 241.77}]
            }
        }"#;
        let server = MockServer::start(200, body).await;

        let request = SmaRequest::new("AAPL")
            .window(50)
            .timespan(Timespan::Day)
            .timestamp(RangeFilter::new().gte("2025-01-01"))
            .expand_underlying(true);
        let response = server.client().sma(&request).await.unwrap();
        let underlying = response.results.underlying.as_ref().unwrap();
        assert_eq!(underlying.aggregates[0].close, 245.0);
        assert_eq!(response.results.values[0].value, 241.77);

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/v1/indicators/sma/AAPL");
        assert_eq!(recorded.query_value("window"), Some("50"));
        assert_eq!(recorded.query_value("expand_underlying"), Some("true"));
        assert_eq!(recorded.query_value("timestamp.gte"), Some("2025-01-01"));
    }

    #[tokio::test]
    async fn test_macd_round_trip() {
        let body = r#"{"status":"OK","results":{"values":[
            {"timestamp": 1736139600000, "value": 1.52, "signal": 1.2, "histogram": 0.32}
        ]}}"#;
        let server = MockServer::start(200, body).await;

        let response = server
            .client()
            .macd(&MacdRequest::new("AAPL").windows(12, 26, 9))
            .await
            .unwrap();
        assert_eq!(response.results.values[0].histogram, 0.32);
        assert_eq!(response.to_dataframe().unwrap().height(), 1);

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/v1/indicators/macd/AAPL");
        assert_eq!(recorded.query_value("signal_window"), Some("9"));
    }
}
