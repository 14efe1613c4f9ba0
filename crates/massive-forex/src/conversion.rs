//! Currency conversion and last quotes for a currency pair.

use chrono::{DateTime, Utc};
use massive_core::time::from_unix_millis;
use massive_core::{QueryParams, Request};
use serde::{Deserialize, Serialize};

/// Parameters for `/v1/conversion/{from}/{to}`.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrencyConversionRequest {
    /// Source currency code, e.g. `AUD`.
    pub from: String,
    /// Target currency code, e.g. `USD`.
    pub to: String,
    /// Amount to convert (provider default: 1).
    pub amount: Option<f64>,
    /// Decimal places in the result, 0 to 4 (provider default: 2).
    pub precision: Option<u8>,
}

impl CurrencyConversionRequest {
    /// Creates a request converting one unit of `from` into `to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into().to_uppercase(),
            to: to.into().to_uppercase(),
            amount: None,
            precision: None,
        }
    }

    /// Sets the amount to convert.
    #[must_use]
    pub const fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the number of decimal places.
    #[must_use]
    pub const fn precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }
}

impl Request for CurrencyConversionRequest {
    type Response = CurrencyConversion;

    fn path(&self) -> String {
        format!("/v1/conversion/{}/{}", self.from, self.to)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("amount", self.amount)
            .with_opt("precision", self.precision)
    }
}

/// Parameters for `/v1/last_quote/currencies/{from}/{to}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastCurrencyQuoteRequest {
    /// Base currency code.
    pub from: String,
    /// Quote currency code.
    pub to: String,
}

impl LastCurrencyQuoteRequest {
    /// Creates a request for the latest `from`/`to` quote.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into().to_uppercase(),
            to: to.into().to_uppercase(),
        }
    }
}

impl Request for LastCurrencyQuoteRequest {
    type Response = LastCurrencyQuote;

    fn path(&self) -> String {
        format!("/v1/last_quote/currencies/{}/{}", self.from, self.to)
    }
}

/// A currency quote as returned by the conversion and last-quote endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    /// Ask price.
    pub ask: f64,
    /// Bid price.
    pub bid: f64,
    /// Exchange id.
    #[serde(default)]
    pub exchange: i32,
    /// Quote time, Unix milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl CurrencyQuote {
    /// Returns the quote time.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        from_unix_millis(self.timestamp)
    }
}

/// Result of a currency conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConversion {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Source currency.
    #[serde(default)]
    pub from: String,
    /// Target currency.
    #[serde(default)]
    pub to: String,
    /// Amount before conversion.
    pub initial_amount: f64,
    /// Amount after conversion.
    pub converted: f64,
    /// Pair symbol, e.g. `AUD/USD`.
    pub symbol: Option<String>,
    /// Quote used for the conversion.
    pub last: Option<CurrencyQuote>,
}

/// Latest quote for a currency pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LastCurrencyQuote {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Pair symbol, e.g. `EUR/USD`.
    #[serde(default)]
    pub symbol: String,
    /// The quote.
    pub last: CurrencyQuote,
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;

    #[test]
    fn test_conversion_request() {
        let request = CurrencyConversionRequest::new("aud", "usd")
            .amount(100.0)
            .precision(2);
        assert_eq!(request.path(), "/v1/conversion/AUD/USD");

        let query = request.query();
        assert_eq!(query.get("amount"), Some("100"));
        assert_eq!(query.get("precision"), Some("2"));

        assert!(CurrencyConversionRequest::new("EUR", "USD").query().is_empty());
    }

    #[tokio::test]
    async fn test_conversion_round_trip() {
        let body = r#"{
            "converted": 62.07,
            "from": "AUD",
            "initialAmount": 100,
            "last": {"ask": 0.6208, "bid": 0.6206, "exchange": 48, "timestamp": 1736197200000},
            "request_id": "a73a29dbcab4613eeaf48583d3baacf0",
            "status": "success",
            "symbol": "AUD/USD",
            "to": "USD"
        }"#;
        let server = MockServer::start(200, body).await;

        let request = CurrencyConversionRequest::new("AUD", "USD").amount(100.0);
        let conversion = server.client().send(&request).await.unwrap();
        assert_eq!(conversion.initial_amount, 100.0);
        assert_eq!(conversion.converted, 62.07);
        let last = conversion.last.unwrap();
        assert_eq!(last.time().unwrap().timestamp_millis(), 1_736_197_200_000);

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/v1/conversion/AUD/USD");
        assert_eq!(recorded.query_value("amount"), Some("100"));
    }

    #[test]
    fn test_decode_last_quote() {
        let body = r#"{"last":{"ask":1.0421,"bid":1.042,"exchange":48,"timestamp":1736197200000},"request_id":"1","status":"success","symbol":"EUR/USD"}"#;
        let quote: LastCurrencyQuote = serde_json::from_str(body).unwrap();
        assert_eq!(quote.symbol, "EUR/USD");
        assert_eq!(quote.last.bid, 1.042);
        assert_eq!(
            LastCurrencyQuoteRequest::new("eur", "usd").path(),
            "/v1/last_quote/currencies/EUR/USD"
        );
    }
}
