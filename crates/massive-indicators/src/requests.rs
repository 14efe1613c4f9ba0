//! SMA, EMA, RSI, and MACD requests.

use massive_core::{Order, QueryParams, RangeFilter, Request, Ticker, Timespan};

use crate::params::{IndicatorParams, SeriesType};
use crate::values::{IndicatorResponse, IndicatorValue, MacdValue};

/// Builder methods for the fields of [`IndicatorParams`].
macro_rules! indicator_builders {
    () => {
        /// Filters on value timestamp.
        #[must_use]
        pub fn timestamp(mut self, filter: RangeFilter) -> Self {
            self.params.timestamp = filter;
            self
        }

        /// Sets the aggregate window size.
        #[must_use]
        pub fn timespan(mut self, timespan: Timespan) -> Self {
            self.params.timespan = Some(timespan);
            self
        }

        /// Sets whether the underlying bars are split adjusted.
        #[must_use]
        pub fn adjusted(mut self, adjusted: bool) -> Self {
            self.params.adjusted = Some(adjusted);
            self
        }

        /// Sets the price field to compute from.
        #[must_use]
        pub fn series_type(mut self, series_type: SeriesType) -> Self {
            self.params.series_type = Some(series_type);
            self
        }

        /// Includes the underlying aggregates in the response.
        #[must_use]
        pub fn expand_underlying(mut self, expand: bool) -> Self {
            self.params.expand_underlying = Some(expand);
            self
        }

        /// Sets the ordering by timestamp.
        #[must_use]
        pub fn order(mut self, order: Order) -> Self {
            self.params.order = Some(order);
            self
        }

        /// Sets the number of values.
        #[must_use]
        pub fn limit(mut self, limit: u32) -> Self {
            self.params.limit = Some(limit);
            self
        }
    };
}

macro_rules! window_indicator {
    ($(#[$meta:meta])* $name:ident, $slug:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            /// Ticker of any asset class.
            pub ticker: Ticker,
            /// Window length in timespans.
            pub window: Option<u32>,
            /// Shared options.
            pub params: IndicatorParams,
        }

        impl $name {
            /// Creates a request with provider defaults.
            #[must_use]
            pub fn new(ticker: impl Into<Ticker>) -> Self {
                Self {
                    ticker: ticker.into(),
                    window: None,
                    params: IndicatorParams::default(),
                }
            }

            /// Sets the window length.
            #[must_use]
            pub fn window(mut self, window: u32) -> Self {
                self.window = Some(window);
                self
            }

            indicator_builders!();
        }

        impl Request for $name {
            type Response = IndicatorResponse<IndicatorValue>;

            fn path(&self) -> String {
                format!(concat!("/v1/indicators/", $slug, "/{}"), self.ticker)
            }

            fn query(&self) -> QueryParams {
                let mut query = QueryParams::new().with_opt("window", self.window);
                self.params.write(&mut query);
                query
            }
        }
    };
}

window_indicator!(
    /// Parameters for `/v1/indicators/sma/{ticker}`.
    SmaRequest,
    "sma"
);
window_indicator!(
    /// Parameters for `/v1/indicators/ema/{ticker}`.
    EmaRequest,
    "ema"
);
window_indicator!(
    /// Parameters for `/v1/indicators/rsi/{ticker}`.
    RsiRequest,
    "rsi"
);

/// Parameters for `/v1/indicators/macd/{ticker}`.
#[derive(Clone, Debug, PartialEq)]
pub struct MacdRequest {
    /// Ticker of any asset class.
    pub ticker: Ticker,
    /// Fast EMA length (provider default: 12).
    pub short_window: Option<u32>,
    /// Slow EMA length (provider default: 26).
    pub long_window: Option<u32>,
    /// Signal EMA length (provider default: 9).
    pub signal_window: Option<u32>,
    /// Shared options.
    pub params: IndicatorParams,
}

impl MacdRequest {
    /// Creates a request with provider defaults.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            short_window: None,
            long_window: None,
            signal_window: None,
            params: IndicatorParams::default(),
        }
    }

    /// Sets the fast, slow, and signal window lengths.
    #[must_use]
    pub fn windows(mut self, short: u32, long: u32, signal: u32) -> Self {
        self.short_window = Some(short);
        self.long_window = Some(long);
        self.signal_window = Some(signal);
        self
    }

    indicator_builders!();
}

impl Request for MacdRequest {
    type Response = IndicatorResponse<MacdValue>;

    fn path(&self) -> String {
        format!("/v1/indicators/macd/{}", self.ticker)
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("short_window", self.short_window)
            .with_opt("long_window", self.long_window)
            .with_opt("signal_window", self.signal_window);
        self.params.write(&mut query);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(SmaRequest::new("aapl").path(), "/v1/indicators/sma/AAPL");
        assert_eq!(EmaRequest::new("X:BTCUSD").path(), "/v1/indicators/ema/X:BTCUSD");
        assert_eq!(RsiRequest::new("C:EURUSD").path(), "/v1/indicators/rsi/C:EURUSD");
        assert_eq!(MacdRequest::new("SPY").path(), "/v1/indicators/macd/SPY");
    }

    #[test]
    fn test_window_query() {
        let query = RsiRequest::new("AAPL")
            .window(14)
            .timespan(Timespan::Day)
            .timestamp(RangeFilter::new().gte("2025-01-01").lte("2025-03-31"))
            .order(Order::Asc)
            .limit(90)
            .query();
        assert_eq!(query.get("window"), Some("14"));
        assert_eq!(query.get("timespan"), Some("day"));
        assert_eq!(query.get("timestamp.gte"), Some("2025-01-01"));
        assert_eq!(query.get("timestamp.lte"), Some("2025-03-31"));
        assert_eq!(query.get("order"), Some("asc"));
        assert_eq!(query.get("limit"), Some("90"));
        assert!(!query.contains("series_type"));
    }

    #[test]
    fn test_macd_query() {
        let query = MacdRequest::new("AAPL")
            .windows(12, 26, 9)
            .series_type(SeriesType::Close)
            .query();
        assert_eq!(query.get("short_window"), Some("12"));
        assert_eq!(query.get("long_window"), Some("26"));
        assert_eq!(query.get("signal_window"), Some("9"));
        assert_eq!(query.get("series_type"), Some("close"));
        assert!(!query.contains("window"));
    }
}
