//! Tick-level trades and NBBO quotes.

use chrono::{DateTime, Utc};
use massive_core::{
    ItemResponse, ListResponse, Order, QueryParams, RangeFilter, Request, Ticker,
    time::from_unix_nanos,
};
use serde::{Deserialize, Serialize};

/// Filters shared by the trades and quotes list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickFilter {
    /// Filter on `timestamp`: a date (`YYYY-MM-DD`) or Unix nanoseconds.
    pub timestamp: RangeFilter,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 50000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl TickFilter {
    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.timestamp.apply("timestamp", &mut query);
        query
    }
}

macro_rules! tick_request {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $response:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            /// Stock ticker.
            pub ticker: Ticker,
            /// Timestamp range, ordering, and paging.
            pub filter: TickFilter,
        }

        impl $name {
            /// Creates a request for `ticker` with no filters.
            #[must_use]
            pub fn new(ticker: impl Into<Ticker>) -> Self {
                Self {
                    ticker: ticker.into(),
                    filter: TickFilter::default(),
                }
            }

            /// Restricts results by timestamp.
            #[must_use]
            pub fn timestamp(mut self, timestamp: RangeFilter) -> Self {
                self.filter.timestamp = timestamp;
                self
            }

            /// Sets the result ordering.
            #[must_use]
            pub fn order(mut self, order: Order) -> Self {
                self.filter.order = Some(order);
                self
            }

            /// Sets the page size.
            #[must_use]
            pub fn limit(mut self, limit: u32) -> Self {
                self.filter.limit = Some(limit);
                self
            }

            /// Sets the field to sort on.
            #[must_use]
            pub fn sort(mut self, sort: impl Into<String>) -> Self {
                self.filter.sort = Some(sort.into());
                self
            }
        }

        impl Request for $name {
            type Response = $response;

            fn path(&self) -> String {
                format!(concat!($prefix, "/{}"), self.ticker)
            }

            fn query(&self) -> QueryParams {
                self.filter.query()
            }
        }
    };
}

tick_request!(
    /// Parameters for `/v3/trades/{ticker}`.
    TradesRequest,
    "/v3/trades",
    ListResponse<Trade>
);

tick_request!(
    /// Parameters for `/v3/quotes/{ticker}`.
    QuotesRequest,
    "/v3/quotes",
    ListResponse<Quote>
);

/// Parameters for `/v2/last/trade/{ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastTradeRequest {
    /// Stock ticker.
    pub ticker: Ticker,
}

impl LastTradeRequest {
    /// Creates a request for the most recent trade of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

impl Request for LastTradeRequest {
    type Response = ItemResponse<LastTrade>;

    fn path(&self) -> String {
        format!("/v2/last/trade/{}", self.ticker)
    }
}

/// Parameters for `/v2/last/nbbo/{ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastQuoteRequest {
    /// Stock ticker.
    pub ticker: Ticker,
}

impl LastQuoteRequest {
    /// Creates a request for the most recent NBBO quote of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

impl Request for LastQuoteRequest {
    type Response = ItemResponse<LastQuote>;

    fn path(&self) -> String {
        format!("/v2/last/nbbo/{}", self.ticker)
    }
}

/// A single trade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade condition codes.
    #[serde(default)]
    pub conditions: Vec<i32>,
    /// Trade correction indicator.
    pub correction: Option<i32>,
    /// Exchange id.
    #[serde(default)]
    pub exchange: i32,
    /// Trade id, unique per ticker, exchange, and day.
    #[serde(default)]
    pub id: String,
    /// Exchange timestamp, Unix nanoseconds.
    pub participant_timestamp: Option<i64>,
    /// Trade price.
    pub price: f64,
    /// Sequence number.
    #[serde(default)]
    pub sequence_number: i64,
    /// SIP timestamp, Unix nanoseconds.
    pub sip_timestamp: i64,
    /// Trade size (may be fractional).
    pub size: f64,
    /// Tape (1 = NYSE, 2 = AMEX, 3 = Nasdaq).
    pub tape: Option<i32>,
    /// Trade reporting facility id.
    pub trf_id: Option<i32>,
    /// Trade reporting facility timestamp, Unix nanoseconds.
    pub trf_timestamp: Option<i64>,
}

impl Trade {
    /// Returns the SIP timestamp as a UTC datetime.
    #[must_use]
    pub fn sip_time(&self) -> DateTime<Utc> {
        from_unix_nanos(self.sip_timestamp)
    }
}

/// A single NBBO quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ask exchange id.
    pub ask_exchange: Option<i32>,
    /// Ask price.
    #[serde(default)]
    pub ask_price: f64,
    /// Ask size in round lots.
    #[serde(default)]
    pub ask_size: f64,
    /// Bid exchange id.
    pub bid_exchange: Option<i32>,
    /// Bid price.
    #[serde(default)]
    pub bid_price: f64,
    /// Bid size in round lots.
    #[serde(default)]
    pub bid_size: f64,
    /// Quote condition codes.
    #[serde(default)]
    pub conditions: Vec<i32>,
    /// Quote indicator codes.
    #[serde(default)]
    pub indicators: Vec<i32>,
    /// Exchange timestamp, Unix nanoseconds.
    pub participant_timestamp: Option<i64>,
    /// Sequence number.
    #[serde(default)]
    pub sequence_number: i64,
    /// SIP timestamp, Unix nanoseconds.
    pub sip_timestamp: i64,
    /// Tape.
    pub tape: Option<i32>,
    /// Trade reporting facility timestamp, Unix nanoseconds.
    pub trf_timestamp: Option<i64>,
}

impl Quote {
    /// Returns the mid price, or `None` if either side is empty.
    #[must_use]
    pub fn midpoint(&self) -> Option<f64> {
        (self.bid_price > 0.0 && self.ask_price > 0.0)
            .then(|| (self.bid_price + self.ask_price) / 2.0)
    }

    /// Returns the SIP timestamp as a UTC datetime.
    #[must_use]
    pub fn sip_time(&self) -> DateTime<Utc> {
        from_unix_nanos(self.sip_timestamp)
    }
}

/// The most recent trade, in the compact v2 field layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastTrade {
    /// Ticker.
    #[serde(rename = "T")]
    pub ticker: Option<String>,
    /// Trade condition codes.
    #[serde(rename = "c", default)]
    pub conditions: Vec<i32>,
    /// Trade correction indicator.
    #[serde(rename = "e")]
    pub correction: Option<i32>,
    /// Trade reporting facility timestamp, Unix nanoseconds.
    #[serde(rename = "f")]
    pub trf_timestamp: Option<i64>,
    /// Trade id.
    #[serde(rename = "i", default)]
    pub id: String,
    /// Trade price.
    #[serde(rename = "p")]
    pub price: f64,
    /// Sequence number.
    #[serde(rename = "q", default)]
    pub sequence_number: i64,
    /// Trade reporting facility id.
    #[serde(rename = "r")]
    pub trf_id: Option<i32>,
    /// Trade size.
    #[serde(rename = "s", default)]
    pub size: f64,
    /// SIP timestamp, Unix nanoseconds.
    #[serde(rename = "t")]
    pub sip_timestamp: i64,
    /// Exchange id.
    #[serde(rename = "x", default)]
    pub exchange: i32,
    /// Exchange timestamp, Unix nanoseconds.
    #[serde(rename = "y")]
    pub participant_timestamp: Option<i64>,
    /// Tape.
    #[serde(rename = "z")]
    pub tape: Option<i32>,
}

/// The most recent NBBO quote, in the compact v2 field layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastQuote {
    /// Ticker.
    #[serde(rename = "T")]
    pub ticker: Option<String>,
    /// Ask price.
    #[serde(rename = "P", default)]
    pub ask_price: f64,
    /// Ask size in round lots.
    #[serde(rename = "S", default)]
    pub ask_size: f64,
    /// Ask exchange id.
    #[serde(rename = "X")]
    pub ask_exchange: Option<i32>,
    /// Bid price.
    #[serde(rename = "p", default)]
    pub bid_price: f64,
    /// Bid size in round lots.
    #[serde(rename = "s", default)]
    pub bid_size: f64,
    /// Bid exchange id.
    #[serde(rename = "x")]
    pub bid_exchange: Option<i32>,
    /// Quote condition codes.
    #[serde(rename = "c", default)]
    pub conditions: Vec<i32>,
    /// Quote indicator codes.
    #[serde(rename = "i", default)]
    pub indicators: Vec<i32>,
    /// Sequence number.
    #[serde(rename = "q", default)]
    pub sequence_number: i64,
    /// SIP timestamp, Unix nanoseconds.
    #[serde(rename = "t")]
    pub sip_timestamp: i64,
    /// Exchange timestamp, Unix nanoseconds.
    #[serde(rename = "y")]
    pub participant_timestamp: Option<i64>,
    /// Tape.
    #[serde(rename = "z")]
    pub tape: Option<i32>,
}
