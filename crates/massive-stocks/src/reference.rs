//! Reference data: tickers, exchanges, market status, corporate actions.

use chrono::NaiveDate;
use massive_core::{ItemResponse, ListResponse, Order, QueryParams, RangeFilter, Request, Ticker};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for `/v3/reference/tickers`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickersRequest {
    /// Exact ticker match.
    pub ticker: Option<Ticker>,
    /// Ticker type code, see [`TickerTypesRequest`].
    pub ticker_type: Option<String>,
    /// Market (`stocks`, `crypto`, `fx`, `otc`, `indices`).
    pub market: Option<String>,
    /// Primary exchange MIC.
    pub exchange: Option<String>,
    /// CUSIP code.
    pub cusip: Option<String>,
    /// SEC Central Index Key.
    pub cik: Option<String>,
    /// Point-in-time date.
    pub date: Option<NaiveDate>,
    /// Search terms matched against ticker and name.
    pub search: Option<String>,
    /// Active tickers only (provider default: true).
    pub active: Option<bool>,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 1000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl TickersRequest {
    /// Creates a request with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on an exact ticker.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<Ticker>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Filters on ticker type.
    #[must_use]
    pub fn ticker_type(mut self, ticker_type: impl Into<String>) -> Self {
        self.ticker_type = Some(ticker_type.into());
        self
    }

    /// Filters on market.
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Filters on primary exchange.
    #[must_use]
    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// Searches ticker and company name.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Includes only active (or only delisted) tickers.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for TickersRequest {
    type Response = ListResponse<TickerInfo>;

    fn path(&self) -> String {
        "/v3/reference/tickers".to_string()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("type", self.ticker_type.as_deref())
            .with_opt("market", self.market.as_deref())
            .with_opt("exchange", self.exchange.as_deref())
            .with_opt("cusip", self.cusip.as_deref())
            .with_opt("cik", self.cik.as_deref())
            .with_opt("date", self.date)
            .with_opt("search", self.search.as_deref())
            .with_opt("active", self.active)
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref())
    }
}

/// One row of the tickers list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// Ticker.
    pub ticker: String,
    /// Company or instrument name.
    #[serde(default)]
    pub name: String,
    /// Market.
    #[serde(default)]
    pub market: String,
    /// Locale (`us`, `global`).
    #[serde(default)]
    pub locale: String,
    /// Primary exchange MIC.
    pub primary_exchange: Option<String>,
    /// Ticker type code.
    #[serde(rename = "type")]
    pub ticker_type: Option<String>,
    /// Whether the ticker is actively traded.
    #[serde(default)]
    pub active: bool,
    /// Trading currency, lowercase.
    pub currency_name: Option<String>,
    /// SEC Central Index Key.
    pub cik: Option<String>,
    /// Composite OpenFIGI.
    pub composite_figi: Option<String>,
    /// Share class OpenFIGI.
    pub share_class_figi: Option<String>,
    /// Last update, ISO-8601.
    pub last_updated_utc: Option<String>,
    /// Delisting time, ISO-8601.
    pub delisted_utc: Option<String>,
}

/// Parameters for `/v3/reference/tickers/{ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerDetailsRequest {
    /// Ticker.
    pub ticker: Ticker,
    /// Point-in-time date.
    pub date: Option<NaiveDate>,
}

impl TickerDetailsRequest {
    /// Creates a request for the current details of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            date: None,
        }
    }

    /// Requests details as of `date`.
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl Request for TickerDetailsRequest {
    type Response = ItemResponse<TickerDetails>;

    fn path(&self) -> String {
        format!("/v3/reference/tickers/{}", self.ticker)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with_opt("date", self.date)
    }
}

/// Company headquarters address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street address.
    pub address1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
}

/// Logo and icon URLs. Fetching them also requires the API key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    /// Logo URL.
    pub logo_url: Option<String>,
    /// Icon URL.
    pub icon_url: Option<String>,
}

/// Detailed information about one ticker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerDetails {
    /// Ticker.
    pub ticker: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Market.
    #[serde(default)]
    pub market: String,
    /// Locale.
    #[serde(default)]
    pub locale: String,
    /// Primary exchange MIC.
    pub primary_exchange: Option<String>,
    /// Ticker type code.
    #[serde(rename = "type")]
    pub ticker_type: Option<String>,
    /// Whether the ticker is actively traded.
    #[serde(default)]
    pub active: bool,
    /// Trading currency.
    pub currency_name: Option<String>,
    /// SEC Central Index Key.
    pub cik: Option<String>,
    /// Composite OpenFIGI.
    pub composite_figi: Option<String>,
    /// Share class OpenFIGI.
    pub share_class_figi: Option<String>,
    /// Market capitalisation.
    pub market_cap: Option<f64>,
    /// Company description.
    pub description: Option<String>,
    /// Company website.
    pub homepage_url: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Headquarters address.
    pub address: Option<Address>,
    /// Logo and icon.
    pub branding: Option<Branding>,
    /// First listing date, `YYYY-MM-DD`.
    pub list_date: Option<String>,
    /// SIC industry code.
    pub sic_code: Option<String>,
    /// SIC industry description.
    pub sic_description: Option<String>,
    /// Number of employees.
    pub total_employees: Option<u64>,
    /// Shares per round lot.
    pub round_lot: Option<u64>,
    /// Shares outstanding for this share class.
    pub share_class_shares_outstanding: Option<f64>,
    /// Weighted shares outstanding.
    pub weighted_shares_outstanding: Option<f64>,
    /// Root of the ticker, e.g. `BRK` for `BRK.A`.
    pub ticker_root: Option<String>,
    /// Delisting time, ISO-8601.
    pub delisted_utc: Option<String>,
}

/// Parameters for `/v3/reference/tickers/types`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickerTypesRequest {
    /// Asset class (`stocks`, `options`, `crypto`, `fx`, `indices`).
    pub asset_class: Option<String>,
    /// Locale (`us`, `global`).
    pub locale: Option<String>,
}

impl Request for TickerTypesRequest {
    type Response = ListResponse<TickerType>;

    fn path(&self) -> String {
        "/v3/reference/tickers/types".to_string()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("asset_class", self.asset_class.as_deref())
            .with_opt("locale", self.locale.as_deref())
    }
}

/// A ticker type code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerType {
    /// Type code, e.g. `CS`.
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Asset class.
    #[serde(default)]
    pub asset_class: String,
    /// Locale.
    #[serde(default)]
    pub locale: String,
}

/// Parameters for `/v1/marketstatus/now`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarketStatusRequest;

impl Request for MarketStatusRequest {
    type Response = MarketStatus;

    fn path(&self) -> String {
        "/v1/marketstatus/now".to_string()
    }
}

/// Current trading status of markets and exchanges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    /// Overall market status (`open`, `closed`, `extended-hours`).
    pub market: String,
    /// Server time, ISO-8601 with offset.
    #[serde(default)]
    pub server_time: String,
    /// Whether the market is in pre-market hours.
    #[serde(default)]
    pub early_hours: bool,
    /// Whether the market is in after-hours.
    #[serde(default)]
    pub after_hours: bool,
    /// Status per exchange (`nyse`, `nasdaq`, `otc`).
    #[serde(default)]
    pub exchanges: HashMap<String, String>,
    /// Status per currency market (`fx`, `crypto`).
    #[serde(default)]
    pub currencies: HashMap<String, String>,
    /// Status per index group.
    #[serde(default)]
    pub indices_groups: HashMap<String, String>,
}

impl MarketStatus {
    /// Returns true if the overall market is open for regular trading.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.market == "open"
    }
}

/// Parameters for `/v1/marketstatus/upcoming`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarketHolidaysRequest;

impl Request for MarketHolidaysRequest {
    type Response = Vec<MarketHoliday>;

    fn path(&self) -> String {
        "/v1/marketstatus/upcoming".to_string()
    }
}

/// An upcoming market holiday or early close.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketHoliday {
    /// Exchange.
    pub exchange: String,
    /// Holiday name.
    pub name: String,
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// `closed` or `early-close`.
    pub status: String,
    /// Opening time on early-close days, ISO-8601.
    pub open: Option<String>,
    /// Closing time on early-close days, ISO-8601.
    pub close: Option<String>,
}

impl MarketHoliday {
    /// Parses [`date`](Self::date).
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Parameters for `/v3/reference/exchanges`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangesRequest {
    /// Asset class.
    pub asset_class: Option<String>,
    /// Locale.
    pub locale: Option<String>,
}

impl Request for ExchangesRequest {
    type Response = ListResponse<Exchange>;

    fn path(&self) -> String {
        "/v3/reference/exchanges".to_string()
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("asset_class", self.asset_class.as_deref())
            .with_opt("locale", self.locale.as_deref())
    }
}

/// An exchange or trade reporting facility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Exchange id used in trades and quotes.
    pub id: i32,
    /// Name.
    pub name: String,
    /// Kind (`exchange`, `TRF`, `SIP`).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Asset class.
    #[serde(default)]
    pub asset_class: String,
    /// Locale.
    #[serde(default)]
    pub locale: String,
    /// Common acronym.
    pub acronym: Option<String>,
    /// Market identifier code.
    pub mic: Option<String>,
    /// Operating MIC.
    pub operating_mic: Option<String>,
    /// SIP participant id.
    pub participant_id: Option<String>,
    /// Website.
    pub url: Option<String>,
}

/// Parameters for `/v3/reference/dividends`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DividendsRequest {
    /// Ticker.
    pub ticker: Option<Ticker>,
    /// Filter on ex-dividend date.
    pub ex_dividend_date: RangeFilter,
    /// Payments per year (0, 1, 2, 4, 12, 24, 52).
    pub frequency: Option<u32>,
    /// Dividend type (`CD`, `SC`, `LT`, `ST`).
    pub dividend_type: Option<String>,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 1000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl DividendsRequest {
    /// Creates a request for dividends of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Default::default()
        }
    }

    /// Filters on ex-dividend date.
    #[must_use]
    pub fn ex_dividend_date(mut self, filter: RangeFilter) -> Self {
        self.ex_dividend_date = filter;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for DividendsRequest {
    type Response = ListResponse<Dividend>;

    fn path(&self) -> String {
        "/v3/reference/dividends".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("frequency", self.frequency)
            .with_opt("dividend_type", self.dividend_type.as_deref())
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.ex_dividend_date.apply("ex_dividend_date", &mut query);
        query
    }
}

/// A cash dividend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Ticker.
    pub ticker: String,
    /// Amount per share.
    pub cash_amount: f64,
    /// Currency of the amount.
    pub currency: Option<String>,
    /// Declaration date, `YYYY-MM-DD`.
    pub declaration_date: Option<String>,
    /// Dividend type.
    #[serde(default)]
    pub dividend_type: String,
    /// Ex-dividend date, `YYYY-MM-DD`.
    #[serde(default)]
    pub ex_dividend_date: String,
    /// Payments per year.
    pub frequency: Option<u32>,
    /// Payment date, `YYYY-MM-DD`.
    pub pay_date: Option<String>,
    /// Record date, `YYYY-MM-DD`.
    pub record_date: Option<String>,
    /// Record id.
    pub id: Option<String>,
}

/// Parameters for `/v3/reference/splits`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitsRequest {
    /// Ticker.
    pub ticker: Option<Ticker>,
    /// Filter on execution date.
    pub execution_date: RangeFilter,
    /// Reverse splits only (or only forward splits).
    pub reverse_split: Option<bool>,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 1000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl SplitsRequest {
    /// Creates a request for splits of `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Default::default()
        }
    }

    /// Filters on execution date.
    #[must_use]
    pub fn execution_date(mut self, filter: RangeFilter) -> Self {
        self.execution_date = filter;
        self
    }
}

impl Request for SplitsRequest {
    type Response = ListResponse<Split>;

    fn path(&self) -> String {
        "/v3/reference/splits".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("reverse_split", self.reverse_split)
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.execution_date.apply("execution_date", &mut query);
        query
    }
}

/// A stock split.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Ticker.
    pub ticker: String,
    /// Execution date, `YYYY-MM-DD`.
    pub execution_date: String,
    /// Shares before the split.
    pub split_from: f64,
    /// Shares after the split.
    pub split_to: f64,
    /// Record id.
    pub id: Option<String>,
}

impl Split {
    /// Returns the share multiplier (`split_to / split_from`).
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.split_from > 0.0 {
            self.split_to / self.split_from
        } else {
            0.0
        }
    }

    /// Returns true if the split reduces the share count.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.split_to < self.split_from
    }
}
