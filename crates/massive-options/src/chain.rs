//! Option chain and contract snapshots.

use massive_core::{ItemResponse, ListResponse, Order, QueryParams, RangeFilter, Request, Ticker};
use serde::{Deserialize, Serialize};

use crate::contracts::ContractType;

/// Parameters for `/v3/snapshot/options/{underlying}`.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionChainRequest {
    /// Underlying ticker.
    pub underlying: Ticker,
    /// Filter on strike price.
    pub strike_price: RangeFilter,
    /// Filter on expiration date.
    pub expiration_date: RangeFilter,
    /// Call or put.
    pub contract_type: Option<ContractType>,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 250).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl OptionChainRequest {
    /// Creates a request for every contract on `underlying`.
    #[must_use]
    pub fn new(underlying: impl Into<Ticker>) -> Self {
        Self {
            underlying: underlying.into(),
            strike_price: RangeFilter::new(),
            expiration_date: RangeFilter::new(),
            contract_type: None,
            order: None,
            limit: None,
            sort: None,
        }
    }

    /// Filters on strike price.
    #[must_use]
    pub fn strike_price(mut self, filter: RangeFilter) -> Self {
        self.strike_price = filter;
        self
    }

    /// Filters on expiration date.
    #[must_use]
    pub fn expiration_date(mut self, filter: RangeFilter) -> Self {
        self.expiration_date = filter;
        self
    }

    /// Filters on call or put.
    #[must_use]
    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for OptionChainRequest {
    type Response = ListResponse<OptionSnapshot>;

    fn path(&self) -> String {
        format!("/v3/snapshot/options/{}", self.underlying)
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("contract_type", self.contract_type)
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.strike_price.apply("strike_price", &mut query);
        self.expiration_date.apply("expiration_date", &mut query);
        query
    }
}

/// Parameters for `/v3/snapshot/options/{underlying}/{option_contract}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionContractSnapshotRequest {
    /// Underlying ticker.
    pub underlying: Ticker,
    /// Contract ticker, `O:` prefixed.
    pub option_contract: Ticker,
}

impl OptionContractSnapshotRequest {
    /// Creates a request for one contract's snapshot.
    #[must_use]
    pub fn new(underlying: impl Into<Ticker>, option_contract: impl Into<Ticker>) -> Self {
        Self {
            underlying: underlying.into(),
            option_contract: option_contract.into(),
        }
    }
}

impl Request for OptionContractSnapshotRequest {
    type Response = ItemResponse<OptionSnapshot>;

    fn path(&self) -> String {
        format!(
            "/v3/snapshot/options/{}/{}",
            self.underlying, self.option_contract
        )
    }
}

/// Session bar of a contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDay {
    /// Change since previous close.
    pub change: f64,
    /// Percent change since previous close.
    pub change_percent: f64,
    /// Close (or latest) price.
    pub close: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Open price.
    pub open: f64,
    /// Previous session close.
    pub previous_close: f64,
    /// Contracts traded.
    pub volume: f64,
    /// Volume weighted average price.
    pub vwap: f64,
    /// Last update, Unix nanoseconds.
    pub last_updated: i64,
}

/// Static contract terms inside a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionDetails {
    /// Call or put.
    pub contract_type: ContractType,
    /// Exercise style.
    pub exercise_style: Option<String>,
    /// Expiration date, `YYYY-MM-DD`.
    pub expiration_date: String,
    /// Shares delivered per contract.
    pub shares_per_contract: Option<f64>,
    /// Strike price.
    pub strike_price: f64,
    /// Contract ticker.
    pub ticker: String,
}

/// Option sensitivities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Greeks {
    /// Price sensitivity to the underlying.
    pub delta: f64,
    /// Delta sensitivity to the underlying.
    pub gamma: f64,
    /// Daily time decay.
    pub theta: f64,
    /// Sensitivity to implied volatility.
    pub vega: f64,
}

/// Latest quote of a contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionQuote {
    /// Ask price.
    pub ask: f64,
    /// Ask size.
    pub ask_size: f64,
    /// Ask exchange id.
    pub ask_exchange: Option<i32>,
    /// Bid price.
    pub bid: f64,
    /// Bid size.
    pub bid_size: f64,
    /// Bid exchange id.
    pub bid_exchange: Option<i32>,
    /// Midpoint.
    pub midpoint: f64,
    /// Last update, Unix nanoseconds.
    pub last_updated: i64,
    /// `REAL-TIME` or `DELAYED`.
    pub timeframe: String,
}

/// Latest trade of a contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionTrade {
    /// Trade price.
    pub price: f64,
    /// Contracts traded.
    pub size: f64,
    /// Exchange id.
    pub exchange: i32,
    /// Condition codes.
    pub conditions: Vec<i32>,
    /// SIP timestamp, Unix nanoseconds.
    pub sip_timestamp: i64,
    /// `REAL-TIME` or `DELAYED`.
    pub timeframe: String,
}

/// Underlying stock as seen from the contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderlyingAsset {
    /// Underlying ticker.
    pub ticker: String,
    /// Underlying price.
    pub price: Option<f64>,
    /// Move needed to reach the break-even price.
    pub change_to_break_even: Option<f64>,
    /// Last update, Unix nanoseconds.
    pub last_updated: i64,
    /// `REAL-TIME` or `DELAYED`.
    pub timeframe: String,
}

/// Snapshot of one options contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionSnapshot {
    /// Underlying price at which the position breaks even at expiry.
    pub break_even_price: Option<f64>,
    /// Session bar.
    #[serde(default)]
    pub day: OptionDay,
    /// Contract terms.
    pub details: OptionDetails,
    /// Sensitivities, absent for deep in/out of the money contracts.
    pub greeks: Option<Greeks>,
    /// Implied volatility.
    pub implied_volatility: Option<f64>,
    /// Latest quote.
    pub last_quote: Option<OptionQuote>,
    /// Latest trade.
    pub last_trade: Option<OptionTrade>,
    /// Open contracts.
    pub open_interest: Option<f64>,
    /// Underlying stock.
    pub underlying_asset: Option<UnderlyingAsset>,
    /// Fair market value (business plans only).
    pub fmv: Option<f64>,
}
