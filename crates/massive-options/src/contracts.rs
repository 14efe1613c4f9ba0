//! Options contract reference data.

use chrono::NaiveDate;
use massive_core::{ItemResponse, ListResponse, Order, QueryParams, RangeFilter, Request, Ticker};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call or put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl ContractType {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }

    /// Returns the OCC symbol letter (`C` or `P`).
    #[must_use]
    pub const fn occ_code(&self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the `O:` ticker of a contract from its OCC components.
///
/// The strike is encoded in thousandths, zero-padded to eight digits:
/// `option_ticker("SPY", 2025-12-19, Call, 650.0)` is `O:SPY251219C00650000`.
///
/// Returns `None` when the strike is not finite, is negative, or does not fit
/// in eight digits (above [`MAX_OCC_STRIKE`]).
#[must_use]
pub fn option_ticker(
    underlying: &str,
    expiration: NaiveDate,
    contract_type: ContractType,
    strike: f64,
) -> Option<Ticker> {
    if !strike.is_finite() || strike < 0.0 || strike > MAX_OCC_STRIKE {
        return None;
    }
    let strike = (strike * 1000.0).round() as u64;
    Some(Ticker::new(format!(
        "O:{}{}{}{strike:08}",
        underlying.to_uppercase(),
        expiration.format("%y%m%d"),
        contract_type.occ_code(),
    )))
}

/// Largest strike an OCC ticker can encode.
pub const MAX_OCC_STRIKE: f64 = 99_999.999;

/// Parameters for `/v3/reference/options/contracts`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsContractsRequest {
    /// Underlying stock ticker.
    pub underlying_ticker: Option<Ticker>,
    /// Call or put.
    pub contract_type: Option<ContractType>,
    /// Filter on expiration date.
    pub expiration_date: RangeFilter,
    /// Filter on strike price.
    pub strike_price: RangeFilter,
    /// Point-in-time date.
    pub as_of: Option<NaiveDate>,
    /// Query expired contracts instead of active ones.
    pub expired: Option<bool>,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 1000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl OptionsContractsRequest {
    /// Creates a request for contracts on `underlying`.
    #[must_use]
    pub fn new(underlying: impl Into<Ticker>) -> Self {
        Self {
            underlying_ticker: Some(underlying.into()),
            ..Default::default()
        }
    }

    /// Filters on call or put.
    #[must_use]
    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }

    /// Filters on expiration date.
    #[must_use]
    pub fn expiration_date(mut self, filter: RangeFilter) -> Self {
        self.expiration_date = filter;
        self
    }

    /// Filters on strike price.
    #[must_use]
    pub fn strike_price(mut self, filter: RangeFilter) -> Self {
        self.strike_price = filter;
        self
    }

    /// Lists contracts as of `date`.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Lists expired contracts.
    #[must_use]
    pub fn expired(mut self, expired: bool) -> Self {
        self.expired = Some(expired);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for OptionsContractsRequest {
    type Response = ListResponse<OptionsContract>;

    fn path(&self) -> String {
        "/v3/reference/options/contracts".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("underlying_ticker", self.underlying_ticker.as_ref())
            .with_opt("contract_type", self.contract_type)
            .with_opt("as_of", self.as_of)
            .with_opt("expired", self.expired)
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.expiration_date.apply("expiration_date", &mut query);
        self.strike_price.apply("strike_price", &mut query);
        query
    }
}

/// Parameters for `/v3/reference/options/contracts/{options_ticker}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionsContractRequest {
    /// Contract ticker, `O:` prefixed.
    pub options_ticker: Ticker,
    /// Point-in-time date.
    pub as_of: Option<NaiveDate>,
}

impl OptionsContractRequest {
    /// Creates a request for one contract.
    #[must_use]
    pub fn new(options_ticker: impl Into<Ticker>) -> Self {
        Self {
            options_ticker: options_ticker.into(),
            as_of: None,
        }
    }

    /// Requests the contract as of `date`.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}

impl Request for OptionsContractRequest {
    type Response = ItemResponse<OptionsContract>;

    fn path(&self) -> String {
        format!("/v3/reference/options/contracts/{}", self.options_ticker)
    }

    fn query(&self) -> QueryParams {
        QueryParams::new().with_opt("as_of", self.as_of)
    }
}

/// A deliverable other than the primary underlying.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalUnderlying {
    /// Number of shares or amount of cash.
    pub amount: f64,
    /// `equity` or `currency`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ticker or currency code.
    pub underlying: String,
}

/// An options contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionsContract {
    /// Contract ticker, `O:` prefixed.
    pub ticker: String,
    /// Underlying ticker.
    pub underlying_ticker: String,
    /// Call or put.
    pub contract_type: ContractType,
    /// `american`, `european`, or `bermudan`.
    pub exercise_style: Option<String>,
    /// Expiration date, `YYYY-MM-DD`.
    pub expiration_date: String,
    /// Strike price.
    pub strike_price: f64,
    /// Shares delivered per contract.
    pub shares_per_contract: Option<f64>,
    /// Primary exchange MIC.
    pub primary_exchange: Option<String>,
    /// ISO 10962 classification.
    pub cfi: Option<String>,
    /// Correction number.
    pub correction: Option<i32>,
    /// Extra deliverables after corporate actions.
    #[serde(default)]
    pub additional_underlyings: Vec<AdditionalUnderlying>,
}

impl OptionsContract {
    /// Parses [`expiration_date`](Self::expiration_date).
    #[must_use]
    pub fn expiration(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expiration_date, "%Y-%m-%d").ok()
    }
}
