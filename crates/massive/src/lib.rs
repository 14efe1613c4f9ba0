#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Typed async client for the Massive market data API.
//!
//! This crate re-exports the core client and types, and each endpoint group
//! as a module behind a feature flag.
//!
//! # Features
//!
//! - `stocks` - Bars, trades, quotes, snapshots, and reference data
//! - `options` - Contracts, chains, and contract snapshots
//! - `forex` - Conversion, last quotes, and snapshots
//! - `news` - Ticker news and Benzinga news and ratings
//! - `filings` - 10-K sections
//! - `indicators` - SMA, EMA, RSI, and MACD
//!
//! All groups are enabled by default.

// Core client and types
pub use massive_core::*;

// Endpoint groups
#[cfg(feature = "filings")]
pub use massive_filings as filings;
#[cfg(feature = "forex")]
pub use massive_forex as forex;
#[cfg(feature = "indicators")]
pub use massive_indicators as indicators;
#[cfg(feature = "news")]
pub use massive_news as news;
#[cfg(feature = "options")]
pub use massive_options as options;
#[cfg(feature = "stocks")]
pub use massive_stocks as stocks;

/// Brings the client and every enabled endpoint trait into scope.
pub mod prelude {
    pub use massive_core::{MassiveClient, Paginated, QueryParams, Request};

    #[cfg(feature = "filings")]
    pub use massive_filings::FilingsApi;
    #[cfg(feature = "forex")]
    pub use massive_forex::ForexApi;
    #[cfg(feature = "indicators")]
    pub use massive_indicators::IndicatorsApi;
    #[cfg(feature = "news")]
    pub use massive_news::NewsApi;
    #[cfg(feature = "options")]
    pub use massive_options::OptionsApi;
    #[cfg(feature = "stocks")]
    pub use massive_stocks::{ReferenceApi, StocksApi};
}
