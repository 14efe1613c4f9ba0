#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Forex endpoints: conversion, last quote, snapshots, and pair bars.

use async_trait::async_trait;
use massive_core::{Aggregates, AggregatesRequest, MassiveClient, Result};

/// Currency conversion and last quotes.
pub mod conversion;
/// Forex snapshots.
pub mod snapshots;

pub use conversion::{
    CurrencyConversion, CurrencyConversionRequest, CurrencyQuote, LastCurrencyQuote,
    LastCurrencyQuoteRequest,
};
pub use snapshots::{
    ForexBar, ForexQuote, ForexSnapshot, ForexSnapshotAllRequest, ForexSnapshotResponse,
    ForexSnapshotTickerRequest, ForexSnapshots,
};

/// Forex market data.
#[async_trait]
pub trait ForexApi {
    /// Converts an amount between two currencies at the latest rate.
    async fn currency_conversion(
        &self,
        request: &CurrencyConversionRequest,
    ) -> Result<CurrencyConversion>;

    /// Latest quote for a currency pair.
    async fn last_currency_quote(
        &self,
        request: &LastCurrencyQuoteRequest,
    ) -> Result<LastCurrencyQuote>;

    /// Snapshots of all (or selected) currency pairs.
    async fn forex_snapshot_all(&self, request: &ForexSnapshotAllRequest)
    -> Result<ForexSnapshots>;

    /// Snapshot of one currency pair.
    async fn forex_snapshot_ticker(
        &self,
        request: &ForexSnapshotTickerRequest,
    ) -> Result<ForexSnapshotResponse>;

    /// Aggregate bars of a pair. The request ticker carries the `C:` prefix.
    async fn forex_aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates>;
}

#[async_trait]
impl ForexApi for MassiveClient {
    async fn currency_conversion(
        &self,
        request: &CurrencyConversionRequest,
    ) -> Result<CurrencyConversion> {
        self.send(request).await
    }

    async fn last_currency_quote(
        &self,
        request: &LastCurrencyQuoteRequest,
    ) -> Result<LastCurrencyQuote> {
        self.send(request).await
    }

    async fn forex_snapshot_all(
        &self,
        request: &ForexSnapshotAllRequest,
    ) -> Result<ForexSnapshots> {
        self.send(request).await
    }

    async fn forex_snapshot_ticker(
        &self,
        request: &ForexSnapshotTickerRequest,
    ) -> Result<ForexSnapshotResponse> {
        self.send(request).await
    }

    async fn forex_aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates> {
        self.send(request).await
    }
}
