#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Options contract, chain, and bar endpoints.
//!
//! - [`OptionsApi`] - Extension trait for [`MassiveClient`]
//! - [`option_ticker`] - Builds `O:` tickers from OCC components

use async_trait::async_trait;
use massive_core::{
    Aggregates, AggregatesRequest, ItemResponse, ListResponse, MassiveClient, Result,
};

/// Option chain and contract snapshots.
pub mod chain;
/// Options contract reference data.
pub mod contracts;

pub use chain::{
    Greeks, OptionChainRequest, OptionContractSnapshotRequest, OptionDay, OptionDetails,
    OptionQuote, OptionSnapshot, OptionTrade, UnderlyingAsset,
};
pub use contracts::{
    AdditionalUnderlying, ContractType, OptionsContract, OptionsContractRequest,
    MAX_OCC_STRIKE, OptionsContractsRequest, option_ticker,
};

/// Options market data.
#[async_trait]
pub trait OptionsApi {
    /// One page of contracts matching the filters.
    async fn options_contracts(
        &self,
        request: &OptionsContractsRequest,
    ) -> Result<ListResponse<OptionsContract>>;

    /// One contract.
    async fn options_contract(
        &self,
        request: &OptionsContractRequest,
    ) -> Result<ItemResponse<OptionsContract>>;

    /// One page of the option chain of an underlying.
    async fn option_chain(&self, request: &OptionChainRequest)
    -> Result<ListResponse<OptionSnapshot>>;

    /// Snapshot of one contract.
    async fn option_contract_snapshot(
        &self,
        request: &OptionContractSnapshotRequest,
    ) -> Result<ItemResponse<OptionSnapshot>>;

    /// Aggregate bars of a contract. The request ticker carries the `O:` prefix.
    async fn options_aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates>;
}

#[async_trait]
impl OptionsApi for MassiveClient {
    async fn options_contracts(
        &self,
        request: &OptionsContractsRequest,
    ) -> Result<ListResponse<OptionsContract>> {
        self.send(request).await
    }

    async fn options_contract(
        &self,
        request: &OptionsContractRequest,
    ) -> Result<ItemResponse<OptionsContract>> {
        self.send(request).await
    }

    async fn option_chain(
        &self,
        request: &OptionChainRequest,
    ) -> Result<ListResponse<OptionSnapshot>> {
        self.send(request).await
    }

    async fn option_contract_snapshot(
        &self,
        request: &OptionContractSnapshotRequest,
    ) -> Result<ItemResponse<OptionSnapshot>> {
        self.send(request).await
    }

    async fn options_aggregates(&self, request: &AggregatesRequest) -> Result<Aggregates> {
        self.send(request).await
    }
}
