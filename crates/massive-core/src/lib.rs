#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core client and types for the Massive market data API.
//!
//! This crate provides the pieces every endpoint crate builds on:
//!
//! - [`MassiveClient`](client::MassiveClient) - Authenticated GET-and-decode executor
//! - [`Request`](request::Request) - Describes one endpoint call
//! - [`QueryParams`](query::QueryParams) - Query parameters with omit-if-absent semantics
//! - [`Error`](error::Error) - Invalid URL, transport, API, and decode failures
//! - [`AggregatesRequest`](aggs::AggregatesRequest) - Aggregate bars for any asset class

/// Aggregate bars shared by stocks, options, and forex.
pub mod aggs;
/// The request executor.
pub mod client;
/// Generic response envelopes.
pub mod envelope;
/// Error types for API calls.
pub mod error;
/// Shared parameter enums.
pub mod params;
/// Query parameter collection.
pub mod query;
/// Request descriptors and pagination helpers.
pub mod request;
/// Mock HTTP server for tests.
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
/// Timestamp conversions.
pub mod time;
/// Core value types (Ticker, RangeBound).
pub mod types;

// Re-export commonly used items at crate root
pub use aggs::{Agg, Aggregates, AggregatesRequest, bars_to_dataframe};
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MassiveClient, MassiveClientBuilder};
pub use envelope::{ItemResponse, ListResponse};
pub use error::{Error, ErrorKind, Result};
pub use params::{Order, RangeFilter, Timespan};
pub use query::QueryParams;
pub use request::{Paginated, Request, next_cursor};
pub use types::{RangeBound, Ticker, join_tickers};
