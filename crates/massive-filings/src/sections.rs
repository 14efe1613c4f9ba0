//! Plain-text sections of 10-K annual reports.

use chrono::NaiveDate;
use massive_core::{ListResponse, QueryParams, RangeFilter, Request, Ticker};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A standard 10-K section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenKSectionKind {
    /// Item 1, business description.
    Business,
    /// Item 1A, risk factors.
    RiskFactors,
}

impl TenKSectionKind {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::RiskFactors => "risk_factors",
        }
    }
}

impl fmt::Display for TenKSectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `/stocks/filings/10-K/vX/sections`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TenKSectionsRequest {
    /// SEC Central Index Key.
    pub cik: Option<String>,
    /// Ticker.
    pub ticker: Option<Ticker>,
    /// Section to return.
    pub section: Option<TenKSectionKind>,
    /// Filter on filing date.
    pub filing_date: RangeFilter,
    /// Filter on fiscal period end.
    pub period_end: RangeFilter,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort expression, e.g. `filing_date.desc`.
    pub sort: Option<String>,
}

impl TenKSectionsRequest {
    /// Creates a request for sections filed by `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Default::default()
        }
    }

    /// Creates a request for sections filed under `cik`.
    #[must_use]
    pub fn for_cik(cik: impl Into<String>) -> Self {
        Self {
            cik: Some(cik.into()),
            ..Default::default()
        }
    }

    /// Restricts to one section.
    #[must_use]
    pub fn section(mut self, section: TenKSectionKind) -> Self {
        self.section = Some(section);
        self
    }

    /// Filters on filing date.
    #[must_use]
    pub fn filing_date(mut self, filter: RangeFilter) -> Self {
        self.filing_date = filter;
        self
    }

    /// Filters on fiscal period end.
    #[must_use]
    pub fn period_end(mut self, filter: RangeFilter) -> Self {
        self.period_end = filter;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the sort expression.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl Request for TenKSectionsRequest {
    type Response = ListResponse<TenKSection>;

    fn path(&self) -> String {
        "/stocks/filings/10-K/vX/sections".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("cik", self.cik.as_deref())
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("section", self.section)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.filing_date.apply("filing_date", &mut query);
        self.period_end.apply("period_end", &mut query);
        query
    }
}

/// One section of one 10-K filing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenKSection {
    /// SEC Central Index Key.
    pub cik: String,
    /// Ticker at filing time.
    pub ticker: Option<String>,
    /// Filing date, `YYYY-MM-DD`.
    pub filing_date: String,
    /// Fiscal period end, `YYYY-MM-DD`.
    pub period_end: Option<String>,
    /// Section name.
    pub section: String,
    /// Section body as plain text.
    #[serde(default)]
    pub text: String,
    /// Link to the filing on EDGAR.
    pub filing_url: Option<String>,
}

impl TenKSection {
    /// Parses [`filing_date`](Self::filing_date).
    #[must_use]
    pub fn filed_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.filing_date, "%Y-%m-%d").ok()
    }

    /// Parses [`period_end`](Self::period_end).
    #[must_use]
    pub fn period_ended(&self) -> Option<NaiveDate> {
        self.period_end
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}
