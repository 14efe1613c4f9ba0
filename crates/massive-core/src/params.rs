//! Parameter enums shared by many endpoints.
//!
//! This module defines [`Timespan`] for bar and indicator granularity,
//! [`Order`] for result ordering, and [`RangeFilter`] for the
//! `name`, `name.gte`, `name.lt` family of comparison filters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::query::QueryParams;

/// Size of the time window for aggregate bars and indicators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    /// One-second windows.
    Second,
    /// One-minute windows.
    Minute,
    /// Hourly windows.
    Hour,
    /// Daily windows.
    #[default]
    Day,
    /// Weekly windows.
    Week,
    /// Monthly windows.
    Month,
    /// Quarterly windows.
    Quarter,
    /// Yearly windows.
    Year,
}

impl Timespan {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Returns true if this is an intraday timespan (second through hour).
    #[must_use]
    pub const fn is_intraday(&self) -> bool {
        matches!(self, Self::Second | Self::Minute | Self::Hour)
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Oldest / smallest first.
    #[default]
    Asc,
    /// Newest / largest first.
    Desc,
}

impl Order {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison filter on a single field.
///
/// Each bound becomes its own query parameter: `timestamp`, `timestamp.gt`,
/// `timestamp.gte`, `timestamp.lt`, `timestamp.lte`. Unset bounds are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeFilter {
    equal: Option<String>,
    gt: Option<String>,
    gte: Option<String>,
    lt: Option<String>,
    lte: Option<String>,
}

impl RangeFilter {
    /// Creates a filter with no bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            equal: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
        }
    }

    /// Matches values equal to `value`.
    #[must_use]
    pub fn equal(mut self, value: impl fmt::Display) -> Self {
        self.equal = Some(value.to_string());
        self
    }

    /// Matches values strictly greater than `value`.
    #[must_use]
    pub fn gt(mut self, value: impl fmt::Display) -> Self {
        self.gt = Some(value.to_string());
        self
    }

    /// Matches values greater than or equal to `value`.
    #[must_use]
    pub fn gte(mut self, value: impl fmt::Display) -> Self {
        self.gte = Some(value.to_string());
        self
    }

    /// Matches values strictly less than `value`.
    #[must_use]
    pub fn lt(mut self, value: impl fmt::Display) -> Self {
        self.lt = Some(value.to_string());
        self
    }

    /// Matches values less than or equal to `value`.
    #[must_use]
    pub fn lte(mut self, value: impl fmt::Display) -> Self {
        self.lte = Some(value.to_string());
        self
    }

    /// Returns true if no bound is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.equal.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
    }

    /// Writes the bounds into `query` under `field`.
    pub fn apply(&self, field: &str, query: &mut QueryParams) {
        query
            .set_opt(field, self.equal.as_deref())
            .set_opt(format!("{field}.gt"), self.gt.as_deref())
            .set_opt(format!("{field}.gte"), self.gte.as_deref())
            .set_opt(format!("{field}.lt"), self.lt.as_deref())
            .set_opt(format!("{field}.lte"), self.lte.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timespan_values() {
        assert_eq!(Timespan::Minute.to_string(), "minute");
        assert_eq!(Timespan::default(), Timespan::Day);
        assert!(Timespan::Hour.is_intraday());
        assert!(!Timespan::Week.is_intraday());
    }

    #[test]
    fn test_range_filter_apply() {
        let filter = RangeFilter::new().gte("2025-01-01").lt(1_736_139_600_000_000_000_i64);
        let mut query = QueryParams::new();
        filter.apply("timestamp", &mut query);

        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("timestamp.gte", "2025-01-01"),
                ("timestamp.lt", "1736139600000000000"),
            ]
        );
    }

    #[test]
    fn test_empty_range_filter_adds_nothing() {
        let mut query = QueryParams::new();
        RangeFilter::new().apply("published_utc", &mut query);
        assert!(query.is_empty());
        assert!(RangeFilter::default().is_empty());
        assert!(!RangeFilter::new().equal("x").is_empty());
    }

    #[test]
    fn test_order_serde_matches_display() {
        let json = serde_json::to_string(&Order::Desc).unwrap();
        assert_eq!(json, format!("\"{}\"", Order::Desc));
    }
}
