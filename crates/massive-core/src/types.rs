//! Core value types used to build request paths.
//!
//! - [`Ticker`] - Instrument ticker (`AAPL`, `O:AAPL250117C00150000`, `C:EURUSD`)
//! - [`RangeBound`] - One end of an aggregate range, a date or a Unix-ms timestamp

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An instrument ticker.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is an options ticker (`O:` prefix).
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.0.starts_with("O:")
    }

    /// Returns true if this is a currency pair ticker (`C:` prefix).
    #[must_use]
    pub fn is_forex(&self) -> bool {
        self.0.starts_with("C:")
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One end of an aggregate range.
///
/// Renders as `YYYY-MM-DD` for dates and as an integer for millisecond
/// timestamps, which is what the aggregates path segment accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeBound {
    /// A calendar date.
    Date(NaiveDate),
    /// A Unix timestamp in milliseconds.
    Millis(i64),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Millis(ms) => write!(f, "{ms}"),
        }
    }
}

impl From<NaiveDate> for RangeBound {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<i64> for RangeBound {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

/// Joins tickers into the comma separated form used by list filters.
#[must_use]
pub fn join_tickers(tickers: &[Ticker]) -> String {
    tickers
        .iter()
        .map(Ticker::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_uppercases() {
        let ticker = Ticker::new("aapl");
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(ticker.to_string(), "AAPL");
    }

    #[test]
    fn test_ticker_prefixes() {
        assert!(Ticker::new("O:SPY251219C00650000").is_option());
        assert!(Ticker::new("c:eurusd").is_forex());
        assert!(!Ticker::new("MSFT").is_option());
    }

    #[test]
    fn test_range_bound_display() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(RangeBound::from(date).to_string(), "2025-01-06");
        assert_eq!(RangeBound::from(1_736_139_600_000).to_string(), "1736139600000");
    }

    #[test]
    fn test_join_tickers() {
        let tickers = vec![Ticker::new("aapl"), Ticker::new("msft")];
        assert_eq!(join_tickers(&tickers), "AAPL,MSFT");
        assert_eq!(join_tickers(&[]), "");
    }
}
