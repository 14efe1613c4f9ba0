//! Conversions for the integer timestamps found in API responses.
//!
//! Responses keep timestamps in their wire form. These helpers convert them
//! on demand.

use chrono::{DateTime, Utc};

/// Converts a Unix timestamp in milliseconds to a UTC datetime.
#[must_use]
pub fn from_unix_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Converts a Unix timestamp in nanoseconds to a UTC datetime.
#[must_use]
pub fn from_unix_nanos(ns: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(ns)
}
