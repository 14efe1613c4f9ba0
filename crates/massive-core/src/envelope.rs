//! Generic response envelopes.
//!
//! Most endpoints wrap their payload in the same outer object:
//! `status`, `request_id`, an optional `count`, an optional `next_url`, and a
//! `results` field holding either a list ([`ListResponse`]) or a single record
//! ([`ItemResponse`]).

use serde::{Deserialize, Serialize};

use crate::request::Paginated;

/// Envelope whose `results` is a list of records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Response status (`OK`, `DELAYED`).
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// Number of records in this page.
    pub count: Option<u64>,
    /// Records in this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// URL of the next page, if any.
    pub next_url: Option<String>,
}

impl<T> Paginated for ListResponse<T> {
    fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }
}

impl<T> ListResponse<T> {
    /// Returns the number of records in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Envelope whose `results` is a single record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    /// Response status.
    #[serde(default)]
    pub status: String,
    /// Request id assigned by the server.
    pub request_id: Option<String>,
    /// The record.
    pub results: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Split {
        ticker: String,
        split_from: f64,
        split_to: f64,
    }

    #[test]
    fn test_list_response() {
        let body = r#"{
            "status": "OK",
            "request_id": "abc",
            "results": [{"ticker": "AAPL", "split_from": 1, "split_to": 4}],
            "next_url": "https://api.massive.com/v3/reference/splits?cursor=YXA9"
        }"#;
        let page: ListResponse<Split> = serde_json::from_str(body).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.count, None);
        assert_eq!(page.next_cursor(), Some("YXA9".to_string()));
        let splits: Vec<_> = page.into_iter().collect();
        assert_eq!(splits[0].split_to, 4.0);
    }

    #[test]
    fn test_list_response_without_results() {
        let page: ListResponse<Split> = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_item_response() {
        let body = r#"{"status":"OK","results":{"ticker":"NVDA","split_from":1,"split_to":10}}"#;
        let item: ItemResponse<Split> = serde_json::from_str(body).unwrap();
        assert_eq!(item.results.ticker, "NVDA");
        assert_eq!(item.request_id, None);
    }
}
