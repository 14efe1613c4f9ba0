//! Request descriptors and pagination helpers.
//!
//! - [`Request`] - Describes one endpoint call: path, query, and response type
//! - [`Paginated`] - Responses that may carry a next-page URL
//! - [`next_cursor`] - Extracts the cursor from a next-page URL

use serde::de::DeserializeOwned;
use url::Url;

use crate::query::QueryParams;

/// A single call to one API endpoint.
///
/// Implementors are plain parameter structs. Required values become path
/// segments; optional values become query parameters and are left out when
/// unset.
pub trait Request: Send + Sync {
    /// The decoded response body.
    type Response: DeserializeOwned + Send;

    /// Returns the request path, with any dynamic segments already filled in.
    fn path(&self) -> String;

    /// Returns the query parameters for this request.
    fn query(&self) -> QueryParams {
        QueryParams::new()
    }
}

/// A response that may point at a further page of results.
///
/// The client never follows these URLs on its own.
pub trait Paginated {
    /// Returns the absolute URL of the next page, if any.
    fn next_url(&self) -> Option<&str>;

    /// Returns true if the provider reported a further page.
    fn has_next_page(&self) -> bool {
        self.next_url().is_some_and(|url| !url.is_empty())
    }

    /// Returns the cursor value of the next page, if any.
    fn next_cursor(&self) -> Option<String> {
        self.next_url().and_then(next_cursor)
    }
}

/// Extracts the `cursor` query value from a next-page URL.
///
/// Returns `None` for empty or unparseable URLs and for URLs without a cursor.
#[must_use]
pub fn next_cursor(next_url: &str) -> Option<String> {
    let url = Url::parse(next_url).ok()?;
    url.query_pairs()
        .find(|(name, _)| name == "cursor")
        .map(|(_, value)| value.into_owned())
}

/// Implements [`Paginated`] for response types with a `next_url: Option<String>` field.
#[macro_export]
macro_rules! impl_paginated {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Paginated for $ty {
                fn next_url(&self) -> Option<&str> {
                    self.next_url.as_deref()
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        next_url: Option<String>,
    }

    impl_paginated!(Page);

    #[test]
    fn test_next_cursor() {
        let url = "https://api.massive.com/v3/reference/tickers?cursor=YWN0aXZlPXRydWU%3D";
        assert_eq!(next_cursor(url), Some("YWN0aXZlPXRydWU=".to_string()));
        assert_eq!(next_cursor("https://api.massive.com/v3/trades/AAPL"), None);
        assert_eq!(next_cursor(""), None);
    }

    #[test]
    fn test_paginated_defaults() {
        let last = Page { next_url: None };
        assert!(!last.has_next_page());
        assert_eq!(last.next_cursor(), None);

        let empty = Page {
            next_url: Some(String::new()),
        };
        assert!(!empty.has_next_page());

        let more = Page {
            next_url: Some("https://api.massive.com/v3/quotes/AAPL?cursor=abc".to_string()),
        };
        assert!(more.has_next_page());
        assert_eq!(more.next_cursor(), Some("abc".to_string()));
    }
}
