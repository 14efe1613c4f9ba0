//! Ticker news with publisher and sentiment insights.

use massive_core::{ListResponse, Order, QueryParams, RangeFilter, Request, Ticker};
use serde::{Deserialize, Serialize};

/// Parameters for `/v2/reference/news`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewsRequest {
    /// Articles mentioning this ticker.
    pub ticker: Option<Ticker>,
    /// Filter on publication time (`YYYY-MM-DD` or ISO-8601).
    pub published_utc: RangeFilter,
    /// Result ordering.
    pub order: Option<Order>,
    /// Page size (max 1000).
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort: Option<String>,
}

impl NewsRequest {
    /// Creates a request for the most recent articles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on a ticker.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<Ticker>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Filters on publication time.
    #[must_use]
    pub fn published_utc(mut self, filter: RangeFilter) -> Self {
        self.published_utc = filter;
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the sort field.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl Request for NewsRequest {
    type Response = ListResponse<NewsArticle>;

    fn path(&self) -> String {
        "/v2/reference/news".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("order", self.order)
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.published_utc.apply("published_utc", &mut query);
        query
    }
}

/// Publisher of a news article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Publisher name.
    pub name: String,
    /// Publisher website.
    pub homepage_url: Option<String>,
    /// Logo URL.
    pub logo_url: Option<String>,
    /// Favicon URL.
    pub favicon_url: Option<String>,
}

/// Sentiment of an article toward one ticker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Ticker the insight is about.
    pub ticker: String,
    /// `positive`, `neutral`, or `negative`.
    pub sentiment: String,
    /// Why the sentiment was assigned.
    #[serde(default)]
    pub sentiment_reasoning: String,
}

/// A news article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Article id.
    pub id: String,
    /// Publisher.
    pub publisher: Publisher,
    /// Headline.
    pub title: String,
    /// Author.
    pub author: Option<String>,
    /// Publication time, ISO-8601.
    pub published_utc: String,
    /// Article URL.
    pub article_url: String,
    /// Tickers mentioned.
    #[serde(default)]
    pub tickers: Vec<String>,
    /// AMP URL.
    pub amp_url: Option<String>,
    /// Image URL.
    pub image_url: Option<String>,
    /// Summary.
    pub description: Option<String>,
    /// Keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Per-ticker sentiment.
    #[serde(default)]
    pub insights: Vec<Insight>,
}

impl NewsArticle {
    /// Returns the sentiment insight for `ticker`, if any.
    #[must_use]
    pub fn insight(&self, ticker: &str) -> Option<&Insight> {
        self.insights.iter().find(|i| i.ticker == ticker)
    }
}
