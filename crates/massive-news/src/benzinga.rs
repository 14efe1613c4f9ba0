//! Benzinga partner data: news and analyst ratings.

use massive_core::{ListResponse, QueryParams, RangeFilter, Request, Ticker, join_tickers};
use serde::{Deserialize, Serialize};

/// Parameters for `/benzinga/v2/news`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenzingaNewsRequest {
    /// Articles mentioning any of these tickers.
    pub tickers: Vec<Ticker>,
    /// Benzinga channels, comma separated (e.g. `earnings,guidance`).
    pub channels: Option<String>,
    /// Filter on publication time.
    pub published: RangeFilter,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort expression, e.g. `published.desc`.
    pub sort: Option<String>,
}

impl BenzingaNewsRequest {
    /// Creates a request for the most recent articles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on tickers.
    #[must_use]
    pub fn tickers<T: Into<Ticker>>(mut self, tickers: impl IntoIterator<Item = T>) -> Self {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Filters on channels.
    #[must_use]
    pub fn channels(mut self, channels: impl Into<String>) -> Self {
        self.channels = Some(channels.into());
        self
    }

    /// Filters on publication time.
    #[must_use]
    pub fn published(mut self, filter: RangeFilter) -> Self {
        self.published = filter;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Request for BenzingaNewsRequest {
    type Response = ListResponse<BenzingaArticle>;

    fn path(&self) -> String {
        "/benzinga/v2/news".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with("tickers", join_tickers(&self.tickers))
            .with_opt("channels", self.channels.as_deref())
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.published.apply("published", &mut query);
        query
    }
}

/// A Benzinga news article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenzingaArticle {
    /// Benzinga article id.
    pub benzinga_id: i64,
    /// Author.
    pub author: Option<String>,
    /// Publication time, ISO-8601.
    pub published: String,
    /// Last update, ISO-8601.
    pub last_updated: Option<String>,
    /// Headline.
    pub title: String,
    /// Short summary.
    pub teaser: Option<String>,
    /// Full body, HTML.
    pub body: Option<String>,
    /// Article URL.
    pub url: Option<String>,
    /// Channels.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Tickers mentioned.
    #[serde(default)]
    pub tickers: Vec<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Parameters for `/benzinga/v1/ratings`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenzingaRatingsRequest {
    /// Ticker.
    pub ticker: Option<Ticker>,
    /// Filter on rating date.
    pub date: RangeFilter,
    /// Rating action (`upgrades`, `downgrades`, `maintains`, `initiates_coverage_on`, ...).
    pub rating_action: Option<String>,
    /// Analyst firm.
    pub firm: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort expression, e.g. `date.desc`.
    pub sort: Option<String>,
}

impl BenzingaRatingsRequest {
    /// Creates a request for ratings on `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Default::default()
        }
    }

    /// Filters on rating date.
    #[must_use]
    pub fn date(mut self, filter: RangeFilter) -> Self {
        self.date = filter;
        self
    }

    /// Filters on rating action.
    #[must_use]
    pub fn rating_action(mut self, action: impl Into<String>) -> Self {
        self.rating_action = Some(action.into());
        self
    }

    /// Filters on analyst firm.
    #[must_use]
    pub fn firm(mut self, firm: impl Into<String>) -> Self {
        self.firm = Some(firm.into());
        self
    }

    /// Sets the sort expression.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl Request for BenzingaRatingsRequest {
    type Response = ListResponse<AnalystRating>;

    fn path(&self) -> String {
        "/benzinga/v1/ratings".to_string()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("ticker", self.ticker.as_ref())
            .with_opt("rating_action", self.rating_action.as_deref())
            .with_opt("firm", self.firm.as_deref())
            .with_opt("limit", self.limit)
            .with_opt("sort", self.sort.as_deref());
        self.date.apply("date", &mut query);
        query
    }
}

/// An analyst rating or price target change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalystRating {
    /// Benzinga record id.
    pub benzinga_id: Option<String>,
    /// Ticker.
    pub ticker: String,
    /// Company name.
    pub company_name: Option<String>,
    /// Rating date, `YYYY-MM-DD`.
    pub date: String,
    /// Rating time, `HH:MM:SS`.
    pub time: Option<String>,
    /// Analyst firm.
    pub firm: Option<String>,
    /// Analyst name.
    pub analyst: Option<String>,
    /// Action taken on the rating.
    pub rating_action: Option<String>,
    /// Current rating.
    pub rating: Option<String>,
    /// Previous rating.
    pub previous_rating: Option<String>,
    /// Action taken on the price target.
    pub price_target_action: Option<String>,
    /// Current price target.
    pub price_target: Option<f64>,
    /// Previous price target.
    pub previous_price_target: Option<f64>,
    /// Price target adjusted for splits.
    pub adjusted_price_target: Option<f64>,
    /// Currency of the price targets.
    pub currency: Option<String>,
    /// Importance, 0 (low) to 5 (high).
    pub importance: Option<u8>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Last update, ISO-8601.
    pub last_updated: Option<String>,
}

impl AnalystRating {
    /// Returns the relative change of the price target, if both targets are known.
    #[must_use]
    pub fn price_target_change(&self) -> Option<f64> {
        match (self.price_target, self.previous_price_target) {
            (Some(current), Some(previous)) if previous != 0.0 => {
                Some((current - previous) / previous)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;

    #[test]
    fn test_benzinga_news_query() {
        let query = BenzingaNewsRequest::new()
            .tickers(["aapl", "nvda"])
            .channels("earnings")
            .published(RangeFilter::new().gte("2025-01-01"))
            .limit(10)
            .query();
        assert_eq!(query.get("tickers"), Some("AAPL,NVDA"));
        assert_eq!(query.get("channels"), Some("earnings"));
        assert_eq!(query.get("published.gte"), Some("2025-01-01"));
        assert!(!query.contains("published"));
        assert!(!query.contains("sort"));
    }

    #[test]
    fn test_decode_benzinga_article() {
        let body = r#"{"status":"OK","results":[{
            "benzinga_id": 41234567,
            "author": "Benzinga Newsdesk",
            "published": "2025-01-06T13:02:11Z",
            "title": "Apple shares trade higher premarket",
            "channels": ["news", "movers"],
            "tickers": ["AAPL"]
        }]}"#;
        let page: ListResponse<BenzingaArticle> = serde_json::from_str(body).unwrap();
        assert_eq!(page.results[0].benzinga_id, 41_234_567);
        assert_eq!(page.results[0].channels, vec!["news", "movers"]);
        assert!(page.results[0].images.is_empty());
    }

    #[tokio::test]
    async fn test_ratings_round_trip() {
        let body = r#"{"status":"OK","request_id":"1","results":[{
            "benzinga_id": "677c0a5c3a2f4b0001f4a1b2",
            "ticker": "AAPL",
            "company_name": "Apple",
            "date": "2025-01-06",
            "time": "08:14:00",
            "firm": "Morgan Stanley",
            "analyst": "Erik Woodring",
            "rating_action": "maintains",
            "rating": "Overweight",
            "previous_rating": "Overweight",
            "price_target_action": "raises",
            "price_target": 276,
            "previous_price_target": 273,
            "importance": 3
        }]}"#;
        let server = MockServer::start(200, body).await;

        let request = BenzingaRatingsRequest::new("AAPL")
            .date(RangeFilter::new().gte("2025-01-01").lte("2025-01-31"))
            .rating_action("maintains")
            .sort("date.desc");
        let page = server.client().send(&request).await.unwrap();
        let rating = &page.results[0];
        assert_eq!(rating.firm.as_deref(), Some("Morgan Stanley"));
        let change = rating.price_target_change().unwrap();
        assert!((change - 3.0 / 273.0).abs() < 1e-12);

        let recorded = server.last_request().unwrap();
        assert_eq!(recorded.path, "/benzinga/v1/ratings");
        assert_eq!(recorded.query_value("date.gte"), Some("2025-01-01"));
        assert_eq!(recorded.query_value("date.lte"), Some("2025-01-31"));
        assert_eq!(recorded.query_value("rating_action"), Some("maintains"));
        assert_eq!(recorded.query_value("sort"), Some("date.desc"));
    }
}
