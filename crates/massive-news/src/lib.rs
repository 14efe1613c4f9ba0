#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! News and analyst rating endpoints.

use async_trait::async_trait;
use massive_core::{ListResponse, MassiveClient, Result};

/// Ticker news.
pub mod articles;
/// Benzinga news and ratings.
pub mod benzinga;

pub use articles::{Insight, NewsArticle, NewsRequest, Publisher};
pub use benzinga::{AnalystRating, BenzingaArticle, BenzingaNewsRequest, BenzingaRatingsRequest};

/// News data.
#[async_trait]
pub trait NewsApi {
    /// One page of ticker news.
    async fn news(&self, request: &NewsRequest) -> Result<ListResponse<NewsArticle>>;

    /// One page of Benzinga news.
    async fn benzinga_news(
        &self,
        request: &BenzingaNewsRequest,
    ) -> Result<ListResponse<BenzingaArticle>>;

    /// One page of Benzinga analyst ratings.
    async fn benzinga_ratings(
        &self,
        request: &BenzingaRatingsRequest,
    ) -> Result<ListResponse<AnalystRating>>;
}

#[async_trait]
impl NewsApi for MassiveClient {
    async fn news(&self, request: &NewsRequest) -> Result<ListResponse<NewsArticle>> {
        self.send(request).await
    }

    async fn benzinga_news(
        &self,
        request: &BenzingaNewsRequest,
    ) -> Result<ListResponse<BenzingaArticle>> {
        self.send(request).await
    }

    async fn benzinga_ratings(
        &self,
        request: &BenzingaRatingsRequest,
    ) -> Result<ListResponse<AnalystRating>> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::MockServer;
    use massive_core::{ErrorKind, Paginated};

    #[tokio::test]
    async fn test_news_through_trait() {
        let body = r#"{"status":"OK","count":0,"results":[],"next_url":"https://api.massive.com/v2/reference/news?cursor=YXA9MjAyNQ"}"#;
        let server = MockServer::start(200, body).await;

        let page = server.client().news(&NewsRequest::new()).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.next_cursor(), Some("YXA9MjAyNQ".to_string()));
        assert!(page.has_next_page());
    }

    #[tokio::test]
    async fn test_plan_restriction_is_api_error() {
        let body = r#"{"status":"NOT_AUTHORIZED","request_id":"1","message":"You are not entitled to this data."}"#;
        let server = MockServer::start(403, body).await;

        let err = server
            .client()
            .benzinga_news(&BenzingaNewsRequest::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start(200, r#"{"status":"OK","results":{}}"#).await;

        let err = server
            .client()
            .benzinga_ratings(&BenzingaRatingsRequest::new("AAPL"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
