#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/massive/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC filing endpoints.

use async_trait::async_trait;
use massive_core::{ListResponse, MassiveClient, Result};

/// 10-K sections.
pub mod sections;

pub use sections::{TenKSection, TenKSectionKind, TenKSectionsRequest};

/// SEC filing data.
#[async_trait]
pub trait FilingsApi {
    /// One page of 10-K sections.
    async fn ten_k_sections(
        &self,
        request: &TenKSectionsRequest,
    ) -> Result<ListResponse<TenKSection>>;
}

#[async_trait]
impl FilingsApi for MassiveClient {
    async fn ten_k_sections(
        &self,
        request: &TenKSectionsRequest,
    ) -> Result<ListResponse<TenKSection>> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massive_core::testing::{MockServer, TEST_API_KEY};

    #[tokio::test]
    async fn test_ten_k_sections_through_trait() {
        let server = MockServer::start(200, r#"{"status":"OK","results":[]}"#).await;

        let page = server
            .client()
            .ten_k_sections(&TenKSectionsRequest::for_cik("0001045810"))
            .await
            .unwrap();
        assert!(page.is_empty());

        let recorded = server.last_request().unwrap();
        assert_eq!(
            recorded.query,
            vec![
                ("apiKey".to_string(), TEST_API_KEY.to_string()),
                ("cik".to_string(), "0001045810".to_string()),
            ]
        );
    }
}
