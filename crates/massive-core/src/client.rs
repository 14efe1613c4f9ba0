//! The request executor shared by every endpoint.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    query::QueryParams,
    request::Request,
};

/// Production base URL of the Massive API.
pub const DEFAULT_BASE_URL: &str = "https://api.massive.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "apiKey";

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "MASSIVE_API_KEY";

/// Environment variable overriding the base URL.
const BASE_URL_ENV: &str = "MASSIVE_BASE_URL";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("massive-rs/", env!("CARGO_PKG_VERSION"));

/// Massive API client.
///
/// Holds the base URL, the API key, and a pooled HTTP client. Cloning is cheap
/// and clones share the connection pool, so one client can serve many tasks.
#[derive(Clone)]
pub struct MassiveClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for MassiveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MassiveClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl MassiveClient {
    /// Create a new client with the given API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] if the HTTP client cannot be initialised.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Start building a client with the given API key.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> MassiveClientBuilder {
        MassiveClientBuilder::new(api_key)
    }

    /// Create a new client with a custom HTTP client.
    ///
    /// The caller's client decides timeouts and other transport settings.
    #[must_use]
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a new client from the `MASSIVE_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present, and honours
    /// `MASSIVE_BASE_URL` when set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if no key is set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(env::var(API_KEY_ENV).ok(), env::var(BASE_URL_ENV).ok())
    }

    /// Empty values count as unset.
    fn from_vars(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let mut builder = Self::builder(api_key);
        if let Some(base_url) = base_url.filter(|url| !url.is_empty()) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at another server, such as a local mock.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Build the full request URL for `path` and `params`.
    ///
    /// Pairs already present in `path` are kept, caller parameters replace
    /// them by name, and `apiKey` is set last so it can never be overridden.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL and path do not form a URL.
    pub fn request_url(&self, path: &str, params: &QueryParams) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url.trim_end_matches('/')))?;

        let mut query: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        for (name, value) in params.iter() {
            query.insert(name.to_string(), value.to_string());
        }
        query.insert(API_KEY_PARAM.to_string(), self.api_key.clone());

        url.query_pairs_mut().clear().extend_pairs(&query);
        Ok(url)
    }

    /// Perform one authenticated GET and decode the JSON response.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the URL cannot be built
    /// - [`Error::RequestFailed`] if the request or body read fails
    /// - [`Error::Api`] if the status is not `200 OK`, with the raw body
    /// - [`Error::Decode`] if the body does not decode into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T> {
        let url = self.request_url(path, params)?;
        debug!(path, "Massive request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            debug!(path, status = status.as_u16(), "Massive API error");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Perform the call described by `request`.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    pub async fn send<R: Request + ?Sized>(&self, request: &R) -> Result<R::Response> {
        self.fetch(&request.path(), &request.query()).await
    }
}

/// Builder for [`MassiveClient`].
pub struct MassiveClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for MassiveClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MassiveClientBuilder")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl MassiveClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Set the base URL (defaults to [`DEFAULT_BASE_URL`]).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout (defaults to [`DEFAULT_TIMEOUT`]).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] if the HTTP client cannot be initialised.
    pub fn build(self) -> Result<MassiveClient> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;

        Ok(MassiveClient {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::testing::{MockServer, TEST_API_KEY, closed_port_url};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct OpenClose {
        status: String,
        open: f64,
        close: f64,
    }

    const OPEN_CLOSE_BODY: &str = r#"{"status":"OK","from":"2025-01-06","symbol":"AAPL","open":244.31,"high":247.33,"low":243.2,"close":245,"volume":45045571}"#;

    fn client(base_url: &str) -> MassiveClient {
        MassiveClient::builder("secret").base_url(base_url).build().unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = client("https://api.massive.com");
        let params = QueryParams::new().with("adjusted", true);
        let url = client.request_url("/v1/open-close/AAPL/2025-01-06", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.massive.com/v1/open-close/AAPL/2025-01-06?adjusted=true&apiKey=secret"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = client("http://localhost:8080/");
        let url = client.request_url("/v3/reference/tickers", &QueryParams::new()).unwrap();
        assert_eq!(url.path(), "/v3/reference/tickers");
    }

    #[test]
    fn test_api_key_cannot_be_overridden() {
        let client = client("https://api.massive.com");
        let params = QueryParams::new().with("apiKey", "attacker");
        let url = client
            .request_url("/v2/last/trade/AAPL?apiKey=inline", &params)
            .unwrap();
        let keys: Vec<_> = url
            .query_pairs()
            .filter(|(name, _)| name == "apiKey")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret".to_string()]);
    }

    #[test]
    fn test_params_replace_path_query() {
        let client = client("https://api.massive.com");
        let params = QueryParams::new().with("limit", 5);
        let url = client
            .request_url("/v3/trades/AAPL?limit=100&order=asc", &params)
            .unwrap();
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("apiKey".to_string(), "secret".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("order".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = client("not a url");
        let err = client
            .request_url("/v3/reference/tickers", &QueryParams::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = client("https://api.massive.com");
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("secret"));
        assert!(debug_str.contains("[REDACTED]"));

        let builder = MassiveClient::builder("secret_key_12345");
        assert!(!format!("{builder:?}").contains("secret_key_12345"));
    }

    #[test]
    fn test_set_base_url() {
        let mut client = MassiveClient::new("secret").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        client.set_base_url("http://127.0.0.1:9");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_fetch_decodes_body() {
        let server = MockServer::start(200, OPEN_CLOSE_BODY).await;
        let client = server.client();

        let result: OpenClose = client
            .fetch("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(result.status, "OK");
        assert_eq!(result.open, 244.31);
        assert_eq!(result.close, 245.0);

        let request = server.last_request().unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/v1/open-close/AAPL/2025-01-06");
        assert_eq!(request.query_value("apiKey"), Some(TEST_API_KEY));
    }

    #[tokio::test]
    async fn test_fetch_sends_each_non_empty_param_once() {
        let server = MockServer::start(200, "{}").await;
        let client = server.client();
        let params: QueryParams = [
            ("adjusted", "true"),
            ("sort", ""),
            ("limit", "120"),
            ("apiKey", "caller"),
        ]
        .into_iter()
        .collect();

        let _: serde_json::Value = client
            .fetch("/v2/aggs/ticker/AAPL/prev", &params)
            .await
            .unwrap();

        let request = server.last_request().unwrap();
        assert_eq!(request.query_values("adjusted"), vec!["true"]);
        assert_eq!(request.query_values("limit"), vec!["120"]);
        assert!(request.query_values("sort").is_empty());
        assert_eq!(request.query_values("apiKey"), vec![TEST_API_KEY]);
        assert_eq!(request.query.len(), 3);
    }

    #[tokio::test]
    async fn test_param_values_arrive_unchanged() {
        let server = MockServer::start(200, "{}").await;
        let values = [
            ("q", "a&b=c d+e/é%"),
            ("published_utc.gte", "2025-01-01T00:00:00Z"),
            ("search", "Berkshire Hathaway Inc. Class B"),
            ("cursor", "YWN0aXZlPXRydWU="),
            ("ticker", "BRK.B"),
            ("name", "Nestlé SA / 日本"),
        ];
        let params: QueryParams = values.into_iter().collect();

        let _: serde_json::Value = server
            .client()
            .fetch("/v3/reference/tickers", &params)
            .await
            .unwrap();

        let request = server.last_request().unwrap();
        for (name, value) in values {
            assert_eq!(request.query_values(name), vec![value], "{name}");
        }
        assert_eq!(request.query.len(), values.len() + 1);
    }

    #[test]
    fn test_builder_defaults() {
        let builder = MassiveClient::builder("secret");
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert_eq!(builder.timeout, Duration::from_secs(30));
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_timeout_is_request_failed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold connections without ever answering.
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let client = MassiveClient::builder("secret")
            .base_url(format!("http://{addr}"))
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = client
            .fetch::<OpenClose>("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
            .await
            .unwrap_err();
        handle.abort();

        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        match err {
            Error::RequestFailed(source) => assert!(source.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_vars_treats_empty_as_unset() {
        let err = MassiveClient::from_vars(Some(String::new()), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(
            MassiveClient::from_vars(None, None).unwrap_err().kind(),
            ErrorKind::Config
        );

        let client = MassiveClient::from_vars(Some("secret".into()), Some(String::new())).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);

        let client = MassiveClient::from_vars(
            Some("secret".into()),
            Some("http://127.0.0.1:8080".into()),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_non_200_is_api_error() {
        for status in [403, 404, 500] {
            let body = r#"{"status":"ERROR","error":"nope"}"#;
            let server = MockServer::start(status, body).await;
            let err = server
                .client()
                .fetch::<OpenClose>("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Api);
            assert_eq!(err.status(), Some(status));
            match err {
                Error::Api { body: raw, .. } => assert_eq!(raw, body),
                other => panic!("expected API error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start(200, "not valid json").await;
        let err = server
            .client()
            .fetch::<OpenClose>("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let server = MockServer::start(200, r#"{"status":"OK"}"#).await;
        let err = server
            .client()
            .fetch::<OpenClose>("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_failed() {
        let client = client(&closed_port_url().await);
        let err = client
            .fetch::<OpenClose>("/v1/open-close/AAPL/2025-01-06", &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_repeated_fetch_is_deterministic() {
        let server = MockServer::start(200, OPEN_CLOSE_BODY).await;
        let client = server.client();
        let path = "/v1/open-close/AAPL/2025-01-06";

        let first: OpenClose = client.fetch(path, &QueryParams::new()).await.unwrap();
        let second: OpenClose = client.fetch(path, &QueryParams::new()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_send_uses_request_path_and_query() {
        struct PrevClose;

        impl Request for PrevClose {
            type Response = serde_json::Value;

            fn path(&self) -> String {
                "/v2/aggs/ticker/MSFT/prev".to_string()
            }

            fn query(&self) -> QueryParams {
                QueryParams::new().with("adjusted", false)
            }
        }

        let server = MockServer::start(200, r#"{"status":"OK","results":[]}"#).await;
        let value = server.client().send(&PrevClose).await.unwrap();
        assert_eq!(value["status"], "OK");

        let request = server.last_request().unwrap();
        assert_eq!(request.path, "/v2/aggs/ticker/MSFT/prev");
        assert_eq!(request.query_value("adjusted"), Some("false"));
    }
}
