//! Local HTTP server for exercising clients in tests.
//!
//! [`MockServer`] answers every request with one canned status and body and
//! records the method, path, and decoded query pairs it received.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

use crate::client::MassiveClient;

/// API key used by clients created with [`MockServer::client`].
pub const TEST_API_KEY: &str = "test-key";

/// A request received by a [`MockServer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// Decoded query pairs in wire order.
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Returns every value sent for `name`.
    #[must_use]
    pub fn query_values(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns the first value sent for `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A one-response HTTP/1.1 server bound to a random local port.
///
/// The accept loop is aborted when the server is dropped.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Start a server that answers every request with `status` and `body`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");

        let body: Arc<str> = body.into().into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let body = Arc::clone(&body);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, status, &body, &recorded).await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Start a server that answers `200 OK` with `body` serialized as JSON.
    pub async fn json(body: &serde_json::Value) -> Self {
        Self::start(200, body.to_string()).await
    }

    /// Returns the base URL of this server, e.g. `http://127.0.0.1:50123`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns a client pointed at this server using [`TEST_API_KEY`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn client(&self) -> MassiveClient {
        MassiveClient::builder(TEST_API_KEY)
            .base_url(self.base_url())
            .build()
            .expect("Failed to build client")
    }

    /// Returns all requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Returns a base URL pointing at a local port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{addr}")
}

async fn serve(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&head);
    if let Some(request) = head.lines().next().and_then(parse_request_line) {
        requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn parse_request_line(line: &str) -> Option<RecordedRequest> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let url = Url::parse(&format!("http://localhost{target}")).ok()?;

    Some(RecordedRequest {
        method: method.to_string(),
        path: url.path().to_string(),
        query: url.query_pairs().into_owned().collect(),
    })
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let request =
            parse_request_line("GET /v3/trades/AAPL?limit=10&apiKey=k HTTP/1.1").unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/v3/trades/AAPL");
        assert_eq!(request.query_value("limit"), Some("10"));
        assert_eq!(request.query_values("apiKey"), vec!["k"]);
        assert!(parse_request_line("").is_none());
    }
}
