//! HTTP transport abstraction
//!
//! The client only needs one capability from the network: send a fully built
//! request and hand back the status, headers and body. Hiding that behind
//! [`HttpTransport`] lets tests substitute a recording stub for the real
//! reqwest-backed [`ReqwestTransport`].

use crate::request::Method;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Boxed error used as the cause of transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Transport layer errors
///
/// The HTTP exchange itself could not complete. A response with an error
/// status is not a transport error.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    /// DNS resolution or TCP/TLS connection failed
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// Request could not be built or sent
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] BoxError),
}

impl TransportError {
    /// Returns true if the failure happened before any response arrived
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(Box::new(err))
        } else if err.is_connect() {
            Self::Connect(Box::new(err))
        } else if err.is_body() || err.is_decode() {
            Self::Body(Box::new(err))
        } else {
            Self::Request(Box::new(err))
        }
    }
}

/// Outgoing HTTP request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including any query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body (POST only)
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Query string portion of the URL, without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }

    /// URL without the query string
    pub fn url_path(&self) -> &str {
        self.url.split_once('?').map(|(base, _)| base).unwrap_or(&self.url)
    }
}

/// Response as received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns true for 1xx and 2xx statuses
    pub fn is_success(&self) -> bool {
        self.status < 300
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Trait for HTTP transport abstraction
///
/// Implementations must be safe to share between tasks; one call is one
/// round trip with no retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and read the full response body
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeouts and user agent
    pub fn new(
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Client(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url_path()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(Box::new(e)))?
            .to_vec();

        debug!(status, bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
