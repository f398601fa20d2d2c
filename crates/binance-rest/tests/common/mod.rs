//! Common test utilities for binance-rest integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use binance_rest::{
    BinanceRestClient, ClientConfig, Credentials, FixedClock, HttpRequest, HttpResponse,
    HttpTransport, TransportError,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Timestamp used by every fixture
pub const FIXED_TIMESTAMP: i64 = 1234567890;

/// Secret used by every fixture
pub const TEST_SECRET: &str = "secret";

pub const TEST_API_KEY: &str = "test-api-key";

/// Transport that records requests and replays queued responses
///
/// Once the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with a JSON body
    pub fn respond(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// All requests sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request
    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET)
}

/// Client with fixture credentials and a frozen clock
pub fn signed_client(transport: Arc<RecordingTransport>) -> BinanceRestClient {
    client_with(
        ClientConfig::new().with_credentials(test_credentials()),
        transport,
    )
}

/// Client without credentials
pub fn public_client(transport: Arc<RecordingTransport>) -> BinanceRestClient {
    client_with(ClientConfig::new(), transport)
}

pub fn client_with(config: ClientConfig, transport: Arc<RecordingTransport>) -> BinanceRestClient {
    BinanceRestClient::with_transport(config, transport, Arc::new(FixedClock::new(FIXED_TIMESTAMP)))
        .expect("valid test config")
}
