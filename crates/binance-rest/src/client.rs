//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{Method, Request};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{AccountInfo, CancelOrderRequest, CancelledOrder, Depth, DepthQuery};
use crate::types::{NewOrderRequest, OrderResponse, PriceTicker, ServerTime};
use binance_auth::{Clock, Credentials, SystemClock, API_KEY_HEADER};
use binance_types::ReportedUsage;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default TCP/TLS connect timeout
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Largest recvWindow the exchange accepts, in milliseconds
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;

const DEFAULT_USER_AGENT: &str = concat!("binance-rest/", env!("CARGO_PKG_VERSION"));

const BASE_URL_ENV: &str = "BINANCE_BASE_URL";
const RECV_WINDOW_ENV: &str = "BINANCE_RECV_WINDOW";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Binance REST API client
///
/// Turns [`Request`]s into HTTP exchanges: encodes parameters canonically,
/// signs them when the request is marked signed, attaches the API key
/// header and maps the response status.
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BinanceRestClient::new()?;
///     let depth = client.get_depth("BTCUSDT", Some(10)).await?;
///     println!("best bid: {:?}", depth.best_bid());
///
///     // With authentication for signed endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BinanceRestClient::with_credentials(creds)?;
///     let account = auth_client.get_account().await?;
///     println!("{} balances", account.balances.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BinanceRestClient {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    credentials: Option<Arc<Credentials>>,
    base_url: String,
    recv_window: Option<u64>,
}

impl BinanceRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and signed) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from `BINANCE_*` environment variables
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(
            config.timeout,
            config.connect_timeout,
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;

        Self::with_transport(config, Arc::new(transport), Arc::new(SystemClock::new()))
    }

    /// Create a client over an explicit transport and clock
    ///
    /// Timeouts and user agent in `config` are transport settings and are
    /// ignored here.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> RestResult<Self> {
        config.validate()?;

        info!(
            base_url = %config.base_url,
            authenticated = config.credentials.is_some(),
            clock = clock.name(),
            "Created Binance REST client"
        );

        Ok(Self {
            transport,
            clock,
            credentials: config.credentials.map(Arc::new),
            base_url: config.base_url,
            recv_window: config.recv_window,
        })
    }

    /// Check if the client has credentials for signed endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default recvWindow applied to signed requests
    pub fn recv_window(&self) -> Option<u64> {
        self.recv_window
    }

    /// Start a signed request stamped with the current time
    ///
    /// Sets `timestamp` from the client's clock and the default
    /// `recvWindow`, if one is configured.
    pub fn signed_request(&self, method: Method, path: &str) -> Request {
        Request::new(method, path)
            .param("timestamp", self.clock.now_millis())
            .optional_param("recvWindow", self.recv_window)
            .signed()
    }

    /// Build the HTTP request for `request` without sending it
    ///
    /// The canonical query string is signed as-is and the signature is
    /// appended last, so the server sees exactly the bytes that were signed.
    /// A signed request must not carry its own `signature` parameter.
    pub fn prepare(&self, request: Request) -> RestResult<HttpRequest> {
        if request.is_signed() && request.get_param("signature").is_some() {
            return Err(RestError::InvalidParameter(
                "signature is computed by the client and cannot be set".to_string(),
            ));
        }

        let mut payload = request.query_string()?;

        if request.is_signed() {
            let credentials = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
            let signature = credentials.sign(&payload);
            if !payload.is_empty() {
                payload.push('&');
            }
            payload.push_str("signature=");
            payload.push_str(&signature);
        }

        let mut headers = Vec::new();
        if let Some(credentials) = &self.credentials {
            headers.push((API_KEY_HEADER.to_string(), credentials.api_key().to_string()));
        }

        let method = request.method();
        let mut url = format!("{}{}", self.base_url, request.path());
        let body = if method.has_form_body() {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
            Some(payload)
        } else {
            if !payload.is_empty() {
                url.push('?');
                url.push_str(&payload);
            }
            None
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send a request and return the raw response body
    ///
    /// A status of 300 or above becomes [`RestError::Api`] with the body
    /// untouched. Nothing is retried.
    #[instrument(
        skip(self, request),
        fields(method = %request.method(), path = %request.path(), signed = request.is_signed())
    )]
    pub async fn dispatch(&self, request: Request) -> RestResult<Vec<u8>> {
        let http_request = self.prepare(request)?;
        debug!("Dispatching request");

        let response = self.transport.send(http_request).await?;

        for usage in ReportedUsage::collect(
            response
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        ) {
            debug!(kind = ?usage.kind, window = %usage.window, value = usage.value, "Reported usage");
        }

        if !response.is_success() {
            let retry_after = response
                .header("retry-after")
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);

            warn!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Request failed"
            );

            return Err(RestError::Api {
                status: response.status,
                body: response.body,
                retry_after,
            });
        }

        Ok(response.body)
    }

    /// Dispatch and decode a JSON response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: Request) -> RestResult<T> {
        let body = self.dispatch(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Test connectivity
    pub async fn ping(&self) -> RestResult<()> {
        self.market().ping().await
    }

    /// Get the exchange's current time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().server_time().await
    }

    /// Get orderbook depth for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "BTCUSDT")
    /// * `limit` - Number of price levels, 100 when omitted
    pub async fn get_depth(&self, symbol: &str, limit: Option<u32>) -> RestResult<Depth> {
        let mut query = DepthQuery::new(symbol);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.market().depth(query).await
    }

    /// Get the latest price for a symbol
    pub async fn get_price(&self, symbol: &str) -> RestResult<PriceTicker> {
        self.market().price_ticker(symbol).await
    }

    // ========================================================================
    // Signed Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(AccountEndpoints::new(self))
    }

    /// Get account information and balances
    pub async fn get_account(&self) -> RestResult<AccountInfo> {
        self.account()?.account(Default::default()).await
    }

    // ========================================================================
    // Signed Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(TradingEndpoints::new(self))
    }

    /// Place a new order
    pub async fn place_order(&self, order: NewOrderRequest) -> RestResult<OrderResponse> {
        self.trading()?.new_order(order).await
    }

    /// Cancel an open order
    pub async fn cancel_order(&self, cancel: CancelOrderRequest) -> RestResult<CancelledOrder> {
        self.trading()?.cancel_order(cancel).await
    }
}

impl std::fmt::Debug for BinanceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("recv_window", &self.recv_window)
            .field("clock", &self.clock.name())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Default recvWindow in milliseconds for signed requests
    pub recv_window: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: None,
            recv_window: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    ///
    /// Credentials come from `BINANCE_API_KEY` and `BINANCE_API_SECRET`.
    /// `BINANCE_BASE_URL` and `BINANCE_RECV_WINDOW` are optional.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::new().with_credentials(Credentials::from_env()?);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }

        if let Ok(raw) = std::env::var(RECV_WINDOW_ENV) {
            let recv_window = raw.trim().parse::<u64>().map_err(|_| {
                RestError::Configuration(format!("{} is not a number: {}", RECV_WINDOW_ENV, raw))
            })?;
            config = config.with_recv_window(recv_window);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API host, e.g. `https://testnet.binance.vision`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the default recvWindow for signed requests
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Check the configuration for values the exchange would reject
    pub fn validate(&self) -> RestResult<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(RestError::Configuration(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if let Some(recv_window) = self.recv_window {
            if recv_window == 0 || recv_window > MAX_RECV_WINDOW_MS {
                return Err(RestError::Configuration(format!(
                    "recvWindow must be between 1 and {} ms, got {}",
                    MAX_RECV_WINDOW_MS, recv_window
                )));
            }
        }

        Ok(())
    }
}
