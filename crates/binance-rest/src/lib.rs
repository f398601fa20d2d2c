//! REST API client for the Binance spot exchange
//!
//! This crate provides a REST API client for Binance, including market data,
//! account queries and order execution.
//!
//! # Features
//!
//! - **Market Data**: Depth, trades, aggregate trades, klines, tickers, exchange info
//! - **Account**: Balances, trade history, open and historical orders
//! - **Trading**: Place, test and cancel orders
//!
//! # Authentication
//!
//! Signed endpoints require API credentials. The client signs the canonical,
//! key-sorted parameter string with HMAC-SHA256 and sends the API key in the
//! `X-MBX-APIKEY` header.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, Credentials, KlineInterval, KlinesQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BinanceRestClient::new()?;
//!     let klines = client
//!         .market()
//!         .klines(KlinesQuery::new("BTCUSDT", KlineInterval::H1).limit(24))
//!         .await?;
//!     println!("{} candles", klines.len());
//!
//!     // Signed endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BinanceRestClient::with_credentials(creds)?;
//!     let account = auth_client.get_account().await?;
//!     for balance in account.non_zero_balances() {
//!         println!("{}: {}", balance.asset, balance.total());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The client does not throttle. Usage reported in `X-MBX-USED-WEIGHT-*`
//! headers is logged at debug level, and a 429 or 418 response surfaces as
//! [`RestError::Api`] with the server's `Retry-After`.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use binance_auth::{Clock, Credentials, FixedClock, SystemClock};
pub use client::{BinanceRestClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{RestError, RestResult};
pub use request::{Method, QueryValue, Request};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

// Re-export wire enums used in queries
pub use binance_types::{
    KlineInterval, OrderResponseType, OrderStatus, OrderType, Side, TimeInForce,
};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AggTrade, BookTicker, Depth, ExchangeInfo, Kline, PriceLevel, PriceTicker, ServerTime,
    SymbolFilter, SymbolInfo, Trade,
    // Account
    AccountInfo, AccountTrade, Balance, Order,
    // Trading
    CancelledOrder, Fill, OrderResponse,
    // Queries
    AccountQuery, AggTradesQuery, AllOrdersQuery, CancelOrderRequest, DepthQuery,
    HistoricalTradesQuery, KlinesQuery, MyTradesQuery, NewOrderRequest, OpenOrdersQuery,
    OrderQuery, TradesQuery,
};
