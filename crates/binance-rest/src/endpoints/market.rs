//! Public market data endpoints
//!
//! These endpoints don't require authentication, except
//! [`MarketEndpoints::historical_trades`] which needs the API key header.

use crate::client::BinanceRestClient;
use crate::error::{RestError, RestResult};
use crate::request::{Method, Request};
use crate::types::{
    AggTrade, AggTradesQuery, BookTicker, Depth, DepthQuery, ExchangeInfo, HistoricalTradesQuery,
    Kline, KlinesQuery, PriceTicker, ServerTime, Trade, TradesQuery,
};
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<()> {
        let _: IgnoredAny = self
            .client
            .send_json(Request::new(Method::Get, "/api/v3/ping"))
            .await?;
        Ok(())
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn server_time(&self) -> RestResult<ServerTime> {
        self.client
            .send_json(Request::new(Method::Get, "/api/v3/time"))
            .await
    }

    /// Get trading rules, rate limits and symbol metadata
    #[instrument(skip(self))]
    pub async fn exchange_info(&self) -> RestResult<ExchangeInfo> {
        let info: ExchangeInfo = self
            .client
            .send_json(Request::new(Method::Get, "/api/v3/exchangeInfo"))
            .await?;
        debug!(symbols = info.symbols.len(), "Fetched exchange info");
        Ok(info)
    }

    /// Get orderbook depth
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn depth(&self, query: DepthQuery) -> RestResult<Depth> {
        let request = query.apply(Request::new(Method::Get, "/api/v3/depth"));
        self.client.send_json(request).await
    }

    /// Get recent trades
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn trades(&self, query: TradesQuery) -> RestResult<Vec<Trade>> {
        let request = query.apply(Request::new(Method::Get, "/api/v3/trades"));
        self.client.send_json(request).await
    }

    /// Get older trades
    ///
    /// Requires credentials for the API key header; the request is not signed.
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn historical_trades(&self, query: HistoricalTradesQuery) -> RestResult<Vec<Trade>> {
        if !self.client.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        let request = query.apply(Request::new(Method::Get, "/api/v3/historicalTrades"));
        self.client.send_json(request).await
    }

    /// Get compressed, aggregate trades
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn agg_trades(&self, query: AggTradesQuery) -> RestResult<Vec<AggTrade>> {
        let request = query.apply(Request::new(Method::Get, "/api/v3/aggTrades"));
        self.client.send_json(request).await
    }

    /// Get candlesticks
    #[instrument(skip(self), fields(symbol = %query.symbol, interval = %query.interval))]
    pub async fn klines(&self, query: KlinesQuery) -> RestResult<Vec<Kline>> {
        let request = query.apply(Request::new(Method::Get, "/api/v3/klines"));
        self.client.send_json(request).await
    }

    /// Get the latest price for a symbol
    #[instrument(skip(self))]
    pub async fn price_ticker(&self, symbol: &str) -> RestResult<PriceTicker> {
        let request = Request::new(Method::Get, "/api/v3/ticker/price").param("symbol", symbol);
        self.client.send_json(request).await
    }

    /// Get the latest price for every symbol
    #[instrument(skip(self))]
    pub async fn price_tickers(&self) -> RestResult<Vec<PriceTicker>> {
        self.client
            .send_json(Request::new(Method::Get, "/api/v3/ticker/price"))
            .await
    }

    /// Get best bid and ask for a symbol
    #[instrument(skip(self))]
    pub async fn book_ticker(&self, symbol: &str) -> RestResult<BookTicker> {
        let request =
            Request::new(Method::Get, "/api/v3/ticker/bookTicker").param("symbol", symbol);
        self.client.send_json(request).await
    }

    /// Get best bid and ask for every symbol
    #[instrument(skip(self))]
    pub async fn book_tickers(&self) -> RestResult<Vec<BookTicker>> {
        self.client
            .send_json(Request::new(Method::Get, "/api/v3/ticker/bookTicker"))
            .await
    }
}
