//! Types for Binance REST API requests and responses
//!
//! Prices and quantities arrive as JSON strings and are decoded into
//! [`Decimal`]. Request types render every field through
//! [`Request::param`] / [`Request::optional_param`] in their `apply` method.

use crate::request::Request;
use binance_types::{
    KlineInterval, OrderResponseType, OrderStatus, OrderType, RateLimit, Side, TimeInForce,
};
use rust_decimal::Decimal;
use serde::Deserialize;

// ============================================================================
// Market Data Types
// ============================================================================

/// Exchange clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Milliseconds since the Unix epoch
    pub server_time: i64,
}

/// Trading rules and symbol metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub timezone: String,
    pub server_time: i64,
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    #[serde(default)]
    pub exchange_filters: Vec<serde_json::Value>,
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// Look up a symbol by name
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

/// Symbol metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    /// Trading status, e.g. `TRADING` or `BREAK`
    pub status: String,
    pub base_asset: String,
    #[serde(default)]
    pub base_asset_precision: u32,
    pub quote_asset: String,
    #[serde(default, alias = "quotePrecision")]
    pub quote_asset_precision: u32,
    #[serde(default)]
    pub order_types: Vec<OrderType>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

impl SymbolInfo {
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }

    /// Price bounds and tick size
    pub fn price_filter(&self) -> Option<(Decimal, Decimal, Decimal)> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::PriceFilter {
                min_price,
                max_price,
                tick_size,
            } => Some((*min_price, *max_price, *tick_size)),
            _ => None,
        })
    }

    /// Quantity bounds and step size
    pub fn lot_size(&self) -> Option<(Decimal, Decimal, Decimal)> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::LotSize {
                min_qty,
                max_qty,
                step_size,
            } => Some((*min_qty, *max_qty, *step_size)),
            _ => None,
        })
    }
}

/// Trading rule attached to a symbol
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "filterType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolFilter {
    #[serde(rename_all = "camelCase")]
    PriceFilter {
        min_price: Decimal,
        max_price: Decimal,
        tick_size: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    LotSize {
        min_qty: Decimal,
        max_qty: Decimal,
        step_size: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    MinNotional { min_notional: Decimal },
    #[serde(rename_all = "camelCase")]
    Notional {
        min_notional: Decimal,
        max_notional: Decimal,
    },
    /// Any filter this client does not model
    #[serde(other)]
    Other,
}

/// Price level `[price, quantity]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Orderbook snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth {
    pub last_update_id: u64,
    /// Best bid first
    pub bids: Vec<PriceLevel>,
    /// Best ask first
    pub asks: Vec<PriceLevel>,
}

impl Depth {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    /// Get the mid price (average of best bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some((bid + ask) / Decimal::TWO)
    }
}

/// Public trade
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub price: Decimal,
    pub qty: Decimal,
    #[serde(default)]
    pub quote_qty: Decimal,
    pub time: i64,
    pub is_buyer_maker: bool,
    #[serde(default)]
    pub is_best_match: bool,
}

/// Trades that filled at the same time, from the same order, at the same price
#[derive(Debug, Clone, Deserialize)]
pub struct AggTrade {
    #[serde(rename = "a")]
    pub id: u64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub quantity: Decimal,
    #[serde(rename = "f")]
    pub first_trade_id: u64,
    #[serde(rename = "l")]
    pub last_trade_id: u64,
    #[serde(rename = "T")]
    pub time: i64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    #[serde(rename = "M", default)]
    pub is_best_match: bool,
}

/// Row layout of a kline as sent by the exchange
type KlineRow = (
    i64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    i64,
    Decimal,
    u64,
    Decimal,
    Decimal,
    serde_json::Value,
);

/// Candlestick
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "KlineRow")]
pub struct Kline {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
    pub quote_volume: Decimal,
    pub trade_count: u64,
    pub taker_buy_base_volume: Decimal,
    pub taker_buy_quote_volume: Decimal,
}

impl From<KlineRow> for Kline {
    fn from(row: KlineRow) -> Self {
        let (
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume,
            trade_count,
            taker_buy_base_volume,
            taker_buy_quote_volume,
            _,
        ) = row;

        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume,
            trade_count,
            taker_buy_base_volume,
            taker_buy_quote_volume,
        }
    }
}

impl Kline {
    /// Returns true if the close is above the open
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Latest price for a symbol
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    pub price: Decimal,
}

/// Best bid and ask for a symbol
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    pub symbol: String,
    pub bid_price: Decimal,
    pub bid_qty: Decimal,
    pub ask_price: Decimal,
    pub ask_qty: Decimal,
}

impl BookTicker {
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }

    /// Get spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = (self.ask_price + self.bid_price) / Decimal::TWO;
        if mid.is_zero() {
            return None;
        }
        Some(self.spread() / mid * Decimal::from(10000))
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account information
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Commission rates in basis points
    pub maker_commission: i64,
    pub taker_commission: i64,
    pub buyer_commission: i64,
    pub seller_commission: i64,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub account_type: Option<String>,
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AccountInfo {
    /// Get balance for a specific asset
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }

    /// Balances with a free or locked amount
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter().filter(|b| !b.total().is_zero())
    }
}

/// Balance of one asset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

impl Balance {
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

/// Trade executed for the account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrade {
    pub symbol: String,
    pub id: u64,
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    pub price: Decimal,
    pub qty: Decimal,
    #[serde(default)]
    pub quote_qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    pub time: i64,
    pub is_buyer: bool,
    pub is_maker: bool,
    #[serde(default)]
    pub is_best_match: bool,
}

/// Order as reported by order queries
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    #[serde(default)]
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub iceberg_qty: Decimal,
    pub time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub is_working: bool,
}

impl Order {
    /// Quantity still to be filled
    pub fn remaining_qty(&self) -> Decimal {
        self.orig_qty - self.executed_qty
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Response from placing an order
///
/// `ACK` responses only carry the identifiers; `RESULT` adds the order
/// state and `FULL` adds the fills.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub transact_time: i64,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    #[serde(default)]
    pub cummulative_quote_qty: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, rename = "type")]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub fills: Vec<Fill>,
}

impl OrderResponse {
    /// Volume-weighted price across fills
    pub fn average_fill_price(&self) -> Option<Decimal> {
        let qty: Decimal = self.fills.iter().map(|f| f.qty).sum();
        if qty.is_zero() {
            return None;
        }
        let notional: Decimal = self.fills.iter().map(|f| f.price * f.qty).sum();
        Some(notional / qty)
    }
}

/// Partial execution of a new order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub price: Decimal,
    pub qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    #[serde(default)]
    pub trade_id: Option<i64>,
}

/// Cancel order result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledOrder {
    pub symbol: String,
    pub orig_client_order_id: String,
    pub order_id: i64,
    pub client_order_id: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Default number of levels requested from `/api/v3/depth`
pub const DEFAULT_DEPTH_LIMIT: u32 = 100;

/// Orderbook depth query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthQuery {
    pub symbol: String,
    /// Always sent; defaults to [`DEFAULT_DEPTH_LIMIT`]
    pub limit: u32,
}

impl DepthQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request.param("symbol", self.symbol).param("limit", self.limit)
    }
}

/// Recent trades query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradesQuery {
    pub symbol: String,
    pub limit: Option<u32>,
}

impl TradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("limit", self.limit)
    }
}

/// Older trades query, requires an API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalTradesQuery {
    pub symbol: String,
    pub limit: Option<u32>,
    /// Trade id to fetch from
    pub from_id: Option<u64>,
}

impl HistoricalTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
            from_id: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("limit", self.limit)
            .optional_param("fromId", self.from_id)
    }
}

/// Aggregate trades query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggTradesQuery {
    pub symbol: String,
    pub limit: Option<u32>,
    pub from_id: Option<u64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl AggTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
            from_id: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    /// Restrict to a time range, in milliseconds
    pub fn between(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("limit", self.limit)
            .optional_param("fromId", self.from_id)
            .optional_param("startTime", self.start_time)
            .optional_param("endTime", self.end_time)
    }
}

/// Candlestick query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlinesQuery {
    pub symbol: String,
    pub interval: KlineInterval,
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl KlinesQuery {
    pub fn new(symbol: impl Into<String>, interval: KlineInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            limit: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_time(mut self, millis: i64) -> Self {
        self.start_time = Some(millis);
        self
    }

    pub fn end_time(mut self, millis: i64) -> Self {
        self.end_time = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .param("interval", self.interval)
            .optional_param("limit", self.limit)
            .optional_param("startTime", self.start_time)
            .optional_param("endTime", self.end_time)
    }
}

/// Account information query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountQuery {
    pub recv_window: Option<u64>,
}

impl AccountQuery {
    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request.optional_param("recvWindow", self.recv_window)
    }
}

/// Account trade history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyTradesQuery {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub limit: Option<u32>,
    pub from_id: Option<u64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub recv_window: Option<u64>,
}

impl MyTradesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            limit: None,
            from_id: None,
            start_time: None,
            end_time: None,
            recv_window: None,
        }
    }

    /// Only trades of this order
    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn between(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("orderId", self.order_id)
            .optional_param("limit", self.limit)
            .optional_param("fromId", self.from_id)
            .optional_param("startTime", self.start_time)
            .optional_param("endTime", self.end_time)
            .optional_param("recvWindow", self.recv_window)
    }
}

/// Open orders query; all symbols when `symbol` is empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOrdersQuery {
    pub symbol: Option<String>,
    pub recv_window: Option<u64>,
}

impl OpenOrdersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .optional_param("symbol", self.symbol)
            .optional_param("recvWindow", self.recv_window)
    }
}

/// Order history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllOrdersQuery {
    pub symbol: String,
    /// Return orders with an id at or above this one
    pub order_id: Option<i64>,
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub recv_window: Option<u64>,
}

impl AllOrdersQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            limit: None,
            start_time: None,
            end_time: None,
            recv_window: None,
        }
    }

    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn between(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("orderId", self.order_id)
            .optional_param("limit", self.limit)
            .optional_param("startTime", self.start_time)
            .optional_param("endTime", self.end_time)
            .optional_param("recvWindow", self.recv_window)
    }
}

/// Single order lookup, by exchange id or client id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
}

impl OrderQuery {
    /// Look up by exchange-assigned id
    pub fn by_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            recv_window: None,
        }
    }

    /// Look up by the client order id given at placement
    pub fn by_client_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            recv_window: None,
        }
    }

    pub fn recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("orderId", self.order_id)
            .optional_param("origClientOrderId", self.orig_client_order_id)
            .optional_param("recvWindow", self.recv_window)
    }
}

/// Request to place an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Limit price
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    pub new_client_order_id: Option<String>,
    /// Trigger price for stop and take-profit orders
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub response_type: OrderResponseType,
    pub recv_window: Option<u64>,
}

impl NewOrderRequest {
    /// Create an order of any type; set the type's required fields separately
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            time_in_force: None,
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            response_type: OrderResponseType::default(),
            recv_window: None,
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// Create a good-till-cancelled limit order
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity)
            .with_price(price)
            .with_time_in_force(TimeInForce::GoodTillCancelled)
    }

    /// Create a stop loss limit order
    pub fn stop_loss_limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::StopLossLimit, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
            .with_time_in_force(TimeInForce::GoodTillCancelled)
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the client order id
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Show only this much of the quantity on the book
    pub fn with_iceberg_qty(mut self, qty: Decimal) -> Self {
        self.iceberg_qty = Some(qty);
        self
    }

    pub fn with_response_type(mut self, response_type: OrderResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Check the fields the order type requires
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.is_empty() {
            return Err("symbol is empty".to_string());
        }
        if self.quantity <= Decimal::ZERO {
            return Err(format!("quantity must be positive, got {}", self.quantity));
        }
        if self.order_type == OrderType::Unknown {
            return Err("order type is unknown".to_string());
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(format!("{} orders require a price", self.order_type));
        }
        if self.order_type.requires_stop_price() && self.stop_price.is_none() {
            return Err(format!("{} orders require a stop price", self.order_type));
        }
        Ok(())
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .param("side", self.side)
            .param("type", self.order_type)
            .param("quantity", self.quantity)
            .param("newOrderRespType", self.response_type)
            .optional_param("price", self.price)
            .optional_param("timeInForce", self.time_in_force)
            .optional_param("newClientOrderId", self.new_client_order_id)
            .optional_param("stopPrice", self.stop_price)
            .optional_param("icebergQty", self.iceberg_qty)
            .optional_param("recvWindow", self.recv_window)
    }
}

/// Request to cancel an order, by exchange id or client id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
    /// Client id for the cancel itself
    pub new_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
}

impl CancelOrderRequest {
    pub fn by_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            new_client_order_id: None,
            recv_window: None,
        }
    }

    pub fn by_client_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            new_client_order_id: None,
            recv_window: None,
        }
    }

    pub fn with_new_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn apply(self, request: Request) -> Request {
        request
            .param("symbol", self.symbol)
            .optional_param("orderId", self.order_id)
            .optional_param("origClientOrderId", self.orig_client_order_id)
            .optional_param("newClientOrderId", self.new_client_order_id)
            .optional_param("recvWindow", self.recv_window)
    }
}
