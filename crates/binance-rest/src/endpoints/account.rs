//! Signed account endpoints
//!
//! These endpoints require authentication.

use crate::client::BinanceRestClient;
use crate::error::{RestError, RestResult};
use crate::request::Method;
use crate::types::{
    AccountInfo, AccountQuery, AccountTrade, AllOrdersQuery, MyTradesQuery, OpenOrdersQuery,
    Order, OrderQuery,
};
use tracing::{debug, instrument};

/// Signed account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// Get account information and balances
    #[instrument(skip(self))]
    pub async fn account(&self, query: AccountQuery) -> RestResult<AccountInfo> {
        let request = query.apply(self.client.signed_request(Method::Get, "/api/v3/account"));
        let account: AccountInfo = self.client.send_json(request).await?;
        debug!(balances = account.balances.len(), "Fetched account");
        Ok(account)
    }

    /// Get trades for a symbol
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn my_trades(&self, query: MyTradesQuery) -> RestResult<Vec<AccountTrade>> {
        let request = query.apply(self.client.signed_request(Method::Get, "/api/v3/myTrades"));
        self.client.send_json(request).await
    }

    /// Get open orders, for one symbol or all of them
    #[instrument(skip(self))]
    pub async fn open_orders(&self, query: OpenOrdersQuery) -> RestResult<Vec<Order>> {
        let request = query.apply(self.client.signed_request(Method::Get, "/api/v3/openOrders"));
        self.client.send_json(request).await
    }

    /// Get all orders for a symbol: open, cancelled or filled
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn all_orders(&self, query: AllOrdersQuery) -> RestResult<Vec<Order>> {
        let request = query.apply(self.client.signed_request(Method::Get, "/api/v3/allOrders"));
        self.client.send_json(request).await
    }

    /// Get a single order
    #[instrument(skip(self), fields(symbol = %query.symbol))]
    pub async fn get_order(&self, query: OrderQuery) -> RestResult<Order> {
        if query.order_id.is_none() && query.orig_client_order_id.is_none() {
            return Err(RestError::InvalidParameter(
                "either orderId or origClientOrderId must be set".to_string(),
            ));
        }
        let request = query.apply(self.client.signed_request(Method::Get, "/api/v3/order"));
        self.client.send_json(request).await
    }
}
