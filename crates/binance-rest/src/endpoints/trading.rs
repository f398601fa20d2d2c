//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::client::BinanceRestClient;
use crate::error::{RestError, RestResult};
use crate::request::Method;
use crate::types::{CancelOrderRequest, CancelledOrder, NewOrderRequest, OrderResponse};
use serde::de::IgnoredAny;
use tracing::{info, instrument, warn};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    #[instrument(skip(self), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn new_order(&self, order: NewOrderRequest) -> RestResult<OrderResponse> {
        if let Err(reason) = order.validate() {
            warn!(%reason, "Rejecting order before sending");
            return Err(RestError::InvalidParameter(reason));
        }

        let request = order.apply(self.client.signed_request(Method::Post, "/api/v3/order"));
        let response: OrderResponse = self.client.send_json(request).await?;

        info!(order_id = response.order_id, status = ?response.status, "Order placed");
        Ok(response)
    }

    /// Validate an order with the matching engine without placing it
    #[instrument(skip(self), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn test_order(&self, order: NewOrderRequest) -> RestResult<()> {
        order.validate().map_err(RestError::InvalidParameter)?;

        let request = order.apply(
            self.client
                .signed_request(Method::Post, "/api/v3/order/test"),
        );
        let _: IgnoredAny = self.client.send_json(request).await?;
        Ok(())
    }

    /// Cancel an open order
    #[instrument(skip(self), fields(symbol = %cancel.symbol))]
    pub async fn cancel_order(&self, cancel: CancelOrderRequest) -> RestResult<CancelledOrder> {
        if cancel.order_id.is_none() && cancel.orig_client_order_id.is_none() {
            return Err(RestError::InvalidParameter(
                "either orderId or origClientOrderId must be set".to_string(),
            ));
        }

        let request = cancel.apply(self.client.signed_request(Method::Delete, "/api/v3/order"));
        let cancelled: CancelledOrder = self.client.send_json(request).await?;

        info!(order_id = cancelled.order_id, "Order cancelled");
        Ok(cancelled)
    }
}
