//! Endpoint wrappers: request shape and response decoding

mod common;

use binance_rest::{
    AccountQuery, AggTradesQuery, AllOrdersQuery, CancelOrderRequest, DepthQuery,
    HistoricalTradesQuery, KlineInterval, KlinesQuery, Method, MyTradesQuery, NewOrderRequest,
    OpenOrdersQuery, OrderQuery, OrderResponseType, OrderStatus, OrderType, RestError, Side,
    TradesQuery,
};
use common::{public_client, signed_client, RecordingTransport};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_ping_and_server_time() {
    let transport = RecordingTransport::new();
    transport.respond(200, "{}");
    transport.respond(200, r#"{"serverTime":1499827319559}"#);
    let client = public_client(transport.clone());

    client.ping().await.unwrap();
    let time = client.get_server_time().await.unwrap();

    assert_eq!(time.server_time, 1499827319559);
    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.binance.com/api/v3/ping",
            "https://api.binance.com/api/v3/time",
        ]
    );
}

#[tokio::test]
async fn test_depth_default_limit() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"{"lastUpdateId":1,"bids":[["30000.10","0.5"]],"asks":[["30000.20","1.25"]]}"#,
    );
    let client = public_client(transport.clone());

    let depth = client.market().depth(DepthQuery::new("BTCUSDT")).await.unwrap();

    assert_eq!(transport.last().query(), Some("limit=100&symbol=BTCUSDT"));
    assert_eq!(depth.best_ask().unwrap().quantity, dec!(1.25));
    assert_eq!(depth.spread(), Some(dec!(0.10)));
}

#[tokio::test]
async fn test_depth_custom_limit_through_client() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"lastUpdateId":1,"bids":[],"asks":[]}"#);
    let client = public_client(transport.clone());

    let depth = client.get_depth("ETHBTC", Some(5)).await.unwrap();

    assert_eq!(transport.last().query(), Some("limit=5&symbol=ETHBTC"));
    assert!(depth.best_bid().is_none());
}

#[tokio::test]
async fn test_trades_omit_unset_limit() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"[{"id":28457,"price":"4.00000100","qty":"12.00000000","quoteQty":"48.000012","time":1499865549590,"isBuyerMaker":true,"isBestMatch":true}]"#,
    );
    let client = public_client(transport.clone());

    let trades = client.market().trades(TradesQuery::new("BNBBTC")).await.unwrap();

    assert_eq!(transport.last().query(), Some("symbol=BNBBTC"));
    assert_eq!(trades[0].id, 28457);
    assert_eq!(trades[0].qty, dec!(12));
}

#[tokio::test]
async fn test_historical_trades_requires_key() {
    let transport = RecordingTransport::new();
    let public = public_client(transport.clone());

    let result = public
        .market()
        .historical_trades(HistoricalTradesQuery::new("BNBBTC"))
        .await;
    assert!(matches!(result, Err(RestError::AuthRequired)));
    assert!(transport.requests().is_empty());

    transport.respond(200, "[]");
    let signed = signed_client(transport.clone());
    let trades = signed
        .market()
        .historical_trades(HistoricalTradesQuery::new("BNBBTC").from_id(100).limit(10))
        .await
        .unwrap();

    let sent = transport.last();
    assert!(trades.is_empty());
    assert_eq!(sent.query(), Some("fromId=100&limit=10&symbol=BNBBTC"));
    assert!(sent.header("X-MBX-APIKEY").is_some());
}

#[tokio::test]
async fn test_agg_trades_time_range() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"[{"a":26129,"p":"0.01633102","q":"4.70443515","f":27781,"l":27781,"T":1498793709153,"m":true,"M":true}]"#,
    );
    let client = public_client(transport.clone());

    let trades = client
        .market()
        .agg_trades(AggTradesQuery::new("LTCBTC").between(1498793709000, 1498793710000))
        .await
        .unwrap();

    assert_eq!(
        transport.last().query(),
        Some("endTime=1498793710000&startTime=1498793709000&symbol=LTCBTC")
    );
    assert_eq!(trades[0].first_trade_id, 27781);
}

#[tokio::test]
async fn test_klines() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"[[1499040000000,"0.01634790","0.80000000","0.01575800","0.01577100","148976.11427815",1499644799999,"2434.19055334",308,"1756.87402397","28.46694368","0"]]"#,
    );
    let client = public_client(transport.clone());

    let klines = client
        .market()
        .klines(KlinesQuery::new("LTCBTC", KlineInterval::W1).limit(1))
        .await
        .unwrap();

    assert_eq!(
        transport.last().query(),
        Some("interval=1w&limit=1&symbol=LTCBTC")
    );
    assert_eq!(klines[0].high, dec!(0.8));
}

#[tokio::test]
async fn test_tickers() {
    let transport = RecordingTransport::new();
    transport.respond(200, r#"{"symbol":"LTCBTC","price":"4.00000200"}"#);
    transport.respond(
        200,
        r#"[{"symbol":"LTCBTC","bidPrice":"4.00000000","bidQty":"431.00000000","askPrice":"4.00000200","askQty":"9.00000000"}]"#,
    );
    let client = public_client(transport.clone());

    let price = client.get_price("LTCBTC").await.unwrap();
    let books = client.market().book_tickers().await.unwrap();

    assert_eq!(price.price, dec!(4.000002));
    assert_eq!(books[0].spread(), dec!(0.000002));

    let requests = transport.requests();
    assert_eq!(requests[0].query(), Some("symbol=LTCBTC"));
    assert_eq!(
        requests[1].url,
        "https://api.binance.com/api/v3/ticker/bookTicker"
    );
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let transport = RecordingTransport::new();
    transport.respond(200, "not json");
    let client = public_client(transport.clone());

    let result = client.get_server_time().await;
    assert!(matches!(result, Err(RestError::Decode(_))));
}

#[tokio::test]
async fn test_account_endpoints_require_credentials() {
    let client = public_client(RecordingTransport::new());
    assert!(matches!(client.get_account().await, Err(RestError::AuthRequired)));
    assert!(matches!(client.account(), Err(RestError::AuthRequired)));
}

#[tokio::test]
async fn test_account_is_signed() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"{"makerCommission":15,"takerCommission":15,"buyerCommission":0,"sellerCommission":0,
            "canTrade":true,"canWithdraw":true,"canDeposit":true,"updateTime":0,
            "balances":[{"asset":"BTC","free":"1.5","locked":"0.5"}]}"#,
    );
    let client = signed_client(transport.clone());

    let account = client
        .account()
        .unwrap()
        .account(AccountQuery::default().recv_window(10000))
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.url_path(), "https://api.binance.com/api/v3/account");
    assert!(sent
        .query()
        .unwrap()
        .starts_with("recvWindow=10000&timestamp=1234567890&signature="));
    assert_eq!(account.balance("BTC").unwrap().total(), dec!(2));
}

#[tokio::test]
async fn test_order_queries() {
    let transport = RecordingTransport::new();
    let order = r#"{"symbol":"LTCBTC","orderId":1,"orderListId":-1,"clientOrderId":"myOrder1",
        "price":"0.1","origQty":"1.0","executedQty":"0.25","cummulativeQuoteQty":"0.025",
        "status":"PARTIALLY_FILLED","timeInForce":"GTC","type":"LIMIT","side":"BUY",
        "stopPrice":"0.0","icebergQty":"0.0","time":1499827319559,"updateTime":1499827319559,
        "isWorking":true}"#;
    transport.respond(200, &format!("[{order}]"));
    transport.respond(200, &format!("[{order}]"));
    transport.respond(200, order);
    let client = signed_client(transport.clone());
    let account = client.account().unwrap();

    let open = account.open_orders(OpenOrdersQuery::new()).await.unwrap();
    let all = account
        .all_orders(AllOrdersQuery::new("LTCBTC").limit(10))
        .await
        .unwrap();
    let single = account
        .get_order(OrderQuery::by_client_id("LTCBTC", "myOrder1"))
        .await
        .unwrap();

    assert!(open[0].status.is_open());
    assert_eq!(all.len(), 1);
    assert_eq!(single.remaining_qty(), dec!(0.75));

    let requests = transport.requests();
    assert!(requests[0]
        .query()
        .unwrap()
        .starts_with("timestamp=1234567890&signature="));
    assert!(requests[1]
        .query()
        .unwrap()
        .starts_with("limit=10&symbol=LTCBTC&timestamp="));
    assert!(requests[2]
        .query()
        .unwrap()
        .starts_with("origClientOrderId=myOrder1&symbol=LTCBTC&timestamp="));
}

#[tokio::test]
async fn test_get_order_needs_an_identifier() {
    let transport = RecordingTransport::new();
    let client = signed_client(transport.clone());

    let query = OrderQuery {
        symbol: "LTCBTC".to_string(),
        order_id: None,
        orig_client_order_id: None,
        recv_window: None,
    };
    let result = client.account().unwrap().get_order(query).await;

    assert!(matches!(result, Err(RestError::InvalidParameter(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_my_trades() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"[{"symbol":"BNBBTC","id":28457,"orderId":100234,"orderListId":-1,"price":"4.00000100",
            "qty":"12.00000000","quoteQty":"48.000012","commission":"10.10000000",
            "commissionAsset":"BNB","time":1499865549590,"isBuyer":true,"isMaker":false,
            "isBestMatch":true}]"#,
    );
    let client = signed_client(transport.clone());

    let trades = client
        .account()
        .unwrap()
        .my_trades(MyTradesQuery::new("BNBBTC").from_id(28000))
        .await
        .unwrap();

    assert_eq!(trades[0].commission_asset, "BNB");
    assert!(transport
        .last()
        .query()
        .unwrap()
        .starts_with("fromId=28000&symbol=BNBBTC&timestamp=1234567890&signature="));
}

#[tokio::test]
async fn test_new_limit_order() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"{"symbol":"BTCUSDT","orderId":28,"orderListId":-1,"clientOrderId":"abc",
            "transactTime":1507725176595,"price":"30000.00000000","origQty":"0.50000000",
            "executedQty":"0.00000000","cummulativeQuoteQty":"0.00000000","status":"NEW",
            "timeInForce":"GTC","type":"LIMIT","side":"BUY","fills":[]}"#,
    );
    let client = signed_client(transport.clone());

    let response = client
        .place_order(NewOrderRequest::limit("BTCUSDT", Side::Buy, dec!(0.5), dec!(30000)))
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "https://api.binance.com/api/v3/order");
    assert_eq!(
        sent.body.as_deref(),
        Some("newOrderRespType=FULL&price=30000.00000000&quantity=0.50000000&side=BUY&symbol=BTCUSDT&timeInForce=GTC&timestamp=1234567890&type=LIMIT&signature=4d0361e926e93a8d6f99084bcec440fe5897c1918e69ddac4a30ba37686c2472")
    );
    assert_eq!(response.status, Some(OrderStatus::New));
}

#[tokio::test]
async fn test_invalid_order_not_sent() {
    let transport = RecordingTransport::new();
    let client = signed_client(transport.clone());

    let order = NewOrderRequest::new("BTCUSDT", Side::Buy, OrderType::StopLossLimit, dec!(1))
        .with_price(dec!(100));
    let result = client.trading().unwrap().new_order(order).await;

    assert!(matches!(result, Err(RestError::InvalidParameter(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_test_order_endpoint() {
    let transport = RecordingTransport::new();
    transport.respond(200, "{}");
    let client = signed_client(transport.clone());

    client
        .trading()
        .unwrap()
        .test_order(
            NewOrderRequest::market("BTCUSDT", Side::Sell, dec!(0.1))
                .with_response_type(OrderResponseType::Ack)
                .with_client_order_id("probe-1"),
        )
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.url, "https://api.binance.com/api/v3/order/test");
    let body = sent.body.unwrap();
    assert!(body.starts_with("newClientOrderId=probe-1&newOrderRespType=ACK&quantity=0.10000000&side=SELL"));
    assert!(body.contains("&signature="));
}

#[tokio::test]
async fn test_cancel_order() {
    let transport = RecordingTransport::new();
    transport.respond(
        200,
        r#"{"symbol":"BTCUSDT","origClientOrderId":"myOrder1","orderId":42,"orderListId":-1,
            "clientOrderId":"cancelMyOrder1","status":"CANCELED","executedQty":"0.00000000"}"#,
    );
    let client = signed_client(transport.clone());

    let cancelled = client
        .cancel_order(CancelOrderRequest::by_id("BTCUSDT", 42))
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.body, None);
    assert_eq!(
        sent.query(),
        Some("orderId=42&symbol=BTCUSDT&timestamp=1234567890&signature=1d10a6336832e493cc64be8d90d41b60783d32293af02d421582a858ebac1ab4")
    );
    assert_eq!(cancelled.status, Some(OrderStatus::Canceled));
}

#[tokio::test]
async fn test_rejected_order_surfaces_exchange_code() {
    let transport = RecordingTransport::new();
    transport.respond(400, r#"{"code":-2010,"msg":"Account has insufficient balance for requested action."}"#);
    let client = signed_client(transport.clone());

    let err = client
        .place_order(NewOrderRequest::market("BTCUSDT", Side::Buy, dec!(100)))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    let api = err.api_error().unwrap();
    assert_eq!(api.raw_code, -2010);
    assert!(!err.is_retryable());
}
