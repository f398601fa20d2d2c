//! Demo 2: Account Summary
//!
//! Showcases: signed endpoints, error classification, order validation
//!
//! Run: cargo run --bin account_summary -- BTCUSDT
//!
//! NOTE: Requires BINANCE_API_KEY and BINANCE_API_SECRET. Point
//! BINANCE_BASE_URL at https://testnet.binance.vision to stay off mainnet.
//! The order at the end goes to the test endpoint and is never placed.

use binance_rest::{
    BinanceRestClient, MyTradesQuery, NewOrderRequest, OpenOrdersQuery, RestError, Side,
};
use binance_types::RecoveryStrategy;
use colored::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn explain(err: &RestError) {
    println!("{} {}", "✗".red(), err);
    if let Some(api) = err.api_error() {
        println!("  {} {}", "Exchange code:".dimmed(), api.raw_code);
    }
    let advice = match err.recovery_strategy() {
        RecoveryStrategy::Backoff { .. } => "back off before retrying".to_string(),
        RecoveryStrategy::Retry { .. } => "safe to retry".to_string(),
        RecoveryStrategy::ResyncClock => "local clock is off; sync it or raise recvWindow".to_string(),
        RecoveryStrategy::Fatal => "check API key permissions and secret".to_string(),
        RecoveryStrategy::UserAction { message } => message.to_string(),
        RecoveryStrategy::Skip => "request is invalid as built".to_string(),
        RecoveryStrategy::Manual => "investigate manually".to_string(),
    };
    println!("  {} {}", "Advice:".dimmed(), advice);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    let client = match BinanceRestClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  Set BINANCE_API_KEY and BINANCE_API_SECRET to run this demo.");
            return Ok(());
        }
    };

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT SUMMARY".cyan().bold());
    println!("{}", format!("  {}", client.base_url()).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    // Balances
    let account = match client.get_account().await {
        Ok(account) => account,
        Err(e) => {
            explain(&e);
            return Ok(());
        }
    };

    println!(
        "{} can trade: {}  maker fee: {} bps  taker fee: {} bps",
        "✓".green(),
        account.can_trade,
        account.maker_commission,
        account.taker_commission
    );
    println!();
    println!("{}", "  BALANCES".bold());
    let mut shown = 0;
    for balance in account.non_zero_balances() {
        shown += 1;
        let locked = if balance.locked > Decimal::ZERO {
            format!("({} locked)", balance.locked).yellow()
        } else {
            "".normal()
        };
        println!("  {:<8} {:>24} {}", balance.asset, balance.free, locked);
    }
    if shown == 0 {
        println!("  {}", "no funds".dimmed());
    }
    println!();

    let account_api = client.account()?;

    // Open orders
    match account_api.open_orders(OpenOrdersQuery::new().symbol(&symbol)).await {
        Ok(orders) => {
            println!("{}", format!("  OPEN ORDERS ({})", orders.len()).bold());
            for order in orders {
                println!(
                    "  #{} {} {} {} @ {} filled {}",
                    order.order_id,
                    order.side,
                    order.order_type,
                    order.orig_qty,
                    order.price,
                    order.executed_qty
                );
            }
        }
        Err(e) => explain(&e),
    }
    println!();

    // Recent fills
    match account_api.my_trades(MyTradesQuery::new(&symbol).limit(10)).await {
        Ok(trades) => {
            println!("{}", format!("  RECENT TRADES ({})", trades.len()).bold());
            for trade in trades {
                let side = if trade.is_buyer { "BUY".green() } else { "SELL".red() };
                println!(
                    "  {} {} @ {} fee {} {}",
                    side, trade.qty, trade.price, trade.commission, trade.commission_asset
                );
            }
        }
        Err(e) => explain(&e),
    }
    println!();

    // Validate an order far from the market without placing it
    let ticker = client.get_price(&symbol).await?;
    let price = (ticker.price * dec!(0.5)).round_dp(2);
    let order = NewOrderRequest::limit(&symbol, Side::Buy, dec!(0.001), price)
        .with_client_order_id("demo-test-order");

    println!("{} Testing LIMIT BUY 0.001 @ {}", "→".cyan(), price);
    match client.trading()?.test_order(order).await {
        Ok(()) => println!("{} Order accepted by the test endpoint", "✓".green()),
        Err(e) => explain(&e),
    }

    println!("\n{} Summary complete.", "✓".green());
    Ok(())
}
