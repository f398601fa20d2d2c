//! Demo 1: Market Snapshot
//!
//! Showcases: public endpoints, decimal-exact prices, exchange rules
//!
//! Run: cargo run --bin market_snapshot -- BTCUSDT
//!
//! Set BINANCE_BASE_URL to point at the testnet.

use binance_rest::{BinanceRestClient, ClientConfig, DepthQuery, KlineInterval, KlinesQuery};
use chrono::{TimeZone, Utc};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    let mut config = ClientConfig::new();
    if let Ok(base_url) = std::env::var("BINANCE_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let client = BinanceRestClient::with_config(config)?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", symbol).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    client.ping().await?;
    let server = client.get_server_time().await?;
    let skew = server.server_time - Utc::now().timestamp_millis();
    println!("{} Connected to {} (clock skew {} ms)", "✓".green(), client.base_url(), skew);

    // Trading rules
    let info = client.market().exchange_info().await?;
    match info.symbol(&symbol) {
        Some(rules) => {
            println!(
                "{} {} / {} status {}",
                "✓".green(),
                rules.base_asset,
                rules.quote_asset,
                if rules.is_trading() { rules.status.green() } else { rules.status.red() }
            );
            if let Some((min, max, tick)) = rules.price_filter() {
                println!("  {} min {} max {} tick {}", "Price:".dimmed(), min, max, tick);
            }
            if let Some((min, max, step)) = rules.lot_size() {
                println!("  {} min {} max {} step {}", "Qty:  ".dimmed(), min, max, step);
            }
        }
        None => {
            println!("{} Unknown symbol {}", "✗".red(), symbol);
            return Ok(());
        }
    }
    println!();

    // Top of book
    let depth = client.market().depth(DepthQuery::new(&symbol).limit(5)).await?;
    println!("{}", "  ORDER BOOK (top 5)".bold());
    for level in depth.asks.iter().rev() {
        println!("  {:>18} {:>18}", level.price.to_string().red(), level.quantity);
    }
    if let (Some(spread), Some(mid)) = (depth.spread(), depth.mid_price()) {
        println!("  {} {}  {} {}", "spread".dimmed(), spread, "mid".dimmed(), mid.round_dp(8));
    }
    for level in &depth.bids {
        println!("  {:>18} {:>18}", level.price.to_string().green(), level.quantity);
    }
    println!();

    // Last day of hourly candles
    let klines = client
        .market()
        .klines(KlinesQuery::new(&symbol, KlineInterval::H1).limit(24))
        .await?;
    println!("{}", "  LAST 24 HOURS".bold());
    for kline in &klines {
        let open_time = Utc
            .timestamp_millis_opt(kline.open_time)
            .single()
            .map(|t| t.format("%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let close = if kline.is_bullish() {
            kline.close.to_string().green()
        } else {
            kline.close.to_string().red()
        };
        println!("  {}  {:>18}  vol {}", open_time.dimmed(), close, kline.volume);
    }

    println!("\n{} Snapshot complete.", "✓".green());
    Ok(())
}
