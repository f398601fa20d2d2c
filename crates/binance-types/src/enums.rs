//! Side, OrderType, TimeInForce, OrderStatus and KlineInterval enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Stop loss, executes as market order
    StopLoss,
    /// Stop loss, executes as limit order
    StopLossLimit,
    /// Take profit, executes as market order
    TakeProfit,
    /// Take profit, executes as limit order
    TakeProfitLimit,
    /// Limit order rejected if it would immediately match
    LimitMaker,
    /// Type added by the exchange after this client was written
    #[serde(other)]
    Unknown,
}

impl OrderType {
    /// Returns the order type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::StopLoss => "STOP_LOSS",
            Self::StopLossLimit => "STOP_LOSS_LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            Self::LimitMaker => "LIMIT_MAKER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true if orders of this type rest on the book with a limit price
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit | Self::LimitMaker
        )
    }

    /// Returns true if orders of this type are triggered by a stop price
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            Self::StopLoss | Self::StopLossLimit | Self::TakeProfit | Self::TakeProfitLimit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

impl TimeInForce {
    /// Returns the time in force as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodTillCancelled => "GTC",
            Self::ImmediateOrCancel => "IOC",
            Self::FillOrKill => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted by the engine
    New,
    /// Partially filled
    PartiallyFilled,
    /// Completely filled
    Filled,
    /// Cancelled by the user
    Canceled,
    /// Currently unused by the exchange
    PendingCancel,
    /// Not accepted by the engine
    Rejected,
    /// Cancelled according to the order type rules
    Expired,
    /// Expired due to self-trade prevention
    ExpiredInMatch,
    /// Status added by the exchange after this client was written
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns true if the order can still trade
    pub fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::PartiallyFilled)
    }

    /// Returns true if the order reached a final state
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired | Self::ExpiredInMatch
        )
    }
}

/// Verbosity of the order placement response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderResponseType {
    /// Order id and transaction time only
    Ack,
    /// Order details without fills
    Result,
    /// Order details including fills
    #[default]
    Full,
}

impl OrderResponseType {
    /// Returns the response type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ack => "ACK",
            Self::Result => "RESULT",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for OrderResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candlestick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    #[serde(rename = "1s")]
    S1,
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "8h")]
    H8,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "3d")]
    D3,
    #[serde(rename = "1w")]
    W1,
    #[serde(rename = "1M")]
    Month1,
}

impl KlineInterval {
    /// Returns the interval as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S1 => "1s",
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::Month1 => "1M",
        }
    }

    /// Nominal interval length in milliseconds
    ///
    /// Months are counted as 30 days.
    pub fn as_millis(&self) -> u64 {
        const SECOND: u64 = 1_000;
        const MINUTE: u64 = 60 * SECOND;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        match self {
            Self::S1 => SECOND,
            Self::M1 => MINUTE,
            Self::M3 => 3 * MINUTE,
            Self::M5 => 5 * MINUTE,
            Self::M15 => 15 * MINUTE,
            Self::M30 => 30 * MINUTE,
            Self::H1 => HOUR,
            Self::H2 => 2 * HOUR,
            Self::H4 => 4 * HOUR,
            Self::H6 => 6 * HOUR,
            Self::H8 => 8 * HOUR,
            Self::H12 => 12 * HOUR,
            Self::D1 => DAY,
            Self::D3 => 3 * DAY,
            Self::W1 => 7 * DAY,
            Self::Month1 => 30 * DAY,
        }
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_wire_format() {
        assert_eq!(Side::Buy.as_str(), "BUY");
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        let side: Side = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn test_order_type_serde() {
        let order_type: OrderType = serde_json::from_str("\"STOP_LOSS_LIMIT\"").unwrap();
        assert_eq!(order_type, OrderType::StopLossLimit);
        assert!(order_type.requires_price());
        assert!(order_type.requires_stop_price());

        let unknown: OrderType = serde_json::from_str("\"OCO_SOMETHING\"").unwrap();
        assert_eq!(unknown, OrderType::Unknown);
    }

    #[test]
    fn test_time_in_force() {
        assert_eq!(TimeInForce::default(), TimeInForce::GoodTillCancelled);
        let tif: TimeInForce = serde_json::from_str("\"IOC\"").unwrap();
        assert_eq!(tif.to_string(), "IOC");
    }

    #[test]
    fn test_order_status_states() {
        let status: OrderStatus = serde_json::from_str("\"PARTIALLY_FILLED\"").unwrap();
        assert!(status.is_open());
        assert!(!status.is_final());
        assert!(OrderStatus::Canceled.is_final());
    }

    #[test]
    fn test_kline_interval() {
        assert_eq!(KlineInterval::Month1.as_str(), "1M");
        assert_eq!(KlineInterval::M1.as_str(), "1m");
        assert_eq!(KlineInterval::H4.as_millis(), 4 * 60 * 60 * 1000);
        let interval: KlineInterval = serde_json::from_str("\"15m\"").unwrap();
        assert_eq!(interval, KlineInterval::M15);
    }
}
