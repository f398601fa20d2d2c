//! Rate limits as reported by Binance
//!
//! The exchange publishes its limits in `exchangeInfo` and reports current
//! usage in `X-MBX-USED-WEIGHT-*` and `X-MBX-ORDER-COUNT-*` response headers.
//! These types only describe what was reported; enforcement is left to the
//! caller.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitType {
    /// Weighted request budget per IP
    RequestWeight,
    /// Order placement budget per account
    Orders,
    /// Unweighted request count per IP
    RawRequests,
    #[serde(other)]
    Unknown,
}

/// Unit of a rate limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateLimitInterval {
    Second,
    Minute,
    Hour,
    Day,
}

impl RateLimitInterval {
    /// Length of one unit
    pub fn unit(&self) -> Duration {
        match self {
            Self::Second => Duration::from_secs(1),
            Self::Minute => Duration::from_secs(60),
            Self::Hour => Duration::from_secs(3600),
            Self::Day => Duration::from_secs(86400),
        }
    }

    /// Suffix letter used in usage headers (`1M`, `10S`, `1D`)
    pub fn header_suffix(&self) -> char {
        match self {
            Self::Second => 'S',
            Self::Minute => 'M',
            Self::Hour => 'H',
            Self::Day => 'D',
        }
    }
}

/// A rate limit entry from `exchangeInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub rate_limit_type: RateLimitType,
    pub interval: RateLimitInterval,
    #[serde(default = "default_interval_num")]
    pub interval_num: u32,
    pub limit: u32,
}

fn default_interval_num() -> u32 {
    1
}

impl RateLimit {
    /// Length of the window this limit applies to
    pub fn window(&self) -> Duration {
        self.interval.unit() * self.interval_num
    }

    /// Header window label, e.g. `1M` or `10S`
    pub fn window_label(&self) -> String {
        format!("{}{}", self.interval_num, self.interval.header_suffix())
    }
}

/// What a usage header counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageKind {
    /// `X-MBX-USED-WEIGHT-<window>`
    UsedWeight,
    /// `X-MBX-ORDER-COUNT-<window>`
    OrderCount,
}

/// Usage reported in a single response header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedUsage {
    pub kind: UsageKind,
    /// Window label such as `1M`, upper-cased
    pub window: String,
    pub value: u64,
}

impl ReportedUsage {
    /// Parse one header; returns `None` for unrelated headers
    pub fn from_header(name: &str, value: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let (kind, window) = if let Some(window) = lower.strip_prefix("x-mbx-used-weight-") {
            (UsageKind::UsedWeight, window)
        } else if let Some(window) = lower.strip_prefix("x-mbx-order-count-") {
            (UsageKind::OrderCount, window)
        } else {
            return None;
        };

        if window.is_empty() {
            return None;
        }

        Some(Self {
            kind,
            window: window.to_ascii_uppercase(),
            value: value.trim().parse().ok()?,
        })
    }

    /// Collect all usage headers from a response
    pub fn collect<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<Self> {
        headers
            .into_iter()
            .filter_map(|(name, value)| Self::from_header(name, value))
            .collect()
    }

    /// Fraction of `limit` consumed, if this usage matches its window
    pub fn utilization(&self, limit: &RateLimit) -> Option<f64> {
        let matches_kind = match self.kind {
            UsageKind::UsedWeight => limit.rate_limit_type == RateLimitType::RequestWeight,
            UsageKind::OrderCount => limit.rate_limit_type == RateLimitType::Orders,
        };
        if !matches_kind || self.window != limit.window_label() || limit.limit == 0 {
            return None;
        }
        Some(self.value as f64 / limit.limit as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_parsing() {
        let json = r#"{"rateLimitType":"REQUEST_WEIGHT","interval":"MINUTE","intervalNum":1,"limit":6000}"#;
        let limit: RateLimit = serde_json::from_str(json).unwrap();
        assert_eq!(limit.rate_limit_type, RateLimitType::RequestWeight);
        assert_eq!(limit.window(), Duration::from_secs(60));
        assert_eq!(limit.window_label(), "1M");
    }

    #[test]
    fn test_rate_limit_without_interval_num() {
        let json = r#"{"rateLimitType":"ORDERS","interval":"SECOND","limit":10}"#;
        let limit: RateLimit = serde_json::from_str(json).unwrap();
        assert_eq!(limit.interval_num, 1);
        assert_eq!(limit.window(), Duration::from_secs(1));
    }

    #[test]
    fn test_usage_header_parsing() {
        let usage = ReportedUsage::from_header("x-mbx-used-weight-1m", "42").unwrap();
        assert_eq!(usage.kind, UsageKind::UsedWeight);
        assert_eq!(usage.window, "1M");
        assert_eq!(usage.value, 42);

        let orders = ReportedUsage::from_header("X-MBX-ORDER-COUNT-10S", "3").unwrap();
        assert_eq!(orders.kind, UsageKind::OrderCount);
        assert_eq!(orders.window, "10S");

        assert!(ReportedUsage::from_header("content-type", "application/json").is_none());
        assert!(ReportedUsage::from_header("x-mbx-used-weight-1m", "n/a").is_none());
    }

    #[test]
    fn test_collect_and_utilization() {
        let headers = [
            ("content-type", "application/json"),
            ("x-mbx-used-weight", "10"),
            ("x-mbx-used-weight-1m", "1500"),
        ];
        let usage = ReportedUsage::collect(headers);
        assert_eq!(usage.len(), 1);

        let limit = RateLimit {
            rate_limit_type: RateLimitType::RequestWeight,
            interval: RateLimitInterval::Minute,
            interval_num: 1,
            limit: 6000,
        };
        assert_eq!(usage[0].utilization(&limit), Some(0.25));
    }
}
