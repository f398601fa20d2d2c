//! Shared types for the Binance spot REST API
//!
//! This crate provides the wire-level type definitions used across the SDK.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Side`], [`OrderType`], [`TimeInForce`], [`OrderStatus`] - Order enums
//! - [`OrderResponseType`] - Verbosity of order placement responses
//! - [`KlineInterval`] - Candlestick intervals
//! - [`BinanceApiError`], [`BinanceErrorCode`] - Exchange error payload mapping
//! - [`RateLimit`], [`ReportedUsage`] - Rate limits as reported by the exchange

pub mod enums;
pub mod error_codes;
pub mod rate_limit;

// Re-export commonly used types
pub use enums::*;
pub use error_codes::*;
pub use rate_limit::*;
